//! Configuration type definitions.

use super::enums::ColorSpec;
use crate::animation::Phase;
use crate::cursor::{DEFAULT_DIRECTION, DEFAULT_POSITION, Precision};
use crate::script::DEFAULT_MAX_LOOP_ITERATIONS;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Viewer window settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WindowConfig {
    /// Window title; the scene name is appended at runtime
    #[serde(default = "default_title")]
    pub title: String,

    /// Canvas width in pixels (valid range: 100 - 4096)
    #[serde(default = "default_size")]
    pub width: i32,

    /// Canvas height in pixels (valid range: 100 - 4096)
    #[serde(default = "default_size")]
    pub height: i32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            width: default_size(),
            height: default_size(),
        }
    }
}

/// Colors used by the scenes.
///
/// Each entry is either a named color (red, green, blue, yellow, orange,
/// pink, white, black) or an RGB array like `[255, 0, 0]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PaletteConfig {
    /// Canvas background
    #[serde(default = "default_background")]
    pub background: ColorSpec,

    /// Color of the `shapes` demo
    #[serde(default = "default_shapes")]
    pub shapes: ColorSpec,

    /// Line color for the cursor demos and scripts
    #[serde(default = "default_ink")]
    pub ink: ColorSpec,

    /// Cursor marker color
    #[serde(default = "default_cursor_color")]
    pub cursor: ColorSpec,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            background: default_background(),
            shapes: default_shapes(),
            ink: default_ink(),
            cursor: default_cursor_color(),
        }
    }
}

/// Starting state of the drawing cursor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CursorConfig {
    /// Start position `[x, y]`
    #[serde(default = "default_start")]
    pub start: [f64; 2],

    /// Start direction vector `[dx, dy]`; must not be zero
    #[serde(default = "default_direction")]
    pub direction: [f64; 2],

    /// "float" keeps full precision; "truncate" truncates after every move
    /// and rotation like an integer-only turtle
    #[serde(default)]
    pub precision: Precision,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            start: default_start(),
            direction: default_direction(),
            precision: Precision::default(),
        }
    }
}

/// Draw++ interpreter limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ScriptConfig {
    /// Maximum iterations of a single `pour` or `tantque` loop
    /// (valid range: 1 - 10000000)
    #[serde(default = "default_max_loop_iterations")]
    pub max_loop_iterations: u64,
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            max_loop_iterations: default_max_loop_iterations(),
        }
    }
}

/// Custom choreography for the `cursor` demo.
///
/// # Example TOML
/// ```toml
/// [[animation.phases]]
/// repeat = 3
/// rotate_by = 120.0
/// stride = { kind = "heading" }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AnimationConfig {
    /// Phases to play instead of the built-in sequence; empty keeps the
    /// built-in one
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub phases: Vec<Phase>,
}

fn default_title() -> String {
    "Draw++".to_string()
}

fn default_size() -> i32 {
    800
}

fn default_background() -> ColorSpec {
    ColorSpec::named("white")
}

fn default_shapes() -> ColorSpec {
    ColorSpec::named("red")
}

fn default_ink() -> ColorSpec {
    ColorSpec::named("black")
}

fn default_cursor_color() -> ColorSpec {
    ColorSpec::named("blue")
}

fn default_start() -> [f64; 2] {
    [DEFAULT_POSITION.0, DEFAULT_POSITION.1]
}

fn default_direction() -> [f64; 2] {
    [DEFAULT_DIRECTION.0, DEFAULT_DIRECTION.1]
}

fn default_max_loop_iterations() -> u64 {
    DEFAULT_MAX_LOOP_ITERATIONS
}

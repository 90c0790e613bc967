//! Configuration file support for drawpp.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/drawpp/config.toml`. Settings cover the viewer window, the
//! palette, the cursor's starting state, interpreter limits and an optional custom
//! cursor choreography.
//!
//! If no config file exists, sensible defaults are used automatically. The file is
//! only ever read.

pub mod enums;
pub mod types;

pub use enums::ColorSpec;
pub use types::{AnimationConfig, CursorConfig, PaletteConfig, ScriptConfig, WindowConfig};

use crate::animation::Choreography;
use crate::cursor::{Cursor, DEFAULT_DIRECTION};
use crate::draw::{BLACK, BLUE, RED, WHITE};
use crate::scene::RenderSettings;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use schemars::{JsonSchema, Schema};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Accepted range for window width and height.
const WINDOW_SIZE_RANGE: std::ops::RangeInclusive<i32> = 100..=4096;

/// Accepted range for `script.max_loop_iterations`.
const LOOP_LIMIT_RANGE: std::ops::RangeInclusive<u64> = 1..=10_000_000;

/// Main configuration structure containing all user settings.
///
/// # Example TOML
/// ```toml
/// [window]
/// title = "Draw++"
/// width = 800
/// height = 800
///
/// [palette]
/// background = "white"
/// shapes = "red"
/// ink = [40, 40, 40]
/// cursor = "blue"
///
/// [cursor]
/// start = [400.0, 400.0]
/// direction = [100.0, 90.0]
/// precision = "truncate"
///
/// [script]
/// max_loop_iterations = 100000
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Viewer window settings
    #[serde(default)]
    pub window: WindowConfig,

    /// Scene colors
    #[serde(default)]
    pub palette: PaletteConfig,

    /// Starting cursor state
    #[serde(default)]
    pub cursor: CursorConfig,

    /// Draw++ interpreter limits
    #[serde(default)]
    pub script: ScriptConfig,

    /// Custom choreography for the cursor demo
    #[serde(default)]
    pub animation: AnimationConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value, or reset to the
    /// default, and a warning is logged.
    ///
    /// Validated ranges:
    /// - `window.width`, `window.height`: 100 - 4096
    /// - `script.max_loop_iterations`: 1 - 10000000
    /// - `cursor.direction`: finite and non-zero
    /// - `cursor.start`: finite
    fn validate_and_clamp(&mut self) {
        if !WINDOW_SIZE_RANGE.contains(&self.window.width) {
            warn!(
                "Invalid window width {}, clamping to 100-4096 range",
                self.window.width
            );
            self.window.width = self.window.width.clamp(100, 4096);
        }

        if !WINDOW_SIZE_RANGE.contains(&self.window.height) {
            warn!(
                "Invalid window height {}, clamping to 100-4096 range",
                self.window.height
            );
            self.window.height = self.window.height.clamp(100, 4096);
        }

        if self.window.title.trim().is_empty() {
            warn!("Empty window title, falling back to 'Draw++'");
            self.window.title = WindowConfig::default().title;
        }

        if !LOOP_LIMIT_RANGE.contains(&self.script.max_loop_iterations) {
            warn!(
                "Invalid max_loop_iterations {}, clamping to 1-10000000 range",
                self.script.max_loop_iterations
            );
            self.script.max_loop_iterations = self.script.max_loop_iterations.clamp(1, 10_000_000);
        }

        let [dx, dy] = self.cursor.direction;
        if !dx.is_finite() || !dy.is_finite() || (dx == 0.0 && dy == 0.0) {
            warn!(
                "Invalid cursor direction [{}, {}], falling back to [{}, {}]",
                dx, dy, DEFAULT_DIRECTION.0, DEFAULT_DIRECTION.1
            );
            self.cursor.direction = [DEFAULT_DIRECTION.0, DEFAULT_DIRECTION.1];
        }

        if self.cursor.start.iter().any(|v| !v.is_finite()) {
            warn!("Invalid cursor start {:?}, falling back to default", self.cursor.start);
            self.cursor.start = CursorConfig::default().start;
        }

        for (index, phase) in self.animation.phases.iter_mut().enumerate() {
            if !phase.rotate_by.is_finite() || !phase.turn_before.is_finite() {
                warn!("Animation phase {} has a non-finite angle, zeroing it", index);
                if !phase.rotate_by.is_finite() {
                    phase.rotate_by = 0.0;
                }
                if !phase.turn_before.is_finite() {
                    phase.turn_before = 0.0;
                }
            }
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/drawpp/config.toml`
    /// (`$XDG_CONFIG_HOME/drawpp/config.toml` when set).
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("drawpp");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from file, or returns defaults if not found.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory path cannot be determined
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Reads, parses and validates the config file at `path`.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let mut config = Self::from_toml(&config_str)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        info!("Loaded config from {}", path.display());
        debug!("Config: {:?}", config);

        config.validate_and_clamp();
        Ok(config)
    }

    /// Parses TOML text without validating it.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// The effective configuration as pretty-printed TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    /// JSON schema of the configuration file.
    pub fn json_schema() -> Schema {
        schemars::schema_for!(Config)
    }

    /// The starting cursor described by `[cursor]`.
    pub fn start_cursor(&self) -> Cursor {
        let [x, y] = self.cursor.start;
        let [dx, dy] = self.cursor.direction;
        Cursor::new((x, y), (dx, dy)).with_precision(self.cursor.precision)
    }

    /// The configured choreography, if `[[animation.phases]]` is present.
    pub fn choreography(&self) -> Option<Choreography> {
        if self.animation.phases.is_empty() {
            None
        } else {
            Some(Choreography::new(self.animation.phases.clone()))
        }
    }

    /// Resolves the palette and cursor into scene render settings.
    pub fn render_settings(&self) -> RenderSettings {
        RenderSettings {
            background: self.palette.background.resolve(WHITE),
            shapes: self.palette.shapes.resolve(RED),
            ink: self.palette.ink.resolve(BLACK),
            marker: self.palette.cursor.resolve(BLUE),
            cursor: self.start_cursor(),
            max_loop_iterations: self.script.max_loop_iterations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{Phase, Stride};
    use crate::cursor::Precision;
    use crate::draw::Color;
    use std::io::Write;

    #[test]
    fn empty_file_gives_defaults() {
        let config = Config::from_toml("").expect("parses");
        assert_eq!(config, Config::default());
        assert_eq!(config.render_settings(), RenderSettings::default());
    }

    #[test]
    fn sections_parse_and_resolve() {
        let config = Config::from_toml(
            r#"
            [window]
            width = 640

            [palette]
            background = [10, 20, 30]
            ink = "green"

            [cursor]
            start = [100.0, 50.0]
            direction = [10.0, 0.0]
            precision = "truncate"

            [[animation.phases]]
            repeat = 4
            rotate_by = 90.0
            stride = { kind = "heading" }
            "#,
        )
        .expect("parses");

        assert_eq!(config.window.width, 640);
        assert_eq!(config.window.height, 800);

        let settings = config.render_settings();
        assert_eq!(settings.background, Color::from_rgba8(10, 20, 30, 255));
        assert_eq!(settings.ink, crate::draw::GREEN);
        assert_eq!(settings.shapes, RED);
        assert_eq!(settings.cursor.position(), (100, 50));
        assert_eq!(settings.cursor.precision, Precision::Truncate);

        let choreography = config.choreography().expect("phases configured");
        assert_eq!(choreography.phases, vec![Phase::heading(4, 90.0)]);
        assert!(matches!(choreography.phases[0].stride, Stride::Heading));
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let mut config = Config::from_toml(
            r#"
            [window]
            title = "  "
            width = 20
            height = 100000

            [cursor]
            direction = [0.0, 0.0]

            [script]
            max_loop_iterations = 0
            "#,
        )
        .expect("parses");
        config.validate_and_clamp();

        assert_eq!(config.window.width, 100);
        assert_eq!(config.window.height, 4096);
        assert_eq!(config.window.title, "Draw++");
        assert_eq!(config.cursor.direction, [100.0, 90.0]);
        assert_eq!(config.script.max_loop_iterations, 1);
    }

    #[test]
    fn invalid_toml_is_an_error() {
        assert!(Config::from_toml("[window]\nwidth = \"wide\"").is_err());
    }

    #[test]
    fn load_from_reads_and_validates() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "[window]\nwidth = 5000").expect("write config");

        let config = Config::load_from(file.path()).expect("loads");
        assert_eq!(config.window.width, 4096);
    }

    #[test]
    fn printed_config_parses_back() {
        let mut config = Config::default();
        config.cursor.precision = Precision::Truncate;
        let text = config.to_toml().expect("serializes");

        assert!(text.contains("precision = \"truncate\""));
        assert_eq!(Config::from_toml(&text).expect("parses"), config);
    }

    #[test]
    fn schema_describes_every_section() {
        let schema = serde_json::to_value(Config::json_schema()).expect("schema serializes");
        let properties = schema["properties"].as_object().expect("object schema");
        for section in ["window", "palette", "cursor", "script", "animation"] {
            assert!(properties.contains_key(section), "missing {section}");
        }
    }
}

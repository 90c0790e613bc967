//! What the viewer shows: the built-in demos, the bundled Draw++ scripts and
//! inline programs passed on the command line.

use std::borrow::Cow;
use std::fmt;

use log::{debug, info};
use thiserror::Error;

use crate::animation::{Choreography, Style};
use crate::cursor::Cursor;
use crate::draw::{BLACK, BLUE, Color, DrawStats, RED, Recorder, Shape, Surface, WHITE};
use crate::script::{self, DEFAULT_MAX_LOOP_ITERATIONS, ScriptError, ScriptOptions};
use crate::util::Rect;

/// A Draw++ program shipped with the binary.
#[derive(Debug, Clone, Copy)]
pub struct BundledScript {
    pub name: &'static str,
    pub summary: &'static str,
    pub source: &'static str,
}

pub const BUNDLED_SCRIPTS: &[BundledScript] = &[
    BundledScript {
        name: "star",
        summary: "five-pointed star traced by the cursor",
        source: include_str!("../demos/star.draw"),
    },
    BundledScript {
        name: "spiral",
        summary: "square spiral with growing arms",
        source: include_str!("../demos/spiral.draw"),
    },
    BundledScript {
        name: "flower",
        summary: "disk petals, arcs and a stem",
        source: include_str!("../demos/flower.draw"),
    },
];

/// Built-in demos that are not scripts, with their summaries.
pub const BUILTIN_DEMOS: &[(&str, &str)] = &[
    ("shapes", "square, circle, line and quarter arc"),
    ("cursor", "cursor choreography: square, star, spiral, triangle"),
    ("polygons", "the same choreography following the heading throughout"),
];

/// Name of the demo shown when none is requested.
pub const DEFAULT_DEMO: &str = "shapes";

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("unknown demo '{name}' (see --list-demos)")]
    UnknownDemo { name: String },

    #[error("script '{name}' failed: {source}")]
    Script {
        name: String,
        #[source]
        source: ScriptError,
    },
}

/// Every demo name with its one-line summary, built-ins first.
pub fn catalogue() -> Vec<(&'static str, &'static str)> {
    BUILTIN_DEMOS
        .iter()
        .copied()
        .chain(BUNDLED_SCRIPTS.iter().map(|s| (s.name, s.summary)))
        .collect()
}

/// The four shapes of the `shapes` demo.
pub fn shapes_demo() -> [Shape; 4] {
    [
        Shape::Square {
            x: 100,
            y: 100,
            size: 200,
        },
        Shape::Circle {
            cx: 400,
            cy: 400,
            radius: 100,
        },
        Shape::Line {
            x1: 100,
            y1: 100,
            x2: 700,
            y2: 700,
        },
        Shape::Arc {
            cx: 400,
            cy: 400,
            radius: 100,
            start: 0,
            end: 90,
        },
    ]
}

/// Colors and starting state used when rendering a scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSettings {
    pub background: Color,
    /// Color of the `shapes` demo.
    pub shapes: Color,
    /// Line color for choreographies and scripts.
    pub ink: Color,
    /// Cursor marker color.
    pub marker: Color,
    pub cursor: Cursor,
    pub max_loop_iterations: u64,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            background: WHITE,
            shapes: RED,
            ink: BLACK,
            marker: BLUE,
            cursor: Cursor::default(),
            max_loop_iterations: DEFAULT_MAX_LOOP_ITERATIONS,
        }
    }
}

/// What rendering a scene produced besides pixels.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderReport {
    /// Final cursor, for scenes that move one.
    pub cursor: Option<Cursor>,
    /// Lines printed by a script.
    pub printed: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Scene {
    Shapes,
    Choreography {
        name: String,
        choreography: Choreography,
    },
    Script {
        name: String,
        source: Cow<'static, str>,
    },
}

impl Scene {
    /// Looks up a demo by name.
    pub fn demo(name: &str) -> Result<Self, SceneError> {
        let scene = match name {
            "shapes" => Scene::Shapes,
            "cursor" => Scene::Choreography {
                name: name.to_string(),
                choreography: Choreography::classic(),
            },
            "polygons" => Scene::Choreography {
                name: name.to_string(),
                choreography: Choreography::polygons(),
            },
            other => {
                let script = BUNDLED_SCRIPTS
                    .iter()
                    .find(|s| s.name == other)
                    .ok_or_else(|| SceneError::UnknownDemo {
                        name: other.to_string(),
                    })?;
                Scene::Script {
                    name: script.name.to_string(),
                    source: Cow::Borrowed(script.source),
                }
            }
        };
        Ok(scene)
    }

    /// A Draw++ program given on the command line.
    pub fn inline(source: impl Into<String>) -> Self {
        Scene::Script {
            name: "inline".to_string(),
            source: Cow::Owned(source.into()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Scene::Shapes => "shapes",
            Scene::Choreography { name, .. } | Scene::Script { name, .. } => name,
        }
    }

    /// Replaces the choreography of a choreography scene. Other scenes are
    /// left untouched.
    pub fn with_choreography(self, replacement: Choreography) -> Self {
        match self {
            Scene::Choreography { name, .. } => Scene::Choreography {
                name,
                choreography: replacement,
            },
            other => other,
        }
    }

    /// Clears `surface` to the background and draws the scene on it.
    pub fn render<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        settings: &RenderSettings,
    ) -> Result<RenderReport, SceneError> {
        info!("Rendering scene '{}'", self.name());

        surface.set_draw_color(settings.background);
        surface.clear();

        match self {
            Scene::Shapes => {
                surface.set_draw_color(settings.shapes);
                for shape in shapes_demo() {
                    debug!("Drawing {:?}", shape);
                    shape.render(surface);
                }
                Ok(RenderReport::default())
            }
            Scene::Choreography { choreography, .. } => {
                let style = Style {
                    ink: settings.ink,
                    marker: settings.marker,
                };
                let end = choreography.run(surface, settings.cursor, style);
                Ok(RenderReport {
                    cursor: Some(end),
                    printed: Vec::new(),
                })
            }
            Scene::Script { name, source } => {
                surface.set_draw_color(settings.ink);
                let options = ScriptOptions {
                    cursor: settings.cursor,
                    marker: settings.marker,
                    max_loop_iterations: settings.max_loop_iterations,
                };
                let outcome =
                    script::run(source, surface, options).map_err(|source| SceneError::Script {
                        name: name.clone(),
                        source,
                    })?;
                Ok(RenderReport {
                    cursor: Some(outcome.cursor),
                    printed: outcome.printed,
                })
            }
        }
    }

    /// Renders into a [`Recorder`] and summarizes the drawing calls.
    pub fn render_headless(&self, settings: &RenderSettings) -> Result<HeadlessSummary, SceneError> {
        let mut recorder = Recorder::new();
        let report = self.render(&mut recorder, settings)?;
        Ok(HeadlessSummary {
            scene: self.name().to_string(),
            stats: recorder.stats(),
            bounds: recorder.bounds(),
            report,
        })
    }
}

/// Result of a headless render.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessSummary {
    pub scene: String,
    pub stats: DrawStats,
    pub bounds: Option<Rect>,
    pub report: RenderReport,
}

impl fmt::Display for HeadlessSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "scene: {}", self.scene)?;
        writeln!(f, "clears: {}", self.stats.clears)?;
        writeln!(f, "rects: {}", self.stats.rects)?;
        writeln!(f, "lines: {}", self.stats.lines)?;
        writeln!(f, "points: {}", self.stats.points)?;
        match self.bounds {
            Some(r) => writeln!(f, "bounds: {},{} {}x{}", r.x, r.y, r.width, r.height)?,
            None => writeln!(f, "bounds: empty")?,
        }
        if let Some(cursor) = self.report.cursor {
            let (x, y) = cursor.position();
            writeln!(f, "cursor: ({}, {}) heading ({}, {})", x, y, cursor.dx, cursor.dy)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::record::DrawOp;

    #[test]
    fn every_catalogue_entry_resolves() {
        for (name, _) in catalogue() {
            let scene = Scene::demo(name).expect("catalogued demo");
            assert_eq!(scene.name(), name);
        }
    }

    #[test]
    fn unknown_demo_is_an_error() {
        assert!(matches!(
            Scene::demo("teapot"),
            Err(SceneError::UnknownDemo { name }) if name == "teapot"
        ));
    }

    #[test]
    fn bundled_scripts_run_cleanly() {
        let settings = RenderSettings::default();
        for script in BUNDLED_SCRIPTS {
            let summary = Scene::demo(script.name)
                .and_then(|scene| scene.render_headless(&settings))
                .unwrap_or_else(|err| panic!("{}: {}", script.name, err));
            assert!(summary.stats.points + summary.stats.lines > 0, "{} drew nothing", script.name);
        }
    }

    #[test]
    fn shapes_demo_draws_one_of_each() {
        let summary = Scene::Shapes
            .render_headless(&RenderSettings::default())
            .expect("renders");

        assert_eq!(summary.stats.clears, 1);
        assert_eq!(summary.stats.rects, 1);
        assert_eq!(summary.stats.lines, 1);
        assert_eq!(summary.bounds, Rect::new(100, 100, 601, 601));
        assert_eq!(summary.report.cursor, None);
    }

    #[test]
    fn shapes_use_the_shapes_color_over_the_background() {
        let mut rec = Recorder::new();
        Scene::Shapes
            .render(&mut rec, &RenderSettings::default())
            .expect("renders");

        assert_eq!(rec.ops()[0], DrawOp::Clear { color: WHITE });
        assert!(rec.ops()[1..].iter().all(|op| match *op {
            DrawOp::FillRect { color, .. } | DrawOp::Point { color, .. } | DrawOp::Line { color, .. } =>
                color == RED,
            DrawOp::Clear { .. } => false,
        }));
    }

    #[test]
    fn script_errors_name_the_script() {
        let err = Scene::inline("r -> 1 / 0")
            .render_headless(&RenderSettings::default())
            .expect_err("division by zero");
        assert_eq!(err.to_string(), "script 'inline' failed: line 1: division by zero");
    }

    #[test]
    fn inline_scripts_report_printed_lines() {
        let summary = Scene::inline("afficher(\"bonjour\")\nmoveCursor(5, 5)")
            .render_headless(&RenderSettings::default())
            .expect("runs");
        assert_eq!(summary.report.printed, vec!["bonjour".to_string()]);
        assert_eq!(summary.report.cursor.map(|c| c.position()), Some((405, 405)));
    }

    #[test]
    fn choreography_can_be_replaced() {
        let scene = Scene::demo("cursor")
            .expect("known demo")
            .with_choreography(Choreography::default());
        let summary = scene.render_headless(&RenderSettings::default()).expect("renders");
        assert_eq!(summary.stats.lines, 0);
        // Only the start marker.
        assert_eq!(summary.stats.points, 79);
    }

    #[test]
    fn summary_lists_counts_and_bounds() {
        let text = Scene::Shapes
            .render_headless(&RenderSettings::default())
            .expect("renders")
            .to_string();
        assert!(text.starts_with("scene: shapes\n"));
        assert!(text.contains("rects: 1\n"));
        assert!(text.contains("bounds: 100,100 601x601\n"));
    }
}

//! Data-driven cursor choreography.
//!
//! A [`Choreography`] is a list of [`Phase`]s. Every step of a phase moves the
//! cursor, draws a line from where it was, drops a marker where it landed and
//! then turns. Phases can be written in the config file as
//! `[[animation.phases]]` tables.

use crate::cursor::Cursor;
use crate::draw::{Color, Surface, primitives};
use log::debug;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How far, and in which direction, a single step moves the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Stride {
    /// Move by the cursor's direction vector.
    Heading,
    /// Move `length` pixels along the cursor's heading, then grow `length`.
    Growing { length: f64, grow: f64 },
    /// Move by a fixed screen-space offset, then add `grow` to `dx`.
    /// The cursor's own direction is ignored for movement but still turns.
    Offset { dx: f64, dy: f64, grow: f64 },
}

/// A run of identical steps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Phase {
    /// Degrees to turn once before the first step.
    #[serde(default)]
    pub turn_before: f64,
    /// Number of steps.
    pub repeat: u32,
    /// Degrees to turn after every step.
    pub rotate_by: f64,
    pub stride: Stride,
}

impl Phase {
    /// Phase that walks along the heading, turning `rotate_by` after each step.
    pub fn heading(repeat: u32, rotate_by: f64) -> Self {
        Self {
            turn_before: 0.0,
            repeat,
            rotate_by,
            stride: Stride::Heading,
        }
    }
}

/// Colors used while running a choreography.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    /// Color of the connecting lines.
    pub ink: Color,
    /// Color of the cursor markers.
    pub marker: Color,
}

/// An ordered list of phases.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Choreography {
    pub phases: Vec<Phase>,
}

impl Choreography {
    pub fn new(phases: Vec<Phase>) -> Self {
        Self { phases }
    }

    /// The original turtle script: a square, one extra quarter turn, a
    /// five-pointed star, a horizontal run whose stride grows from 50 by 10,
    /// and four more 160 pixel strides.
    ///
    /// The last two phases move by a fixed screen offset, so their turns only
    /// change where the heading points afterwards.
    pub fn classic() -> Self {
        Self::new(vec![
            Phase::heading(5, 90.0),
            Phase {
                turn_before: 90.0,
                ..Phase::heading(1, 0.0)
            },
            Phase::heading(6, 144.0),
            Phase {
                turn_before: 0.0,
                repeat: 11,
                rotate_by: 45.0,
                stride: Stride::Offset {
                    dx: 50.0,
                    dy: 0.0,
                    grow: 10.0,
                },
            },
            Phase {
                turn_before: 0.0,
                repeat: 4,
                rotate_by: 120.0,
                stride: Stride::Offset {
                    dx: 160.0,
                    dy: 0.0,
                    grow: 0.0,
                },
            },
        ])
    }

    /// Same turn sequence as [`Choreography::classic`], but the spiral and
    /// the triangle follow the heading: square, star, growing octagonal
    /// spiral, triangle.
    pub fn polygons() -> Self {
        Self::new(vec![
            Phase::heading(5, 90.0),
            Phase {
                turn_before: 90.0,
                ..Phase::heading(1, 0.0)
            },
            Phase::heading(6, 144.0),
            Phase {
                turn_before: 0.0,
                repeat: 11,
                rotate_by: 45.0,
                stride: Stride::Growing {
                    length: 50.0,
                    grow: 10.0,
                },
            },
            Phase::heading(4, 120.0),
        ])
    }

    /// Total number of steps across all phases.
    pub fn step_count(&self) -> u32 {
        self.phases.iter().map(|p| p.repeat).sum()
    }

    /// Plays the choreography on `surface`, starting from `cursor`.
    ///
    /// Draws a marker at the start position first. Returns the cursor as it
    /// stands after the last step.
    pub fn run<S: Surface + ?Sized>(&self, surface: &mut S, mut cursor: Cursor, style: Style) -> Cursor {
        let previous = surface.draw_color();
        surface.set_draw_color(style.ink);

        let (x, y) = cursor.position();
        primitives::draw_cursor_with(surface, x, y, style.marker);

        for (index, phase) in self.phases.iter().enumerate() {
            debug!(
                "Phase {}: {} steps, turn {}° before, {}° per step, {:?}",
                index, phase.repeat, phase.turn_before, phase.rotate_by, phase.stride
            );

            if phase.turn_before != 0.0 {
                cursor.rotate(phase.turn_before);
            }

            let mut stride = phase.stride;
            for _ in 0..phase.repeat {
                let anchor = cursor.position();
                stride = step(&mut cursor, stride);
                let (x, y) = cursor.position();
                primitives::draw_line(surface, anchor.0, anchor.1, x, y);
                primitives::draw_cursor_with(surface, x, y, style.marker);
                cursor.rotate(phase.rotate_by);
            }
        }

        surface.set_draw_color(previous);
        cursor
    }
}

/// Moves the cursor by one stride and returns the stride for the next step.
fn step(cursor: &mut Cursor, stride: Stride) -> Stride {
    match stride {
        Stride::Heading => {
            cursor.advance();
            stride
        }
        Stride::Growing { length, grow } => {
            if let Some((ux, uy)) = cursor.heading() {
                cursor.move_by(ux * length, uy * length);
            }
            Stride::Growing {
                length: length + grow,
                grow,
            }
        }
        Stride::Offset { dx, dy, grow } => {
            cursor.move_by(dx, dy);
            Stride::Offset {
                dx: dx + grow,
                dy,
                grow,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::Precision;
    use crate::draw::color::{BLACK, BLUE, RED};
    use crate::draw::record::{DrawOp, Recorder};

    const STYLE: Style = Style {
        ink: BLACK,
        marker: BLUE,
    };

    fn lines(rec: &Recorder) -> Vec<(i32, i32, i32, i32)> {
        rec.ops()
            .iter()
            .filter_map(|op| match *op {
                DrawOp::Line { x1, y1, x2, y2, .. } => Some((x1, y1, x2, y2)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn classic_draws_one_line_per_step() {
        let choreography = Choreography::classic();
        let mut rec = Recorder::new();
        choreography.run(&mut rec, Cursor::default(), STYLE);

        assert_eq!(choreography.step_count(), 27);
        let stats = rec.stats();
        assert_eq!(stats.lines, 27);
        // One marker at the start plus one per step, 79 points each.
        assert_eq!(stats.points, 28 * 79);
    }

    #[test]
    fn lines_chain_from_the_previous_position() {
        let mut rec = Recorder::new();
        Choreography::classic().run(&mut rec, Cursor::default(), STYLE);

        let lines = lines(&rec);
        assert_eq!(lines[0], (400, 400, 500, 490));
        assert_eq!(lines[1], (500, 490, 410, 590));
        for pair in lines.windows(2) {
            assert_eq!((pair[0].2, pair[0].3), (pair[1].0, pair[1].1));
        }
    }

    #[test]
    fn offset_stride_grows_each_step() {
        let choreography = Choreography::new(vec![Phase {
            turn_before: 0.0,
            repeat: 3,
            rotate_by: 45.0,
            stride: Stride::Offset {
                dx: 50.0,
                dy: 0.0,
                grow: 10.0,
            },
        }]);
        let mut rec = Recorder::new();
        let end = choreography.run(&mut rec, Cursor::new((0.0, 0.0), (1.0, 0.0)), STYLE);

        assert_eq!(lines(&rec), vec![(0, 0, 50, 0), (50, 0, 110, 0), (110, 0, 180, 0)]);
        assert_eq!(end.position(), (180, 0));
    }

    #[test]
    fn growing_stride_follows_heading() {
        let choreography = Choreography::new(vec![Phase {
            turn_before: 0.0,
            repeat: 2,
            rotate_by: 90.0,
            stride: Stride::Growing {
                length: 10.0,
                grow: 5.0,
            },
        }]);
        let mut rec = Recorder::new();
        let end = choreography.run(&mut rec, Cursor::new((0.0, 0.0), (2.0, 0.0)), STYLE);

        assert_eq!(lines(&rec), vec![(0, 0, 10, 0), (10, 0, 10, 15)]);
        assert_eq!(end.position(), (10, 15));
    }

    #[test]
    fn truncating_cursor_changes_the_star() {
        let run = |precision| {
            let mut rec = Recorder::new();
            Choreography::polygons().run(&mut rec, Cursor::default().with_precision(precision), STYLE);
            lines(&rec)
        };
        assert_ne!(run(Precision::Float), run(Precision::Truncate));
    }

    #[test]
    fn run_restores_the_draw_color() {
        let mut rec = Recorder::new();
        rec.set_draw_color(RED);
        Choreography::polygons().run(&mut rec, Cursor::default(), STYLE);
        assert_eq!(rec.draw_color(), RED);
    }

    #[test]
    fn phases_parse_from_toml() {
        let choreography: Choreography = toml::from_str(
            r#"
            [[phases]]
            repeat = 3
            rotate_by = 120.0
            stride = { kind = "heading" }

            [[phases]]
            turn_before = 30.0
            repeat = 2
            rotate_by = 0.0
            stride = { kind = "growing", length = 20.0, grow = 5.0 }
            "#,
        )
        .expect("valid choreography");

        assert_eq!(choreography.phases.len(), 2);
        assert_eq!(choreography.phases[0], Phase::heading(3, 120.0));
        assert_eq!(choreography.step_count(), 5);
    }
}

//! The animated drawing cursor: a position plus a direction vector.
//!
//! A [`Cursor`] is a plain `Copy` value. [`move_cursor`] and
//! [`rotate_cursor`] take one and return the transformed cursor; the
//! `&mut self` methods do the same in place.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Default start position, the centre of an 800×800 window.
pub const DEFAULT_POSITION: (f64, f64) = (400.0, 400.0);

/// Default start direction.
pub const DEFAULT_DIRECTION: (f64, f64) = (100.0, 90.0);

/// How cursor state is rounded between operations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Precision {
    /// Keep full `f64` state and truncate only when a point is drawn.
    #[default]
    Float,
    /// Truncate move deltas and the rotated direction to integers after
    /// every operation. Reproduces the drift of integer-only turtles.
    Truncate,
}

impl std::str::FromStr for Precision {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "float" => Ok(Self::Float),
            "truncate" => Ok(Self::Truncate),
            other => Err(format!("unknown precision '{other}' (expected float or truncate)")),
        }
    }
}

/// Position and direction of the drawing cursor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cursor {
    pub x: f64,
    pub y: f64,
    pub dx: f64,
    pub dy: f64,
    pub precision: Precision,
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new(DEFAULT_POSITION, DEFAULT_DIRECTION)
    }
}

impl Cursor {
    /// Creates a cursor at `position` heading along `direction`, with
    /// [`Precision::Float`].
    pub fn new(position: (f64, f64), direction: (f64, f64)) -> Self {
        Self {
            x: position.0,
            y: position.1,
            dx: direction.0,
            dy: direction.1,
            precision: Precision::Float,
        }
    }

    /// Returns the cursor with the given precision mode.
    ///
    /// Switching to [`Precision::Truncate`] truncates the current state.
    pub fn with_precision(mut self, precision: Precision) -> Self {
        self.precision = precision;
        if precision == Precision::Truncate {
            self.x = self.x.trunc();
            self.y = self.y.trunc();
            self.dx = self.dx.trunc();
            self.dy = self.dy.trunc();
        }
        self
    }

    /// Pixel the cursor sits on, truncated toward zero.
    pub fn position(&self) -> (i32, i32) {
        (self.x as i32, self.y as i32)
    }

    pub fn direction(&self) -> (f64, f64) {
        (self.dx, self.dy)
    }

    /// Length of the direction vector.
    pub fn magnitude(&self) -> f64 {
        self.dx.hypot(self.dy)
    }

    /// Unit vector along the direction, or `None` for a zero direction.
    pub fn heading(&self) -> Option<(f64, f64)> {
        let len = self.magnitude();
        if len == 0.0 {
            None
        } else {
            Some((self.dx / len, self.dy / len))
        }
    }

    /// Translates the position by `(dx, dy)`.
    pub fn move_by(&mut self, dx: f64, dy: f64) {
        let (dx, dy) = match self.precision {
            Precision::Float => (dx, dy),
            Precision::Truncate => (dx.trunc(), dy.trunc()),
        };
        self.x += dx;
        self.y += dy;
    }

    /// Translates the position by the cursor's own direction vector.
    pub fn advance(&mut self) {
        self.move_by(self.dx, self.dy);
    }

    /// Rotates the direction vector about the origin by `angle_degrees`.
    pub fn rotate(&mut self, angle_degrees: f64) {
        let (sin, cos) = angle_degrees.to_radians().sin_cos();
        let dx = self.dx * cos - self.dy * sin;
        let dy = self.dx * sin + self.dy * cos;
        (self.dx, self.dy) = match self.precision {
            Precision::Float => (dx, dy),
            Precision::Truncate => (dx.trunc(), dy.trunc()),
        };
    }

    /// By-value form of [`Cursor::move_by`].
    pub fn moved(mut self, dx: f64, dy: f64) -> Self {
        self.move_by(dx, dy);
        self
    }

    /// By-value form of [`Cursor::rotate`].
    pub fn rotated(mut self, angle_degrees: f64) -> Self {
        self.rotate(angle_degrees);
        self
    }
}

/// Returns `cursor` translated by `(dx, dy)`.
pub fn move_cursor(cursor: Cursor, dx: f64, dy: f64) -> Cursor {
    cursor.moved(dx, dy)
}

/// Returns `cursor` with its direction rotated by `angle_degrees`.
pub fn rotate_cursor(cursor: Cursor, angle_degrees: f64) -> Cursor {
    cursor.rotated(angle_degrees)
}

//! Geometry helpers shared by the recorder and scene summaries.

/// Axis-aligned rectangle with positive extent.
///
/// Edges saturate at the `i32` range, so rectangles built from extreme
/// coordinates clip instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// Creates a new rectangle. Width/height must be positive.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Option<Self> {
        if width <= 0 || height <= 0 {
            None
        } else {
            Some(Self {
                x,
                y,
                width,
                height,
            })
        }
    }

    /// Creates a rectangle from min/max bounds (exclusive max).
    pub fn from_min_max(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Option<Self> {
        Self::new(
            min_x,
            min_y,
            max_x.saturating_sub(min_x),
            max_y.saturating_sub(min_y),
        )
    }

    fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// Smallest rectangle covering both `self` and `other`.
    pub fn union(&self, other: &Rect) -> Rect {
        let min_x = self.x.min(other.x);
        let min_y = self.y.min(other.y);
        let max_x = self.right().max(other.right());
        let max_y = self.bottom().max(other.bottom());
        Rect {
            x: min_x,
            y: min_y,
            width: max_x.saturating_sub(min_x),
            height: max_y.saturating_sub(min_y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_rejects_empty_extent() {
        assert!(Rect::new(0, 0, 0, 10).is_none());
        assert!(Rect::from_min_max(5, 5, 5, 9).is_none());
    }

    #[test]
    fn union_covers_both() {
        let a = Rect::new(0, 0, 10, 10).unwrap();
        let b = Rect::new(20, -5, 5, 5).unwrap();
        assert_eq!(a.union(&b), Rect::new(0, -5, 25, 15).unwrap());
    }

    #[test]
    fn extreme_edges_saturate() {
        let far = Rect::from_min_max(i32::MIN, 0, i32::MAX, 1).unwrap();
        assert_eq!(far.width, i32::MAX);

        let edge = Rect::new(i32::MAX - 1, 0, 10, 1).unwrap();
        let u = edge.union(&Rect::new(0, 0, 1, 1).unwrap());
        assert_eq!((u.x, u.width), (0, i32::MAX));
    }
}

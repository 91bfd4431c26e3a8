use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in normalized page coordinates.
///
/// Corners are fractions of page width/height in `[0, 1]` with a top-left
/// origin (y grows downward, matching detector output). The upstream model
/// does not strictly guarantee `x0 < x1` or `y0 < y1`; degenerate boxes are
/// tolerated and report zero width/height.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct BBox {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl BBox {
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn width(&self) -> f32 {
        (self.x1 - self.x0).max(0.0)
    }

    pub fn height(&self) -> f32 {
        (self.y1 - self.y0).max(0.0)
    }

    pub fn center_x(&self) -> f32 {
        (self.x0 + self.x1) * 0.5
    }

    pub fn center_y(&self) -> f32 {
        (self.y0 + self.y1) * 0.5
    }

    pub fn is_finite(&self) -> bool {
        self.x0.is_finite() && self.y0.is_finite() && self.x1.is_finite() && self.y1.is_finite()
    }
}

impl From<[f32; 4]> for BBox {
    fn from(v: [f32; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

impl From<BBox> for [f32; 4] {
    fn from(b: BBox) -> Self {
        [b.x0, b.y0, b.x1, b.y1]
    }
}

/// A point in destination page coordinates (caller-defined units, typically
/// PDF points).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn computes_center_and_extent() {
        let b = BBox::new(0.1, 0.2, 0.3, 0.4);
        assert_eq!(b.center_x(), 0.2);
        assert_eq!(b.center_y(), 0.3);
        assert!((b.height() - 0.2).abs() < 1e-6);
    }

    #[test]
    fn degenerate_box_has_zero_extent() {
        let b = BBox::new(0.5, 0.5, 0.4, 0.4);
        assert_eq!(b.width(), 0.0);
        assert_eq!(b.height(), 0.0);
    }

    #[test]
    fn detects_non_finite_corners() {
        let b = BBox::new(0.1, f32::NAN, 0.2, 0.3);
        assert!(!b.is_finite());
        assert!(BBox::new(0.0, 0.0, 1.0, 1.0).is_finite());
    }

    #[test]
    fn serializes_as_flat_array() {
        let b = BBox::new(0.5, 0.25, 0.75, 0.5);
        let json = serde_json::to_string(&b).unwrap();
        assert_eq!(json, "[0.5,0.25,0.75,0.5]");
        let back: BBox = serde_json::from_str(&json).unwrap();
        assert_eq!(back, b);
    }
}

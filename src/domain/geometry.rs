//! Points and shapes in base-image pixel coordinates

/// A pointer position in base-image pixel space
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Clamp into `[0, width - 1] x [0, height - 1]`
    pub fn clamp_to(self, width: u32, height: u32) -> Self {
        let max_x = f64::from(width.saturating_sub(1));
        let max_y = f64::from(height.saturating_sub(1));
        Self {
            x: self.x.clamp(0.0, max_x),
            y: self.y.clamp(0.0, max_y),
        }
    }
}

/// Geometry of a single annotation
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    /// Top-left corner plus extents
    Rectangle {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    Line { x1: f64, y1: f64, x2: f64, y2: f64 },
}

impl Shape {
    /// Axis-aligned rectangle spanned by two corners.
    ///
    /// Each extent is at least one pixel, so a click without movement still
    /// produces a 1x1 rectangle (which the size check then rejects).
    pub fn rect_from_corners(a: Point, b: Point) -> Self {
        Shape::Rectangle {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: (b.x - a.x).abs().max(1.0),
            height: (b.y - a.y).abs().max(1.0),
        }
    }

    pub fn line(from: Point, to: Point) -> Self {
        Shape::Line {
            x1: from.x,
            y1: from.y,
            x2: to.x,
            y2: to.y,
        }
    }

    /// Minimum-size test applied before a shape is committed.
    ///
    /// Rectangles must exceed `min_size` in both dimensions; lines only need
    /// distinct endpoints.
    pub fn has_size(&self, min_size: f64) -> bool {
        match *self {
            Shape::Rectangle { width, height, .. } => width > min_size && height > min_size,
            Shape::Line { x1, y1, x2, y2 } => x1 != x2 || y1 != y2,
        }
    }

    /// True when every coordinate is a finite number
    pub fn is_finite(&self) -> bool {
        let coords = match *self {
            Shape::Rectangle {
                x,
                y,
                width,
                height,
            } => [x, y, width, height],
            Shape::Line { x1, y1, x2, y2 } => [x1, y1, x2, y2],
        };
        coords.iter().all(|v| v.is_finite())
    }
}

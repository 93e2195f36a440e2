//! Shared path construction for annotations
//!
//! Converts domain shapes (f64, base-image pixels) into tiny-skia paths.

use tiny_skia::{LineCap, LineJoin, Path, PathBuilder, Stroke};

use crate::domain::Shape;

/// Normalize min/max coordinates from arbitrary start/end points
#[inline]
pub fn normalize_rect(x1: f32, y1: f32, x2: f32, y2: f32) -> (f32, f32, f32, f32) {
    let (min_x, max_x) = if x1 < x2 { (x1, x2) } else { (x2, x1) };
    let (min_y, max_y) = if y1 < y2 { (y1, y2) } else { (y2, y1) };
    (min_x, min_y, max_x, max_y)
}

/// Build the outline path of a shape.
///
/// Returns `None` when the shape has non-finite coordinates (or ones that
/// overflow f32), which tiny-skia can't draw.
pub fn shape_path(shape: &Shape) -> Option<Path> {
    if !shape.is_finite() {
        return None;
    }
    let mut pb = PathBuilder::new();
    match *shape {
        Shape::Rectangle {
            x,
            y,
            width,
            height,
        } => {
            let (min_x, min_y, max_x, max_y) = normalize_rect(
                finite_f32(x)?,
                finite_f32(y)?,
                finite_f32(x + width)?,
                finite_f32(y + height)?,
            );
            pb.move_to(min_x, min_y);
            pb.line_to(max_x, min_y);
            pb.line_to(max_x, max_y);
            pb.line_to(min_x, max_y);
            pb.close();
        }
        Shape::Line { x1, y1, x2, y2 } => {
            pb.move_to(finite_f32(x1)?, finite_f32(y1)?);
            pb.line_to(finite_f32(x2)?, finite_f32(y2)?);
        }
    }
    pb.finish()
}

/// Outline stroke with round caps and joins
pub fn outline_stroke(width: f32) -> Stroke {
    Stroke {
        width,
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..Default::default()
    }
}

fn finite_f32(v: f64) -> Option<f32> {
    let v = v as f32;
    v.is_finite().then_some(v)
}

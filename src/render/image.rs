//! Flattening annotations onto a base image using tiny-skia
//!
//! Highlights are alpha-blended fills; rectangles and lines are round-capped
//! strokes. Entries paint in order, so later entries end up on top.

use image::{Rgba, RgbaImage};
use tiny_skia::{ColorU8, FillRule, Paint, Pixmap, PremultipliedColorU8, Transform};

use super::geometry::{outline_stroke, shape_path};
use crate::domain::{AnnotationEntry, Shape};
use crate::error::{EngineError, Result};

/// Flatten `entries` onto `base`
pub fn render(base: &RgbaImage, entries: &[AnnotationEntry], stroke_width: f32) -> Result<RgbaImage> {
    render_layers(base, entries, stroke_width)
}

/// Flatten `entries` plus the in-progress `preview` entry on top of them
pub fn render_with_preview(
    base: &RgbaImage,
    entries: &[AnnotationEntry],
    preview: Option<&AnnotationEntry>,
    stroke_width: f32,
) -> Result<RgbaImage> {
    render_layers(base, entries.iter().chain(preview), stroke_width)
}

/// Paint each entry over a copy of `base`, bottom to top
pub fn render_layers<'a>(
    base: &RgbaImage,
    entries: impl IntoIterator<Item = &'a AnnotationEntry>,
    stroke_width: f32,
) -> Result<RgbaImage> {
    let (width, height) = base.dimensions();
    if width == 0 || height == 0 {
        log::error!("Cannot render onto a {}x{} image", width, height);
        return Err(EngineError::InvalidImage { width, height });
    }

    let mut entries = entries.into_iter().peekable();
    if entries.peek().is_none() {
        return Ok(base.clone());
    }

    let mut pixmap = to_pixmap(base).ok_or(EngineError::InvalidImage { width, height })?;
    for entry in entries {
        draw_entry(&mut pixmap, entry, stroke_width);
    }
    Ok(from_pixmap(&pixmap, base))
}

fn draw_entry(pixmap: &mut Pixmap, entry: &AnnotationEntry, stroke_width: f32) {
    let Some(path) = shape_path(&entry.shape) else {
        log::warn!(
            "Skipping {:?} annotation with undrawable shape {:?}",
            entry.kind,
            entry.shape
        );
        return;
    };

    let mut paint = Paint::default();
    paint.set_color(entry.color.into());
    paint.anti_alias = true;

    // A line has no interior, so a line-shaped highlight is stroked instead
    let fill = entry.kind.is_fill() && matches!(entry.shape, Shape::Rectangle { .. });
    if fill {
        pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
    } else {
        pixmap.stroke_path(
            &path,
            &paint,
            &outline_stroke(stroke_width),
            Transform::identity(),
            None,
        );
    }
}

/// Copy straight RGBA into a premultiplied pixmap
fn to_pixmap(img: &RgbaImage) -> Option<Pixmap> {
    let mut pixmap = Pixmap::new(img.width(), img.height())?;
    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(img.pixels()) {
        *dst = premultiplied(src);
    }
    Some(pixmap)
}

/// Back to straight RGBA. Pixels no entry painted over keep the exact
/// value from `base`, since premultiplying is lossy for translucent pixels.
fn from_pixmap(pixmap: &Pixmap, base: &RgbaImage) -> RgbaImage {
    let mut img = RgbaImage::new(pixmap.width(), pixmap.height());
    for ((dst, src), orig) in img.pixels_mut().zip(pixmap.pixels()).zip(base.pixels()) {
        if *src == premultiplied(orig) {
            *dst = *orig;
        } else {
            let c = src.demultiply();
            dst.0 = [c.red(), c.green(), c.blue(), c.alpha()];
        }
    }
    img
}

fn premultiplied(px: &Rgba<u8>) -> PremultipliedColorU8 {
    let [r, g, b, a] = px.0;
    ColorU8::from_rgba(r, g, b, a).premultiply()
}

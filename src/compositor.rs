//! Side-by-side compositing of several captures
//!
//! Captures are staged one at a time and then combined left to right with a
//! separator bar between neighbours. The staging buffer belongs to one
//! `ImageCompositor` value and is emptied by every `combine` call.

use image::RgbaImage;

use crate::capture::{CaptureSource, capture_region};
use crate::config::{EngineConfig, ShapeColor};
use crate::error::{EngineError, Result};

/// Separator and background settings used when combining
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CompositeStyle {
    pub separator_thickness: u32,
    pub separator_color: ShapeColor,
    pub background_color: ShapeColor,
}

impl Default for CompositeStyle {
    fn default() -> Self {
        Self::from(&EngineConfig::default())
    }
}

impl From<&EngineConfig> for CompositeStyle {
    fn from(config: &EngineConfig) -> Self {
        Self {
            separator_thickness: config.separator_thickness,
            separator_color: config.separator_color,
            background_color: config.background_color,
        }
    }
}

/// Collects captures and combines them into one composite
#[derive(Debug, Default)]
pub struct ImageCompositor {
    style: CompositeStyle,
    /// `None` marks a capture that failed
    staged: Vec<Option<RgbaImage>>,
}

impl ImageCompositor {
    pub fn new(style: CompositeStyle) -> Self {
        Self {
            style,
            staged: Vec::new(),
        }
    }

    pub fn style(&self) -> &CompositeStyle {
        &self.style
    }

    /// Number of staged captures, failed ones included
    pub fn pending(&self) -> usize {
        self.staged.len()
    }

    /// Stage a capture. `None` records a missing member, which makes the
    /// next `combine` fail.
    pub fn stage(&mut self, image: Option<RgbaImage>) {
        self.staged.push(image);
        log::debug!("Staged capture, {} pending", self.staged.len());
    }

    /// Capture a region from `source` and stage the result
    pub fn capture<S: CaptureSource + ?Sized>(&mut self, source: &mut S, region: &str) {
        match capture_region(source, region) {
            Ok(img) => self.stage(Some(img)),
            Err(err) => {
                log::warn!("Capture of '{}' failed: {}", region, err);
                self.stage(None);
            }
        }
    }

    /// Drop all staged captures
    pub fn clear(&mut self) {
        if !self.staged.is_empty() {
            log::debug!("Clearing {} staged captures", self.staged.len());
        }
        self.staged.clear();
    }

    /// Combine everything staged so far. The staging buffer is empty
    /// afterwards, whatever the outcome.
    pub fn combine(&mut self) -> Result<RgbaImage> {
        let staged = std::mem::take(&mut self.staged);
        log::info!("Combining {} staged captures", staged.len());

        let result = staged
            .into_iter()
            .enumerate()
            .map(|(i, img)| {
                img.ok_or_else(|| EngineError::Combine(format!("capture {i} is missing")))
            })
            .collect::<Result<Vec<_>>>()
            .and_then(|images| combine(images, &self.style));

        match &result {
            Ok(img) => log::info!("Images combined ({}x{})", img.width(), img.height()),
            Err(err) => log::error!("Combine failed: {}", err),
        }
        result
    }
}

/// Place `images` side by side, top-aligned, separated by bars of the
/// style's thickness and color.
///
/// A single image is returned untouched.
pub fn combine(mut images: Vec<RgbaImage>, style: &CompositeStyle) -> Result<RgbaImage> {
    if let Some((i, img)) = images
        .iter()
        .enumerate()
        .find(|(_, img)| img.width() == 0 || img.height() == 0)
    {
        return Err(EngineError::Combine(format!(
            "image {} has invalid size ({}x{})",
            i,
            img.width(),
            img.height()
        )));
    }

    match images.len() {
        0 => return Err(EngineError::Combine("no image to combine".to_string())),
        1 => return Ok(images.remove(0)),
        _ => {}
    }

    let separators = u32::try_from(images.len() - 1)
        .ok()
        .and_then(|n| n.checked_mul(style.separator_thickness));
    let width = separators
        .and_then(|sep| {
            images
                .iter()
                .try_fold(sep, |acc, img| acc.checked_add(img.width()))
        })
        .ok_or_else(|| EngineError::Combine("combined width overflows".to_string()))?;
    let height = images.iter().map(|img| img.height()).max().unwrap_or(0);

    let mut combined = RgbaImage::from_pixel(width, height, style.background_color.into());
    let separator = (style.separator_thickness > 0).then(|| {
        RgbaImage::from_pixel(
            style.separator_thickness,
            height,
            style.separator_color.opaque().into(),
        )
    });

    let mut x: i64 = 0;
    for (i, img) in images.iter().enumerate() {
        if i > 0 {
            if let Some(separator) = &separator {
                image::imageops::replace(&mut combined, separator, x, 0);
            }
            x += i64::from(style.separator_thickness);
        }
        image::imageops::overlay(&mut combined, img, x, 0);
        x += i64::from(img.width());
    }

    Ok(combined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::{PixelFormat, RawBitmap};
    use image::Rgba;

    fn solid(w: u32, h: u32, rgba: [u8; 4]) -> RgbaImage {
        RgbaImage::from_pixel(w, h, Rgba(rgba))
    }

    #[test]
    fn test_combine_dimensions() {
        let style = CompositeStyle::default();
        let images = vec![
            solid(100, 50, [10, 10, 10, 255]),
            solid(30, 80, [20, 20, 20, 255]),
            solid(7, 1, [30, 30, 30, 255]),
        ];
        let combined = combine(images, &style).unwrap();
        assert_eq!(combined.dimensions(), (100 + 30 + 7 + 2 * 5, 80));
    }

    #[test]
    fn test_combine_single_image_unchanged() {
        let img = solid(4, 3, [1, 2, 3, 4]);
        let combined = combine(vec![img.clone()], &CompositeStyle::default()).unwrap();
        assert_eq!(combined, img);
    }

    #[test]
    fn test_combine_empty_fails() {
        let err = combine(Vec::new(), &CompositeStyle::default()).unwrap_err();
        assert!(matches!(err, EngineError::Combine(ref msg) if msg == "no image to combine"));
    }

    #[test]
    fn test_combine_rejects_zero_sized_member() {
        let images = vec![solid(4, 4, [0, 0, 0, 255]), RgbaImage::new(0, 4)];
        assert!(matches!(
            combine(images, &CompositeStyle::default()),
            Err(EngineError::Combine(_))
        ));
    }

    #[test]
    fn test_combine_layout() {
        let style = CompositeStyle::default();
        let left = solid(10, 20, [200, 0, 0, 255]);
        let right = solid(10, 10, [0, 0, 200, 255]);
        let combined = combine(vec![left, right], &style).unwrap();

        assert_eq!(combined.get_pixel(0, 0).0, [200, 0, 0, 255]);
        assert_eq!(combined.get_pixel(9, 19).0, [200, 0, 0, 255]);
        // separator spans the full height
        for x in 10..15 {
            assert_eq!(combined.get_pixel(x, 0).0, [0, 0, 0, 255]);
            assert_eq!(combined.get_pixel(x, 19).0, [0, 0, 0, 255]);
        }
        assert_eq!(combined.get_pixel(15, 0).0, [0, 0, 200, 255]);
        // below the shorter capture is background
        assert_eq!(combined.get_pixel(15, 15).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_compositor_clears_after_success() {
        let mut compositor = ImageCompositor::default();
        compositor.stage(Some(solid(100, 50, [1, 1, 1, 255])));
        compositor.stage(Some(solid(100, 50, [2, 2, 2, 255])));
        assert_eq!(compositor.pending(), 2);

        let combined = compositor.combine().unwrap();
        assert_eq!(combined.dimensions(), (205, 50));
        assert_eq!(compositor.pending(), 0);

        // nothing stale left behind
        assert!(compositor.combine().is_err());
    }

    #[test]
    fn test_compositor_clears_after_failure() {
        let mut compositor = ImageCompositor::default();
        compositor.stage(Some(solid(5, 5, [1, 1, 1, 255])));
        compositor.stage(None);

        assert!(matches!(compositor.combine(), Err(EngineError::Combine(_))));
        assert_eq!(compositor.pending(), 0);

        compositor.stage(Some(solid(3, 3, [9, 9, 9, 255])));
        assert_eq!(compositor.combine().unwrap().dimensions(), (3, 3));
    }

    #[test]
    fn test_failed_capture_poisons_combine() {
        let mut source = |region: &str| {
            (region == "request").then(|| RawBitmap::new(2, 2, PixelFormat::Rgba8, vec![255; 16]))
        };
        let mut compositor = ImageCompositor::default();
        compositor.capture(&mut source, "request");
        compositor.capture(&mut source, "response");
        assert_eq!(compositor.pending(), 2);
        assert!(compositor.combine().is_err());
    }
}

//! Capture sources
//!
//! Locating a region inside the host's widget tree is the host's business;
//! the engine only asks for "the bitmap of region X" and normalizes whatever
//! comes back.

use std::path::PathBuf;

use image::RgbaImage;

use super::bitmap::RawBitmap;
use crate::error::{EngineError, Result};

/// Something that can render a named region of the host UI into a bitmap.
///
/// Implementations run on the UI thread and return `None` when the region
/// can't be found or has nothing to draw.
pub trait CaptureSource {
    fn capture(&mut self, region: &str) -> Option<RawBitmap>;
}

impl<F> CaptureSource for F
where
    F: FnMut(&str) -> Option<RawBitmap>,
{
    fn capture(&mut self, region: &str) -> Option<RawBitmap> {
        self(region)
    }
}

/// Capture a region and normalize it to RGBA
pub fn capture_region<S: CaptureSource + ?Sized>(source: &mut S, region: &str) -> Result<RgbaImage> {
    let raw = source
        .capture(region)
        .ok_or_else(|| EngineError::Input(format!("no bitmap for region '{region}'")))?;
    let img = raw.into_rgba()?;
    log::info!(
        "Captured region '{}': {}x{} pixels",
        region,
        img.width(),
        img.height()
    );
    Ok(img)
}

/// Capture source whose region ids are image file paths, relative to an
/// optional base directory
#[derive(Clone, Debug, Default)]
pub struct ImageFileSource {
    base_dir: Option<PathBuf>,
}

impl ImageFileSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: Some(dir.into()),
        }
    }
}

impl CaptureSource for ImageFileSource {
    fn capture(&mut self, region: &str) -> Option<RawBitmap> {
        let path = match &self.base_dir {
            Some(dir) => dir.join(region),
            None => PathBuf::from(region),
        };
        match image::open(&path) {
            Ok(img) => Some(RawBitmap::from_rgba(img.to_rgba8())),
            Err(err) => {
                log::warn!("Could not read image {:?}: {}", path, err);
                None
            }
        }
    }
}

//! Raw host bitmaps and their conversion to RGBA

use image::RgbaImage;

use crate::error::{EngineError, Result};

/// Pixel layout of a host bitmap
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelFormat {
    Rgba8,
    Bgra8,
    Rgb8,
    /// Packed ARGB words stored big-endian (A, R, G, B byte order)
    Argb8,
}

impl PixelFormat {
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Rgb8 => 3,
            PixelFormat::Rgba8 | PixelFormat::Bgra8 | PixelFormat::Argb8 => 4,
        }
    }
}

/// A bitmap exactly as the host handed it over
#[derive(Clone, Debug)]
pub struct RawBitmap {
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
    pub data: Vec<u8>,
}

impl RawBitmap {
    pub fn new(width: u32, height: u32, format: PixelFormat, data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            format,
            data,
        }
    }

    /// Wrap an already-decoded RGBA image
    pub fn from_rgba(img: RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self::new(width, height, PixelFormat::Rgba8, img.into_raw())
    }

    /// Normalize to an RGBA image, rejecting zero-sized or truncated buffers
    pub fn into_rgba(self) -> Result<RgbaImage> {
        if self.width == 0 || self.height == 0 {
            return Err(EngineError::Input(format!(
                "bitmap size is invalid ({}x{})",
                self.width, self.height
            )));
        }

        let expected = (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|n| n.checked_mul(self.format.bytes_per_pixel()));
        if expected != Some(self.data.len()) {
            return Err(EngineError::Input(format!(
                "{}x{} {:?} bitmap has {} bytes of pixel data",
                self.width,
                self.height,
                self.format,
                self.data.len()
            )));
        }

        let Self {
            width,
            height,
            format,
            mut data,
        } = self;

        let rgba = match format {
            PixelFormat::Rgba8 => data,
            PixelFormat::Bgra8 => {
                for px in data.chunks_exact_mut(4) {
                    px.swap(0, 2);
                }
                data
            }
            PixelFormat::Argb8 => {
                for px in data.chunks_exact_mut(4) {
                    px.rotate_left(1);
                }
                data
            }
            PixelFormat::Rgb8 => {
                let rgb = image::RgbImage::from_raw(width, height, data)
                    .ok_or_else(|| EngineError::Input("RGB bitmap had incorrect size".into()))?;
                return Ok(image::DynamicImage::ImageRgb8(rgb).to_rgba8());
            }
        };

        RgbaImage::from_raw(width, height, rgba)
            .ok_or_else(|| EngineError::Input("RGBA bitmap had incorrect size".into()))
    }
}

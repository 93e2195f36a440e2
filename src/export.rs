//! Export of flattened images to the clipboard or to PNG files

use std::io;
use std::path::{Path, PathBuf};

use image::RgbaImage;

use crate::config::SaveLocation;
use crate::error::{EngineError, Result};

/// Default file name stem for exported screenshots
pub const DEFAULT_FILE_STEM: &str = "annotated_screenshot";

/// Destination for a finished image.
///
/// Overwrite confirmation and path selection happen before `save_image` is
/// called; a sink that shows its own dialog reports a dismissed dialog as
/// [`EngineError::UserCancelled`].
pub trait ExportSink {
    fn copy_image(&mut self, img: &RgbaImage) -> Result<()>;
    fn save_image(&mut self, img: &RgbaImage, path: &Path) -> Result<()>;
}

/// Encode an 8-bit RGBA PNG
pub fn write_png<W: io::Write>(w: W, image: &RgbaImage) -> Result<(), png::EncodingError> {
    let mut encoder = png::Encoder::new(w, image.width(), image.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(image.as_raw())
}

/// PNG bytes for clipboards that take an `image/png` payload
pub fn encode_png(img: &RgbaImage) -> Result<Vec<u8>, png::EncodingError> {
    let mut buffer = Vec::new();
    write_png(&mut buffer, img)?;
    Ok(buffer)
}

/// Write `img` to `path` as PNG
pub fn save_png(img: &RgbaImage, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path).map_err(|err| EngineError::file_write(path, err))?;
    let mut writer = io::BufWriter::new(file);
    write_png(&mut writer, img).map_err(|err| EngineError::file_write(path, err))?;
    io::Write::flush(&mut writer).map_err(|err| EngineError::file_write(path, err))?;
    log::info!(
        "Saved {}x{} image to {:?}",
        img.width(),
        img.height(),
        path
    );
    Ok(())
}

/// Append `.png` unless the file name already ends with it (any case)
pub fn normalize_png_path(path: impl Into<PathBuf>) -> PathBuf {
    let path = path.into();
    let has_png = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
    if has_png {
        return path;
    }
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    if name.is_empty() {
        name.push(DEFAULT_FILE_STEM);
    }
    name.push(".png");
    path.with_file_name(name)
}

/// Timestamped path inside the user's Pictures or Documents folder
pub fn default_save_path(location: SaveLocation) -> Option<PathBuf> {
    let mut path = match location {
        SaveLocation::Pictures => {
            dirs::picture_dir().or_else(|| dirs::home_dir().map(|h| h.join("Pictures")))
        }
        SaveLocation::Documents => {
            dirs::document_dir().or_else(|| dirs::home_dir().map(|h| h.join("Documents")))
        }
    }?;
    let name = chrono::Local::now()
        .format("annotated_screenshot_%Y-%m-%d_%H-%M-%S.png")
        .to_string();
    path.push(name);

    Some(path)
}

/// Sink that only writes files; it has no clipboard to offer
#[derive(Clone, Copy, Debug, Default)]
pub struct PngFileSink;

impl ExportSink for PngFileSink {
    fn copy_image(&mut self, _img: &RgbaImage) -> Result<()> {
        Err(EngineError::ClipboardUnavailable(
            "file export has no clipboard".to_string(),
        ))
    }

    fn save_image(&mut self, img: &RgbaImage, path: &Path) -> Result<()> {
        save_png(img, path)
    }
}

/// System clipboard plus PNG files
#[cfg(feature = "clipboard")]
pub struct SystemClipboardSink {
    clipboard: Option<arboard::Clipboard>,
}

#[cfg(feature = "clipboard")]
impl SystemClipboardSink {
    /// Connects lazily; a missing clipboard only matters once something is copied
    pub fn new() -> Self {
        Self { clipboard: None }
    }

    fn clipboard(&mut self) -> Result<&mut arboard::Clipboard> {
        if self.clipboard.is_none() {
            let clipboard = arboard::Clipboard::new()
                .map_err(|err| EngineError::ClipboardUnavailable(err.to_string()))?;
            self.clipboard = Some(clipboard);
        }
        self.clipboard
            .as_mut()
            .ok_or_else(|| EngineError::ClipboardUnavailable("not connected".to_string()))
    }
}

#[cfg(feature = "clipboard")]
impl Default for SystemClipboardSink {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "clipboard")]
impl ExportSink for SystemClipboardSink {
    fn copy_image(&mut self, img: &RgbaImage) -> Result<()> {
        let data = arboard::ImageData {
            width: img.width() as usize,
            height: img.height() as usize,
            bytes: std::borrow::Cow::Borrowed(img.as_raw()),
        };
        self.clipboard()?
            .set_image(data)
            .map_err(|err| EngineError::ClipboardUnavailable(err.to_string()))?;
        log::info!("Image copied to clipboard");
        Ok(())
    }

    fn save_image(&mut self, img: &RgbaImage, path: &Path) -> Result<()> {
        save_png(img, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_save_png_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        let img = RgbaImage::from_fn(6, 4, |x, y| Rgba([x as u8 * 40, y as u8 * 60, 7, 200]));

        PngFileSink.save_image(&img, &path).unwrap();
        let loaded = image::open(&path).unwrap();
        assert_eq!(loaded.color(), image::ColorType::Rgba8);
        assert_eq!(loaded.to_rgba8(), img);
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("out.png");
        let img = RgbaImage::new(2, 2);
        let err = save_png(&img, &path).unwrap_err();
        assert!(matches!(err, EngineError::FileWrite { .. }));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_encode_png_signature() {
        let bytes = encode_png(&RgbaImage::new(1, 1)).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_file_sink_has_no_clipboard() {
        let result = PngFileSink.copy_image(&RgbaImage::new(1, 1));
        assert!(matches!(result, Err(EngineError::ClipboardUnavailable(_))));
    }

    #[test]
    fn test_normalize_png_path() {
        assert_eq!(normalize_png_path("shot"), PathBuf::from("shot.png"));
        assert_eq!(normalize_png_path("dir/shot.PNG"), PathBuf::from("dir/shot.PNG"));
        assert_eq!(normalize_png_path("dir/shot.jpg"), PathBuf::from("dir/shot.jpg.png"));
        assert_eq!(
            normalize_png_path(""),
            PathBuf::from("annotated_screenshot.png")
        );
    }

    #[test]
    fn test_default_save_path_is_png() {
        // No home directory in some sandboxes
        if let Some(path) = default_save_path(SaveLocation::Documents) {
            assert_eq!(path.extension().and_then(|e| e.to_str()), Some("png"));
        }
    }
}

//! Capture input
//!
//! This module provides:
//! - Raw host bitmaps and their normalization to RGBA (bitmap.rs)
//! - The capture source abstraction and a file-backed source (source.rs)

pub mod bitmap;
pub mod source;

pub use bitmap::{PixelFormat, RawBitmap};
pub use source::{CaptureSource, ImageFileSource, capture_region};

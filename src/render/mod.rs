//! Annotation rendering
//!
//! This module contains:
//! - Path construction shared by every shape kind (geometry.rs)
//! - Flattening annotations onto a base image with tiny-skia (image.rs)
//!
//! Live preview and export go through the same `image::render_layers`
//! path, so a committed shape looks identical in both.

pub mod geometry;
pub mod image;

pub use self::image::{render, render_with_preview};

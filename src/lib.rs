//! Capture compositing and annotation engine.
//!
//! Captured bitmaps are combined side by side, annotated with rectangles,
//! lines and translucent highlights through a pointer-driven session, and
//! flattened to an RGBA image for the clipboard or a PNG file.

pub mod annotations;
pub mod capture;
pub mod compositor;
pub mod config;
pub mod domain;
pub mod error;
pub mod export;
pub mod render;
pub mod session;

pub use compositor::ImageCompositor;
pub use config::{EngineConfig, ShapeColor};
pub use error::{EngineError, Result};
pub use session::Session;

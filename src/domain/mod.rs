//! Pure domain types with minimal dependencies
//!
//! Shapes and annotation entries live in base-image pixel space. Nothing in
//! here knows about rendering or capture.

pub mod annotation;
pub mod geometry;

pub use annotation::*;
pub use geometry::*;

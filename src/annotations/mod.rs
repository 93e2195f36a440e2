//! Annotation editing
//!
//! This module provides:
//! - The ordered list of committed annotations with undo (model.rs)
//! - The pointer-driven drag state machine that commits shapes (controller.rs)

pub mod controller;
pub mod model;

pub use controller::{DragState, InteractionController, PointerEvent};
pub use model::AnnotationModel;

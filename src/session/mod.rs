//! Annotation session management
//!
//! This module contains:
//! - The session that owns one annotate-and-export cycle (state.rs)
//! - Message types for editing and export actions (messages.rs)
//! - Editor keyboard shortcut mapping (shortcuts.rs)

pub mod messages;
pub mod shortcuts;
pub mod state;

pub use messages::{EditMsg, SessionAction};
pub use state::{ExportFailure, Session};

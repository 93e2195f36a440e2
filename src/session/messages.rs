//! Message types for an annotation session

use crate::annotations::PointerEvent;
use crate::config::ShapeColor;
use crate::domain::AnnotationKind;

// ============================================================================
// Editing
// ============================================================================

/// Messages that change the session without ending it
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditMsg {
    /// Pointer input on the canvas
    Pointer(PointerEvent),
    /// Select the tool for new shapes
    SetKind(AnnotationKind),
    /// Cycle to the next tool
    CycleKind,
    /// Select the color for new shapes
    SetColor(ShapeColor),
    /// Remove the most recent annotation
    Undo,
}

// ============================================================================
// Session actions
// ============================================================================

/// Everything a host can ask of a session, as produced by key handling.
///
/// Export and color picking need host dialogs, so the host carries those out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionAction {
    Edit(EditMsg),
    /// Open the host's color chooser
    PickColor,
    /// Flatten and copy to the clipboard
    Copy,
    /// Flatten and save to a file
    Save,
    /// Discard the session
    Cancel,
}

impl SessionAction {
    pub fn set_kind(kind: AnnotationKind) -> Self {
        SessionAction::Edit(EditMsg::SetKind(kind))
    }

    pub fn undo() -> Self {
        SessionAction::Edit(EditMsg::Undo)
    }

    pub fn cycle_kind() -> Self {
        SessionAction::Edit(EditMsg::CycleKind)
    }
}

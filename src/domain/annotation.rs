//! Annotation types for drawing on captures
//!
//! All coordinates are base-image pixels.

use serde::{Deserialize, Serialize};

use super::geometry::Shape;
use crate::config::ShapeColor;

/// Annotation tool: decides between stroke and fill, and the alpha policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AnnotationKind {
    /// Opaque rectangle outline
    #[default]
    Rect,
    /// Opaque straight line
    Line,
    /// Translucent filled rectangle
    Highlight,
}

impl AnnotationKind {
    /// Get the next tool in the cycle
    pub fn next(self) -> Self {
        match self {
            AnnotationKind::Rect => AnnotationKind::Line,
            AnnotationKind::Line => AnnotationKind::Highlight,
            AnnotationKind::Highlight => AnnotationKind::Rect,
        }
    }

    /// Tool for a single-key shortcut (R, L or H, case-insensitive)
    pub fn from_shortcut(key: char) -> Option<Self> {
        match key.to_ascii_lowercase() {
            'r' => Some(AnnotationKind::Rect),
            'l' => Some(AnnotationKind::Line),
            'h' => Some(AnnotationKind::Highlight),
            _ => None,
        }
    }

    /// Highlights fill their interior, everything else is stroked
    pub fn is_fill(self) -> bool {
        matches!(self, AnnotationKind::Highlight)
    }

    /// Color actually stored for a shape drawn with this tool.
    ///
    /// Highlights always get `highlight_alpha` regardless of the picker's
    /// alpha; rectangles and lines are forced opaque.
    pub fn color_for(self, base: ShapeColor, highlight_alpha: u8) -> ShapeColor {
        match self {
            AnnotationKind::Highlight => base.with_alpha(highlight_alpha),
            AnnotationKind::Rect | AnnotationKind::Line => base.opaque(),
        }
    }
}

/// A committed annotation. Its position in the model is its z-order.
#[derive(Clone, Debug, PartialEq)]
pub struct AnnotationEntry {
    pub shape: Shape,
    pub color: ShapeColor,
    pub kind: AnnotationKind,
}

impl AnnotationEntry {
    pub fn new(shape: Shape, color: ShapeColor, kind: AnnotationKind) -> Self {
        Self { shape, color, kind }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_cycle() {
        let kind = AnnotationKind::Rect;
        assert_eq!(kind.next(), AnnotationKind::Line);
        assert_eq!(kind.next().next(), AnnotationKind::Highlight);
        assert_eq!(kind.next().next().next(), AnnotationKind::Rect);
    }

    #[test]
    fn test_shortcuts() {
        assert_eq!(AnnotationKind::from_shortcut('R'), Some(AnnotationKind::Rect));
        assert_eq!(AnnotationKind::from_shortcut('l'), Some(AnnotationKind::Line));
        assert_eq!(
            AnnotationKind::from_shortcut('H'),
            Some(AnnotationKind::Highlight)
        );
        assert_eq!(AnnotationKind::from_shortcut('x'), None);
    }

    #[test]
    fn test_color_for_kind() {
        let picked = ShapeColor::rgba(10, 20, 30, 17);
        assert_eq!(
            AnnotationKind::Highlight.color_for(picked, 200),
            ShapeColor::rgba(10, 20, 30, 200)
        );
        assert_eq!(AnnotationKind::Rect.color_for(picked, 200).a, 255);
        assert_eq!(AnnotationKind::Line.color_for(picked, 200).a, 255);

        // Highlight alpha ignores an opaque pick too
        let opaque = ShapeColor::rgb(1, 2, 3);
        assert_eq!(AnnotationKind::Highlight.color_for(opaque, 90).a, 90);
    }
}

//! Pointer-driven drawing state machine
//!
//! Idle until a pointer goes down, Dragging until it comes back up. While
//! dragging the controller keeps a preview shape that follows the pointer;
//! on release the preview is committed to the model if it is large enough.

use crate::annotations::model::AnnotationModel;
use crate::config::{EngineConfig, ShapeColor};
use crate::domain::{AnnotationEntry, AnnotationKind, Point, Shape};

/// Pointer input forwarded by the host canvas
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Down(Point),
    Move(Point),
    Up(Point),
}

/// In-progress drag, present only between pointer-down and pointer-up
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragState {
    pub anchor: Point,
    pub preview: Option<Shape>,
}

#[derive(Clone, Debug)]
pub struct InteractionController {
    width: u32,
    height: u32,
    kind: AnnotationKind,
    color: ShapeColor,
    highlight_alpha: u8,
    min_shape_size: f64,
    drag: Option<DragState>,
}

impl InteractionController {
    /// Controller for a base image of `width` x `height` pixels
    pub fn new(width: u32, height: u32, config: &EngineConfig) -> Self {
        Self {
            width,
            height,
            kind: config.default_kind,
            color: config.default_color,
            highlight_alpha: config.translucent_highlight_alpha(),
            min_shape_size: config.min_shape_size,
            drag: None,
        }
    }

    pub fn kind(&self) -> AnnotationKind {
        self.kind
    }

    /// Tool for shapes drawn from now on; committed entries keep theirs
    pub fn set_kind(&mut self, kind: AnnotationKind) {
        log::debug!("Annotation tool set to {:?}", kind);
        self.kind = kind;
    }

    pub fn color(&self) -> ShapeColor {
        self.color
    }

    /// Color for shapes drawn from now on; committed entries keep theirs
    pub fn set_color(&mut self, color: ShapeColor) {
        self.color = color;
    }

    pub fn drag(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Entry the preview would commit as, for live rendering
    pub fn preview_entry(&self) -> Option<AnnotationEntry> {
        let shape = self.drag?.preview?;
        Some(AnnotationEntry::new(shape, self.stored_color(), self.kind))
    }

    /// Dispatch a pointer event. Returns true when a shape was committed.
    pub fn handle(&mut self, event: PointerEvent, model: &mut AnnotationModel) -> bool {
        match event {
            PointerEvent::Down(p) => {
                self.pointer_down(p);
                false
            }
            PointerEvent::Move(p) => {
                self.pointer_move(p);
                false
            }
            PointerEvent::Up(p) => self.pointer_up(p, model),
        }
    }

    pub fn pointer_down(&mut self, p: Point) {
        if self.drag.is_some() {
            log::debug!("Pointer down while dragging, restarting drag");
        }
        self.drag = Some(DragState {
            anchor: p,
            preview: None,
        });
    }

    pub fn pointer_move(&mut self, p: Point) {
        let kind = self.kind;
        let (width, height) = (self.width, self.height);
        let Some(drag) = self.drag.as_mut() else {
            return;
        };

        let p = p.clamp_to(width, height);
        drag.preview = Some(match kind {
            AnnotationKind::Line => Shape::line(drag.anchor, p),
            AnnotationKind::Rect | AnnotationKind::Highlight => {
                Shape::rect_from_corners(drag.anchor, p)
            }
        });
    }

    /// Finish the drag. The last preview is committed if it passes the size
    /// check, otherwise it is dropped. Returns true when a shape was committed.
    pub fn pointer_up(&mut self, _p: Point, model: &mut AnnotationModel) -> bool {
        let Some(drag) = self.drag.take() else {
            return false;
        };

        match drag.preview {
            Some(shape) if shape.has_size(self.min_shape_size) => {
                let entry = AnnotationEntry::new(shape, self.stored_color(), self.kind);
                log::debug!("Committed {:?} annotation {:?}", entry.kind, entry.shape);
                model.push(entry);
                true
            }
            Some(shape) => {
                log::debug!("Discarded undersized shape {:?}", shape);
                false
            }
            None => false,
        }
    }

    /// Drop any in-progress drag without committing
    pub fn cancel_drag(&mut self) {
        self.drag = None;
    }

    fn stored_color(&self) -> ShapeColor {
        self.kind.color_for(self.color, self.highlight_alpha)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> InteractionController {
        InteractionController::new(205, 50, &EngineConfig::default())
    }

    fn drag(
        ctl: &mut InteractionController,
        model: &mut AnnotationModel,
        from: (f64, f64),
        to: (f64, f64),
    ) -> bool {
        ctl.pointer_down(Point::new(from.0, from.1));
        ctl.pointer_move(Point::new(to.0, to.1));
        ctl.pointer_up(Point::new(to.0, to.1), model)
    }

    #[test]
    fn test_rect_drag_commits() {
        let mut ctl = controller();
        let mut model = AnnotationModel::new();
        assert!(drag(&mut ctl, &mut model, (10.0, 10.0), (50.0, 40.0)));

        assert_eq!(model.len(), 1);
        let entry = &model.entries()[0];
        assert_eq!(entry.kind, AnnotationKind::Rect);
        assert_eq!(
            entry.shape,
            Shape::Rectangle {
                x: 10.0,
                y: 10.0,
                width: 40.0,
                height: 30.0
            }
        );
        assert_eq!(entry.color, ShapeColor::RED);
        assert!(!ctl.is_dragging());
    }

    #[test]
    fn test_degenerate_drags_are_discarded() {
        let mut ctl = controller();
        let mut model = AnnotationModel::new();

        // thin rectangle
        assert!(!drag(&mut ctl, &mut model, (10.0, 10.0), (11.0, 40.0)));
        // flat rectangle
        assert!(!drag(&mut ctl, &mut model, (10.0, 10.0), (40.0, 10.5)));
        // click without movement
        ctl.pointer_down(Point::new(3.0, 3.0));
        assert!(!ctl.pointer_up(Point::new(3.0, 3.0), &mut model));

        ctl.set_kind(AnnotationKind::Line);
        assert!(!drag(&mut ctl, &mut model, (20.0, 20.0), (20.0, 20.0)));

        assert!(model.is_empty());
        assert!(!ctl.is_dragging());
    }

    #[test]
    fn test_move_is_clamped_to_image() {
        let mut ctl = controller();
        ctl.set_kind(AnnotationKind::Line);
        ctl.pointer_down(Point::new(10.0, 10.0));
        ctl.pointer_move(Point::new(500.0, -20.0));

        let preview = ctl.drag().and_then(|d| d.preview);
        assert_eq!(
            preview,
            Some(Shape::Line {
                x1: 10.0,
                y1: 10.0,
                x2: 204.0,
                y2: 0.0
            })
        );
    }

    #[test]
    fn test_events_outside_drag_are_ignored() {
        let mut ctl = controller();
        let mut model = AnnotationModel::new();
        ctl.pointer_move(Point::new(30.0, 30.0));
        assert!(!ctl.is_dragging());
        assert!(!ctl.pointer_up(Point::new(30.0, 30.0), &mut model));
        assert!(model.is_empty());
    }

    #[test]
    fn test_kind_and_color_apply_to_new_shapes_only() {
        let mut ctl = controller();
        let mut model = AnnotationModel::new();
        drag(&mut ctl, &mut model, (0.0, 0.0), (20.0, 20.0));

        ctl.set_kind(AnnotationKind::Highlight);
        ctl.set_color(ShapeColor::rgb(0, 255, 0));
        drag(&mut ctl, &mut model, (5.0, 5.0), (30.0, 30.0));

        let entries = model.entries();
        assert_eq!(entries[0].kind, AnnotationKind::Rect);
        assert_eq!(entries[0].color, ShapeColor::RED);
        assert_eq!(entries[1].kind, AnnotationKind::Highlight);
        assert_eq!(entries[1].color, ShapeColor::rgba(0, 255, 0, 200));
    }

    #[test]
    fn test_opaque_highlight_config_is_clamped() {
        let config = EngineConfig {
            highlight_alpha: 255,
            default_kind: AnnotationKind::Highlight,
            ..EngineConfig::default()
        };
        let mut ctl = InteractionController::new(100, 100, &config);
        let mut model = AnnotationModel::new();
        assert!(drag(&mut ctl, &mut model, (5.0, 5.0), (40.0, 40.0)));
        assert_eq!(model.entries()[0].color.a, 254);
    }

    #[test]
    fn test_preview_entry_uses_stored_color() {
        let mut ctl = controller();
        ctl.set_color(ShapeColor::rgba(0, 0, 255, 40));
        assert!(ctl.preview_entry().is_none());

        ctl.pointer_down(Point::new(1.0, 1.0));
        assert!(ctl.preview_entry().is_none());
        ctl.pointer_move(Point::new(9.0, 9.0));

        let preview = ctl.preview_entry().unwrap();
        assert_eq!(preview.color, ShapeColor::rgb(0, 0, 255));
        assert_eq!(preview.kind, AnnotationKind::Rect);
    }

    #[test]
    fn test_handle_dispatch_and_cancel() {
        let mut ctl = controller();
        let mut model = AnnotationModel::new();
        ctl.handle(PointerEvent::Down(Point::new(2.0, 2.0)), &mut model);
        ctl.handle(PointerEvent::Move(Point::new(12.0, 12.0)), &mut model);
        ctl.cancel_drag();
        assert!(!ctl.handle(PointerEvent::Up(Point::new(12.0, 12.0)), &mut model));
        assert!(model.is_empty());

        ctl.handle(PointerEvent::Down(Point::new(2.0, 2.0)), &mut model);
        ctl.handle(PointerEvent::Move(Point::new(12.0, 12.0)), &mut model);
        assert!(ctl.handle(PointerEvent::Up(Point::new(12.0, 12.0)), &mut model));
        assert_eq!(model.len(), 1);
    }
}

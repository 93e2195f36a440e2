//! One annotate-and-export cycle over a captured image
//!
//! A session starts when a capture is handed over and ends when it is
//! exported or cancelled. Exporting consumes the session; a failed export
//! hands it back untouched so the user can try another target.

use std::fmt;
use std::path::Path;

use image::RgbaImage;

use crate::annotations::{AnnotationModel, InteractionController, PointerEvent};
use crate::compositor::ImageCompositor;
use crate::config::{EngineConfig, ShapeColor};
use crate::domain::{AnnotationEntry, AnnotationKind, Point};
use crate::error::{EngineError, Result};
use crate::export::ExportSink;
use crate::render;
use crate::session::messages::EditMsg;

pub struct Session {
    base: RgbaImage,
    config: EngineConfig,
    model: AnnotationModel,
    controller: InteractionController,
}

impl Session {
    /// Start a session over `base`, which must have positive dimensions
    pub fn new(base: RgbaImage, config: EngineConfig) -> Result<Self> {
        let (width, height) = base.dimensions();
        if width == 0 || height == 0 {
            log::error!("Cannot annotate a {}x{} image", width, height);
            return Err(EngineError::InvalidImage { width, height });
        }

        log::info!("Annotation session started on {}x{} image", width, height);
        let controller = InteractionController::new(width, height, &config);
        Ok(Self {
            base,
            config,
            model: AnnotationModel::new(),
            controller,
        })
    }

    /// Combine everything staged in `compositor` and start a session on the result
    pub fn from_compositor(compositor: &mut ImageCompositor, config: EngineConfig) -> Result<Self> {
        let base = compositor.combine()?;
        Self::new(base, config)
    }

    pub fn base(&self) -> &RgbaImage {
        &self.base
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn entries(&self) -> &[AnnotationEntry] {
        self.model.entries()
    }

    pub fn model(&self) -> &AnnotationModel {
        &self.model
    }

    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    pub fn kind(&self) -> AnnotationKind {
        self.controller.kind()
    }

    pub fn set_kind(&mut self, kind: AnnotationKind) {
        self.controller.set_kind(kind);
    }

    pub fn color(&self) -> ShapeColor {
        self.controller.color()
    }

    pub fn set_color(&mut self, color: ShapeColor) {
        self.controller.set_color(color);
    }

    pub fn pointer_down(&mut self, p: Point) {
        self.controller.pointer_down(p);
    }

    pub fn pointer_move(&mut self, p: Point) {
        self.controller.pointer_move(p);
    }

    /// Returns true when the drag was committed as a new annotation
    pub fn pointer_up(&mut self, p: Point) -> bool {
        self.controller.pointer_up(p, &mut self.model)
    }

    /// Remove the most recent annotation. Returns false if there was none.
    pub fn undo(&mut self) -> bool {
        self.model.undo().is_some()
    }

    /// Apply an editing message
    pub fn update(&mut self, msg: EditMsg) {
        match msg {
            EditMsg::Pointer(PointerEvent::Down(p)) => self.pointer_down(p),
            EditMsg::Pointer(PointerEvent::Move(p)) => self.pointer_move(p),
            EditMsg::Pointer(PointerEvent::Up(p)) => {
                self.pointer_up(p);
            }
            EditMsg::SetKind(kind) => self.set_kind(kind),
            EditMsg::CycleKind => self.set_kind(self.kind().next()),
            EditMsg::SetColor(color) => self.set_color(color),
            EditMsg::Undo => {
                self.undo();
            }
        }
    }

    /// Committed annotations plus the shape being dragged
    pub fn preview(&self) -> Result<RgbaImage> {
        let preview = self.controller.preview_entry();
        render::render_with_preview(
            &self.base,
            self.model.entries(),
            preview.as_ref(),
            self.config.stroke_width,
        )
    }

    /// Committed annotations only, as they will be exported
    pub fn flatten(&self) -> Result<RgbaImage> {
        render::render(&self.base, self.model.entries(), self.config.stroke_width)
    }

    /// Flatten and put the result on the clipboard, ending the session
    pub fn copy_to<S: ExportSink + ?Sized>(self, sink: &mut S) -> Result<RgbaImage, ExportFailure> {
        self.export("copy", |img| sink.copy_image(img))
    }

    /// Flatten and write the result to `path`, ending the session
    pub fn save_to<S: ExportSink + ?Sized>(
        self,
        sink: &mut S,
        path: &Path,
    ) -> Result<RgbaImage, ExportFailure> {
        self.export("save", |img| sink.save_image(img, path))
    }

    /// Discard all annotations and any in-progress drag
    pub fn cancel(self) {
        log::info!(
            "Annotation session cancelled, discarding {} annotations",
            self.model.len()
        );
    }

    fn export(
        self,
        action: &str,
        write: impl FnOnce(&RgbaImage) -> Result<()>,
    ) -> Result<RgbaImage, ExportFailure> {
        let flattened = match self.flatten() {
            Ok(img) => img,
            Err(error) => return Err(self.fail(action, error)),
        };

        match write(&flattened) {
            Ok(()) => {
                log::info!(
                    "Export ({}) finished with {} annotations, session ended",
                    action,
                    self.model.len()
                );
                Ok(flattened)
            }
            Err(error) => Err(self.fail(action, error)),
        }
    }

    fn fail(mut self, action: &str, error: EngineError) -> ExportFailure {
        if matches!(error, EngineError::UserCancelled) {
            log::info!("Export ({}) cancelled by user", action);
            self.controller.cancel_drag();
        } else {
            log::error!("Export ({}) failed: {}", action, error);
        }
        ExportFailure {
            session: Box::new(self),
            error,
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("size", &self.base.dimensions())
            .field("entries", &self.model.len())
            .field("kind", &self.controller.kind())
            .field("color", &self.controller.color())
            .field("drag", &self.controller.drag())
            .finish()
    }
}

/// A failed export together with the still-open session
#[derive(Debug, thiserror::Error)]
#[error("export failed: {error}")]
pub struct ExportFailure {
    pub session: Box<Session>,
    #[source]
    pub error: EngineError,
}

impl ExportFailure {
    /// True when the user dismissed a dialog rather than something breaking
    pub fn is_cancelled(&self) -> bool {
        matches!(self.error, EngineError::UserCancelled)
    }

    pub fn into_session(self) -> Session {
        *self.session
    }
}

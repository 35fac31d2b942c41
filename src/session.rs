//! The annotation session: the in-memory model an editor screen works on.
//!
//! A session owns the [`Document`] (frozen paths, stickers, selection), the
//! active [`ToolType`] (which *is* the gesture mode) and the [`Brush`] used for
//! new paths. Every mutation is expressed as a [`Command`] and applied here.

use egui::{Color32, Pos2};
use log::{debug, info};

use crate::brush::Brush;
use crate::command::Command;
use crate::document::Document;
use crate::image_ref::ImageRef;
use crate::input::GestureEvent;
use crate::sticker::{Sticker, StickerId};
use crate::stroke::DrawPath;
use crate::tools::{EditorMode, Tool, ToolType};

#[derive(Debug, Clone, Default)]
pub struct AnnotationSession {
    document: Document,
    tool: ToolType,
    brush: Brush,
}

impl AnnotationSession {
    /// An empty session in arrange mode with the default brush
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_brush(brush: Brush) -> Self {
        Self {
            brush,
            ..Self::default()
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn mode(&self) -> EditorMode {
        self.tool.mode()
    }

    pub fn tool(&self) -> &ToolType {
        &self.tool
    }

    pub fn brush(&self) -> Brush {
        self.brush
    }

    /// Takes effect for the next path started
    pub fn set_brush_color(&mut self, color: Color32) {
        self.brush.color = color;
    }

    /// Takes effect for the next path started
    pub fn set_brush_width(&mut self, width: f32) {
        self.brush.width = width;
    }

    pub fn set_mode(&mut self, mode: EditorMode) {
        if self.mode() == mode {
            return;
        }
        if let Some(cleanup) = self.tool.deactivate(&self.document) {
            self.apply(cleanup);
        }
        let mut tool = ToolType::for_mode(mode);
        tool.activate(&self.document);
        self.tool = tool;
        info!("✏️ Editor mode: {:?}", mode);
    }

    pub fn toggle_mode(&mut self) {
        self.set_mode(self.mode().toggled());
    }

    /// Route one gesture event to the active mode
    pub fn handle_gesture(&mut self, event: GestureEvent) {
        let command = match event {
            GestureEvent::Start(pos) => self.tool.on_pointer_down(pos, &self.document, &self.brush),
            GestureEvent::Move(pos) => self.tool.on_pointer_move(pos, &self.document, &self.brush),
            GestureEvent::End => self.tool.on_pointer_up(&self.document, &self.brush),
        };
        if let Some(command) = command {
            self.apply(command);
        }
    }

    pub fn begin_gesture(&mut self, pos: Pos2) {
        self.handle_gesture(GestureEvent::Start(pos));
    }

    pub fn move_gesture(&mut self, pos: Pos2) {
        self.handle_gesture(GestureEvent::Move(pos));
    }

    pub fn end_gesture(&mut self) {
        self.handle_gesture(GestureEvent::End);
    }

    /// Remove the most recently frozen path; a no-op without paths
    pub fn undo(&mut self) -> bool {
        self.apply(Command::UndoPath)
    }

    /// Place a new sticker at the default position and select it
    pub fn add_sticker(&mut self, image: ImageRef, canvas_width: f32) -> StickerId {
        let mut id = StickerId::generate();
        while self.document.find_sticker(id).is_some() {
            id = StickerId::generate();
        }
        let sticker = Sticker::new(id, image, Sticker::default_position(canvas_width));
        info!("🏷️ Adding sticker {} ({})", id, sticker.image());
        self.apply(Command::AddSticker(sticker));
        id
    }

    /// Drop all paths and stickers; brush and mode are kept
    pub fn clear(&mut self) {
        if let Some(cleanup) = self.tool.deactivate(&self.document) {
            self.apply(cleanup);
        }
        self.apply(Command::Clear);
    }

    pub fn paths(&self) -> &[DrawPath] {
        self.document.paths()
    }

    /// The path currently being drawn, if any
    pub fn current_path(&self) -> Option<DrawPath> {
        self.tool.preview_path()
    }

    pub fn stickers(&self) -> &[Sticker] {
        self.document.stickers()
    }

    pub fn selected_sticker(&self) -> Option<StickerId> {
        self.document.selected()
    }

    pub fn is_empty(&self) -> bool {
        self.document.is_empty() && self.current_path().is_none()
    }

    fn apply(&mut self, command: Command) -> bool {
        let name = command.name();
        let applied = command.execute(&mut self.document);
        if !applied {
            debug!("Command {} had no effect", name);
        }
        applied
    }
}

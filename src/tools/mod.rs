use egui::Pos2;

use crate::brush::Brush;
use crate::command::Command;
use crate::document::Document;
use crate::stroke::DrawPath;

/// Tool trait defines how a gesture mode turns pointer input into commands
pub trait Tool {
    /// Return the name of the tool
    fn name(&self) -> &'static str;

    /// Called when the tool becomes the active mode.
    fn activate(&mut self, _doc: &Document) {
        // default: do nothing
    }

    /// Called when the tool stops being the active mode.
    /// Drops any half-finished gesture and may return a command that cleans up after it.
    fn deactivate(&mut self, doc: &Document) -> Option<Command>;

    /// Gesture start.
    fn on_pointer_down(&mut self, pos: Pos2, doc: &Document, brush: &Brush) -> Option<Command>;

    /// Gesture move, reported for every pointer sample while the gesture is held.
    fn on_pointer_move(&mut self, pos: Pos2, doc: &Document, brush: &Brush) -> Option<Command>;

    /// Gesture end.
    fn on_pointer_up(&mut self, doc: &Document, brush: &Brush) -> Option<Command>;

    /// The path being drawn right now, if any
    fn preview_path(&self) -> Option<DrawPath> {
        None
    }

    fn current_state_name(&self) -> &'static str;
}

mod arrange_tool;
mod draw_path_tool;

pub use arrange_tool::{ArrangeState, ArrangeTool};
pub use draw_path_tool::DrawPathTool;

/// The two mutually exclusive gesture modes of the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorMode {
    Draw,
    #[default]
    Arrange,
}

impl EditorMode {
    pub fn toggled(self) -> Self {
        match self {
            EditorMode::Draw => EditorMode::Arrange,
            EditorMode::Arrange => EditorMode::Draw,
        }
    }
}

/// The active tool. Holding exactly one of these is what keeps drawing and
/// arranging exclusive.
#[derive(Debug, Clone)]
pub enum ToolType {
    Draw(DrawPathTool),
    Arrange(ArrangeTool),
}

impl Default for ToolType {
    fn default() -> Self {
        Self::for_mode(EditorMode::default())
    }
}

impl Tool for ToolType {
    fn name(&self) -> &'static str {
        match self {
            Self::Draw(tool) => tool.name(),
            Self::Arrange(tool) => tool.name(),
        }
    }

    fn activate(&mut self, doc: &Document) {
        match self {
            Self::Draw(tool) => tool.activate(doc),
            Self::Arrange(tool) => tool.activate(doc),
        }
    }

    fn deactivate(&mut self, doc: &Document) -> Option<Command> {
        match self {
            Self::Draw(tool) => tool.deactivate(doc),
            Self::Arrange(tool) => tool.deactivate(doc),
        }
    }

    fn on_pointer_down(&mut self, pos: Pos2, doc: &Document, brush: &Brush) -> Option<Command> {
        match self {
            Self::Draw(tool) => tool.on_pointer_down(pos, doc, brush),
            Self::Arrange(tool) => tool.on_pointer_down(pos, doc, brush),
        }
    }

    fn on_pointer_move(&mut self, pos: Pos2, doc: &Document, brush: &Brush) -> Option<Command> {
        match self {
            Self::Draw(tool) => tool.on_pointer_move(pos, doc, brush),
            Self::Arrange(tool) => tool.on_pointer_move(pos, doc, brush),
        }
    }

    fn on_pointer_up(&mut self, doc: &Document, brush: &Brush) -> Option<Command> {
        match self {
            Self::Draw(tool) => tool.on_pointer_up(doc, brush),
            Self::Arrange(tool) => tool.on_pointer_up(doc, brush),
        }
    }

    fn preview_path(&self) -> Option<DrawPath> {
        match self {
            Self::Draw(tool) => tool.preview_path(),
            Self::Arrange(tool) => tool.preview_path(),
        }
    }

    fn current_state_name(&self) -> &'static str {
        match self {
            Self::Draw(tool) => tool.current_state_name(),
            Self::Arrange(tool) => tool.current_state_name(),
        }
    }
}

impl ToolType {
    /// A fresh tool for the given mode
    pub fn for_mode(mode: EditorMode) -> Self {
        match mode {
            EditorMode::Draw => Self::Draw(DrawPathTool::new()),
            EditorMode::Arrange => Self::Arrange(ArrangeTool::new()),
        }
    }

    pub fn mode(&self) -> EditorMode {
        match self {
            Self::Draw(_) => EditorMode::Draw,
            Self::Arrange(_) => EditorMode::Arrange,
        }
    }
}

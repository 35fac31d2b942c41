use egui::Pos2;
use log::debug;

use crate::brush::Brush;
use crate::command::Command;
use crate::document::Document;
use crate::stroke::{DrawPath, MutablePath};
use crate::tools::Tool;

#[derive(Debug, Clone, Default)]
pub struct DrawPathTool {
    // Transient state: the path being drawn (if any)
    current_path: Option<MutablePath>,
}

impl DrawPathTool {
    pub fn new() -> Self {
        Self { current_path: None }
    }

    pub fn is_drawing(&self) -> bool {
        self.current_path.is_some()
    }
}

impl Tool for DrawPathTool {
    fn name(&self) -> &'static str {
        "Draw"
    }

    fn activate(&mut self, _doc: &Document) {
        self.current_path = None;
    }

    fn deactivate(&mut self, _doc: &Document) -> Option<Command> {
        if let Some(path) = self.current_path.take() {
            debug!("Dropping unfinished path with {} points", path.points().len());
        }
        None
    }

    fn on_pointer_down(&mut self, pos: Pos2, _doc: &Document, brush: &Brush) -> Option<Command> {
        self.current_path = Some(MutablePath::begin(pos, brush.color, brush.width));
        None // nothing to commit until the gesture ends
    }

    fn on_pointer_move(&mut self, pos: Pos2, _doc: &Document, _brush: &Brush) -> Option<Command> {
        if let Some(path) = &mut self.current_path {
            path.add_point(pos);
        }
        None
    }

    fn on_pointer_up(&mut self, _doc: &Document, _brush: &Brush) -> Option<Command> {
        self.current_path
            .take()
            .and_then(MutablePath::freeze)
            .map(Command::AddPath)
    }

    fn preview_path(&self) -> Option<DrawPath> {
        self.current_path.as_ref().map(MutablePath::to_path)
    }

    fn current_state_name(&self) -> &'static str {
        if self.is_drawing() { "Drawing" } else { "Idle" }
    }
}

use egui::Pos2;
use log::debug;

use crate::brush::Brush;
use crate::command::Command;
use crate::document::Document;
use crate::sticker::StickerId;
use crate::tools::Tool;

/// Drag state of the arrange tool.
///
/// Moves are cumulative from the gesture start: each move places the sticker at
/// `origin + (pointer - pointer_start)`, so rounding never accumulates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ArrangeState {
    #[default]
    Idle,
    Dragging {
        id: StickerId,
        /// Sticker position when the gesture started
        origin: Pos2,
        /// Pointer position when the gesture started
        pointer_start: Pos2,
    },
}

#[derive(Debug, Clone, Default)]
pub struct ArrangeTool {
    state: ArrangeState,
}

impl ArrangeTool {
    pub fn new() -> Self {
        Self {
            state: ArrangeState::Idle,
        }
    }

    pub fn state(&self) -> ArrangeState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, ArrangeState::Dragging { .. })
    }
}

impl Tool for ArrangeTool {
    fn name(&self) -> &'static str {
        "Arrange"
    }

    fn activate(&mut self, _doc: &Document) {
        self.state = ArrangeState::Idle;
    }

    fn deactivate(&mut self, _doc: &Document) -> Option<Command> {
        match std::mem::take(&mut self.state) {
            ArrangeState::Dragging { .. } => Some(Command::SelectSticker(None)),
            ArrangeState::Idle => None,
        }
    }

    fn on_pointer_down(&mut self, pos: Pos2, doc: &Document, _brush: &Brush) -> Option<Command> {
        let id = doc.sticker_at(pos)?;
        let origin = doc.find_sticker(id)?.position;
        debug!("Grabbed sticker {} at {:?}", id, origin);

        self.state = ArrangeState::Dragging {
            id,
            origin,
            pointer_start: pos,
        };
        Some(Command::SelectSticker(Some(id)))
    }

    fn on_pointer_move(&mut self, pos: Pos2, _doc: &Document, _brush: &Brush) -> Option<Command> {
        match self.state {
            ArrangeState::Dragging {
                id,
                origin,
                pointer_start,
            } => Some(Command::MoveSticker {
                id,
                position: origin + (pos - pointer_start),
            }),
            ArrangeState::Idle => None,
        }
    }

    fn on_pointer_up(&mut self, _doc: &Document, _brush: &Brush) -> Option<Command> {
        match std::mem::take(&mut self.state) {
            ArrangeState::Dragging { id, .. } => {
                debug!("Released sticker {}", id);
                Some(Command::SelectSticker(None))
            }
            ArrangeState::Idle => None,
        }
    }

    fn current_state_name(&self) -> &'static str {
        if self.is_dragging() { "Dragging" } else { "Idle" }
    }
}

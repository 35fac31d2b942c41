use egui::Pos2;
use log::debug;

use crate::document::Document;
use crate::sticker::{Sticker, StickerId};
use crate::stroke::DrawPath;

/// Every change made to the annotation [`Document`]
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Freeze a finished path at the end of the path list
    AddPath(DrawPath),
    /// Remove the most recently frozen path
    UndoPath,
    /// Place a sticker and select it
    AddSticker(Sticker),
    /// Move a sticker to an absolute overlay position
    MoveSticker { id: StickerId, position: Pos2 },
    /// Change (or clear) the selected sticker
    SelectSticker(Option<StickerId>),
    /// Drop all paths and stickers
    Clear,
}

impl Command {
    /// Apply the command. Returns false when it had nothing to act on.
    pub fn execute(self, document: &mut Document) -> bool {
        match self {
            Command::AddPath(path) => {
                debug!("Freezing path with {} points", path.len());
                document.add_path(path);
                true
            }
            Command::UndoPath => document.remove_last_path().is_some(),
            Command::AddSticker(sticker) => {
                let id = sticker.id();
                if document.add_sticker(sticker) {
                    document.set_selected(Some(id));
                    true
                } else {
                    false
                }
            }
            Command::MoveSticker { id, position } => match document.find_sticker_mut(id) {
                Some(sticker) => {
                    sticker.position = position;
                    true
                }
                None => false,
            },
            Command::SelectSticker(id) => {
                document.set_selected(id);
                true
            }
            Command::Clear => {
                document.clear();
                true
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::AddPath(_) => "AddPath",
            Command::UndoPath => "UndoPath",
            Command::AddSticker(_) => "AddSticker",
            Command::MoveSticker { .. } => "MoveSticker",
            Command::SelectSticker(_) => "SelectSticker",
            Command::Clear => "Clear",
        }
    }
}

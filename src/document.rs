use egui::Pos2;

use crate::sticker::{Sticker, StickerId};
use crate::stroke::DrawPath;

/// The annotation model of one editing session.
///
/// Paths are kept in chronological order, which is also the render order.
/// Stickers are kept in insertion order. At most one sticker is selected.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    paths: Vec<DrawPath>,
    stickers: Vec<Sticker>,
    selected: Option<StickerId>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_path(&mut self, path: DrawPath) {
        self.paths.push(path);
    }

    pub fn paths(&self) -> &[DrawPath] {
        &self.paths
    }

    pub fn remove_last_path(&mut self) -> Option<DrawPath> {
        self.paths.pop()
    }

    /// Returns false if a sticker with the same id is already present
    pub fn add_sticker(&mut self, sticker: Sticker) -> bool {
        if self.find_sticker(sticker.id()).is_some() {
            return false;
        }
        self.stickers.push(sticker);
        true
    }

    pub fn stickers(&self) -> &[Sticker] {
        &self.stickers
    }

    pub fn find_sticker(&self, id: StickerId) -> Option<&Sticker> {
        self.stickers.iter().find(|sticker| sticker.id() == id)
    }

    pub fn find_sticker_mut(&mut self, id: StickerId) -> Option<&mut Sticker> {
        self.stickers.iter_mut().find(|sticker| sticker.id() == id)
    }

    /// Topmost sticker under `pos`; later stickers are drawn above earlier ones
    pub fn sticker_at(&self, pos: Pos2) -> Option<StickerId> {
        self.stickers
            .iter()
            .rev()
            .find(|sticker| sticker.hit_test(pos))
            .map(Sticker::id)
    }

    pub fn selected(&self) -> Option<StickerId> {
        self.selected
    }

    /// Selecting an unknown id clears the selection
    pub fn set_selected(&mut self, id: Option<StickerId>) {
        self.selected = id.filter(|id| self.find_sticker(*id).is_some());
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty() && self.stickers.is_empty()
    }

    pub fn clear(&mut self) {
        self.paths.clear();
        self.stickers.clear();
        self.selected = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_ref::ImageRef;
    use egui::{Color32, pos2};

    fn sticker(x: f32, y: f32) -> Sticker {
        Sticker::new(StickerId::generate(), ImageRef::new("mem://s"), pos2(x, y))
    }

    #[test]
    fn duplicate_sticker_ids_are_rejected() {
        let mut doc = Document::new();
        let first = sticker(0.0, 0.0);
        assert!(doc.add_sticker(first.clone()));
        assert!(!doc.add_sticker(first));
        assert_eq!(doc.stickers().len(), 1);
    }

    #[test]
    fn topmost_sticker_wins_hit_test() {
        let mut doc = Document::new();
        let below = sticker(0.0, 0.0);
        let above = sticker(50.0, 50.0);
        let (below_id, above_id) = (below.id(), above.id());
        doc.add_sticker(below);
        doc.add_sticker(above);

        assert_eq!(doc.sticker_at(pos2(75.0, 75.0)), Some(above_id));
        assert_eq!(doc.sticker_at(pos2(10.0, 10.0)), Some(below_id));
        assert_eq!(doc.sticker_at(pos2(300.0, 300.0)), None);
    }

    #[test]
    fn clear_removes_everything() {
        let mut doc = Document::new();
        let s = sticker(0.0, 0.0);
        let id = s.id();
        doc.add_sticker(s);
        doc.set_selected(Some(id));
        doc.add_path(DrawPath::new(Color32::RED, 5.0, vec![pos2(0.0, 0.0)]));

        doc.clear();
        assert!(doc.is_empty());
        assert_eq!(doc.selected(), None);
    }

    #[test]
    fn unknown_selection_is_ignored() {
        let mut doc = Document::new();
        doc.set_selected(Some(StickerId::generate()));
        assert_eq!(doc.selected(), None);
    }
}

use egui::{Button, Color32, RichText};

use crate::tools::EditorMode;

/// What the editor toolbar asked for this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    ToggleMode,
    OpenColorPicker,
    OpenStickerPicker,
    Undo,
    Save,
    Discard,
}

/// Toolbar inputs that decide which buttons are enabled
#[derive(Debug, Clone, Copy)]
pub struct ToolbarState {
    pub mode: EditorMode,
    pub brush_color: Color32,
    /// Active tool and what it is doing, for the status line
    pub tool_name: &'static str,
    pub tool_state: &'static str,
    pub can_undo: bool,
    pub exporting: bool,
    /// A blocking alert is up; every button waits for it
    pub alert_open: bool,
}

const SAVE_COLOR: Color32 = Color32::from_rgb(0x4C, 0xAF, 0x50);
const DISCARD_COLOR: Color32 = Color32::from_rgb(0xF4, 0x43, 0x36);

fn tool_button(text: &str) -> Button<'static> {
    Button::new(RichText::new(text.to_owned()).size(18.0)).min_size(egui::vec2(44.0, 36.0))
}

pub fn toolbar(ui: &mut egui::Ui, state: ToolbarState) -> Option<ToolbarAction> {
    let mut action = None;

    ui.horizontal_wrapped(|ui| {
        if state.alert_open {
            ui.disable();
        }
        let (label, hover) = match state.mode {
            EditorMode::Draw => ("✏", "Drawing: touch draws"),
            EditorMode::Arrange => ("✋", "Arranging: touch moves stickers"),
        };
        let mode_button = ui
            .add(tool_button(label).selected(state.mode == EditorMode::Draw))
            .on_hover_text(hover);
        if mode_button.clicked() {
            action = Some(ToolbarAction::ToggleMode);
        }

        let color_button = Button::new(RichText::new("🎨").size(18.0))
            .min_size(egui::vec2(44.0, 36.0))
            .stroke(egui::Stroke::new(3.0, state.brush_color));
        if ui.add(color_button).on_hover_text("Brush").clicked() {
            action = Some(ToolbarAction::OpenColorPicker);
        }

        if ui.add(tool_button("🏷")).on_hover_text("Stickers").clicked() {
            action = Some(ToolbarAction::OpenStickerPicker);
        }

        if ui
            .add_enabled(state.can_undo, tool_button("↩"))
            .on_hover_text("Undo last path")
            .clicked()
        {
            action = Some(ToolbarAction::Undo);
        }

        ui.separator();

        let save = tool_button("💾").fill(SAVE_COLOR);
        if ui.add_enabled(!state.exporting, save).on_hover_text("Save to library").clicked() {
            action = Some(ToolbarAction::Save);
        }
        if state.exporting {
            ui.spinner();
        }

        let discard = tool_button("✖").fill(DISCARD_COLOR);
        if ui.add_enabled(!state.exporting, discard).on_hover_text("Discard").clicked() {
            action = Some(ToolbarAction::Discard);
        }

        ui.weak(format!("{} ({})", state.tool_name, state.tool_state));
    });

    action
}

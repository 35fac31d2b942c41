use crate::error::CaptureError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Info,
    Success,
    Error,
}

/// A blocking notification: shown until the user dismisses it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub kind: AlertKind,
    pub title: String,
    pub message: String,
}

impl Alert {
    pub fn new(kind: AlertKind, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn saved() -> Self {
        Self::new(AlertKind::Success, "Success", "Photo saved to gallery!")
    }

    pub fn save_failed() -> Self {
        Self::new(AlertKind::Error, "Error", "Failed to save photo")
    }

    pub fn discarded() -> Self {
        Self::new(AlertKind::Info, "Cleared", "Image Discarded!")
    }

    pub fn capture_failed(err: &CaptureError) -> Self {
        Self::new(AlertKind::Error, "Error", err.to_string())
    }

    fn color(&self) -> egui::Color32 {
        match self.kind {
            AlertKind::Info => egui::Color32::LIGHT_GRAY,
            AlertKind::Success => egui::Color32::from_rgb(0x4C, 0xAF, 0x50),
            AlertKind::Error => egui::Color32::from_rgb(0xF4, 0x43, 0x36),
        }
    }

    /// Show the alert window. Returns true once the user dismissed it.
    pub fn show(&self, ctx: &egui::Context) -> bool {
        let mut dismissed = false;
        egui::Window::new(egui::RichText::new(&self.title).color(self.color()))
            .id(egui::Id::new("alert"))
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label(&self.message);
                ui.add_space(8.0);
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });
        dismissed
    }
}

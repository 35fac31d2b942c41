use egui::{Align, Layout, RichText, Sense};
use log::{info, warn};

use super::Navigation;
use crate::alert::Alert;
use crate::camera::{Camera, CameraFacing, PermissionStatus};
use crate::error::{Busy, CaptureError};
use crate::image_ref::{ImageRef, ImageResolver};
use crate::renderer::Renderer;
use crate::task::InFlight;

/// Viewfinder with facing toggle and the capture action
#[derive(Debug, Default)]
pub struct CaptureScreen {
    facing: CameraFacing,
    capture: InFlight<Result<ImageRef, CaptureError>>,
    permission_request: InFlight<PermissionStatus>,
    alert: Option<Alert>,
}

impl CaptureScreen {
    pub fn new(facing: CameraFacing) -> Self {
        Self {
            facing,
            ..Default::default()
        }
    }

    pub fn facing(&self) -> CameraFacing {
        self.facing
    }

    pub fn toggle_facing(&mut self) -> CameraFacing {
        self.facing = self.facing.toggled();
        info!("🔄 Switched to {} camera", self.facing.label());
        self.facing
    }

    pub fn is_busy(&self) -> bool {
        self.capture.is_busy() || self.permission_request.is_busy()
    }

    pub fn is_capturing(&self) -> bool {
        self.capture.is_busy()
    }

    pub fn alert(&self) -> Option<&Alert> {
        self.alert.as_ref()
    }

    pub fn set_alert(&mut self, alert: Alert) {
        self.alert = Some(alert);
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    /// Ask the camera for access. The answer arrives through [`CaptureScreen::poll`].
    pub fn request_permission(&mut self, camera: &dyn Camera) -> Result<(), Busy> {
        self.permission_request.start(camera.request_permission())
    }

    /// Start a capture with the current facing
    pub fn take_photo(&mut self, camera: &dyn Camera) -> Result<(), CaptureError> {
        if !camera.permission().is_granted() {
            warn!("Capture refused: camera permission not granted");
            return Err(CaptureError::PermissionDenied);
        }
        self.capture.start(camera.take_picture(self.facing))?;
        info!("📸 Capturing with {} camera", self.facing.label());
        Ok(())
    }

    /// Drive in-flight work. A finished capture navigates to the editor; a
    /// failed one raises an alert and stays here.
    pub fn poll(&mut self) -> Option<Navigation> {
        if let Some(status) = self.permission_request.poll() {
            match status {
                PermissionStatus::Granted => info!("Camera permission granted"),
                other => warn!("Camera permission is {:?}", other),
            }
        }

        match self.capture.poll()? {
            Ok(image) => {
                info!("Captured {}", image);
                Some(Navigation::ToEditor(image))
            }
            Err(err) => {
                warn!("Capture failed: {}", err);
                self.alert = Some(Alert::capture_failed(&err));
                None
            }
        }
    }

    pub fn ui(&mut self, ctx: &egui::Context, camera: &dyn Camera, renderer: &mut Renderer, resolver: &dyn ImageResolver) {
        if !camera.permission().is_granted() {
            self.permission_ui(ctx, camera);
        } else {
            egui::TopBottomPanel::bottom("capture_controls")
                .resizable(false)
                .show(ctx, |ui| {
                    ui.add_space(8.0);
                    ui.horizontal(|ui| {
                        let capture = ui.add_enabled(
                            !self.capture.is_busy() && self.alert.is_none(),
                            egui::Button::new(RichText::new("📷 Capture").size(20.0)),
                        );
                        if capture.clicked() {
                            if let Err(err) = self.take_photo(camera) {
                                self.alert = Some(Alert::capture_failed(&err));
                            }
                        }
                        if ui.button(RichText::new("🔄 Switch").size(20.0)).clicked() {
                            self.toggle_facing();
                        }
                        if self.capture.is_busy() {
                            ui.spinner();
                        }
                    });
                    ui.add_space(8.0);
                });

            egui::CentralPanel::default()
                .frame(egui::Frame::none())
                .show(ctx, |ui| {
                    let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::hover());
                    let frame = camera.preview_frame(self.facing);
                    renderer.render_frame(&painter, response.rect, frame.as_ref(), resolver);
                    if frame.is_none() {
                        painter.text(
                            response.rect.center(),
                            egui::Align2::CENTER_CENTER,
                            format!("No {} camera", self.facing.label()),
                            egui::FontId::proportional(18.0),
                            egui::Color32::GRAY,
                        );
                    }
                });
        }

        if let Some(alert) = &self.alert {
            if alert.show(ctx) {
                self.dismiss_alert();
            }
        }
    }

    /// Without permission the only action is asking for it
    fn permission_ui(&mut self, ctx: &egui::Context, camera: &dyn Camera) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.with_layout(Layout::top_down(Align::Center), |ui| {
                ui.add_space(ui.available_height() / 3.0);
                if camera.permission() == PermissionStatus::Denied {
                    ui.label("Camera access was denied.");
                } else {
                    ui.label("Camera access is needed to take photos.");
                }
                ui.add_space(8.0);
                let request = ui.add_enabled(
                    !self.permission_request.is_busy(),
                    egui::Button::new(RichText::new("📷 Grant permission").size(20.0)),
                );
                if request.clicked() && self.request_permission(camera).is_err() {
                    warn!("Permission request already pending");
                }
            });
        });
    }
}

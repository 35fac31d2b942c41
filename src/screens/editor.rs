use std::rc::Rc;

use egui::{Color32, Sense, Vec2};
use futures::FutureExt;
use log::{debug, error, info, warn};

use super::Navigation;
use crate::alert::Alert;
use crate::brush::Brush;
use crate::error::ExportError;
use crate::flatten::Flattener;
use crate::image_ref::{ImageRef, ImageResolver};
use crate::input::InputHandler;
use crate::media::MediaLibrary;
use crate::panels::{self, BrushChoice, ToolbarAction, ToolbarState};
use crate::renderer::Renderer;
use crate::scene::{ComposeOptions, Photo, Scene, compose};
use crate::session::AnnotationSession;
use crate::sticker::{StickerId, StickerTemplate};
use crate::task::InFlight;
use crate::tools::Tool;

/// Which modal picker is open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Picker {
    /// Brush colour and width
    Color,
    Sticker,
}

/// Everything the editor borrows from the app for one frame
pub struct EditorEnv<'a> {
    pub renderer: &'a mut Renderer,
    pub resolver: &'a dyn ImageResolver,
    pub flattener: &'a dyn Flattener,
    pub library: Rc<dyn MediaLibrary>,
    pub palette: &'a [Color32],
    pub brush_sizes: &'a [f32],
    pub stickers: &'a [StickerTemplate],
}

/// Annotates one captured photo and exports the result
pub struct EditorScreen {
    image: ImageRef,
    photo: Option<Photo>,
    session: AnnotationSession,
    picker: Option<Picker>,
    export: InFlight<Result<ImageRef, ExportError>>,
    alert: Option<Alert>,
    canvas_size: Vec2,
    input: InputHandler,
}

impl EditorScreen {
    /// A fresh, empty session on `image`
    pub fn new(image: ImageRef, resolver: &dyn ImageResolver, canvas_size: Vec2, brush: Brush) -> Self {
        let photo = match resolver.resolve(&image) {
            Ok(pixels) => Some(Photo {
                image: image.clone(),
                size: Vec2::new(pixels.width() as f32, pixels.height() as f32),
            }),
            Err(err) => {
                warn!("Editing without base photo: {}", err);
                None
            }
        };
        info!("🖌️ Editing {}", image);

        Self {
            image,
            photo,
            session: AnnotationSession::with_brush(brush),
            picker: None,
            export: Default::default(),
            alert: None,
            canvas_size,
            input: InputHandler::new(egui::Rect::from_min_size(egui::Pos2::ZERO, canvas_size)),
        }
    }

    pub fn image(&self) -> &ImageRef {
        &self.image
    }

    pub fn session(&self) -> &AnnotationSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut AnnotationSession {
        &mut self.session
    }

    pub fn canvas_size(&self) -> Vec2 {
        self.canvas_size
    }

    pub fn set_canvas_size(&mut self, size: Vec2) {
        self.canvas_size = size;
    }

    pub fn picker(&self) -> Option<Picker> {
        self.picker
    }

    pub fn open_picker(&mut self, picker: Picker) {
        self.picker = Some(picker);
    }

    pub fn close_picker(&mut self) {
        self.picker = None;
    }

    pub fn pick_color(&mut self, color: Color32) {
        self.session.set_brush_color(color);
        self.picker = None;
    }

    pub fn pick_width(&mut self, width: f32) {
        self.session.set_brush_width(width);
        self.picker = None;
    }

    /// Add the chosen sticker at its default place, select it, close the picker
    pub fn pick_sticker(&mut self, template: &StickerTemplate) -> StickerId {
        let id = self.session.add_sticker(template.image(), self.canvas_size.x);
        self.picker = None;
        id
    }

    pub fn is_exporting(&self) -> bool {
        self.export.is_busy()
    }

    pub fn alert(&self) -> Option<&Alert> {
        self.alert.as_ref()
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    /// The display list for the current canvas
    pub fn scene(&self, options: ComposeOptions) -> Scene {
        compose(&self.session, self.photo.as_ref(), self.canvas_size, options)
    }

    /// Flatten the canvas and save it to the library. The outcome is reported
    /// through [`EditorScreen::poll`]; the session is kept either way.
    pub fn start_export(
        &mut self,
        flattener: &dyn Flattener,
        library: Rc<dyn MediaLibrary>,
    ) -> Result<(), ExportError> {
        if self.export.is_busy() {
            warn!("Export already in progress");
            return Err(ExportError::Busy);
        }

        let flatten = flattener.flatten(self.scene(ComposeOptions::EXPORT));
        let export = async move {
            let raster = flatten.await?;
            let saved = library.save_to_library(raster).await?;
            Ok::<_, ExportError>(saved)
        };
        self.export.start(export.boxed_local())?;
        info!("📤 Exporting {} paths and {} stickers", self.session.paths().len(), self.session.stickers().len());
        Ok(())
    }

    /// Drive the export, raising the success or failure alert when it resolves
    pub fn poll(&mut self) -> Option<Result<ImageRef, ExportError>> {
        let outcome = self.export.poll()?;
        match &outcome {
            Ok(saved) => {
                info!("✅ Export saved as {}", saved);
                self.alert = Some(Alert::saved());
            }
            Err(err) => {
                error!("❌ Export failed: {}", err);
                self.alert = Some(Alert::save_failed());
            }
        }
        Some(outcome)
    }

    /// Throw the annotations away and head back to the camera. Refused while
    /// an export is running.
    pub fn discard(&mut self) -> Option<Navigation> {
        if self.export.is_busy() {
            warn!("Discard refused while exporting");
            return None;
        }
        self.session.clear();
        self.picker = None;
        info!("🗑️ Discarded annotations on {}", self.image);
        Some(Navigation::ToCapture {
            alert: Some(Alert::discarded()),
        })
    }

    fn apply_toolbar(&mut self, action: ToolbarAction, env: &mut EditorEnv<'_>) -> Option<Navigation> {
        if let Some(alert) = &self.alert {
            debug!("Ignoring {:?} while \"{}\" is shown", action, alert.title);
            return None;
        }
        match action {
            ToolbarAction::ToggleMode => self.session.toggle_mode(),
            ToolbarAction::OpenColorPicker => self.open_picker(Picker::Color),
            ToolbarAction::OpenStickerPicker => self.open_picker(Picker::Sticker),
            ToolbarAction::Undo => {
                self.session.undo();
            }
            ToolbarAction::Save => {
                if let Err(err) = self.start_export(env.flattener, Rc::clone(&env.library)) {
                    warn!("Cannot export: {}", err);
                }
            }
            ToolbarAction::Discard => return self.discard(),
        }
        None
    }

    pub fn ui(&mut self, ctx: &egui::Context, env: &mut EditorEnv<'_>) -> Option<Navigation> {
        let mut navigation = None;

        let state = ToolbarState {
            mode: self.session.mode(),
            brush_color: self.session.brush().color,
            tool_name: self.session.tool().name(),
            tool_state: self.session.tool().current_state_name(),
            can_undo: !self.session.paths().is_empty(),
            exporting: self.export.is_busy(),
            alert_open: self.alert.is_some(),
        };
        egui::TopBottomPanel::top("editor_toolbar").show(ctx, |ui| {
            if let Some(action) = panels::toolbar(ui, state) {
                navigation = self.apply_toolbar(action, env);
            }
        });
        if navigation.is_some() {
            return navigation;
        }

        let modal_open = self.picker.is_some() || self.alert.is_some();
        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::drag());
                let rect = response.rect;
                self.set_canvas_size(rect.size());
                self.input.set_canvas_rect(rect);

                if !modal_open {
                    for event in self.input.process_context(ctx) {
                        self.session.handle_gesture(event);
                    }
                }

                let scene = self.scene(ComposeOptions::SCREEN);
                env.renderer.render(&painter, rect, &scene, env.resolver);
            });

        self.pickers_ui(ctx, env);

        if let Some(alert) = &self.alert {
            if alert.show(ctx) {
                self.dismiss_alert();
            }
        }

        None
    }

    fn pickers_ui(&mut self, ctx: &egui::Context, env: &mut EditorEnv<'_>) {
        let Some(picker) = self.picker else {
            return;
        };
        let mut open = true;
        match picker {
            Picker::Color => {
                let brush = self.session.brush();
                match panels::color_picker(ctx, &mut open, env.palette, env.brush_sizes, brush) {
                    Some(BrushChoice::Color(color)) => self.pick_color(color),
                    Some(BrushChoice::Width(width)) => self.pick_width(width),
                    None => {}
                }
            }
            Picker::Sticker => {
                let textures = env.renderer.textures_mut();
                if let Some(template) = panels::sticker_picker(ctx, &mut open, env.stickers, textures, env.resolver) {
                    self.pick_sticker(template);
                }
            }
        }
        if !open {
            self.close_picker();
        }
    }
}

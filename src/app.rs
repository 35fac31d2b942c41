use std::rc::Rc;
use std::sync::Arc;

use egui::Color32;
use log::info;

use crate::camera::{Camera, CameraFacing, StillImageCamera};
use crate::config::AppConfig;
use crate::flatten::{Flattener, SkiaFlattener};
use crate::image_ref::ImageStore;
use crate::media::{DirectoryLibrary, MediaLibrary};
use crate::renderer::Renderer;
use crate::screens::{CaptureScreen, EditorEnv, EditorScreen, Navigation};
use crate::sticker::{StickerTemplate, builtin};

pub const BACKGROUND: Color32 = Color32::BLACK;

/// What survives a restart. Annotation sessions never do.
#[derive(serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
struct Preferences {
    facing: CameraFacing,
}

enum Screen {
    Capture(CaptureScreen),
    Editor(Box<EditorScreen>),
}

pub struct PhotomarkApp {
    config: AppConfig,
    prefs: Preferences,
    screen: Screen,
    renderer: Renderer,
    images: Arc<ImageStore>,
    camera: Rc<dyn Camera>,
    library: Rc<dyn MediaLibrary>,
    flattener: Rc<dyn Flattener>,
    palette: Vec<Color32>,
    brush_sizes: Vec<f32>,
    stickers: Vec<StickerTemplate>,
}

impl PhotomarkApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let prefs: Preferences = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();

        let images = Arc::new(ImageStore::new());
        builtin::register(&images);

        let camera: Rc<dyn Camera> = Rc::new(StillImageCamera::new(&config.camera));
        let library: Rc<dyn MediaLibrary> = Rc::new(DirectoryLibrary::new(config.library_dir.clone()));
        let flattener: Rc<dyn Flattener> = Rc::new(SkiaFlattener::new(
            images.clone(),
            config.export_scale,
            BACKGROUND,
        ));

        let mut stickers = builtin::catalog();
        stickers.extend(config.stickers.iter().cloned());

        info!(
            "Starting with {} camera, saving to {}",
            prefs.facing.label(),
            config.library_dir.display()
        );

        Self {
            palette: config.palette_colors(),
            brush_sizes: config.brush_widths(),
            stickers,
            screen: Screen::Capture(CaptureScreen::new(prefs.facing)),
            renderer: Renderer::new(BACKGROUND),
            images,
            camera,
            library,
            flattener,
            prefs,
            config,
        }
    }

    fn navigate(&mut self, navigation: Navigation) {
        match navigation {
            Navigation::ToEditor(image) => {
                let editor = EditorScreen::new(
                    image,
                    self.images.as_ref(),
                    self.config.canvas_size(),
                    self.config.brush(),
                );
                self.screen = Screen::Editor(Box::new(editor));
            }
            Navigation::ToCapture { alert } => {
                if let Screen::Editor(editor) = &self.screen {
                    let photo = editor.image();
                    self.renderer.textures_mut().invalidate(photo);
                    if !photo.is_in_memory() {
                        self.images.remove(photo);
                    }
                }
                let mut capture = CaptureScreen::new(self.prefs.facing);
                if let Some(alert) = alert {
                    capture.set_alert(alert);
                }
                self.screen = Screen::Capture(capture);
            }
        }
    }
}

impl eframe::App for PhotomarkApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.prefs);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let (navigation, busy) = match &mut self.screen {
            Screen::Capture(capture) => {
                let navigation = capture.poll();
                if navigation.is_none() {
                    capture.ui(ctx, self.camera.as_ref(), &mut self.renderer, self.images.as_ref());
                }
                self.prefs.facing = capture.facing();
                (navigation, capture.is_busy())
            }
            Screen::Editor(editor) => {
                editor.poll();
                let mut env = EditorEnv {
                    renderer: &mut self.renderer,
                    resolver: self.images.as_ref(),
                    flattener: self.flattener.as_ref(),
                    library: Rc::clone(&self.library),
                    palette: &self.palette,
                    brush_sizes: &self.brush_sizes,
                    stickers: &self.stickers,
                };
                let navigation = editor.ui(ctx, &mut env);
                (navigation, editor.is_exporting())
            }
        };

        // In-flight work is polled once per frame
        if busy {
            ctx.request_repaint();
        }
        if let Some(navigation) = navigation {
            self.navigate(navigation);
            ctx.request_repaint();
        }
    }
}

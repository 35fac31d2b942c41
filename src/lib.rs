#![warn(clippy::all, rust_2018_idioms)]

pub mod alert;
pub mod app;
pub mod brush;
pub mod camera;
pub mod command;
pub mod config;
pub mod document;
pub mod error;
pub mod flatten;
pub mod image_ref;
pub mod input;
pub mod media;
pub mod panels;
pub mod renderer;
pub mod scene;
pub mod screens;
pub mod session;
pub mod sticker;
pub mod stroke;
pub mod task;
pub mod texture_manager;
pub mod tools;
pub mod util;

pub use alert::{Alert, AlertKind};
pub use app::PhotomarkApp;
pub use brush::Brush;
pub use camera::{Camera, CameraFacing, PermissionStatus, StillImageCamera};
pub use command::Command;
pub use config::AppConfig;
pub use document::Document;
pub use flatten::{Flattener, SkiaFlattener};
pub use image_ref::{ImageRef, ImageResolver, ImageStore};
pub use input::{GestureEvent, InputHandler};
pub use media::{DirectoryLibrary, MediaLibrary};
pub use renderer::Renderer;
pub use scene::{ComposeOptions, Scene, SceneItem};
pub use screens::{CaptureScreen, EditorScreen, Navigation};
pub use session::AnnotationSession;
pub use sticker::{Sticker, StickerId, StickerTemplate};
pub use stroke::{DrawPath, MutablePath};
pub use task::InFlight;
pub use tools::{EditorMode, Tool, ToolType};

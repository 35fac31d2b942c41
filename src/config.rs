use std::fs;
use std::path::{Path, PathBuf};

use egui::{Vec2, vec2};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::brush::{self, Brush, DEFAULT_BRUSH_SIZES, DEFAULT_PALETTE};
use crate::error::ConfigError;
use crate::sticker::StickerTemplate;

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "photomark.json";

/// Still images standing in for the device cameras
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub back: Option<PathBuf>,
    pub front: Option<PathBuf>,
    /// Answer permission requests with a grant (true) or a denial
    pub grant_on_request: bool,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            back: None,
            front: None,
            grant_on_request: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where exported photos are written
    pub library_dir: PathBuf,
    pub camera: CameraConfig,
    /// Hex colours offered by the colour picker
    pub palette: Vec<String>,
    pub brush_sizes: Vec<f32>,
    pub default_color: String,
    pub default_width: f32,
    /// Extra sticker catalog entries, after the built-in ones
    pub stickers: Vec<StickerTemplate>,
    /// Exported pixels per canvas point
    pub export_scale: f32,
    pub canvas_size: [f32; 2],
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            library_dir: PathBuf::from("Pictures"),
            camera: CameraConfig::default(),
            palette: DEFAULT_PALETTE.iter().map(|c| (*c).to_owned()).collect(),
            brush_sizes: DEFAULT_BRUSH_SIZES.to_vec(),
            default_color: brush::to_hex_color(brush::DEFAULT_COLOR),
            default_width: brush::DEFAULT_WIDTH,
            stickers: Vec::new(),
            export_scale: 1.0,
            canvas_size: [390.0, 700.0],
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Load `path`, else [`DEFAULT_CONFIG_FILE`] if present, else defaults.
    /// Failures are logged and fall back to defaults.
    pub fn load_or_default(path: Option<PathBuf>) -> Self {
        let path = match path {
            Some(path) => path,
            None => {
                let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !fallback.exists() {
                    info!("No {} found, using default configuration", DEFAULT_CONFIG_FILE);
                    return Self::default();
                }
                fallback
            }
        };

        match Self::load(&path) {
            Ok(config) => {
                info!("⚙️ Loaded configuration from {}", path.display());
                config
            }
            Err(err) => {
                warn!("Using default configuration: {}", err);
                Self::default()
            }
        }
    }

    /// Palette colours, falling back to the built-in palette when none parse
    pub fn palette_colors(&self) -> Vec<egui::Color32> {
        let colors = brush::parse_palette(&self.palette);
        if colors.is_empty() {
            brush::parse_palette(&DEFAULT_PALETTE)
        } else {
            colors
        }
    }

    pub fn brush_widths(&self) -> Vec<f32> {
        let widths: Vec<f32> = self.brush_sizes.iter().copied().filter(|w| *w > 0.0).collect();
        if widths.is_empty() {
            DEFAULT_BRUSH_SIZES.to_vec()
        } else {
            widths
        }
    }

    /// Brush a new editing session starts with
    pub fn brush(&self) -> Brush {
        let color = brush::parse_hex_color(&self.default_color).unwrap_or_else(|| {
            warn!("Invalid default colour {:?}", self.default_color);
            brush::DEFAULT_COLOR
        });
        let width = if self.default_width > 0.0 {
            self.default_width
        } else {
            brush::DEFAULT_WIDTH
        };
        Brush::new(color, width)
    }

    pub fn canvas_size(&self) -> Vec2 {
        vec2(self.canvas_size[0], self.canvas_size[1])
    }
}

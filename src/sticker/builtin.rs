//! Stickers that ship with the app, rasterized at startup.

use egui::Color32;
use image::RgbaImage;
use log::{info, warn};
use tiny_skia::{FillRule, LineCap, Paint, PathBuilder, Pixmap, Stroke, Transform};

use super::StickerTemplate;
use crate::flatten::{pixmap_to_image, skia_color};
use crate::image_ref::{ImageRef, ImageStore};

/// Pixel edge of the built-in sticker rasters
const RASTER_SIZE: u32 = 128;

const OUTLINE: Color32 = Color32::from_rgb(0x33, 0x33, 0x33);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    Star,
    Heart,
    Smiley,
}

const SHAPES: [(&str, Shape); 3] = [
    ("star", Shape::Star),
    ("heart", Shape::Heart),
    ("smiley", Shape::Smiley),
];

fn uri(name: &str) -> String {
    format!("builtin://{name}")
}

/// The built-in catalog entries, in picker order
pub fn catalog() -> Vec<StickerTemplate> {
    SHAPES
        .iter()
        .map(|(name, _)| StickerTemplate::new(*name, uri(name)))
        .collect()
}

/// Rasterize every built-in sticker into `store`
pub fn register(store: &ImageStore) {
    for (name, shape) in SHAPES {
        match rasterize(shape) {
            Some(pixels) => store.insert(ImageRef::new(uri(name)), pixels),
            None => warn!("Could not rasterize built-in sticker {}", name),
        }
    }
    info!("🏷️ Registered {} built-in stickers", SHAPES.len());
}

fn fill_paint(color: Color32) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(skia_color(color));
    paint.anti_alias = true;
    paint
}

fn outline(pixmap: &mut Pixmap, path: &tiny_skia::Path, color: Color32, width: f32) {
    let stroke = Stroke {
        width,
        line_cap: LineCap::Round,
        ..Default::default()
    };
    pixmap.stroke_path(path, &fill_paint(color), &stroke, Transform::identity(), None);
}

fn fill(pixmap: &mut Pixmap, path: &tiny_skia::Path, color: Color32) {
    pixmap.fill_path(path, &fill_paint(color), FillRule::Winding, Transform::identity(), None);
}

fn star_path(center: f32, outer: f32, inner: f32) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    for i in 0..10 {
        let radius = if i % 2 == 0 { outer } else { inner };
        let angle = (-90.0 + 36.0 * i as f32).to_radians();
        let (x, y) = (center + radius * angle.cos(), center + radius * angle.sin());
        if i == 0 {
            pb.move_to(x, y);
        } else {
            pb.line_to(x, y);
        }
    }
    pb.close();
    pb.finish()
}

fn heart_path() -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    pb.move_to(64.0, 116.0);
    pb.cubic_to(20.0, 84.0, 4.0, 56.0, 16.0, 34.0);
    pb.cubic_to(28.0, 12.0, 56.0, 12.0, 64.0, 36.0);
    pb.cubic_to(72.0, 12.0, 100.0, 12.0, 112.0, 34.0);
    pb.cubic_to(124.0, 56.0, 108.0, 84.0, 64.0, 116.0);
    pb.close();
    pb.finish()
}

fn rasterize(shape: Shape) -> Option<RgbaImage> {
    let mut pixmap = Pixmap::new(RASTER_SIZE, RASTER_SIZE)?;
    let center = RASTER_SIZE as f32 / 2.0;

    match shape {
        Shape::Star => {
            let path = star_path(center, 58.0, 24.0)?;
            fill(&mut pixmap, &path, Color32::from_rgb(0xFF, 0xD6, 0x00));
            outline(&mut pixmap, &path, OUTLINE, 4.0);
        }
        Shape::Heart => {
            let path = heart_path()?;
            fill(&mut pixmap, &path, Color32::from_rgb(0xE5, 0x39, 0x35));
            outline(&mut pixmap, &path, OUTLINE, 4.0);
        }
        Shape::Smiley => {
            let face = PathBuilder::from_circle(center, center, 58.0)?;
            fill(&mut pixmap, &face, Color32::from_rgb(0xFF, 0xCA, 0x28));
            outline(&mut pixmap, &face, OUTLINE, 4.0);
            for x in [44.0, 84.0] {
                let eye = PathBuilder::from_circle(x, 50.0, 8.0)?;
                fill(&mut pixmap, &eye, OUTLINE);
            }
            let mut smile = PathBuilder::new();
            smile.move_to(38.0, 76.0);
            smile.quad_to(64.0, 104.0, 90.0, 76.0);
            outline(&mut pixmap, &smile.finish()?, OUTLINE, 8.0);
        }
    }

    pixmap_to_image(&pixmap).ok()
}

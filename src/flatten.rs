//! Flattening: turning the layered editor scene into one raster image.
//!
//! Rasterization uses tiny-skia, the same way the photo, the strokes and the
//! stickers are laid out on screen by [`crate::renderer`].

use std::sync::Arc;

use egui::{Color32, Pos2, Rect, Vec2, vec2};
use futures::FutureExt;
use futures::future::{self, LocalBoxFuture};
use image::RgbaImage;
use log::{debug, info};
use tiny_skia::{
    Color, ColorU8, FilterQuality, IntSize, LineCap, LineJoin, Paint, PathBuilder, Pixmap,
    PixmapPaint, Stroke, Transform,
};

use crate::error::FlattenError;
use crate::image_ref::{ImageRef, ImageResolver};
use crate::renderer::{SELECTION_COLOR, SELECTION_WIDTH};
use crate::scene::{Scene, SceneItem, fit_contain};
use crate::sticker::rotated_square;

/// View-flatten capability
pub trait Flattener {
    fn flatten(&self, scene: Scene) -> LocalBoxFuture<'static, Result<RgbaImage, FlattenError>>;
}

/// Rasterizes scenes with tiny-skia
pub struct SkiaFlattener {
    resolver: Arc<dyn ImageResolver>,
    /// Output pixels per canvas point
    scale: f32,
    background: Color32,
}

impl SkiaFlattener {
    pub fn new(resolver: Arc<dyn ImageResolver>, scale: f32, background: Color32) -> Self {
        Self {
            resolver,
            scale,
            background,
        }
    }
}

impl Flattener for SkiaFlattener {
    fn flatten(&self, scene: Scene) -> LocalBoxFuture<'static, Result<RgbaImage, FlattenError>> {
        let result = rasterize(&scene, self.resolver.as_ref(), self.scale, self.background);
        future::ready(result).boxed_local()
    }
}

pub(crate) fn skia_color(color: Color32) -> Color {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    Color::from_rgba8(r, g, b, a)
}

/// Upload decoded pixels into a premultiplied pixmap
fn to_pixmap(pixels: &RgbaImage) -> Result<Pixmap, FlattenError> {
    let size = IntSize::from_wh(pixels.width(), pixels.height())
        .ok_or(FlattenError::Raster("empty source image".to_owned()))?;
    let data = pixels
        .pixels()
        .flat_map(|p| {
            let c = ColorU8::from_rgba(p[0], p[1], p[2], p[3]).premultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect();
    Pixmap::from_vec(data, size).ok_or(FlattenError::Raster("source image size mismatch".to_owned()))
}

pub(crate) fn pixmap_to_image(pixmap: &Pixmap) -> Result<RgbaImage, FlattenError> {
    let data = pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect();
    RgbaImage::from_raw(pixmap.width(), pixmap.height(), data)
        .ok_or(FlattenError::Raster("output size mismatch".to_owned()))
}

fn polyline_path(points: &[Pos2], closed: bool) -> Option<tiny_skia::Path> {
    let (first, rest) = points.split_first()?;
    let mut pb = PathBuilder::new();
    pb.move_to(first.x, first.y);
    for p in rest {
        pb.line_to(p.x, p.y);
    }
    if closed {
        pb.close();
    }
    pb.finish()
}

fn stroke_polyline(
    pixmap: &mut Pixmap,
    points: &[Pos2],
    color: Color32,
    width: f32,
    closed: bool,
    base: Transform,
) {
    // A single point has no extent to stroke
    if points.len() < 2 {
        return;
    }
    let Some(path) = polyline_path(points, closed) else {
        return;
    };

    let mut paint = Paint::default();
    paint.set_color(skia_color(color));
    paint.anti_alias = true;
    let stroke = Stroke {
        width,
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..Default::default()
    };
    pixmap.stroke_path(&path, &paint, &stroke, base, None);
}

/// Draw `image` contain-fitted into `bounds`, rotated about the centre of `bounds`
fn draw_image(
    pixmap: &mut Pixmap,
    image: &ImageRef,
    bounds: Rect,
    rotation: f32,
    resolver: &dyn ImageResolver,
    base: Transform,
) -> Result<(), FlattenError> {
    let pixels = resolver.resolve(image)?;
    let source = to_pixmap(&pixels)?;
    let (w, h) = (source.width() as f32, source.height() as f32);
    let target = fit_contain(vec2(w, h), bounds);
    if target.width() <= 0.0 || target.height() <= 0.0 {
        return Ok(());
    }

    let center = bounds.center();
    let transform = base
        .pre_translate(center.x, center.y)
        .pre_concat(Transform::from_rotate(rotation))
        .pre_translate(target.min.x - center.x, target.min.y - center.y)
        .pre_scale(target.width() / w, target.height() / h);
    let paint = PixmapPaint {
        quality: FilterQuality::Bilinear,
        ..Default::default()
    };
    pixmap.draw_pixmap(0, 0, source.as_ref(), &paint, transform, None);
    Ok(())
}

/// Flatten `scene` into a raster of `scene.size * scale` pixels
pub fn rasterize(
    scene: &Scene,
    resolver: &dyn ImageResolver,
    scale: f32,
    background: Color32,
) -> Result<RgbaImage, FlattenError> {
    let pixel_size = scene.size * scale;
    let (width, height) = (pixel_size.x.round().max(0.0) as u32, pixel_size.y.round().max(0.0) as u32);
    if width == 0 || height == 0 {
        return Err(FlattenError::EmptyCanvas);
    }
    let mut pixmap = Pixmap::new(width, height)
        .ok_or_else(|| FlattenError::Raster(format!("cannot allocate {width}x{height} pixmap")))?;
    pixmap.fill(skia_color(background));
    debug!("Flattening {} scene items into {}x{}", scene.items.len(), width, height);

    let base = Transform::from_scale(scale, scale);
    for item in &scene.items {
        match item {
            SceneItem::Photo { image, rect } => {
                draw_image(&mut pixmap, image, *rect, 0.0, resolver, base)?;
            }
            SceneItem::Polyline { points, stroke } => {
                stroke_polyline(&mut pixmap, points, stroke.color, stroke.width, false, base);
            }
            SceneItem::Sticker {
                image,
                center,
                size,
                rotation,
                selected,
                ..
            } => {
                let bounds = Rect::from_center_size(*center, Vec2::splat(*size));
                draw_image(&mut pixmap, image, bounds, *rotation, resolver, base)?;
                if *selected {
                    let corners = rotated_square(*center, *size, *rotation);
                    stroke_polyline(&mut pixmap, &corners, SELECTION_COLOR, SELECTION_WIDTH, true, base);
                }
            }
        }
    }

    let raster = pixmap_to_image(&pixmap)?;
    info!("🧾 Flattened scene to {}x{}", raster.width(), raster.height());
    Ok(raster)
}

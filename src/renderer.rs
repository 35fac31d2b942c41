use egui::emath::Rot2;
use egui::{Color32, Mesh, Painter, Pos2, Rect, Shape, Stroke, Vec2, pos2, vec2};
use log::warn;

use crate::image_ref::{ImageRef, ImageResolver};
use crate::scene::{Scene, SceneItem, fit_contain};
use crate::sticker::rotated_square;
use crate::texture_manager::TextureManager;

pub const SELECTION_COLOR: Color32 = Color32::from_rgb(0x21, 0x96, 0xF3);
pub const SELECTION_WIDTH: f32 = 2.0;
const UV_FULL: Rect = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));

/// Paints a [`Scene`] onto the editor canvas
pub struct Renderer {
    textures: TextureManager,
    background: Color32,
}

impl Renderer {
    pub fn new(background: Color32) -> Self {
        Self {
            textures: TextureManager::new(64),
            background,
        }
    }

    pub fn textures_mut(&mut self) -> &mut TextureManager {
        &mut self.textures
    }

    /// Renders the scene with its origin at `rect.min`
    pub fn render(&mut self, painter: &Painter, rect: Rect, scene: &Scene, resolver: &dyn ImageResolver) {
        self.textures.begin_frame();
        painter.rect_filled(rect, 0.0, self.background);

        let offset = rect.min.to_vec2();
        for item in &scene.items {
            match item {
                SceneItem::Photo { image, rect: photo_rect } => {
                    self.paint_image(painter, image, photo_rect.translate(offset), resolver);
                }
                SceneItem::Polyline { points, stroke } => {
                    if points.len() < 2 {
                        continue;
                    }
                    let points = points.iter().map(|p| *p + offset).collect();
                    painter.add(Shape::line(points, *stroke));
                }
                SceneItem::Sticker {
                    image,
                    center,
                    size,
                    rotation,
                    selected,
                    ..
                } => {
                    let center = *center + offset;
                    self.paint_sticker(painter, image, center, *size, *rotation, resolver);
                    if *selected {
                        let corners = rotated_square(center, *size, *rotation);
                        painter.add(Shape::closed_line(
                            corners.to_vec(),
                            Stroke::new(SELECTION_WIDTH, SELECTION_COLOR),
                        ));
                    }
                }
            }
        }
    }

    /// Paints a single image contain-fitted into `rect`, or just the background
    pub fn render_frame(
        &mut self,
        painter: &Painter,
        rect: Rect,
        image: Option<&ImageRef>,
        resolver: &dyn ImageResolver,
    ) {
        self.textures.begin_frame();
        painter.rect_filled(rect, 0.0, self.background);
        let Some(image) = image else {
            return;
        };
        match self.textures.get_or_load(painter.ctx(), image, resolver) {
            Ok(texture) => {
                let [w, h] = texture.size();
                let fitted = fit_contain(vec2(w as f32, h as f32), rect);
                painter.image(texture.id(), fitted, UV_FULL, Color32::WHITE);
            }
            Err(err) => warn!("Cannot draw {}: {}", image, err),
        }
    }

    fn paint_image(&mut self, painter: &Painter, image: &ImageRef, rect: Rect, resolver: &dyn ImageResolver) {
        match self.textures.get_or_load(painter.ctx(), image, resolver) {
            Ok(texture) => {
                painter.image(texture.id(), rect, UV_FULL, Color32::WHITE);
            }
            Err(err) => {
                warn!("Cannot draw {}: {}", image, err);
                painter.rect_filled(rect, 0.0, Color32::from_gray(60));
            }
        }
    }

    fn paint_sticker(
        &mut self,
        painter: &Painter,
        image: &ImageRef,
        center: Pos2,
        size: f32,
        rotation: f32,
        resolver: &dyn ImageResolver,
    ) {
        let texture = match self.textures.get_or_load(painter.ctx(), image, resolver) {
            Ok(texture) => texture,
            Err(err) => {
                warn!("Cannot draw sticker {}: {}", image, err);
                painter.add(Shape::convex_polygon(
                    rotated_square(center, size, rotation).to_vec(),
                    Color32::from_gray(200),
                    Stroke::NONE,
                ));
                return;
            }
        };

        // Stickers are contained in their box like the photo
        let [w, h] = texture.size();
        let content = fit_contain(
            vec2(w as f32, h as f32),
            Rect::from_center_size(center, Vec2::splat(size)),
        );
        let mut mesh = Mesh::with_texture(texture.id());
        mesh.add_rect_with_uv(content, UV_FULL, Color32::WHITE);
        mesh.rotate(Rot2::from_angle(rotation.to_radians()), center);
        painter.add(Shape::mesh(mesh));
    }
}

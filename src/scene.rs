//! Display list for the editor canvas.
//!
//! Back to front: the photo (contain-fit), frozen paths in chronological order,
//! the path being drawn, then stickers in insertion order. Both the on-screen
//! renderer and the flattener consume the same [`Scene`].

use egui::{Pos2, Rect, Stroke, Vec2};

use crate::image_ref::ImageRef;
use crate::session::AnnotationSession;
use crate::sticker::{STICKER_SIZE, StickerId};
use crate::stroke::DrawPath;

#[derive(Debug, Clone, PartialEq)]
pub enum SceneItem {
    Photo {
        image: ImageRef,
        /// Where the photo lands on the canvas after contain-fit
        rect: Rect,
    },
    Polyline {
        points: Vec<Pos2>,
        stroke: Stroke,
    },
    Sticker {
        id: StickerId,
        image: ImageRef,
        center: Pos2,
        /// Edge length after scaling
        size: f32,
        /// Degrees, clockwise
        rotation: f32,
        /// Draw the selection border around this sticker
        selected: bool,
    },
}

/// Canvas-local display list
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub size: Vec2,
    pub items: Vec<SceneItem>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComposeOptions {
    /// Include the selection border (on screen) or not (exported photo)
    pub selection_chrome: bool,
}

impl ComposeOptions {
    pub const SCREEN: Self = Self {
        selection_chrome: true,
    };
    pub const EXPORT: Self = Self {
        selection_chrome: false,
    };
}

/// The photo being annotated and its pixel size
#[derive(Debug, Clone, PartialEq)]
pub struct Photo {
    pub image: ImageRef,
    pub size: Vec2,
}

/// Scale `content` to fit entirely inside `bounds` preserving its aspect ratio, centred
pub fn fit_contain(content: Vec2, bounds: Rect) -> Rect {
    if content.x <= 0.0 || content.y <= 0.0 || bounds.width() <= 0.0 || bounds.height() <= 0.0 {
        return Rect::from_center_size(bounds.center(), Vec2::ZERO);
    }
    let scale = (bounds.width() / content.x).min(bounds.height() / content.y);
    Rect::from_center_size(bounds.center(), content * scale)
}

fn polyline(path: &DrawPath) -> SceneItem {
    SceneItem::Polyline {
        points: path.points().to_vec(),
        stroke: path.to_egui_stroke(),
    }
}

/// Build the display list for a session on a canvas of `size`
pub fn compose(
    session: &AnnotationSession,
    photo: Option<&Photo>,
    size: Vec2,
    options: ComposeOptions,
) -> Scene {
    let mut items = Vec::with_capacity(session.paths().len() + session.stickers().len() + 2);

    if let Some(photo) = photo {
        items.push(SceneItem::Photo {
            image: photo.image.clone(),
            rect: fit_contain(photo.size, Rect::from_min_size(Pos2::ZERO, size)),
        });
    }

    items.extend(session.paths().iter().map(polyline));
    if let Some(current) = session.current_path() {
        items.push(polyline(&current));
    }

    let selected = session.selected_sticker().filter(|_| options.selection_chrome);
    items.extend(session.stickers().iter().map(|sticker| SceneItem::Sticker {
        id: sticker.id(),
        image: sticker.image().clone(),
        center: sticker.center(),
        size: STICKER_SIZE * sticker.scale,
        rotation: sticker.rotation,
        selected: selected == Some(sticker.id()),
    }));

    Scene { size, items }
}

impl Scene {
    pub fn polylines(&self) -> impl Iterator<Item = (&[Pos2], Stroke)> {
        self.items.iter().filter_map(|item| match item {
            SceneItem::Polyline { points, stroke } => Some((points.as_slice(), *stroke)),
            _ => None,
        })
    }

    pub fn sticker_count(&self) -> usize {
        self.items
            .iter()
            .filter(|item| matches!(item, SceneItem::Sticker { .. }))
            .count()
    }
}

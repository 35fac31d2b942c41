use std::fmt;

use egui::{Pos2, Rect, Vec2, emath::Rot2, vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::image_ref::ImageRef;

pub mod builtin;

/// Edge length of the untransformed sticker box, in overlay points
pub const STICKER_SIZE: f32 = 100.0;
/// Vertical offset of a freshly added sticker
pub const DEFAULT_STICKER_TOP: f32 = 200.0;

/// Unique sticker identifier, time-ordered by creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StickerId(Uuid);

impl StickerId {
    /// A new identifier derived from the current timestamp
    pub fn generate() -> Self {
        Self(Uuid::now_v7())
    }
}

impl fmt::Display for StickerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A sticker placed on the overlay
#[derive(Debug, Clone, PartialEq)]
pub struct Sticker {
    id: StickerId,
    image: ImageRef,
    /// Top-left offset in overlay space
    pub position: Pos2,
    /// Uniform scale about the sticker centre
    pub scale: f32,
    /// Rotation in degrees, clockwise, about the sticker centre
    pub rotation: f32,
}

impl Sticker {
    pub fn new(id: StickerId, image: ImageRef, position: Pos2) -> Self {
        Self {
            id,
            image,
            position,
            scale: 1.0,
            rotation: 0.0,
        }
    }

    /// Default placement: horizontally centred, fixed distance from the top
    pub fn default_position(canvas_width: f32) -> Pos2 {
        Pos2::new(canvas_width / 2.0 - STICKER_SIZE / 2.0, DEFAULT_STICKER_TOP)
    }

    pub fn id(&self) -> StickerId {
        self.id
    }

    pub fn image(&self) -> &ImageRef {
        &self.image
    }

    /// The untransformed layout box
    pub fn layout_rect(&self) -> Rect {
        Rect::from_min_size(self.position, Vec2::splat(STICKER_SIZE))
    }

    pub fn center(&self) -> Pos2 {
        self.layout_rect().center()
    }

    fn rotation(&self) -> Rot2 {
        Rot2::from_angle(self.rotation.to_radians())
    }

    /// Corners of the drawn sticker after scale and rotation, clockwise from top-left
    pub fn corners(&self) -> [Pos2; 4] {
        rotated_square(self.center(), STICKER_SIZE * self.scale, self.rotation)
    }

    /// Whether `pos` falls inside the drawn (scaled and rotated) sticker
    pub fn hit_test(&self, pos: Pos2) -> bool {
        let local = self.rotation().inverse() * (pos - self.center());
        let half = STICKER_SIZE * self.scale / 2.0;
        local.x.abs() <= half && local.y.abs() <= half
    }
}

/// Corners of a square of edge `size` centred on `center`, rotated by `degrees`
pub fn rotated_square(center: Pos2, size: f32, degrees: f32) -> [Pos2; 4] {
    let half = size / 2.0;
    let rot = Rot2::from_angle(degrees.to_radians());
    [
        vec2(-half, -half),
        vec2(half, -half),
        vec2(half, half),
        vec2(-half, half),
    ]
    .map(|corner| center + rot * corner)
}

/// An entry of the sticker catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StickerTemplate {
    pub name: String,
    pub uri: String,
}

impl StickerTemplate {
    pub fn new(name: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            uri: uri.into(),
        }
    }

    pub fn image(&self) -> ImageRef {
        ImageRef::new(self.uri.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    fn sticker_at(x: f32, y: f32) -> Sticker {
        Sticker::new(StickerId::generate(), ImageRef::new("mem://s"), pos2(x, y))
    }

    #[test]
    fn new_stickers_are_unit_scale_and_unrotated() {
        let sticker = sticker_at(10.0, 20.0);
        assert_eq!(sticker.scale, 1.0);
        assert_eq!(sticker.rotation, 0.0);
        assert_eq!(sticker.center(), pos2(60.0, 70.0));
    }

    #[test]
    fn default_position_is_centred() {
        assert_eq!(Sticker::default_position(400.0), pos2(150.0, 200.0));
    }

    #[test]
    fn generated_ids_are_distinct() {
        let ids: Vec<StickerId> = (0..64).map(|_| StickerId::generate()).collect();
        for (i, a) in ids.iter().enumerate() {
            for b in &ids[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn hit_test_follows_scale() {
        let mut sticker = sticker_at(0.0, 0.0);
        assert!(sticker.hit_test(pos2(95.0, 95.0)));
        assert!(!sticker.hit_test(pos2(120.0, 50.0)));

        sticker.scale = 2.0;
        assert!(sticker.hit_test(pos2(120.0, 50.0)));
        assert!(sticker.hit_test(pos2(-40.0, -40.0)));
    }

    #[test]
    fn hit_test_follows_rotation() {
        let mut sticker = sticker_at(0.0, 0.0);
        // The corner region sticks out of the rotated square
        assert!(sticker.hit_test(pos2(2.0, 2.0)));
        sticker.rotation = 45.0;
        assert!(!sticker.hit_test(pos2(2.0, 2.0)));
        // but the rotated tip reaches further along the axis
        assert!(sticker.hit_test(pos2(50.0, -15.0)));
    }

    #[test]
    fn corners_of_unrotated_sticker_match_layout() {
        let sticker = sticker_at(10.0, 10.0);
        let corners = sticker.corners();
        assert!((corners[0] - pos2(10.0, 10.0)).length() < 1e-4);
        assert!((corners[2] - pos2(110.0, 110.0)).length() < 1e-4);
    }
}

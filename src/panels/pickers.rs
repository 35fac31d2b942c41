//! Modal selection surfaces: brush colour and width, sticker catalog.
//!
//! Each picker reports at most one choice per frame; the caller closes the
//! picker once something was chosen.

use egui::load::SizedTexture;
use egui::{Button, Color32, RichText, Stroke, vec2};
use log::debug;

use crate::brush::Brush;
use crate::image_ref::ImageResolver;
use crate::sticker::StickerTemplate;
use crate::texture_manager::TextureManager;

const SWATCH_SIZE: f32 = 36.0;
const THUMBNAIL_SIZE: f32 = 64.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BrushChoice {
    Color(Color32),
    Width(f32),
}

fn picker_window<'open>(title: &str) -> egui::Window<'open> {
    egui::Window::new(title.to_owned())
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_BOTTOM, vec2(0.0, -16.0))
}

/// Palette swatches and brush sizes. `open` turns false when the window is closed.
pub fn color_picker(
    ctx: &egui::Context,
    open: &mut bool,
    palette: &[Color32],
    sizes: &[f32],
    brush: Brush,
) -> Option<BrushChoice> {
    let mut choice = None;

    picker_window("Brush").open(open).show(ctx, |ui| {
        ui.label("Colour");
        ui.horizontal_wrapped(|ui| {
            for &color in palette {
                let selected = color == brush.color;
                let outline = if selected {
                    Stroke::new(3.0, ui.visuals().selection.stroke.color)
                } else {
                    Stroke::new(1.0, Color32::GRAY)
                };
                let swatch = Button::new("")
                    .fill(color)
                    .stroke(outline)
                    .min_size(vec2(SWATCH_SIZE, SWATCH_SIZE));
                if ui.add(swatch).clicked() {
                    choice = Some(BrushChoice::Color(color));
                }
            }
        });

        ui.separator();
        ui.label("Width");
        ui.horizontal(|ui| {
            for &width in sizes {
                let label = RichText::new(format!("{width}")).size(16.0);
                if ui.selectable_label(width == brush.width, label).clicked() {
                    choice = Some(BrushChoice::Width(width));
                }
            }
        });
    });

    choice
}

/// Sticker thumbnails; entries whose image cannot be loaded are listed by name
pub fn sticker_picker<'a>(
    ctx: &egui::Context,
    open: &mut bool,
    catalog: &'a [StickerTemplate],
    textures: &mut TextureManager,
    resolver: &dyn ImageResolver,
) -> Option<&'a StickerTemplate> {
    let mut choice = None;

    picker_window("Stickers").open(open).show(ctx, |ui| {
        if catalog.is_empty() {
            ui.label("No stickers available");
            return;
        }
        ui.horizontal_wrapped(|ui| {
            for template in catalog {
                let button = match textures.get_or_load(ctx, &template.image(), resolver) {
                    Ok(texture) => Button::image_and_text(
                        SizedTexture::new(texture.id(), vec2(THUMBNAIL_SIZE, THUMBNAIL_SIZE)),
                        template.name.as_str(),
                    ),
                    Err(err) => {
                        debug!("Sticker {} has no thumbnail: {}", template.name, err);
                        Button::new(template.name.as_str())
                    }
                };
                if ui.add(button).clicked() {
                    choice = Some(template);
                }
            }
        });
    });

    choice
}

use egui::Color32;
use log::warn;

pub const DEFAULT_PALETTE: [&str; 7] = [
    "#FF0000", "#00FF00", "#0000FF", "#FFFF00", "#FF00FF", "#000000", "#FFFFFF",
];
pub const DEFAULT_BRUSH_SIZES: [f32; 4] = [2.0, 5.0, 10.0, 15.0];
pub const DEFAULT_COLOR: Color32 = Color32::from_rgb(0xFF, 0x00, 0x00);
pub const DEFAULT_WIDTH: f32 = 5.0;

/// Brush settings of an editing session, applied to the next path started
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Brush {
    pub color: Color32,
    pub width: f32,
}

impl Default for Brush {
    fn default() -> Self {
        Self {
            color: DEFAULT_COLOR,
            width: DEFAULT_WIDTH,
        }
    }
}

impl Brush {
    pub fn new(color: Color32, width: f32) -> Self {
        Self { color, width }
    }
}

/// Parse `#RRGGBB` or `#RRGGBBAA` (the leading `#` is optional)
pub fn parse_hex_color(hex: &str) -> Option<Color32> {
    let digits = hex.trim().trim_start_matches('#');
    if !digits.is_ascii() || !matches!(digits.len(), 6 | 8) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    let (r, g, b) = (channel(0)?, channel(2)?, channel(4)?);
    let a = if digits.len() == 8 { channel(6)? } else { 255 };
    Some(Color32::from_rgba_unmultiplied(r, g, b, a))
}

/// `#RRGGBB` for opaque colours, `#RRGGBBAA` otherwise
pub fn to_hex_color(color: Color32) -> String {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    if a == 255 {
        format!("#{r:02X}{g:02X}{b:02X}")
    } else {
        format!("#{r:02X}{g:02X}{b:02X}{a:02X}")
    }
}

/// Parse a palette, skipping entries that are not valid colours
pub fn parse_palette<S: AsRef<str>>(entries: &[S]) -> Vec<Color32> {
    entries
        .iter()
        .filter_map(|entry| {
            let parsed = parse_hex_color(entry.as_ref());
            if parsed.is_none() {
                warn!("Ignoring invalid palette colour {:?}", entry.as_ref());
            }
            parsed
        })
        .collect()
}

pub mod pickers;
pub mod toolbar;

pub use pickers::{BrushChoice, color_picker, sticker_picker};
pub use toolbar::{ToolbarAction, ToolbarState, toolbar};

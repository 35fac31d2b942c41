//! The two screens of the flow and the hand-off between them.

pub mod capture;
pub mod editor;

pub use capture::CaptureScreen;
pub use editor::{EditorEnv, EditorScreen, Picker};

use crate::alert::Alert;
use crate::image_ref::ImageRef;

/// A screen transition requested by the active screen
#[derive(Debug, Clone, PartialEq)]
pub enum Navigation {
    /// Open the editor on a captured photo
    ToEditor(ImageRef),
    /// Return to the camera, optionally with a notice to show there
    ToCapture { alert: Option<Alert> },
}

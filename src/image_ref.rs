use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::RgbaImage;
use log::{debug, info};
use parking_lot::Mutex;

use crate::error::ImageLoadError;

const MEMORY_SCHEMES: [&str; 2] = ["mem://", "builtin://"];
const FILE_SCHEME: &str = "file://";

/// Opaque reference to an image resource (a captured photo, a sticker, an export).
///
/// The only thing passed between the capture and editor screens.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    pub fn from_path(path: impl AsRef<Path>) -> Self {
        Self(format!("{FILE_SCHEME}{}", path.as_ref().display()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for references that only exist inside an [`ImageStore`]
    pub fn is_in_memory(&self) -> bool {
        MEMORY_SCHEMES.iter().any(|scheme| self.0.starts_with(scheme))
    }

    /// Filesystem path for file-backed references
    pub fn to_path(&self) -> Option<PathBuf> {
        if self.is_in_memory() {
            return None;
        }
        let raw = self.0.strip_prefix(FILE_SCHEME).unwrap_or(&self.0);
        Some(PathBuf::from(raw))
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Turns image references into decoded pixels
pub trait ImageResolver: Send + Sync {
    fn resolve(&self, image: &ImageRef) -> Result<Arc<RgbaImage>, ImageLoadError>;
}

/// In-memory images plus a decode cache for file-backed ones
#[derive(Default)]
pub struct ImageStore {
    images: Mutex<HashMap<ImageRef, Arc<RgbaImage>>>,
}

impl ImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register pixels under a reference, replacing anything cached for it
    pub fn insert(&self, image: ImageRef, pixels: RgbaImage) {
        debug!("Storing {} ({}x{})", image, pixels.width(), pixels.height());
        self.images.lock().insert(image, Arc::new(pixels));
    }

    /// Forget the pixels held for `image`. File-backed images are decoded
    /// again on the next resolve.
    pub fn remove(&self, image: &ImageRef) -> bool {
        let removed = self.images.lock().remove(image).is_some();
        if removed {
            debug!("Released {}", image);
        }
        removed
    }

    pub fn contains(&self, image: &ImageRef) -> bool {
        self.images.lock().contains_key(image)
    }

    pub fn len(&self) -> usize {
        self.images.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn load_file(&self, image: &ImageRef) -> Result<Arc<RgbaImage>, ImageLoadError> {
        let path = image
            .to_path()
            .ok_or_else(|| ImageLoadError::NotFound(image.clone()))?;
        if !path.exists() {
            return Err(ImageLoadError::NotFound(image.clone()));
        }

        let decoded = image::open(&path).map_err(|source| ImageLoadError::Decode {
            image: image.clone(),
            source,
        })?;
        let pixels = Arc::new(decoded.to_rgba8());
        info!(
            "🖼️ Loaded {} ({}x{})",
            path.display(),
            pixels.width(),
            pixels.height()
        );

        self.images.lock().insert(image.clone(), Arc::clone(&pixels));
        Ok(pixels)
    }
}

impl ImageResolver for ImageStore {
    fn resolve(&self, image: &ImageRef) -> Result<Arc<RgbaImage>, ImageLoadError> {
        if let Some(pixels) = self.images.lock().get(image) {
            return Ok(Arc::clone(pixels));
        }
        if image.is_in_memory() {
            return Err(ImageLoadError::NotFound(image.clone()));
        }
        self.load_file(image)
    }
}

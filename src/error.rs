use std::path::PathBuf;

use thiserror::Error;

use crate::image_ref::ImageRef;

/// An operation of the same kind is still running and has not resolved yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("operation already in progress")]
pub struct Busy;

/// Errors surfaced by the capture screen
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureError {
    /// Capture is unavailable until the camera permission is granted
    #[error("camera permission has not been granted")]
    PermissionDenied,
    /// A capture is already in flight
    #[error("a capture is already in progress")]
    Busy,
    /// The device finished without producing an image resource
    #[error("camera returned no image")]
    NoImage,
    /// The device reported a failure
    #[error("camera failure: {0}")]
    Device(String),
}

impl From<Busy> for CaptureError {
    fn from(_: Busy) -> Self {
        CaptureError::Busy
    }
}

/// Errors that can occur while resolving an image reference to pixels
#[derive(Debug, Error)]
pub enum ImageLoadError {
    #[error("image not found: {0}")]
    NotFound(ImageRef),

    #[error("failed to decode {image}: {source}")]
    Decode {
        image: ImageRef,
        #[source]
        source: image::ImageError,
    },
}

/// Errors produced while flattening a scene into a raster
#[derive(Debug, Error)]
pub enum FlattenError {
    #[error("canvas has no area to flatten")]
    EmptyCanvas,

    #[error(transparent)]
    ImageLoad(#[from] ImageLoadError),

    #[error("rasterizer failed: {0}")]
    Raster(String),
}

/// Errors produced while writing to the media library
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode photo: {0}")]
    Encode(#[from] image::ImageError),
}

/// Errors from the export action (flatten, then write)
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("an export is already in progress")]
    Busy,

    #[error("failed to flatten photo: {0}")]
    Flatten(#[from] FlattenError),

    #[error("failed to save photo: {0}")]
    Media(#[from] MediaError),
}

impl From<Busy> for ExportError {
    fn from(_: Busy) -> Self {
        ExportError::Busy
    }
}

/// Errors that can occur while loading the configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

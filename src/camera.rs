use std::cell::Cell;
use std::path::PathBuf;

use futures::FutureExt;
use futures::future::{self, LocalBoxFuture};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::config::CameraConfig;
use crate::error::CaptureError;
use crate::image_ref::ImageRef;

/// Which camera the viewfinder is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CameraFacing {
    #[default]
    Back,
    Front,
}

impl CameraFacing {
    pub fn toggled(self) -> Self {
        match self {
            CameraFacing::Back => CameraFacing::Front,
            CameraFacing::Front => CameraFacing::Back,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CameraFacing::Back => "back",
            CameraFacing::Front => "front",
        }
    }
}

/// Camera permission as reported by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PermissionStatus {
    /// Not asked yet
    #[default]
    Undetermined,
    Denied,
    Granted,
}

impl PermissionStatus {
    pub fn is_granted(self) -> bool {
        self == PermissionStatus::Granted
    }
}

/// Camera capability: live preview, permission, still capture
pub trait Camera {
    fn permission(&self) -> PermissionStatus;

    /// Ask the user for camera access. Resolves to the resulting status.
    fn request_permission(&self) -> LocalBoxFuture<'static, PermissionStatus>;

    /// Current viewfinder frame for `facing`, if the camera can show one
    fn preview_frame(&self, facing: CameraFacing) -> Option<ImageRef>;

    /// Take a picture. Resolves to a reference to the captured image.
    fn take_picture(&self, facing: CameraFacing) -> LocalBoxFuture<'static, Result<ImageRef, CaptureError>>;
}

/// Desktop stand-in for a device camera: each facing is backed by a still
/// image on disk which doubles as the viewfinder frame and the capture result.
pub struct StillImageCamera {
    back: Option<PathBuf>,
    front: Option<PathBuf>,
    grant_on_request: bool,
    permission: Cell<PermissionStatus>,
}

impl StillImageCamera {
    pub fn new(config: &CameraConfig) -> Self {
        Self {
            back: config.back.clone(),
            front: config.front.clone(),
            grant_on_request: config.grant_on_request,
            permission: Cell::new(PermissionStatus::Undetermined),
        }
    }

    fn source(&self, facing: CameraFacing) -> Option<&PathBuf> {
        match facing {
            CameraFacing::Back => self.back.as_ref(),
            CameraFacing::Front => self.front.as_ref(),
        }
    }
}

impl Camera for StillImageCamera {
    fn permission(&self) -> PermissionStatus {
        self.permission.get()
    }

    fn request_permission(&self) -> LocalBoxFuture<'static, PermissionStatus> {
        let status = if self.grant_on_request {
            PermissionStatus::Granted
        } else {
            PermissionStatus::Denied
        };
        self.permission.set(status);
        info!("📷 Camera permission: {:?}", status);
        future::ready(status).boxed_local()
    }

    fn preview_frame(&self, facing: CameraFacing) -> Option<ImageRef> {
        self.source(facing)
            .filter(|path| path.exists())
            .map(ImageRef::from_path)
    }

    fn take_picture(&self, facing: CameraFacing) -> LocalBoxFuture<'static, Result<ImageRef, CaptureError>> {
        let result = if !self.permission.get().is_granted() {
            Err(CaptureError::PermissionDenied)
        } else {
            match self.source(facing) {
                Some(path) if path.exists() => {
                    info!("📸 Captured {} from {} camera", path.display(), facing.label());
                    Ok(ImageRef::from_path(path))
                }
                Some(path) => {
                    warn!("Camera source {} is missing", path.display());
                    Err(CaptureError::NoImage)
                }
                None => Err(CaptureError::Device(format!(
                    "no {} camera configured",
                    facing.label()
                ))),
            }
        };
        future::ready(result).boxed_local()
    }
}

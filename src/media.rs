use std::fs;
use std::path::{Path, PathBuf};

use futures::FutureExt;
use futures::future::{self, LocalBoxFuture};
use image::{ImageError, ImageFormat, RgbaImage};
use log::{error, info};

use crate::error::MediaError;
use crate::image_ref::ImageRef;
use crate::util::time;

/// Media library capability: the shared photo store of the device
pub trait MediaLibrary {
    /// Save a flattened photo. Resolves to a reference to the stored file.
    fn save_to_library(&self, raster: RgbaImage) -> LocalBoxFuture<'static, Result<ImageRef, MediaError>>;
}

/// Saves exported photos as PNG files into a directory
#[derive(Debug, Clone)]
pub struct DirectoryLibrary {
    dir: PathBuf,
}

impl DirectoryLibrary {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// A file name that does not exist yet in the library
    fn next_path(&self) -> PathBuf {
        let stamp = time::timestamp_millis();
        let mut path = self.dir.join(format!("IMG_{stamp}.png"));
        let mut n = 1;
        while path.exists() {
            path = self.dir.join(format!("IMG_{stamp}_{n}.png"));
            n += 1;
        }
        path
    }

    fn write(&self, raster: &RgbaImage) -> Result<PathBuf, MediaError> {
        fs::create_dir_all(&self.dir).map_err(|source| MediaError::Write {
            path: self.dir.clone(),
            source,
        })?;
        let path = self.next_path();
        save_png(raster, &path)?;
        Ok(path)
    }
}

fn save_png(raster: &RgbaImage, path: &Path) -> Result<(), MediaError> {
    raster
        .save_with_format(path, ImageFormat::Png)
        .map_err(|err| match err {
            ImageError::IoError(source) => MediaError::Write {
                path: path.to_path_buf(),
                source,
            },
            other => MediaError::Encode(other),
        })
}

impl MediaLibrary for DirectoryLibrary {
    fn save_to_library(&self, raster: RgbaImage) -> LocalBoxFuture<'static, Result<ImageRef, MediaError>> {
        let result = self.write(&raster).map(|path| {
            info!("💾 Saved {}x{} photo to {}", raster.width(), raster.height(), path.display());
            ImageRef::from_path(path)
        });
        if let Err(err) = &result {
            error!("❌ Saving to {} failed: {}", self.dir.display(), err);
        }
        future::ready(result).boxed_local()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("photomark-{name}-{}", time::timestamp_millis()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn saves_png_into_directory() {
        let dir = scratch_dir("library");
        let library = DirectoryLibrary::new(&dir);

        let saved = block_on(library.save_to_library(RgbaImage::new(3, 2))).unwrap();
        let path = saved.to_path().unwrap();
        assert!(path.starts_with(&dir));

        let decoded = image::open(&path).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (3, 2));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn unwritable_target_is_a_write_error() {
        let dir = scratch_dir("blocked");
        // A directory squatting on the file name makes the create fail
        let path = dir.join("IMG_blocked.png");
        fs::create_dir_all(&path).unwrap();

        let result = save_png(&RgbaImage::new(1, 1), &path);
        assert!(matches!(result, Err(MediaError::Write { path: p, .. }) if p == path));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn consecutive_saves_do_not_overwrite() {
        let dir = scratch_dir("unique");
        let library = DirectoryLibrary::new(&dir);

        let a = block_on(library.save_to_library(RgbaImage::new(1, 1))).unwrap();
        let b = block_on(library.save_to_library(RgbaImage::new(1, 1))).unwrap();
        assert_ne!(a, b);
        let _ = fs::remove_dir_all(&dir);
    }
}

use std::collections::HashMap;

use egui::{ColorImage, Context, TextureHandle, TextureOptions};
use image::RgbaImage;
use log::debug;

use crate::error::ImageLoadError;
use crate::image_ref::{ImageRef, ImageResolver};

/// GPU textures for photos and stickers, keyed by image reference
pub struct TextureManager {
    /// Cache of uploaded textures
    texture_cache: HashMap<ImageRef, TextureHandle>,
    /// Tracks when each texture was last used
    last_used: HashMap<ImageRef, u64>,
    /// Current frame counter for LRU tracking
    current_frame: u64,
    /// Maximum number of textures to cache
    max_cache_size: usize,
}

pub fn to_color_image(pixels: &RgbaImage) -> ColorImage {
    let size = [pixels.width() as usize, pixels.height() as usize];
    ColorImage::from_rgba_unmultiplied(size, pixels.as_raw())
}

impl TextureManager {
    /// Creates a new texture manager with the specified cache size
    pub fn new(max_cache_size: usize) -> Self {
        Self {
            texture_cache: HashMap::new(),
            last_used: HashMap::new(),
            current_frame: 0,
            max_cache_size,
        }
    }

    /// Increments the frame counter, should be called at the start of each frame
    pub fn begin_frame(&mut self) {
        self.current_frame += 1;
    }

    /// Gets the texture for `image`, decoding and uploading it on first use
    pub fn get_or_load(
        &mut self,
        ctx: &Context,
        image: &ImageRef,
        resolver: &dyn ImageResolver,
    ) -> Result<TextureHandle, ImageLoadError> {
        if let Some(handle) = self.texture_cache.get(image) {
            self.last_used.insert(image.clone(), self.current_frame);
            return Ok(handle.clone());
        }

        let pixels = resolver.resolve(image)?;
        self.prune_cache_if_needed();

        debug!("Uploading texture for {}", image);
        let handle = ctx.load_texture(image.as_str(), to_color_image(&pixels), TextureOptions::LINEAR);
        self.texture_cache.insert(image.clone(), handle.clone());
        self.last_used.insert(image.clone(), self.current_frame);

        Ok(handle)
    }

    /// Drops the texture for `image`, if cached
    pub fn invalidate(&mut self, image: &ImageRef) {
        self.texture_cache.remove(image);
        self.last_used.remove(image);
    }

    /// Makes room for one more texture by evicting the least recently used ones
    fn prune_cache_if_needed(&mut self) {
        if self.texture_cache.len() < self.max_cache_size {
            return;
        }

        let mut entries: Vec<(ImageRef, u64)> = self
            .last_used
            .iter()
            .map(|(k, v)| (k.clone(), *v))
            .collect();

        // Oldest first
        entries.sort_by_key(|(_, frame)| *frame);

        let to_remove = self.texture_cache.len() + 1 - self.max_cache_size.max(1);
        for (image, _) in entries.into_iter().take(to_remove) {
            self.texture_cache.remove(&image);
            self.last_used.remove(&image);
        }
    }

    /// Returns the number of textures currently in the cache
    pub fn cache_size(&self) -> usize {
        self.texture_cache.len()
    }

    pub fn is_cached(&self, image: &ImageRef) -> bool {
        self.texture_cache.contains_key(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_ref::ImageStore;

    fn store_with(names: &[&str]) -> ImageStore {
        let store = ImageStore::new();
        for name in names {
            store.insert(ImageRef::new(format!("mem://{name}")), RgbaImage::new(2, 2));
        }
        store
    }

    #[test]
    fn test_cache_hit() {
        let ctx = Context::default();
        let store = store_with(&["a"]);
        let mut manager = TextureManager::new(10);
        let image = ImageRef::new("mem://a");

        let first = manager.get_or_load(&ctx, &image, &store).unwrap();
        let second = manager.get_or_load(&ctx, &image, &store).unwrap();

        assert_eq!(first.id(), second.id());
        assert_eq!(manager.cache_size(), 1);
    }

    #[test]
    fn test_missing_image_is_an_error() {
        let ctx = Context::default();
        let store = store_with(&[]);
        let mut manager = TextureManager::new(10);

        let result = manager.get_or_load(&ctx, &ImageRef::new("mem://gone"), &store);
        assert!(result.is_err());
        assert_eq!(manager.cache_size(), 0);
    }

    #[test]
    fn test_invalidation() {
        let ctx = Context::default();
        let store = store_with(&["a"]);
        let mut manager = TextureManager::new(10);
        let image = ImageRef::new("mem://a");

        manager.get_or_load(&ctx, &image, &store).unwrap();
        manager.invalidate(&image);
        assert_eq!(manager.cache_size(), 0);
    }

    #[test]
    fn test_lru_eviction() {
        let ctx = Context::default();
        let store = store_with(&["1", "2", "3"]);
        let mut manager = TextureManager::new(2);
        let [one, two, three] = ["1", "2", "3"].map(|n| ImageRef::new(format!("mem://{n}")));

        manager.get_or_load(&ctx, &one, &store).unwrap();
        manager.begin_frame();
        manager.get_or_load(&ctx, &two, &store).unwrap();
        manager.begin_frame();
        manager.get_or_load(&ctx, &three, &store).unwrap();

        assert_eq!(manager.cache_size(), 2);
        assert!(!manager.is_cached(&one));
        assert!(manager.is_cached(&two));
        assert!(manager.is_cached(&three));
    }
}

//! Screen textures
//!
//! A texture is either one of the builtin device screens (generated from its
//! key) or a custom image pushed by the host. Builtin textures compare by key,
//! custom images by the id assigned when they were decoded.
//!
//! - `import` - decoding host images, encoding canvas snapshots
//! - `builtin` - procedural default screens

mod builtin;
mod import;

pub use builtin::builtin_image;
pub use import::{decode_image, encode_png, probe_dimensions, to_raster_texture};

use image::RgbaImage;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Counter for custom image ids
static CUSTOM_IMAGE_COUNTER: AtomicU64 = AtomicU64::new(1);

/// A decoded host image with a process-unique id
#[derive(Clone)]
pub struct CustomImage {
    id: u64,
    image: Arc<RgbaImage>,
}

impl CustomImage {
    pub fn new(image: RgbaImage) -> Self {
        Self {
            id: CUSTOM_IMAGE_COUNTER.fetch_add(1, Ordering::Relaxed),
            image: Arc::new(image),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Shared handle to the pixels (for background conversion)
    pub fn shared(&self) -> Arc<RgbaImage> {
        Arc::clone(&self.image)
    }
}

impl PartialEq for CustomImage {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for CustomImage {}

impl fmt::Debug for CustomImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CustomImage(#{} {}x{})", self.id, self.image.width(), self.image.height())
    }
}

/// The image mapped onto the device screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextureSource {
    /// A device's default screen, by key
    Builtin(&'static str),
    /// Image received from the host
    Custom(CustomImage),
}

/// Hashable identity of a texture source, for caches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureKey {
    Builtin(&'static str),
    Custom(u64),
}

impl TextureSource {
    pub fn key(&self) -> TextureKey {
        match self {
            TextureSource::Builtin(key) => TextureKey::Builtin(key),
            TextureSource::Custom(image) => TextureKey::Custom(image.id()),
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, TextureSource::Custom(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_images_compare_by_id() {
        let a = CustomImage::new(RgbaImage::new(2, 2));
        let b = CustomImage::new(RgbaImage::new(2, 2));
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
        assert_ne!(TextureSource::Custom(a.clone()).key(), TextureSource::Custom(b).key());
    }

    #[test]
    fn test_builtin_sources_compare_by_key() {
        assert_eq!(TextureSource::Builtin("phone/screen"), TextureSource::Builtin("phone/screen"));
        assert_ne!(TextureSource::Builtin("phone/screen"), TextureSource::Builtin("tablet/screen"));
        assert!(!TextureSource::Builtin("phone/screen").is_custom());
    }
}

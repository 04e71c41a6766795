//! Host image decoding and canvas snapshot encoding

use image::codecs::png::PngEncoder;
use image::{imageops::FilterType, ExtendedColorType, ImageEncoder, RgbaImage};

use crate::error::ImageError;
use crate::rasterizer::Texture;

/// Decode host image bytes (PNG/JPEG/BMP), downscaling so neither edge
/// exceeds `max_size`. Aspect ratio is preserved.
pub fn decode_image(bytes: &[u8], max_size: u32) -> Result<RgbaImage, ImageError> {
    let img = image::load_from_memory(bytes)?.to_rgba8();
    let (width, height) = img.dimensions();

    if width <= max_size && height <= max_size {
        return Ok(img);
    }

    let scale = (max_size as f32 / width as f32).min(max_size as f32 / height as f32);
    let new_w = ((width as f32 * scale).round() as u32).max(1);
    let new_h = ((height as f32 * scale).round() as u32).max(1);
    Ok(image::imageops::resize(&img, new_w, new_h, FilterType::Triangle))
}

/// Convert to the rasterizer's texture format
pub fn to_raster_texture(img: &RgbaImage) -> Texture {
    Texture::from_rgba(img.width() as usize, img.height() as usize, img.as_raw())
}

/// Read the pixel dimensions of a captured frame, rejecting buffers that do
/// not hold exactly `width * height` RGBA pixels
pub fn probe_dimensions(width: u32, height: u32, rgba: &[u8]) -> Result<(u32, u32), ImageError> {
    let expected = width as usize * height as usize * 4;
    if width == 0 || height == 0 || rgba.len() != expected {
        return Err(ImageError::InvalidSnapshot { width, height });
    }
    Ok((width, height))
}

/// Encode RGBA pixels as PNG
pub fn encode_png(width: u32, height: u32, rgba: &[u8]) -> Result<Vec<u8>, ImageError> {
    probe_dimensions(width, height, rgba)?;
    let mut out = Vec::new();
    PngEncoder::new(&mut out)
        .write_image(rgba, width, height, ExtendedColorType::Rgba8)
        .map_err(|e| ImageError::Encode(e.to_string()))?;
    Ok(out)
}

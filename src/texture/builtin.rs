//! Procedural default screens
//!
//! Each builtin key produces a stable wallpaper: a two-tone gradient seeded
//! from the key, a status bar and a grid of app tiles.

use image::{Rgba, RgbaImage};

pub const BUILTIN_WIDTH: u32 = 128;
pub const BUILTIN_HEIGHT: u32 = 256;

/// FNV-1a, used to seed colors from the key
fn hash_key(key: &str) -> u32 {
    key.bytes().fold(0x811c_9dc5u32, |h, b| (h ^ b as u32).wrapping_mul(0x0100_0193))
}

fn hue_to_rgb(hue: f32, sat: f32, val: f32) -> [u8; 3] {
    let h = (hue.rem_euclid(1.0)) * 6.0;
    let c = val * sat;
    let x = c * (1.0 - ((h % 2.0) - 1.0).abs());
    let m = val - c;
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    [((r + m) * 255.0) as u8, ((g + m) * 255.0) as u8, ((b + m) * 255.0) as u8]
}

/// Generate the default screen image for a builtin key
pub fn builtin_image(key: &str) -> RgbaImage {
    let seed = hash_key(key);
    let hue = (seed % 360) as f32 / 360.0;
    let top = hue_to_rgb(hue, 0.55, 0.95);
    let bottom = hue_to_rgb(hue + 0.12, 0.75, 0.45);

    let (w, h) = (BUILTIN_WIDTH, BUILTIN_HEIGHT);
    let mut img = RgbaImage::from_fn(w, h, |_, y| {
        let t = y as f32 / (h - 1) as f32;
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t) as u8;
        Rgba([mix(top[0], bottom[0]), mix(top[1], bottom[1]), mix(top[2], bottom[2]), 255])
    });

    // Status bar
    for y in 0..10 {
        for x in 0..w {
            img.put_pixel(x, y, Rgba([20, 20, 24, 255]));
        }
    }

    // 4x5 grid of app tiles
    let tile = 18;
    let gap = (w - 4 * tile) / 5;
    for row in 0..5 {
        for col in 0..4 {
            let x0 = gap + col * (tile + gap);
            let y0 = 24 + row * (tile + gap + 4);
            let color = hue_to_rgb(hue + 0.5 + (row * 4 + col) as f32 * 0.07, 0.5, 0.98);
            for y in y0..(y0 + tile).min(h) {
                for x in x0..(x0 + tile).min(w) {
                    img.put_pixel(x, y, Rgba([color[0], color[1], color[2], 255]));
                }
            }
        }
    }

    img
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_is_deterministic() {
        let a = builtin_image("iphone-11/screen");
        let b = builtin_image("iphone-11/screen");
        assert_eq!(a.dimensions(), (BUILTIN_WIDTH, BUILTIN_HEIGHT));
        assert_eq!(a.as_raw(), b.as_raw());
    }

    #[test]
    fn test_builtin_keys_differ() {
        let a = builtin_image("iphone-11/screen");
        let b = builtin_image("ipad-pro/screen");
        assert_ne!(a.as_raw(), b.as_raw());
    }
}

//! Core rasterizer data types: colors, textures, vertices, faces, lights

use super::math::{Vec2, Vec3};

/// 8-bit RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);
    pub const TRANSPARENT: Color = Color { r: 0, g: 0, b: 0, a: 0 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }

    /// Multiply RGB by per-channel shade factors (0.0-1.0)
    pub fn shade_rgb(self, r: f32, g: f32, b: f32) -> Self {
        Self {
            r: (self.r as f32 * r.clamp(0.0, 1.0)) as u8,
            g: (self.g as f32 * g.clamp(0.0, 1.0)) as u8,
            b: (self.b as f32 * b.clamp(0.0, 1.0)) as u8,
            a: self.a,
        }
    }

    /// Multiply by another color (tinting)
    pub fn tint(self, other: Color) -> Self {
        Self {
            r: ((self.r as u16 * other.r as u16) / 255) as u8,
            g: ((self.g as u16 * other.g as u16) / 255) as u8,
            b: ((self.b as u16 * other.b as u16) / 255) as u8,
            a: self.a,
        }
    }

    /// Interpolate between two colors
    pub fn lerp(self, other: Color, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Self {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }

    pub fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

/// Simple RGBA texture (array of colors)
#[derive(Debug, Clone)]
pub struct Texture {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<Color>,
}

impl Texture {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::WHITE; width * height],
        }
    }

    /// Build from tightly packed RGBA8 bytes
    pub fn from_rgba(width: usize, height: usize, rgba: &[u8]) -> Self {
        let pixels = rgba
            .chunks_exact(4)
            .map(|p| Color { r: p[0], g: p[1], b: p[2], a: p[3] })
            .collect();
        Self { width, height, pixels }
    }

    /// Sample texture at UV coordinates (nearest, clamped to edges).
    /// v = 0 is the top row.
    pub fn sample(&self, u: f32, v: f32) -> Color {
        if self.width == 0 || self.height == 0 {
            return Color::TRANSPARENT;
        }
        let tx = ((u.clamp(0.0, 1.0) * self.width as f32) as usize).min(self.width - 1);
        let ty = ((v.clamp(0.0, 1.0) * self.height as f32) as usize).min(self.height - 1);
        self.pixels[ty * self.width + tx]
    }
}

/// A vertex with position, texture coordinate, normal, and color
#[derive(Debug, Clone, Copy, Default)]
pub struct Vertex {
    pub pos: Vec3,
    pub uv: Vec2,
    pub normal: Vec3,
    pub color: Color,
}

impl Vertex {
    pub fn new(pos: Vec3, uv: Vec2, normal: Vec3) -> Self {
        Self { pos, uv, normal, color: Color::WHITE }
    }

    pub fn with_color(pos: Vec3, uv: Vec2, normal: Vec3, color: Color) -> Self {
        Self { pos, uv, normal, color }
    }
}

/// Which material a face is drawn with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceMaterial {
    /// Device body, tinted by the model color
    Body,
    /// Screen surface, samples the current texture
    Screen,
}

/// A triangle face (indices into vertex array)
#[derive(Debug, Clone, Copy)]
pub struct Face {
    pub v0: usize,
    pub v1: usize,
    pub v2: usize,
    pub material: FaceMaterial,
}

impl Face {
    pub fn body(v0: usize, v1: usize, v2: usize) -> Self {
        Self { v0, v1, v2, material: FaceMaterial::Body }
    }

    pub fn screen(v0: usize, v1: usize, v2: usize) -> Self {
        Self { v0, v1, v2, material: FaceMaterial::Screen }
    }
}

/// Shading mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShadingMode {
    None,     // Raw texture/vertex colors
    Gouraud,  // Interpolate per-vertex lighting
}

/// Directional light
#[derive(Debug, Clone)]
pub struct Light {
    /// Direction the light travels (normalized)
    pub direction: Vec3,
    pub intensity: f32,
}

impl Light {
    pub fn directional(direction: Vec3, intensity: f32) -> Self {
        Self {
            direction: direction.normalize(),
            intensity,
        }
    }
}

/// Rasterizer settings
#[derive(Debug, Clone)]
pub struct RasterSettings {
    pub shading: ShadingMode,
    pub backface_cull: bool,
    pub lights: Vec<Light>,
    /// Ambient light intensity (0.0-1.0)
    pub ambient: f32,
    /// Vertical focal length in half-viewport units
    pub focal: f32,
    /// Screen surfaces ignore lighting (emissive display)
    pub emissive_screen: bool,
}

impl Default for RasterSettings {
    fn default() -> Self {
        Self {
            shading: ShadingMode::Gouraud,
            backface_cull: true,
            lights: vec![
                Light::directional(Vec3::new(-0.5, -0.6, -1.0), 0.75),
                Light::directional(Vec3::new(0.8, 0.2, -0.4), 0.25),
            ],
            ambient: 0.35,
            focal: 2.4,
            emissive_screen: true,
        }
    }
}

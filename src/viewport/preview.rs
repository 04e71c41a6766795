//! Preset gallery previews
//!
//! Each device has one render key per preset. A key resolves to a small
//! rasterized picture of the device at that preset's angles, showing its
//! default screen. Pictures are rendered on first use and kept.

use std::collections::HashMap;

use macroquad::prelude::{FilterMode, Texture2D};

use crate::catalog::{find_preset_by_index, Device};
use crate::rasterizer::{deg_to_rad, render_mesh, Camera, Color as RasterColor, Framebuffer, MeshPass, RasterSettings, Vec3};
use crate::texture::{builtin_image, to_raster_texture};
use super::mesh::DeviceMesh;
use super::{BACKGROUND_BOTTOM, BACKGROUND_TOP, CAMERA_DISTANCE};

/// Rasterize `device` at preset `index` into a `size`x`size` framebuffer
pub fn render_preview(device: &Device, index: usize, size: usize) -> Framebuffer {
    let preset = find_preset_by_index(index);
    let mesh = DeviceMesh::build(&device.mesh);
    let screen = to_raster_texture(&builtin_image(device.texture));

    let mut camera = Camera::new(CAMERA_DISTANCE);
    camera.orbit(
        deg_to_rad(preset.camera_rotation.x),
        deg_to_rad(preset.camera_rotation.y),
    );

    let mut fb = Framebuffer::new(size, size);
    fb.clear_gradient(BACKGROUND_TOP, BACKGROUND_BOTTOM);
    let rotation = Vec3::new(
        deg_to_rad(preset.device_rotation.x),
        deg_to_rad(preset.device_rotation.y),
        deg_to_rad(preset.device_rotation.z),
    );
    render_mesh(
        &mut fb,
        &MeshPass {
            vertices: &mesh.vertices,
            faces: &mesh.faces,
            rotation,
            body_color: RasterColor::WHITE,
            screen: Some(&screen),
        },
        &camera,
        &RasterSettings::default(),
    );
    fb
}

/// GPU textures for gallery previews, by render key
pub struct PreviewCache {
    size: usize,
    textures: HashMap<&'static str, Texture2D>,
}

impl PreviewCache {
    pub fn new(size: usize) -> Self {
        Self {
            size: size.max(8),
            textures: HashMap::new(),
        }
    }

    /// Preview for `device` at preset `index`. Needs a graphics context.
    pub fn get(&mut self, device: &Device, index: usize) -> &Texture2D {
        let key = device.renders[index];
        let size = self.size;
        self.textures.entry(key).or_insert_with(|| {
            let fb = render_preview(device, index, size);
            log::debug!("rendered preview '{}'", key);
            let texture = Texture2D::from_rgba8(fb.width as u16, fb.height as u16, &fb.pixels);
            texture.set_filter(FilterMode::Nearest);
            texture
        })
    }
}

//! Device definitions
//!
//! Each device names its frame size in the host document, its default screen
//! texture, one preview render per preset and the parameters of its mesh.

use crate::texture::TextureSource;

/// Parameters for the procedural device mesh (world units)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshShape {
    pub body_width: f32,
    pub body_height: f32,
    pub depth: f32,
    pub corner_radius: f32,
    /// Border between the body edge and the screen
    pub bezel: f32,
    /// Segments per rounded corner
    pub corner_segments: usize,
}

/// A device mockup
#[derive(Debug, Clone, PartialEq)]
pub struct Device {
    /// Unique key, shown in the device dropdown
    pub name: &'static str,
    /// Frame size in host document pixels
    pub width: u32,
    pub height: u32,
    /// Builtin key of the default screen texture
    pub texture: &'static str,
    /// Preview render keys, indexed like `PRESETS`
    pub renders: &'static [&'static str],
    pub mesh: MeshShape,
}

impl Device {
    /// The default screen texture as a texture source
    pub fn default_texture(&self) -> TextureSource {
        TextureSource::Builtin(self.texture)
    }
}

pub static DEVICES: &[Device] = &[
    Device {
        name: "iPhone 11",
        width: 414,
        height: 896,
        texture: "iphone-11/screen",
        renders: &[
            "iphone-11/render-0",
            "iphone-11/render-1",
            "iphone-11/render-2",
            "iphone-11/render-3",
            "iphone-11/render-4",
        ],
        mesh: MeshShape {
            body_width: 1.42,
            body_height: 2.9,
            depth: 0.16,
            corner_radius: 0.24,
            bezel: 0.07,
            corner_segments: 6,
        },
    },
    Device {
        name: "Pixel 5",
        width: 393,
        height: 851,
        texture: "pixel-5/screen",
        renders: &[
            "pixel-5/render-0",
            "pixel-5/render-1",
            "pixel-5/render-2",
            "pixel-5/render-3",
            "pixel-5/render-4",
        ],
        mesh: MeshShape {
            body_width: 1.4,
            body_height: 2.92,
            depth: 0.16,
            corner_radius: 0.14,
            bezel: 0.06,
            corner_segments: 4,
        },
    },
    Device {
        name: "iPad Pro 11",
        width: 834,
        height: 1194,
        texture: "ipad-pro-11/screen",
        renders: &[
            "ipad-pro-11/render-0",
            "ipad-pro-11/render-1",
            "ipad-pro-11/render-2",
            "ipad-pro-11/render-3",
            "ipad-pro-11/render-4",
        ],
        mesh: MeshShape {
            body_width: 2.1,
            body_height: 2.95,
            depth: 0.1,
            corner_radius: 0.12,
            bezel: 0.12,
            corner_segments: 4,
        },
    },
];

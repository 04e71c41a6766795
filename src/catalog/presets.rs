//! Angle presets
//!
//! Named device/camera rotations selectable from the preset gallery.
//! The index into `PRESETS` is the preset's identity; device preview renders
//! are stored in the same order.

/// Device rotation in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceRotation {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// Camera rotation in degrees (no roll)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraRotation {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Preset {
    pub label: &'static str,
    pub device_rotation: DeviceRotation,
    pub camera_rotation: CameraRotation,
}

const fn preset(label: &'static str, device: [f32; 3], camera: [f32; 2]) -> Preset {
    Preset {
        label,
        device_rotation: DeviceRotation { x: device[0], y: device[1], z: device[2] },
        camera_rotation: CameraRotation { x: camera[0], y: camera[1] },
    }
}

pub static PRESETS: &[Preset] = &[
    preset("Front", [0.0, 0.0, 0.0], [0.0, 0.0]),
    preset("Angle Left", [8.0, 32.0, -4.0], [-6.0, 0.0]),
    preset("Angle Right", [8.0, -32.0, 4.0], [-6.0, 0.0]),
    preset("Tilt Back", [-28.0, 18.0, 8.0], [-12.0, -10.0]),
    preset("Lay Flat", [-80.0, 0.0, 20.0], [-20.0, 0.0]),
];

/// Look up a preset by gallery index.
///
/// Panics if `index` is out of range: only indices offered by the gallery
/// are valid.
pub fn find_preset_by_index(index: usize) -> &'static Preset {
    match PRESETS.get(index) {
        Some(preset) => preset,
        None => panic!("preset index {} out of range (0..{})", index, PRESETS.len()),
    }
}

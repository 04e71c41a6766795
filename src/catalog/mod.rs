//! Static lookup tables: devices and angle presets

mod devices;
mod presets;

pub use devices::{Device, MeshShape, DEVICES};
pub use presets::{find_preset_by_index, CameraRotation, DeviceRotation, Preset, PRESETS};

use crate::texture::TextureSource;

/// Read-only device table. The first device is the startup default.
#[derive(Debug, Clone, Copy)]
pub struct DeviceCatalog {
    devices: &'static [Device],
}

impl DeviceCatalog {
    /// Wrap a device table. Panics if it is empty.
    pub fn new(devices: &'static [Device]) -> Self {
        assert!(!devices.is_empty(), "device catalog must not be empty");
        Self { devices }
    }

    /// The devices shipped with the panel
    pub fn builtin() -> Self {
        Self::new(DEVICES)
    }

    pub fn devices(&self) -> &'static [Device] {
        self.devices
    }

    pub fn default_device(&self) -> &'static Device {
        &self.devices[0]
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        let devices = self.devices;
        devices.iter().map(|d| d.name)
    }

    /// Look up a device by name.
    ///
    /// Panics if no device has that name: only names offered by the
    /// dropdown are valid.
    pub fn find_device_by_name(&self, name: &str) -> &'static Device {
        match self.devices.iter().find(|d| d.name == name) {
            Some(device) => device,
            None => panic!("unknown device '{}'", name),
        }
    }

    /// True if the texture is some device's default screen
    pub fn is_default_texture(&self, texture: &TextureSource) -> bool {
        match texture {
            TextureSource::Builtin(key) => self.devices.iter().any(|d| d.texture == *key),
            TextureSource::Custom(_) => false,
        }
    }
}

impl Default for DeviceCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

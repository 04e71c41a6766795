//! Panel state
//!
//! The single live copy of everything the user can change. Only the panel
//! controller writes to it; form fields are replaced whole through
//! `FormInput::on_change`.

use crate::catalog::{find_preset_by_index, DeviceCatalog};
use crate::scene::SceneInputs;
use crate::texture::TextureSource;
use crate::ui::FormInput;

pub struct PanelState {
    /// Name of the selected device (always in the catalog)
    pub selected_device: &'static str,
    /// Index of the last applied preset
    pub selected_preset: usize,
    pub texture: TextureSource,
    pub color: FormInput,
    /// Rotate X/Y/Z, degrees as typed
    pub device_rotation: [FormInput; 3],
    /// Rotate X/Y, degrees as typed
    pub camera_rotation: [FormInput; 2],
}

impl PanelState {
    /// Startup state: first device, first preset
    pub fn new(catalog: &DeviceCatalog, color: &str) -> Self {
        let device = catalog.default_device();
        let preset = find_preset_by_index(0);
        let d = preset.device_rotation;
        let c = preset.camera_rotation;
        Self {
            selected_device: device.name,
            selected_preset: 0,
            texture: device.default_texture(),
            color: FormInput::new(color),
            device_rotation: [FormInput::new(d.x), FormInput::new(d.y), FormInput::new(d.z)],
            camera_rotation: [FormInput::new(c.x), FormInput::new(c.y)],
        }
    }

    /// Snapshot of the inputs the scene depends on
    pub fn scene_inputs(&self) -> SceneInputs {
        let [dx, dy, dz] = &self.device_rotation;
        let [cx, cy] = &self.camera_rotation;
        SceneInputs {
            device: self.selected_device,
            device_rotation: [dx.value.clone(), dy.value.clone(), dz.value.clone()],
            camera_rotation: [cx.value.clone(), cy.value.clone()],
            color: self.color.value.clone(),
            texture: self.texture.clone(),
        }
    }
}

/// Transient message at the bottom of the sidebar
#[derive(Debug, Clone, Default)]
pub struct StatusLine {
    message: Option<(String, f64, bool)>, // (message, expiry_time, is_error)
}

impl StatusLine {
    /// Show `message` until `now + duration_secs`
    pub fn set(&mut self, message: &str, now: f64, duration_secs: f64, is_error: bool) {
        self.message = Some((message.to_string(), now + duration_secs, is_error));
    }

    /// Current message if not expired, with its error flag
    pub fn get(&self, now: f64) -> Option<(&str, bool)> {
        match &self.message {
            Some((msg, expiry, is_error)) if now < *expiry => Some((msg, *is_error)),
            _ => None,
        }
    }
}

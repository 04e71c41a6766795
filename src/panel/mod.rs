//! Panel controller
//!
//! Owns the panel state and is the only thing that changes it. User actions
//! from the layout, host events from the bridge and per-frame updates all go
//! through here, then the scene is recomposed (if anything it depends on
//! changed) and handed to the viewport.

mod layout;
mod state;

pub use layout::{draw_panel, PanelAction, PanelLayout};
pub use state::{PanelState, StatusLine};

use log::{info, warn};

use crate::catalog::{find_preset_by_index, DeviceCatalog};
use crate::config::PanelConfig;
use crate::error::HostError;
use crate::host::{BridgeEvent, HostBridge, HostTransport};
use crate::scene::SceneComposer;
use crate::texture::TextureSource;
use crate::ui::ChangeEvent;
use crate::viewport::{ModelViewport, PreviewCache};

pub struct Panel {
    catalog: DeviceCatalog,
    state: PanelState,
    composer: SceneComposer,
    viewport: ModelViewport,
    previews: PreviewCache,
    bridge: HostBridge,
    status: StatusLine,
    status_seconds: f64,
}

impl Panel {
    /// Build the panel and subscribe to the host
    pub fn new(config: &PanelConfig, transport: Box<dyn HostTransport>) -> Result<Self, HostError> {
        let catalog = DeviceCatalog::builtin();
        let mut bridge = HostBridge::new(transport, config.decode_order, config.max_texture_size);
        bridge.subscribe()?;

        Ok(Self {
            catalog,
            state: PanelState::new(&catalog, &config.default_color),
            composer: SceneComposer::new(catalog),
            viewport: ModelViewport::new(config.viewport_width, config.viewport_height),
            previews: PreviewCache::new(config.thumbnail_size),
            bridge,
            status: StatusLine::default(),
            status_seconds: config.status_seconds,
        })
    }

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    pub fn viewport(&self) -> &ModelViewport {
        &self.viewport
    }

    /// Current status message, if any
    pub fn status(&self, now: f64) -> Option<(&str, bool)> {
        self.status.get(now)
    }

    fn set_status(&mut self, message: &str, now: f64, is_error: bool) {
        self.status.set(message, now, self.status_seconds, is_error);
    }

    /// Switch devices. A texture that is some device's default follows the
    /// new device; a custom texture is kept.
    ///
    /// Panics if `name` is not in the catalog.
    pub fn select_device(&mut self, name: &str) {
        let device = self.catalog.find_device_by_name(name);
        if self.catalog.is_default_texture(&self.state.texture) {
            self.state.texture = device.default_texture();
        }
        if self.state.selected_device != device.name {
            info!("device: {}", device.name);
        }
        self.state.selected_device = device.name;
    }

    /// Apply a preset: all six angle fields take the preset's values.
    ///
    /// Panics if `index` is out of range.
    pub fn select_preset(&mut self, index: usize) {
        let preset = find_preset_by_index(index);
        let d = preset.device_rotation;
        let c = preset.camera_rotation;

        for (field, value) in self.state.device_rotation.iter_mut().zip([d.x, d.y, d.z]) {
            field.on_change(ChangeEvent::new(value.to_string()));
        }
        for (field, value) in self.state.camera_rotation.iter_mut().zip([c.x, c.y]) {
            field.on_change(ChangeEvent::new(value.to_string()));
        }
        self.state.selected_preset = index;
        info!("preset: {}", preset.label);
    }

    /// React to one host event
    pub fn handle_event(&mut self, event: BridgeEvent, now: f64) {
        match event {
            BridgeEvent::ResetTexture => {
                let device = self.catalog.find_device_by_name(self.state.selected_device);
                self.state.texture = device.default_texture();
            }
            BridgeEvent::TextureDecoded(image) => {
                self.state.texture = TextureSource::Custom(image);
            }
            BridgeEvent::ImageSaved { name } => {
                self.set_status(&format!("Saved image of {}", name), now, false);
            }
            BridgeEvent::Failed(message) => {
                self.set_status(&message, now, true);
            }
        }
    }

    /// Ask the host for an empty frame sized like the selected device
    pub fn create_empty_frame(&mut self, now: f64) {
        let device = self.catalog.find_device_by_name(self.state.selected_device);
        match self.bridge.create_empty_frame(device.name, device.width, device.height) {
            Ok(()) => self.set_status(&format!("Sent {} frame request", device.name), now, false),
            Err(e) => self.set_status(&e.to_string(), now, true),
        }
    }

    /// Capture the viewport and send it to the host once encoded. Nothing
    /// is sent while the viewport has no frame.
    pub fn save_canvas_image(&mut self, now: f64) {
        let device = self.catalog.find_device_by_name(self.state.selected_device);
        match self.viewport.capture() {
            Ok(snapshot) => self.bridge.save_canvas_image(device.name, snapshot),
            Err(e) => {
                warn!("save-canvas-image for '{}' not sent: {}", device.name, e);
                self.set_status(&e.to_string(), now, true);
            }
        }
    }

    pub fn apply(&mut self, action: PanelAction, now: f64) {
        match action {
            PanelAction::SelectDevice(index) => {
                let Some(device) = self.catalog.devices().get(index) else {
                    warn!("device index {} out of range", index);
                    return;
                };
                self.select_device(device.name);
            }
            PanelAction::SelectPreset(index) => self.select_preset(index),
            PanelAction::CreateEmptyFrame => self.create_empty_frame(now),
            PanelAction::SaveImage => self.save_canvas_image(now),
        }
    }

    /// Per-frame work: host events, recomposition, viewport render
    pub fn update(&mut self, dt: f32, now: f64) {
        for event in self.bridge.poll() {
            self.handle_event(event, now);
        }

        let inputs = self.state.scene_inputs();
        self.composer.scene(&inputs);
        let generation = self.composer.generation();
        if let Some(scene) = self.composer.current() {
            self.viewport.update(scene, generation, dt);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{DEVICES, PRESETS};
    use crate::config::DecodeOrder;
    use crate::host::{ChannelTransport, HostEndpoint, InboundMessage, OutboundEnvelope, OutboundMessage};
    use crate::rasterizer::deg_to_rad;
    use crate::texture::{encode_png, CustomImage};
    use crate::viewport::ViewportStatus;
    use std::time::{Duration, Instant};

    fn panel() -> (Panel, HostEndpoint) {
        let (transport, host) = ChannelTransport::pair();
        let config = PanelConfig {
            viewport_width: 32,
            viewport_height: 32,
            ..PanelConfig::default()
        };
        (Panel::new(&config, Box::new(transport)).unwrap(), host)
    }

    fn custom_texture() -> TextureSource {
        TextureSource::Custom(CustomImage::new(image::RgbaImage::new(2, 2)))
    }

    /// Update until the viewport has a picture and the host bridge is idle
    fn settle(panel: &mut Panel) {
        let start = Instant::now();
        loop {
            panel.update(0.016, 0.0);
            if panel.viewport.status() == ViewportStatus::Ready && !panel.bridge.is_busy() {
                break;
            }
            assert!(start.elapsed() < Duration::from_secs(10), "panel never settled");
            std::thread::sleep(Duration::from_millis(1));
        }
    }

    #[test]
    fn test_default_texture_follows_device() {
        for from in DEVICES {
            for to in DEVICES {
                let (mut panel, _host) = panel();
                panel.select_device(from.name);
                assert_eq!(panel.state().texture, from.default_texture());
                panel.select_device(to.name);
                assert_eq!(panel.state().texture, to.default_texture());
            }
        }
    }

    #[test]
    fn test_any_device_default_follows_device() {
        let (mut panel, _host) = panel();
        panel.state.texture = DEVICES[2].default_texture();
        panel.select_device(DEVICES[1].name);
        assert_eq!(panel.state().texture, DEVICES[1].default_texture());
    }

    #[test]
    fn test_custom_texture_survives_device_switch() {
        let (mut panel, _host) = panel();
        let custom = custom_texture();
        panel.state.texture = custom.clone();
        for device in DEVICES {
            panel.select_device(device.name);
            assert_eq!(panel.state().texture, custom);
        }
    }

    #[test]
    #[should_panic(expected = "unknown device")]
    fn test_unknown_device_panics() {
        let (mut panel, _host) = panel();
        panel.select_device("Nokia 3310");
    }

    #[test]
    fn test_preset_sets_all_six_fields() {
        let (mut panel, _host) = panel();
        for (i, preset) in PRESETS.iter().enumerate() {
            panel.select_preset(i);
            let state = panel.state();
            assert_eq!(state.selected_preset, i);

            let d = preset.device_rotation;
            let c = preset.camera_rotation;
            let device: Vec<f32> = state.device_rotation.iter().map(|f| f.as_f32()).collect();
            let camera: Vec<f32> = state.camera_rotation.iter().map(|f| f.as_f32()).collect();
            assert_eq!(device, vec![d.x, d.y, d.z]);
            assert_eq!(camera, vec![c.x, c.y]);

            panel.update(0.016, 0.0);
            let scene = panel.composer.current().unwrap();
            assert_eq!(scene.camera_rotation.x, deg_to_rad(c.x));
            assert_eq!(scene.camera_rotation.y, deg_to_rad(c.y));
            assert_eq!(scene.models[0].rotation.x, deg_to_rad(d.x));
            assert_eq!(scene.models[0].rotation.y, deg_to_rad(d.y));
            assert_eq!(scene.models[0].rotation.z, deg_to_rad(d.z));
        }
    }

    #[test]
    fn test_edited_angles_survive_device_switch() {
        let (mut panel, _host) = panel();
        panel.select_preset(2);
        panel.state.device_rotation[0].on_change(ChangeEvent::new("45"));
        panel.select_device(DEVICES[1].name);
        assert_eq!(panel.state().device_rotation[0].value, "45");

        panel.select_preset(2);
        assert_eq!(panel.state().device_rotation[0].as_f32(), PRESETS[2].device_rotation.x);
    }

    #[test]
    fn test_unchanged_state_does_not_rerender() {
        let (mut panel, _host) = panel();
        settle(&mut panel);
        let renders = panel.viewport().render_count();
        let generation = panel.composer.generation();

        for _ in 0..3 {
            panel.update(0.016, 0.0);
        }
        assert_eq!(panel.viewport().render_count(), renders);
        assert_eq!(panel.composer.generation(), generation);

        panel.state.color.on_change(ChangeEvent::new("#123456"));
        panel.update(0.016, 0.0);
        assert_eq!(panel.viewport().render_count(), renders + 1);
    }

    #[test]
    fn test_host_reset_restores_current_default() {
        let (mut panel, host) = panel();
        panel.select_device(DEVICES[1].name);
        panel.state.texture = custom_texture();

        host.send(&InboundMessage::Reset).unwrap();
        panel.update(0.016, 0.0);
        assert_eq!(panel.state().texture, DEVICES[1].default_texture());
    }

    #[test]
    fn test_host_image_becomes_texture() {
        let (mut panel, host) = panel();
        let png = encode_png(2, 2, &[9; 16]).unwrap();
        host.send(&InboundMessage::Image(png)).unwrap();
        settle(&mut panel);

        match &panel.state().texture {
            TextureSource::Custom(image) => assert_eq!(image.image().dimensions(), (2, 2)),
            other => panic!("expected custom texture, got {:?}", other),
        }
        // Device switches keep it
        panel.select_device(DEVICES[2].name);
        assert!(panel.state().texture.is_custom());
    }

    #[test]
    fn test_create_empty_frame_uses_device_size() {
        let (mut panel, host) = panel();
        panel.select_device(DEVICES[1].name);
        panel.apply(PanelAction::CreateEmptyFrame, 0.0);
        assert_eq!(
            host.drain().unwrap(),
            vec![OutboundEnvelope::new(OutboundMessage::CreateEmptyFrame {
                name: DEVICES[1].name.to_string(),
                width: DEVICES[1].width,
                height: DEVICES[1].height,
            })]
        );
        let expected = format!("Sent {} frame request", DEVICES[1].name);
        assert_eq!(panel.status(0.0), Some((expected.as_str(), false)));
    }

    #[test]
    fn test_save_image_sends_viewport_snapshot() {
        let (mut panel, host) = panel();
        settle(&mut panel);
        panel.apply(PanelAction::SaveImage, 0.0);
        settle(&mut panel);

        let sent = host.drain().unwrap();
        assert_eq!(sent.len(), 1);
        match &sent[0].plugin_message {
            OutboundMessage::SaveCanvasImage { name, width, height, blob } => {
                assert_eq!(name, DEVICES[0].name);
                assert_eq!((*width, *height), (32, 32));
                assert!(!blob.is_empty());
            }
            other => panic!("unexpected message {:?}", other),
        }
        assert_eq!(panel.status(0.0).map(|(_, error)| error), Some(false));
    }

    #[test]
    fn test_save_before_first_render_sends_nothing() {
        let (mut panel, host) = panel();
        panel.apply(PanelAction::SaveImage, 0.0);
        assert!(!panel.bridge.is_busy());
        assert!(host.drain().unwrap().is_empty());
        assert_eq!(panel.status(0.0).map(|(_, error)| error), Some(true));
    }

    #[test]
    fn test_last_finished_decode_wins_in_completion_order() {
        let (transport, host) = ChannelTransport::pair();
        let config = PanelConfig {
            viewport_width: 32,
            viewport_height: 32,
            decode_order: DecodeOrder::CompletionOrder,
            ..PanelConfig::default()
        };
        let mut panel = Panel::new(&config, Box::new(transport)).unwrap();
        host.send(&InboundMessage::Image(encode_png(64, 64, &[10; 64 * 64 * 4]).unwrap())).unwrap();
        host.send(&InboundMessage::Image(encode_png(2, 2, &[20; 16]).unwrap())).unwrap();

        let start = Instant::now();
        let mut finished = Vec::new();
        loop {
            for event in panel.bridge.poll() {
                if let BridgeEvent::TextureDecoded(image) = &event {
                    finished.push(image.clone());
                }
                panel.handle_event(event, 0.0);
            }
            if !panel.bridge.is_busy() {
                break;
            }
            assert!(start.elapsed() < Duration::from_secs(10), "decodes never finished");
            std::thread::sleep(Duration::from_millis(1));
        }

        assert_eq!(finished.len(), 2);
        assert_eq!(panel.state().texture, TextureSource::Custom(finished[1].clone()));
    }

    #[test]
    fn test_second_subscription_is_rejected() {
        let (mut panel, _host) = panel();
        assert!(matches!(panel.bridge.subscribe(), Err(HostError::AlreadySubscribed)));
    }
}

//! Model viewport
//!
//! Renders the composed scene with the software rasterizer. The framebuffer
//! is only redrawn when the scene generation changes or a texture finishes
//! loading; the GPU copy used for display is refreshed after that.
//!
//! Textures are converted on a background thread the first time a scene
//! uses them. Until the current one is ready the viewport is `Loading` and
//! draws a spinner instead of the model.

mod mesh;
mod preview;
mod transition;

pub use mesh::DeviceMesh;
pub use preview::{render_preview, PreviewCache};
pub use transition::ViewportTransition;

use std::collections::HashMap;

use log::{debug, warn};
use macroquad::prelude::{draw_texture_ex, Color as UiColor, DrawTextureParams, FilterMode, Texture2D, vec2};

use crate::async_ops::AsyncOp;
use crate::error::ImageError;
use crate::rasterizer::{render_mesh, Camera, Color as RasterColor, Framebuffer, MeshPass, RasterSettings, Texture, Vec3};
use crate::scene::SceneDescription;
use crate::texture::{builtin_image, to_raster_texture, TextureKey, TextureSource};
use crate::ui::{spinner, Rect};

pub const CAMERA_DISTANCE: f32 = 5.0;
pub(crate) const BACKGROUND_TOP: RasterColor = RasterColor::new(44, 44, 50);
pub(crate) const BACKGROUND_BOTTOM: RasterColor = RasterColor::new(24, 24, 28);

/// A captured frame: raw RGBA rows, top to bottom
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanvasSnapshot {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewportStatus {
    /// Waiting for the scene's texture
    Loading,
    Ready,
}

/// Parse `#RGB` or `#RRGGBB` (case-insensitive)
pub fn parse_hex_color(text: &str) -> Option<RasterColor> {
    let hex = text.trim().strip_prefix('#')?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        3 => {
            let mut rgb = [0u8; 3];
            for (i, c) in hex.chars().enumerate() {
                let v = c.to_digit(16)? as u8;
                rgb[i] = v * 17;
            }
            Some(RasterColor::new(rgb[0], rgb[1], rgb[2]))
        }
        6 => Some(RasterColor::new(channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?)),
        _ => None,
    }
}

/// Angles the rasterizer can use: non-finite values keep the previous one
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct StableAngles {
    device: [f32; 3],
    camera: [f32; 2],
}

impl StableAngles {
    fn absorb(&mut self, scene: &SceneDescription) {
        let keep = |slot: &mut f32, value: f32| {
            if value.is_finite() {
                *slot = value;
            }
        };
        keep(&mut self.camera[0], scene.camera_rotation.x);
        keep(&mut self.camera[1], scene.camera_rotation.y);
        if let Some(model) = scene.models.first() {
            keep(&mut self.device[0], model.rotation.x);
            keep(&mut self.device[1], model.rotation.y);
            keep(&mut self.device[2], model.rotation.z);
        }
    }
}

fn convert(source: &TextureSource) -> AsyncOp<Texture> {
    match source {
        TextureSource::Builtin(key) => {
            let key: &'static str = *key;
            AsyncOp::spawn(move || Ok(to_raster_texture(&builtin_image(key))))
        }
        TextureSource::Custom(image) => {
            let pixels = image.shared();
            AsyncOp::spawn(move || Ok(to_raster_texture(&pixels)))
        }
    }
}

pub struct ModelViewport {
    fb: Framebuffer,
    camera: Camera,
    settings: RasterSettings,
    meshes: HashMap<&'static str, DeviceMesh>,
    textures: HashMap<TextureKey, Texture>,
    pending: HashMap<TextureKey, AsyncOp<Texture>>,
    angles: StableAngles,
    color: RasterColor,
    status: ViewportStatus,
    /// Scene generation currently in the framebuffer
    rendered_generation: Option<u64>,
    /// The current scene's texture landed since the last render
    dirty: bool,
    render_count: u64,
    transition: ViewportTransition,
    gpu: Option<Texture2D>,
    gpu_stale: bool,
}

impl ModelViewport {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            fb: Framebuffer::new(width.max(1), height.max(1)),
            camera: Camera::new(CAMERA_DISTANCE),
            settings: RasterSettings::default(),
            meshes: HashMap::new(),
            textures: HashMap::new(),
            pending: HashMap::new(),
            angles: StableAngles::default(),
            color: RasterColor::WHITE,
            status: ViewportStatus::Loading,
            rendered_generation: None,
            dirty: false,
            render_count: 0,
            transition: ViewportTransition::new(),
            gpu: None,
            gpu_stale: false,
        }
    }

    pub fn status(&self) -> ViewportStatus {
        self.status
    }

    /// Number of framebuffer renders so far
    pub fn render_count(&self) -> u64 {
        self.render_count
    }

    /// Color the body is currently drawn with
    pub fn body_color(&self) -> RasterColor {
        self.color
    }

    /// Collect finished texture conversions. Only `current` marks the
    /// frame dirty; custom images nothing shows any more are dropped.
    fn poll_textures(&mut self, current: TextureKey) {
        self.pending
            .retain(|k, _| matches!(k, TextureKey::Builtin(_)) || *k == current);

        let done: Vec<TextureKey> = self
            .pending
            .iter_mut()
            .filter_map(|(key, op)| op.is_complete().then_some(*key))
            .collect();

        for key in done {
            let Some(op) = self.pending.remove(&key) else {
                continue;
            };
            let texture = match op.take() {
                Some(Ok(texture)) => texture,
                Some(Err(e)) => {
                    warn!("texture {:?} failed to load: {}", key, e);
                    Texture::new(1, 1)
                }
                None => continue,
            };
            debug!("texture {:?} ready ({}x{})", key, texture.width, texture.height);
            self.textures.insert(key, texture);
            if key == current {
                self.dirty = true;
            }
        }
    }

    /// Bring the framebuffer up to date with `scene`. Returns true if it
    /// was re-rendered.
    pub fn update(&mut self, scene: &SceneDescription, generation: u64, dt: f32) -> bool {
        let Some(model) = scene.models.first() else {
            return false;
        };
        self.transition.update(model.device.name, dt);
        let key = model.texture.key();
        self.poll_textures(key);

        if !self.textures.contains_key(&key) {
            if !self.pending.contains_key(&key) {
                debug!("loading texture {:?}", key);
                self.pending.insert(key, convert(&model.texture));
            }
            self.status = ViewportStatus::Loading;
            return false;
        }
        self.status = ViewportStatus::Ready;

        if self.rendered_generation == Some(generation) && !self.dirty {
            return false;
        }

        // Only the current custom image is worth keeping
        self.textures
            .retain(|k, _| matches!(k, TextureKey::Builtin(_)) || *k == key);

        self.render(scene);
        self.rendered_generation = Some(generation);
        self.dirty = false;
        true
    }

    fn render(&mut self, scene: &SceneDescription) {
        let Some(model) = scene.models.first() else {
            return;
        };

        self.angles.absorb(scene);
        if let Some(color) = parse_hex_color(&model.color) {
            self.color = color;
        }

        let [cx, cy] = self.angles.camera;
        self.camera.orbit(cx, cy);

        let [rx, ry, rz] = self.angles.device;
        let mesh = self
            .meshes
            .entry(model.device.name)
            .or_insert_with(|| DeviceMesh::build(&model.device.mesh));

        self.fb.clear_gradient(BACKGROUND_TOP, BACKGROUND_BOTTOM);
        let stats = render_mesh(
            &mut self.fb,
            &MeshPass {
                vertices: &mesh.vertices,
                faces: &mesh.faces,
                rotation: Vec3::new(rx, ry, rz),
                body_color: self.color,
                screen: self.textures.get(&model.texture.key()),
            },
            &self.camera,
            &self.settings,
        );

        self.render_count += 1;
        self.gpu_stale = true;
        debug!(
            "viewport render #{}: {} triangles, {} culled",
            self.render_count, stats.triangles_drawn, stats.triangles_culled
        );
    }

    /// Copy of the last rendered frame. Fails until the first render.
    pub fn capture(&self) -> Result<CanvasSnapshot, ImageError> {
        if self.rendered_generation.is_none() {
            return Err(ImageError::NotRendered);
        }
        Ok(CanvasSnapshot {
            width: self.fb.width as u32,
            height: self.fb.height as u32,
            rgba: self.fb.pixels.clone(),
        })
    }

    /// Draw into `rect`, letterboxed to keep the framebuffer's aspect
    pub fn draw(&mut self, rect: Rect, time: f64) {
        if self.status == ViewportStatus::Loading && self.gpu.is_none() {
            spinner(rect, time);
            return;
        }

        // Hold the old picture while fading out
        if self.gpu_stale && !self.transition.is_exiting() {
            let texture = Texture2D::from_rgba8(self.fb.width as u16, self.fb.height as u16, &self.fb.pixels);
            texture.set_filter(FilterMode::Nearest);
            self.gpu = Some(texture);
            self.gpu_stale = false;
        }

        if let Some(texture) = &self.gpu {
            let scale = (rect.w / self.fb.width as f32).min(rect.h / self.fb.height as f32);
            let (w, h) = (self.fb.width as f32 * scale, self.fb.height as f32 * scale);
            draw_texture_ex(
                texture,
                rect.center_x() - w * 0.5,
                rect.center_y() - h * 0.5,
                UiColor::new(1.0, 1.0, 1.0, self.transition.alpha()),
                DrawTextureParams {
                    dest_size: Some(vec2(w, h)),
                    ..Default::default()
                },
            );
        }

        if self.status == ViewportStatus::Loading {
            spinner(rect, time);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{DeviceCatalog, DEVICES};
    use crate::scene::{SceneComposer, SceneInputs};
    use crate::texture::CustomImage;
    use std::time::{Duration, Instant};

    fn inputs() -> SceneInputs {
        SceneInputs {
            device: DEVICES[0].name,
            device_rotation: ["0".into(), "20".into(), "0".into()],
            camera_rotation: ["0".into(), "0".into()],
            color: "#FFFFFF".into(),
            texture: DEVICES[0].default_texture(),
        }
    }

    /// Update until the texture is ready; returns how many renders happened
    fn settle(viewport: &mut ModelViewport, composer: &mut SceneComposer, inputs: &SceneInputs) -> u64 {
        let before = viewport.render_count();
        let start = Instant::now();
        loop {
            let scene = composer.scene(inputs).clone();
            viewport.update(&scene, composer.generation(), 0.016);
            if viewport.status() == ViewportStatus::Ready {
                break;
            }
            assert!(start.elapsed() < Duration::from_secs(10), "texture never loaded");
            std::thread::sleep(Duration::from_millis(1));
        }
        viewport.render_count() - before
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#FFFFFF"), Some(RasterColor::WHITE));
        assert_eq!(parse_hex_color("#f00"), Some(RasterColor::new(255, 0, 0)));
        assert_eq!(parse_hex_color(" #102030 "), Some(RasterColor::new(0x10, 0x20, 0x30)));
        assert_eq!(parse_hex_color("FFFFFF"), None);
        assert_eq!(parse_hex_color("#GGGGGG"), None);
        assert_eq!(parse_hex_color("#12345"), None);
    }

    #[test]
    fn test_loading_until_texture_ready() {
        let mut viewport = ModelViewport::new(32, 32);
        let mut composer = SceneComposer::new(DeviceCatalog::builtin());
        let scene = composer.scene(&inputs()).clone();
        assert!(!viewport.update(&scene, composer.generation(), 0.016));
        assert_eq!(viewport.status(), ViewportStatus::Loading);

        assert_eq!(settle(&mut viewport, &mut composer, &inputs()), 1);
    }

    #[test]
    fn test_no_rerender_without_changes() {
        let mut viewport = ModelViewport::new(32, 32);
        let mut composer = SceneComposer::new(DeviceCatalog::builtin());
        settle(&mut viewport, &mut composer, &inputs());
        let count = viewport.render_count();

        for _ in 0..5 {
            let scene = composer.scene(&inputs()).clone();
            assert!(!viewport.update(&scene, composer.generation(), 0.016));
        }
        assert_eq!(viewport.render_count(), count);

        let mut changed = inputs();
        changed.color = "#FF0000".into();
        let scene = composer.scene(&changed).clone();
        assert!(viewport.update(&scene, composer.generation(), 0.016));
        assert_eq!(viewport.render_count(), count + 1);
    }

    #[test]
    fn test_abandoned_texture_does_not_rerender() {
        let mut viewport = ModelViewport::new(32, 32);
        let mut composer = SceneComposer::new(DeviceCatalog::builtin());
        let mut custom = inputs();
        let big = image::RgbaImage::from_pixel(1024, 1024, image::Rgba([0, 0, 255, 255]));
        custom.texture = TextureSource::Custom(CustomImage::new(big));
        let scene = composer.scene(&custom).clone();
        assert!(!viewport.update(&scene, composer.generation(), 0.016));

        // Host reset before the conversion finished
        settle(&mut viewport, &mut composer, &inputs());
        assert!(viewport.pending.keys().all(|k| matches!(k, TextureKey::Builtin(_))));
        let renders = viewport.render_count();

        for _ in 0..50 {
            let scene = composer.scene(&inputs()).clone();
            assert!(!viewport.update(&scene, composer.generation(), 0.016));
            std::thread::sleep(Duration::from_millis(2));
        }
        assert_eq!(viewport.render_count(), renders);
        assert!(viewport.textures.keys().all(|k| matches!(k, TextureKey::Builtin(_))));
    }

    #[test]
    fn test_capture_fails_before_first_render() {
        let mut viewport = ModelViewport::new(16, 16);
        assert_eq!(viewport.capture(), Err(ImageError::NotRendered));

        let mut composer = SceneComposer::new(DeviceCatalog::builtin());
        settle(&mut viewport, &mut composer, &inputs());
        let snapshot = viewport.capture().unwrap();
        assert_eq!(snapshot.rgba.len(), 16 * 16 * 4);
    }

    #[test]
    fn test_nan_angle_keeps_previous_pose() {
        let mut viewport = ModelViewport::new(48, 48);
        let mut composer = SceneComposer::new(DeviceCatalog::builtin());
        settle(&mut viewport, &mut composer, &inputs());
        let before = viewport.capture().unwrap();

        let mut broken = inputs();
        broken.device_rotation[1] = "abc".into();
        settle(&mut viewport, &mut composer, &broken);
        assert_eq!(viewport.capture().unwrap(), before);
    }

    #[test]
    fn test_invalid_color_keeps_previous_color() {
        let mut viewport = ModelViewport::new(16, 16);
        let mut composer = SceneComposer::new(DeviceCatalog::builtin());
        let mut input = inputs();
        input.color = "#00FF00".into();
        settle(&mut viewport, &mut composer, &input);

        input.color = "green-ish".into();
        settle(&mut viewport, &mut composer, &input);
        assert_eq!(viewport.body_color(), RasterColor::new(0, 255, 0));
    }

    #[test]
    fn test_custom_texture_shows_on_screen() {
        let mut viewport = ModelViewport::new(64, 64);
        let mut composer = SceneComposer::new(DeviceCatalog::builtin());
        let mut input = inputs();
        input.device_rotation = ["0".into(), "0".into(), "0".into()];
        let red = image::RgbaImage::from_pixel(4, 4, image::Rgba([255, 0, 0, 255]));
        input.texture = TextureSource::Custom(CustomImage::new(red));
        settle(&mut viewport, &mut composer, &input);

        let snapshot = viewport.capture().unwrap();
        assert_eq!((snapshot.width, snapshot.height), (64, 64));
        let center = ((32 * 64 + 32) * 4) as usize;
        assert_eq!(&snapshot.rgba[center..center + 4], &[255, 0, 0, 255]);
    }
}

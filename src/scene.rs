//! Scene composition
//!
//! `compose` turns the panel's current inputs into the description the
//! viewport renders. `SceneComposer` memoizes it: the description is only
//! rebuilt (and the generation bumped) when one of the inputs changed.

use crate::catalog::{Device, DeviceCatalog};
use crate::rasterizer::deg_to_rad;
use crate::texture::TextureSource;

/// Everything the scene depends on, exactly as the panel holds it.
/// Angles stay as the text the user typed so that equality is textual.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneInputs {
    pub device: &'static str,
    /// Device rotation X/Y/Z, degrees
    pub device_rotation: [String; 3],
    /// Camera rotation X/Y, degrees
    pub camera_rotation: [String; 2],
    pub color: String,
    pub texture: TextureSource,
}

/// Euler angles in radians
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelEntry {
    pub device: &'static Device,
    pub rotation: Rotation,
    pub color: String,
    pub texture: TextureSource,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneDescription {
    pub camera_rotation: Rotation,
    pub models: Vec<ModelEntry>,
}

/// Numeric reading of an angle field; NaN if it is not a number
pub fn parse_degrees(text: &str) -> f32 {
    text.trim().parse().unwrap_or(f32::NAN)
}

fn radians(text: &str) -> f32 {
    deg_to_rad(parse_degrees(text))
}

/// Build the scene for `inputs`. Pure: same inputs, same description.
///
/// Panics if `inputs.device` is not in the catalog.
pub fn compose(inputs: &SceneInputs, catalog: &DeviceCatalog) -> SceneDescription {
    let device = catalog.find_device_by_name(inputs.device);
    let [dx, dy, dz] = &inputs.device_rotation;
    let [cx, cy] = &inputs.camera_rotation;

    SceneDescription {
        // No camera roll
        camera_rotation: Rotation { x: radians(cx), y: radians(cy), z: 0.0 },
        models: vec![ModelEntry {
            device,
            rotation: Rotation { x: radians(dx), y: radians(dy), z: radians(dz) },
            color: inputs.color.clone(),
            texture: inputs.texture.clone(),
        }],
    }
}

/// Memoized `compose`
pub struct SceneComposer {
    catalog: DeviceCatalog,
    cached: Option<(SceneInputs, SceneDescription)>,
    generation: u64,
}

impl SceneComposer {
    pub fn new(catalog: DeviceCatalog) -> Self {
        Self {
            catalog,
            cached: None,
            generation: 0,
        }
    }

    /// Scene for `inputs`, recomposed only if they differ from last time
    pub fn scene(&mut self, inputs: &SceneInputs) -> &SceneDescription {
        let (_, scene) = match self.cached.take() {
            Some((cached, scene)) if cached == *inputs => self.cached.insert((cached, scene)),
            _ => {
                let scene = compose(inputs, &self.catalog);
                self.generation += 1;
                log::debug!("scene recomposed (generation {})", self.generation);
                self.cached.insert((inputs.clone(), scene))
            }
        };
        scene
    }

    /// Last composed scene
    pub fn current(&self) -> Option<&SceneDescription> {
        self.cached.as_ref().map(|(_, scene)| scene)
    }

    /// Increments once per recomposition
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{find_preset_by_index, DEVICES, PRESETS};

    fn inputs(preset: usize) -> SceneInputs {
        let p = find_preset_by_index(preset);
        SceneInputs {
            device: DEVICES[0].name,
            device_rotation: [
                p.device_rotation.x.to_string(),
                p.device_rotation.y.to_string(),
                p.device_rotation.z.to_string(),
            ],
            camera_rotation: [p.camera_rotation.x.to_string(), p.camera_rotation.y.to_string()],
            color: "#FFFFFF".into(),
            texture: DEVICES[0].default_texture(),
        }
    }

    #[test]
    fn test_compose_converts_degrees() {
        let catalog = DeviceCatalog::builtin();
        for (i, preset) in PRESETS.iter().enumerate() {
            let scene = compose(&inputs(i), &catalog);
            assert_eq!(scene.camera_rotation.x, deg_to_rad(preset.camera_rotation.x));
            assert_eq!(scene.camera_rotation.y, deg_to_rad(preset.camera_rotation.y));
            assert_eq!(scene.camera_rotation.z, 0.0);

            let model = &scene.models[0];
            assert_eq!(model.rotation.x, deg_to_rad(preset.device_rotation.x));
            assert_eq!(model.rotation.y, deg_to_rad(preset.device_rotation.y));
            assert_eq!(model.rotation.z, deg_to_rad(preset.device_rotation.z));
        }
    }

    #[test]
    fn test_compose_merges_device_color_texture() {
        let catalog = DeviceCatalog::builtin();
        let mut input = inputs(0);
        input.device = DEVICES[1].name;
        input.color = "#FF0000".into();
        let scene = compose(&input, &catalog);
        assert_eq!(scene.models.len(), 1);
        assert_eq!(scene.models[0].device, &DEVICES[1]);
        assert_eq!(scene.models[0].color, "#FF0000");
        assert_eq!(scene.models[0].texture, DEVICES[0].default_texture());
    }

    #[test]
    fn test_compose_is_pure() {
        let catalog = DeviceCatalog::builtin();
        assert_eq!(compose(&inputs(3), &catalog), compose(&inputs(3), &catalog));
    }

    #[test]
    fn test_non_numeric_angle_becomes_nan() {
        let mut input = inputs(0);
        input.device_rotation[1] = "abc".into();
        let scene = compose(&input, &DeviceCatalog::builtin());
        assert!(scene.models[0].rotation.y.is_nan());
        assert_eq!(scene.models[0].rotation.x, 0.0);
    }

    #[test]
    fn test_composer_memoizes_on_inputs() {
        let mut composer = SceneComposer::new(DeviceCatalog::builtin());
        let first = composer.scene(&inputs(1)).clone();
        assert_eq!(composer.generation(), 1);

        assert_eq!(composer.scene(&inputs(1)), &first);
        assert_eq!(composer.generation(), 1);

        composer.scene(&inputs(2));
        assert_eq!(composer.generation(), 2);
    }

    #[test]
    fn test_composer_memoizes_nan_text() {
        let mut composer = SceneComposer::new(DeviceCatalog::builtin());
        let mut input = inputs(0);
        input.camera_rotation[0] = "-".into();
        composer.scene(&input);
        composer.scene(&input);
        assert_eq!(composer.generation(), 1);
    }

    #[test]
    #[should_panic(expected = "unknown device")]
    fn test_unknown_device_panics() {
        let mut input = inputs(0);
        input.device = "Nokia 3310";
        compose(&input, &DeviceCatalog::builtin());
    }
}

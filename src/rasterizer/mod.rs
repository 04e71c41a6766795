//! Software rasterizer for the model viewport
//!
//! Features:
//! - Perspective-correct texture mapping on screen surfaces
//! - Gouraud shading with directional lights
//! - Z-buffer
//!
//! # Module Organization
//!
//! - `types` - Color, Texture, Vertex, Face, Light, RasterSettings
//! - `math` - Vec3, Vec2, Euler rotation, projection
//! - `camera` - Orbit camera
//! - `render` - Framebuffer and mesh rendering

pub mod camera;
pub mod math;
pub mod render;
pub mod types;

pub use camera::Camera;
pub use math::{deg_to_rad, Vec2, Vec3};
pub use render::{render_mesh, Framebuffer, MeshPass};
pub use types::{Color, Face, FaceMaterial, RasterSettings, Texture, Vertex};

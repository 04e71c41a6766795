//! Core rendering functions
//! Triangle rasterization with z-buffer and perspective-correct UVs

use super::camera::Camera;
use super::math::{perspective_transform, project, rotate_xyz, Vec2, Vec3, NEAR_PLANE};
use super::types::{Color, Face, FaceMaterial, RasterSettings, ShadingMode, Texture, Vertex};

/// Framebuffer for software rendering
pub struct Framebuffer {
    pub pixels: Vec<u8>,    // RGBA, 4 bytes per pixel
    pub zbuffer: Vec<f32>,  // Depth buffer
    pub width: usize,
    pub height: usize,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: vec![0; width * height * 4],
            zbuffer: vec![f32::MAX; width * height],
            width,
            height,
        }
    }

    /// Clear framebuffer with a vertical gradient
    /// top_color at y=0, bottom_color at y=height-1
    pub fn clear_gradient(&mut self, top_color: Color, bottom_color: Color) {
        let denom = (self.height.max(2) - 1) as f32;
        for y in 0..self.height {
            let bytes = top_color.lerp(bottom_color, y as f32 / denom).to_bytes();
            let row = y * self.width * 4;
            for px in self.pixels[row..row + self.width * 4].chunks_exact_mut(4) {
                px.copy_from_slice(&bytes);
            }
        }
        self.zbuffer.fill(f32::MAX);
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, color: Color) {
        if x < self.width && y < self.height {
            let idx = (y * self.width + x) * 4;
            self.pixels[idx..idx + 4].copy_from_slice(&color.to_bytes());
        }
    }

    /// Write a pixel if it is closer than what is stored. Returns true if written.
    pub fn set_pixel_with_depth(&mut self, x: usize, y: usize, z: f32, color: Color) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let idx = y * self.width + x;
        if z < self.zbuffer[idx] {
            self.zbuffer[idx] = z;
            self.set_pixel(x, y, color);
            true
        } else {
            false
        }
    }

    pub fn get_pixel(&self, x: usize, y: usize) -> Color {
        let idx = (y * self.width + x) * 4;
        Color {
            r: self.pixels[idx],
            g: self.pixels[idx + 1],
            b: self.pixels[idx + 2],
            a: self.pixels[idx + 3],
        }
    }
}

/// One mesh draw: geometry, model rotation and material inputs
pub struct MeshPass<'a> {
    pub vertices: &'a [Vertex],
    pub faces: &'a [Face],
    /// Euler rotation in radians, XYZ order
    pub rotation: Vec3,
    pub body_color: Color,
    pub screen: Option<&'a Texture>,
}

/// Counters from one render call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RasterStats {
    pub triangles_drawn: usize,
    pub triangles_culled: usize,
    pub pixels_written: usize,
}

/// Screen-space triangle ready for rasterization
struct Surface {
    v1: Vec3,
    v2: Vec3,
    v3: Vec3,
    uv1: Vec2,
    uv2: Vec2,
    uv3: Vec2,
    shade1: f32,
    shade2: f32,
    shade3: f32,
    color1: Color,
    color2: Color,
    color3: Color,
    material: FaceMaterial,
}

fn shade_intensity(normal: Vec3, settings: &RasterSettings) -> f32 {
    let diffuse: f32 = settings
        .lights
        .iter()
        .map(|light| normal.dot(light.direction.scale(-1.0)).max(0.0) * light.intensity)
        .sum();
    (settings.ambient + diffuse).clamp(0.0, 1.0)
}

/// Render a mesh into the framebuffer
pub fn render_mesh(
    fb: &mut Framebuffer,
    pass: &MeshPass,
    camera: &Camera,
    settings: &RasterSettings,
) -> RasterStats {
    let mut stats = RasterStats::default();
    let Vec3 { x: rx, y: ry, z: rz } = pass.rotation;

    let mut world_positions = Vec::with_capacity(pass.vertices.len());
    let mut world_normals = Vec::with_capacity(pass.vertices.len());
    let mut cam_positions = Vec::with_capacity(pass.vertices.len());

    for v in pass.vertices {
        let world = rotate_xyz(v.pos, rx, ry, rz);
        let rel = world - camera.position;
        cam_positions.push(perspective_transform(rel, camera.basis_x, camera.basis_y, camera.basis_z));
        world_positions.push(world);
        world_normals.push(rotate_xyz(v.normal, rx, ry, rz).normalize());
    }

    for face in pass.faces {
        let (i1, i2, i3) = (face.v0, face.v1, face.v2);
        let (c1, c2, c3) = (cam_positions[i1], cam_positions[i2], cam_positions[i3]);

        if c1.z <= NEAR_PLANE || c2.z <= NEAR_PLANE || c3.z <= NEAR_PLANE {
            stats.triangles_culled += 1;
            continue;
        }

        let (w1, w2, w3) = (world_positions[i1], world_positions[i2], world_positions[i3]);
        let face_normal = (w2 - w1).cross(w3 - w1).normalize();
        if settings.backface_cull && face_normal.dot(w1 - camera.position) >= 0.0 {
            stats.triangles_culled += 1;
            continue;
        }

        let (shade1, shade2, shade3) = match settings.shading {
            ShadingMode::None => (1.0, 1.0, 1.0),
            ShadingMode::Gouraud => (
                shade_intensity(world_normals[i1], settings),
                shade_intensity(world_normals[i2], settings),
                shade_intensity(world_normals[i3], settings),
            ),
        };

        let surface = Surface {
            v1: project(c1, settings.focal, fb.width, fb.height),
            v2: project(c2, settings.focal, fb.width, fb.height),
            v3: project(c3, settings.focal, fb.width, fb.height),
            uv1: pass.vertices[i1].uv,
            uv2: pass.vertices[i2].uv,
            uv3: pass.vertices[i3].uv,
            shade1,
            shade2,
            shade3,
            color1: pass.vertices[i1].color,
            color2: pass.vertices[i2].color,
            color3: pass.vertices[i3].color,
            material: face.material,
        };

        stats.pixels_written += rasterize_triangle(fb, &surface, pass, settings);
        stats.triangles_drawn += 1;
    }

    stats
}

/// Rasterize a single triangle. Returns the number of pixels written.
fn rasterize_triangle(
    fb: &mut Framebuffer,
    surface: &Surface,
    pass: &MeshPass,
    settings: &RasterSettings,
) -> usize {
    let (v1, v2, v3) = (surface.v1, surface.v2, surface.v3);

    // Bounding box
    let min_x = v1.x.min(v2.x).min(v3.x).max(0.0) as usize;
    let max_x = (v1.x.max(v2.x).max(v3.x) + 1.0).min(fb.width as f32) as usize;
    let min_y = v1.y.min(v2.y).min(v3.y).max(0.0) as usize;
    let max_y = (v1.y.max(v2.y).max(v3.y) + 1.0).min(fb.height as f32) as usize;

    if min_x >= max_x || min_y >= max_y {
        return 0;
    }

    // Triangle area * 2; barycentrics are winding independent after dividing by it
    let area = (v2.y - v3.y) * (v1.x - v3.x) + (v3.x - v2.x) * (v1.y - v3.y);
    if area.abs() < 0.00001 {
        return 0;
    }
    let inv_area = 1.0 / area;

    let (inv_z1, inv_z2, inv_z3) = (1.0 / v1.z, 1.0 / v2.z, 1.0 / v3.z);
    let mut written = 0;

    for y in min_y..max_y {
        let py = y as f32 + 0.5;
        for x in min_x..max_x {
            let px = x as f32 + 0.5;

            let bc_x = ((v2.y - v3.y) * (px - v3.x) + (v3.x - v2.x) * (py - v3.y)) * inv_area;
            let bc_y = ((v3.y - v1.y) * (px - v3.x) + (v1.x - v3.x) * (py - v3.y)) * inv_area;
            let bc_z = 1.0 - bc_x - bc_y;

            const ERR: f32 = -0.0001;
            if bc_x < ERR || bc_y < ERR || bc_z < ERR {
                continue;
            }

            // 1/z interpolates linearly in screen space
            let inv_z = bc_x * inv_z1 + bc_y * inv_z2 + bc_z * inv_z3;
            let z = 1.0 / inv_z;
            if z >= fb.zbuffer[y * fb.width + x] {
                continue;
            }

            let shade = bc_x * surface.shade1 + bc_y * surface.shade2 + bc_z * surface.shade3;

            let color = match surface.material {
                FaceMaterial::Screen => {
                    let u = (bc_x * surface.uv1.x * inv_z1 + bc_y * surface.uv2.x * inv_z2 + bc_z * surface.uv3.x * inv_z3) / inv_z;
                    let v = (bc_x * surface.uv1.y * inv_z1 + bc_y * surface.uv2.y * inv_z2 + bc_z * surface.uv3.y * inv_z3) / inv_z;
                    let texel = match pass.screen {
                        Some(tex) => tex.sample(u, v),
                        None => Color::BLACK,
                    };
                    // Transparent texels show an unlit screen
                    let texel = if texel.is_transparent() { Color::BLACK } else { texel };
                    if settings.emissive_screen {
                        texel
                    } else {
                        texel.shade_rgb(shade, shade, shade)
                    }
                }
                FaceMaterial::Body => {
                    let vertex_color = if bc_x >= bc_y && bc_x >= bc_z {
                        surface.color1
                    } else if bc_y >= bc_z {
                        surface.color2
                    } else {
                        surface.color3
                    };
                    pass.body_color.tint(vertex_color).shade_rgb(shade, shade, shade)
                }
            };

            if fb.set_pixel_with_depth(x, y, z, color) {
                written += 1;
            }
        }
    }

    written
}

//! Procedural device meshes
//!
//! A device is a rounded slab centered on the origin, facing +Z, with a
//! screen quad floating just above the front face. Outline points run
//! counter-clockwise seen from the front, which makes every face wind
//! counter-clockwise toward the outside.

use std::f32::consts::FRAC_PI_2;

use crate::catalog::MeshShape;
use crate::rasterizer::{Color, Face, Vec2, Vec3, Vertex};

/// Front glass around the screen
const BEZEL_COLOR: Color = Color::new(22, 22, 26);
/// Sides and back take the model color as-is
const SHELL_COLOR: Color = Color::WHITE;
/// Screen sits this far in front of the glass
const SCREEN_LIFT: f32 = 0.004;

#[derive(Debug, Clone)]
pub struct DeviceMesh {
    pub vertices: Vec<Vertex>,
    pub faces: Vec<Face>,
}

/// Outline of the rounded rectangle: (position, outward direction)
fn outline(shape: &MeshShape) -> Vec<(Vec2, Vec2)> {
    let hw = shape.body_width * 0.5;
    let hh = shape.body_height * 0.5;
    let r = shape.corner_radius.clamp(0.0, hw.min(hh));
    let segments = shape.corner_segments.max(1);

    // Corner centers in counter-clockwise order, starting top-right
    let corners = [
        (hw - r, hh - r),
        (-hw + r, hh - r),
        (-hw + r, -hh + r),
        (hw - r, -hh + r),
    ];

    let mut points = Vec::with_capacity(corners.len() * (segments + 1));
    for (i, (cx, cy)) in corners.iter().enumerate() {
        let start = i as f32 * FRAC_PI_2;
        for s in 0..=segments {
            let a = start + FRAC_PI_2 * s as f32 / segments as f32;
            let dir = Vec2::new(a.cos(), a.sin());
            points.push((Vec2::new(cx + dir.x * r, cy + dir.y * r), dir));
        }
    }
    points
}

impl DeviceMesh {
    pub fn build(shape: &MeshShape) -> Self {
        let ring = outline(shape);
        let n = ring.len();
        let front_z = shape.depth * 0.5;
        let back_z = -front_z;

        let mut vertices = Vec::with_capacity(n * 4 + 6);
        let mut faces = Vec::with_capacity(n * 4 + 2);

        // Front glass: fan around the center
        let front_center = vertices.len();
        vertices.push(Vertex::with_color(Vec3::new(0.0, 0.0, front_z), Vec2::new(0.5, 0.5), Vec3::Z, BEZEL_COLOR));
        for (p, _) in &ring {
            vertices.push(Vertex::with_color(Vec3::new(p.x, p.y, front_z), Vec2::new(0.0, 0.0), Vec3::Z, BEZEL_COLOR));
        }
        for i in 0..n {
            let a = front_center + 1 + i;
            let b = front_center + 1 + (i + 1) % n;
            faces.push(Face::body(front_center, a, b));
        }

        // Back shell
        let back_normal = Vec3::new(0.0, 0.0, -1.0);
        let back_center = vertices.len();
        vertices.push(Vertex::with_color(Vec3::new(0.0, 0.0, back_z), Vec2::new(0.5, 0.5), back_normal, SHELL_COLOR));
        for (p, _) in &ring {
            vertices.push(Vertex::with_color(Vec3::new(p.x, p.y, back_z), Vec2::new(0.0, 0.0), back_normal, SHELL_COLOR));
        }
        for i in 0..n {
            let a = back_center + 1 + i;
            let b = back_center + 1 + (i + 1) % n;
            faces.push(Face::body(back_center, b, a));
        }

        // Sides: own vertices so normals follow the rounded edge
        let side = vertices.len();
        for (p, dir) in &ring {
            let normal = Vec3::new(dir.x, dir.y, 0.0);
            vertices.push(Vertex::with_color(Vec3::new(p.x, p.y, front_z), Vec2::new(0.0, 0.0), normal, SHELL_COLOR));
            vertices.push(Vertex::with_color(Vec3::new(p.x, p.y, back_z), Vec2::new(0.0, 0.0), normal, SHELL_COLOR));
        }
        for i in 0..n {
            let j = (i + 1) % n;
            let (fi, bi) = (side + i * 2, side + i * 2 + 1);
            let (fj, bj) = (side + j * 2, side + j * 2 + 1);
            faces.push(Face::body(bi, bj, fj));
            faces.push(Face::body(bi, fj, fi));
        }

        // Screen quad, v = 0 at the top edge
        let sx = (shape.body_width * 0.5 - shape.bezel).max(0.0);
        let sy = (shape.body_height * 0.5 - shape.bezel).max(0.0);
        let sz = front_z + SCREEN_LIFT;
        let screen = vertices.len();
        vertices.push(Vertex::new(Vec3::new(-sx, -sy, sz), Vec2::new(0.0, 1.0), Vec3::Z));
        vertices.push(Vertex::new(Vec3::new(sx, -sy, sz), Vec2::new(1.0, 1.0), Vec3::Z));
        vertices.push(Vertex::new(Vec3::new(sx, sy, sz), Vec2::new(1.0, 0.0), Vec3::Z));
        vertices.push(Vertex::new(Vec3::new(-sx, sy, sz), Vec2::new(0.0, 0.0), Vec3::Z));
        faces.push(Face::screen(screen, screen + 1, screen + 2));
        faces.push(Face::screen(screen, screen + 2, screen + 3));

        Self { vertices, faces }
    }
}

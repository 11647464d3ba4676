use glam::{UVec2, Vec2};
use std::f32::consts::{FRAC_PI_2, TAU};

use crate::camera::OrbitCamera;
use crate::mesh::SliceMesh;

/// Each zoom step scales the stack by this factor
pub const ZOOM_GROWTH_BASE: f32 = 1.1;

/// Which of the two precomputed index buffers to submit this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winding {
    Forward,
    Reverse,
}

/// Viewing the stack from below flips which triangle order reads as
/// front-facing, so the reversed buffer is submitted instead.
pub fn select_winding(pitch: f32) -> Winding {
    if pitch >= 0.0 {
        Winding::Forward
    } else {
        Winding::Reverse
    }
}

/// One projected quad, before per-layer vertical translation.
///
/// Corners are screen-space offsets around the stack origin in the
/// order top-left, top-right, bottom-left, bottom-right. `height_scale`
/// sizes the vertical gap between layers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadTemplate {
    pub corners: [Vec2; 4],
    pub height_scale: f32,
}

impl QuadTemplate {
    /// Project the camera state onto one quad shape. Pitch maps to an
    /// elevation angle in [-pi/2, pi/2]; its sine foreshortens the quad
    /// vertically while its cosine stretches the stack apart. Yaw spins
    /// the quad in plane.
    pub fn project(camera: &OrbitCamera, viewport_min: f32, slice_size: UVec2) -> Self {
        let elevation = camera.pitch * FRAC_PI_2;
        let zoom_factor = ZOOM_GROWTH_BASE.powi(camera.zoom);
        let scale = Vec2::new(0.5, 0.5 * elevation.sin()) * viewport_min * zoom_factor;
        let slice_w = slice_size.x.max(1) as f32;
        let height_scale = elevation.cos() * scale.x / slice_w;
        let half_aspect = 0.5 * slice_size.y as f32 / slice_w;

        let rotation = Vec2::from_angle(camera.yaw * TAU);
        let corners = [
            Vec2::new(-0.5, -half_aspect),
            Vec2::new(0.5, -half_aspect),
            Vec2::new(-0.5, half_aspect),
            Vec2::new(0.5, half_aspect),
        ]
        .map(|corner| rotation.rotate(corner) * scale);

        Self {
            corners,
            height_scale,
        }
    }
}

/// Stamp the template into every layer's 4 vertex slots, centering the
/// full stack vertically in the viewport. No-ops on an empty mesh.
pub fn composite_layers(template: &QuadTemplate, viewport: Vec2, mesh: &mut SliceMesh) {
    if mesh.slice_count == 0 {
        return;
    }

    let layer_height = template.height_scale * mesh.cell_count as f32
        / (mesh.slice_size.x as f32 * mesh.copies as f32);
    let origin = Vec2::new(
        viewport.x,
        viewport.y + (mesh.slice_count - 1) as f32 * layer_height,
    ) / 2.0;

    for (layer, quad) in mesh.verts.chunks_exact_mut(4).enumerate() {
        let offset = origin - Vec2::new(0.0, layer as f32 * layer_height);
        for (vert, corner) in quad.iter_mut().zip(template.corners) {
            *vert = corner + offset;
        }
    }
}

/// Per-frame projection: compute the quad template from the camera,
/// rewrite the mesh's vertex positions for every layer, and report
/// which index buffer to submit.
pub fn project_frame(camera: &OrbitCamera, viewport: Vec2, mesh: &mut SliceMesh) -> Winding {
    let template = QuadTemplate::project(camera, viewport.min_element(), mesh.slice_size);
    composite_layers(&template, viewport, mesh);
    select_winding(camera.pitch)
}

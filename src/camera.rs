use glam::Vec2;

/// Pixels of pointer drag per unit of yaw (x) / pitch (y) turn
pub const DRAG_SENSITIVITY: Vec2 = Vec2::new(-0.0025, 0.01);
/// Auto-spin rate in yaw turns per second
pub const SPIN_RATE: f32 = 0.25;

pub const PITCH_RANGE: (f32, f32) = (-1.0, 1.0);
pub const ZOOM_RANGE: (i32, i32) = (-10, 10);

/// One frame's worth of collected input, consumed by [`OrbitCamera::advance`]
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct InputDeltas {
    /// Accumulated pointer drag in pixels while the primary button is down
    pub drag: Vec2,
    /// Accumulated wheel steps (positive zooms in)
    pub wheel: i32,
    /// Spin toggle was pressed this frame
    pub toggle_spin: bool,
}

/// Orbit camera around the slice stack.
///
/// `pitch` is a normalized elevation turn in [-1, 1], `yaw` a wrapped
/// azimuth turn in [0, 1), `zoom` an integer step in [-10, 10].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    pub pitch: f32,
    pub yaw: f32,
    pub zoom: i32,
    pub spin: bool,
}

impl OrbitCamera {
    pub fn new() -> Self {
        Self {
            pitch: 0.2,
            yaw: 0.25,
            zoom: 0,
            spin: true,
        }
    }

    /// Advance one frame: apply the spin toggle, auto-spin by `dt`
    /// seconds, fold in pointer drag and wheel steps, then re-establish
    /// the clamp/wrap invariants. Drag only rotates yaw while auto-spin
    /// is off.
    pub fn advance(&mut self, deltas: &InputDeltas, dt: f32) {
        if deltas.toggle_spin {
            self.spin = !self.spin;
        }

        if self.spin {
            self.yaw += SPIN_RATE * dt;
        } else {
            self.yaw += deltas.drag.x * DRAG_SENSITIVITY.x;
        }
        self.pitch += deltas.drag.y * DRAG_SENSITIVITY.y;

        self.pitch = self.pitch.clamp(PITCH_RANGE.0, PITCH_RANGE.1);
        // A tiny negative yaw rounds up to exactly 1.0 under the wrap
        self.yaw -= self.yaw.floor();
        if self.yaw >= 1.0 {
            self.yaw = 0.0;
        }
        self.zoom = (self.zoom + deltas.wheel).clamp(ZOOM_RANGE.0, ZOOM_RANGE.1);
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new()
    }
}

//! Camera and transform parameters shared by both demos, plus the cube's
//! rotation state.

use glam::{Mat4, Vec3};
use prism_engine::coords::Viewport;
use prism_engine::paint::Color;

/// Fixed viewing parameters.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SceneParams {
    /// Vertical field of view in radians.
    pub field_of_view: f32,
    pub z_near: f32,
    pub z_far: f32,
    /// Applied to the model before any rotation.
    pub translation: Vec3,
    pub clear_color: Color,
    pub clear_depth: f32,
    /// Y rotation per radian of Z rotation.
    pub secondary_spin: f32,
}

impl Default for SceneParams {
    fn default() -> Self {
        Self {
            field_of_view: 45.0_f32.to_radians(),
            z_near: 0.1,
            z_far: 100.0,
            translation: Vec3::new(0.0, 0.0, -6.0),
            clear_color: Color::BLACK,
            clear_depth: 1.0,
            secondary_spin: 0.7,
        }
    }
}

impl SceneParams {
    /// Right-handed perspective with `[0, 1]` clip depth.
    pub fn projection_matrix(&self, viewport: Viewport) -> Mat4 {
        Mat4::perspective_rh(self.field_of_view, viewport.aspect(), self.z_near, self.z_far)
    }

    /// Translation, then `angle` about +Z and `angle * secondary_spin` about +Y.
    ///
    /// `None` is the unrotated model used by the quad.
    pub fn model_view_matrix(&self, angle: Option<f32>) -> Mat4 {
        let translation = Mat4::from_translation(self.translation);
        match angle {
            Some(angle) => {
                translation
                    * Mat4::from_rotation_z(angle)
                    * Mat4::from_rotation_y(angle * self.secondary_spin)
            }
            None => translation,
        }
    }
}

/// Cube rotation in radians. Grows without bound.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct RenderState {
    pub rotation: f32,
}

impl RenderState {
    pub const fn new() -> Self {
        Self { rotation: 0.0 }
    }

    /// Advances the rotation by `dt` seconds.
    #[must_use]
    pub fn tick(self, dt: f32) -> Self {
        Self {
            rotation: self.rotation + dt,
        }
    }
}

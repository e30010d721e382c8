//! Time-driven orbit camera producing the per-frame transform.

use glam::{Mat4, Vec3};

/// Camera orbiting the origin on a unit circle in the X/Y plane at a fixed Z
/// offset, completing one revolution every 2π seconds of animation time.
///
/// Projection and model are computed once at construction and never change;
/// only the view varies with time. The projection aspect is fixed at 4:3 and
/// does not track window resizes.
pub struct OrbitCamera {
    projection: Mat4,
    model: Mat4,
}

impl OrbitCamera {
    pub fn new() -> Self {
        Self {
            projection: Mat4::perspective_rh(45.0_f32.to_radians(), 4.0 / 3.0, 0.1, 100.0),
            model: Mat4::IDENTITY,
        }
    }

    /// Eye position at animation time `t`.
    pub fn eye_at(t: f32) -> Vec3 {
        Vec3::new(t.sin(), t.cos(), 3.0)
    }

    /// Look-at view for time `t`, aimed at the origin with +Y up.
    ///
    /// The basis is non-degenerate for all `t`: the eye never reaches the
    /// origin, and up is never parallel to the view direction on this orbit.
    pub fn view_at(t: f32) -> Mat4 {
        Mat4::look_at_rh(Self::eye_at(t), Vec3::ZERO, Vec3::Y)
    }

    /// Combined transform for time `t`: `projection * view * model`.
    ///
    /// Recomputed every frame and shared by every object drawn that frame.
    pub fn transform_at(&self, t: f32) -> Mat4 {
        self.projection * Self::view_at(t) * self.model
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    pub fn model(&self) -> Mat4 {
        self.model
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: [f32; 7] = [0.0, 0.37, 1.0, 1.5708, 3.1416, 4.2, 6.2832];

    #[test]
    fn projection_and_model_are_time_invariant() {
        let cam = OrbitCamera::new();
        let projection = cam.projection();
        let model = cam.model();

        for t in SAMPLES {
            let _ = cam.transform_at(t);
        }

        assert_eq!(cam.projection(), projection);
        assert_eq!(cam.model(), Mat4::IDENTITY);
        assert_eq!(cam.model(), model);
    }

    #[test]
    fn eye_follows_orbit_law() {
        for t in SAMPLES {
            let eye = OrbitCamera::eye_at(t);
            assert!((eye.x - t.sin()).abs() < 1e-6);
            assert!((eye.y - t.cos()).abs() < 1e-6);
            assert_eq!(eye.z, 3.0);
        }
    }

    #[test]
    fn eye_distance_to_target_is_constant() {
        let expected = 10.0_f32.sqrt();
        for t in SAMPLES {
            let distance = OrbitCamera::eye_at(t).length();
            assert!((distance - expected).abs() < 1e-5, "t={t}: {distance}");
        }
    }

    #[test]
    fn view_is_invertible_at_start() {
        // eye = (0, 1, 3) at t = 0; the look-at basis must be non-degenerate.
        let view = OrbitCamera::view_at(0.0);
        assert!(view.determinant().abs() > 1e-6);
    }

    #[test]
    fn view_is_invertible_over_the_orbit() {
        for t in SAMPLES {
            let view = OrbitCamera::view_at(t);
            assert!(view.determinant().abs() > 1e-6, "degenerate view at t={t}");
        }
    }

    #[test]
    fn transform_is_deterministic_per_time_sample() {
        let cam = OrbitCamera::new();
        for t in SAMPLES {
            let a = cam.transform_at(t);
            let b = cam.transform_at(t);
            assert_eq!(a.to_cols_array(), b.to_cols_array());
        }
    }

    #[test]
    fn view_changes_with_time() {
        let cam = OrbitCamera::new();
        let a = cam.transform_at(0.0);
        let b = cam.transform_at(1.0);
        assert_ne!(a.to_cols_array(), b.to_cols_array());
    }
}

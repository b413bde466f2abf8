//! Camera frustum corners for full-screen ray marching.
//!
//! A ray-march pass draws a single screen quad and reconstructs each pixel's
//! view ray by interpolating the four frustum corner rays. The corners are
//! computed in view space (looking down -Z, +Y up) at unit depth and rotated
//! into world space by the shader with the camera-to-world matrix.

use glam::{Mat4, Vec2, Vec3A};
use serde::Serialize;

use crate::error::CameraError;

/// View-space forward direction.
pub const FORWARD: Vec3A = Vec3A::new(0.0, 0.0, -1.0);

/// The four corner rays of the view frustum at unit depth.
///
/// Field order matches the row order of [`FrustumCorners::to_matrix`], which
/// the shader indexes by screen corner. Vectors are not normalized; their
/// length encodes how far off-axis the corner is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrustumCorners {
    /// Row 0
    pub top_left: Vec3A,
    /// Row 1
    pub top_right: Vec3A,
    /// Row 2
    pub bottom_right: Vec3A,
    /// Row 3
    pub bottom_left: Vec3A,
}

/// Compute the frustum corner rays for a vertical field of view (degrees)
/// and aspect ratio (width / height).
///
/// Inputs are not validated: a field of view outside (0, 180) or a
/// non-positive aspect produces degenerate or NaN vectors. Use
/// [`CameraParams::new`] when the values come from outside.
pub fn solve(fov_degrees: f32, aspect: f32) -> FrustumCorners {
    let t = (fov_degrees * 0.5).to_radians().tan();

    let up = Vec3A::new(0.0, t, 0.0);
    let right = Vec3A::new(t * aspect, 0.0, 0.0);

    FrustumCorners {
        top_left: FORWARD - right + up,
        top_right: FORWARD + right + up,
        bottom_right: FORWARD + right - up,
        bottom_left: FORWARD - right - up,
    }
}

impl FrustumCorners {
    /// Corners in row order: top-left, top-right, bottom-right, bottom-left.
    pub fn rows(&self) -> [Vec3A; 4] {
        [self.top_left, self.top_right, self.bottom_right, self.bottom_left]
    }

    /// Corner for a matrix row / quad corner index.
    ///
    /// # Panics
    ///
    /// Panics if `index > 3`.
    pub fn row(&self, index: usize) -> Vec3A {
        self.rows()[index]
    }

    /// 4x4 matrix whose rows are the corners (with `w = 0`).
    pub fn to_matrix(&self) -> Mat4 {
        let [r0, r1, r2, r3] = self.rows().map(|c| c.extend(0.0));
        Mat4::from_cols(r0, r1, r2, r3).transpose()
    }

    /// Reconstruct the view ray through screen coordinate `uv`.
    ///
    /// `uv` is (0,0) at the bottom-left corner and (1,1) at the top-right,
    /// the same bilinear interpolation the rasterizer performs between the
    /// quad vertices.
    pub fn ray_direction(&self, uv: Vec2) -> Vec3A {
        let bottom = self.bottom_left.lerp(self.bottom_right, uv.x);
        let top = self.top_left.lerp(self.top_right, uv.x);
        bottom.lerp(top, uv.y)
    }

    /// Rotate the corner rays by a camera-to-world matrix.
    ///
    /// Only the rotation/scale part is applied; translation does not affect
    /// directions.
    pub fn to_world(&self, cam_to_world: &Mat4) -> FrustumCorners {
        FrustumCorners {
            top_left: cam_to_world.transform_vector3a(self.top_left),
            top_right: cam_to_world.transform_vector3a(self.top_right),
            bottom_right: cam_to_world.transform_vector3a(self.bottom_right),
            bottom_left: cam_to_world.transform_vector3a(self.bottom_left),
        }
    }
}

/// Validated field of view and aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraParams {
    fov_degrees: f32,
    aspect: f32,
}

impl CameraParams {
    /// Check `fov_degrees` is in (0, 180) and `aspect` is positive and finite.
    pub fn new(fov_degrees: f32, aspect: f32) -> Result<Self, CameraError> {
        if !(fov_degrees > 0.0 && fov_degrees < 180.0) {
            return Err(CameraError::FieldOfView(fov_degrees));
        }
        if !(aspect > 0.0 && aspect.is_finite()) {
            return Err(CameraError::Aspect(aspect));
        }
        Ok(Self { fov_degrees, aspect })
    }

    /// Aspect ratio from an image size.
    pub fn from_resolution(fov_degrees: f32, width: u32, height: u32) -> Result<Self, CameraError> {
        Self::new(fov_degrees, width as f32 / height as f32)
    }

    /// Vertical field of view in degrees
    pub fn fov_degrees(&self) -> f32 {
        self.fov_degrees
    }

    /// Width over height
    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Frustum corners for these parameters.
    pub fn solve(&self) -> FrustumCorners {
        solve(self.fov_degrees, self.aspect)
    }
}

/// Camera placement in the world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraRig {
    /// Point camera is looking from (camera position)
    pub lookfrom: Vec3A,
    /// Point camera is looking at (look target)
    pub lookat: Vec3A,
    /// Camera-relative "up" direction vector
    pub vup: Vec3A,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            lookfrom: Vec3A::ZERO,
            lookat: FORWARD,
            vup: Vec3A::Y,
        }
    }
}

impl CameraRig {
    /// Camera-to-world transform (view space looks down -Z).
    pub fn cam_to_world(&self) -> Mat4 {
        Mat4::look_at_rh(self.lookfrom.into(), self.lookat.into(), self.vup.into()).inverse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn ninety_degree_square_frustum() {
        let c = solve(90.0, 1.0);
        assert!(c.top_left.abs_diff_eq(Vec3A::new(-1.0, 1.0, -1.0), EPS), "{:?}", c.top_left);
        assert!(c.top_right.abs_diff_eq(Vec3A::new(1.0, 1.0, -1.0), EPS), "{:?}", c.top_right);
        assert!(c.bottom_right.abs_diff_eq(Vec3A::new(1.0, -1.0, -1.0), EPS), "{:?}", c.bottom_right);
        assert!(c.bottom_left.abs_diff_eq(Vec3A::new(-1.0, -1.0, -1.0), EPS), "{:?}", c.bottom_left);
    }

    #[test]
    fn aspect_only_widens_horizontally() {
        let c = solve(90.0, 2.0);
        assert!(c.top_left.abs_diff_eq(Vec3A::new(-2.0, 1.0, -1.0), EPS));
        assert!(c.bottom_right.abs_diff_eq(Vec3A::new(2.0, -1.0, -1.0), EPS));
    }

    #[test]
    fn offsets_scale_linearly_with_tan_half_fov() {
        let t = 30.0f32.to_radians().tan();
        let narrow = solve(60.0, 1.5);
        let wide = solve((2.0 * (2.0 * t).atan()).to_degrees(), 1.5);

        for (n, w) in narrow.rows().into_iter().zip(wide.rows()) {
            let n_off = n - FORWARD;
            let w_off = w - FORWARD;
            assert!(w_off.abs_diff_eq(n_off * 2.0, 1e-4), "{:?} vs {:?}", w_off, n_off);
            assert_eq!(n.z, -1.0);
            assert_eq!(w.z, -1.0);
        }
    }

    #[test]
    fn matrix_rows_follow_corner_order() {
        let c = solve(60.0, 16.0 / 9.0);
        let m = c.to_matrix();
        for (i, corner) in c.rows().into_iter().enumerate() {
            assert_eq!(m.row(i), corner.extend(0.0));
            assert_eq!(c.row(i), corner);
        }
    }

    #[test]
    fn ray_direction_hits_corners_and_center() {
        let c = solve(75.0, 1.25);
        assert!(c.ray_direction(Vec2::new(0.0, 0.0)).abs_diff_eq(c.bottom_left, EPS));
        assert!(c.ray_direction(Vec2::new(1.0, 0.0)).abs_diff_eq(c.bottom_right, EPS));
        assert!(c.ray_direction(Vec2::new(1.0, 1.0)).abs_diff_eq(c.top_right, EPS));
        assert!(c.ray_direction(Vec2::new(0.0, 1.0)).abs_diff_eq(c.top_left, EPS));
        assert!(c.ray_direction(Vec2::splat(0.5)).abs_diff_eq(FORWARD, EPS));
    }

    #[test]
    fn default_rig_is_identity() {
        let rig = CameraRig::default();
        let c = solve(90.0, 1.0);
        let w = c.to_world(&rig.cam_to_world());
        for (a, b) in c.rows().into_iter().zip(w.rows()) {
            assert!(a.abs_diff_eq(b, EPS));
        }
    }

    #[test]
    fn rig_rotates_forward_and_ignores_translation() {
        let rig = CameraRig {
            lookfrom: Vec3A::new(3.0, 10.0, -2.0),
            lookat: Vec3A::new(13.0, 10.0, -2.0),
            vup: Vec3A::Y,
        };
        let m = rig.cam_to_world();
        assert!(m.transform_vector3a(FORWARD).abs_diff_eq(Vec3A::X, EPS));
        assert!(m.transform_point3a(Vec3A::ZERO).abs_diff_eq(rig.lookfrom, 1e-4));

        let center = solve(60.0, 1.0).to_world(&m).ray_direction(Vec2::splat(0.5));
        assert!(center.abs_diff_eq(Vec3A::X, EPS));
    }

    #[test]
    fn checked_params_reject_bad_input() {
        assert_eq!(CameraParams::new(0.0, 1.0), Err(CameraError::FieldOfView(0.0)));
        assert_eq!(CameraParams::new(180.0, 1.0), Err(CameraError::FieldOfView(180.0)));
        assert_eq!(CameraParams::new(60.0, -1.0), Err(CameraError::Aspect(-1.0)));
        assert!(matches!(CameraParams::new(f32::NAN, 1.0), Err(CameraError::FieldOfView(_))));
        assert!(matches!(CameraParams::from_resolution(60.0, 640, 0), Err(CameraError::Aspect(_))));

        let p = CameraParams::from_resolution(60.0, 800, 400).unwrap();
        assert_eq!(p.aspect(), 2.0);
        assert_eq!(p.solve(), solve(60.0, 2.0));
    }

    #[test]
    fn unchecked_solve_passes_garbage_through() {
        let c = solve(60.0, f32::NAN);
        assert!(c.top_left.x.is_nan());
        let flat = solve(0.0, 1.0);
        assert!(flat.top_left.abs_diff_eq(FORWARD, EPS));
    }
}

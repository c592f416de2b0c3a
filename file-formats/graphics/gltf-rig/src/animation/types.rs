//! Value types that keyframe tracks can interpolate

use glam::{Quat, Vec3, Vec4};

/// Types that can be blended between two keyframes
pub trait Interpolate: Copy {
    /// Blend between `self` and `other` by `t` in `[0, 1]`
    fn interpolate(&self, other: &Self, t: f32) -> Self;

    /// Cubic Hermite segment as glTF defines it.
    ///
    /// `dt` is the keyframe spacing; `out_tangent` belongs to `self`,
    /// `in_tangent` to `other`.
    fn hermite(
        &self,
        out_tangent: &Self,
        in_tangent: &Self,
        other: &Self,
        dt: f32,
        t: f32,
    ) -> Self;
}

/// Hermite basis weights for `p0`, `m0`, `p1`, `m1`
fn hermite_basis(t: f32) -> (f32, f32, f32, f32) {
    let t2 = t * t;
    let t3 = t2 * t;
    (
        2.0 * t3 - 3.0 * t2 + 1.0,
        t3 - 2.0 * t2 + t,
        -2.0 * t3 + 3.0 * t2,
        t3 - t2,
    )
}

impl Interpolate for Vec3 {
    fn interpolate(&self, other: &Self, t: f32) -> Self {
        self.lerp(*other, t)
    }

    fn hermite(&self, out_tangent: &Self, in_tangent: &Self, other: &Self, dt: f32, t: f32) -> Self {
        let (h00, h10, h01, h11) = hermite_basis(t);
        *self * h00 + *out_tangent * (dt * h10) + *other * h01 + *in_tangent * (dt * h11)
    }
}

impl Interpolate for Quat {
    /// Spherical interpolation along the shorter arc
    fn interpolate(&self, other: &Self, t: f32) -> Self {
        self.slerp(*other, t).normalize()
    }

    fn hermite(&self, out_tangent: &Self, in_tangent: &Self, other: &Self, dt: f32, t: f32) -> Self {
        let (h00, h10, h01, h11) = hermite_basis(t);
        let v = Vec4::from(*self) * h00
            + Vec4::from(*out_tangent) * (dt * h10)
            + Vec4::from(*other) * h01
            + Vec4::from(*in_tangent) * (dt * h11);
        normalize_rotation(v)
    }
}

/// Unit quaternion from raw x, y, z, w components; degenerate input maps to identity
pub fn normalize_rotation(v: Vec4) -> Quat {
    let length = v.length();
    if length > f32::EPSILON && length.is_finite() {
        Quat::from_vec4(v / length)
    } else {
        Quat::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_interpolate() {
        let a = Vec3::ZERO;
        let b = Vec3::new(10.0, 20.0, 30.0);
        let v = a.interpolate(&b, 0.5);
        assert!((v.x - 5.0).abs() < 0.001);
        assert!((v.y - 10.0).abs() < 0.001);
        assert!((v.z - 15.0).abs() < 0.001);
    }

    #[test]
    fn test_quat_interpolate_shortest_arc() {
        let a = Quat::IDENTITY;
        // Same rotation as 90 degrees about Y, opposite sign
        let b = -Quat::from_rotation_y(std::f32::consts::FRAC_PI_2);
        let mid = a.interpolate(&b, 0.5);
        let angle = mid.angle_between(Quat::from_rotation_y(std::f32::consts::FRAC_PI_4));
        assert!(angle < 0.001);
        assert!((mid.length() - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_hermite_endpoints() {
        let a = Vec3::new(1.0, 0.0, 0.0);
        let b = Vec3::new(3.0, 0.0, 0.0);
        let tangent = Vec3::new(5.0, 5.0, 5.0);
        assert_eq!(a.hermite(&tangent, &tangent, &b, 2.0, 0.0), a);
        assert!((a.hermite(&tangent, &tangent, &b, 2.0, 1.0) - b).length() < 0.001);
    }

    #[test]
    fn test_hermite_zero_tangents_is_smoothstep() {
        let a = Vec3::ZERO;
        let b = Vec3::X;
        let v = a.hermite(&Vec3::ZERO, &Vec3::ZERO, &b, 1.0, 0.5);
        assert!((v.x - 0.5).abs() < 0.001);
        let v = a.hermite(&Vec3::ZERO, &Vec3::ZERO, &b, 1.0, 0.25);
        assert!((v.x - 0.15625).abs() < 0.001);
    }

    #[test]
    fn test_normalize_rotation_degenerate() {
        assert_eq!(normalize_rotation(Vec4::ZERO), Quat::IDENTITY);
        let q = normalize_rotation(Vec4::new(0.0, 2.0, 0.0, 0.0));
        assert!((q.y - 1.0).abs() < 0.001);
    }
}

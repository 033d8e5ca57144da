//! Pure 2D vector math used by the rope, hook and gun code.
//!
//! Everything here works on `glam::Vec2` and uses the y-down screen
//! convention: gravity points along [`DOWN`].

use glam::Vec2;
use std::f32::consts::TAU;

/// Unit vector pointing "down" in world space (y grows downwards).
pub const DOWN: Vec2 = Vec2::new(0.0, 1.0);

/// Squared lengths below this are treated as zero-length vectors.
pub const EPSILON_SQ: f32 = 1e-12;

/// Normalize, returning zero for (near) zero-length input.
pub fn safe_normalize(v: Vec2) -> Vec2 {
    if v.length_squared() <= EPSILON_SQ {
        Vec2::ZERO
    } else {
        v / v.length()
    }
}

/// Component of `v` parallel to `onto`. Zero when `onto` has no length.
pub fn project(v: Vec2, onto: Vec2) -> Vec2 {
    let len_sq = onto.length_squared();
    if len_sq <= EPSILON_SQ {
        return Vec2::ZERO;
    }
    onto * (v.dot(onto) / len_sq)
}

/// Mirror `v` across the line spanned by `axis`.
///
/// The parallel component is kept and the perpendicular one flipped.
pub fn reflect(v: Vec2, axis: Vec2) -> Vec2 {
    project(v, axis) * 2.0 - v
}

/// Rotate `v` counter-clockwise (in math orientation) by `angle` radians.
pub fn rotate(v: Vec2, angle: f32) -> Vec2 {
    Vec2::from_angle(angle).rotate(v)
}

/// Distance between two points.
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (b - a).length()
}

/// Signed angle from `a` to `b` in (-π, π].
pub fn signed_angle(a: Vec2, b: Vec2) -> f32 {
    a.perp_dot(b).atan2(a.dot(b))
}

/// Spherical interpolation between two vectors.
///
/// Rotates along the shorter arc and interpolates the length linearly.
/// Falls back to a linear blend when either input has no direction.
pub fn slerp(a: Vec2, b: Vec2, t: f32) -> Vec2 {
    if a.length_squared() <= EPSILON_SQ || b.length_squared() <= EPSILON_SQ {
        return a.lerp(b, t);
    }
    let len = a.length() + (b.length() - a.length()) * t;
    let angle = signed_angle(a, b);
    rotate(a / a.length(), angle * t) * len
}

/// Snap a raw aim vector to the nearest of `regions` equal angular slices.
///
/// Returns `None` for a zero-length input so callers can keep their previous
/// aim. With `regions == 0` the input is only normalized.
pub fn snap_direction(raw: Vec2, regions: u32) -> Option<Vec2> {
    if raw.length_squared() <= EPSILON_SQ {
        return None;
    }
    if regions == 0 {
        return Some(raw.normalize());
    }
    let step = TAU / regions as f32;
    let angle = raw.y.atan2(raw.x);
    let snapped = (angle / step).round() * step;
    Some(Vec2::from_angle(snapped))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn normalize_zero_is_zero() {
        assert_eq!(safe_normalize(Vec2::ZERO), Vec2::ZERO);
        assert!(approx(safe_normalize(Vec2::new(3.0, 4.0)), Vec2::new(0.6, 0.8)));
    }

    #[test]
    fn project_and_reflect() {
        let v = Vec2::new(2.0, 3.0);
        assert!(approx(project(v, Vec2::new(5.0, 0.0)), Vec2::new(2.0, 0.0)));
        assert!(approx(reflect(v, Vec2::X), Vec2::new(2.0, -3.0)));
        assert_eq!(project(v, Vec2::ZERO), Vec2::ZERO);
    }

    #[test]
    fn rotate_quarter_turn() {
        let r = rotate(Vec2::X, std::f32::consts::FRAC_PI_2);
        assert!(approx(r, Vec2::Y));
    }

    #[test]
    fn slerp_midpoint_keeps_unit_length() {
        let mid = slerp(Vec2::X, Vec2::Y, 0.5);
        assert!((mid.length() - 1.0).abs() < 1e-4);
        assert!(approx(mid, Vec2::new(0.70710677, 0.70710677)));
        assert!(approx(slerp(Vec2::X, Vec2::Y, 0.0), Vec2::X));
        assert!(approx(slerp(Vec2::X, Vec2::Y, 1.0), Vec2::Y));
    }

    #[test]
    fn snap_rejects_zero_aim() {
        assert!(snap_direction(Vec2::ZERO, 8).is_none());
    }

    #[test]
    fn snapped_aim_within_one_region() {
        let regions = 16;
        let step = TAU / regions as f32;
        for i in 0..360 {
            let angle = (i as f32).to_radians();
            let raw = Vec2::from_angle(angle) * 0.7;
            let snapped = snap_direction(raw, regions).unwrap();

            assert!((snapped.length() - 1.0).abs() < 1e-5);
            assert!(signed_angle(raw, snapped).abs() <= step + 1e-5);

            let k = snapped.y.atan2(snapped.x) / step;
            assert!((k - k.round()).abs() < 1e-3);
        }
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Vec2::new(1.0, 1.0);
        let b = Vec2::new(4.0, 5.0);
        assert!((distance(a, b) - 5.0).abs() < 1e-6);
        assert!((distance(b, a) - 5.0).abs() < 1e-6);
    }
}

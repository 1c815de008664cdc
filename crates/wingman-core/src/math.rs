//! Small scalar and vector helpers shared by the flight and AI crates.

use glam::DVec3;

/// Linear interpolation from `a` to `b`, with `t` clamped to [0, 1].
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t.clamp(0.0, 1.0)
}

/// Linear interpolation across a `(at_zero, at_one)` pair.
pub fn lerp_range(range: (f64, f64), t: f64) -> f64 {
    lerp(range.0, range.1, t)
}

/// Clamp to [0, 1].
pub fn clamp01(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

/// Shortest signed difference `to - from` in degrees, wrapped to [-180, 180).
pub fn delta_angle_deg(from: f64, to: f64) -> f64 {
    (to - from + 180.0).rem_euclid(360.0) - 180.0
}

/// Signed angle (degrees) from `from` to `to`, measured about `axis`
/// with the right-hand rule. Zero if either vector is degenerate.
pub fn signed_angle_deg(from: DVec3, to: DVec3, axis: DVec3) -> f64 {
    if from.length_squared() < 1e-12 || to.length_squared() < 1e-12 {
        return 0.0;
    }
    let cross = from.cross(to);
    cross.dot(axis).atan2(from.dot(to)).to_degrees()
}

/// Remove the component of `v` along the unit vector `normal`.
pub fn project_on_plane(v: DVec3, normal: DVec3) -> DVec3 {
    v - normal * v.dot(normal)
}

//! Ground-plane vector helpers.
//! Agents move on the `(x, z)` plane of a Y-up world; these helpers project,
//! clamp and orient 2D vectors on that plane.
use glam::{Quat, Vec2, Vec3};

/// Projects a world-space position onto the ground plane.
///
/// The returned vector stores world `x` in `.x` and world `z` in `.y`.
///
/// # Examples
/// ```
/// use flock_steer::vector_math::ground_plane;
/// use glam::{Vec2, Vec3};
/// assert_eq!(ground_plane(Vec3::new(1.0, 7.0, -2.0)), Vec2::new(1.0, -2.0));
/// ```
#[must_use]
pub const fn ground_plane(position: Vec3) -> Vec2 {
    Vec2::new(position.x, position.z)
}

/// Lifts a ground-plane point back into world space at the given height.
#[must_use]
pub const fn lift(point: Vec2, height: f32) -> Vec3 {
    Vec3::new(point.x, height, point.y)
}

/// Clamps the magnitude of `vector` to `max_len`.
///
/// Vectors already within the limit are returned unchanged. Non-finite input
/// collapses to zero so a single bad sample cannot poison an integration.
///
/// # Examples
///
/// ```
/// use flock_steer::truncate;
/// use glam::Vec2;
/// let clamped = truncate(Vec2::new(3.0, 4.0), 1.0);
/// assert!((clamped.length() - 1.0).abs() < 1e-6);
/// assert_eq!(truncate(Vec2::new(0.3, 0.4), 1.0), Vec2::new(0.3, 0.4));
/// assert_eq!(truncate(Vec2::new(f32::NAN, 1.0), 1.0), Vec2::ZERO);
/// ```
#[must_use]
pub fn truncate(vector: Vec2, max_len: f32) -> Vec2 {
    if !vector.is_finite() {
        return Vec2::ZERO;
    }
    if vector.length() > max_len {
        vector.normalize_or_zero() * max_len.max(0.0)
    } else {
        vector
    }
}

/// Returns the unit vector in the direction of `vector`, or zero when the
/// input is zero or not finite.
///
/// # Examples
///
/// ```
/// use flock_steer::direction;
/// use glam::Vec2;
/// let d = direction(Vec2::new(3.0, 4.0));
/// assert!((d.x - 0.6).abs() < 1e-6);
/// assert_eq!(direction(Vec2::ZERO), Vec2::ZERO);
/// ```
#[must_use]
pub fn direction(vector: Vec2) -> Vec2 {
    if !vector.is_finite() {
        return Vec2::ZERO;
    }
    vector.normalize_or_zero()
}

/// Rotation about the up axis that faces an agent along `velocity`.
///
/// The heading is `atan2(v.y, v.x) - π/2`; callers only pass velocities whose
/// length exceeds [`EPSILON`](crate::EPSILON) since the angle of a vanishing
/// vector is numerically meaningless.
#[must_use]
pub fn facing_rotation(velocity: Vec2) -> Quat {
    debug_assert!(
        velocity.length() > crate::EPSILON,
        "facing_rotation requires a non-vanishing velocity"
    );
    let angle = velocity.y.atan2(velocity.x) - std::f32::consts::FRAC_PI_2;
    Quat::from_rotation_y(angle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    fn facing_rotation_is_half_angle_about_up() {
        let q = facing_rotation(Vec2::new(0.0, 2.0));
        // Facing +z (ground .y) means a zero heading.
        assert_relative_eq!(q.x, 0.0);
        assert_relative_eq!(q.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(q.z, 0.0);
        assert_relative_eq!(q.w, 1.0, epsilon = 1e-6);

        let q = facing_rotation(Vec2::new(1.0, 0.0));
        let half = -std::f32::consts::FRAC_PI_4;
        assert_relative_eq!(q.y, half.sin(), epsilon = 1e-6);
        assert_relative_eq!(q.w, half.cos(), epsilon = 1e-6);
    }

    #[rstest]
    #[case(Vec2::new(10.0, 0.0), 2.0, 2.0)]
    #[case(Vec2::new(-6.0, 8.0), 5.0, 5.0)]
    #[case(Vec2::new(0.5, 0.0), 2.0, 0.5)]
    #[case(Vec2::ZERO, 1.0, 0.0)]
    fn truncate_bounds_length(#[case] input: Vec2, #[case] max: f32, #[case] expected: f32) {
        assert_relative_eq!(truncate(input, max).length(), expected, epsilon = 1e-5);
    }

    #[rstest]
    fn lift_round_trips_through_ground_plane() {
        let p = lift(Vec2::new(4.0, -3.0), 12.5);
        assert_eq!(p, Vec3::new(4.0, 12.5, -3.0));
        assert_eq!(ground_plane(p), Vec2::new(4.0, -3.0));
    }
}

//! Physics helper functions.
//!
//! Provides the force-to-acceleration step shared by the tick integrator and
//! standalone unit tests.

use glam::Vec2;

/// Smallest acceptable mass to avoid numerically unstable accelerations.
const MIN_MASS: f32 = 1e-12;

/// Computes the acceleration produced by `force` acting on `mass`.
///
/// Returns `None` if `mass` is non-positive or effectively zero (see
/// [`MIN_MASS`]). The calculation applies `F=ma` per component.
///
/// # Examples
///
/// ```
/// use flock_steer::applied_acceleration;
/// use glam::Vec2;
/// let accel = applied_acceleration(Vec2::new(7.0, -14.0), 7.0).unwrap();
/// assert!((accel.x - 1.0).abs() < 1e-6);
/// assert!((accel.y + 2.0).abs() < 1e-6);
/// assert!(applied_acceleration(Vec2::ONE, 0.0).is_none());
/// ```
#[must_use]
pub fn applied_acceleration(force: Vec2, mass: f32) -> Option<Vec2> {
    if mass > MIN_MASS {
        Some(force / mass)
    } else {
        None
    }
}

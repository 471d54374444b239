//! Utility helpers for tests.
//!
//! Constructors for agents and movement systems plus a driver that ticks a
//! simulation until its flocks disband.
pub mod agents;
pub mod sim;

use glam::Vec2;

/// Assert that two ground-plane vectors are within `tolerance` of each other.
///
/// # Panics
/// Panics with both vectors in the message if they differ by more than
/// `tolerance` on either axis.
pub fn assert_vec2_near(actual: Vec2, expected: Vec2, tolerance: f32) {
    assert!(
        approx::abs_diff_eq!(actual.x, expected.x, epsilon = tolerance)
            && approx::abs_diff_eq!(actual.y, expected.y, epsilon = tolerance),
        "{actual} is not within {tolerance} of {expected}"
    );
}

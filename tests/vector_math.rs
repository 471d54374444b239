use flock_steer::vector_math::facing_rotation;
use flock_steer::{direction, truncate};
use glam::Vec2;

#[test]
fn direction_returns_zero_for_nan() {
    assert_eq!(direction(Vec2::new(f32::NAN, 1.0)), Vec2::ZERO);
}

#[test]
fn direction_returns_normalized_vector() {
    assert_eq!(direction(Vec2::new(3.0, 0.0)), Vec2::X);
}

#[test]
fn truncate_rejects_infinite_input() {
    assert_eq!(truncate(Vec2::new(f32::INFINITY, 0.0), 2.0), Vec2::ZERO);
}

#[test]
fn facing_rotation_is_a_half_angle_about_up() {
    let rotation = facing_rotation(Vec2::new(-2.0, 2.0));
    let angle = 3.0 * std::f32::consts::FRAC_PI_4 - std::f32::consts::FRAC_PI_2;
    assert!(rotation.x.abs() < 1e-6 && rotation.z.abs() < 1e-6);
    assert!((rotation.y - (angle / 2.0).sin()).abs() < 1e-6);
    assert!((rotation.w - (angle / 2.0).cos()).abs() < 1e-6);
}

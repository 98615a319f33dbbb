// Math utilities and helper functions

use glam::{EulerRot, Quat, Vec3};

/// Linear interpolation
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Horizontal (XZ-plane) speed of a velocity vector
pub fn horizontal_speed(velocity: Vec3) -> f32 {
    (velocity.x * velocity.x + velocity.z * velocity.z).sqrt()
}

/// Velocity with its vertical component removed
pub fn horizontal(velocity: Vec3) -> Vec3 {
    Vec3::new(velocity.x, 0.0, velocity.z)
}

/// Convert m/s to the integer km/h shown on the HUD
pub fn display_speed_kmh(speed_ms: f32) -> u32 {
    // Negative or NaN input saturates to 0
    (speed_ms * 3.6).round().max(0.0) as u32
}

/// World-space forward direction for a yaw angle.
///
/// Vehicles face -Z at yaw 0.
pub fn forward_from_yaw(yaw: f32) -> Vec3 {
    Vec3::new(-yaw.sin(), 0.0, -yaw.cos())
}

/// World-space right direction for a yaw angle
pub fn right_from_yaw(yaw: f32) -> Vec3 {
    Vec3::new(yaw.cos(), 0.0, -yaw.sin())
}

/// Euler angles of a rotation as (x = pitch, y = yaw, z = roll).
///
/// Decomposed yaw-first so heading covers the full circle and a car facing
/// backwards does not read as flipped over.
pub fn euler_angles(rotation: Quat) -> Vec3 {
    let (yaw, pitch, roll) = rotation.to_euler(EulerRot::YXZ);
    Vec3::new(pitch, yaw, roll)
}

/// Check that every component of a vector is finite
pub fn is_finite(v: Vec3) -> bool {
    v.x.is_finite() && v.y.is_finite() && v.z.is_finite()
}

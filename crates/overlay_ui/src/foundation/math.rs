//! Math utilities and types
//!
//! Provides fundamental math types for overlay layout and world-space rendering.

pub use nalgebra::{Vector2, Vector3, Vector4};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type (also used for RGBA colors)
pub type Vec4 = Vector4<f32>;

/// Linear interpolation between two scalars
pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

/// Clamp a scalar to the [0, 1] range
pub fn saturate(value: f32) -> f32 {
    value.clamp(0.0, 1.0)
}

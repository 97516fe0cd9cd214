//! Common types for all quarry crates.

extern crate nalgebra_glm as na;

pub mod components;

/// Alias for convenience
pub type Vector2 = na::Vec2;
/// Alias for convenience
pub type Vector3 = na::Vec3;

/// Alias for convenience
pub type Vector2i = na::IVec2;
/// Alias for convenience
pub type Vector3i = na::IVec3;

/// Alias for convenience
pub type Vector4 = na::Vec4;

/// Alias for convenience
pub type Matrix4 = na::Mat4x4;

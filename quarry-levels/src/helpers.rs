//! Helper functions for parsing

use na::{Vector2, Vector3};

/// Read 4 bytes at `offset`. Callers only hand in fixed-size records, so this is always in bounds.
fn word(slice: &[u8], offset: usize) -> [u8; 4] {
    let mut bytes = [0; 4];
    bytes.copy_from_slice(&slice[offset..offset + 4]);
    bytes
}

/// Turn a slice into a le i32, the int datatype in a bsp file.
/// # Panics
/// If slice is shorter than 4 bytes
pub fn slice_to_i32(slice: &[u8]) -> i32 {
    i32::from_le_bytes(word(slice, 0))
}

/// Turn a slice into a le u32, used for some bitflags.
/// # Panics
/// If slice is shorter than 4 bytes
pub fn slice_to_u32(slice: &[u8]) -> u32 {
    u32::from_le_bytes(word(slice, 0))
}

/// Turn a slice into a le f32, the float datatype in a bsp file.
/// # Panics
/// If slice is shorter than 4 bytes
pub fn slice_to_f32(slice: &[u8]) -> f32 {
    f32::from_bits(u32::from_le_bytes(word(slice, 0)))
}

/// Turn a slice of floats into a 3D vector
/// # Panics
/// If slice isn't 12 bytes long.
pub fn slice_to_vec3(slice: &[u8]) -> Vector3<f32> {
    Vector3::new(
        slice_to_f32(&slice[0..4]),
        slice_to_f32(&slice[4..8]),
        slice_to_f32(&slice[8..12]),
    )
}

/// Turn a slice of i32s into a 3D vector
/// # Panics
/// If slice isn't 12 bytes long.
pub fn slice_to_vec3i(slice: &[u8]) -> Vector3<i32> {
    Vector3::new(
        slice_to_i32(&slice[0..4]),
        slice_to_i32(&slice[4..8]),
        slice_to_i32(&slice[8..12]),
    )
}

/// Turn a slice of floats into a 2D vector
/// # Panics
/// If slice isn't 8 bytes long.
pub fn slice_to_vec2(slice: &[u8]) -> Vector2<f32> {
    Vector2::new(slice_to_f32(&slice[0..4]), slice_to_f32(&slice[4..8]))
}

/// Turn a slice of i32s into a 2D vector
/// # Panics
/// If slice isn't 8 bytes long.
pub fn slice_to_vec2i(slice: &[u8]) -> Vector2<i32> {
    Vector2::new(slice_to_i32(&slice[0..4]), slice_to_i32(&slice[4..8]))
}

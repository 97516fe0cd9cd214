#![allow(dead_code)]

use quarry_levels::prelude::*;
use quarry_levels::traits::faces::FaceRef;
use quarry_render::RenderBackend;
use quarry_types::components::{vp_matrix, CameraSettings, Transform};
use quarry_types::{Matrix4, Vector3, Vector3i};

pub const BIG: i32 = 1024;

pub fn v(x: f32, y: f32, z: f32) -> Vector3 {
    Vector3::new(x, y, z)
}

pub fn everywhere() -> (Vector3i, Vector3i) {
    (Vector3i::repeat(-BIG), Vector3i::repeat(BIG))
}

/// A camera at `position`, looking along the x axis, forwards or backwards.
pub fn camera(position: Vector3, backwards: bool) -> Matrix4 {
    let yaw = if backwards { std::f32::consts::PI } else { 0.0 };
    let transform = Transform::new(position, v(0.0, yaw, 0.0));

    vp_matrix(&transform, &CameraSettings::default(), 1.0)
}

/// A 2x2 square at the given x, facing along `normal_x`.
pub fn wall(x: f32, normal_x: f32) -> ([Vector3; 4], Vector3) {
    (
        [
            v(x, -1.0, -1.0),
            v(x, 1.0, -1.0),
            v(x, 1.0, 1.0),
            v(x, -1.0, 1.0),
        ],
        v(normal_x, 0.0, 0.0),
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    Texture(TextureHandle, Option<LightmapHandle>),
    Shader(ShaderHandle),
    Face(u32),
    Flush,
}

/// Writes down everything it's asked to do.
#[derive(Debug, Default)]
pub struct Recorder {
    pub calls: Vec<Call>,
}

impl Recorder {
    /// Faces drawn, in order
    pub fn faces(&self) -> Vec<u32> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Face(face) => Some(*face),
                _ => None,
            })
            .collect()
    }
}

impl RenderBackend for Recorder {
    fn begin_texture_batch(&mut self, texture: TextureHandle, lightmap: Option<LightmapHandle>) {
        self.calls.push(Call::Texture(texture, lightmap));
    }

    fn begin_shader_batch(&mut self, shader: ShaderHandle) {
        self.calls.push(Call::Shader(shader));
    }

    fn draw_face(&mut self, face: FaceRef<'_>) {
        assert!(face.indices.iter().all(|i| (*i as usize) < face.vertices.len()));
        self.calls.push(Call::Face(face.index));
    }

    fn flush(&mut self) {
        self.calls.push(Call::Flush);
    }
}

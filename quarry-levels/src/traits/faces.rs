use na::{Vector2, Vector3};
use std::ops::Range;

use super::planes::PlaneAxis;
use super::vertices::{HasVertices, MeshVert, Vertex};
use crate::materials::{LightmapHandle, Material};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum FaceType {
    Polygon = 1,
    Patch = 2,
    Mesh = 3,
    Billboard = 4,
}

impl FaceType {
    pub fn from_i32(value: i32) -> Option<FaceType> {
        match value {
            1 => Some(FaceType::Polygon),
            2 => Some(FaceType::Patch),
            3 => Some(FaceType::Mesh),
            4 => Some(FaceType::Billboard),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    pub face_type: FaceType,
    pub texture_idx: u32,
    pub material: Material,
    pub lightmap: Option<LightmapHandle>,

    /// For patches, this is the tesselated vertices, not the control points.
    pub vertices_idx: Range<u32>,
    pub meshverts_idx: Range<u32>,

    pub normal: Vector3<f32>,
    pub axis: PlaneAxis,

    /// Average of the face's vertices
    pub centroid: Vector3<f32>,

    /// Patch control point dimensions
    pub size: Vector2<i32>,
}

impl Face {
    /// `normal · v`, using the axis shortcut when possible
    #[inline]
    pub fn normal_dot(&self, v: &Vector3<f32>) -> f32 {
        self.axis.dot(&self.normal, v)
    }
}

/// A face, along with the geometry needed to draw it.
#[derive(Debug, Clone, Copy)]
pub struct FaceRef<'a> {
    pub index: u32,
    pub face: &'a Face,
    pub vertices: &'a [Vertex],

    /// Triangle list indices, relative to `vertices`
    pub indices: &'a [MeshVert],
}

pub trait HasFaces: HasVertices {
    type FacesIter<'a>: Iterator<Item = &'a Face>
    where
        Self: 'a;

    fn faces_iter(&self) -> Self::FacesIter<'_>;
    fn faces_len(&self) -> u32;
    fn get_face(&self, index: u32) -> &Face;

    fn face_ref(&self, index: u32) -> FaceRef<'_> {
        let face = self.get_face(index);
        FaceRef {
            index,
            face,
            vertices: self.vertex_slice(face.vertices_idx.clone()),
            indices: self.meshvert_slice(face.meshverts_idx.clone()),
        }
    }
}

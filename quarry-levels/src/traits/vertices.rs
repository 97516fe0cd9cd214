// Copyright (C) 2019 Oscar Shrimpton

// This program is free software: you can redistribute it and/or modify it
// under the terms of the GNU General Public License as published by the Free
// Software Foundation, either version 3 of the License, or (at your option)
// any later version.

// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or
// FITNESS FOR A PARTICULAR PURPOSE.  See the GNU General Public License for
// more details.

// You should have received a copy of the GNU General Public License along
// with this program.  If not, see <http://www.gnu.org/licenses/>.

use na::{Vector2, Vector3};
use std::ops::Range;

use crate::types::Rgba;

/// A vertex, used to describe a face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Vector3<f32>,
    pub tex: TexCoord,
    pub normal: Vector3<f32>,
    pub color: Rgba,
}

/// Texture coordinates. `surface` is for the face's texture, `lightmap` for its lightmap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TexCoord {
    pub surface: Vector2<f32>,
    pub lightmap: Vector2<f32>,
}

impl TexCoord {
    pub fn zero() -> TexCoord {
        TexCoord {
            surface: Vector2::zeros(),
            lightmap: Vector2::zeros(),
        }
    }
}

/// An index into a face's vertices, relative to the first one.
pub type MeshVert = u32;

pub trait HasVertices {
    fn vertices_len(&self) -> u32;
    fn get_vertex(&self, index: u32) -> &Vertex;
    fn vertex_slice(&self, range: Range<u32>) -> &[Vertex];
    fn meshvert_slice(&self, range: Range<u32>) -> &[MeshVert];
}

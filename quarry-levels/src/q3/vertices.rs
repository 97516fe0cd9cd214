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

use std::ops::Range;

use super::{records, Lump, Q3Map};
use crate::helpers::{slice_to_i32, slice_to_vec2, slice_to_vec3};
use crate::traits::vertices::*;
use crate::types::{ParseError, Result, Rgba};

/// The size of one vertex
const VERTEX_SIZE: usize = (4 * 3) + (2 * 2 * 4) + (4 * 3) + 4;

/// The size of one meshvert
const MESHVERT_SIZE: usize = 4;

/// Parse a Vertex list from a buffer.
pub fn verts_from_data(data: &[u8]) -> Vec<Vertex> {
    records(Lump::Vertices, data, VERTEX_SIZE)
        .map(|vertex| Vertex {
            position: slice_to_vec3(&vertex[0..12]),
            tex: TexCoord {
                surface: slice_to_vec2(&vertex[12..20]),
                lightmap: slice_to_vec2(&vertex[20..28]),
            },
            normal: slice_to_vec3(&vertex[28..40]),
            color: Rgba::from_slice(&vertex[40..44]),
        })
        .collect()
}

/// Parse the given data as a list of MeshVerts.
/// These are offsets from a face's first vertex, so only their sign can be checked here.
pub fn meshverts_from_data(data: &[u8]) -> Result<Vec<MeshVert>> {
    records(Lump::MeshVerts, data, MESHVERT_SIZE)
        .map(|meshvert| {
            let offset = slice_to_i32(meshvert);
            if offset < 0 {
                return Err(ParseError::BadReference {
                    lump: "meshverts",
                    index: offset as i64,
                });
            }

            Ok(offset as MeshVert)
        })
        .collect()
}

impl HasVertices for Q3Map {
    fn vertices_len(&self) -> u32 {
        self.vertices.len() as u32
    }

    fn get_vertex(&self, index: u32) -> &Vertex {
        &self.vertices[index as usize]
    }

    fn vertex_slice(&self, range: Range<u32>) -> &[Vertex] {
        &self.vertices[range.start as usize..range.end as usize]
    }

    fn meshvert_slice(&self, range: Range<u32>) -> &[MeshVert] {
        &self.meshverts[range.start as usize..range.end as usize]
    }
}

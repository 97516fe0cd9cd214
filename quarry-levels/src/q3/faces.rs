/*
 * Copyright (C) Oscar Shrimpton 2020
 *
 * This program is free software: you can redistribute it and/or modify it
 * under the terms of the GNU General Public License as published by the Free
 * Software Foundation, either version 3 of the License, or (at your option)
 * any later version.
 *
 * This program is distributed in the hope that it will be useful, but WITHOUT
 * ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or
 * FITNESS FOR A PARTICULAR PURPOSE.  See the GNU General Public License for
 * more details.
 *
 * You should have received a copy of the GNU General Public License along
 * with this program.  If not, see <http://www.gnu.org/licenses/>.
 */

use log::warn;
use na::Vector3;

use super::{checked_index, checked_range, patch, records, Lump, Q3Map};
use crate::helpers::{slice_to_i32, slice_to_vec2i, slice_to_vec3};
use crate::materials::{LightmapHandle, Material};
use crate::traits::faces::*;
use crate::traits::planes::PlaneAxis;
use crate::traits::vertices::{MeshVert, Vertex};
use crate::types::{ParseError, Result};

const FACE_SIZE: usize = (4 * 8) + (4 * 2) + (4 * 2) + (4 * 3) + ((4 * 2) * 3) + (4 * 3) + (4 * 2);

/// Everything faces refer to, so they can be checked as they're parsed.
pub struct FaceContext<'a> {
    pub materials: &'a [Material],
    pub n_lightmaps: u32,
    pub patch_tesselation: u32,
}

/// Parse the faces lump. Patches are tesselated, with the generated geometry appended
/// to `vertices` and `meshverts`.
pub fn from_data(
    data: &[u8],
    ctx: &FaceContext<'_>,
    vertices: &mut Vec<Vertex>,
    meshverts: &mut Vec<MeshVert>,
) -> Result<Box<[Face]>> {
    records(Lump::Faces, data, FACE_SIZE)
        .enumerate()
        .map(|(n, raw)| face_from_slice(n, raw, ctx, vertices, meshverts))
        .collect()
}

fn face_from_slice(
    record: usize,
    data: &[u8],
    ctx: &FaceContext<'_>,
    vertices: &mut Vec<Vertex>,
    meshverts: &mut Vec<MeshVert>,
) -> Result<Face> {
    let texture_idx = checked_index("faces", slice_to_i32(&data[0..4]), ctx.materials.len())?;

    // 4..8 is the effect, which we don't use
    let face_type = FaceType::from_i32(slice_to_i32(&data[8..12])).ok_or(ParseError::Malformed {
        lump: "faces",
        record,
    })?;

    let mut vertices_idx = checked_range(
        "faces",
        slice_to_i32(&data[12..16]),
        slice_to_i32(&data[16..20]),
        vertices.len(),
    )?;
    let mut meshverts_idx = checked_range(
        "faces",
        slice_to_i32(&data[20..24]),
        slice_to_i32(&data[24..28]),
        meshverts.len(),
    )?;

    let n_vertices = vertices_idx.len() as u32;
    for offset in &meshverts[meshverts_idx.start as usize..meshverts_idx.end as usize] {
        if *offset >= n_vertices {
            return Err(ParseError::BadReference {
                lump: "meshverts",
                index: *offset as i64,
            });
        }
    }

    let lightmap = match slice_to_i32(&data[28..32]) {
        idx if idx < 0 => None,
        idx => Some(LightmapHandle(checked_index(
            "faces",
            idx,
            ctx.n_lightmaps as usize,
        )?)),
    };

    // 32..84 are lightmap projection details, which the renderer doesn't need.
    let normal = slice_to_vec3(&data[84..96]);
    let size = slice_to_vec2i(&data[96..104]);

    if face_type == FaceType::Patch {
        let control: Vec<Vertex> =
            vertices[vertices_idx.start as usize..vertices_idx.end as usize].to_vec();

        match patch::tesselate(&control, size, ctx.patch_tesselation, vertices, meshverts) {
            Some((v, m)) => {
                vertices_idx = v;
                meshverts_idx = m;
            }
            None => {
                warn!(
                    "Patch face {} has a bad control grid ({}x{} from {} vertices), it won't be drawn.",
                    record,
                    size.x,
                    size.y,
                    control.len()
                );
                meshverts_idx = 0..0;
            }
        }
    }

    let face_verts = &vertices[vertices_idx.start as usize..vertices_idx.end as usize];
    let centroid = if face_verts.is_empty() {
        Vector3::zeros()
    } else {
        face_verts
            .iter()
            .fold(Vector3::zeros(), |acc, v| acc + v.position)
            / face_verts.len() as f32
    };

    Ok(Face {
        face_type,
        texture_idx,
        material: ctx.materials[texture_idx as usize],
        lightmap,
        vertices_idx,
        meshverts_idx,
        axis: PlaneAxis::from_normal(&normal),
        normal,
        centroid,
        size,
    })
}

impl HasFaces for Q3Map {
    type FacesIter<'a> = std::slice::Iter<'a, Face>;

    fn faces_iter(&self) -> Self::FacesIter<'_> {
        self.faces.iter()
    }

    fn faces_len(&self) -> u32 {
        self.faces.len() as u32
    }

    fn get_face(&self, index: u32) -> &Face {
        &self.faces[index as usize]
    }
}

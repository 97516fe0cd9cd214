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

//! A complete BSP file

// Trait implementations are stored in their own files.

use log::{debug, warn};
use std::io::{Cursor, Read, Seek, SeekFrom};

use super::header::{Header, Lump, BSP_VERSION};
use super::*;
use crate::config::LoadConfig;
use crate::materials::{Material, MaterialResolver, RawTextures};
use crate::traits::brushes::Brush;
use crate::traits::faces::Face;
use crate::traits::planes::Plane;
use crate::traits::textures::Texture;
use crate::traits::tree::{BspLeaf, BspNode};
use crate::traits::vertices::{MeshVert, Vertex};
use crate::types::{ParseError, Result};

/// A parsed Quake 3 BSP File.
/// Every index in here has been checked, so queries can index with abandon.
#[derive(Debug, Clone)]
pub struct Q3Map {
    pub(crate) textures: Box<[Texture]>,
    pub(crate) planes: Box<[Plane]>,
    pub(crate) nodes: Box<[BspNode]>,
    pub(crate) leaves: Box<[BspLeaf]>,
    pub(crate) leaf_faces: Box<[u32]>,
    pub(crate) leaf_brushes: Box<[u32]>,
    pub(crate) brushes: Box<[Brush]>,
    pub(crate) vertices: Box<[Vertex]>,
    pub(crate) meshverts: Box<[MeshVert]>,
    pub(crate) faces: Box<[Face]>,
    pub(crate) lightmaps_len: u32,
    pub(crate) visdata: Option<VisData>,
    pub(crate) clusters_len: u32,
}

impl Q3Map {
    /// Parse `data` as a quake 3 bsp file, with the default settings and raw textures.
    pub fn parse(data: &[u8]) -> Result<Q3Map> {
        Q3Map::load(Cursor::new(data), &LoadConfig::default(), &mut RawTextures)
    }

    /// Load a quake 3 bsp file from `reader`.
    /// Lumps the level doesn't need are skipped, lumps that are truncated or the wrong
    /// size are treated as empty. References between lumps are all checked.
    pub fn load<R, M>(mut reader: R, config: &LoadConfig, resolver: &mut M) -> Result<Q3Map>
    where
        R: Read + Seek,
        M: MaterialResolver,
    {
        let stream_len = reader.seek(SeekFrom::End(0))?;
        reader.seek(SeekFrom::Start(0))?;

        let header = Header::read(&mut reader)?;
        if header.version != BSP_VERSION {
            if config.strict_version {
                return Err(ParseError::UnsupportedVersion(header.version));
            }
            warn!(
                "BSP version is {}, not {}. Trying to load it anyway.",
                header.version, BSP_VERSION
            );
        }

        for skipped in &[Lump::Entities, Lump::Models, Lump::Effects, Lump::LightVols] {
            debug!(
                "Skipping {} lump ({} bytes)",
                skipped.name(),
                header.dir_entries[*skipped as usize].length
            );
        }

        let mut lump = |lump: Lump| header.read_lump(&mut reader, lump, stream_len);

        let textures = textures::from_data(&lump(Lump::Textures)?);
        let planes = planes::from_data(&lump(Lump::Planes)?);
        let brushes = brushes::from_data(
            &lump(Lump::Brushes)?,
            &lump(Lump::BrushSides)?,
            &textures,
            planes.len() as u32,
        )?;

        let mut vertices = vertices::verts_from_data(&lump(Lump::Vertices)?);
        let mut meshverts = vertices::meshverts_from_data(&lump(Lump::MeshVerts)?)?;
        let lightmaps_len = light_maps::count(&lump(Lump::LightMaps)?);

        let materials: Vec<Material> = textures
            .iter()
            .enumerate()
            .map(|(idx, texture)| resolver.resolve(idx as u32, texture))
            .collect();

        let faces = faces::from_data(
            &lump(Lump::Faces)?,
            &faces::FaceContext {
                materials: &materials,
                n_lightmaps: lightmaps_len,
                patch_tesselation: config.patch_tesselation,
            },
            &mut vertices,
            &mut meshverts,
        )?;

        let visdata = visdata::from_data(&lump(Lump::VisData)?);

        let tree = tree::from_data(
            &lump(Lump::Nodes)?,
            &lump(Lump::Leaves)?,
            &lump(Lump::LeafFaces)?,
            &lump(Lump::LeafBrushes)?,
            &tree::TreeLimits {
                planes: planes.len() as u32,
                faces: faces.len() as u32,
                brushes: brushes.len() as u32,
                clusters: visdata.as_ref().map(|vis| vis.clusters()),
            },
        )?;

        let clusters_len = match &visdata {
            Some(vis) => vis.clusters(),
            None => tree
                .leaves
                .iter()
                .map(|leaf| leaf.cluster + 1)
                .max()
                .unwrap_or(0) as u32,
        };

        debug!(
            "Loaded map: {} planes, {} nodes, {} leaves, {} brushes, {} faces, {} vertices, {} clusters",
            planes.len(),
            tree.nodes.len(),
            tree.leaves.len(),
            brushes.len(),
            faces.len(),
            vertices.len(),
            clusters_len
        );

        Ok(Q3Map {
            textures,
            planes,
            nodes: tree.nodes,
            leaves: tree.leaves,
            leaf_faces: tree.leaf_faces,
            leaf_brushes: tree.leaf_brushes,
            brushes,
            vertices: vertices.into_boxed_slice(),
            meshverts: meshverts.into_boxed_slice(),
            faces,
            lightmaps_len,
            visdata,
            clusters_len,
        })
    }

    pub fn lightmaps_len(&self) -> u32 {
        self.lightmaps_len
    }

    pub fn clusters_len(&self) -> u32 {
        self.clusters_len
    }

    pub fn vis_data(&self) -> Option<&VisData> {
        self.visdata.as_ref()
    }
}

//! Writing small levels as IBSP byte streams, so tests can go through the real loader.
//!
//! ```ignore
//! let mut map = MapBuilder::new();
//! let solid = map.texture("solid", SurfaceFlags::empty(), ContentsFlags::SOLID);
//! let cube = map.box_brush(Vector3::zeros(), Vector3::repeat(1.0), solid);
//! map.leaf(0, Vector3::repeat(-64), Vector3::repeat(64), &[], &[cube]);
//! let map = map.load().unwrap();
//! ```

use na::Vector3;

use crate::q3::{Lump, Q3Map};
use crate::traits::textures::{ContentsFlags, SurfaceFlags};
use crate::traits::tree::NodeChild;
use crate::types::Result;

const HEADER_LEN: usize = 4 + 4 + 17 * 8;
const LIGHTMAP_SIZE: usize = 128 * 128 * 3;

fn put_i32(buf: &mut Vec<u8>, v: i32) {
    buf.extend_from_slice(&v.to_le_bytes());
}

fn put_f32(buf: &mut Vec<u8>, v: f32) {
    buf.extend_from_slice(&v.to_le_bytes());
}

fn put_vec3(buf: &mut Vec<u8>, v: &Vector3<f32>) {
    for c in v.iter() {
        put_f32(buf, *c);
    }
}

fn put_vec3i(buf: &mut Vec<u8>, v: &Vector3<i32>) {
    for c in v.iter() {
        put_i32(buf, *c);
    }
}

fn encode_child(child: NodeChild) -> i32 {
    match child {
        NodeChild::Node(idx) => idx as i32,
        NodeChild::Leaf(idx) => -(idx as i32 + 1),
    }
}

#[derive(Debug, Clone)]
struct RawNode {
    plane: u32,
    children: [NodeChild; 2],
    mins: Vector3<i32>,
    maxs: Vector3<i32>,
}

#[derive(Debug, Clone)]
struct RawLeaf {
    cluster: i32,
    mins: Vector3<i32>,
    maxs: Vector3<i32>,
    faces: (i32, i32),
    brushes: (i32, i32),
}

#[derive(Debug, Clone)]
struct RawFace {
    texture: u32,
    face_type: i32,
    vertices: (i32, i32),
    meshverts: (i32, i32),
    lightmap: i32,
    normal: Vector3<f32>,
    size: (i32, i32),
}

#[derive(Debug, Clone)]
struct RawVertex {
    position: Vector3<f32>,
    normal: Vector3<f32>,
}

/// Builds a level up piece by piece, then writes it out as a BSP file.
#[derive(Debug, Clone)]
pub struct MapBuilder {
    version: u32,
    textures: Vec<(String, SurfaceFlags, ContentsFlags)>,
    planes: Vec<(Vector3<f32>, f32)>,
    nodes: Vec<Option<RawNode>>,
    leaves: Vec<RawLeaf>,
    leaf_faces: Vec<i32>,
    leaf_brushes: Vec<i32>,
    brushes: Vec<[i32; 3]>,
    sides: Vec<[i32; 2]>,
    vertices: Vec<RawVertex>,
    meshverts: Vec<i32>,
    faces: Vec<RawFace>,
    lightmaps: u32,
    visdata: Option<Vec<u8>>,
    overrides: Vec<(Lump, Vec<u8>)>,
}

impl Default for MapBuilder {
    fn default() -> Self {
        MapBuilder::new()
    }
}

impl MapBuilder {
    pub fn new() -> MapBuilder {
        MapBuilder {
            version: crate::q3::BSP_VERSION,
            textures: vec![],
            planes: vec![],
            nodes: vec![],
            leaves: vec![],
            leaf_faces: vec![],
            leaf_brushes: vec![],
            brushes: vec![],
            sides: vec![],
            vertices: vec![],
            meshverts: vec![],
            faces: vec![],
            lightmaps: 0,
            visdata: None,
            overrides: vec![],
        }
    }

    pub fn version(&mut self, version: u32) -> &mut Self {
        self.version = version;
        self
    }

    pub fn texture(&mut self, name: &str, surface: SurfaceFlags, contents: ContentsFlags) -> u32 {
        self.textures.push((name.to_owned(), surface, contents));
        self.textures.len() as u32 - 1
    }

    pub fn plane(&mut self, normal: Vector3<f32>, dist: f32) -> u32 {
        self.planes.push((normal, dist));
        self.planes.len() as u32 - 1
    }

    /// A brush from (plane, texture) pairs.
    pub fn brush(&mut self, texture: u32, sides: &[(u32, u32)]) -> u32 {
        let first = self.sides.len() as i32;
        for (plane, side_texture) in sides {
            self.sides.push([*plane as i32, *side_texture as i32]);
        }
        self.brushes
            .push([first, sides.len() as i32, texture as i32]);
        self.brushes.len() as u32 - 1
    }

    /// An axis aligned box brush. The minimum x side comes first.
    pub fn box_brush(&mut self, mins: Vector3<f32>, maxs: Vector3<f32>, texture: u32) -> u32 {
        let mut sides = Vec::with_capacity(6);
        for axis in 0..3 {
            let mut normal = Vector3::zeros();
            normal[axis] = -1.0;
            sides.push((self.plane(normal, -mins[axis]), texture));
        }
        for axis in 0..3 {
            let mut normal = Vector3::zeros();
            normal[axis] = 1.0;
            sides.push((self.plane(normal, maxs[axis]), texture));
        }

        self.brush(texture, &sides)
    }

    fn push_vertices(&mut self, points: &[Vector3<f32>], normal: Vector3<f32>) -> (i32, i32) {
        let first = self.vertices.len() as i32;
        self.vertices.extend(points.iter().map(|p| RawVertex {
            position: *p,
            normal,
        }));
        (first, points.len() as i32)
    }

    /// A convex polygon face, triangulated as a fan.
    pub fn polygon(
        &mut self,
        texture: u32,
        lightmap: Option<u32>,
        points: &[Vector3<f32>],
        normal: Vector3<f32>,
    ) -> u32 {
        let vertices = self.push_vertices(points, normal);

        let first_meshvert = self.meshverts.len() as i32;
        for i in 1..points.len().saturating_sub(1) {
            self.meshverts
                .extend_from_slice(&[0, i as i32, i as i32 + 1]);
        }

        self.faces.push(RawFace {
            texture,
            face_type: 1,
            vertices,
            meshverts: (first_meshvert, self.meshverts.len() as i32 - first_meshvert),
            lightmap: lightmap.map(|l| l as i32).unwrap_or(-1),
            normal,
            size: (0, 0),
        });
        self.faces.len() as u32 - 1
    }

    /// A bezier patch with a `width` x `height` grid of control points.
    pub fn patch(&mut self, texture: u32, control: &[Vector3<f32>], width: i32, height: i32) -> u32 {
        let vertices = self.push_vertices(control, Vector3::z());

        self.faces.push(RawFace {
            texture,
            face_type: 2,
            vertices,
            meshverts: (0, 0),
            lightmap: -1,
            normal: Vector3::zeros(),
            size: (width, height),
        });
        self.faces.len() as u32 - 1
    }

    pub fn leaf(
        &mut self,
        cluster: i32,
        mins: Vector3<i32>,
        maxs: Vector3<i32>,
        faces: &[u32],
        brushes: &[u32],
    ) -> u32 {
        let first_face = self.leaf_faces.len() as i32;
        self.leaf_faces.extend(faces.iter().map(|f| *f as i32));
        let first_brush = self.leaf_brushes.len() as i32;
        self.leaf_brushes.extend(brushes.iter().map(|b| *b as i32));

        self.leaves.push(RawLeaf {
            cluster,
            mins,
            maxs,
            faces: (first_face, faces.len() as i32),
            brushes: (first_brush, brushes.len() as i32),
        });
        self.leaves.len() as u32 - 1
    }

    /// Make room for a node that's filled in later with `set_node`.
    /// The first node reserved is the root.
    pub fn reserve_node(&mut self) -> u32 {
        self.nodes.push(None);
        self.nodes.len() as u32 - 1
    }

    pub fn set_node(
        &mut self,
        idx: u32,
        plane: u32,
        front: NodeChild,
        back: NodeChild,
        mins: Vector3<i32>,
        maxs: Vector3<i32>,
    ) {
        self.nodes[idx as usize] = Some(RawNode {
            plane,
            children: [front, back],
            mins,
            maxs,
        });
    }

    pub fn node(
        &mut self,
        plane: u32,
        front: NodeChild,
        back: NodeChild,
        mins: Vector3<i32>,
        maxs: Vector3<i32>,
    ) -> u32 {
        let idx = self.reserve_node();
        self.set_node(idx, plane, front, back, mins, maxs);
        idx
    }

    pub fn lightmaps(&mut self, count: u32) -> &mut Self {
        self.lightmaps = count;
        self
    }

    /// Set the visibility data for `clusters` clusters.
    pub fn visdata<F: Fn(u32, u32) -> bool>(&mut self, clusters: u32, visible: F) -> &mut Self {
        let row_len = ((clusters + 7) / 8) as usize;
        let mut data = Vec::new();
        put_i32(&mut data, clusters as i32);
        put_i32(&mut data, row_len as i32);

        for from in 0..clusters {
            let mut row = vec![0u8; row_len];
            for to in 0..clusters {
                if visible(from, to) {
                    row[(to / 8) as usize] |= 1 << (to % 8);
                }
            }
            data.extend_from_slice(&row);
        }

        self.visdata = Some(data);
        self
    }

    /// Write `data` for the given lump instead of what was built.
    pub fn override_lump(&mut self, lump: Lump, data: Vec<u8>) -> &mut Self {
        self.overrides.push((lump, data));
        self
    }

    fn lump_data(&self, lump: Lump) -> Vec<u8> {
        if let Some((_, data)) = self.overrides.iter().rev().find(|(l, _)| *l == lump) {
            return data.clone();
        }

        let mut buf = Vec::new();
        match lump {
            Lump::Textures => {
                for (name, surface, contents) in &self.textures {
                    let mut raw = name.as_bytes().to_vec();
                    raw.resize(64, 0);
                    buf.extend_from_slice(&raw);
                    put_i32(&mut buf, surface.bits() as i32);
                    put_i32(&mut buf, contents.bits() as i32);
                }
            }
            Lump::Planes => {
                for (normal, dist) in &self.planes {
                    put_vec3(&mut buf, normal);
                    put_f32(&mut buf, *dist);
                }
            }
            Lump::Nodes => {
                for node in &self.nodes {
                    match node {
                        Some(node) => {
                            put_i32(&mut buf, node.plane as i32);
                            put_i32(&mut buf, encode_child(node.children[0]));
                            put_i32(&mut buf, encode_child(node.children[1]));
                            put_vec3i(&mut buf, &node.mins);
                            put_vec3i(&mut buf, &node.maxs);
                        }
                        None => buf.extend_from_slice(&[0; 36]),
                    }
                }
            }
            Lump::Leaves => {
                for leaf in &self.leaves {
                    put_i32(&mut buf, leaf.cluster);
                    put_i32(&mut buf, 0);
                    put_vec3i(&mut buf, &leaf.mins);
                    put_vec3i(&mut buf, &leaf.maxs);
                    put_i32(&mut buf, leaf.faces.0);
                    put_i32(&mut buf, leaf.faces.1);
                    put_i32(&mut buf, leaf.brushes.0);
                    put_i32(&mut buf, leaf.brushes.1);
                }
            }
            Lump::LeafFaces => self.leaf_faces.iter().for_each(|v| put_i32(&mut buf, *v)),
            Lump::LeafBrushes => self.leaf_brushes.iter().for_each(|v| put_i32(&mut buf, *v)),
            Lump::Brushes => {
                for brush in &self.brushes {
                    brush.iter().for_each(|v| put_i32(&mut buf, *v));
                }
            }
            Lump::BrushSides => {
                for side in &self.sides {
                    side.iter().for_each(|v| put_i32(&mut buf, *v));
                }
            }
            Lump::Vertices => {
                for vertex in &self.vertices {
                    put_vec3(&mut buf, &vertex.position);
                    (0..4).for_each(|_| put_f32(&mut buf, 0.0));
                    put_vec3(&mut buf, &vertex.normal);
                    buf.extend_from_slice(&[255; 4]);
                }
            }
            Lump::MeshVerts => self.meshverts.iter().for_each(|v| put_i32(&mut buf, *v)),
            Lump::Faces => {
                for face in &self.faces {
                    put_i32(&mut buf, face.texture as i32);
                    put_i32(&mut buf, -1);
                    put_i32(&mut buf, face.face_type);
                    put_i32(&mut buf, face.vertices.0);
                    put_i32(&mut buf, face.vertices.1);
                    put_i32(&mut buf, face.meshverts.0);
                    put_i32(&mut buf, face.meshverts.1);
                    put_i32(&mut buf, face.lightmap);
                    // lightmap start, size, origin and vectors
                    buf.extend_from_slice(&[0; 4 * 13]);
                    put_vec3(&mut buf, &face.normal);
                    put_i32(&mut buf, face.size.0);
                    put_i32(&mut buf, face.size.1);
                }
            }
            Lump::LightMaps => buf.resize(self.lightmaps as usize * LIGHTMAP_SIZE, 0),
            Lump::VisData => {
                if let Some(vis) = &self.visdata {
                    buf.extend_from_slice(vis);
                }
            }
            Lump::Entities | Lump::Models | Lump::Effects | Lump::LightVols => {}
        }

        buf
    }

    /// Write out the level.
    pub fn build(&self) -> Vec<u8> {
        const LUMPS: [Lump; 17] = [
            Lump::Entities,
            Lump::Textures,
            Lump::Planes,
            Lump::Nodes,
            Lump::Leaves,
            Lump::LeafFaces,
            Lump::LeafBrushes,
            Lump::Models,
            Lump::Brushes,
            Lump::BrushSides,
            Lump::Vertices,
            Lump::MeshVerts,
            Lump::Effects,
            Lump::Faces,
            Lump::LightMaps,
            Lump::LightVols,
            Lump::VisData,
        ];

        let mut header = b"IBSP".to_vec();
        put_i32(&mut header, self.version as i32);

        let mut body = Vec::new();
        for lump in LUMPS.iter() {
            let data = self.lump_data(*lump);
            put_i32(&mut header, (HEADER_LEN + body.len()) as i32);
            put_i32(&mut header, data.len() as i32);

            body.extend_from_slice(&data);
            while body.len() % 4 != 0 {
                body.push(0);
            }
        }

        header.extend_from_slice(&body);
        header
    }

    /// Write out the level and load it back in with the default settings.
    pub fn load(&self) -> Result<Q3Map> {
        Q3Map::parse(&self.build())
    }
}

//! Parses the BSP tree into a usable format

use bitvec::prelude::*;
use log::warn;

use super::{checked_index, checked_range, records, Lump, Q3Map};
use crate::helpers::{slice_to_i32, slice_to_vec3i};
use crate::traits::tree::*;
use crate::types::{ParseError, Result};

const NODE_SIZE: usize = 4 + (4 * 2) + (4 * 3) + (4 * 3);
const LEAF_SIZE: usize = 4 * 6 + (4 * 3 * 2);

/// How many of each thing the tree can refer to.
pub struct TreeLimits {
    pub planes: u32,
    pub faces: u32,
    pub brushes: u32,

    /// Clusters the visibility data covers, if there is any.
    pub clusters: Option<u32>,
}

/// The flattened tree, along with the lists leaves index into.
pub struct Tree {
    pub nodes: Box<[BspNode]>,
    pub leaves: Box<[BspLeaf]>,
    pub leaf_faces: Box<[u32]>,
    pub leaf_brushes: Box<[u32]>,
}

pub fn from_data(
    nodes: &[u8],
    leaves: &[u8],
    leaf_faces: &[u8],
    leaf_brushes: &[u8],
    limits: &TreeLimits,
) -> Result<Tree> {
    let leaf_faces = index_list(Lump::LeafFaces, leaf_faces, limits.faces)?;
    let leaf_brushes = index_list(Lump::LeafBrushes, leaf_brushes, limits.brushes)?;

    let leaves = records(Lump::Leaves, leaves, LEAF_SIZE)
        .map(|raw| -> Result<BspLeaf> {
            let cluster = slice_to_i32(&raw[0..4]);
            let cluster_ok = match limits.clusters {
                _ if cluster == -1 => true,
                Some(n) => cluster >= 0 && (cluster as u32) < n,
                None => cluster >= 0,
            };
            if !cluster_ok {
                return Err(ParseError::BadReference {
                    lump: "leaves",
                    index: cluster as i64,
                });
            }

            Ok(BspLeaf {
                cluster,
                area: slice_to_i32(&raw[4..8]),
                min: slice_to_vec3i(&raw[8..20]),
                max: slice_to_vec3i(&raw[20..32]),
                faces_idx: checked_range(
                    "leaves",
                    slice_to_i32(&raw[32..36]),
                    slice_to_i32(&raw[36..40]),
                    leaf_faces.len(),
                )?,
                brushes_idx: checked_range(
                    "leaves",
                    slice_to_i32(&raw[40..44]),
                    slice_to_i32(&raw[44..48]),
                    leaf_brushes.len(),
                )?,
            })
        })
        .collect::<Result<Box<[BspLeaf]>>>()?;

    if leaves.is_empty() {
        return Err(ParseError::Malformed {
            lump: "leaves",
            record: 0,
        });
    }

    let n_nodes = nodes.len() / NODE_SIZE;
    let nodes = records(Lump::Nodes, nodes, NODE_SIZE)
        .map(|raw| -> Result<BspNode> {
            Ok(BspNode {
                plane_idx: checked_index("nodes", slice_to_i32(&raw[0..4]), limits.planes as usize)?,
                children: [
                    decode_child(slice_to_i32(&raw[4..8]), n_nodes, leaves.len())?,
                    decode_child(slice_to_i32(&raw[8..12]), n_nodes, leaves.len())?,
                ],
                min: slice_to_vec3i(&raw[12..24]),
                max: slice_to_vec3i(&raw[24..36]),
            })
        })
        .collect::<Result<Box<[BspNode]>>>()?;

    check_tree(&nodes)?;

    Ok(Tree {
        nodes,
        leaves,
        leaf_faces,
        leaf_brushes,
    })
}

/// Parse a list of indices into something with `len` elements.
fn index_list(lump: Lump, data: &[u8], len: u32) -> Result<Box<[u32]>> {
    records(lump, data, 4)
        .map(|raw| checked_index(lump.name(), slice_to_i32(raw), len as usize))
        .collect()
}

/// Children are stored as node indices, or leaf indices as `-(leaf + 1)`.
fn decode_child(raw: i32, n_nodes: usize, n_leaves: usize) -> Result<NodeChild> {
    if raw >= 0 {
        Ok(NodeChild::Node(checked_index("nodes", raw, n_nodes)?))
    } else {
        Ok(NodeChild::Leaf(checked_index("nodes", -(raw + 1), n_leaves)?))
    }
}

/// Make sure every node is reachable from the root at most once, so walks terminate.
fn check_tree(nodes: &[BspNode]) -> Result<()> {
    if nodes.is_empty() {
        return Ok(());
    }

    let mut seen = bitvec![0; nodes.len()];
    let mut stack = vec![0u32];
    seen.set(0, true);

    while let Some(idx) = stack.pop() {
        for child in nodes[idx as usize].children.iter() {
            if let NodeChild::Node(child) = *child {
                if seen.replace(child as usize, true) {
                    return Err(ParseError::BadTree(child));
                }
                stack.push(child);
            }
        }
    }

    let unreachable = seen.count_zeros();
    if unreachable > 0 {
        warn!("{} nodes aren't reachable from the root", unreachable);
    }

    Ok(())
}

impl HasBspTree for Q3Map {
    fn root(&self) -> NodeChild {
        if self.nodes.is_empty() {
            NodeChild::Leaf(0)
        } else {
            NodeChild::Node(0)
        }
    }

    fn nodes_len(&self) -> u32 {
        self.nodes.len() as u32
    }

    fn get_node(&self, idx: u32) -> &BspNode {
        &self.nodes[idx as usize]
    }

    fn leaves_len(&self) -> u32 {
        self.leaves.len() as u32
    }

    fn get_leaf(&self, idx: u32) -> &BspLeaf {
        &self.leaves[idx as usize]
    }

    fn leaf_faces(&self, leaf: &BspLeaf) -> &[u32] {
        &self.leaf_faces[leaf.faces_idx.start as usize..leaf.faces_idx.end as usize]
    }

    fn leaf_brushes(&self, leaf: &BspLeaf) -> &[u32] {
        &self.leaf_brushes[leaf.brushes_idx.start as usize..leaf.brushes_idx.end as usize]
    }
}

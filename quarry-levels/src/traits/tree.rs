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

//! The BSP tree, and point and box location within it.

use na::Vector3;
use std::ops::Range;

use super::planes::{BoxSide, HasPlanes};

/// One of a node's children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeChild {
    Node(u32),
    Leaf(u32),
}

/// An inner node of the tree. Points on or in front of the plane are under `children[0]`,
/// points behind it under `children[1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct BspNode {
    pub plane_idx: u32,
    pub children: [NodeChild; 2],
    pub min: Vector3<i32>,
    pub max: Vector3<i32>,
}

/// A convex region of space at the bottom of the tree.
#[derive(Debug, Clone, PartialEq)]
pub struct BspLeaf {
    /// Visibility cluster, or -1 if this leaf isn't in one
    pub cluster: i32,
    pub area: i32,
    pub min: Vector3<i32>,
    pub max: Vector3<i32>,

    /// Range into the leaf faces list
    pub faces_idx: Range<u32>,

    /// Range into the leaf brushes list
    pub brushes_idx: Range<u32>,
}

impl BspLeaf {
    /// The cluster, if the leaf has one.
    pub fn cluster(&self) -> Option<u32> {
        if self.cluster >= 0 {
            Some(self.cluster as u32)
        } else {
            None
        }
    }
}

pub trait HasBspTree: HasPlanes {
    /// Where every walk of the tree starts. This is node 0, or leaf 0 if there are no nodes.
    fn root(&self) -> NodeChild;

    fn nodes_len(&self) -> u32;
    fn get_node(&self, idx: u32) -> &BspNode;

    fn leaves_len(&self) -> u32;
    fn get_leaf(&self, idx: u32) -> &BspLeaf;

    /// Indices of the faces drawn in the given leaf.
    fn leaf_faces(&self, leaf: &BspLeaf) -> &[u32];

    /// Indices of the brushes touching the given leaf.
    fn leaf_brushes(&self, leaf: &BspLeaf) -> &[u32];

    /// Index of the leaf containing `point`.
    fn find_leaf(&self, point: &Vector3<f32>) -> u32 {
        let mut child = self.root();
        loop {
            match child {
                NodeChild::Leaf(idx) => return idx,
                NodeChild::Node(idx) => {
                    let node = self.get_node(idx);
                    let plane = self.get_plane(node.plane_idx);

                    child = if plane.distance_to(point) >= 0.0 {
                        node.children[0]
                    } else {
                        node.children[1]
                    };
                }
            }
        }
    }

    /// Visibility cluster of the leaf containing `point`, -1 if it has none.
    fn point_cluster(&self, point: &Vector3<f32>) -> i32 {
        self.get_leaf(self.find_leaf(point)).cluster
    }

    /// Collect every leaf the given box reaches into `out`.
    fn box_leaves(&self, mins: &Vector3<f32>, maxs: &Vector3<f32>, out: &mut Vec<u32>) {
        out.clear();

        let mut stack = vec![self.root()];
        while let Some(child) = stack.pop() {
            match child {
                NodeChild::Leaf(idx) => out.push(idx),
                NodeChild::Node(idx) => {
                    let node = self.get_node(idx);
                    match self.get_plane(node.plane_idx).box_side(mins, maxs) {
                        BoxSide::Front => stack.push(node.children[0]),
                        BoxSide::Back => stack.push(node.children[1]),
                        BoxSide::Both => {
                            stack.push(node.children[1]);
                            stack.push(node.children[0]);
                        }
                    }
                }
            }
        }
    }
}

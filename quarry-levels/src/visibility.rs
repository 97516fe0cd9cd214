//! Potentially visible set lookups between points and leaves.

use na::Vector3;

use crate::traits::tree::{BspLeaf, HasBspTree};
use crate::traits::visdata::HasVisData;

/// Whether anything at `b` could be visible from `a`.
/// Points outside of any cluster can see, and be seen from, everywhere.
pub fn visible<M: HasBspTree + HasVisData>(map: &M, a: &Vector3<f32>, b: &Vector3<f32>) -> bool {
    let from = map.get_leaf(map.find_leaf(a));
    let to = map.get_leaf(map.find_leaf(b));

    leaf_visible(map, from, to)
}

/// Whether `to` could be visible from `from`.
pub fn leaf_visible<M: HasVisData>(map: &M, from: &BspLeaf, to: &BspLeaf) -> bool {
    match (from.cluster(), to.cluster()) {
        (Some(from), Some(to)) => map.cluster_visible_from(from, to),
        _ => true,
    }
}

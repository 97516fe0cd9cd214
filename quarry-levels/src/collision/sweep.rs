//! Walking a swept shape down the tree

use na::Vector3;

use super::brush::clip_to_brush;
use super::context::TraceWork;
use super::{TraceContext, DIST_EPSILON};
use crate::features::MinCollisionFeatures;
use crate::traits::tree::NodeChild;

/// Part of the trace still to be checked against a subtree.
/// `p1f` and `p2f` are the fractions of the whole trace at `p1` and `p2`.
#[derive(Debug, Clone, Copy)]
pub(super) struct Segment {
    node: NodeChild,
    p1f: f32,
    p2f: f32,
    p1: Vector3<f32>,
    p2: Vector3<f32>,
}

impl<'m, M: MinCollisionFeatures> TraceContext<'m, M> {
    /// Check the whole trace against the tree.
    /// Subtrees nearer the start are visited first, so once something has been hit, anything
    /// starting past it can be skipped.
    pub(super) fn sweep(&mut self, work: &mut TraceWork) {
        let map = self.map();

        self.stack.clear();
        self.stack.push(Segment {
            node: map.root(),
            p1f: 0.0,
            p2f: 1.0,
            p1: work.start,
            p2: work.end,
        });

        while let Some(seg) = self.stack.pop() {
            // Already hit something closer than this part starts
            if work.trace.fraction <= seg.p1f {
                continue;
            }

            let node_idx = match seg.node {
                NodeChild::Leaf(leaf) => {
                    self.trace_to_leaf(leaf, work);
                    continue;
                }
                NodeChild::Node(idx) => idx,
            };

            let node = map.get_node(node_idx);
            let plane = map.get_plane(node.plane_idx);

            let t1 = plane.distance_to(&seg.p1);
            let t2 = plane.distance_to(&seg.p2);
            let offset = work.shape.offset(&plane.normal);

            if t1 >= offset && t2 >= offset {
                self.stack.push(Segment {
                    node: node.children[0],
                    ..seg
                });
                continue;
            }
            if t1 < -offset && t2 < -offset {
                self.stack.push(Segment {
                    node: node.children[1],
                    ..seg
                });
                continue;
            }

            // Put the crossing point a little way past the plane on either side, so neither
            // half misses brushes right on it.
            let (side, frac, frac2) = if t1 < t2 {
                let idist = 1.0 / (t1 - t2);
                (
                    1,
                    (t1 - offset + DIST_EPSILON) * idist,
                    (t1 + offset + DIST_EPSILON) * idist,
                )
            } else if t1 > t2 {
                let idist = 1.0 / (t1 - t2);
                (
                    0,
                    (t1 + offset + DIST_EPSILON) * idist,
                    (t1 - offset - DIST_EPSILON) * idist,
                )
            } else {
                // Parallel to the plane, but within reach of it. Both sides get the whole thing.
                (0, 1.0, 0.0)
            };

            let frac = frac.clamp(0.0, 1.0);
            let frac2 = frac2.clamp(0.0, 1.0);

            let near = Segment {
                node: node.children[side],
                p1f: seg.p1f,
                p2f: seg.p1f + (seg.p2f - seg.p1f) * frac,
                p1: seg.p1,
                p2: seg.p1 + (seg.p2 - seg.p1) * frac,
            };
            let far = Segment {
                node: node.children[side ^ 1],
                p1f: seg.p1f + (seg.p2f - seg.p1f) * frac2,
                p2f: seg.p2f,
                p1: seg.p1 + (seg.p2 - seg.p1) * frac2,
                p2: seg.p2,
            };

            // Near side comes off the stack first
            self.stack.push(far);
            self.stack.push(near);
        }
    }

    fn trace_to_leaf(&mut self, leaf_idx: u32, work: &mut TraceWork) {
        let map = self.map();
        let leaf = map.get_leaf(leaf_idx);

        for brush_idx in map.leaf_brushes(leaf) {
            if self.brush_marks.replace(*brush_idx as usize, true) {
                continue;
            }

            clip_to_brush(map, map.get_brush(*brush_idx), work);
            if work.trace.fraction == 0.0 {
                return;
            }
        }
    }
}

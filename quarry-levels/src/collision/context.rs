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

use bitvec::prelude::*;
use na::Vector3;

use super::brush::test_in_brush;
use super::sweep::Segment;
use super::{Trace, TraceEntity, TraceShape};
use crate::features::MinCollisionFeatures;
use crate::traits::textures::ContentsFlags;

/// The trace being run. `start` and `end` are where the centre of the shape goes.
pub(super) struct TraceWork {
    pub start: Vector3<f32>,
    pub end: Vector3<f32>,
    pub shape: TraceShape,
    pub trace: Trace,
}

/// Runs traces against a level.
///
/// Each brush can be reached through every leaf it touches, so a trace marks the brushes
/// it has tested. The marks (and the other scratch space a trace needs) live here rather
/// than in the level, so any number of contexts can share one level, each running one
/// trace at a time.
pub struct TraceContext<'m, M> {
    map: &'m M,

    /// Brushes tested, or skipped because of the mask, during the current trace
    pub(super) brush_marks: BitVec,

    pub(super) leaves: Vec<u32>,
    pub(super) stack: Vec<Segment>,
}

impl<'m, M: MinCollisionFeatures> TraceContext<'m, M> {
    pub fn new(map: &'m M) -> Self {
        TraceContext {
            map,
            brush_marks: bitvec![0; map.brushes_len() as usize],
            leaves: Vec::new(),
            stack: Vec::new(),
        }
    }

    pub fn map(&self) -> &'m M {
        self.map
    }

    /// Trace an infinitely thin line.
    pub fn ray_trace(&mut self, start: Vector3<f32>, end: Vector3<f32>, mask: ContentsFlags) -> Trace {
        self.trace(start, end, TraceShape::Ray, mask)
    }

    pub fn sphere_trace(
        &mut self,
        start: Vector3<f32>,
        end: Vector3<f32>,
        radius: f32,
        mask: ContentsFlags,
    ) -> Trace {
        self.trace(start, end, TraceShape::Sphere { radius }, mask)
    }

    /// Trace a box. `mins` and `maxs` are relative to `start` and `end`, and needn't
    /// be centred on them.
    pub fn box_trace(
        &mut self,
        start: Vector3<f32>,
        end: Vector3<f32>,
        mins: Vector3<f32>,
        maxs: Vector3<f32>,
        mask: ContentsFlags,
    ) -> Trace {
        let offset = (mins + maxs) * 0.5;
        let half_extents = (maxs - mins) * 0.5;

        let mut trace = self.trace(
            start + offset,
            end + offset,
            TraceShape::Box { half_extents },
            mask,
        );
        trace.end -= offset;

        trace
    }

    /// Trace a vertical capsule.
    pub fn capsule_trace(
        &mut self,
        start: Vector3<f32>,
        end: Vector3<f32>,
        radius: f32,
        half_height: f32,
        mask: ContentsFlags,
    ) -> Trace {
        self.trace(
            start,
            end,
            TraceShape::Capsule {
                radius,
                half_height,
            },
            mask,
        )
    }

    /// Find what's inside the given box. Every brush matching `mask` that the box touches
    /// has its contents added to the result, which is marked as solid if there were any.
    pub fn contents(&mut self, mins: Vector3<f32>, maxs: Vector3<f32>, mask: ContentsFlags) -> Trace {
        let centre = (mins + maxs) * 0.5;
        let half_extents = (maxs - mins) * 0.5;

        self.begin(mask);
        let mut work = TraceWork {
            start: centre,
            end: centre,
            shape: TraceShape::Box { half_extents },
            trace: Trace::empty(centre),
        };
        self.position_test(&mut work);

        finish(work)
    }

    /// Sweep `shape` from `start` to `end`.
    /// A trace that doesn't go anywhere checks what the shape is touching at `start`.
    pub fn trace(
        &mut self,
        start: Vector3<f32>,
        end: Vector3<f32>,
        shape: TraceShape,
        mask: ContentsFlags,
    ) -> Trace {
        self.begin(mask);
        let mut work = TraceWork {
            start,
            end,
            shape,
            trace: Trace::empty(end),
        };

        if start == end {
            self.position_test(&mut work);
        } else {
            self.sweep(&mut work);
        }

        finish(work)
    }

    /// Reset the marks, and mark brushes we aren't interested in so they're never tested.
    fn begin(&mut self, mask: ContentsFlags) {
        self.brush_marks.fill(false);
        for (idx, brush) in self.map.brushes_iter().enumerate() {
            if !brush.contents.intersects(mask) {
                self.brush_marks.set(idx, true);
            }
        }
    }

    /// Test the shape at `work.start` against every brush it might touch.
    fn position_test(&mut self, work: &mut TraceWork) {
        let map = self.map;
        let half = work.shape.half_extents();
        map.box_leaves(&(work.start - half), &(work.start + half), &mut self.leaves);

        for leaf_idx in self.leaves.iter() {
            let leaf = map.get_leaf(*leaf_idx);
            for brush_idx in map.leaf_brushes(leaf) {
                if self.brush_marks.replace(*brush_idx as usize, true) {
                    continue;
                }

                test_in_brush(map, map.get_brush(*brush_idx), work);
            }
        }
    }
}

fn finish(work: TraceWork) -> Trace {
    let mut trace = work.trace;

    trace.fraction = trace.fraction.clamp(0.0, 1.0);
    trace.end = if trace.fraction == 1.0 {
        work.end
    } else {
        work.start + (work.end - work.start) * trace.fraction
    };
    trace.entity = if trace.hit_anything() {
        TraceEntity::World
    } else {
        TraceEntity::None
    };

    trace
}

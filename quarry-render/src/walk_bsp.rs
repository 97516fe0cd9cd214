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

//! Walks a compiled BSP tree and renders it

use bitvec::prelude::*;

use quarry_levels::features::MinRenderFeatures;
use quarry_levels::prelude::{CullFace, Material};
use quarry_levels::traits::tree::NodeChild;
use quarry_types::Matrix4;

use crate::backend::RenderBackend;
use crate::config::RenderConfig;
use crate::culling::FrameView;
use crate::queue::RenderQueue;

/// Which faces have been dealt with this frame.
/// Faces are referenced by every leaf they cross, but only need drawing once.
#[derive(Debug, Clone)]
pub struct FaceMarks(BitVec);

impl FaceMarks {
    pub fn new(faces: u32) -> FaceMarks {
        FaceMarks(bitvec![0; faces as usize])
    }

    pub fn reset(&mut self) {
        self.0.fill(false);
    }

    /// Mark a face, returning false if it was already marked.
    pub fn mark(&mut self, face: u32) -> bool {
        !self.0.replace(face as usize, true)
    }
}

/// Counters for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub nodes_visited: usize,
    pub leaves_visited: usize,

    /// Nodes and leaves outside the view
    pub frustum_culled: usize,

    /// Leaves the camera's cluster can't see
    pub pvs_culled: usize,

    /// Faces thrown away for facing the wrong way
    pub faces_culled: usize,

    pub faces_queued: usize,

    /// Faces that didn't fit in the queue
    pub faces_dropped: usize,
}

/// Renders a level, one frame at a time.
/// Holds everything that changes from frame to frame, so the level itself is never written to.
pub struct LevelRenderer<'m, M> {
    map: &'m M,
    config: RenderConfig,

    face_marks: FaceMarks,
    stack: Vec<NodeChild>,
    queue: RenderQueue,
}

impl<'m, M: MinRenderFeatures> LevelRenderer<'m, M> {
    pub fn new(map: &'m M, config: RenderConfig) -> Self {
        LevelRenderer {
            map,
            face_marks: FaceMarks::new(map.faces_len()),
            stack: Vec::new(),
            queue: RenderQueue::new(config.max_primitives),
            config,
        }
    }

    pub fn map(&self) -> &'m M {
        self.map
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Draw everything visible with the given view projection matrix.
    pub fn render<B: RenderBackend>(&mut self, view_projection: &Matrix4, backend: &mut B) -> FrameStats {
        self.render_view(&FrameView::from_vp(view_projection), backend)
    }

    /// Draw everything visible from `view`.
    /// The tree is walked roughly nearest first, visiting the camera's side of each node first.
    pub fn render_view<B: RenderBackend>(&mut self, view: &FrameView, backend: &mut B) -> FrameStats {
        let map = self.map;
        let mut stats = FrameStats::default();

        self.face_marks.reset();
        self.queue.clear();

        let camera_cluster = map.get_leaf(map.find_leaf(&view.camera)).cluster();

        self.stack.clear();
        self.stack.push(map.root());
        while let Some(child) = self.stack.pop() {
            let idx = match child {
                NodeChild::Leaf(idx) => {
                    self.visit_leaf(idx, view, camera_cluster, &mut stats);
                    continue;
                }
                NodeChild::Node(idx) => idx,
            };

            let node = map.get_node(idx);
            if !view.box_visible(&node.min.cast(), &node.max.cast()) {
                stats.frustum_culled += 1;
                continue;
            }
            stats.nodes_visited += 1;

            if map.get_plane(node.plane_idx).distance_to(&view.camera) >= 0.0 {
                self.stack.push(node.children[1]);
                self.stack.push(node.children[0]);
            } else {
                self.stack.push(node.children[0]);
                self.stack.push(node.children[1]);
            }
        }

        self.queue.flush(map, backend);
        stats.faces_queued = self.queue.len();
        stats.faces_dropped = self.queue.dropped();

        stats
    }

    fn visit_leaf(
        &mut self,
        idx: u32,
        view: &FrameView,
        camera_cluster: Option<u32>,
        stats: &mut FrameStats,
    ) {
        let map = self.map;
        let leaf = map.get_leaf(idx);

        if !view.box_visible(&leaf.min.cast(), &leaf.max.cast()) {
            stats.frustum_culled += 1;
            return;
        }

        if let (Some(from), Some(to)) = (camera_cluster, leaf.cluster()) {
            if !map.cluster_visible_from(from, to) {
                stats.pvs_culled += 1;
                return;
            }
        }
        stats.leaves_visited += 1;

        for face_idx in map.leaf_faces(leaf).iter().copied() {
            if !self.face_marks.mark(face_idx) {
                continue;
            }

            let face = map.get_face(face_idx);
            let cull = match face.material {
                Material::Texture(_) => CullFace::Back,
                Material::Shader { cull, .. } => cull,
            };
            let cull = match cull {
                CullFace::Back if !self.config.backface_culling => CullFace::None,
                cull => cull,
            };

            if view.face_culled(face, cull) {
                stats.faces_culled += 1;
                continue;
            }

            match face.material {
                Material::Texture(texture) => self.queue.push_textured(texture, face.lightmap, face_idx),
                Material::Shader { handle, sort, .. } => {
                    let distance = (face.centroid - view.camera).norm();
                    self.queue.push_shaded(handle, sort, distance, face_idx);
                }
            }
        }
    }
}

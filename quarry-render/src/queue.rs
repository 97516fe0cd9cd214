//! Collecting a frame's faces into batches

use log::warn;
use std::cmp::Ordering;
use std::collections::BTreeMap;

use quarry_levels::prelude::{HasFaces, LightmapHandle, ShaderHandle, SortClass, TextureHandle};

use crate::backend::RenderBackend;

/// Where a shaded face goes in the draw order.
#[derive(Debug, Clone, Copy)]
pub enum SortKey {
    /// In the order it was queued
    Sequence(u32),

    /// Distance from the camera. Further away is drawn first, and after everything
    /// sorted by sequence.
    Depth(f32),
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Sequence(a), SortKey::Sequence(b)) => a.cmp(b),
            (SortKey::Sequence(_), SortKey::Depth(_)) => Ordering::Less,
            (SortKey::Depth(_), SortKey::Sequence(_)) => Ordering::Greater,
            (SortKey::Depth(a), SortKey::Depth(b)) => b.total_cmp(a),
        }
    }
}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SortKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SortKey {}

#[derive(Debug, Clone, Copy)]
struct ShadedFace {
    key: SortKey,
    sort: SortClass,
    shader: ShaderHandle,
    face: u32,
}

/// A frame's worth of faces, waiting to be drawn.
#[derive(Debug)]
pub struct RenderQueue {
    capacity: usize,
    len: usize,
    dropped: usize,

    textured: BTreeMap<(TextureHandle, Option<LightmapHandle>), Vec<u32>>,
    shaded: Vec<ShadedFace>,
    sequence: u32,
}

impl RenderQueue {
    /// A queue holding at most `capacity` faces a frame.
    pub fn new(capacity: usize) -> RenderQueue {
        RenderQueue {
            capacity,
            len: 0,
            dropped: 0,
            textured: BTreeMap::new(),
            shaded: Vec::new(),
            sequence: 0,
        }
    }

    /// Get ready for the next frame.
    pub fn clear(&mut self) {
        self.len = 0;
        self.dropped = 0;
        self.sequence = 0;
        for faces in self.textured.values_mut() {
            faces.clear();
        }
        self.shaded.clear();
    }

    /// Faces queued this frame
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Faces that didn't fit this frame
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Make room for one more face, or note that there isn't any.
    fn reserve(&mut self) -> bool {
        if self.len < self.capacity {
            self.len += 1;
            return true;
        }

        if self.dropped == 0 {
            warn!(
                "Render queue is full ({} faces), dropping the rest of this frame",
                self.capacity
            );
        }
        self.dropped += 1;

        false
    }

    /// Queue a face drawn with a raw texture.
    pub fn push_textured(&mut self, texture: TextureHandle, lightmap: Option<LightmapHandle>, face: u32) {
        if self.reserve() {
            self.textured.entry((texture, lightmap)).or_default().push(face);
        }
    }

    /// Queue a face drawn with a shader. Translucent sort classes are drawn furthest first.
    pub fn push_shaded(&mut self, shader: ShaderHandle, sort: SortClass, distance: f32, face: u32) {
        if !self.reserve() {
            return;
        }

        let key = if sort.is_translucent() {
            SortKey::Depth(distance)
        } else {
            let key = SortKey::Sequence(self.sequence);
            self.sequence += 1;
            key
        };

        self.shaded.push(ShadedFace {
            key,
            sort,
            shader,
            face,
        });
    }

    /// Hand everything to the backend, textured batches first.
    pub fn flush<M: HasFaces, B: RenderBackend>(&mut self, map: &M, backend: &mut B) {
        for ((texture, lightmap), faces) in self.textured.iter() {
            if faces.is_empty() {
                continue;
            }

            backend.begin_texture_batch(*texture, *lightmap);
            for face in faces {
                backend.draw_face(map.face_ref(*face));
            }
        }

        // Stable, so equal keys keep the order they were queued in
        self.shaded
            .sort_by(|a, b| a.key.cmp(&b.key).then(a.sort.cmp(&b.sort)));

        let mut current = None;
        for shaded in self.shaded.iter() {
            if current != Some(shaded.shader) {
                backend.begin_shader_batch(shaded.shader);
                current = Some(shaded.shader);
            }
            backend.draw_face(map.face_ref(shaded.face));
        }

        backend.flush();
    }
}

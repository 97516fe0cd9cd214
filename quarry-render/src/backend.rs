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

//! The interface to whatever actually draws things

use quarry_levels::prelude::{LightmapHandle, ShaderHandle, TextureHandle};
use quarry_levels::traits::faces::FaceRef;

/// Receives the visible faces of a frame, grouped into batches.
///
/// Every `draw_face` belongs to the batch most recently begun. Untextured batches come
/// first, then shader batches in the order they should be drawn.
pub trait RenderBackend {
    /// Start a batch of faces drawn with a raw texture and maybe a lightmap.
    fn begin_texture_batch(&mut self, texture: TextureHandle, lightmap: Option<LightmapHandle>);

    /// Start a batch of faces drawn with the given shader.
    fn begin_shader_batch(&mut self, shader: ShaderHandle);

    /// Draw a face. Its indices are relative to its vertices.
    fn draw_face(&mut self, face: FaceRef<'_>);

    /// Everything for this frame has been submitted.
    fn flush(&mut self);
}

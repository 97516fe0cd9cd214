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

//! Functions for figuring out what to render

use quarry_levels::prelude::CullFace;
use quarry_levels::traits::faces::{Face, FaceType};
use quarry_levels::traits::planes::Plane;
use quarry_types::{Matrix4, Vector3, Vector4};

/// Everything culling needs to know about the camera for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameView {
    /// Left, right, bottom and top planes, facing inwards. There's no far plane.
    pub frustum: [Plane; 4],

    /// Where the camera is
    pub camera: Vector3,

    /// Which way the camera is looking
    pub facing: Vector3,

    /// Through the camera, with everything it could see in front.
    pub camera_plane: Plane,

    /// Planar faces whose normal is more aligned with `facing` than this can only be
    /// seen from behind.
    pub back_face: f32,
}

fn row(m: &Matrix4, i: usize) -> Vector4 {
    Vector4::new(m[(i, 0)], m[(i, 1)], m[(i, 2)], m[(i, 3)])
}

/// The plane `a·x + b·y + c·z + d = 0`, with the positive side in front.
fn plane_from_row(coeffs: &Vector4) -> Plane {
    let normal = coeffs.xyz();
    let len = normal.norm();

    if len <= f32::EPSILON {
        // Degenerate, so nothing is behind it
        return Plane::new(Vector3::zeros(), -1.0);
    }

    Plane::new(normal / len, -coeffs.w / len)
}

/// The point every frustum plane goes through.
fn apex(vp: &Matrix4) -> Vector3 {
    let (r0, r1, r3) = (row(vp, 0), row(vp, 1), row(vp, 3));

    // Clip space x, y and w are all 0 at the camera
    let m = na::Mat3::new(r0.x, r0.y, r0.z, r1.x, r1.y, r1.z, r3.x, r3.y, r3.z);
    if let Some(inv) = m.try_inverse() {
        return inv * -Vector3::new(r0.w, r1.w, r3.w);
    }

    // No apex (orthographic projections), so use the middle of the near plane
    vp.try_inverse()
        .map(|inv| inv * Vector4::new(0.0, 0.0, 0.0, 1.0))
        .filter(|p| p.w.abs() > f32::EPSILON)
        .map(|p| p.xyz() / p.w)
        .unwrap_or_else(Vector3::zeros)
}

impl FrameView {
    /// Work out the frustum and camera from a view projection matrix.
    pub fn from_vp(vp: &Matrix4) -> FrameView {
        let (r0, r1, r2, r3) = (row(vp, 0), row(vp, 1), row(vp, 2), row(vp, 3));

        let frustum = [
            plane_from_row(&(r3 + r0)),
            plane_from_row(&(r3 - r0)),
            plane_from_row(&(r3 + r1)),
            plane_from_row(&(r3 - r1)),
        ];

        let camera = apex(vp);
        let facing = r3
            .xyz()
            .try_normalize(1.0e-6)
            .or_else(|| r2.xyz().try_normalize(1.0e-6))
            .unwrap_or_else(Vector3::x);

        let back_face = frustum
            .iter()
            .map(|plane| facing.dot(&plane.normal))
            .fold(f32::INFINITY, f32::min);

        FrameView {
            frustum,
            camera,
            facing,
            camera_plane: Plane::new(facing, facing.dot(&camera)),
            back_face,
        }
    }

    /// False if the box is entirely behind the camera, or outside any side of the frustum.
    pub fn box_visible(&self, mins: &Vector3, maxs: &Vector3) -> bool {
        let in_front = |plane: &Plane| plane.distance_to(&plane.positive_vertex(mins, maxs)) >= 0.0;

        in_front(&self.camera_plane) && self.frustum.iter().all(in_front)
    }

    /// Whether a face can be thrown away without drawing it, given how its material culls.
    /// Only flat faces are ever culled.
    pub fn face_culled(&self, face: &Face, cull: CullFace) -> bool {
        if face.face_type != FaceType::Polygon {
            return false;
        }

        let alignment = face.normal_dot(&self.facing);
        match cull {
            CullFace::Back => alignment > self.back_face,
            CullFace::Front => -alignment > self.back_face,
            CullFace::None => false,
        }
    }
}

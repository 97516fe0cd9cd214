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

use na::{look_at_lh, perspective_lh_zo};
use serde::{Deserialize, Serialize};

use crate::{Matrix4, Vector3};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    /// Position of the object
    pub position: Vector3,

    /// Rotation of the object (euler angles in radians)
    /// x is pitch, y is yaw, z is roll
    pub rotation: Vector3,
}

impl Transform {
    pub fn new(position: Vector3, rotation: Vector3) -> Self {
        Transform { position, rotation }
    }

    /// The direction this transform is facing. The world is Z-up, yaw 0 faces +X.
    pub fn forward(&self) -> Vector3 {
        let (pitch, yaw) = (self.rotation.x, self.rotation.y);

        Vector3::new(
            pitch.cos() * yaw.cos(),
            pitch.cos() * yaw.sin(),
            pitch.sin(),
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraSettings {
    /// FOV (radians)
    pub fov: f32,

    /// Near clipping plane (world units)
    pub near: f32,

    /// Far clipping plane (world units)
    pub far: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        CameraSettings {
            fov: std::f32::consts::FRAC_PI_2,
            near: 0.1,
            far: 4096.0,
        }
    }
}

/// Returns a matrix that transforms from world space to screen space
pub fn vp_matrix(transform: &Transform, settings: &CameraSettings, aspect_ratio: f32) -> Matrix4 {
    let looking_at = transform.position + transform.forward();
    let up = Vector3::new(0.0, 0.0, 1.0);

    // Converts world space to camera space
    let view_matrix = look_at_lh(&transform.position, &looking_at, &up);

    // Converts camera space to screen space
    let projection_matrix = {
        let mut temp = perspective_lh_zo(aspect_ratio, settings.fov, settings.near, settings.far);

        // Vulkan's co-ord system is different from openGLs
        temp[(1, 1)] *= -1.0;

        temp
    };

    // Chain them together into a single matrix
    projection_matrix * view_matrix
}

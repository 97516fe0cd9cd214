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

//! Sweeping shapes through the level's brushes.
//!
//! Every shape is symmetric around its centre, and is handled by pushing each brush plane
//! out by how far the shape reaches along the plane's normal. Traces are then run as if
//! the shape were a point.

mod brush;
mod context;
mod sweep;

pub use self::context::TraceContext;

use na::Vector3;

use crate::traits::planes::Plane;
use crate::traits::textures::{ContentsFlags, SurfaceFlags};

/// Traces stop this far short of surfaces, so the next trace doesn't start inside them.
pub const DIST_EPSILON: f32 = 0.03125;

/// What was hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceEntity {
    /// The level itself
    World,
    /// Nothing
    None,
}

/// The shape being swept
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TraceShape {
    Ray,
    Sphere {
        radius: f32,
    },
    /// An axis aligned box, `half_extents` either side of the centre.
    Box {
        half_extents: Vector3<f32>,
    },
    /// A vertical capsule. `half_height` is from the centre to the middle of either cap.
    Capsule {
        radius: f32,
        half_height: f32,
    },
}

impl TraceShape {
    /// How far the shape reaches from its centre along `normal`.
    #[inline]
    pub fn offset(&self, normal: &Vector3<f32>) -> f32 {
        match *self {
            TraceShape::Ray => 0.0,
            TraceShape::Sphere { radius } => radius,
            TraceShape::Box { half_extents } => half_extents.dot(&normal.abs()),
            TraceShape::Capsule {
                radius,
                half_height,
            } => radius + (half_height * normal.z).abs(),
        }
    }

    /// Half extents of the shape's bounding box.
    pub fn half_extents(&self) -> Vector3<f32> {
        match *self {
            TraceShape::Ray => Vector3::zeros(),
            TraceShape::Sphere { radius } => Vector3::repeat(radius),
            TraceShape::Box { half_extents } => half_extents,
            TraceShape::Capsule {
                radius,
                half_height,
            } => Vector3::new(radius, radius, radius + half_height),
        }
    }
}

/// The result of a trace.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    /// How far along the trace got before hitting something. 1.0 if it didn't.
    pub fraction: f32,

    /// Where the trace ended up
    pub end: Vector3<f32>,

    /// The plane that was hit
    pub plane: Option<Plane>,

    /// Flags of the surface that was hit
    pub surface_flags: SurfaceFlags,

    /// Contents of what was hit, or everything touched for contents queries
    pub contents: ContentsFlags,

    pub entity: TraceEntity,

    /// The trace was inside a brush for its whole length
    pub all_solid: bool,

    /// The trace started inside a brush
    pub start_solid: bool,
}

impl Trace {
    /// A trace that hasn't hit anything yet
    pub fn empty(end: Vector3<f32>) -> Trace {
        Trace {
            fraction: 1.0,
            end,
            plane: None,
            surface_flags: SurfaceFlags::empty(),
            contents: ContentsFlags::empty(),
            entity: TraceEntity::None,
            all_solid: false,
            start_solid: false,
        }
    }

    pub fn hit_anything(&self) -> bool {
        self.fraction < 1.0 || self.start_solid
    }
}

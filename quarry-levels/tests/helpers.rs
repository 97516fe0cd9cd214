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

#![allow(dead_code)]

use nalgebra::Vector3;

use quarry_levels::prelude::*;
use quarry_levels::testkit::MapBuilder;
use quarry_levels::traits::textures::{ContentsFlags, SurfaceFlags};
use quarry_levels::traits::tree::NodeChild;

pub const BIG: i32 = 1024;

pub fn v(x: f32, y: f32, z: f32) -> Vector3<f32> {
    Vector3::new(x, y, z)
}

pub fn bounds(min_x: i32, max_x: i32) -> (Vector3<i32>, Vector3<i32>) {
    (
        Vector3::new(min_x, -BIG, -BIG),
        Vector3::new(max_x, BIG, BIG),
    )
}

/// A level split at x = 0. Leaf 0 (x < 0) is cluster 0, leaf 1 (x >= 0) is cluster 1.
/// Cluster 1 can see cluster 0 but not the other way round.
pub fn split_map() -> Q3Map {
    let mut map = MapBuilder::new();
    let plane = map.plane(Vector3::x(), 0.0);

    let (min, max) = bounds(-BIG, 0);
    let back = map.leaf(0, min, max, &[], &[]);
    let (min, max) = bounds(0, BIG);
    let front = map.leaf(1, min, max, &[], &[]);

    let (min, max) = bounds(-BIG, BIG);
    map.node(plane, NodeChild::Leaf(front), NodeChild::Leaf(back), min, max);
    map.visdata(2, |from, to| from == to || (from == 1 && to == 0));

    map.load().unwrap()
}

/// Brushes used by [`brush_world`]
pub struct World {
    pub map: Q3Map,
    /// Solid, (0, 0, 0) to (1, 1, 1)
    pub cube: u32,
    /// Solid, (4, 0, 0) to (5, 1, 1)
    pub far_cube: u32,
    /// Water, (-3, 0, 0) to (-2, 1, 1)
    pub pool: u32,
}

/// A few brushes along the x axis, in a tree that splits some of them.
///
/// ```text
///            x = 2
///          /       \
///     x = 0.5     x = 4.5
///     /    \       /    \
///   L0     L3    L2     L1
/// ```
pub fn brush_world() -> World {
    let mut map = MapBuilder::new();
    let solid = map.texture("solid", SurfaceFlags::METAL_STEPS, ContentsFlags::SOLID);
    let water = map.texture("water", SurfaceFlags::empty(), ContentsFlags::WATER);

    let cube = map.box_brush(v(0.0, 0.0, 0.0), v(1.0, 1.0, 1.0), solid);
    let far_cube = map.box_brush(v(4.0, 0.0, 0.0), v(5.0, 1.0, 1.0), solid);
    let pool = map.box_brush(v(-3.0, 0.0, 0.0), v(-2.0, 1.0, 1.0), water);

    let root_plane = map.plane(Vector3::x(), 2.0);
    let near_plane = map.plane(Vector3::x(), 0.5);
    let far_plane = map.plane(Vector3::x(), 4.5);

    let (min, max) = bounds(0, 2);
    let l0 = map.leaf(-1, min, max, &[], &[cube]);
    let (min, max) = bounds(2, 4);
    let l1 = map.leaf(-1, min, max, &[], &[far_cube]);
    let (min, max) = bounds(4, BIG);
    let l2 = map.leaf(-1, min, max, &[], &[far_cube]);
    let (min, max) = bounds(-BIG, 0);
    let l3 = map.leaf(-1, min, max, &[], &[cube, pool]);

    let root = map.reserve_node();
    let near = map.reserve_node();
    let far = map.reserve_node();

    let (min, max) = bounds(-BIG, BIG);
    map.set_node(root, root_plane, NodeChild::Node(far), NodeChild::Node(near), min, max);
    let (min, max) = bounds(-BIG, 2);
    map.set_node(near, near_plane, NodeChild::Leaf(l0), NodeChild::Leaf(l3), min, max);
    let (min, max) = bounds(2, BIG);
    map.set_node(far, far_plane, NodeChild::Leaf(l2), NodeChild::Leaf(l1), min, max);

    World {
        map: map.load().unwrap(),
        cube,
        far_cube,
        pool,
    }
}

const PLANE_SIZE: usize = (4 * 3) + 4;

use super::{records, Lump, Q3Map};
use crate::helpers::{slice_to_f32, slice_to_vec3};
use crate::traits::planes::*;

/// Parse a lump of planes.
/// A lump is (data length / plane size) planes long
pub fn from_data(data: &[u8]) -> Box<[Plane]> {
    records(Lump::Planes, data, PLANE_SIZE)
        .map(|plane| Plane::new(slice_to_vec3(&plane[0..12]), slice_to_f32(&plane[12..16])))
        .collect()
}

impl HasPlanes for Q3Map {
    type PlanesIter<'a> = std::slice::Iter<'a, Plane>;

    fn planes_iter(&self) -> Self::PlanesIter<'_> {
        self.planes.iter()
    }

    fn planes_len(&self) -> u32 {
        self.planes.len() as u32
    }

    fn get_plane(&self, idx: u32) -> &Plane {
        &self.planes[idx as usize]
    }
}

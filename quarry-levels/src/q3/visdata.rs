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

use bitvec::prelude::*;
use log::{debug, warn};
use std::vec::IntoIter;

use super::Q3Map;
use crate::helpers::slice_to_i32;
use crate::traits::visdata::*;

/// The potentially visible set, one row of bits per cluster.
#[derive(Debug, Clone, PartialEq)]
pub struct VisData {
    pub n_vecs: u32,
    pub sz_vecs: u32,
    bits: BitBox<u8, Lsb0>,
}

impl VisData {
    /// Number of clusters this data can answer for
    pub fn clusters(&self) -> u32 {
        (self.n_vecs as u64).min(self.sz_vecs as u64 * 8) as u32
    }

    /// The visibility row for the given cluster.
    /// # Panics
    /// If `from` is out of range
    pub fn row(&self, from: ClusterId) -> &BitSlice<u8, Lsb0> {
        let row_bits = self.sz_vecs as usize * 8;
        let start = from as usize * row_bits;
        &self.bits[start..start + row_bits]
    }

    pub fn get(&self, from: ClusterId, to: ClusterId) -> bool {
        self.row(from)[to as usize]
    }
}

/// Parse the visdata lump. An empty lump means the map has none, and malformed data is
/// treated the same way after a warning.
pub fn from_data(data: &[u8]) -> Option<VisData> {
    if data.is_empty() {
        debug!("No visibility data, everything will be visible from everywhere");
        return None;
    }

    if data.len() < 8 {
        warn!("Visdata lump is too short ({} bytes), ignoring it", data.len());
        return None;
    }

    let n_vecs = slice_to_i32(&data[0..4]);
    let sz_vecs = slice_to_i32(&data[4..8]);
    let needed = n_vecs as i64 * sz_vecs as i64;

    if n_vecs < 0 || sz_vecs < 0 || sz_vecs > i32::MAX / 8 || needed > (data.len() - 8) as i64 {
        warn!(
            "Visdata claims {} vectors of {} bytes but has {} bytes, ignoring it",
            n_vecs,
            sz_vecs,
            data.len() - 8
        );
        return None;
    }

    Some(VisData {
        n_vecs: n_vecs as u32,
        sz_vecs: sz_vecs as u32,
        bits: BitBox::from_bitslice(data[8..8 + needed as usize].view_bits::<Lsb0>()),
    })
}

impl HasVisData for Q3Map {
    type VisibleIterator = IntoIter<ClusterId>;

    fn all_visible_from(&self, from: ClusterId) -> Self::VisibleIterator {
        let visible: Vec<ClusterId> = match &self.visdata {
            Some(vis) => vis
                .row(from)
                .iter_ones()
                .map(|idx| idx as ClusterId)
                .filter(|idx| *idx < self.clusters_len)
                .collect(),
            None => (0..self.clusters_len).collect(),
        };

        visible.into_iter()
    }

    fn cluster_visible_from(&self, from: ClusterId, dest: ClusterId) -> bool {
        match &self.visdata {
            Some(vis) => vis.get(from, dest),
            None => true,
        }
    }

    fn has_vis_data(&self) -> bool {
        self.visdata.is_some()
    }
}

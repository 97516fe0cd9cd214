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

//! Parsing data from Q3 and similar BSPs

mod brushes;
mod faces;
pub mod file;
mod header;
mod light_maps;
mod patch;
mod planes;
mod textures;
mod tree;
mod vertices;
mod visdata;

pub use self::file::Q3Map;
pub use self::header::{DirEntry, Header, Lump, BSP_VERSION};
pub use self::visdata::VisData;

use log::warn;
use std::slice::ChunksExact;

/// Split a lump into `size` byte records.
/// A lump that isn't a whole number of records is ignored with a warning.
pub(crate) fn records(lump: Lump, data: &[u8], size: usize) -> ChunksExact<'_, u8> {
    if data.len() % size != 0 {
        warn!(
            "{} lump is {} bytes, which isn't a multiple of {}. Ignoring it.",
            lump.name(),
            data.len(),
            size
        );
        return data[..0].chunks_exact(size);
    }

    data.chunks_exact(size)
}

/// Check that `start..start + n` lies within `0..len`, and convert it.
pub(crate) fn checked_range(
    lump: &'static str,
    start: i32,
    n: i32,
    len: usize,
) -> crate::types::Result<std::ops::Range<u32>> {
    let (start, n) = (start as i64, n as i64);
    if start < 0 || n < 0 || start + n > len as i64 {
        return Err(crate::types::ParseError::BadReference {
            lump,
            index: if start < 0 || n < 0 { start.min(n) } else { start + n },
        });
    }

    Ok(start as u32..(start + n) as u32)
}

/// Check that `idx` indexes something in a list of `len` things.
pub(crate) fn checked_index(lump: &'static str, idx: i32, len: usize) -> crate::types::Result<u32> {
    if idx < 0 || idx as usize >= len {
        return Err(crate::types::ParseError::BadReference {
            lump,
            index: idx as i64,
        });
    }

    Ok(idx as u32)
}

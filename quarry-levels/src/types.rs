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

//! Various types used in parsed BSP files.

use thiserror::Error;

/// RGBA Colour (0-255)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Interpret the given bytes as an RGBA colour.
    pub fn from_bytes(bytes: [u8; 4]) -> Rgba {
        Rgba {
            r: bytes[0],
            g: bytes[1],
            b: bytes[2],
            a: bytes[3],
        }
    }

    /// Convert a slice to an RGBA colour
    /// # Panics
    /// If slice is shorter than 4 bytes.
    pub fn from_slice(slice: &[u8]) -> Rgba {
        Rgba::from_bytes([slice[0], slice[1], slice[2], slice[3]])
    }

    pub fn white() -> Rgba {
        Rgba {
            r: 255,
            g: 255,
            b: 255,
            a: 255,
        }
    }
}

/// An error encountered while loading a map.
/// Anything that isn't an error here is a warning in the log.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Not an IBSP file")]
    BadMagic,

    #[error("Map header is truncated")]
    TruncatedHeader,

    #[error("Unsupported BSP version {0}")]
    UnsupportedVersion(u32),

    #[error("Error reading map")]
    Io(#[from] std::io::Error),

    #[error("Referential integrity broken: {lump} references {index}, which doesn't exist")]
    BadReference { lump: &'static str, index: i64 },

    #[error("Malformed record {record} in {lump}")]
    Malformed { lump: &'static str, record: usize },

    #[error("Node {0} is reachable more than once, the tree isn't a tree")]
    BadTree(u32),
}

/// Standard result type.
pub type Result<T> = std::result::Result<T, ParseError>;

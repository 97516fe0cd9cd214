use log::warn;
use std::io::{Read, Seek, SeekFrom};

use crate::helpers::{slice_to_i32, slice_to_u32};
use crate::types::{ParseError, Result};

const MAGIC_HEADER: &[u8] = &[0x49, 0x42, 0x53, 0x50];
const HEADER_LEN: usize = 4 + 4 + (17 * 4 * 2);

/// The version written by quake 3's compiler
pub const BSP_VERSION: u32 = 0x2e;

/// The lumps of a Q3 BSP, in directory order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lump {
    Entities = 0,
    Textures = 1,
    Planes = 2,
    Nodes = 3,
    Leaves = 4,
    LeafFaces = 5,
    LeafBrushes = 6,
    Models = 7,
    Brushes = 8,
    BrushSides = 9,
    Vertices = 10,
    MeshVerts = 11,
    Effects = 12,
    Faces = 13,
    LightMaps = 14,
    LightVols = 15,
    VisData = 16,
}

impl Lump {
    pub fn name(self) -> &'static str {
        match self {
            Lump::Entities => "entities",
            Lump::Textures => "textures",
            Lump::Planes => "planes",
            Lump::Nodes => "nodes",
            Lump::Leaves => "leaves",
            Lump::LeafFaces => "leaf faces",
            Lump::LeafBrushes => "leaf brushes",
            Lump::Models => "models",
            Lump::Brushes => "brushes",
            Lump::BrushSides => "brush sides",
            Lump::Vertices => "vertices",
            Lump::MeshVerts => "meshverts",
            Lump::Effects => "effects",
            Lump::Faces => "faces",
            Lump::LightMaps => "lightmaps",
            Lump::LightVols => "light volumes",
            Lump::VisData => "visdata",
        }
    }
}

/// The header found at the start of a (Q3) bsp file
#[derive(Clone, Copy, Debug)]
pub struct Header {
    pub version: u32,
    pub dir_entries: [DirEntry; 17],
}

/// A directory entry, pointing to a lump in the file
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DirEntry {
    /// Offset from beginning of file to start of lump
    pub offset: i32,

    /// Length of lump, multiple of 4.
    pub length: i32,
}

impl Header {
    /// Deserialise from buffer.
    /// # Format
    /// string[4] magic             Magic number. Always "IBSP".
    /// int version                 Version number. 0x2e for the BSP files distributed with Quake 3.
    /// direntry[17] direntries     Lump directory, seventeen entries.
    pub fn from(v: &[u8]) -> Result<Header> {
        if v.len() < 4 || &v[0..4] != MAGIC_HEADER {
            return Err(ParseError::BadMagic);
        }
        if v.len() < HEADER_LEN {
            return Err(ParseError::TruncatedHeader);
        }

        let mut dir_entries = [DirEntry::default(); 17];
        for (n, entry) in dir_entries.iter_mut().enumerate() {
            let base = &v[8 + n * 8..8 + n * 8 + 8];
            *entry = DirEntry {
                offset: slice_to_i32(&base[0..4]),
                length: slice_to_i32(&base[4..8]),
            };
        }

        Ok(Header {
            version: slice_to_u32(&v[4..8]),
            dir_entries,
        })
    }

    /// Read the header from the start of `reader`.
    pub fn read<R: Read>(reader: &mut R) -> Result<Header> {
        let mut buf = [0; HEADER_LEN];
        let mut filled = 0;
        while filled < HEADER_LEN {
            let n = reader.read(&mut buf[filled..])?;
            if n == 0 {
                break;
            }
            filled += n;
        }

        Header::from(&buf[..filled])
    }

    /// Read the given lump from `reader`. A lump that doesn't fit in the stream is
    /// reported and read as empty.
    pub fn read_lump<R: Read + Seek>(
        &self,
        reader: &mut R,
        lump: Lump,
        stream_len: u64,
    ) -> Result<Vec<u8>> {
        let entry = self.dir_entries[lump as usize];
        if entry.length == 0 {
            return Ok(vec![]);
        }

        if entry.offset < 0
            || entry.length < 0
            || entry.offset as u64 + entry.length as u64 > stream_len
        {
            warn!(
                "{} lump ({} bytes at {}) doesn't fit in the file, leaving it empty.",
                lump.name(),
                entry.length,
                entry.offset
            );
            return Ok(vec![]);
        }

        let mut buf = vec![0; entry.length as usize];
        reader.seek(SeekFrom::Start(entry.offset as u64))?;
        reader.read_exact(&mut buf)?;

        Ok(buf)
    }
}

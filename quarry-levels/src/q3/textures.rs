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

use super::{records, Lump, Q3Map};
use crate::helpers::slice_to_u32;
use crate::traits::textures::*;

const TEXTURE_LUMP_SIZE: usize = 64 + 4 + 4;

pub fn from_data(lump: &[u8]) -> Box<[Texture]> {
    records(Lump::Textures, lump, TEXTURE_LUMP_SIZE)
        .map(|texture| {
            let name = &texture[0..64];
            let name_len = name.iter().position(|b| *b == 0).unwrap_or(64);

            Texture {
                name: String::from_utf8_lossy(&name[..name_len]).into_owned(),
                surface: SurfaceFlags::from_bits_truncate(slice_to_u32(&texture[64..68])),
                contents: ContentsFlags::from_bits_truncate(slice_to_u32(&texture[68..72])),
            }
        })
        .collect()
}

impl HasTextures for Q3Map {
    type TexturesIter<'a> = std::slice::Iter<'a, Texture>;

    fn textures_iter(&self) -> Self::TexturesIter<'_> {
        self.textures.iter()
    }

    fn textures_len(&self) -> u32 {
        self.textures.len() as u32
    }

    fn get_texture(&self, idx: u32) -> &Texture {
        &self.textures[idx as usize]
    }
}

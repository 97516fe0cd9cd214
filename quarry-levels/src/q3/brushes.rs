const BRUSH_SIZE: usize = 4 * 3;

const SIDE_SIZE: usize = 4 * 2;

use super::{checked_index, checked_range, records, Lump, Q3Map};
use crate::helpers::slice_to_i32;
use crate::traits::brushes::*;
use crate::traits::textures::Texture;
use crate::types::Result;

pub fn from_data(
    brushes_data: &[u8],
    sides_data: &[u8],
    textures: &[Texture],
    n_planes: u32,
) -> Result<Box<[Brush]>> {
    let sides = records(Lump::BrushSides, sides_data, SIDE_SIZE)
        .map(|side| -> Result<BrushSide> {
            Ok(BrushSide {
                plane_idx: checked_index(
                    "brush sides",
                    slice_to_i32(&side[0..4]),
                    n_planes as usize,
                )?,
                texture_idx: checked_index(
                    "brush sides",
                    slice_to_i32(&side[4..8]),
                    textures.len(),
                )?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    records(Lump::Brushes, brushes_data, BRUSH_SIZE)
        .map(|brush| -> Result<Brush> {
            let range = checked_range(
                "brushes",
                slice_to_i32(&brush[0..4]),
                slice_to_i32(&brush[4..8]),
                sides.len(),
            )?;
            let texture_idx = checked_index("brushes", slice_to_i32(&brush[8..12]), textures.len())?;

            Ok(Brush {
                sides: sides[range.start as usize..range.end as usize].into(),
                texture_idx,
                contents: textures[texture_idx as usize].contents,
            })
        })
        .collect()
}

impl HasBrushes for Q3Map {
    type BrushesIter<'a> = std::slice::Iter<'a, Brush>;

    fn brushes_iter(&self) -> Self::BrushesIter<'_> {
        self.brushes.iter()
    }

    fn brushes_len(&self) -> u32 {
        self.brushes.len() as u32
    }

    fn get_brush(&self, index: u32) -> &Brush {
        &self.brushes[index as usize]
    }
}

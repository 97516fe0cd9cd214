use super::{records, Lump};

/// Lightmaps are always 128x128 RGB
const LIGHTMAP_SIZE: usize = 128 * 128 * 3;

/// Count the lightmaps in the lump.
/// The pixels belong to the renderer, so all we keep is how many there are to refer to.
pub fn count(data: &[u8]) -> u32 {
    records(Lump::LightMaps, data, LIGHTMAP_SIZE).len() as u32
}

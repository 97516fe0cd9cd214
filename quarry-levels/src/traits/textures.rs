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

/// An entry in the texture lump, shared by faces and brush sides.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    pub name: String,
    pub surface: SurfaceFlags,
    pub contents: ContentsFlags,
}

bitflags!(
    /// How a surface behaves when something touches it. Bits are from the IBSP texture
    /// lump, anything not listed here is dropped on load.
    pub struct SurfaceFlags: u32 {
        const NO_DAMAGE = 1 << 0;
        const SLICK = 1 << 1;
        const SKY = 1 << 2;
        const LADDER = 1 << 3;
        const NO_IMPACT = 1 << 4;
        const NO_MARKS = 1 << 5;
        const FLESH = 1 << 6;
        /// No geometry is generated for faces with this set
        const NODRAW = 1 << 7;
        const HINT = 1 << 8;
        const SKIP = 1 << 9;
        const NO_LIGHT_MAP = 1 << 10;
        const POINT_LIGHT = 1 << 11;
        const METAL_STEPS = 1 << 12;
        const NO_STEPS = 1 << 13;
        /// Curves with this set are never collided with
        const NON_SOLID = 1 << 14;
        const LIGHT_FILTER = 1 << 15;
        const ALPHA_SHADOW = 1 << 16;
        const NO_DLIGHT = 1 << 17;
        const DUST = 1 << 18;
    }
);

bitflags!(
    /// What fills the volume of a brush. Traces are filtered against these with a mask.
    pub struct ContentsFlags: u32 {
        const SOLID = 1 << 0;
        const LAVA = 1 << 3;
        const SLIME = 1 << 4;
        const WATER = 1 << 5;
        const FOG = 1 << 6;
        const NOT_TEAM1 = 1 << 7;
        const NOT_TEAM2 = 1 << 8;
        const NOT_BOT_CLIP = 1 << 9;
        const AREA_PORTAL = 1 << 15;
        const PLAYER_CLIP = 1 << 16;
        const MONSTER_CLIP = 1 << 17;

        // Only read by bots
        const TELEPORTER = 1 << 18;
        const JUMP_PAD = 1 << 19;
        const CLUSTER_PORTAL = 1 << 20;
        const DO_NOT_ENTER = 1 << 21;
        const BOT_CLIP = 1 << 22;

        const MOVER = 1 << 23;
        const ORIGIN = 1 << 24;
        const BODY = 1 << 25;
        const CORPSE = 1 << 26;
        const DETAIL = 1 << 27;
        const STRUCTURAL = 1 << 28;
        const TRANSLUCENT = 1 << 29;
        const TRIGGER = 1 << 30;
        const NODROP = 1 << 31;

        /// What stops a player moving
        const MASK_PLAYER_SOLID = Self::SOLID.bits | Self::PLAYER_CLIP.bits | Self::BODY.bits;
        const MASK_DEAD_SOLID = Self::SOLID.bits | Self::PLAYER_CLIP.bits;
        const MASK_WATER = Self::WATER.bits | Self::LAVA.bits | Self::SLIME.bits;
        /// What blocks line of sight
        const MASK_OPAQUE = Self::SOLID.bits | Self::SLIME.bits | Self::LAVA.bits;
        const MASK_SHOT = Self::SOLID.bits | Self::BODY.bits | Self::CORPSE.bits;
    }
);

/// A level's texture lump. Brush sides and faces refer into it by index.
pub trait HasTextures {
    type TexturesIter<'a>: Iterator<Item = &'a Texture>
    where
        Self: 'a;

    fn textures_iter(&self) -> Self::TexturesIter<'_>;
    fn textures_len(&self) -> u32;
    fn get_texture(&self, idx: u32) -> &Texture;
}

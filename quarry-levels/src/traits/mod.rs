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

//! Traits for parts of levels, and the types they hand out.

pub mod brushes;
pub mod faces;
pub mod planes;
pub mod textures;
pub mod tree;
pub mod vertices;
pub mod visdata;

pub use self::brushes::HasBrushes;
pub use self::faces::HasFaces;
pub use self::planes::HasPlanes;
pub use self::textures::HasTextures;
pub use self::tree::HasBspTree;
pub use self::vertices::HasVertices;
pub use self::visdata::HasVisData;

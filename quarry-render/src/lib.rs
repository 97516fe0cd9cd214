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

//! Works out what of a level is visible each frame, and hands it to a renderer in batches.
//! The renderer itself lives behind [`RenderBackend`].

extern crate nalgebra_glm as na;
#[macro_use]
extern crate derive_builder;

pub mod backend;
pub mod config;
pub mod culling;
pub mod queue;
pub mod walk_bsp;

pub use self::backend::RenderBackend;
pub use self::config::{RenderConfig, RenderConfigBuilder};
pub use self::culling::FrameView;
pub use self::walk_bsp::{FrameStats, LevelRenderer};

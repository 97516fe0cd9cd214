//! Bundles of traits needed for a level to be used in different ways.
//! These are blanket implemented, so any level with the right parts gets them for free.

use crate::traits::*;

/// Everything needed to run traces against a level.
pub trait MinCollisionFeatures: HasBspTree + HasBrushes + HasTextures {}
impl<T> MinCollisionFeatures for T where T: HasBspTree + HasBrushes + HasTextures {}

/// Everything needed to draw a level.
pub trait MinRenderFeatures: HasBspTree + HasFaces + HasVisData {}
impl<T> MinRenderFeatures for T where T: HasBspTree + HasFaces + HasVisData {}

//! Parses BSP levels and answers spatial queries against them.
//! Collision traces live in [`collision`], PVS lookups in [`visibility`].

#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate derive_builder;
extern crate nalgebra as na;

pub mod collision;
pub mod config;
pub mod features;
mod helpers;
pub mod materials;
pub mod q3;
pub mod traits;
pub mod types;
pub mod visibility;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;

pub mod prelude {
    pub use crate::collision::{Trace, TraceContext, TraceEntity, TraceShape};
    pub use crate::config::{LoadConfig, LoadConfigBuilder};
    pub use crate::features::{MinCollisionFeatures, MinRenderFeatures};
    pub use crate::materials::*;
    pub use crate::q3::Q3Map;
    pub use crate::traits::*;
    pub use crate::visibility::visible;
}

//! Settings for the level renderer

use serde::{Deserialize, Serialize};

/// Options for [`crate::LevelRenderer`].
#[derive(Builder, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[builder(public)]
#[serde(default)]
pub struct RenderConfig {
    /// Most faces queued in one frame. Anything past this is dropped.
    #[builder(default = "0x10000")]
    pub max_primitives: usize,

    /// Throw away polygons facing away from the camera
    #[builder(default = "true")]
    pub backface_culling: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            max_primitives: 0x10000,
            backface_culling: true,
        }
    }
}

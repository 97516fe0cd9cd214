//! Settings for loading a level

use serde::{Deserialize, Serialize};

/// Options for [`crate::q3::Q3Map::load`].
#[derive(Builder, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[builder(public)]
#[serde(default)]
pub struct LoadConfig {
    /// Number of steps each side of a bezier patch is split into
    #[builder(default = "8")]
    pub patch_tesselation: u32,

    /// Reject maps whose version isn't the one quake 3 writes, rather than warning
    #[builder(default = "false")]
    pub strict_version: bool,
}

impl Default for LoadConfig {
    fn default() -> Self {
        LoadConfig {
            patch_tesselation: 8,
            strict_version: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults_match_default() {
        let built = LoadConfigBuilder::default().build().unwrap();
        assert_eq!(built, LoadConfig::default());
    }

    #[test]
    fn builder_overrides() {
        let built = LoadConfigBuilder::default()
            .patch_tesselation(2)
            .strict_version(true)
            .build()
            .unwrap();

        assert_eq!(built.patch_tesselation, 2);
        assert!(built.strict_version);
    }
}

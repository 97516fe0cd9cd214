//! Resolving texture entries into the handles the renderer draws with.
//! Handles are opaque here, the renderer owns whatever they point to.

use serde::{Deserialize, Serialize};

use crate::traits::textures::Texture;

/// A raw texture, as known by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TextureHandle(pub u32);

/// A shader, as known by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShaderHandle(pub u32);

/// A lightmap page
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LightmapHandle(pub u32);

/// Which faces of a shader's surface get thrown away
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CullFace {
    /// Surfaces facing away from the camera are culled
    Back,
    /// Surfaces facing the camera are culled
    Front,
    /// Two sided
    None,
}

/// Sort order of a shader, as in the `sort` keyword of quake 3 shader scripts.
/// Anything from `Underwater` on is translucent and gets drawn back to front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum SortClass {
    Portal = 1,
    Environment = 2,
    Opaque = 3,
    Decal = 4,
    SeeThrough = 5,
    Banner = 6,
    Fog = 7,
    Underwater = 8,
    Blend0 = 9,
    Blend1 = 10,
    Blend2 = 11,
    Blend3 = 12,
    Blend6 = 13,
    StencilShadow = 14,
    Almost = 15,
    Nearest = 16,
}

impl SortClass {
    pub fn is_translucent(self) -> bool {
        self >= SortClass::Underwater
    }
}

/// What a face is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Material {
    /// No shader, just a texture and maybe a lightmap
    Texture(TextureHandle),
    Shader {
        handle: ShaderHandle,
        cull: CullFace,
        sort: SortClass,
    },
}

/// Turns the map's texture entries into materials, once, at load time.
pub trait MaterialResolver {
    fn resolve(&mut self, index: u32, texture: &Texture) -> Material;
}

/// Treats every texture entry as a raw texture with the same index.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawTextures;

impl MaterialResolver for RawTextures {
    fn resolve(&mut self, index: u32, _texture: &Texture) -> Material {
        Material::Texture(TextureHandle(index))
    }
}

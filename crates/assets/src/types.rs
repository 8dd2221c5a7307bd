use std::sync::Arc;

use glam::{Vec2, Vec3};
use sha2::{Digest, Sha256};

/// Stable identifier derived from the path an asset was loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssetId(pub u64);

impl AssetId {
    pub fn from_path(path: &str) -> Self {
        let digest = Sha256::digest(path.as_bytes());
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&digest[..8]);
        Self(u64::from_le_bytes(bytes))
    }
}

impl std::fmt::Display for AssetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub uv: Vec2,
}

impl Vertex {
    pub fn new(position: Vec3, normal: Vec3, uv: Vec2) -> Self {
        Self {
            position,
            normal,
            uv,
        }
    }
}

/// RGBA8 image.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    pub id: AssetId,
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl Texture {
    /// 1x1 texture of a single colour.
    pub fn solid(path: &str, rgba: [u8; 4]) -> Self {
        Self {
            id: AssetId::from_path(path),
            name: display_name(path),
            width: 1,
            height: 1,
            rgba: rgba.to_vec(),
        }
    }

    /// `size`x`size` checkerboard with one-texel squares.
    pub fn checker(path: &str, size: u32, even: [u8; 4], odd: [u8; 4]) -> Self {
        let mut rgba = Vec::with_capacity((size * size * 4) as usize);
        for y in 0..size {
            for x in 0..size {
                let texel = if (x + y) % 2 == 0 { even } else { odd };
                rgba.extend_from_slice(&texel);
            }
        }
        Self {
            id: AssetId::from_path(path),
            name: display_name(path),
            width: size,
            height: size,
            rgba,
        }
    }

    /// Colour at texel (x, y), or `None` outside the image.
    pub fn texel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y * self.width + x) * 4) as usize;
        let mut out = [0u8; 4];
        out.copy_from_slice(&self.rgba[i..i + 4]);
        Some(out)
    }
}

/// Which pipeline a material is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ShaderKind {
    #[default]
    Default,
    /// Unlit, drawn behind everything else.
    Skybox,
}

/// Surface description shared between mesh parts.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub specular_exponent: f32,
    pub transparency: f32,
    pub diffuse_texture: Option<Arc<Texture>>,
    pub shader: ShaderKind,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: "default".into(),
            ambient: Vec3::splat(0.1),
            diffuse: Vec3::splat(0.8),
            specular: Vec3::ZERO,
            specular_exponent: 1.0,
            transparency: 0.0,
            diffuse_texture: None,
            shader: ShaderKind::Default,
        }
    }
}

impl Material {
    pub fn with_diffuse(name: impl Into<String>, diffuse: Vec3) -> Self {
        Self {
            name: name.into(),
            diffuse,
            ..Self::default()
        }
    }

    pub fn with_texture(mut self, texture: Arc<Texture>) -> Self {
        self.diffuse_texture = Some(texture);
        self
    }

    pub fn with_shader(mut self, shader: ShaderKind) -> Self {
        self.shader = shader;
        self
    }

    /// Opacity in `[0, 1]`.
    pub fn alpha(&self) -> f32 {
        (1.0 - self.transparency).clamp(0.0, 1.0)
    }
}

/// Index range of a mesh drawn with one material.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshPart {
    pub indices: Vec<u32>,
    pub base_vertex: u32,
    pub material: Option<Arc<Material>>,
}

impl MeshPart {
    pub fn new(indices: Vec<u32>) -> Self {
        Self {
            indices,
            base_vertex: 0,
            material: None,
        }
    }

    pub fn with_material(mut self, material: Arc<Material>) -> Self {
        self.material = Some(material);
        self
    }
}

/// Immutable geometry, split into parts.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub id: AssetId,
    pub name: String,
    pub vertices: Vec<Vertex>,
    pub parts: Vec<MeshPart>,
}

impl Mesh {
    pub fn new(path: &str, vertices: Vec<Vertex>, parts: Vec<MeshPart>) -> Self {
        Self {
            id: AssetId::from_path(path),
            name: display_name(path),
            vertices,
            parts,
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.parts.iter().map(|p| p.indices.len() / 3).sum()
    }
}

/// A loaded mesh together with the materials its parts came with.
#[derive(Debug, Clone)]
pub struct MeshAsset {
    pub mesh: Arc<Mesh>,
    pub materials: Vec<Arc<Material>>,
}

/// `builtin:cube` -> `cube`, `models/venus.obj` -> `venus`.
pub(crate) fn display_name(path: &str) -> String {
    let tail = path.rsplit(['/', '\\', ':']).next().unwrap_or(path);
    match tail.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem.to_string(),
        _ => tail.to_string(),
    }
}

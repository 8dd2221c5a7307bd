use std::collections::BTreeMap;
use std::sync::Arc;

use glam::Vec3;

use crate::primitive;
use crate::types::{Material, Mesh, MeshAsset, MeshPart, ShaderKind, Texture, Vertex};

pub const CUBE: &str = "builtin:cube";
pub const SPHERE: &str = "builtin:sphere";
pub const SKY_SPHERE: &str = "builtin:skysphere";
pub const WHITE: &str = "builtin:white";
pub const CHECKER: &str = "builtin:checker";

const SPHERE_RINGS: u32 = 24;
const SPHERE_SEGMENTS: u32 = 48;

/// Errors from asset operations.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("asset not found: {0}")]
    NotFound(String),
    #[error("unsupported asset format: {0}")]
    UnsupportedFormat(String),
    #[error("texture {path}: expected {expected} bytes of RGBA, got {actual}")]
    InvalidTexture {
        path: String,
        expected: usize,
        actual: usize,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Path-keyed cache of meshes and textures.
///
/// Built-in primitives are generated on first use. Anything else has to be
/// handed in through [`AssetStore::register_mesh`] or
/// [`AssetStore::register_texture`] by an external loader first; the store
/// itself parses no file formats.
#[derive(Debug)]
pub struct AssetStore {
    meshes: BTreeMap<String, MeshAsset>,
    textures: BTreeMap<String, Arc<Texture>>,
    null_texture: Arc<Texture>,
}

impl Default for AssetStore {
    fn default() -> Self {
        Self {
            meshes: BTreeMap::new(),
            textures: BTreeMap::new(),
            null_texture: Arc::new(Texture::solid("builtin:null", [255, 255, 255, 255])),
        }
    }
}

impl AssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a mesh and its materials. Repeated loads return the same handles.
    pub fn load_mesh(&mut self, path: &str) -> Result<MeshAsset, AssetError> {
        if let Some(asset) = self.meshes.get(path) {
            return Ok(asset.clone());
        }

        let asset = match path {
            CUBE => {
                let (vertices, indices) = primitive::cube();
                let material = Material::default();
                self.build(path, vertices, vec![MeshPart::new(indices)], vec![material])
            }
            SPHERE => {
                let (vertices, indices) = primitive::uv_sphere(SPHERE_RINGS, SPHERE_SEGMENTS, false);
                let material = Material::with_diffuse("sphere", Vec3::ONE);
                self.build(path, vertices, vec![MeshPart::new(indices)], vec![material])
            }
            SKY_SPHERE => {
                let (vertices, indices) = primitive::uv_sphere(SPHERE_RINGS, SPHERE_SEGMENTS, true);
                let texture = self.load_texture(CHECKER)?;
                let material = Material::with_diffuse("sky", Vec3::new(0.02, 0.02, 0.08))
                    .with_texture(texture)
                    .with_shader(ShaderKind::Skybox);
                self.build(path, vertices, vec![MeshPart::new(indices)], vec![material])
            }
            _ => return Err(missing_or_unsupported(path)),
        };

        tracing::debug!(
            path,
            id = %asset.mesh.id,
            triangles = asset.mesh.triangle_count(),
            "mesh loaded"
        );
        self.meshes.insert(path.to_string(), asset.clone());
        Ok(asset)
    }

    /// Load a texture. Repeated loads return the same handle.
    pub fn load_texture(&mut self, path: &str) -> Result<Arc<Texture>, AssetError> {
        if let Some(texture) = self.textures.get(path) {
            return Ok(texture.clone());
        }

        let texture = match path {
            WHITE => Texture::solid(path, [255, 255, 255, 255]),
            CHECKER => Texture::checker(path, 8, [200, 200, 200, 255], [60, 60, 60, 255]),
            _ => return Err(missing_or_unsupported(path)),
        };

        tracing::debug!(path, width = texture.width, height = texture.height, "texture loaded");
        let texture = Arc::new(texture);
        self.textures.insert(path.to_string(), texture.clone());
        Ok(texture)
    }

    /// Plug externally parsed geometry in under `path`.
    ///
    /// Parts index into `vertices`. Part `i` adopts `materials[i]` when the
    /// part carries no material of its own. Replaces any earlier entry.
    pub fn register_mesh(
        &mut self,
        path: &str,
        vertices: Vec<Vertex>,
        parts: Vec<MeshPart>,
        materials: Vec<Material>,
    ) -> MeshAsset {
        let asset = self.build(path, vertices, parts, materials);
        if self.meshes.insert(path.to_string(), asset.clone()).is_some() {
            tracing::warn!(path, "mesh re-registered; earlier handles keep the old data");
        }
        asset
    }

    /// Plug an externally decoded RGBA8 image in under `path`.
    pub fn register_texture(
        &mut self,
        path: &str,
        width: u32,
        height: u32,
        rgba: Vec<u8>,
    ) -> Result<Arc<Texture>, AssetError> {
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(AssetError::InvalidTexture {
                path: path.to_string(),
                expected,
                actual: rgba.len(),
            });
        }
        let mut texture = Texture::solid(path, [0; 4]);
        texture.width = width;
        texture.height = height;
        texture.rgba = rgba;

        let texture = Arc::new(texture);
        self.textures.insert(path.to_string(), texture.clone());
        Ok(texture)
    }

    /// 1x1 white texture bound when a material has none.
    pub fn null_texture(&self) -> Arc<Texture> {
        self.null_texture.clone()
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    fn build(
        &self,
        path: &str,
        vertices: Vec<Vertex>,
        mut parts: Vec<MeshPart>,
        materials: Vec<Material>,
    ) -> MeshAsset {
        let materials: Vec<Arc<Material>> = materials.into_iter().map(Arc::new).collect();
        for (part, material) in parts.iter_mut().zip(&materials) {
            if part.material.is_none() {
                part.material = Some(material.clone());
            }
        }
        MeshAsset {
            mesh: Arc::new(Mesh::new(path, vertices, parts)),
            materials,
        }
    }
}

fn missing_or_unsupported(path: &str) -> AssetError {
    match std::fs::metadata(path) {
        Ok(_) => AssetError::UnsupportedFormat(path.to_string()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => AssetError::NotFound(path.to_string()),
        Err(e) => AssetError::Io(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn builtin_cube_loads_once() {
        let mut store = AssetStore::new();
        let a = store.load_mesh(CUBE).unwrap();
        let b = store.load_mesh(CUBE).unwrap();
        assert!(Arc::ptr_eq(&a.mesh, &b.mesh));
        assert!(Arc::ptr_eq(&a.materials[0], &b.materials[0]));
        assert_eq!(a.mesh.name, "cube");
        assert_eq!(a.mesh.triangle_count(), 12);
        assert_eq!(store.mesh_count(), 1);
    }

    #[test]
    fn builtin_parts_carry_their_material() {
        let mut store = AssetStore::new();
        let sphere = store.load_mesh(SPHERE).unwrap();
        let own = sphere.mesh.parts[0].material.as_ref().unwrap();
        assert!(Arc::ptr_eq(own, &sphere.materials[0]));
    }

    #[test]
    fn sky_sphere_uses_skybox_shader_and_shares_checker() {
        let mut store = AssetStore::new();
        let sky = store.load_mesh(SKY_SPHERE).unwrap();
        assert_eq!(sky.materials[0].shader, ShaderKind::Skybox);

        let checker = store.load_texture(CHECKER).unwrap();
        let bound = sky.materials[0].diffuse_texture.as_ref().unwrap();
        assert!(Arc::ptr_eq(bound, &checker));
        assert_eq!(store.texture_count(), 1);
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.obj");
        let mut store = AssetStore::new();
        let err = store.load_mesh(path.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, AssetError::NotFound(_)));

        let err = store.load_texture(path.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, AssetError::NotFound(_)));
    }

    #[test]
    fn existing_file_is_unsupported() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "v 0 0 0\n").unwrap();
        let mut store = AssetStore::new();
        let err = store.load_mesh(file.path().to_str().unwrap()).unwrap_err();
        assert!(matches!(err, AssetError::UnsupportedFormat(_)));
        assert_eq!(store.mesh_count(), 0);
    }

    #[test]
    fn registered_mesh_is_served_by_path() {
        let mut store = AssetStore::new();
        let vertices = vec![
            Vertex::new(Vec3::ZERO, Vec3::Z, Vec2::ZERO),
            Vertex::new(Vec3::X, Vec3::Z, Vec2::X),
            Vertex::new(Vec3::Y, Vec3::Z, Vec2::Y),
        ];
        let red = Material::with_diffuse("red", Vec3::X);
        let registered = store.register_mesh(
            "models/tri.obj",
            vertices,
            vec![MeshPart::new(vec![0, 1, 2])],
            vec![red],
        );

        let loaded = store.load_mesh("models/tri.obj").unwrap();
        assert!(Arc::ptr_eq(&registered.mesh, &loaded.mesh));
        assert_eq!(loaded.mesh.name, "tri");
        assert_eq!(loaded.materials[0].name, "red");
        assert_eq!(loaded.mesh.parts[0].material.as_ref().unwrap().name, "red");
    }

    #[test]
    fn part_material_is_not_overridden() {
        let mut store = AssetStore::new();
        let own = Arc::new(Material::with_diffuse("own", Vec3::Y));
        let asset = store.register_mesh(
            "p",
            Vec::new(),
            vec![MeshPart::new(Vec::new()).with_material(own.clone())],
            vec![Material::default()],
        );
        assert!(Arc::ptr_eq(asset.mesh.parts[0].material.as_ref().unwrap(), &own));
    }

    #[test]
    fn register_texture_validates_size() {
        let mut store = AssetStore::new();
        let err = store.register_texture("t", 2, 2, vec![0; 4]).unwrap_err();
        assert!(matches!(
            err,
            AssetError::InvalidTexture {
                expected: 16,
                actual: 4,
                ..
            }
        ));

        let tex = store.register_texture("t", 1, 2, vec![1; 8]).unwrap();
        assert_eq!((tex.width, tex.height), (1, 2));
        assert!(Arc::ptr_eq(&tex, &store.load_texture("t").unwrap()));
    }

    #[test]
    fn null_texture_is_white() {
        let store = AssetStore::new();
        assert_eq!(store.null_texture().texel(0, 0), Some([255; 4]));
    }
}

//! Asset handles: meshes, materials, textures, and the store that loads them.
//!
//! Assets are immutable once loaded and shared through `Arc`. Actors and
//! renderers hold handles; only the store creates them.
//!
//! # Invariants
//! - Loading the same path twice yields the same `Arc`s.
//! - `AssetId` depends only on the path.
//! - Every part of a loaded mesh has a material if the loader supplied one.

mod primitive;
mod store;
mod types;

pub use primitive::{cube, uv_sphere};
pub use store::{AssetError, AssetStore, CHECKER, CUBE, SKY_SPHERE, SPHERE, WHITE};
pub use types::{AssetId, Material, Mesh, MeshAsset, MeshPart, ShaderKind, Texture, Vertex};

pub fn crate_info() -> &'static str {
    "tinyengine-assets v0.1.0"
}

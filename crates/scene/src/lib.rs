//! Scene graph: actors in a transform hierarchy, updated and drawn each frame.
//!
//! # Invariants
//! - Strict tree: a child's parent lists it exactly once; no cycles.
//! - Destroying an actor destroys its subtree and unlinks it from its parent.
//! - World matrix = parent chain of local T·R·S matrices, recomputed on request.
//! - Traversal order is parent first, then children in insertion order.
//! - Meshes and materials are shared handles; the scene never frees them.

mod actor;
mod camera;
mod scene;
mod universe;

pub use actor::{ActorKind, ActorNode, MeshActor};
pub use camera::ActorCamera;
pub use scene::{Scene, SceneError, UpdateContext};
pub use universe::UniverseActor;

pub fn crate_info() -> &'static str {
    "tinyengine-scene v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("scene"));
    }
}

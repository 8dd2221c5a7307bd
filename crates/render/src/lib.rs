//! Rendering adapter: the drawing interface the scene talks to, and cameras.
//!
//! # Invariants
//! - Renderers never mutate scene state; they only see meshes, materials,
//!   a camera and a world matrix.
//! - Part materials resolve the same way in every renderer.
//! - Cached camera matrices are always equal to a fresh recompute.
//! - Lighting is set by the game and persists across frames until replaced.
//!
//! A [`DebugTextRenderer`] stands in for the GPU backend in headless runs.

mod camera;
mod lighting;
mod renderer;

pub use camera::{Camera, FlyCamera, Lens, OrbitCamera};
pub use lighting::{DirectionalLight, Lighting, MAX_LIGHTS};
pub use renderer::{DebugTextRenderer, DrawRecord, Renderer, part_material};

/// Errors raised while bringing up a rendering backend.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("no compatible GPU adapter found")]
    NoAdapter,
    #[error("failed to create surface: {0}")]
    Surface(String),
    #[error("failed to acquire GPU device: {0}")]
    Device(String),
}

pub fn crate_info() -> &'static str {
    "tinyengine-render v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}

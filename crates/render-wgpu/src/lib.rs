//! wgpu render backend for the engine.
//!
//! Draw calls are batched per mesh part and drawn instanced at `present`,
//! skybox parts first and unlit, then everything else under one directional
//! light.
//!
//! # Invariants
//! - Renderer never mutates scene state.
//! - GPU buffers for a mesh are uploaded once and reused by asset id.
//! - A lost or outdated surface drops that frame and reconfigures; it is
//!   never fatal.

mod batch;
mod gpu;
mod shaders;

pub use batch::{BatchKey, FrameBatch, InstanceData, Pass};
pub use gpu::WgpuRenderer;

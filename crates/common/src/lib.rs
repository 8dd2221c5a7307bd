//! Shared types used across the engine crates.
//!
//! # Invariants
//! - `Transform::local_matrix` composes scale, then rotation, then translation.
//! - `ActorId` values are never reused within a process.

mod key;
mod types;

pub use key::Key;
pub use types::{ActorId, Transform};

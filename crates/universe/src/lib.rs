//! Procedural star field: which integer cells hold a star, and when the
//! field around a moving viewer has to be rebuilt.
//!
//! # Invariants
//! - A cell's star (presence, palette index, jitter) depends only on the cell.
//! - Generating around the same centre always yields the same placements,
//!   regardless of what was generated in between.
//! - Regeneration triggers on the floor of the eye position, not the eye itself.
//!
//! Planning is pure; attaching the result to a scene is the caller's job.

mod cell;
mod field;
mod rng;

pub use cell::CellCoord;
pub use field::{StarField, StarPlacement, UniverseConfig, place_star, plan};
pub use rng::CellRng;

pub fn crate_info() -> &'static str {
    "tinyengine-universe v0.1.0"
}

//! Input sampling: raw window events in, per-frame key and mouse state out.
//!
//! # Invariants
//! - `previous` and `current` change together, once per frame, in that order.
//! - Edge queries compare snapshots, never raw event counts.
//! - Unseen keys read as released.

mod input;

pub use input::Input;
pub use tinyengine_common::Key;

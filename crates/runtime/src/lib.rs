//! Runtime: the per-frame game loop and the capabilities it drives.
//!
//! # Invariants
//! - Each rendered frame runs clear, input sample, update, draw, present, in
//!   that order.
//! - Once a `WindowClosed` is delivered no further update or draw happens.
//! - Resizes reach the renderer before the next rendered frame.
//! - A stopped engine stays stopped.

mod config;
mod engine;
mod error;
mod game;
mod timing;
mod window;

pub use config::{ConfigError, EngineConfig, WindowConfig};
pub use engine::{Engine, LoopState, RunSummary};
pub use error::EngineError;
pub use game::{FrameContext, Game, InitContext};
pub use timing::{FrameClock, FrameTick, FrameTimer};
pub use window::{ScriptedWindow, Window};

pub fn crate_info() -> &'static str {
    "tinyengine-runtime v0.1.0"
}

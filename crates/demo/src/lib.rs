//! Demo games built on the engine runtime: a space explorer and a
//! two-player paddle game.
//!
//! # Invariants
//! - Each game sets its own lighting during init.
//! - Paddles never leave `±15`; the ball is re-served from the centre once
//!   it passes `±34`.
//! - Exactly one space camera is active; `Tab` switches between them.
//! - The skybox is re-centred on the active eye every frame.
//! - The star field is regenerated from the active eye, never from the
//!   inactive camera.

mod paddle;
mod space;

pub use paddle::{Body, PaddleGame, Rect, paddle_lighting};
pub use space::{CameraMode, SpaceGame, space_lighting};

pub fn crate_info() -> &'static str {
    "tinyengine-demo v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("demo"));
    }
}

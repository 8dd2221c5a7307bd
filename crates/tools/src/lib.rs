//! Developer tooling: read-only scene inspection for logs, the CLI and tests.
//!
//! # Invariants
//! - Tools never mutate the scene.

mod inspector;

pub use inspector::{ActorInfo, SceneInspector, SceneSummary};

pub fn crate_info() -> &'static str {
    "tinyengine-tools v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("tools"));
    }
}

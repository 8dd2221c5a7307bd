use tinyengine_assets::AssetError;
use tinyengine_render::RenderError;
use tinyengine_scene::SceneError;

use crate::config::ConfigError;

/// Errors that stop the engine from starting or running.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("window creation failed: {0}")]
    Window(String),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("asset error: {0}")]
    Asset(#[from] AssetError),
    #[error("scene error: {0}")]
    Scene(#[from] SceneError),
    #[error("the engine has already stopped and cannot run again")]
    AlreadyStopped,
}

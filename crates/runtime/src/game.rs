use tinyengine_assets::AssetStore;
use tinyengine_event::Subject;
use tinyengine_input::Input;
use tinyengine_render::Renderer;

use crate::config::EngineConfig;
use crate::error::EngineError;

/// What a game gets to set itself up with.
pub struct InitContext<'a> {
    /// Register cameras and other observers here.
    pub subject: &'a Subject,
    pub assets: &'a mut AssetStore,
    pub config: &'a EngineConfig,
    /// Window size at start-up.
    pub size: (u32, u32),
    /// For one-off renderer setup such as lighting. Draws belong in
    /// [`Game::on_draw`].
    pub renderer: &'a mut dyn Renderer,
}

/// Per-frame state handed to [`Game::on_update`].
pub struct FrameContext<'a> {
    /// Input as sampled at the start of this frame.
    pub input: &'a Input,
    pub elapsed: f32,
    pub delta: f32,
    /// Zero-based index of this rendered frame.
    pub frame: u64,
}

/// A game driven by the [`Engine`](crate::Engine) loop.
pub trait Game {
    /// Called once before the first frame.
    fn on_init(&mut self, ctx: &mut InitContext<'_>) -> Result<(), EngineError>;

    fn on_update(&mut self, ctx: &FrameContext<'_>);

    /// Submit this frame's draws. The renderer is already cleared.
    fn on_draw(&mut self, renderer: &mut dyn Renderer);

    /// Called once after the loop stops.
    fn on_shutdown(&mut self) {}
}

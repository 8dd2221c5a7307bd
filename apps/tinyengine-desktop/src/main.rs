use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tinyengine_demo::{PaddleGame, SpaceGame};
use tinyengine_render_wgpu::WgpuRenderer;
use tinyengine_runtime::{Engine, EngineConfig, RunSummary, Window};
use tracing_subscriber::EnvFilter;

mod window;

use window::WinitWindow;

#[derive(Parser)]
#[command(name = "tinyengine-desktop", about = "Fly through the TinyEngine space demo")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Change to this directory before starting
    #[arg(short = 'C', long)]
    working_dir: Option<PathBuf>,

    /// Engine configuration (YAML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Which demo to play
    #[arg(long, value_enum, default_value_t = Demo::Space)]
    game: Demo,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Demo {
    Space,
    Paddle,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    if let Some(dir) = &cli.working_dir {
        std::env::set_current_dir(dir)
            .with_context(|| format!("cannot change directory to {}", dir.display()))?;
    }

    let config = match &cli.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };

    tracing::info!(game = ?cli.game, "tinyengine-desktop starting");
    match cli.game {
        Demo::Space => tracing::info!(
            "controls: WASD move, R/F up/down, hold right mouse to look, Tab switches camera"
        ),
        Demo::Paddle => tracing::info!("controls: W/S left paddle, I/K right paddle"),
    }

    let window = WinitWindow::new(&config.window)?;
    let (width, height) = window.size();
    let renderer = WgpuRenderer::new(window.handle(), width, height)?;

    let mut engine = Engine::new(window, renderer, config);
    let summary: RunSummary = match cli.game {
        Demo::Space => engine.run(&mut SpaceGame::new())?,
        Demo::Paddle => engine.run(&mut PaddleGame::new())?,
    };

    println!(
        "{} frames in {:.1}s (avg {:.2} ms, max {:.2} ms)",
        summary.frames,
        summary.wall_time.as_secs_f32(),
        summary.average_frame.as_secs_f64() * 1000.0,
        summary.max_frame.as_secs_f64() * 1000.0
    );
    Ok(())
}

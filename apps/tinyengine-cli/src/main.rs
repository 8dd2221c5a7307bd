use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tinyengine_common::Key;
use tinyengine_demo::{PaddleGame, SpaceGame};
use tinyengine_event::Event;
use tinyengine_render::DebugTextRenderer;
use tinyengine_runtime::{Engine, EngineConfig, Game, RunSummary, ScriptedWindow};
use tinyengine_scene::ActorKind;
use tinyengine_tools::SceneInspector;
use tinyengine_universe::{CellCoord, plan};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tinyengine-cli", about = "CLI tool for TinyEngine")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Change to this directory before doing anything else
    #[arg(short = 'C', long)]
    working_dir: Option<PathBuf>,

    /// Engine configuration (YAML)
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print engine version and crate info
    Info,
    /// Print the effective configuration as YAML
    Config,
    /// Plan the star field around a cell and report on it
    Universe {
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        x: i32,
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        y: i32,
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        z: i32,
    },
    /// Run the space demo headless with the text renderer
    Run {
        /// Number of frames to render
        #[arg(short, long, default_value = "60")]
        frames: u64,
        /// Letter keys held from the second frame on, e.g. "WD"
        #[arg(long, default_value = "")]
        hold: String,
        /// Lines of the last frame to print
        #[arg(long, default_value = "12")]
        lines: usize,
    },
    /// Play the paddle game headless and report the rally
    Paddle {
        /// Number of frames to play
        #[arg(short, long, default_value = "600")]
        frames: u64,
        /// Letter keys held from the second frame on, e.g. "WI"
        #[arg(long, default_value = "")]
        hold: String,
    },
    /// Dump the demo's actor tree after one frame
    Tree {
        /// Children listed per actor before eliding the rest
        #[arg(long, default_value = "8")]
        max_children: usize,
    },
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
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading configuration");
            EngineConfig::load(path)?
        }
        None => EngineConfig::default(),
    };

    match cli.command {
        Commands::Info => {
            println!("tinyengine-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("assets: {}", tinyengine_assets::crate_info());
            println!("render: {}", tinyengine_render::crate_info());
            println!("universe: {}", tinyengine_universe::crate_info());
            println!("scene: {}", tinyengine_scene::crate_info());
            println!("runtime: {}", tinyengine_runtime::crate_info());
            println!("tools: {}", tinyengine_tools::crate_info());
            println!("demo: {}", tinyengine_demo::crate_info());
        }
        Commands::Config => {
            print!("{}", config.to_yaml()?);
        }
        Commands::Universe { x, y, z } => {
            let center = CellCoord::new(x, y, z);
            tracing::info!(%center, extent = config.universe.extent, "planning star field");
            let started = Instant::now();
            let stars = plan(center, &config.universe);
            let elapsed = started.elapsed();

            let cells = config.universe.cell_count();
            println!(
                "Universe around {center}: {} stars in {cells} cells ({:.1}%), planned in {elapsed:?}",
                stars.len(),
                100.0 * stars.len() as f64 / cells.max(1) as f64
            );

            let mut per_material: BTreeMap<usize, usize> = BTreeMap::new();
            for star in &stars {
                *per_material.entry(star.material).or_default() += 1;
            }
            for (material, count) in per_material {
                println!("  material {material}: {count}");
            }

            let origin = center.as_vec3();
            if let Some(nearest) = stars.iter().min_by(|a, b| {
                a.position
                    .distance(origin)
                    .total_cmp(&b.position.distance(origin))
            }) {
                let p = nearest.position;
                println!(
                    "  nearest: cell {} at ({:.2}, {:.2}, {:.2}), {:.2} away",
                    nearest.cell,
                    p.x,
                    p.y,
                    p.z,
                    p.distance(origin)
                );
            }
        }
        Commands::Run {
            frames,
            hold,
            lines,
        } => {
            let keys = parse_keys(&hold)?;
            tracing::info!(frames, held = keys.len(), "running space demo headless");
            let (game, engine, summary) = run_headless(config, frames, &keys)?;

            println!(
                "Ran {} frames ({} skipped) in {:.2}s, avg frame {:.3} ms",
                summary.frames,
                summary.skipped,
                summary.wall_time.as_secs_f32(),
                summary.average_frame.as_secs_f64() * 1000.0
            );
            let eye = game.active_eye();
            println!(
                "Camera: {:?} eye=({:.2}, {:.2}, {:.2})",
                game.camera_mode(),
                eye.x,
                eye.y,
                eye.z
            );
            if let Some(universe) = game.universe() {
                if let Some(ActorKind::Universe(u)) = game.scene().get(universe).map(|n| &n.kind) {
                    println!(
                        "Universe: {} generations, {} stars around {:?}",
                        u.field.generations(),
                        game.scene().children(universe).len(),
                        u.field.last_center()
                    );
                }
            }
            let text = engine.renderer().frame_text();
            for line in text.lines().take(lines) {
                println!("{line}");
            }
            let total = text.lines().count();
            if total > lines {
                println!("  ... {} more lines", total - lines);
            }
        }
        Commands::Paddle { frames, hold } => {
            let keys = parse_keys(&hold)?;
            tracing::info!(frames, held = keys.len(), "playing paddle game headless");
            let mut game = PaddleGame::new();
            let (_, summary) = run_scripted(config, frames, &keys, &mut game)?;

            let (left, right) = game.paddles();
            let ball = game.ball().position;
            println!(
                "Played {} frames in {:.2}s: {} serves, {} paddle hits",
                summary.frames,
                summary.wall_time.as_secs_f32(),
                game.serves(),
                game.paddle_hits()
            );
            println!(
                "Paddles at {left:.2} / {right:.2}, ball at ({:.2}, {:.2})",
                ball.x, ball.y
            );
        }
        Commands::Tree { max_children } => {
            tracing::debug!(max_children, "dumping actor tree");
            let (game, _, _) = run_headless(config, 1, &[])?;
            println!("{}", SceneInspector::summary(game.scene()));
            print!("{}", SceneInspector::tree(game.scene(), max_children));
        }
    }

    Ok(())
}

fn parse_keys(letters: &str) -> Result<Vec<Key>> {
    letters
        .chars()
        .map(|c| match Key::from_letter(c) {
            Some(key) => Ok(key),
            None => bail!("'{c}' is not a letter key"),
        })
        .collect()
}

/// Run the space demo for `frames` frames with `keys` held from the second
/// frame on.
fn run_headless(
    config: EngineConfig,
    frames: u64,
    keys: &[Key],
) -> Result<(SpaceGame, Engine<ScriptedWindow, DebugTextRenderer>, RunSummary)> {
    let mut game = SpaceGame::new();
    let (engine, summary) = run_scripted(config, frames, keys, &mut game)?;
    Ok((game, engine, summary))
}

fn run_scripted<G: Game>(
    mut config: EngineConfig,
    frames: u64,
    keys: &[Key],
    game: &mut G,
) -> Result<(Engine<ScriptedWindow, DebugTextRenderer>, RunSummary)> {
    config.max_frames = Some(frames);
    config.min_frame_time_ms = 0;

    let mut window = ScriptedWindow::new(config.window.width, config.window.height);
    if !keys.is_empty() {
        window.push(keys.iter().map(|&k| Event::KeyDown(k)).collect());
    }

    let mut engine = Engine::new(window, DebugTextRenderer::new(), config);
    let summary = engine.run(game)?;
    Ok((engine, summary))
}

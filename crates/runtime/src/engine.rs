use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use tinyengine_assets::AssetStore;
use tinyengine_event::{Event, Observer};
use tinyengine_input::Input;
use tinyengine_render::Renderer;

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::game::{FrameContext, Game, InitContext};
use crate::timing::{FrameClock, FrameTimer};
use crate::window::Window;

const FRAME_HISTORY: usize = 120;

/// Lifecycle of the game loop. `Stopped` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Uninitialized,
    Running,
    Stopped,
}

/// Window events the loop itself reacts to.
#[derive(Debug, Default)]
struct RunControl {
    close_requested: bool,
    pending_resize: Option<(u32, u32)>,
}

impl Observer for RunControl {
    fn on_notify(&mut self, event: &Event) {
        match *event {
            Event::WindowClosed => self.close_requested = true,
            Event::WindowResized { width, height } => self.pending_resize = Some((width, height)),
            _ => {}
        }
    }
}

/// What a finished run did.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Frames that were updated, drawn and presented.
    pub frames: u64,
    /// Loop iterations skipped for arriving before the minimum frame time.
    pub skipped: u64,
    pub wall_time: Duration,
    pub average_frame: Duration,
    pub min_frame: Duration,
    pub max_frame: Duration,
}

/// The game loop: owns a window, a renderer and the shared services games use.
pub struct Engine<W: Window, R: Renderer> {
    window: W,
    renderer: R,
    config: EngineConfig,
    assets: AssetStore,
    input: Rc<RefCell<Input>>,
    control: Rc<RefCell<RunControl>>,
    state: LoopState,
    timer: FrameTimer,
}

impl<W: Window, R: Renderer> Engine<W, R> {
    pub fn new(window: W, renderer: R, config: EngineConfig) -> Self {
        let input = Rc::new(RefCell::new(Input::new()));
        let control = Rc::new(RefCell::new(RunControl::default()));
        window.subject().add_observer(&input);
        window.subject().add_observer(&control);

        Self {
            window,
            renderer,
            config,
            assets: AssetStore::new(),
            input,
            control,
            state: LoopState::Uninitialized,
            timer: FrameTimer::new(FRAME_HISTORY),
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn window(&self) -> &W {
        &self.window
    }

    pub fn window_mut(&mut self) -> &mut W {
        &mut self.window
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn assets_mut(&mut self) -> &mut AssetStore {
        &mut self.assets
    }

    /// Ask the loop to stop at the top of its next iteration.
    pub fn request_stop(&mut self) {
        self.control.borrow_mut().close_requested = true;
    }

    /// Initialise `game`, then run frames until the window closes or the
    /// frame limit is reached.
    pub fn run<G: Game>(&mut self, game: &mut G) -> Result<RunSummary, EngineError> {
        if self.state == LoopState::Stopped {
            return Err(EngineError::AlreadyStopped);
        }
        let _span = tracing::info_span!("engine_run").entered();

        let mut init = InitContext {
            subject: self.window.subject(),
            assets: &mut self.assets,
            config: &self.config,
            size: self.window.size(),
            renderer: &mut self.renderer,
        };
        if let Err(e) = game.on_init(&mut init) {
            self.state = LoopState::Stopped;
            return Err(e);
        }

        self.state = LoopState::Running;
        tracing::info!(
            min_frame_ms = self.config.min_frame_time_ms,
            max_frames = ?self.config.max_frames,
            "game loop started"
        );

        let started = Instant::now();
        let mut clock = FrameClock::start(self.config.min_frame_time());
        let mut frames = 0u64;
        let mut skipped = 0u64;

        while self.state == LoopState::Running {
            if self.control.borrow().close_requested {
                break;
            }

            self.window.peek_messages();
            if self.control.borrow().close_requested {
                break;
            }

            let resize = self.control.borrow_mut().pending_resize.take();
            if let Some((width, height)) = resize {
                tracing::debug!(width, height, "forwarding resize to renderer");
                self.renderer.resize(width, height);
            }

            let Some(tick) = clock.tick() else {
                skipped += 1;
                continue;
            };

            self.renderer.clear();
            self.input.borrow_mut().update();
            {
                let input = self.input.borrow();
                game.on_update(&FrameContext {
                    input: &input,
                    elapsed: tick.elapsed,
                    delta: tick.delta,
                    frame: frames,
                });
            }
            game.on_draw(&mut self.renderer);
            self.renderer.present();

            self.timer.record(Duration::from_secs_f32(tick.delta));
            frames += 1;
            tracing::trace!(frame = frames, delta = tick.delta, "frame presented");

            if self.config.max_frames.is_some_and(|max| frames >= max) {
                tracing::debug!(frames, "frame limit reached");
                break;
            }
        }

        self.state = LoopState::Stopped;
        game.on_shutdown();
        self.input.borrow_mut().reset();

        let summary = RunSummary {
            frames,
            skipped,
            wall_time: started.elapsed(),
            average_frame: self.timer.average(),
            min_frame: self.timer.min(),
            max_frame: self.timer.max(),
        };
        tracing::info!(
            frames,
            skipped,
            avg = ?summary.average_frame,
            min = ?summary.min_frame,
            max = ?summary.max_frame,
            "game loop stopped"
        );
        Ok(summary)
    }
}

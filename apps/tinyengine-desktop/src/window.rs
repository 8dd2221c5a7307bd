use std::sync::Arc;
use std::time::Duration;

use tinyengine_common::Key;
use tinyengine_event::{Event, Subject};
use tinyengine_runtime::{EngineError, Window, WindowConfig};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, DeviceId, ElementState, KeyEvent, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window as OsWindow, WindowAttributes, WindowId};

/// Pumps allowed for the platform to hand us a window at start-up.
const STARTUP_PUMPS: usize = 100;
const STARTUP_PUMP_TIMEOUT: Duration = Duration::from_millis(10);

/// winit event handler. Translates platform events into engine events and
/// queues them; nothing is published from inside winit's callbacks.
struct Pump {
    attributes: WindowAttributes,
    window: Option<Arc<OsWindow>>,
    failure: Option<String>,
    queue: Vec<Event>,
    size: (u32, u32),
    mouse_captured: bool,
    closed: bool,
}

impl Pump {
    fn set_capture(&mut self, captured: bool) {
        self.mouse_captured = captured;
        if let Some(window) = &self.window {
            window.set_cursor_visible(!captured);
        }
    }

    fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            self.queue.push(Event::WindowClosed);
        }
    }
}

impl ApplicationHandler for Pump {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        match event_loop.create_window(self.attributes.clone()) {
            Ok(window) => {
                let size = window.inner_size();
                self.size = (size.width, size.height);
                self.window = Some(Arc::new(window));
                self.queue.push(Event::WindowCreated);
                self.queue.push(Event::WindowResized {
                    width: size.width,
                    height: size.height,
                });
                tracing::info!(width = size.width, height = size.height, "window created");
            }
            Err(e) => self.failure = Some(e.to_string()),
        }
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested | WindowEvent::Destroyed => self.close(),
            WindowEvent::Resized(size) => {
                self.size = (size.width, size.height);
                self.queue.push(Event::WindowResized {
                    width: size.width,
                    height: size.height,
                });
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                if code == KeyCode::Escape && state == ElementState::Pressed {
                    self.set_capture(false);
                }
                if let Some(key) = map_key(code) {
                    self.queue.push(match state {
                        ElementState::Pressed => Event::KeyDown(key),
                        ElementState::Released => Event::KeyUp(key),
                    });
                }
            }
            WindowEvent::MouseInput {
                button: MouseButton::Right,
                state,
                ..
            } => self.set_capture(state == ElementState::Pressed),
            WindowEvent::Focused(false) => self.set_capture(false),
            _ => {}
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _device_id: DeviceId, event: DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta } = event {
            if self.mouse_captured {
                self.queue.push(Event::MouseMoved {
                    dx: delta.0 as f32,
                    dy: delta.1 as f32,
                });
            }
        }
    }
}

/// Desktop window driven by the engine loop rather than by winit.
pub struct WinitWindow {
    event_loop: EventLoop<()>,
    pump: Pump,
    window: Arc<OsWindow>,
    subject: Subject,
}

impl WinitWindow {
    pub fn new(config: &WindowConfig) -> Result<Self, EngineError> {
        let mut event_loop = EventLoop::new().map_err(|e| EngineError::Window(e.to_string()))?;
        let mut pump = Pump {
            attributes: OsWindow::default_attributes()
                .with_title(config.title.clone())
                .with_inner_size(PhysicalSize::new(config.width, config.height)),
            window: None,
            failure: None,
            queue: Vec::new(),
            size: (config.width, config.height),
            mouse_captured: false,
            closed: false,
        };

        for _ in 0..STARTUP_PUMPS {
            if let PumpStatus::Exit(code) =
                event_loop.pump_app_events(Some(STARTUP_PUMP_TIMEOUT), &mut pump)
            {
                return Err(EngineError::Window(format!(
                    "event loop exited with code {code} during start-up"
                )));
            }
            if pump.window.is_some() || pump.failure.is_some() {
                break;
            }
        }
        if let Some(failure) = pump.failure.take() {
            return Err(EngineError::Window(failure));
        }
        let window = pump
            .window
            .clone()
            .ok_or_else(|| EngineError::Window("the platform never created a window".into()))?;

        Ok(Self {
            event_loop,
            pump,
            window,
            subject: Subject::new(),
        })
    }

    /// Shared handle for building a rendering surface.
    pub fn handle(&self) -> Arc<OsWindow> {
        Arc::clone(&self.window)
    }
}

impl Window for WinitWindow {
    fn peek_messages(&mut self) {
        if let PumpStatus::Exit(code) = self
            .event_loop
            .pump_app_events(Some(Duration::ZERO), &mut self.pump)
        {
            tracing::debug!(code, "event loop exited");
            self.pump.close();
        }

        let events = std::mem::take(&mut self.pump.queue);
        for event in &events {
            self.subject.notify(event);
        }
    }

    fn size(&self) -> (u32, u32) {
        self.pump.size
    }

    fn subject(&self) -> &Subject {
        &self.subject
    }
}

fn map_key(code: KeyCode) -> Option<Key> {
    let key = match code {
        KeyCode::Escape => Key::Escape,
        KeyCode::Space => Key::Space,
        KeyCode::Tab => Key::Tab,
        KeyCode::Enter => Key::Enter,
        KeyCode::ShiftLeft | KeyCode::ShiftRight => Key::Shift,
        KeyCode::ControlLeft | KeyCode::ControlRight => Key::Control,
        KeyCode::ArrowLeft => Key::Left,
        KeyCode::ArrowUp => Key::Up,
        KeyCode::ArrowRight => Key::Right,
        KeyCode::ArrowDown => Key::Down,
        KeyCode::Digit0 => Key::Num0,
        KeyCode::Digit1 => Key::Num1,
        KeyCode::Digit2 => Key::Num2,
        KeyCode::Digit3 => Key::Num3,
        KeyCode::Digit4 => Key::Num4,
        KeyCode::Digit5 => Key::Num5,
        KeyCode::Digit6 => Key::Num6,
        KeyCode::Digit7 => Key::Num7,
        KeyCode::Digit8 => Key::Num8,
        KeyCode::Digit9 => Key::Num9,
        KeyCode::KeyA => Key::A,
        KeyCode::KeyB => Key::B,
        KeyCode::KeyC => Key::C,
        KeyCode::KeyD => Key::D,
        KeyCode::KeyE => Key::E,
        KeyCode::KeyF => Key::F,
        KeyCode::KeyG => Key::G,
        KeyCode::KeyH => Key::H,
        KeyCode::KeyI => Key::I,
        KeyCode::KeyJ => Key::J,
        KeyCode::KeyK => Key::K,
        KeyCode::KeyL => Key::L,
        KeyCode::KeyM => Key::M,
        KeyCode::KeyN => Key::N,
        KeyCode::KeyO => Key::O,
        KeyCode::KeyP => Key::P,
        KeyCode::KeyQ => Key::Q,
        KeyCode::KeyR => Key::R,
        KeyCode::KeyS => Key::S,
        KeyCode::KeyT => Key::T,
        KeyCode::KeyU => Key::U,
        KeyCode::KeyV => Key::V,
        KeyCode::KeyW => Key::W,
        KeyCode::KeyX => Key::X,
        KeyCode::KeyY => Key::Y,
        KeyCode::KeyZ => Key::Z,
        _ => return None,
    };
    Some(key)
}

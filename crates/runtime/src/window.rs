use std::collections::VecDeque;

use tinyengine_event::{Event, Subject};

/// Platform window capability.
///
/// The window owns the [`Subject`] its events are published on. Events are
/// only delivered from inside [`Window::peek_messages`].
pub trait Window {
    /// Deliver every pending platform message to the subject, then return.
    fn peek_messages(&mut self);

    /// Client area in physical pixels.
    fn size(&self) -> (u32, u32);

    fn subject(&self) -> &Subject;
}

/// Headless window that replays a script of events, one batch per pump.
///
/// Starts with `WindowCreated` and a resize to its initial size queued, as a
/// real window would report them. Once the script runs out, pumps deliver
/// nothing, or `WindowClosed` if [`ScriptedWindow::close_when_done`] was set.
#[derive(Default)]
pub struct ScriptedWindow {
    subject: Subject,
    size: (u32, u32),
    script: VecDeque<Vec<Event>>,
    close_when_done: bool,
    closed: bool,
    pumps: u64,
}

impl ScriptedWindow {
    pub fn new(width: u32, height: u32) -> Self {
        let mut window = Self {
            size: (width, height),
            ..Self::default()
        };
        window.push(vec![
            Event::WindowCreated,
            Event::WindowResized { width, height },
        ]);
        window
    }

    /// Queue one pump's worth of events.
    pub fn push(&mut self, events: Vec<Event>) -> &mut Self {
        self.script.push_back(events);
        self
    }

    /// Queue `count` pumps that deliver nothing.
    pub fn idle(&mut self, count: usize) -> &mut Self {
        for _ in 0..count {
            self.script.push_back(Vec::new());
        }
        self
    }

    /// Close the window on the first pump after the script is exhausted.
    pub fn close_when_done(mut self) -> Self {
        self.close_when_done = true;
        self
    }

    /// Number of `peek_messages` calls so far.
    pub fn pumps(&self) -> u64 {
        self.pumps
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl Window for ScriptedWindow {
    fn peek_messages(&mut self) {
        self.pumps += 1;
        let batch = match self.script.pop_front() {
            Some(batch) => batch,
            None if self.close_when_done && !self.closed => vec![Event::WindowClosed],
            None => return,
        };

        for event in batch {
            match event {
                Event::WindowResized { width, height } => self.size = (width, height),
                Event::WindowClosed => self.closed = true,
                _ => {}
            }
            self.subject.notify(&event);
        }
    }

    fn size(&self) -> (u32, u32) {
        self.size
    }

    fn subject(&self) -> &Subject {
        &self.subject
    }
}

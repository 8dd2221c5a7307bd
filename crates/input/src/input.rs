use std::collections::HashSet;

use glam::Vec2;
use tinyengine_common::Key;
use tinyengine_event::{Event, Observer};

/// Keyboard and mouse state sampled once per frame.
///
/// Window events write the live buffers as they arrive; [`Input::update`]
/// snapshots them so that game code sees one stable previous/current pair for
/// the whole frame.
#[derive(Debug, Default, Clone)]
pub struct Input {
    live_keys: HashSet<Key>,
    current_keys: HashSet<Key>,
    previous_keys: HashSet<Key>,
    live_mouse: Vec2,
    current_mouse: Vec2,
    previous_mouse: Vec2,
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance one frame: previous := current, current := live.
    pub fn update(&mut self) {
        self.previous_keys = std::mem::replace(&mut self.current_keys, self.live_keys.clone());
        self.previous_mouse = self.current_mouse;
        self.current_mouse = self.live_mouse;
        tracing::trace!(
            held = self.current_keys.len(),
            mouse_dx = self.current_mouse.x - self.previous_mouse.x,
            mouse_dy = self.current_mouse.y - self.previous_mouse.y,
            "input sampled"
        );
    }

    /// Is the key held in the current frame?
    pub fn key(&self, key: Key) -> bool {
        self.current_keys.contains(&key)
    }

    /// Did the key go down this frame?
    pub fn key_down(&self, key: Key) -> bool {
        self.current_keys.contains(&key) && !self.previous_keys.contains(&key)
    }

    /// Was the key released this frame?
    pub fn key_up(&self, key: Key) -> bool {
        !self.current_keys.contains(&key) && self.previous_keys.contains(&key)
    }

    /// Mouse motion between the last two samples.
    pub fn mouse_delta(&self) -> Vec2 {
        self.current_mouse - self.previous_mouse
    }

    /// Forget everything, including keys that are still physically held.
    pub fn reset(&mut self) {
        tracing::debug!(held = self.live_keys.len(), "input reset");
        *self = Self::default();
    }

    fn on_key_down(&mut self, key: Key) {
        self.live_keys.insert(key);
    }

    fn on_key_up(&mut self, key: Key) {
        self.live_keys.remove(&key);
    }

    fn on_mouse_move(&mut self, dx: f32, dy: f32) {
        self.live_mouse += Vec2::new(dx, dy);
    }
}

impl Observer for Input {
    fn on_notify(&mut self, event: &Event) {
        match *event {
            Event::KeyDown(key) => self.on_key_down(key),
            Event::KeyUp(key) => self.on_key_up(key),
            Event::MouseMoved { dx, dy } => self.on_mouse_move(dx, dy),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use tinyengine_event::Subject;

    fn frame(input: &mut Input, events: &[Event]) {
        for e in events {
            input.on_notify(e);
        }
        input.update();
    }

    #[test]
    fn unseen_keys_are_released() {
        let input = Input::new();
        assert!(!input.key(Key::Q));
        assert!(!input.key_down(Key::Q));
        assert!(!input.key_up(Key::Q));
    }

    #[test]
    fn key_down_fires_on_exactly_one_frame() {
        let mut input = Input::new();

        frame(&mut input, &[]);
        assert!(!input.key_down(Key::W));

        frame(&mut input, &[Event::KeyDown(Key::W)]);
        assert!(input.key_down(Key::W));
        assert!(input.key(Key::W));

        // Held for several frames.
        for _ in 0..3 {
            frame(&mut input, &[]);
            assert!(!input.key_down(Key::W));
            assert!(input.key(Key::W));
        }

        frame(&mut input, &[Event::KeyUp(Key::W)]);
        assert!(!input.key_down(Key::W));
        assert!(input.key_up(Key::W));
        assert!(!input.key(Key::W));

        frame(&mut input, &[]);
        assert!(!input.key_up(Key::W));
    }

    #[test]
    fn repeated_key_down_is_idempotent() {
        let mut input = Input::new();
        frame(
            &mut input,
            &[
                Event::KeyDown(Key::A),
                Event::KeyDown(Key::A),
                Event::KeyDown(Key::A),
            ],
        );
        assert!(input.key_down(Key::A));

        frame(&mut input, &[Event::KeyDown(Key::A)]);
        assert!(!input.key_down(Key::A));
        assert!(input.key(Key::A));
    }

    #[test]
    fn press_and_release_within_one_frame_is_invisible() {
        let mut input = Input::new();
        frame(&mut input, &[Event::KeyDown(Key::E), Event::KeyUp(Key::E)]);
        assert!(!input.key(Key::E));
        assert!(!input.key_down(Key::E));
    }

    #[test]
    fn events_between_updates_do_not_change_the_frame() {
        let mut input = Input::new();
        frame(&mut input, &[]);
        input.on_notify(&Event::KeyDown(Key::D));
        assert!(!input.key(Key::D));
        input.update();
        assert!(input.key(Key::D));
    }

    #[test]
    fn mouse_delta_is_per_frame() {
        let mut input = Input::new();
        frame(
            &mut input,
            &[
                Event::MouseMoved { dx: 3.0, dy: -1.0 },
                Event::MouseMoved { dx: 2.0, dy: 0.5 },
            ],
        );
        assert_eq!(input.mouse_delta(), Vec2::new(5.0, -0.5));

        frame(&mut input, &[]);
        assert_eq!(input.mouse_delta(), Vec2::ZERO);

        frame(&mut input, &[Event::MouseMoved { dx: -4.0, dy: 4.0 }]);
        assert_eq!(input.mouse_delta(), Vec2::new(-4.0, 4.0));
    }

    #[test]
    fn receives_events_through_a_subject() {
        let subject = Subject::new();
        let input = Rc::new(RefCell::new(Input::new()));
        subject.add_observer(&input);

        subject.notify(&Event::KeyDown(Key::Space));
        subject.notify(&Event::WindowResized {
            width: 10,
            height: 10,
        });
        input.borrow_mut().update();

        assert!(input.borrow().key_down(Key::Space));
    }

    #[test]
    fn reset_clears_held_keys() {
        let mut input = Input::new();
        frame(&mut input, &[Event::KeyDown(Key::R)]);
        input.reset();
        input.update();
        assert!(!input.key(Key::R));
    }
}

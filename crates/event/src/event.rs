use tinyengine_common::Key;

/// Something that happened at the window or engine boundary.
///
/// The variant is the kind; the fields are the payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// The platform window exists and can be rendered to.
    WindowCreated,
    /// The user asked to close the window. Stops the game loop.
    WindowClosed,
    /// The client area changed size, in physical pixels.
    WindowResized { width: u32, height: u32 },
    /// A key went down. Auto-repeat is filtered by the window.
    KeyDown(Key),
    /// A key was released.
    KeyUp(Key),
    /// Relative mouse motion since the previous event.
    MouseMoved { dx: f32, dy: f32 },
}

/// Payload-free discriminant of an [`Event`], for filtering and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    WindowCreated,
    WindowClosed,
    WindowResized,
    KeyDown,
    KeyUp,
    MouseMoved,
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::WindowCreated => EventKind::WindowCreated,
            Self::WindowClosed => EventKind::WindowClosed,
            Self::WindowResized { .. } => EventKind::WindowResized,
            Self::KeyDown(_) => EventKind::KeyDown,
            Self::KeyUp(_) => EventKind::KeyUp,
            Self::MouseMoved { .. } => EventKind::MouseMoved,
        }
    }

    /// Key carried by keyboard events.
    pub fn key(&self) -> Option<Key> {
        match self {
            Self::KeyDown(key) | Self::KeyUp(key) => Some(*key),
            _ => None,
        }
    }

    /// Aspect ratio carried by a resize, if the new size is non-degenerate.
    pub fn resize_aspect(&self) -> Option<f32> {
        match *self {
            Self::WindowResized { width, height } if width > 0 && height > 0 => {
                Some(width as f32 / height as f32)
            }
            _ => None,
        }
    }
}

use serde::{Deserialize, Serialize};

/// Platform-neutral key code carried by keyboard events.
///
/// Windows map their native codes onto this set; keys outside it are dropped
/// at the window boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Key {
    Escape,
    Space,
    Tab,
    Enter,
    Shift,
    Control,
    Left,
    Up,
    Right,
    Down,
    Num0,
    Num1,
    Num2,
    Num3,
    Num4,
    Num5,
    Num6,
    Num7,
    Num8,
    Num9,
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
}

impl Key {
    /// Letter key for an ASCII letter, case-insensitive.
    pub fn from_letter(c: char) -> Option<Self> {
        const LETTERS: [Key; 26] = [
            Key::A,
            Key::B,
            Key::C,
            Key::D,
            Key::E,
            Key::F,
            Key::G,
            Key::H,
            Key::I,
            Key::J,
            Key::K,
            Key::L,
            Key::M,
            Key::N,
            Key::O,
            Key::P,
            Key::Q,
            Key::R,
            Key::S,
            Key::T,
            Key::U,
            Key::V,
            Key::W,
            Key::X,
            Key::Y,
            Key::Z,
        ];
        let c = c.to_ascii_uppercase();
        if c.is_ascii_uppercase() {
            Some(LETTERS[(c as u8 - b'A') as usize])
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_map_case_insensitively() {
        assert_eq!(Key::from_letter('w'), Some(Key::W));
        assert_eq!(Key::from_letter('W'), Some(Key::W));
        assert_eq!(Key::from_letter('a'), Some(Key::A));
        assert_eq!(Key::from_letter('z'), Some(Key::Z));
    }

    #[test]
    fn non_letters_are_rejected() {
        assert_eq!(Key::from_letter('1'), None);
        assert_eq!(Key::from_letter(' '), None);
        assert_eq!(Key::from_letter('é'), None);
    }
}

//! Virtual key table
//!
//! Fixed mapping from host key codes to toolkit virtual keys.

use crate::host::keycode as kc;

/// Toolkit virtual key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Key {
    #[default]
    None,
    Cancel,
    Back,
    Tab,
    Clear,
    Enter,
    Pause,
    CapsLock,
    Escape,
    Space,
    PageUp,
    PageDown,
    End,
    Home,
    Left,
    Up,
    Right,
    Down,
    PrintScreen,
    Insert,
    Delete,
    Help,
    D0,
    D1,
    D2,
    D3,
    D4,
    D5,
    D6,
    D7,
    D8,
    D9,
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
    LWin,
    Apps,
    NumPad0,
    NumPad1,
    NumPad2,
    NumPad3,
    NumPad4,
    NumPad5,
    NumPad6,
    NumPad7,
    NumPad8,
    NumPad9,
    Multiply,
    Add,
    Subtract,
    Decimal,
    Divide,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    F13,
    F14,
    F15,
    F16,
    F17,
    F18,
    F19,
    F20,
    F21,
    F22,
    F23,
    F24,
    NumLock,
    Scroll,
    LeftShift,
    LeftCtrl,
    LeftAlt,
    BrowserBack,
    BrowserForward,
    BrowserRefresh,
    VolumeMute,
    VolumeDown,
    VolumeUp,
    MediaNextTrack,
    MediaPreviousTrack,
    MediaStop,
    MediaPlayPause,
    OemSemicolon,
    OemPlus,
    OemComma,
    OemMinus,
    OemPeriod,
    OemQuestion,
    OemTilde,
    OemOpenBrackets,
    OemPipe,
    OemCloseBrackets,
    OemQuotes,
}

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

const DIGITS: [Key; 10] = [
    Key::D0,
    Key::D1,
    Key::D2,
    Key::D3,
    Key::D4,
    Key::D5,
    Key::D6,
    Key::D7,
    Key::D8,
    Key::D9,
];

const NUMPAD: [Key; 10] = [
    Key::NumPad0,
    Key::NumPad1,
    Key::NumPad2,
    Key::NumPad3,
    Key::NumPad4,
    Key::NumPad5,
    Key::NumPad6,
    Key::NumPad7,
    Key::NumPad8,
    Key::NumPad9,
];

const FUNCTION: [Key; 24] = [
    Key::F1,
    Key::F2,
    Key::F3,
    Key::F4,
    Key::F5,
    Key::F6,
    Key::F7,
    Key::F8,
    Key::F9,
    Key::F10,
    Key::F11,
    Key::F12,
    Key::F13,
    Key::F14,
    Key::F15,
    Key::F16,
    Key::F17,
    Key::F18,
    Key::F19,
    Key::F20,
    Key::F21,
    Key::F22,
    Key::F23,
    Key::F24,
];

/// Translate a host key code to a virtual key, [`Key::None`] when unmapped
pub fn to_key(code: u32) -> Key {
    match code {
        kc::A..=kc::Z => LETTERS[(code - kc::A) as usize],
        // Hosts may report letters in lower case
        0x61..=0x7A => LETTERS[(code - 0x61) as usize],
        kc::KEY_0..=kc::KEY_9 => DIGITS[(code - kc::KEY_0) as usize],
        kc::KP_0..=kc::KP_9 => NUMPAD[(code - kc::KP_0) as usize],
        kc::F1..=kc::F24 => FUNCTION[(code - kc::F1) as usize],
        kc::ESCAPE => Key::Escape,
        kc::TAB | kc::BACKTAB => Key::Tab,
        kc::BACKSPACE => Key::Back,
        kc::ENTER | kc::KP_ENTER => Key::Enter,
        kc::INSERT => Key::Insert,
        kc::DELETE => Key::Delete,
        kc::PAUSE => Key::Pause,
        kc::PRINT | kc::SYSREQ => Key::PrintScreen,
        kc::CLEAR => Key::Clear,
        kc::HOME => Key::Home,
        kc::END => Key::End,
        kc::LEFT => Key::Left,
        kc::UP => Key::Up,
        kc::RIGHT => Key::Right,
        kc::DOWN => Key::Down,
        kc::PAGE_UP => Key::PageUp,
        kc::PAGE_DOWN => Key::PageDown,
        kc::SHIFT => Key::LeftShift,
        kc::CTRL => Key::LeftCtrl,
        kc::META => Key::LWin,
        kc::ALT => Key::LeftAlt,
        kc::CAPS_LOCK => Key::CapsLock,
        kc::NUM_LOCK => Key::NumLock,
        kc::SCROLL_LOCK => Key::Scroll,
        kc::MENU => Key::Apps,
        kc::HELP => Key::Help,
        kc::BACK => Key::BrowserBack,
        kc::FORWARD => Key::BrowserForward,
        kc::REFRESH => Key::BrowserRefresh,
        kc::VOLUME_DOWN => Key::VolumeDown,
        kc::VOLUME_MUTE => Key::VolumeMute,
        kc::VOLUME_UP => Key::VolumeUp,
        kc::MEDIA_PLAY => Key::MediaPlayPause,
        kc::MEDIA_STOP => Key::MediaStop,
        kc::MEDIA_PREVIOUS => Key::MediaPreviousTrack,
        kc::MEDIA_NEXT => Key::MediaNextTrack,
        kc::KP_MULTIPLY => Key::Multiply,
        kc::KP_DIVIDE => Key::Divide,
        kc::KP_SUBTRACT => Key::Subtract,
        kc::KP_PERIOD => Key::Decimal,
        kc::KP_ADD => Key::Add,
        kc::SPACE => Key::Space,
        kc::APOSTROPHE => Key::OemQuotes,
        kc::COMMA => Key::OemComma,
        kc::MINUS => Key::OemMinus,
        kc::PERIOD => Key::OemPeriod,
        kc::SLASH => Key::OemQuestion,
        kc::SEMICOLON => Key::OemSemicolon,
        kc::EQUAL => Key::OemPlus,
        kc::BRACKET_LEFT => Key::OemOpenBrackets,
        kc::BACKSLASH => Key::OemPipe,
        kc::BRACKET_RIGHT => Key::OemCloseBrackets,
        kc::QUOTE_LEFT => Key::OemTilde,
        _ => Key::None,
    }
}

/// Whether the host code is a modifier key on its own
pub fn is_modifier(code: u32) -> bool {
    matches!(code, kc::SHIFT | kc::CTRL | kc::META | kc::ALT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keycode_translation() {
        assert_eq!(to_key(kc::A), Key::A);
        assert_eq!(to_key('q' as u32), Key::Q);
        assert_eq!(to_key(kc::KEY_0 + 7), Key::D7);
        assert_eq!(to_key(kc::F1 + 11), Key::F12);
        assert_eq!(to_key(kc::KP_0 + 3), Key::NumPad3);
        assert_eq!(to_key(kc::ENTER), Key::Enter);
        assert_eq!(to_key(kc::KP_ENTER), Key::Enter);
        assert_eq!(to_key(kc::SPACE), Key::Space);
        assert_eq!(to_key(kc::ESCAPE), Key::Escape);
    }

    #[test]
    fn test_unmapped_keys() {
        assert_eq!(to_key(kc::NONE), Key::None);
        assert_eq!(to_key(0xE9), Key::None); // é
        assert_eq!(to_key(kc::SPECIAL | 0x7F), Key::None);
    }

    #[test]
    fn test_is_modifier() {
        assert!(is_modifier(kc::SHIFT));
        assert!(!is_modifier(kc::A));
    }
}

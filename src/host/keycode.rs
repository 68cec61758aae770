//! Host key codes
//!
//! Printable keys use their Unicode code point (upper case for letters).
//! Non-printable keys carry the [`SPECIAL`] bit.

pub const NONE: u32 = 0;

/// Marks codes that don't represent printable text
pub const SPECIAL: u32 = 1 << 22;

pub const ESCAPE: u32 = SPECIAL | 0x01;
pub const TAB: u32 = SPECIAL | 0x02;
pub const BACKTAB: u32 = SPECIAL | 0x03;
pub const BACKSPACE: u32 = SPECIAL | 0x04;
pub const ENTER: u32 = SPECIAL | 0x05;
pub const KP_ENTER: u32 = SPECIAL | 0x06;
pub const INSERT: u32 = SPECIAL | 0x07;
pub const DELETE: u32 = SPECIAL | 0x08;
pub const PAUSE: u32 = SPECIAL | 0x09;
pub const PRINT: u32 = SPECIAL | 0x0A;
pub const SYSREQ: u32 = SPECIAL | 0x0B;
pub const CLEAR: u32 = SPECIAL | 0x0C;
pub const HOME: u32 = SPECIAL | 0x0D;
pub const END: u32 = SPECIAL | 0x0E;
pub const LEFT: u32 = SPECIAL | 0x0F;
pub const UP: u32 = SPECIAL | 0x10;
pub const RIGHT: u32 = SPECIAL | 0x11;
pub const DOWN: u32 = SPECIAL | 0x12;
pub const PAGE_UP: u32 = SPECIAL | 0x13;
pub const PAGE_DOWN: u32 = SPECIAL | 0x14;
pub const SHIFT: u32 = SPECIAL | 0x15;
pub const CTRL: u32 = SPECIAL | 0x16;
pub const META: u32 = SPECIAL | 0x17;
pub const ALT: u32 = SPECIAL | 0x18;
pub const CAPS_LOCK: u32 = SPECIAL | 0x19;
pub const NUM_LOCK: u32 = SPECIAL | 0x1A;
pub const SCROLL_LOCK: u32 = SPECIAL | 0x1B;
/// F1 through F24 are contiguous
pub const F1: u32 = SPECIAL | 0x1C;
pub const F24: u32 = F1 + 23;
pub const MENU: u32 = SPECIAL | 0x42;
pub const HELP: u32 = SPECIAL | 0x45;
pub const BACK: u32 = SPECIAL | 0x48;
pub const FORWARD: u32 = SPECIAL | 0x49;
pub const REFRESH: u32 = SPECIAL | 0x4B;
pub const VOLUME_DOWN: u32 = SPECIAL | 0x4C;
pub const VOLUME_MUTE: u32 = SPECIAL | 0x4D;
pub const VOLUME_UP: u32 = SPECIAL | 0x4E;
pub const MEDIA_PLAY: u32 = SPECIAL | 0x54;
pub const MEDIA_STOP: u32 = SPECIAL | 0x55;
pub const MEDIA_PREVIOUS: u32 = SPECIAL | 0x56;
pub const MEDIA_NEXT: u32 = SPECIAL | 0x57;
pub const KP_MULTIPLY: u32 = SPECIAL | 0x81;
pub const KP_DIVIDE: u32 = SPECIAL | 0x82;
pub const KP_SUBTRACT: u32 = SPECIAL | 0x83;
pub const KP_PERIOD: u32 = SPECIAL | 0x84;
pub const KP_ADD: u32 = SPECIAL | 0x85;
/// Keypad digits 0 through 9 are contiguous
pub const KP_0: u32 = SPECIAL | 0x86;
pub const KP_9: u32 = KP_0 + 9;

pub const SPACE: u32 = 0x20;
pub const APOSTROPHE: u32 = 0x27;
pub const COMMA: u32 = 0x2C;
pub const MINUS: u32 = 0x2D;
pub const PERIOD: u32 = 0x2E;
pub const SLASH: u32 = 0x2F;
/// Digits `0` through `9` are contiguous
pub const KEY_0: u32 = 0x30;
pub const KEY_9: u32 = 0x39;
pub const SEMICOLON: u32 = 0x3B;
pub const EQUAL: u32 = 0x3D;
/// Letters `A` through `Z` are contiguous
pub const A: u32 = 0x41;
pub const Z: u32 = 0x5A;
pub const BRACKET_LEFT: u32 = 0x5B;
pub const BACKSLASH: u32 = 0x5C;
pub const BRACKET_RIGHT: u32 = 0x5D;
pub const QUOTE_LEFT: u32 = 0x60;

/// Whether `code` stands for printable text
pub fn is_unicode(code: u32) -> bool {
    code != NONE && code & SPECIAL == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_unicode() {
        assert!(is_unicode(A));
        assert!(is_unicode(SPACE));
        assert!(is_unicode(0xE9)); // é
        assert!(!is_unicode(NONE));
        assert!(!is_unicode(ENTER));
        assert!(!is_unicode(SHIFT));
    }

    #[test]
    fn test_ranges() {
        assert_eq!(F24 - F1, 23);
        assert_eq!(KP_9, SPECIAL | 0x8F);
    }
}

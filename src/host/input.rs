//! Host-native input events
//!
//! One variant per concrete event kind the host emits. New kinds are
//! added here and handled in the translator's single match.

use bitflags::bitflags;

/// Device id hosts use for mouse events synthesized from touch
pub const EMULATED_DEVICE_ID: i32 = -1;

bitflags! {
    /// Modifier keys and held mouse buttons, as reported by the host
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct HostModifiers: u32 {
        const SHIFT = 1 << 0;
        const CTRL = 1 << 1;
        const ALT = 1 << 2;
        const META = 1 << 3;
        const MOUSE_LEFT = 1 << 8;
        const MOUSE_RIGHT = 1 << 9;
        const MOUSE_MIDDLE = 1 << 10;
        const MOUSE_X1 = 1 << 11;
        const MOUSE_X2 = 1 << 12;
    }
}

/// Host mouse buttons, including wheel "buttons"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostMouseButton {
    Left,
    Right,
    Middle,
    WheelUp,
    WheelDown,
    WheelLeft,
    WheelRight,
    X1,
    X2,
}

/// A position or delta in host pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HostVector2 {
    pub x: f32,
    pub y: f32,
}

impl HostVector2 {
    /// Create a new vector
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Input event emitted by the host for one window
#[derive(Debug, Clone, PartialEq)]
pub enum HostInputEvent {
    MouseMotion {
        device: i32,
        position: HostVector2,
        pressure: f32,
        /// Pen tilt, -1.0 to 1.0 per axis
        tilt: HostVector2,
        modifiers: HostModifiers,
    },
    MouseButton {
        device: i32,
        position: HostVector2,
        button: HostMouseButton,
        pressed: bool,
        /// Wheel magnitude; 1.0 for a regular notch
        factor: f32,
        modifiers: HostModifiers,
    },
    ScreenTouch {
        index: i32,
        position: HostVector2,
        pressed: bool,
    },
    ScreenDrag {
        index: i32,
        position: HostVector2,
        pressure: f32,
        tilt: HostVector2,
        modifiers: HostModifiers,
    },
    Key {
        /// Layout-aware key code, see [`super::keycode`]
        keycode: u32,
        /// Layout-independent key code
        physical_keycode: u32,
        /// Human-readable label of the key under the current layout
        key_label: Option<String>,
        /// Unicode scalar the key produces, 0 when none
        unicode: u32,
        pressed: bool,
        echo: bool,
        modifiers: HostModifiers,
    },
    JoypadButton {
        device: i32,
        button: i32,
        pressed: bool,
    },
    JoypadMotion {
        device: i32,
        axis: i32,
        value: f32,
    },
    JoypadHat {
        device: i32,
        hat: u8,
    },
    MagnifyGesture {
        position: HostVector2,
        factor: f32,
    },
    PanGesture {
        position: HostVector2,
        delta: HostVector2,
    },
    MidiMessage {
        channel: u8,
        message: u8,
    },
}

impl HostInputEvent {
    /// Modifiers carried by the event, if the host reports any
    pub fn modifiers(&self) -> Option<HostModifiers> {
        match self {
            HostInputEvent::MouseMotion { modifiers, .. }
            | HostInputEvent::MouseButton { modifiers, .. }
            | HostInputEvent::ScreenDrag { modifiers, .. }
            | HostInputEvent::Key { modifiers, .. } => Some(*modifiers),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifiers_accessor() {
        let event = HostInputEvent::Key {
            keycode: super::super::keycode::A,
            physical_keycode: super::super::keycode::A,
            key_label: None,
            unicode: 'a' as u32,
            pressed: true,
            echo: false,
            modifiers: HostModifiers::SHIFT,
        };
        assert_eq!(event.modifiers(), Some(HostModifiers::SHIFT));

        let touch = HostInputEvent::ScreenTouch {
            index: 0,
            position: HostVector2::default(),
            pressed: true,
        };
        assert_eq!(touch.modifiers(), None);
    }
}

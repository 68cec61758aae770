//! Normalized raw input events
//!
//! These are what the toolkit's input pipeline consumes, independent of
//! the host that produced them.

use bitflags::bitflags;

use super::{Device, Key};
use crate::geometry::{Point, Vector};
use crate::host::HostModifiers;

bitflags! {
    /// Modifier keys and held buttons in toolkit terms
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct RawInputModifiers: u32 {
        const ALT = 1 << 0;
        const CONTROL = 1 << 1;
        const SHIFT = 1 << 2;
        const META = 1 << 3;
        const LEFT_MOUSE_BUTTON = 1 << 4;
        const RIGHT_MOUSE_BUTTON = 1 << 5;
        const MIDDLE_MOUSE_BUTTON = 1 << 6;
        const X_BUTTON1_MOUSE_BUTTON = 1 << 7;
        const X_BUTTON2_MOUSE_BUTTON = 1 << 8;
        const KEYBOARD_MASK = Self::ALT.bits() | Self::CONTROL.bits() | Self::SHIFT.bits() | Self::META.bits();
    }
}

impl From<HostModifiers> for RawInputModifiers {
    fn from(host: HostModifiers) -> Self {
        const TABLE: [(HostModifiers, RawInputModifiers); 9] = [
            (HostModifiers::ALT, RawInputModifiers::ALT),
            (HostModifiers::CTRL, RawInputModifiers::CONTROL),
            (HostModifiers::SHIFT, RawInputModifiers::SHIFT),
            (HostModifiers::META, RawInputModifiers::META),
            (HostModifiers::MOUSE_LEFT, RawInputModifiers::LEFT_MOUSE_BUTTON),
            (HostModifiers::MOUSE_RIGHT, RawInputModifiers::RIGHT_MOUSE_BUTTON),
            (HostModifiers::MOUSE_MIDDLE, RawInputModifiers::MIDDLE_MOUSE_BUTTON),
            (HostModifiers::MOUSE_X1, RawInputModifiers::X_BUTTON1_MOUSE_BUTTON),
            (HostModifiers::MOUSE_X2, RawInputModifiers::X_BUTTON2_MOUSE_BUTTON),
        ];

        TABLE
            .iter()
            .filter(|(h, _)| host.contains(*h))
            .fold(RawInputModifiers::empty(), |acc, (_, raw)| acc | *raw)
    }
}

/// Identifies the toolkit element tree receiving input for a window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InputRootId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RawPointerEventType {
    Move,
    LeftButtonDown,
    LeftButtonUp,
    RightButtonDown,
    RightButtonUp,
    MiddleButtonDown,
    MiddleButtonUp,
    XButton1Down,
    XButton1Up,
    XButton2Down,
    XButton2Up,
    TouchBegin,
    TouchUpdate,
    TouchEnd,
}

/// Pointer sample in logical coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawPointerPoint {
    pub position: Point,
    /// Normalized pressure, 0.0 to 1.0
    pub pressure: f32,
    pub twist: f32,
    /// Tilt in degrees
    pub x_tilt: f32,
    pub y_tilt: f32,
}

impl RawPointerPoint {
    /// A point with default pen properties
    pub fn at(position: Point) -> Self {
        Self {
            position,
            pressure: 0.5,
            twist: 0.0,
            x_tilt: 0.0,
            y_tilt: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RawKeyEventType {
    KeyDown,
    KeyUp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RawJoypadButtonEventType {
    ButtonDown,
    ButtonUp,
}

/// Kind-specific payload of a raw input event
#[derive(Debug, Clone, PartialEq)]
pub enum RawInput {
    Pointer {
        event_type: RawPointerEventType,
        point: RawPointerPoint,
        modifiers: RawInputModifiers,
    },
    Wheel {
        position: Point,
        delta: Vector,
        modifiers: RawInputModifiers,
    },
    Touch {
        event_type: RawPointerEventType,
        point: RawPointerPoint,
        modifiers: RawInputModifiers,
        touch_id: i64,
    },
    Key {
        event_type: RawKeyEventType,
        key: Key,
        modifiers: RawInputModifiers,
        /// Layout-independent host key code, passed through as is
        physical_key: u32,
        /// Host label for the key, passed through as is
        key_symbol: Option<String>,
    },
    TextInput {
        text: String,
    },
    JoypadButton {
        event_type: RawJoypadButtonEventType,
        button: i32,
    },
    JoypadAxis {
        axis: i32,
        value: f32,
    },
}

/// A normalized input event addressed to one input root.
///
/// Everything but the handled flag is fixed at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct RawInputEvent {
    device: Device,
    timestamp: u64,
    root: InputRootId,
    input: RawInput,
    handled: bool,
}

impl RawInputEvent {
    /// Create a new unhandled event
    pub fn new(device: Device, timestamp: u64, root: InputRootId, input: RawInput) -> Self {
        Self {
            device,
            timestamp,
            root,
            input,
            handled: false,
        }
    }

    pub fn device(&self) -> Device {
        self.device
    }

    /// Host timestamp in milliseconds
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    pub fn root(&self) -> InputRootId {
        self.root
    }

    pub fn input(&self) -> &RawInput {
        &self.input
    }

    /// Position in logical coordinates, for pointer-family events
    pub fn position(&self) -> Option<Point> {
        match &self.input {
            RawInput::Pointer { point, .. } | RawInput::Touch { point, .. } => Some(point.position),
            RawInput::Wheel { position, .. } => Some(*position),
            _ => None,
        }
    }

    /// Modifiers active when the event occurred
    pub fn modifiers(&self) -> RawInputModifiers {
        match &self.input {
            RawInput::Pointer { modifiers, .. }
            | RawInput::Wheel { modifiers, .. }
            | RawInput::Touch { modifiers, .. }
            | RawInput::Key { modifiers, .. } => *modifiers,
            _ => RawInputModifiers::empty(),
        }
    }

    /// Whether the toolkit consumed the event
    pub fn is_handled(&self) -> bool {
        self.handled
    }

    /// Mark the event as consumed
    pub fn mark_handled(&mut self) {
        self.handled = true;
    }
}

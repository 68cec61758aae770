//! Host input translation
//!
//! Turns host-native input events into raw input events for the toolkit.
//! Host positions are in pixels; the toolkit expects logical units, so
//! every position is divided by the window's render scaling.

use std::cell::Cell;
use std::rc::Rc;

use super::event::{
    InputRootId, RawInput, RawInputEvent, RawInputModifiers, RawJoypadButtonEventType,
    RawKeyEventType, RawPointerEventType, RawPointerPoint,
};
use super::{keymap, DeviceRegistry, Key};
use crate::geometry::{Point, Vector};
use crate::host::{keycode, HostInputEvent, HostMouseButton, HostVector2, EMULATED_DEVICE_ID};

/// Per-window state needed to translate one event
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TranslateContext {
    /// Input root receiving the event
    pub root: InputRootId,
    /// Current render scaling of the window
    pub scaling: f64,
    /// Host timestamp in milliseconds
    pub timestamp: u64,
}

/// Translates host input events to raw input events
#[derive(Debug)]
pub struct InputTranslator {
    devices: Rc<DeviceRegistry>,
    /// Keyboard modifiers from the latest event that reported any
    last_modifiers: Cell<RawInputModifiers>,
    last_mouse_device: Cell<i32>,
}

impl InputTranslator {
    /// Create a new input translator
    pub fn new(devices: Rc<DeviceRegistry>) -> Self {
        Self {
            devices,
            last_modifiers: Cell::new(RawInputModifiers::empty()),
            last_mouse_device: Cell::new(EMULATED_DEVICE_ID),
        }
    }

    /// Host id of the mouse that produced the latest pointer event
    pub fn last_mouse_device(&self) -> i32 {
        self.last_mouse_device.get()
    }

    /// Keyboard modifiers last reported by the host
    pub fn last_modifiers(&self) -> RawInputModifiers {
        self.last_modifiers.get()
    }

    /// Translate one host event, or `None` for kinds that have no raw
    /// equivalent.
    pub fn translate(&self, event: &HostInputEvent, ctx: &TranslateContext) -> Option<RawInputEvent> {
        if let Some(modifiers) = event.modifiers() {
            self.last_modifiers
                .set(RawInputModifiers::from(modifiers) & RawInputModifiers::KEYBOARD_MASK);
        }

        let (device, input) = match event {
            HostInputEvent::MouseMotion {
                device,
                position,
                pressure,
                tilt,
                modifiers,
            } => {
                self.last_mouse_device.set(*device);
                (
                    self.devices.mouse(*device),
                    RawInput::Pointer {
                        event_type: RawPointerEventType::Move,
                        point: pointer_point(*position, *pressure, *tilt, ctx.scaling),
                        modifiers: (*modifiers).into(),
                    },
                )
            }
            HostInputEvent::MouseButton {
                device,
                position,
                button,
                pressed,
                factor,
                modifiers,
            } => {
                self.last_mouse_device.set(*device);
                let position = logical(*position, ctx.scaling);
                let modifiers = (*modifiers).into();
                let input = match mouse_button_event(*button, *pressed) {
                    ButtonAction::Pointer(event_type) => RawInput::Pointer {
                        event_type,
                        point: RawPointerPoint::at(position),
                        modifiers,
                    },
                    ButtonAction::Wheel(delta) => RawInput::Wheel {
                        position,
                        delta: Vector::new(delta.x * *factor as f64, delta.y * *factor as f64),
                        modifiers,
                    },
                };
                (self.devices.mouse(*device), input)
            }
            HostInputEvent::ScreenTouch {
                index,
                position,
                pressed,
            } => (
                self.devices.touch(),
                RawInput::Touch {
                    event_type: if *pressed {
                        RawPointerEventType::TouchBegin
                    } else {
                        RawPointerEventType::TouchEnd
                    },
                    point: RawPointerPoint::at(logical(*position, ctx.scaling)),
                    modifiers: self.last_modifiers.get(),
                    touch_id: *index as i64,
                },
            ),
            HostInputEvent::ScreenDrag {
                index,
                position,
                pressure,
                tilt,
                modifiers,
            } => (
                self.devices.touch(),
                RawInput::Touch {
                    event_type: RawPointerEventType::TouchUpdate,
                    point: pointer_point(*position, *pressure, *tilt, ctx.scaling),
                    modifiers: (*modifiers).into(),
                    touch_id: *index as i64,
                },
            ),
            HostInputEvent::Key {
                keycode,
                physical_keycode,
                key_label,
                pressed,
                modifiers,
                ..
            } => {
                let key = keymap::to_key(*keycode);
                if key == Key::None {
                    return None;
                }
                (
                    self.devices.keyboard(),
                    RawInput::Key {
                        event_type: if *pressed {
                            RawKeyEventType::KeyDown
                        } else {
                            RawKeyEventType::KeyUp
                        },
                        key,
                        modifiers: (*modifiers).into(),
                        physical_key: *physical_keycode,
                        key_symbol: key_label.clone(),
                    },
                )
            }
            HostInputEvent::JoypadButton {
                device,
                button,
                pressed,
            } => (
                self.devices.joypad(*device),
                RawInput::JoypadButton {
                    event_type: if *pressed {
                        RawJoypadButtonEventType::ButtonDown
                    } else {
                        RawJoypadButtonEventType::ButtonUp
                    },
                    button: *button,
                },
            ),
            HostInputEvent::JoypadMotion {
                device,
                axis,
                value,
            } => (
                self.devices.joypad(*device),
                RawInput::JoypadAxis {
                    axis: *axis,
                    value: *value,
                },
            ),
            HostInputEvent::JoypadHat { .. }
            | HostInputEvent::MagnifyGesture { .. }
            | HostInputEvent::PanGesture { .. }
            | HostInputEvent::MidiMessage { .. } => return None,
        };

        Some(RawInputEvent::new(device, ctx.timestamp, ctx.root, input))
    }

    /// Text input synthesized from a key press that produces printable text
    pub fn text_input(&self, event: &HostInputEvent, ctx: &TranslateContext) -> Option<RawInputEvent> {
        let HostInputEvent::Key {
            keycode: code,
            unicode,
            pressed: true,
            ..
        } = event
        else {
            return None;
        };

        if !keycode::is_unicode(*code) || keymap::is_modifier(*code) {
            return None;
        }

        let text = char::from_u32(*unicode).filter(|c| !c.is_control())?;

        Some(RawInputEvent::new(
            self.devices.keyboard(),
            ctx.timestamp,
            ctx.root,
            RawInput::TextInput {
                text: text.to_string(),
            },
        ))
    }

    /// Translate and synchronously deliver one host event.
    ///
    /// A key press is delivered as a key event first; when that is missing
    /// or left unhandled, the text it produces follows as text input.
    /// Returns whether the toolkit handled anything.
    pub fn dispatch(
        &self,
        event: &HostInputEvent,
        ctx: &TranslateContext,
        deliver: &mut dyn FnMut(&mut RawInputEvent),
    ) -> bool {
        if let Some(mut raw) = self.translate(event, ctx) {
            deliver(&mut raw);
            if raw.is_handled() {
                return true;
            }
        }

        if let Some(mut text) = self.text_input(event, ctx) {
            deliver(&mut text);
            if text.is_handled() {
                return true;
            }
        }

        false
    }
}

enum ButtonAction {
    Pointer(RawPointerEventType),
    /// Unit wheel direction, scaled by the host factor
    Wheel(Vector),
}

fn mouse_button_event(button: HostMouseButton, pressed: bool) -> ButtonAction {
    use RawPointerEventType::*;

    match (button, pressed) {
        (HostMouseButton::Left, true) => ButtonAction::Pointer(LeftButtonDown),
        (HostMouseButton::Left, false) => ButtonAction::Pointer(LeftButtonUp),
        (HostMouseButton::Right, true) => ButtonAction::Pointer(RightButtonDown),
        (HostMouseButton::Right, false) => ButtonAction::Pointer(RightButtonUp),
        (HostMouseButton::Middle, true) => ButtonAction::Pointer(MiddleButtonDown),
        (HostMouseButton::Middle, false) => ButtonAction::Pointer(MiddleButtonUp),
        (HostMouseButton::X1, true) => ButtonAction::Pointer(XButton1Down),
        (HostMouseButton::X1, false) => ButtonAction::Pointer(XButton1Up),
        (HostMouseButton::X2, true) => ButtonAction::Pointer(XButton2Down),
        (HostMouseButton::X2, false) => ButtonAction::Pointer(XButton2Up),
        (HostMouseButton::WheelUp, _) => ButtonAction::Wheel(Vector::new(0.0, 1.0)),
        (HostMouseButton::WheelDown, _) => ButtonAction::Wheel(Vector::new(0.0, -1.0)),
        (HostMouseButton::WheelLeft, _) => ButtonAction::Wheel(Vector::new(1.0, 0.0)),
        (HostMouseButton::WheelRight, _) => ButtonAction::Wheel(Vector::new(-1.0, 0.0)),
    }
}

fn logical(position: HostVector2, scaling: f64) -> Point {
    Point::new(position.x as f64, position.y as f64) / scaling
}

fn pointer_point(position: HostVector2, pressure: f32, tilt: HostVector2, scaling: f64) -> RawPointerPoint {
    RawPointerPoint {
        position: logical(position, scaling),
        pressure,
        twist: 0.0,
        x_tilt: tilt.x * 90.0,
        y_tilt: tilt.y * 90.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::HostModifiers;
    use crate::input::DeviceKind;

    fn translator() -> InputTranslator {
        InputTranslator::new(Rc::new(DeviceRegistry::new()))
    }

    fn ctx(scaling: f64) -> TranslateContext {
        TranslateContext {
            root: InputRootId(1),
            scaling,
            timestamp: 1000,
        }
    }

    fn button(button: HostMouseButton, pressed: bool, factor: f32) -> HostInputEvent {
        HostInputEvent::MouseButton {
            device: 0,
            position: HostVector2::new(100.0, 50.0),
            button,
            pressed,
            factor,
            modifiers: HostModifiers::empty(),
        }
    }

    fn key(keycode: u32, unicode: u32, pressed: bool) -> HostInputEvent {
        HostInputEvent::Key {
            keycode,
            physical_keycode: keycode,
            key_label: Some("A".to_string()),
            unicode,
            pressed,
            echo: false,
            modifiers: HostModifiers::SHIFT,
        }
    }

    #[test]
    fn test_motion_divides_by_scaling() {
        let translator = translator();
        let event = HostInputEvent::MouseMotion {
            device: 2,
            position: HostVector2::new(300.0, 150.0),
            pressure: 1.0,
            tilt: HostVector2::new(0.5, -0.5),
            modifiers: HostModifiers::MOUSE_LEFT,
        };

        let raw = translator.translate(&event, &ctx(2.0)).unwrap();
        assert_eq!(raw.position(), Some(Point::new(150.0, 75.0)));
        assert_eq!(raw.device().kind, DeviceKind::Mouse);
        assert_eq!(raw.timestamp(), 1000);
        assert!(raw.modifiers().contains(RawInputModifiers::LEFT_MOUSE_BUTTON));
        match raw.input() {
            RawInput::Pointer { point, .. } => {
                assert_eq!(point.x_tilt, 45.0);
                assert_eq!(point.y_tilt, -45.0);
            }
            other => panic!("Wrong event type: {:?}", other),
        }
        assert_eq!(translator.last_mouse_device(), 2);
    }

    #[test]
    fn test_button_table() {
        let translator = translator();
        let cases = [
            (HostMouseButton::Left, true, RawPointerEventType::LeftButtonDown),
            (HostMouseButton::Left, false, RawPointerEventType::LeftButtonUp),
            (HostMouseButton::Right, true, RawPointerEventType::RightButtonDown),
            (HostMouseButton::Middle, false, RawPointerEventType::MiddleButtonUp),
            (HostMouseButton::X1, true, RawPointerEventType::XButton1Down),
            (HostMouseButton::X2, false, RawPointerEventType::XButton2Up),
        ];

        for (host, pressed, expected) in cases {
            let raw = translator.translate(&button(host, pressed, 1.0), &ctx(1.0)).unwrap();
            match raw.input() {
                RawInput::Pointer { event_type, .. } => assert_eq!(*event_type, expected),
                other => panic!("Wrong event type: {:?}", other),
            }
        }
    }

    #[test]
    fn test_wheel_up() {
        let translator = translator();
        let raw = translator
            .translate(&button(HostMouseButton::WheelUp, true, 1.0), &ctx(1.0))
            .unwrap();

        match raw.input() {
            RawInput::Wheel { delta, .. } => assert_eq!(*delta, Vector::new(0.0, 1.0)),
            other => panic!("Wrong event type: {:?}", other),
        }
    }

    #[test]
    fn test_wheel_directions() {
        let translator = translator();
        let cases = [
            (HostMouseButton::WheelDown, Vector::new(0.0, -2.0)),
            (HostMouseButton::WheelLeft, Vector::new(2.0, 0.0)),
            (HostMouseButton::WheelRight, Vector::new(-2.0, 0.0)),
        ];

        for (host, expected) in cases {
            let raw = translator.translate(&button(host, false, 2.0), &ctx(2.0)).unwrap();
            assert_eq!(raw.position(), Some(Point::new(50.0, 25.0)));
            match raw.input() {
                RawInput::Wheel { delta, .. } => assert_eq!(*delta, expected),
                other => panic!("Wrong event type: {:?}", other),
            }
        }
    }

    #[test]
    fn test_key_event() {
        let translator = translator();
        let raw = translator
            .translate(&key(keycode::A, 'A' as u32, true), &ctx(1.0))
            .unwrap();

        match raw.input() {
            RawInput::Key {
                event_type,
                key,
                physical_key,
                key_symbol,
                modifiers,
            } => {
                assert_eq!(*event_type, RawKeyEventType::KeyDown);
                assert_eq!(*key, Key::A);
                assert_eq!(*physical_key, keycode::A);
                assert_eq!(key_symbol.as_deref(), Some("A"));
                assert_eq!(*modifiers, RawInputModifiers::SHIFT);
            }
            other => panic!("Wrong event type: {:?}", other),
        }
    }

    #[test]
    fn test_unmapped_key_falls_back_to_text() {
        let translator = translator();
        let event = key(0xE9, 0xE9, true);

        assert!(translator.translate(&event, &ctx(1.0)).is_none());

        let text = translator.text_input(&event, &ctx(1.0)).unwrap();
        assert_eq!(
            text.input(),
            &RawInput::TextInput {
                text: "é".to_string()
            }
        );
    }

    #[test]
    fn test_no_text_on_release_or_special() {
        let translator = translator();
        assert!(translator
            .text_input(&key(keycode::A, 'a' as u32, false), &ctx(1.0))
            .is_none());
        assert!(translator
            .text_input(&key(keycode::ENTER, '\r' as u32, true), &ctx(1.0))
            .is_none());
    }

    #[test]
    fn test_dispatch_text_after_unhandled_key() {
        let translator = translator();
        let mut seen = Vec::new();

        let handled = translator.dispatch(
            &key(keycode::A, 'a' as u32, true),
            &ctx(1.0),
            &mut |event| seen.push(event.input().clone()),
        );

        assert!(!handled);
        assert_eq!(seen.len(), 2);
        assert!(matches!(seen[0], RawInput::Key { .. }));
        assert!(matches!(seen[1], RawInput::TextInput { .. }));
    }

    #[test]
    fn test_dispatch_stops_when_key_handled() {
        let translator = translator();
        let mut count = 0;

        let handled = translator.dispatch(
            &key(keycode::A, 'a' as u32, true),
            &ctx(1.0),
            &mut |event| {
                count += 1;
                event.mark_handled();
            },
        );

        assert!(handled);
        assert_eq!(count, 1);
    }

    #[test]
    fn test_touch_shares_device() {
        let translator = translator();
        let first = HostInputEvent::ScreenTouch {
            index: 0,
            position: HostVector2::new(10.0, 10.0),
            pressed: true,
        };
        let second = HostInputEvent::ScreenDrag {
            index: 1,
            position: HostVector2::new(20.0, 20.0),
            pressure: 0.3,
            tilt: HostVector2::default(),
            modifiers: HostModifiers::empty(),
        };

        let a = translator.translate(&first, &ctx(1.0)).unwrap();
        let b = translator.translate(&second, &ctx(1.0)).unwrap();
        assert_eq!(a.device(), b.device());

        match (a.input(), b.input()) {
            (
                RawInput::Touch {
                    event_type: RawPointerEventType::TouchBegin,
                    touch_id: 0,
                    ..
                },
                RawInput::Touch {
                    event_type: RawPointerEventType::TouchUpdate,
                    touch_id: 1,
                    ..
                },
            ) => {}
            other => panic!("Wrong event types: {:?}", other),
        }
    }

    #[test]
    fn test_touch_uses_last_modifiers() {
        let translator = translator();
        translator.translate(&key(keycode::A, 'a' as u32, true), &ctx(1.0));

        let raw = translator
            .translate(
                &HostInputEvent::ScreenTouch {
                    index: 0,
                    position: HostVector2::default(),
                    pressed: false,
                },
                &ctx(1.0),
            )
            .unwrap();
        assert_eq!(raw.modifiers(), RawInputModifiers::SHIFT);
    }

    #[test]
    fn test_joypad_events() {
        let translator = translator();
        let pressed = translator
            .translate(
                &HostInputEvent::JoypadButton {
                    device: 1,
                    button: 3,
                    pressed: true,
                },
                &ctx(1.0),
            )
            .unwrap();
        let axis = translator
            .translate(
                &HostInputEvent::JoypadMotion {
                    device: 1,
                    axis: 0,
                    value: -0.25,
                },
                &ctx(1.0),
            )
            .unwrap();

        assert_eq!(pressed.device(), axis.device());
        assert_eq!(pressed.device().kind, DeviceKind::Joypad);
        assert_eq!(
            axis.input(),
            &RawInput::JoypadAxis {
                axis: 0,
                value: -0.25
            }
        );
    }

    #[test]
    fn test_unrecognized_events() {
        let translator = translator();
        let hat = HostInputEvent::JoypadHat { device: 0, hat: 1 };
        assert!(translator.translate(&hat, &ctx(1.0)).is_none());
        assert!(!translator.dispatch(&hat, &ctx(1.0), &mut |_| panic!("delivered")));
    }
}

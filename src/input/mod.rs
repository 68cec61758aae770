//! Input handling module
//!
//! This module provides the device registry, the normalized raw input
//! model, and the translation from host input events.

pub mod device;
pub mod event;
pub mod keymap;
pub mod translate;

pub use device::{Device, DeviceId, DeviceKind, DeviceRegistry};
pub use event::{
    InputRootId, RawInput, RawInputEvent, RawInputModifiers, RawJoypadButtonEventType,
    RawKeyEventType, RawPointerEventType, RawPointerPoint,
};
pub use keymap::Key;
pub use translate::{InputTranslator, TranslateContext};

//! Host runtime contracts
//!
//! The host owns the real OS windows, the frame loop and the clock. The
//! bridge reaches them only through the traits in this module, addressing
//! windows by [`HostWindowId`] rather than holding them.

pub mod input;
pub mod keycode;

pub use input::{HostInputEvent, HostModifiers, HostMouseButton, HostVector2, EMULATED_DEVICE_ID};

use crate::error::Result;
use crate::geometry::{PixelPoint, PixelSize};
use crate::window::PlatformHandle;

/// Identifier of a host-native window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HostWindowId(pub u64);

/// Display mode of a host-native window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HostWindowMode {
    #[default]
    Windowed,
    Minimized,
    Maximized,
    Fullscreen,
    ExclusiveFullscreen,
}

/// Cursor shapes the host can display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CursorShape {
    #[default]
    Arrow,
    IBeam,
    PointingHand,
    Cross,
    Wait,
    Busy,
    Drag,
    CanDrop,
    Forbidden,
    VSize,
    HSize,
    BDiagSize,
    FDiagSize,
    Move,
    Help,
}

/// Signals a host window can emit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostSignal {
    CloseRequested,
    SizeChanged,
    ScaleChanged,
    FocusEntered,
    FocusExited,
    ModeChanged,
    PositionChanged,
    WindowInput,
}

/// Payload delivered with a host signal
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostWindowEvent<'a> {
    CloseRequested,
    SizeChanged(PixelSize),
    ScaleChanged(f64),
    FocusEntered,
    FocusExited,
    ModeChanged(HostWindowMode),
    PositionChanged(PixelPoint),
    Input(&'a HostInputEvent),
}

impl HostWindowEvent<'_> {
    /// The signal this payload belongs to
    pub fn signal(&self) -> HostSignal {
        match self {
            HostWindowEvent::CloseRequested => HostSignal::CloseRequested,
            HostWindowEvent::SizeChanged(_) => HostSignal::SizeChanged,
            HostWindowEvent::ScaleChanged(_) => HostSignal::ScaleChanged,
            HostWindowEvent::FocusEntered => HostSignal::FocusEntered,
            HostWindowEvent::FocusExited => HostSignal::FocusExited,
            HostWindowEvent::ModeChanged(_) => HostSignal::ModeChanged,
            HostWindowEvent::PositionChanged(_) => HostSignal::PositionChanged,
            HostWindowEvent::Input(_) => HostSignal::WindowInput,
        }
    }
}

/// Handler connected to a host signal.
///
/// The return value only matters for [`HostSignal::WindowInput`]: `true`
/// tells the host the event was consumed.
pub type SignalHandler = Box<dyn FnMut(&HostWindowEvent<'_>) -> bool>;

/// Token identifying one signal connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionToken(pub u64);

/// Window services of the host runtime.
///
/// Every method other than [`HostDisplay::create_window`] must tolerate
/// ids of windows that were already destroyed.
pub trait HostDisplay {
    /// Create a new, hidden native window
    fn create_window(&self) -> Result<HostWindowId>;

    /// Destroy a native window
    fn destroy_window(&self, window: HostWindowId);

    /// Native OS handle of the window
    fn native_handle(&self, window: HostWindowId) -> Option<PlatformHandle>;

    /// Connect a handler to one signal of one window
    fn connect(
        &self,
        window: HostWindowId,
        signal: HostSignal,
        handler: SignalHandler,
    ) -> SubscriptionToken;

    /// Disconnect a handler
    fn disconnect(&self, token: SubscriptionToken);

    fn show_window(&self, window: HostWindowId);

    fn hide_window(&self, window: HostWindowId);

    /// Request keyboard focus for the window
    fn grab_focus(&self, window: HostWindowId);

    /// Raise the window above its siblings
    fn move_to_foreground(&self, window: HostWindowId);

    fn window_size(&self, window: HostWindowId) -> PixelSize;

    fn set_window_size(&self, window: HostWindowId, size: PixelSize);

    fn window_position(&self, window: HostWindowId) -> PixelPoint;

    fn set_window_position(&self, window: HostWindowId, position: PixelPoint);

    fn set_window_min_size(&self, window: HostWindowId, size: PixelSize);

    fn set_window_max_size(&self, window: HostWindowId, size: PixelSize);

    fn set_window_title(&self, window: HostWindowId, title: &str);

    fn window_mode(&self, window: HostWindowId) -> HostWindowMode;

    fn set_window_mode(&self, window: HostWindowId, mode: HostWindowMode);

    /// Content scale of the window's screen
    fn window_scale(&self, _window: HostWindowId) -> f64 {
        1.0
    }

    fn set_window_resizable(&self, window: HostWindowId, resizable: bool);

    fn set_window_borderless(&self, window: HostWindowId, borderless: bool);

    fn set_window_always_on_top(&self, window: HostWindowId, on_top: bool);

    fn set_window_transparent(&self, window: HostWindowId, transparent: bool);

    fn set_cursor_shape(&self, window: HostWindowId, shape: CursorShape);
}

/// High resolution monotonic clock of the host
pub trait HostClock {
    /// Microseconds since the host started
    fn ticks_usec(&self) -> u64;

    /// Milliseconds since the host started
    fn ticks_msec(&self) -> u64 {
        self.ticks_usec() / 1000
    }
}

/// Text clipboard primitives of the host
pub trait HostClipboard {
    fn get_text(&self) -> Option<String>;

    fn set_text(&self, text: &str);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_signal() {
        assert_eq!(
            HostWindowEvent::SizeChanged(PixelSize::new(1, 1)).signal(),
            HostSignal::SizeChanged
        );
        assert_eq!(
            HostWindowEvent::FocusExited.signal(),
            HostSignal::FocusExited
        );
    }

    struct FixedClock(u64);

    impl HostClock for FixedClock {
        fn ticks_usec(&self) -> u64 {
            self.0
        }
    }

    #[test]
    fn test_clock_msec_default() {
        assert_eq!(FixedClock(12_345_678).ticks_msec(), 12_345);
    }
}

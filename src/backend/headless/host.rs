//! In-process host
//!
//! Windows are plain records. Setters never emit signals; the helpers at
//! the bottom change a window the way a user or the OS would and emit the
//! matching signal.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use log::{debug, trace};

use crate::error::{BridgeError, Result};
use crate::geometry::{PixelPoint, PixelSize};
use crate::host::{
    CursorShape, HostClipboard, HostClock, HostDisplay, HostInputEvent, HostSignal,
    HostWindowEvent, HostWindowId, HostWindowMode, SignalHandler, SubscriptionToken,
};
use crate::window::PlatformHandle;

/// Base of the fake native handles handed out for windows
const NATIVE_HANDLE_BASE: usize = 0x1000;

/// State of one headless window
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessWindow {
    pub size: PixelSize,
    pub position: PixelPoint,
    pub min_size: Option<PixelSize>,
    pub max_size: Option<PixelSize>,
    pub title: String,
    pub mode: HostWindowMode,
    pub scale: f64,
    pub visible: bool,
    pub focused: bool,
    pub resizable: bool,
    pub borderless: bool,
    pub always_on_top: bool,
    pub transparent: bool,
    pub cursor: CursorShape,
    pub show_count: u32,
    pub foreground_requests: u32,
}

impl HeadlessWindow {
    fn new(size: PixelSize) -> Self {
        Self {
            size,
            position: PixelPoint::ORIGIN,
            min_size: None,
            max_size: None,
            title: String::new(),
            mode: HostWindowMode::Windowed,
            scale: 1.0,
            visible: false,
            focused: false,
            resizable: true,
            borderless: false,
            always_on_top: false,
            transparent: false,
            cursor: CursorShape::Arrow,
            show_count: 0,
            foreground_requests: 0,
        }
    }
}

struct Connection {
    window: HostWindowId,
    signal: HostSignal,
    handler: Rc<RefCell<SignalHandler>>,
}

/// Host that keeps everything in memory
pub struct HeadlessHost {
    windows: RefCell<HashMap<HostWindowId, HeadlessWindow>>,
    connections: RefCell<HashMap<SubscriptionToken, Connection>>,
    next_window: Cell<u64>,
    next_token: Cell<u64>,
    default_window_size: Cell<PixelSize>,
    fail_window_creation: Cell<bool>,
    now: Cell<Duration>,
    clipboard: RefCell<Option<String>>,
}

impl HeadlessHost {
    /// Create a new headless host
    pub fn new() -> Self {
        Self {
            windows: RefCell::new(HashMap::new()),
            connections: RefCell::new(HashMap::new()),
            next_window: Cell::new(1),
            next_token: Cell::new(1),
            default_window_size: Cell::new(PixelSize::new(640, 480)),
            fail_window_creation: Cell::new(false),
            now: Cell::new(Duration::ZERO),
            clipboard: RefCell::new(None),
        }
    }

    /// Size given to new windows
    pub fn set_default_window_size(&self, size: PixelSize) {
        self.default_window_size.set(size);
    }

    /// Make window creation fail
    pub fn fail_window_creation(&self, fail: bool) {
        self.fail_window_creation.set(fail);
    }

    /// Advance the host clock
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    /// Snapshot of a window, `None` once destroyed
    pub fn window(&self, window: HostWindowId) -> Option<HeadlessWindow> {
        self.windows.borrow().get(&window).cloned()
    }

    /// Ids of all live windows, oldest first
    pub fn window_ids(&self) -> Vec<HostWindowId> {
        let mut ids: Vec<_> = self.windows.borrow().keys().copied().collect();
        ids.sort_by_key(|id| id.0);
        ids
    }

    pub fn window_count(&self) -> usize {
        self.windows.borrow().len()
    }

    pub fn show_count(&self, window: HostWindowId) -> u32 {
        self.window(window).map_or(0, |w| w.show_count)
    }

    /// Number of handlers connected to a window
    pub fn connection_count(&self, window: HostWindowId) -> usize {
        self.connections
            .borrow()
            .values()
            .filter(|c| c.window == window)
            .count()
    }

    /// Emit a signal to every handler connected for it, in connection
    /// order. Returns whether any handler consumed the event.
    ///
    /// Handlers may connect, disconnect or destroy windows while running.
    pub fn emit(&self, window: HostWindowId, event: &HostWindowEvent<'_>) -> bool {
        let signal = event.signal();
        let mut handlers: Vec<_> = self
            .connections
            .borrow()
            .iter()
            .filter(|(_, c)| c.window == window && c.signal == signal)
            .map(|(token, c)| (token.0, c.handler.clone()))
            .collect();
        handlers.sort_by_key(|(token, _)| *token);

        trace!(
            "Emitting {:?} on window {} to {} handlers",
            signal,
            window.0,
            handlers.len()
        );

        let mut consumed = false;
        for (_, handler) in handlers {
            let Ok(mut handler) = handler.try_borrow_mut() else {
                continue;
            };
            consumed |= (*handler)(event);
        }
        consumed
    }

    fn update(&self, window: HostWindowId, update: impl FnOnce(&mut HeadlessWindow)) {
        if let Some(w) = self.windows.borrow_mut().get_mut(&window) {
            update(w);
        }
    }

    fn get<T>(&self, window: HostWindowId, get: impl FnOnce(&HeadlessWindow) -> T) -> Option<T> {
        self.windows.borrow().get(&window).map(get)
    }

    // Simulated user and OS actions

    /// The user asks to close the window
    pub fn request_close(&self, window: HostWindowId) {
        self.emit(window, &HostWindowEvent::CloseRequested);
    }

    /// The window is resized from outside
    pub fn resize_window(&self, window: HostWindowId, size: PixelSize) {
        self.update(window, |w| w.size = size);
        self.emit(window, &HostWindowEvent::SizeChanged(size));
    }

    /// The window moves to a screen with another scale
    pub fn set_scale(&self, window: HostWindowId, scale: f64) {
        self.update(window, |w| w.scale = scale);
        self.emit(window, &HostWindowEvent::ScaleChanged(scale));
    }

    /// The window is moved from outside
    pub fn move_window(&self, window: HostWindowId, position: PixelPoint) {
        self.update(window, |w| w.position = position);
        self.emit(window, &HostWindowEvent::PositionChanged(position));
    }

    /// The window mode is changed from outside
    pub fn set_mode(&self, window: HostWindowId, mode: HostWindowMode) {
        self.update(window, |w| w.mode = mode);
        self.emit(window, &HostWindowEvent::ModeChanged(mode));
    }

    pub fn focus(&self, window: HostWindowId) {
        self.update(window, |w| w.focused = true);
        self.emit(window, &HostWindowEvent::FocusEntered);
    }

    pub fn unfocus(&self, window: HostWindowId) {
        self.update(window, |w| w.focused = false);
        self.emit(window, &HostWindowEvent::FocusExited);
    }

    /// Deliver input to the window; returns whether it was consumed
    pub fn input(&self, window: HostWindowId, event: &HostInputEvent) -> bool {
        self.emit(window, &HostWindowEvent::Input(event))
    }
}

impl Default for HeadlessHost {
    fn default() -> Self {
        Self::new()
    }
}

impl HostDisplay for HeadlessHost {
    fn create_window(&self) -> Result<HostWindowId> {
        if self.fail_window_creation.get() {
            return Err(BridgeError::HostWindowUnavailable(
                "window creation disabled".to_string(),
            ));
        }

        let id = HostWindowId(self.next_window.get());
        self.next_window.set(id.0 + 1);
        self.windows
            .borrow_mut()
            .insert(id, HeadlessWindow::new(self.default_window_size.get()));
        debug!("Created headless window {}", id.0);
        Ok(id)
    }

    fn destroy_window(&self, window: HostWindowId) {
        if self.windows.borrow_mut().remove(&window).is_some() {
            self.connections
                .borrow_mut()
                .retain(|_, c| c.window != window);
            debug!("Destroyed headless window {}", window.0);
        }
    }

    fn native_handle(&self, window: HostWindowId) -> Option<PlatformHandle> {
        self.get(window, |_| {
            PlatformHandle::native(NATIVE_HANDLE_BASE + window.0 as usize)
        })
    }

    fn connect(
        &self,
        window: HostWindowId,
        signal: HostSignal,
        handler: SignalHandler,
    ) -> SubscriptionToken {
        let token = SubscriptionToken(self.next_token.get());
        self.next_token.set(token.0 + 1);
        self.connections.borrow_mut().insert(
            token,
            Connection {
                window,
                signal,
                handler: Rc::new(RefCell::new(handler)),
            },
        );
        token
    }

    fn disconnect(&self, token: SubscriptionToken) {
        self.connections.borrow_mut().remove(&token);
    }

    fn show_window(&self, window: HostWindowId) {
        self.update(window, |w| {
            w.visible = true;
            w.show_count += 1;
        });
    }

    fn hide_window(&self, window: HostWindowId) {
        self.update(window, |w| w.visible = false);
    }

    fn grab_focus(&self, window: HostWindowId) {
        self.update(window, |w| w.focused = true);
    }

    fn move_to_foreground(&self, window: HostWindowId) {
        self.update(window, |w| w.foreground_requests += 1);
    }

    fn window_size(&self, window: HostWindowId) -> PixelSize {
        self.get(window, |w| w.size).unwrap_or_default()
    }

    fn set_window_size(&self, window: HostWindowId, size: PixelSize) {
        self.update(window, |w| w.size = size);
    }

    fn window_position(&self, window: HostWindowId) -> PixelPoint {
        self.get(window, |w| w.position).unwrap_or_default()
    }

    fn set_window_position(&self, window: HostWindowId, position: PixelPoint) {
        self.update(window, |w| w.position = position);
    }

    fn set_window_min_size(&self, window: HostWindowId, size: PixelSize) {
        self.update(window, |w| w.min_size = Some(size));
    }

    fn set_window_max_size(&self, window: HostWindowId, size: PixelSize) {
        self.update(window, |w| w.max_size = Some(size));
    }

    fn set_window_title(&self, window: HostWindowId, title: &str) {
        self.update(window, |w| w.title = title.to_string());
    }

    fn window_mode(&self, window: HostWindowId) -> HostWindowMode {
        self.get(window, |w| w.mode).unwrap_or_default()
    }

    fn set_window_mode(&self, window: HostWindowId, mode: HostWindowMode) {
        self.update(window, |w| w.mode = mode);
    }

    fn window_scale(&self, window: HostWindowId) -> f64 {
        self.get(window, |w| w.scale).unwrap_or(1.0)
    }

    fn set_window_resizable(&self, window: HostWindowId, resizable: bool) {
        self.update(window, |w| w.resizable = resizable);
    }

    fn set_window_borderless(&self, window: HostWindowId, borderless: bool) {
        self.update(window, |w| w.borderless = borderless);
    }

    fn set_window_always_on_top(&self, window: HostWindowId, on_top: bool) {
        self.update(window, |w| w.always_on_top = on_top);
    }

    fn set_window_transparent(&self, window: HostWindowId, transparent: bool) {
        self.update(window, |w| w.transparent = transparent);
    }

    fn set_cursor_shape(&self, window: HostWindowId, shape: CursorShape) {
        self.update(window, |w| w.cursor = shape);
    }
}

impl HostClock for HeadlessHost {
    fn ticks_usec(&self) -> u64 {
        self.now.get().as_micros() as u64
    }
}

impl HostClipboard for HeadlessHost {
    fn get_text(&self) -> Option<String> {
        self.clipboard.borrow().clone()
    }

    fn set_text(&self, text: &str) {
        *self.clipboard.borrow_mut() = Some(text.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_destroy() {
        let host = HeadlessHost::new();
        let window = host.create_window().unwrap();
        assert_eq!(host.window_size(window), PixelSize::new(640, 480));
        assert!(host.native_handle(window).is_some());

        host.destroy_window(window);
        assert!(host.window(window).is_none());
        assert!(host.native_handle(window).is_none());
        assert_eq!(host.window_size(window), PixelSize::default());
    }

    #[test]
    fn test_emit_reaches_connected_handlers() {
        let host = HeadlessHost::new();
        let window = host.create_window().unwrap();
        let other = host.create_window().unwrap();

        let calls = Rc::new(Cell::new(0));
        let count = calls.clone();
        host.connect(
            window,
            HostSignal::CloseRequested,
            Box::new(move |_| {
                count.set(count.get() + 1);
                false
            }),
        );

        host.request_close(window);
        host.request_close(other);
        host.focus(window);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_handler_may_destroy_window() {
        let host = Rc::new(HeadlessHost::new());
        let window = host.create_window().unwrap();

        let weak = Rc::downgrade(&host);
        host.connect(
            window,
            HostSignal::CloseRequested,
            Box::new(move |_| {
                if let Some(host) = weak.upgrade() {
                    host.destroy_window(window);
                }
                false
            }),
        );

        host.request_close(window);
        assert_eq!(host.window_count(), 0);
        assert_eq!(host.connection_count(window), 0);
    }

    #[test]
    fn test_clock_and_clipboard() {
        let host = HeadlessHost::new();
        host.advance(Duration::from_millis(5));
        assert_eq!(host.ticks_usec(), 5_000);
        assert_eq!(host.ticks_msec(), 5);

        assert_eq!(host.get_text(), None);
        host.set_text("copied");
        assert_eq!(host.get_text().as_deref(), Some("copied"));
    }
}

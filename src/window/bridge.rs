//! Window bridge
//!
//! One bridge backs one toolkit window. The host window behind it is
//! created on the first [`WindowBridge::show`], and the bridge addresses it
//! only by id. Host signals reach the bridge through handlers holding a
//! weak reference, and the bridge disconnects them when it is disposed.
//!
//! No internal state is borrowed while a toolkit callback or a host call
//! runs, so callbacks may call back into the bridge, including disposing it.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::mem;
use std::rc::{Rc, Weak};

use log::{debug, warn};

use super::{
    ExtendClientAreaChromeHints, PlatformHandle, StandardCursor, SystemDecorations,
    WindowCallbacks, WindowCloseReason, WindowEdge, WindowResizeReason, WindowState,
    WindowTransparencyLevel,
};
use crate::clipboard::Clipboard;
use crate::clock::{RenderTimer, TimerSubscription};
use crate::error::Result;
use crate::geometry::{PixelPoint, PixelSize, Point, Rect, Size, Thickness};
use crate::host::{
    HostClock, HostDisplay, HostInputEvent, HostSignal, HostWindowEvent, HostWindowId,
    SubscriptionToken,
};
use crate::input::{DeviceRegistry, InputRootId, InputTranslator, RawInputEvent, TranslateContext};
use crate::render::{DrawSurface, PlatformGraphics, RenderSizeChange, SurfaceSlot};

/// Host signals every realized window is connected to
const HOST_SIGNALS: [HostSignal; 8] = [
    HostSignal::CloseRequested,
    HostSignal::SizeChanged,
    HostSignal::ScaleChanged,
    HostSignal::FocusEntered,
    HostSignal::FocusExited,
    HostSignal::ModeChanged,
    HostSignal::PositionChanged,
    HostSignal::WindowInput,
];

/// Identifier of a bridge, for logging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BridgeId(pub u64);

/// Shared services every bridge is wired to
#[derive(Clone)]
pub struct WindowServices {
    pub host: Rc<dyn HostDisplay>,
    pub clock: Rc<dyn HostClock>,
    pub graphics: Rc<PlatformGraphics>,
    pub devices: Rc<DeviceRegistry>,
    pub clipboard: Rc<Clipboard>,
    pub render_timer: Rc<RenderTimer>,
    /// Render scaling before the host reports one
    pub initial_scaling: f64,
}

impl fmt::Debug for WindowServices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WindowServices")
            .field("graphics", &self.graphics)
            .field("render_timer", &self.render_timer)
            .field("initial_scaling", &self.initial_scaling)
            .finish()
    }
}

/// Cached window state, mirrored onto the host window once it exists
#[derive(Debug, Clone)]
struct BridgeState {
    window: Option<HostWindowId>,
    handle: Option<PlatformHandle>,
    subscriptions: Vec<SubscriptionToken>,
    timer_subscription: Option<TimerSubscription>,
    visible: bool,
    disposed: bool,
    closed_notified: bool,
    input_root: Option<InputRootId>,
    title: String,
    position: Option<PixelPoint>,
    requested_size: Option<PixelSize>,
    min_size: Option<PixelSize>,
    max_size: Option<PixelSize>,
    can_resize: bool,
    decorations: SystemDecorations,
    topmost: bool,
    window_state: WindowState,
    transparency_level: WindowTransparencyLevel,
    cursor: StandardCursor,
    extend_client_area: bool,
    needs_managed_decorations: bool,
    extended_margins: Thickness,
    off_screen_margin: Thickness,
}

impl BridgeState {
    fn new() -> Self {
        Self {
            window: None,
            handle: None,
            subscriptions: Vec::new(),
            timer_subscription: None,
            visible: false,
            disposed: false,
            closed_notified: false,
            input_root: None,
            title: String::new(),
            position: None,
            requested_size: None,
            min_size: None,
            max_size: None,
            can_resize: true,
            decorations: SystemDecorations::Full,
            topmost: false,
            window_state: WindowState::Normal,
            transparency_level: WindowTransparencyLevel::None,
            cursor: StandardCursor::Arrow,
            extend_client_area: false,
            needs_managed_decorations: false,
            extended_margins: Thickness::default(),
            off_screen_margin: Thickness::default(),
        }
    }
}

/// Size and scaling last applied to the surface slot, readable while the
/// slot is borrowed for drawing
#[derive(Debug, Clone, Copy)]
struct SurfaceMetrics {
    render_size: PixelSize,
    scaling: f64,
    client_size: Size,
}

impl SurfaceMetrics {
    fn of(slot: &SurfaceSlot) -> Self {
        Self {
            render_size: slot.render_size(),
            scaling: slot.scaling(),
            client_size: slot.client_size(),
        }
    }
}

/// Host-side resources a bridge gives back when it goes away
struct Teardown {
    window: Option<HostWindowId>,
    subscriptions: Vec<SubscriptionToken>,
    timer_subscription: Option<TimerSubscription>,
}

impl Teardown {
    fn take(state: &mut BridgeState) -> Self {
        Self {
            window: state.window.take(),
            subscriptions: mem::take(&mut state.subscriptions),
            timer_subscription: state.timer_subscription.take(),
        }
    }

    fn run(self, host: &dyn HostDisplay, timer: &RenderTimer) {
        for token in self.subscriptions {
            host.disconnect(token);
        }
        if let Some(window) = self.window {
            host.destroy_window(window);
        }
        if let Some(subscription) = self.timer_subscription {
            timer.unsubscribe(subscription);
        }
    }
}

struct BridgeInner {
    id: BridgeId,
    host: Rc<dyn HostDisplay>,
    clock: Rc<dyn HostClock>,
    clipboard: Rc<Clipboard>,
    render_timer: Rc<RenderTimer>,
    translator: InputTranslator,
    callbacks: WindowCallbacks,
    state: RefCell<BridgeState>,
    surface: RefCell<SurfaceSlot>,
    metrics: Cell<SurfaceMetrics>,
}

impl Drop for BridgeInner {
    fn drop(&mut self) {
        let state = self.state.get_mut();
        if state.disposed {
            return;
        }

        warn!("Window bridge {} dropped without being disposed", self.id.0);
        state.disposed = true;
        Teardown::take(state).run(self.host.as_ref(), &self.render_timer);
    }
}

/// Toolkit window backed by a host window
#[derive(Clone)]
pub struct WindowBridge {
    inner: Rc<BridgeInner>,
}

/// Non-owning reference to a [`WindowBridge`]
#[derive(Clone)]
pub struct WeakWindowBridge {
    inner: Weak<BridgeInner>,
}

impl WeakWindowBridge {
    pub fn upgrade(&self) -> Option<WindowBridge> {
        self.inner.upgrade().map(|inner| WindowBridge { inner })
    }
}

impl fmt::Debug for WeakWindowBridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("WeakWindowBridge")
    }
}

impl WindowBridge {
    /// Create a new, unrealized bridge.
    ///
    /// Takes a reference on the shared graphics context and subscribes to
    /// the render timer; both are given back by [`WindowBridge::dispose`].
    pub fn new(id: BridgeId, services: &WindowServices) -> Self {
        let lease = services.graphics.acquire();
        let slot = SurfaceSlot::new(lease, services.initial_scaling);
        let metrics = SurfaceMetrics::of(&slot);

        let inner = Rc::new(BridgeInner {
            id,
            host: services.host.clone(),
            clock: services.clock.clone(),
            clipboard: services.clipboard.clone(),
            render_timer: services.render_timer.clone(),
            translator: InputTranslator::new(services.devices.clone()),
            callbacks: WindowCallbacks::new(),
            state: RefCell::new(BridgeState::new()),
            surface: RefCell::new(slot),
            metrics: Cell::new(metrics),
        });

        let weak = Rc::downgrade(&inner);
        let subscription = services.render_timer.subscribe(Rc::new(move |_elapsed| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            let bridge = WindowBridge { inner };
            if let Err(e) = bridge.render_tick() {
                warn!("Window bridge {} failed to render: {}", bridge.id().0, e);
            }
        }));
        inner.state.borrow_mut().timer_subscription = Some(subscription);

        debug!("Created window bridge {}", id.0);
        Self { inner }
    }

    pub fn id(&self) -> BridgeId {
        self.inner.id
    }

    pub fn downgrade(&self) -> WeakWindowBridge {
        WeakWindowBridge {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Callbacks the toolkit installs on this window
    pub fn callbacks(&self) -> &WindowCallbacks {
        &self.inner.callbacks
    }

    /// The host window, once realized
    pub fn host_window(&self) -> Option<HostWindowId> {
        self.inner.state.borrow().window
    }

    /// Native handle of the host window, once realized
    pub fn handle(&self) -> Option<PlatformHandle> {
        self.inner.state.borrow().handle
    }

    pub fn is_realized(&self) -> bool {
        self.host_window().is_some()
    }

    pub fn is_visible(&self) -> bool {
        self.inner.state.borrow().visible
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.state.borrow().disposed
    }

    /// Shared clipboard
    pub fn clipboard(&self) -> Rc<Clipboard> {
        self.inner.clipboard.clone()
    }

    /// Input root receiving this window's input
    pub fn set_input_root(&self, root: Option<InputRootId>) {
        self.inner.state.borrow_mut().input_root = root;
    }

    // Lifecycle

    /// Show the window, creating the host window on first use
    pub fn show(&self, activate: bool, is_dialog: bool) -> Result<()> {
        if self.is_disposed() {
            return Ok(());
        }

        if !self.is_realized() {
            self.realize()?;
        }

        let (window, needs_show) = {
            let mut state = self.inner.state.borrow_mut();
            let Some(window) = state.window else {
                return Ok(());
            };
            let needs_show = !state.visible;
            state.visible = true;
            (window, needs_show)
        };

        if needs_show {
            debug!(
                "Showing window bridge {} (dialog: {})",
                self.inner.id.0, is_dialog
            );
            self.inner.host.show_window(window);
        }

        if activate {
            self.inner.host.grab_focus(window);
        }

        Ok(())
    }

    fn realize(&self) -> Result<()> {
        let host = self.inner.host.as_ref();
        let window = host.create_window()?;
        let handle = host.native_handle(window);

        let cached = self.inner.state.borrow().clone();

        host.set_window_title(window, &cached.title);
        host.set_window_mode(window, cached.window_state.to_host_mode());
        host.set_window_borderless(window, cached.decorations == SystemDecorations::None);
        host.set_window_resizable(window, cached.can_resize);
        host.set_window_always_on_top(window, cached.topmost);
        host.set_window_transparent(
            window,
            cached.transparency_level == WindowTransparencyLevel::Transparent,
        );
        if let Some(min_size) = cached.min_size {
            host.set_window_min_size(window, min_size);
        }
        if let Some(max_size) = cached.max_size {
            host.set_window_max_size(window, max_size);
        }
        if let Some(position) = cached.position {
            host.set_window_position(window, position);
        }
        if let Some(size) = cached.requested_size {
            host.set_window_size(window, size);
        }
        host.set_cursor_shape(window, cached.cursor.to_host_shape());

        let subscriptions = HOST_SIGNALS
            .iter()
            .map(|&signal| {
                let weak = Rc::downgrade(&self.inner);
                host.connect(
                    window,
                    signal,
                    Box::new(move |event| match weak.upgrade() {
                        Some(inner) => WindowBridge { inner }.on_host_event(event),
                        None => false,
                    }),
                )
            })
            .collect();

        {
            let mut state = self.inner.state.borrow_mut();
            state.window = Some(window);
            state.handle = handle;
            state.subscriptions = subscriptions;
        }

        debug!(
            "Realized window bridge {} as host window {}",
            self.inner.id.0, window.0
        );

        let size = host.window_size(window);
        let scaling = host.window_scale(window);
        self.set_render_size(size, scaling);

        Ok(())
    }

    /// Hide the window; nothing happens unless it is shown
    pub fn hide(&self) {
        let window = {
            let mut state = self.inner.state.borrow_mut();
            match state.window {
                Some(window) if state.visible && !state.disposed => {
                    state.visible = false;
                    window
                }
                _ => return,
            }
        };

        self.inner.host.hide_window(window);
    }

    /// Focus the window and report it activated right away
    pub fn activate(&self) {
        let window = {
            let state = self.inner.state.borrow();
            if state.disposed {
                return;
            }
            state.window
        };

        if let Some(window) = window {
            self.inner.host.grab_focus(window);
        }
        self.inner.callbacks.activated.notify(|activated| activated());
    }

    pub fn deactivate(&self) {
        if self.is_disposed() {
            return;
        }
        self.inner.callbacks.deactivated.notify(|deactivated| deactivated());
    }

    /// Tear the window down. Later calls do nothing.
    pub fn dispose(&self) {
        let teardown = {
            let mut state = self.inner.state.borrow_mut();
            if state.disposed {
                return;
            }
            state.disposed = true;
            state.visible = false;
            Teardown::take(&mut state)
        };

        if self.inner.surface.borrow_mut().discard_surface() {
            debug!("Disposed draw surface of window bridge {}", self.inner.id.0);
        }

        teardown.run(self.inner.host.as_ref(), &self.inner.render_timer);
        self.notify_closed();

        self.inner.surface.borrow_mut().release();
        debug!("Disposed window bridge {}", self.inner.id.0);
    }

    /// Ask the toolkit whether the window may close, and report it closed
    /// if so. Returns whether closing was allowed.
    pub fn request_close(&self, reason: WindowCloseReason) -> bool {
        if self.is_disposed() {
            return false;
        }

        let allow = self
            .inner
            .callbacks
            .closing
            .with(|closing| closing(reason))
            .unwrap_or(true);

        if allow {
            self.notify_closed();
        } else {
            debug!("Window bridge {} close cancelled", self.inner.id.0);
        }
        allow
    }

    fn notify_closed(&self) {
        let first = !mem::replace(&mut self.inner.state.borrow_mut().closed_notified, true);
        if first {
            self.inner.callbacks.closed.notify(|closed| closed());
        }
    }

    // Host signals

    fn on_host_event(&self, event: &HostWindowEvent<'_>) -> bool {
        if self.is_disposed() {
            return false;
        }

        match *event {
            HostWindowEvent::CloseRequested => {
                self.request_close(WindowCloseReason::WindowClosing);
            }
            HostWindowEvent::SizeChanged(size) => {
                let scaling = self.render_scaling();
                self.set_render_size(size, scaling);
            }
            HostWindowEvent::ScaleChanged(scaling) => {
                let size = self.render_size();
                self.set_render_size(size, scaling);
            }
            HostWindowEvent::FocusEntered => {
                self.inner.callbacks.activated.notify(|activated| activated());
            }
            HostWindowEvent::FocusExited => {
                self.inner.callbacks.deactivated.notify(|deactivated| deactivated());
                self.inner.callbacks.lost_focus.notify(|lost_focus| lost_focus());
            }
            HostWindowEvent::ModeChanged(mode) => {
                let window_state = WindowState::from_host_mode(mode);
                let changed = {
                    let mut state = self.inner.state.borrow_mut();
                    mem::replace(&mut state.window_state, window_state) != window_state
                };
                if changed {
                    self.inner
                        .callbacks
                        .window_state_changed
                        .notify(move |changed| changed(window_state));
                }
            }
            HostWindowEvent::PositionChanged(position) => {
                self.inner.state.borrow_mut().position = Some(position);
                self.inner
                    .callbacks
                    .position_changed
                    .notify(move |changed| changed(position));
            }
            HostWindowEvent::Input(input) => return self.dispatch_input(input),
        }

        false
    }

    /// Deliver one host input event to the toolkit. Returns whether the
    /// toolkit handled it.
    pub fn dispatch_input(&self, event: &HostInputEvent) -> bool {
        let root = {
            let state = self.inner.state.borrow();
            if state.disposed {
                return false;
            }
            state.input_root
        };

        let Some(root) = root else {
            return false;
        };
        if !self.inner.callbacks.input.is_set() {
            return false;
        }

        let ctx = TranslateContext {
            root,
            scaling: self.render_scaling(),
            timestamp: self.inner.clock.ticks_msec(),
        };

        let callbacks = &self.inner.callbacks;
        self.inner
            .translator
            .dispatch(event, &ctx, &mut |raw: &mut RawInputEvent| {
                callbacks.input.with(|input| input(raw));
            })
    }

    // Rendering

    pub fn render_size(&self) -> PixelSize {
        self.inner.metrics.get().render_size
    }

    pub fn render_scaling(&self) -> f64 {
        self.inner.metrics.get().scaling
    }

    /// Logical size of the client area
    pub fn client_size(&self) -> Size {
        self.inner.metrics.get().client_size
    }

    /// Update the pixel size and scaling, notifying the toolkit of what
    /// changed
    pub fn set_render_size(&self, size: PixelSize, scaling: f64) {
        let change = self.apply_render_size(size, scaling);
        self.notify_render_size(change);
    }

    fn apply_render_size(&self, size: PixelSize, scaling: f64) -> RenderSizeChange {
        let mut slot = self.inner.surface.borrow_mut();
        let change = slot.set_render_size(size, scaling);
        self.inner.metrics.set(SurfaceMetrics::of(&slot));
        change
    }

    fn notify_render_size(&self, change: RenderSizeChange) {
        if change.is_empty() || self.is_disposed() {
            return;
        }

        let callbacks = &self.inner.callbacks;
        if let Some(scaling) = change.scaling_changed {
            callbacks.scaling_changed.notify(move |changed| changed(scaling));
        }
        if let Some((size, reason)) = change.resized {
            callbacks.resized.notify(move |resized| resized(size, reason));
        }
    }

    /// Whether a draw surface currently exists
    pub fn has_surface(&self) -> bool {
        // Only `with_surface` holds the slot, and it holds a surface
        self.inner
            .surface
            .try_borrow()
            .map_or(true, |slot| slot.surface().is_some())
    }

    /// Run `f` on the draw surface, creating it if needed.
    ///
    /// `f` may read the bridge's size and scaling but must not resize or
    /// dispose it.
    pub fn with_surface<R>(&self, f: impl FnOnce(&mut DrawSurface) -> R) -> Result<R> {
        let mut slot = self.inner.surface.borrow_mut();
        let surface = slot.get_or_create()?;
        Ok(f(surface))
    }

    /// Paint the whole client area for one render tick.
    ///
    /// Returns whether anything was painted.
    pub fn render_tick(&self) -> Result<bool> {
        {
            let state = self.inner.state.borrow();
            if state.disposed || !state.visible {
                return Ok(false);
            }
        }

        let client_size = self.client_size();
        if client_size.is_empty() || !self.inner.callbacks.paint.is_set() {
            return Ok(false);
        }

        self.inner.surface.borrow_mut().get_or_create().map(|_| ())?;

        self.inner
            .callbacks
            .paint
            .with(|paint| paint(Rect::from_size(client_size)));

        if let Some(surface) = self.inner.surface.borrow_mut().surface_mut() {
            surface.flush();
        }
        Ok(true)
    }

    // Window control

    /// Apply `update` to the cached state. Returns the host window to push
    /// the change to, if there is one.
    fn update(&self, update: impl FnOnce(&mut BridgeState)) -> Option<HostWindowId> {
        let mut state = self.inner.state.borrow_mut();
        if state.disposed {
            return None;
        }
        update(&mut state);
        state.window
    }

    pub fn set_title(&self, title: &str) {
        if let Some(window) = self.update(|state| state.title = title.to_string()) {
            self.inner.host.set_window_title(window, title);
        }
    }

    pub fn title(&self) -> String {
        self.inner.state.borrow().title.clone()
    }

    pub fn set_topmost(&self, topmost: bool) {
        if let Some(window) = self.update(|state| state.topmost = topmost) {
            self.inner.host.set_window_always_on_top(window, topmost);
        }
    }

    pub fn set_can_resize(&self, can_resize: bool) {
        if let Some(window) = self.update(|state| state.can_resize = can_resize) {
            self.inner.host.set_window_resizable(window, can_resize);
        }
    }

    /// Native decorations; `None` makes the host window borderless
    pub fn set_system_decorations(&self, decorations: SystemDecorations) {
        if let Some(window) = self.update(|state| state.decorations = decorations) {
            self.inner
                .host
                .set_window_borderless(window, decorations == SystemDecorations::None);
        }
    }

    /// Size limits in logical units. Bounds that are infinite or not
    /// positive are ignored.
    pub fn set_min_max_size(&self, min_size: Size, max_size: Size) {
        let scaling = self.render_scaling();
        let to_pixels = |size: Size| {
            size.is_positive_finite()
                .then(|| PixelSize::from_size(size, scaling))
        };
        let min_size = to_pixels(min_size);
        let max_size = to_pixels(max_size);

        let window = self.update(|state| {
            if min_size.is_some() {
                state.min_size = min_size;
            }
            if max_size.is_some() {
                state.max_size = max_size;
            }
        });

        if let Some(window) = window {
            if let Some(min_size) = min_size {
                self.inner.host.set_window_min_size(window, min_size);
            }
            if let Some(max_size) = max_size {
                self.inner.host.set_window_max_size(window, max_size);
            }
        }
    }

    /// Screen position of the window
    pub fn position(&self) -> PixelPoint {
        let (window, cached) = {
            let state = self.inner.state.borrow();
            (state.window, state.position)
        };
        match window {
            Some(window) => self.inner.host.window_position(window),
            None => cached.unwrap_or(PixelPoint::ORIGIN),
        }
    }

    /// Move the window on screen
    pub fn move_to(&self, position: PixelPoint) {
        let Some(window) = self.update(|state| state.position = Some(position)) else {
            return;
        };
        self.inner.host.set_window_position(window, position);
        self.inner
            .callbacks
            .position_changed
            .notify(move |changed| changed(position));
    }

    pub fn set_position(&self, position: PixelPoint) {
        self.move_to(position);
    }

    /// Resize the client area to a logical size
    pub fn resize(&self, size: Size, reason: WindowResizeReason) {
        let scaling = self.render_scaling();
        let pixels = PixelSize::from_size(size, scaling);

        let Some(window) = self.update(|state| state.requested_size = Some(pixels)) else {
            return;
        };
        self.inner.host.set_window_size(window, pixels);

        self.apply_render_size(pixels, scaling);
        let client_size = self.client_size();
        self.inner
            .callbacks
            .resized
            .notify(move |resized| resized(client_size, reason));
    }

    pub fn set_size(&self, size: Size) {
        self.resize(size, WindowResizeReason::Application);
    }

    /// Current window state, read from the host window once realized
    pub fn window_state(&self) -> WindowState {
        let (window, cached) = {
            let state = self.inner.state.borrow();
            (state.window, state.window_state)
        };
        match window {
            Some(window) => WindowState::from_host_mode(self.inner.host.window_mode(window)),
            None => cached,
        }
    }

    pub fn set_window_state(&self, window_state: WindowState) {
        let window = {
            let mut state = self.inner.state.borrow_mut();
            if state.disposed || state.window_state == window_state {
                return;
            }
            state.window_state = window_state;
            state.window
        };

        let Some(window) = window else {
            return;
        };
        self.inner
            .host
            .set_window_mode(window, window_state.to_host_mode());
        self.inner
            .callbacks
            .window_state_changed
            .notify(move |changed| changed(window_state));
    }

    pub fn transparency_level(&self) -> WindowTransparencyLevel {
        self.inner.state.borrow().transparency_level
    }

    pub fn set_transparency_level(&self, level: WindowTransparencyLevel) {
        let mut changed = false;
        let window = self.update(|state| {
            changed = mem::replace(&mut state.transparency_level, level) != level;
        });

        if let Some(window) = window {
            self.inner
                .host
                .set_window_transparent(window, level == WindowTransparencyLevel::Transparent);
        }
        if changed {
            self.inner
                .callbacks
                .transparency_level_changed
                .notify(move |changed| changed(level));
        }
    }

    /// Apply the first requested level the host supports
    pub fn set_transparency_level_hint(&self, levels: &[WindowTransparencyLevel]) {
        let level = levels
            .iter()
            .copied()
            .find(|level| level.is_supported())
            .unwrap_or_default();
        self.set_transparency_level(level);
    }

    pub fn set_cursor(&self, cursor: StandardCursor) {
        if let Some(window) = self.update(|state| state.cursor = cursor) {
            self.inner
                .host
                .set_cursor_shape(window, cursor.to_host_shape());
        }
    }

    /// Start an interactive move; the host can only raise the window
    pub fn begin_move_drag(&self) {
        if let Some(window) = self.update(|_| {}) {
            self.inner.host.move_to_foreground(window);
        }
    }

    /// Start an interactive resize; not supported by hosts
    pub fn begin_resize_drag(&self, edge: WindowEdge) {
        debug!(
            "Window bridge {} ignoring resize drag from {:?}",
            self.inner.id.0, edge
        );
    }

    /// Convert a screen pixel position to client coordinates
    pub fn point_to_client(&self, point: PixelPoint) -> Point {
        let origin = self.position();
        PixelPoint::new(point.x - origin.x, point.y - origin.y).to_point(self.render_scaling())
    }

    /// Convert a client position to screen pixels
    pub fn point_to_screen(&self, point: Point) -> PixelPoint {
        let origin = self.position();
        let offset = PixelPoint::from_point(point, self.render_scaling());
        PixelPoint::new(origin.x + offset.x, origin.y + offset.y)
    }

    // Client area extension

    pub fn set_extend_client_area_to_decorations_hint(&self, extend: bool) {
        if self.is_disposed() {
            return;
        }
        self.inner.state.borrow_mut().extend_client_area = extend;
        self.inner
            .callbacks
            .extend_client_area_changed
            .notify(move |changed| changed(extend));
    }

    pub fn set_extend_client_area_chrome_hints(&self, hints: ExtendClientAreaChromeHints) {
        self.update(|state| {
            state.needs_managed_decorations =
                hints.contains(ExtendClientAreaChromeHints::PREFER_SYSTEM_CHROME);
        });
    }

    /// Title bar height the toolkit draws itself when the client area is
    /// extended
    pub fn set_extend_client_area_title_bar_height_hint(&self, height: f64) {
        let extended = {
            let mut state = self.inner.state.borrow_mut();
            if state.disposed {
                return;
            }
            state.extended_margins = Thickness::new(0.0, height, 0.0, 0.0);
            state.off_screen_margin = Thickness::new(0.0, height, 0.0, 0.0);
            state.extend_client_area
        };
        self.inner
            .callbacks
            .extend_client_area_changed
            .notify(move |changed| changed(extended));
    }

    pub fn is_client_area_extended_to_decorations(&self) -> bool {
        self.inner.state.borrow().extend_client_area
    }

    pub fn needs_managed_decorations(&self) -> bool {
        self.inner.state.borrow().needs_managed_decorations
    }

    pub fn extended_margins(&self) -> Thickness {
        self.inner.state.borrow().extended_margins
    }

    pub fn off_screen_margin(&self) -> Thickness {
        self.inner.state.borrow().off_screen_margin
    }

    // Unsupported window features

    /// Popups are not supported
    pub fn create_popup(&self) -> Option<WindowBridge> {
        None
    }

    /// Z-order of `windows`; hosts don't expose one, so it is their order
    pub fn windows_z_order(&self, windows: &[WindowBridge]) -> Vec<i64> {
        (0..windows.len() as i64).collect()
    }
}

impl fmt::Debug for WindowBridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.try_borrow();
        let mut debug = f.debug_struct("WindowBridge");
        debug.field("id", &self.inner.id);
        if let Ok(state) = state {
            debug
                .field("window", &state.window)
                .field("visible", &state.visible)
                .field("disposed", &state.disposed);
        }
        debug.finish()
    }
}

//! Platform context
//!
//! [`Platform`] owns everything shared between windows: the graphics
//! context, the render timer and frame clock, the device registry, the
//! clipboard and the windowing factory. Only one platform may be alive in a
//! process at a time.

use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, info};

use crate::clipboard::{Clipboard, DataBackend};
use crate::clock::{Compositor, FrameClock, RenderTimer, TimerSubscription};
use crate::config::{HotkeyConfiguration, PlatformOptions};
use crate::error::{BridgeError, Result};
use crate::host::{HostClipboard, HostClock, HostDisplay};
use crate::input::DeviceRegistry;
use crate::render::{GraphicsBackend, PlatformGraphics};
use crate::window::WindowServices;
use crate::windowing::WindowingPlatform;

static PLATFORM_ALIVE: AtomicBool = AtomicBool::new(false);

/// The process-wide platform context
pub struct Platform {
    options: PlatformOptions,
    graphics: Rc<PlatformGraphics>,
    render_timer: Rc<RenderTimer>,
    frame_clock: FrameClock,
    devices: Rc<DeviceRegistry>,
    clipboard: Rc<Clipboard>,
    windowing: WindowingPlatform,
    compositor_subscription: TimerSubscription,
}

impl Platform {
    /// Build the platform on top of a host.
    ///
    /// Fails with [`BridgeError::AlreadyInitialized`] while another
    /// platform is alive.
    pub fn initialize<H>(
        options: PlatformOptions,
        host: Rc<H>,
        graphics_backend: Rc<dyn GraphicsBackend>,
        compositor: Rc<dyn Compositor>,
        clipboard_data: DataBackend,
    ) -> Result<Self>
    where
        H: HostDisplay + HostClock + HostClipboard + 'static,
    {
        options.validate()?;

        if PLATFORM_ALIVE
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(BridgeError::AlreadyInitialized);
        }

        let graphics = PlatformGraphics::new(graphics_backend);
        let render_timer = Rc::new(RenderTimer::new());
        let compositor_subscription = render_timer.subscribe_compositor(compositor);
        let frame_clock = FrameClock::new(host.clone(), render_timer.clone());
        let devices = Rc::new(DeviceRegistry::new());
        let clipboard = Rc::new(Clipboard::new(host.clone(), clipboard_data));

        let windowing = WindowingPlatform::new(WindowServices {
            host: host.clone(),
            clock: host,
            graphics: graphics.clone(),
            devices: devices.clone(),
            clipboard: clipboard.clone(),
            render_timer: render_timer.clone(),
            initial_scaling: options.initial_scaling,
        });

        info!(
            "Platform initialized (scaling {}, clipboard data backend: {})",
            options.initial_scaling,
            clipboard.has_data_backend()
        );

        Ok(Self {
            options,
            graphics,
            render_timer,
            frame_clock,
            devices,
            clipboard,
            windowing,
            compositor_subscription,
        })
    }

    /// Report a host frame. Returns whether the render timer ticked.
    pub fn on_host_frame(&self, frame: u64) -> bool {
        self.frame_clock.on_host_frame(frame)
    }

    pub fn windowing(&self) -> &WindowingPlatform {
        &self.windowing
    }

    pub fn clipboard(&self) -> &Rc<Clipboard> {
        &self.clipboard
    }

    pub fn hotkeys(&self) -> HotkeyConfiguration {
        self.options.hotkeys
    }

    pub fn options(&self) -> &PlatformOptions {
        &self.options
    }

    pub fn graphics(&self) -> &Rc<PlatformGraphics> {
        &self.graphics
    }

    pub fn render_timer(&self) -> &Rc<RenderTimer> {
        &self.render_timer
    }

    pub fn devices(&self) -> &Rc<DeviceRegistry> {
        &self.devices
    }
}

impl Drop for Platform {
    fn drop(&mut self) {
        self.render_timer.unsubscribe(self.compositor_subscription);
        PLATFORM_ALIVE.store(false, Ordering::SeqCst);
        debug!("Platform shut down");
    }
}

impl fmt::Debug for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Platform")
            .field("options", &self.options)
            .field("graphics", &self.graphics)
            .field("frame_clock", &self.frame_clock)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::time::Duration;

    use serial_test::serial;

    use super::*;
    use crate::backend::headless::{HeadlessGraphics, HeadlessHost};
    use crate::geometry::PixelSize;

    #[derive(Default)]
    struct RecordingCompositor {
        ticks: RefCell<Vec<Duration>>,
    }

    impl Compositor for RecordingCompositor {
        fn on_render_tick(&self, elapsed: Duration) {
            self.ticks.borrow_mut().push(elapsed);
        }
    }

    fn initialize(host: Rc<HeadlessHost>) -> (Rc<RecordingCompositor>, Result<Platform>) {
        let compositor = Rc::new(RecordingCompositor::default());
        let platform = Platform::initialize(
            PlatformOptions::default(),
            host,
            Rc::new(HeadlessGraphics::new()),
            compositor.clone(),
            DataBackend::Unavailable,
        );
        (compositor, platform)
    }

    #[test]
    #[serial]
    fn test_single_instance() {
        let (_, first) = initialize(Rc::new(HeadlessHost::new()));
        let first = first.unwrap();

        let (_, second) = initialize(Rc::new(HeadlessHost::new()));
        assert_eq!(second.unwrap_err(), BridgeError::AlreadyInitialized);

        drop(first);
        let (_, third) = initialize(Rc::new(HeadlessHost::new()));
        assert!(third.is_ok());
    }

    #[test]
    #[serial]
    fn test_invalid_options_rejected() {
        let result = Platform::initialize(
            PlatformOptions::default().with_initial_scaling(-1.0),
            Rc::new(HeadlessHost::new()),
            Rc::new(HeadlessGraphics::new()),
            Rc::new(RecordingCompositor::default()),
            DataBackend::Unavailable,
        );
        assert!(matches!(result, Err(BridgeError::InvalidConfig(_))));

        let (_, platform) = initialize(Rc::new(HeadlessHost::new()));
        assert!(platform.is_ok());
    }

    #[test]
    #[serial]
    fn test_host_frames_drive_compositor_and_windows() {
        let host = Rc::new(HeadlessHost::new());
        let (compositor, platform) = initialize(host.clone());
        let platform = platform.unwrap();

        let window = platform.windowing().create_window();
        window.show(false, false).unwrap();
        host.resize_window(window.host_window().unwrap(), PixelSize::new(64, 64));

        let painted = Rc::new(Cell::new(0));
        let count = painted.clone();
        window
            .callbacks()
            .paint
            .set(Box::new(move |_| count.set(count.get() + 1)));

        host.advance(Duration::from_millis(16));
        assert!(platform.on_host_frame(1));
        assert!(!platform.on_host_frame(1));
        host.advance(Duration::from_millis(16));
        assert!(platform.on_host_frame(2));

        assert_eq!(
            *compositor.ticks.borrow(),
            vec![Duration::from_millis(16), Duration::from_millis(32)]
        );
        assert_eq!(painted.get(), 2);
        assert_eq!(platform.render_timer().tick_count(), 2);

        window.dispose();
        assert_eq!(platform.graphics().ref_count(), 0);
    }

    #[test]
    #[serial]
    fn test_accessors() {
        let (_, platform) = initialize(Rc::new(HeadlessHost::new()));
        let platform = platform.unwrap();

        assert_eq!(platform.hotkeys(), HotkeyConfiguration::default());
        assert_eq!(platform.options().initial_scaling, 1.0);
        assert!(!platform.clipboard().has_data_backend());
        assert!(platform.devices().is_empty());
    }
}

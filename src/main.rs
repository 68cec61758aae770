//! Embedkit demo
//!
//! Runs one toolkit window on the headless host. A calloop timer plays
//! the host's frame loop; after a fixed number of frames the host asks the
//! window to close and the demo exits.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use embedkit::backend::headless::{HeadlessGraphics, HeadlessHost, HeadlessTarget};
use embedkit::backend::EventLoop;
use embedkit::clipboard::DataBackend;
use embedkit::clock::Compositor;
use embedkit::config::PlatformOptions;
use embedkit::platform::Platform;
use log::{debug, info, warn};

/// Frames rendered before the host closes the window
const DEMO_FRAMES: u64 = 120;

/// Compositor that only counts ticks
#[derive(Default)]
struct TickCounter {
    ticks: Cell<u64>,
}

impl Compositor for TickCounter {
    fn on_render_tick(&self, elapsed: Duration) {
        self.ticks.set(self.ticks.get() + 1);
        debug!("Compositor tick at {:?}", elapsed);
    }
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("Starting embedkit demo");

    let options = PlatformOptions::from_env()?;
    let frame_interval = options.frame_interval;

    let host = Rc::new(HeadlessHost::new());
    host.set_default_window_size(options.default_window_size);

    let compositor = Rc::new(TickCounter::default());
    let platform = Rc::new(Platform::initialize(
        options,
        host.clone(),
        Rc::new(HeadlessGraphics::new()),
        compositor.clone(),
        DataBackend::Unavailable,
    )?);

    let window = platform.windowing().create_window();
    window.set_title("embedkit demo");

    let painted = Rc::new(Cell::new(0u64));
    {
        let weak = window.downgrade();
        let painted = painted.clone();
        window.callbacks().paint.set(Box::new(move |rect| {
            let Some(window) = weak.upgrade() else {
                return;
            };
            let shade = (painted.get() % 256) as u8;
            let result = window.with_surface(|surface| {
                if let Some(target) = surface
                    .target_mut()
                    .as_any_mut()
                    .downcast_mut::<HeadlessTarget>()
                {
                    target.pixels_mut().fill(shade);
                }
            });
            match result {
                Ok(()) => painted.set(painted.get() + 1),
                Err(e) => warn!("Paint of {:?} failed: {}", rect, e),
            }
        }));
    }

    let mut event_loop = EventLoop::new()?;
    {
        let weak = window.downgrade();
        let signal = event_loop.signal();
        window.callbacks().closed.set(Box::new(move || {
            info!("Window closed");
            if let Some(window) = weak.upgrade() {
                window.dispose();
            }
            signal.stop();
        }));
    }

    window.show(true, false)?;

    let host_window = window
        .host_window()
        .ok_or_else(|| anyhow::anyhow!("Window was not realized"))?;

    {
        let host = host.clone();
        let platform = platform.clone();
        event_loop.add_frame_timer(frame_interval, move |frame| {
            host.advance(frame_interval);
            platform.on_host_frame(frame);

            if frame == DEMO_FRAMES {
                info!("Requesting close after {} frames", frame);
                host.request_close(host_window);
                return false;
            }
            true
        })?;
    }

    event_loop.run()?;

    info!(
        "Rendered {} frames ({} compositor ticks)",
        painted.get(),
        compositor.ticks.get()
    );

    Ok(())
}

//! Embedkit - run a retained-mode UI toolkit inside a host runtime
//!
//! The host (typically a game engine) owns the real OS windows, the main
//! loop, the frame clock and the GPU. Embedkit gives the toolkit what it
//! expects from a windowing platform on top of that: one window object per
//! host window, a normalized input stream, and draw surfaces that follow
//! the window's size and scaling.
//!
//! # Architecture
//!
//! - **Host Contracts**: Traits the host implements for windows, clock and clipboard
//! - **Input**: Device registry and translation of host input events
//! - **Rendering**: Shared graphics context and per-window draw surfaces
//! - **Window Bridge**: One per toolkit window, mirroring state onto its host window
//! - **Frame Clock**: Turns host frames into render ticks
//! - **Platform**: The single context object owning all shared state
//!
//! Everything runs on the host's main thread; nothing here is `Send`.
//!
//! # Example
//!
//! ```no_run
//! use std::rc::Rc;
//!
//! use embedkit::backend::headless::{HeadlessGraphics, HeadlessHost};
//! use embedkit::clipboard::DataBackend;
//! use embedkit::clock::Compositor;
//! use embedkit::config::PlatformOptions;
//! use embedkit::platform::Platform;
//!
//! struct NoCompositor;
//!
//! impl Compositor for NoCompositor {
//!     fn on_render_tick(&self, _elapsed: std::time::Duration) {}
//! }
//!
//! let host = Rc::new(HeadlessHost::new());
//! let platform = Platform::initialize(
//!     PlatformOptions::default(),
//!     host,
//!     Rc::new(HeadlessGraphics::new()),
//!     Rc::new(NoCompositor),
//!     DataBackend::Unavailable,
//! )?;
//!
//! let window = platform.windowing().create_window();
//! window.show(true, false)?;
//! platform.on_host_frame(1);
//! # Ok::<(), embedkit::error::BridgeError>(())
//! ```

pub mod backend;
pub mod clipboard;
pub mod clock;
pub mod config;
pub mod error;
pub mod geometry;
pub mod host;
pub mod input;
pub mod platform;
pub mod render;
pub mod window;
pub mod windowing;

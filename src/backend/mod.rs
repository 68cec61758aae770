//! Backend module
//!
//! This module contains host backends:
//! - Headless backend, an in-memory host used by the demo and tests
//! - Event loop integration with calloop

pub mod event_loop;
pub mod headless;

pub use event_loop::EventLoop;

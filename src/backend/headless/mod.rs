//! Headless backend
//!
//! A host that lives entirely in memory: windows are records, the clock
//! advances when told to, and render targets are CPU buffers. The demo
//! binary runs on it, and so do the tests.

pub mod clipboard;
pub mod graphics;
pub mod host;

pub use clipboard::HeadlessClipboardData;
pub use graphics::{HeadlessGraphics, HeadlessTarget};
pub use host::{HeadlessHost, HeadlessWindow};

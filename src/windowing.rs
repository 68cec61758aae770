//! Windowing factory
//!
//! Creates window bridges wired to the shared services. Only top-level
//! windows are supported; embedded windows and tray icons are not.

use std::cell::Cell;

use log::debug;

use crate::error::{BridgeError, Result};
use crate::window::{BridgeId, WindowBridge, WindowServices};

/// Tray icon handle; hosts never provide one
#[derive(Debug)]
pub struct TrayIcon {
    _private: (),
}

/// Factory for toolkit windows
#[derive(Debug)]
pub struct WindowingPlatform {
    services: WindowServices,
    next_id: Cell<u64>,
}

impl WindowingPlatform {
    /// Create a new windowing factory
    pub fn new(services: WindowServices) -> Self {
        Self {
            services,
            next_id: Cell::new(1),
        }
    }

    /// Create a top-level window. The host window is created when the
    /// bridge is first shown, so this cannot fail.
    pub fn create_window(&self) -> WindowBridge {
        let id = BridgeId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        WindowBridge::new(id, &self.services)
    }

    /// Embedded windows are not supported
    pub fn create_embeddable_window(&self) -> Result<WindowBridge> {
        debug!("Rejecting embeddable window");
        Err(BridgeError::NotImplemented("Sub windows"))
    }

    /// Embedded top levels are not supported
    pub fn create_embeddable_top_level(&self) -> Result<WindowBridge> {
        debug!("Rejecting embeddable top level");
        Err(BridgeError::NotImplemented("Sub windows"))
    }

    /// Tray icons are not supported
    pub fn create_tray_icon(&self) -> Option<TrayIcon> {
        None
    }

    pub fn services(&self) -> &WindowServices {
        &self.services
    }
}

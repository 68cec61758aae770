//! Device registry
//!
//! Maps host input-device ids to stable device handles. Host device ids
//! are few and reused, so entries are never evicted.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use log::debug;

use crate::host::EMULATED_DEVICE_ID;

/// Registry-assigned identity of a device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeviceId(pub u32);

/// Kind of input device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceKind {
    Mouse,
    Keyboard,
    Touch,
    Joypad,
}

/// Normalized input device handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Device {
    pub id: DeviceId,
    pub kind: DeviceKind,
    /// Host device id of the first event seen from this device
    pub host_id: i32,
    /// True for mouse events the host synthesized from touch
    pub emulated: bool,
}

/// Registry of every device seen so far
#[derive(Debug)]
pub struct DeviceRegistry {
    devices: RefCell<HashMap<(DeviceKind, i32), Device>>,
    next_id: Cell<u32>,
}

impl DeviceRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            devices: RefCell::new(HashMap::new()),
            next_id: Cell::new(1),
        }
    }

    /// Resolve a host device id to a device handle, registering it if new.
    ///
    /// Keyboard and touch are single logical devices, so every host id of
    /// those kinds resolves to the same handle.
    pub fn resolve(&self, host_id: i32, kind: DeviceKind) -> Device {
        let key_id = match kind {
            DeviceKind::Keyboard | DeviceKind::Touch => 0,
            DeviceKind::Mouse | DeviceKind::Joypad => host_id,
        };

        let mut devices = self.devices.borrow_mut();
        *devices.entry((kind, key_id)).or_insert_with(|| {
            let id = DeviceId(self.next_id.get());
            self.next_id.set(id.0 + 1);

            let device = Device {
                id,
                kind,
                host_id: key_id,
                emulated: kind == DeviceKind::Mouse && host_id == EMULATED_DEVICE_ID,
            };
            debug!("Registered {:?} device {:?} (host id {})", kind, id, key_id);
            device
        })
    }

    /// Mouse device for a host id
    pub fn mouse(&self, host_id: i32) -> Device {
        self.resolve(host_id, DeviceKind::Mouse)
    }

    /// The keyboard
    pub fn keyboard(&self) -> Device {
        self.resolve(0, DeviceKind::Keyboard)
    }

    /// The shared touch device
    pub fn touch(&self) -> Device {
        self.resolve(0, DeviceKind::Touch)
    }

    /// Joypad device for a host id
    pub fn joypad(&self, host_id: i32) -> Device {
        self.resolve(host_id, DeviceKind::Joypad)
    }

    /// Number of registered devices
    pub fn len(&self) -> usize {
        self.devices.borrow().len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.devices.borrow().is_empty()
    }
}

impl Default for DeviceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

//! In-memory clipboard data backend

use std::cell::{Cell, RefCell};

use crate::clipboard::{ClipboardDataBackend, DataTransfer};
use crate::error::{BridgeError, Result};

/// Clipboard data backend keeping the latest transfer in memory
#[derive(Debug, Default)]
pub struct HeadlessClipboardData {
    current: RefCell<DataTransfer>,
    flushes: Cell<u32>,
    fail_writes: Cell<bool>,
}

impl HeadlessClipboardData {
    /// Create an empty backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every later write fail
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    pub fn flush_count(&self) -> u32 {
        self.flushes.get()
    }
}

impl ClipboardDataBackend for HeadlessClipboardData {
    fn formats(&self) -> Vec<String> {
        self.current.borrow().formats()
    }

    fn get_data(&self, format: &str) -> Option<Vec<u8>> {
        self.current.borrow().get(format).map(<[u8]>::to_vec)
    }

    fn set_data(&self, transfer: &DataTransfer) -> Result<()> {
        if self.fail_writes.get() {
            return Err(BridgeError::ClipboardWrite(
                "headless clipboard is read only".to_string(),
            ));
        }
        *self.current.borrow_mut() = transfer.clone();
        Ok(())
    }

    fn clear(&self) {
        *self.current.borrow_mut() = DataTransfer::new();
    }

    fn flush(&self) {
        self.flushes.set(self.flushes.get() + 1);
    }
}

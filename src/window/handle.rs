//! Native window handles

use std::ffi::c_ulong;
use std::fmt;
use std::num::NonZeroIsize;

use raw_window_handle::{RawWindowHandle, Win32WindowHandle, XlibWindowHandle};

/// What kind of OS object a native handle refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleDescriptor {
    Hwnd,
    NsWindow,
    Xid,
}

impl HandleDescriptor {
    /// Descriptor for windows of the current OS
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            HandleDescriptor::Hwnd
        } else if cfg!(target_os = "macos") {
            HandleDescriptor::NsWindow
        } else {
            HandleDescriptor::Xid
        }
    }
}

impl fmt::Display for HandleDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HandleDescriptor::Hwnd => "HWND",
            HandleDescriptor::NsWindow => "NSWindow",
            HandleDescriptor::Xid => "XID",
        };
        f.write_str(name)
    }
}

/// Read-only native handle of a host window, for interop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlatformHandle {
    handle: usize,
    descriptor: HandleDescriptor,
}

impl PlatformHandle {
    /// Wrap a native handle value
    pub fn new(handle: usize, descriptor: HandleDescriptor) -> Self {
        Self { handle, descriptor }
    }

    /// Wrap a handle of the current OS
    pub fn native(handle: usize) -> Self {
        Self::new(handle, HandleDescriptor::current())
    }

    pub fn handle(&self) -> usize {
        self.handle
    }

    pub fn descriptor(&self) -> HandleDescriptor {
        self.descriptor
    }

    /// The handle as a `raw-window-handle` value.
    ///
    /// `None` for null handles and for `NSWindow`, which raw-window-handle
    /// only models through its content view.
    pub fn raw_window_handle(&self) -> Option<RawWindowHandle> {
        match self.descriptor {
            HandleDescriptor::Hwnd => NonZeroIsize::new(self.handle as isize)
                .map(|hwnd| RawWindowHandle::Win32(Win32WindowHandle::new(hwnd))),
            HandleDescriptor::Xid if self.handle != 0 => Some(RawWindowHandle::Xlib(
                XlibWindowHandle::new(self.handle as c_ulong),
            )),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_names() {
        assert_eq!(HandleDescriptor::Hwnd.to_string(), "HWND");
        assert_eq!(HandleDescriptor::NsWindow.to_string(), "NSWindow");
        assert_eq!(HandleDescriptor::Xid.to_string(), "XID");
    }

    #[test]
    fn test_raw_window_handle() {
        let hwnd = PlatformHandle::new(0x1234, HandleDescriptor::Hwnd);
        assert!(matches!(
            hwnd.raw_window_handle(),
            Some(RawWindowHandle::Win32(_))
        ));

        let xid = PlatformHandle::new(42, HandleDescriptor::Xid);
        match xid.raw_window_handle() {
            Some(RawWindowHandle::Xlib(handle)) => assert_eq!(handle.window, 42),
            other => panic!("Wrong handle: {:?}", other),
        }

        assert!(PlatformHandle::new(0, HandleDescriptor::Xid)
            .raw_window_handle()
            .is_none());
        assert!(PlatformHandle::new(1, HandleDescriptor::NsWindow)
            .raw_window_handle()
            .is_none());
    }
}

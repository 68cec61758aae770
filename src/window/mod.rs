//! Window module
//!
//! The toolkit-facing window: the bridge onto a host window, the callbacks
//! it reports through, and the window state vocabulary.

pub mod bridge;
pub mod callbacks;
pub mod handle;
pub mod state;

pub use bridge::{BridgeId, WeakWindowBridge, WindowBridge, WindowServices};
pub use callbacks::{Callback, WindowCallbacks};
pub use handle::{HandleDescriptor, PlatformHandle};
pub use state::{
    ExtendClientAreaChromeHints, StandardCursor, SystemDecorations, WindowCloseReason, WindowEdge,
    WindowResizeReason, WindowState, WindowTransparencyLevel,
};

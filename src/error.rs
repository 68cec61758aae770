//! Error types
//!
//! Failures are grouped the way callers react to them: invalid state
//! (disposed bridge or empty surface), unsupported capabilities, and
//! unavailable host or GPU resources.

/// Errors raised by the bridge
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BridgeError {
    /// The window bridge or its surface was already disposed
    #[error("window bridge has been disposed")]
    Disposed,
    /// A draw surface was requested while the window has no pixels
    #[error("cannot create a draw surface for an empty window")]
    EmptySurface,
    /// The requested capability is not supported by this platform
    #[error("{0} aren't implemented")]
    NotImplemented(&'static str),
    /// The host failed to create a native window
    #[error("host window unavailable: {0}")]
    HostWindowUnavailable(String),
    /// The shared graphics context could not be created
    #[error("graphics context unavailable: {0}")]
    GraphicsUnavailable(String),
    /// The backend failed to allocate a render target
    #[error("failed to create draw surface: {0}")]
    SurfaceCreation(String),
    /// A platform context is already alive in this process
    #[error("platform has already been initialized")]
    AlreadyInitialized,
    /// The clipboard data backend rejected a write
    #[error("clipboard write failed: {0}")]
    ClipboardWrite(String),
    /// A configuration value could not be parsed
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, BridgeError>;

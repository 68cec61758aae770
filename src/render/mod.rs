//! Rendering module
//!
//! The shared graphics context and the per-window draw surfaces the
//! toolkit renders into.

pub mod graphics;
pub mod surface;

pub use graphics::{GraphicsBackend, GraphicsLease, PlatformGraphics, RenderTarget, TextureId};
pub use surface::{DrawSurface, RenderSizeChange, SurfaceSlot};

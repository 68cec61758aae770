//! Shared graphics context
//!
//! One GPU context is shared by every window. Each window bridge holds a
//! [`GraphicsLease`] for its whole lifetime; the context is created on
//! first use and torn down when the last lease is released.

use std::any::Any;
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use log::{debug, info, warn};

use super::DrawSurface;
use crate::error::Result;
use crate::geometry::PixelSize;

/// Host texture backing a render target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u64);

/// GPU render target the toolkit draws into and the host presents
pub trait RenderTarget {
    fn pixel_size(&self) -> PixelSize;

    /// Host texture holding the rendered pixels
    fn texture(&self) -> TextureId;

    /// Make rendered contents visible to the host
    fn flush(&mut self) {}

    /// Backend-specific access for the toolkit's renderer
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// GPU services provided by the host
pub trait GraphicsBackend {
    /// Create the shared context
    fn create_context(&self) -> Result<()>;

    /// Tear down the shared context
    fn destroy_context(&self);

    /// Allocate a render target; only called while the context is alive.
    /// Dropping the target releases it.
    fn create_render_target(&self, size: PixelSize) -> Result<Box<dyn RenderTarget>>;
}

/// Reference-counted owner of the shared context
pub struct PlatformGraphics {
    backend: Rc<dyn GraphicsBackend>,
    refs: Cell<usize>,
    context_live: Cell<bool>,
}

impl PlatformGraphics {
    /// Create the graphics owner; the context itself is created lazily
    pub fn new(backend: Rc<dyn GraphicsBackend>) -> Rc<Self> {
        Rc::new(Self {
            backend,
            refs: Cell::new(0),
            context_live: Cell::new(false),
        })
    }

    /// Take a reference on the shared context
    pub fn acquire(self: &Rc<Self>) -> GraphicsLease {
        self.refs.set(self.refs.get() + 1);
        debug!("Graphics reference acquired ({} held)", self.refs.get());
        GraphicsLease {
            graphics: Rc::clone(self),
        }
    }

    fn release(&self) {
        let refs = self.refs.get();
        if refs == 0 {
            warn!("Graphics reference released more often than acquired");
            return;
        }

        self.refs.set(refs - 1);
        debug!("Graphics reference released ({} held)", refs - 1);

        if refs == 1 && self.context_live.replace(false) {
            info!("Last graphics reference released, destroying shared context");
            self.backend.destroy_context();
        }
    }

    /// Number of outstanding leases
    pub fn ref_count(&self) -> usize {
        self.refs.get()
    }

    /// Whether the shared context currently exists
    pub fn is_context_live(&self) -> bool {
        self.context_live.get()
    }

    fn ensure_context(&self) -> Result<()> {
        if !self.context_live.get() {
            self.backend.create_context()?;
            self.context_live.set(true);
            info!("Created shared graphics context");
        }
        Ok(())
    }

    /// Create a draw surface in the shared context
    pub fn create_surface(&self, size: PixelSize, scaling: f64) -> Result<DrawSurface> {
        self.ensure_context()?;
        let target = self.backend.create_render_target(size)?;
        debug!(
            "Created draw surface {}x{} @ {}",
            size.width, size.height, scaling
        );
        Ok(DrawSurface::new(target, scaling))
    }
}

impl fmt::Debug for PlatformGraphics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlatformGraphics")
            .field("refs", &self.refs.get())
            .field("context_live", &self.context_live.get())
            .finish()
    }
}

/// One reference on the shared context, released on drop
#[derive(Debug)]
pub struct GraphicsLease {
    graphics: Rc<PlatformGraphics>,
}

impl GraphicsLease {
    /// The graphics owner this lease refers to
    pub fn graphics(&self) -> &Rc<PlatformGraphics> {
        &self.graphics
    }
}

impl Drop for GraphicsLease {
    fn drop(&mut self) {
        self.graphics.release();
    }
}

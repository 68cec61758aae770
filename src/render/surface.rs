//! Draw surfaces
//!
//! A window owns at most one draw surface at a time. A pixel size change
//! drops the old surface right away and the next access creates a new
//! one; a scaling change alone rescales the existing surface in place.

use std::fmt;

use log::debug;

use super::{GraphicsLease, RenderTarget, TextureId};
use crate::error::{BridgeError, Result};
use crate::geometry::{PixelSize, Size};
use crate::window::WindowResizeReason;

/// GPU-backed render target for one window at one size
pub struct DrawSurface {
    target: Box<dyn RenderTarget>,
    scaling: f64,
}

impl DrawSurface {
    pub(crate) fn new(target: Box<dyn RenderTarget>, scaling: f64) -> Self {
        Self { target, scaling }
    }

    pub fn pixel_size(&self) -> PixelSize {
        self.target.pixel_size()
    }

    pub fn scaling(&self) -> f64 {
        self.scaling
    }

    pub fn set_scaling(&mut self, scaling: f64) {
        self.scaling = scaling;
    }

    pub fn texture(&self) -> TextureId {
        self.target.texture()
    }

    pub fn target_mut(&mut self) -> &mut dyn RenderTarget {
        self.target.as_mut()
    }

    /// Hand the rendered frame to the host
    pub fn flush(&mut self) {
        self.target.flush();
    }
}

impl fmt::Debug for DrawSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DrawSurface")
            .field("pixel_size", &self.pixel_size())
            .field("scaling", &self.scaling)
            .field("texture", &self.texture())
            .finish()
    }
}

/// Notifications produced by a render size update
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RenderSizeChange {
    /// New scaling, when it changed
    pub scaling_changed: Option<f64>,
    /// New client size and reason, when the logical size changed
    pub resized: Option<(Size, WindowResizeReason)>,
}

impl RenderSizeChange {
    /// Whether nothing needs to be reported
    pub fn is_empty(&self) -> bool {
        self.scaling_changed.is_none() && self.resized.is_none()
    }
}

/// Render size, scaling and surface state of one window
#[derive(Debug)]
pub struct SurfaceSlot {
    lease: Option<GraphicsLease>,
    surface: Option<DrawSurface>,
    render_size: PixelSize,
    scaling: f64,
    client_size: Size,
}

impl SurfaceSlot {
    /// Create an empty slot holding a graphics lease
    pub fn new(lease: GraphicsLease, scaling: f64) -> Self {
        Self {
            lease: Some(lease),
            surface: None,
            render_size: PixelSize::default(),
            scaling,
            client_size: Size::default(),
        }
    }

    pub fn render_size(&self) -> PixelSize {
        self.render_size
    }

    pub fn scaling(&self) -> f64 {
        self.scaling
    }

    /// Logical size, `render_size / scaling` floored at zero
    pub fn client_size(&self) -> Size {
        self.client_size
    }

    /// The current surface, without creating one
    pub fn surface(&self) -> Option<&DrawSurface> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut DrawSurface> {
        self.surface.as_mut()
    }

    /// Dispose the current surface, if any
    pub fn discard_surface(&mut self) -> bool {
        self.surface.take().is_some()
    }

    /// Whether the slot has been released
    pub fn is_disposed(&self) -> bool {
        self.lease.is_none()
    }

    /// The current surface, created on demand
    pub fn get_or_create(&mut self) -> Result<&mut DrawSurface> {
        let Some(lease) = self.lease.as_ref() else {
            return Err(BridgeError::Disposed);
        };

        if self.render_size.is_empty() {
            return Err(BridgeError::EmptySurface);
        }

        if self.surface.is_none() {
            let surface = lease
                .graphics()
                .create_surface(self.render_size, self.scaling)?;
            self.surface = Some(surface);
        }

        self.surface.as_mut().ok_or(BridgeError::EmptySurface)
    }

    /// Update the pixel size and scaling, returning what to report
    pub fn set_render_size(&mut self, render_size: PixelSize, scaling: f64) -> RenderSizeChange {
        let scaling_changed = self.scaling != scaling;
        if self.render_size == render_size && !scaling_changed {
            return RenderSizeChange::default();
        }

        let old_client_size = self.client_size;
        self.client_size = render_size.to_size(scaling).floor_to_nonnegative();
        self.scaling = scaling;

        if self.render_size != render_size {
            self.render_size = render_size;
            if self.discard_surface() {
                debug!(
                    "Disposed draw surface for resize to {}x{}",
                    render_size.width, render_size.height
                );
            }
        }

        let mut change = RenderSizeChange::default();

        if scaling_changed {
            if let Some(surface) = self.surface.as_mut() {
                surface.set_scaling(scaling);
            }
            change.scaling_changed = Some(scaling);
        }

        if old_client_size != self.client_size {
            let reason = if scaling_changed {
                WindowResizeReason::DpiChange
            } else {
                WindowResizeReason::Unspecified
            };
            change.resized = Some((self.client_size, reason));
        }

        change
    }

    /// Dispose the surface, then release the graphics lease.
    ///
    /// Returns false when the slot was already released.
    pub fn release(&mut self) -> bool {
        self.surface = None;
        self.lease.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::backend::headless::HeadlessGraphics;
    use crate::render::PlatformGraphics;

    fn slot() -> (Rc<HeadlessGraphics>, SurfaceSlot) {
        let backend = Rc::new(HeadlessGraphics::new());
        let graphics = PlatformGraphics::new(backend.clone());
        (backend, SurfaceSlot::new(graphics.acquire(), 1.0))
    }

    #[test]
    fn test_resize_disposes_before_create() {
        let (backend, mut slot) = slot();

        slot.set_render_size(PixelSize::new(800, 600), 1.0);
        slot.get_or_create().unwrap();
        assert_eq!(backend.live_targets(), 1);

        slot.set_render_size(PixelSize::new(1024, 768), 1.0);
        assert_eq!(backend.live_targets(), 0);
        assert!(slot.surface().is_none());

        let surface = slot.get_or_create().unwrap();
        assert_eq!(surface.pixel_size(), PixelSize::new(1024, 768));
        assert_eq!(backend.live_targets(), 1);
        assert_eq!(backend.max_live_targets(), 1);
        assert_eq!(backend.targets_created(), 2);
    }

    #[test]
    fn test_identical_size_is_noop() {
        let (_backend, mut slot) = slot();

        let first = slot.set_render_size(PixelSize::new(640, 480), 2.0);
        assert!(!first.is_empty());

        let second = slot.set_render_size(PixelSize::new(640, 480), 2.0);
        assert!(second.is_empty());
    }

    #[test]
    fn test_client_size_from_scaling() {
        let (_backend, mut slot) = slot();

        let change = slot.set_render_size(PixelSize::new(800, 450), 1.5);
        let client = slot.client_size();
        assert!((client.width - 800.0 / 1.5).abs() < 1e-9);
        assert_eq!(client.height, 300.0);
        assert_eq!(change.scaling_changed, Some(1.5));
        assert_eq!(
            change.resized.map(|(_, reason)| reason),
            Some(WindowResizeReason::DpiChange)
        );
    }

    #[test]
    fn test_scaling_change_keeps_surface() {
        let (backend, mut slot) = slot();

        slot.set_render_size(PixelSize::new(400, 400), 1.0);
        slot.get_or_create().unwrap();

        let change = slot.set_render_size(PixelSize::new(400, 400), 2.0);
        assert_eq!(change.scaling_changed, Some(2.0));
        assert_eq!(slot.surface().map(|s| s.scaling()), Some(2.0));
        assert_eq!(backend.targets_created(), 1);
    }

    #[test]
    fn test_resize_reason_unspecified() {
        let (_backend, mut slot) = slot();

        let change = slot.set_render_size(PixelSize::new(100, 50), 1.0);
        assert_eq!(change.scaling_changed, None);
        assert_eq!(
            change.resized,
            Some((Size::new(100.0, 50.0), WindowResizeReason::Unspecified))
        );
    }

    #[test]
    fn test_empty_surface() {
        let (_backend, mut slot) = slot();
        assert_eq!(slot.get_or_create().unwrap_err(), BridgeError::EmptySurface);
    }

    #[test]
    fn test_release_disposes() {
        let (backend, mut slot) = slot();

        slot.set_render_size(PixelSize::new(10, 10), 1.0);
        slot.get_or_create().unwrap();

        assert!(slot.release());
        assert!(!slot.release());
        assert_eq!(backend.live_targets(), 0);
        assert!(!backend.context_live());
        assert_eq!(slot.get_or_create().unwrap_err(), BridgeError::Disposed);
    }
}

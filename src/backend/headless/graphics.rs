//! In-memory graphics backend
//!
//! Render targets are CPU pixel buffers. The backend counts contexts and
//! targets so callers can check the surface lifecycle.

use std::any::Any;
use std::cell::Cell;
use std::rc::Rc;

use log::debug;

use crate::error::{BridgeError, Result};
use crate::geometry::PixelSize;
use crate::render::{GraphicsBackend, RenderTarget, TextureId};

#[derive(Debug, Default)]
struct Counters {
    contexts_created: Cell<u32>,
    context_live: Cell<bool>,
    targets_created: Cell<u32>,
    live_targets: Cell<usize>,
    max_live_targets: Cell<usize>,
    flushes: Cell<u32>,
}

/// CPU render target holding RGBA pixels
#[derive(Debug)]
pub struct HeadlessTarget {
    size: PixelSize,
    texture: TextureId,
    pixels: Vec<u8>,
    counters: Rc<Counters>,
}

impl HeadlessTarget {
    /// RGBA pixels, row major
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }
}

impl RenderTarget for HeadlessTarget {
    fn pixel_size(&self) -> PixelSize {
        self.size
    }

    fn texture(&self) -> TextureId {
        self.texture
    }

    fn flush(&mut self) {
        self.counters.flushes.set(self.counters.flushes.get() + 1);
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl Drop for HeadlessTarget {
    fn drop(&mut self) {
        let live = &self.counters.live_targets;
        live.set(live.get().saturating_sub(1));
    }
}

/// Graphics backend without a GPU
#[derive(Debug, Default)]
pub struct HeadlessGraphics {
    counters: Rc<Counters>,
    fail_context_creation: Cell<bool>,
    max_target_size: Cell<Option<PixelSize>>,
}

impl HeadlessGraphics {
    /// Create a new headless graphics backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Make context creation fail
    pub fn fail_context_creation(&self, fail: bool) {
        self.fail_context_creation.set(fail);
    }

    /// Reject render targets larger than `size` in either dimension
    pub fn set_max_target_size(&self, size: Option<PixelSize>) {
        self.max_target_size.set(size);
    }

    pub fn contexts_created(&self) -> u32 {
        self.counters.contexts_created.get()
    }

    pub fn context_live(&self) -> bool {
        self.counters.context_live.get()
    }

    pub fn targets_created(&self) -> u32 {
        self.counters.targets_created.get()
    }

    /// Render targets not yet dropped
    pub fn live_targets(&self) -> usize {
        self.counters.live_targets.get()
    }

    /// Most render targets that were ever alive at once
    pub fn max_live_targets(&self) -> usize {
        self.counters.max_live_targets.get()
    }

    pub fn flush_count(&self) -> u32 {
        self.counters.flushes.get()
    }
}

impl GraphicsBackend for HeadlessGraphics {
    fn create_context(&self) -> Result<()> {
        if self.fail_context_creation.get() {
            return Err(BridgeError::GraphicsUnavailable(
                "context creation disabled".to_string(),
            ));
        }

        let counters = &self.counters;
        counters.contexts_created.set(counters.contexts_created.get() + 1);
        counters.context_live.set(true);
        debug!("Created headless graphics context");
        Ok(())
    }

    fn destroy_context(&self) {
        self.counters.context_live.set(false);
        debug!("Destroyed headless graphics context");
    }

    fn create_render_target(&self, size: PixelSize) -> Result<Box<dyn RenderTarget>> {
        if !self.counters.context_live.get() {
            return Err(BridgeError::GraphicsUnavailable(
                "no graphics context".to_string(),
            ));
        }

        if let Some(max) = self.max_target_size.get() {
            if size.width > max.width || size.height > max.height {
                return Err(BridgeError::SurfaceCreation(format!(
                    "{}x{} exceeds the maximum of {}x{}",
                    size.width, size.height, max.width, max.height
                )));
            }
        }

        let counters = &self.counters;
        let created = counters.targets_created.get() + 1;
        counters.targets_created.set(created);
        let live = counters.live_targets.get() + 1;
        counters.live_targets.set(live);
        counters
            .max_live_targets
            .set(counters.max_live_targets.get().max(live));

        Ok(Box::new(HeadlessTarget {
            size,
            texture: TextureId(created as u64),
            pixels: vec![0; size.width as usize * size.height as usize * 4],
            counters: counters.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_targets_need_context() {
        let graphics = HeadlessGraphics::new();
        assert!(graphics.create_render_target(PixelSize::new(1, 1)).is_err());

        graphics.create_context().unwrap();
        let mut target = graphics.create_render_target(PixelSize::new(2, 3)).unwrap();
        assert_eq!(target.pixel_size(), PixelSize::new(2, 3));

        let headless = target
            .as_any_mut()
            .downcast_mut::<HeadlessTarget>()
            .unwrap();
        assert_eq!(headless.pixels().len(), 24);
    }

    #[test]
    fn test_live_target_tracking() {
        let graphics = HeadlessGraphics::new();
        graphics.create_context().unwrap();

        let first = graphics.create_render_target(PixelSize::new(1, 1)).unwrap();
        let second = graphics.create_render_target(PixelSize::new(1, 1)).unwrap();
        assert_ne!(first.texture(), second.texture());
        assert_eq!(graphics.live_targets(), 2);

        drop(first);
        drop(second);
        assert_eq!(graphics.live_targets(), 0);
        assert_eq!(graphics.max_live_targets(), 2);
        assert_eq!(graphics.targets_created(), 2);
    }

    #[test]
    fn test_max_target_size() {
        let graphics = HeadlessGraphics::new();
        graphics.create_context().unwrap();
        graphics.set_max_target_size(Some(PixelSize::new(10, 10)));

        assert!(matches!(
            graphics.create_render_target(PixelSize::new(11, 1)),
            Err(BridgeError::SurfaceCreation(_))
        ));
        assert!(graphics.create_render_target(PixelSize::new(10, 10)).is_ok());
    }
}

//! Toolkit callback slots
//!
//! A slot is taken out while its callback runs, so a callback may freely
//! call back into the bridge, replace itself, or clear itself. A nested
//! notification of the same slot is queued and delivered once the running
//! call returns; a nested query is skipped.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;

use log::debug;

use super::{WindowCloseReason, WindowResizeReason, WindowState, WindowTransparencyLevel};
use crate::geometry::{PixelPoint, Rect, Size};
use crate::input::RawInputEvent;

/// One optional toolkit callback
pub struct Callback<F: ?Sized> {
    slot: RefCell<Option<Box<F>>>,
    generation: Cell<u64>,
    running: Cell<bool>,
    pending: RefCell<VecDeque<Box<dyn FnOnce(&mut F)>>>,
}

impl<F: ?Sized> Callback<F> {
    /// Create an empty slot
    pub fn new() -> Self {
        Self {
            slot: RefCell::new(None),
            generation: Cell::new(0),
            running: Cell::new(false),
            pending: RefCell::new(VecDeque::new()),
        }
    }

    /// Install a callback, replacing any previous one
    pub fn set(&self, callback: Box<F>) {
        self.replace(Some(callback));
    }

    /// Remove the callback
    pub fn clear(&self) {
        self.replace(None);
    }

    fn replace(&self, callback: Option<Box<F>>) {
        self.generation.set(self.generation.get() + 1);
        *self.slot.borrow_mut() = callback;
    }

    pub fn is_set(&self) -> bool {
        self.slot.borrow().is_some()
    }

    /// Run the callback if one is installed and not already running
    pub(crate) fn with<R>(&self, call: impl FnOnce(&mut F) -> R) -> Option<R> {
        if self.running.get() {
            return None;
        }
        let mut callback = self.slot.borrow_mut().take()?;
        let generation = self.generation.get();

        self.running.set(true);
        let result = call(&mut callback);
        self.running.set(false);

        // Put it back unless it was replaced or cleared while running
        if self.generation.get() == generation {
            *self.slot.borrow_mut() = Some(callback);
        }

        loop {
            let next = self.pending.borrow_mut().pop_front();
            let Some(queued) = next else {
                break;
            };
            self.with(queued);
        }
        Some(result)
    }

    /// Deliver a notification. If the callback is already running, the
    /// notification is queued and delivered, in order, after it returns.
    pub(crate) fn notify(&self, call: impl FnOnce(&mut F) + 'static) {
        if self.running.get() {
            debug!("Queued nested callback notification");
            self.pending.borrow_mut().push_back(Box::new(call));
            return;
        }
        self.with(call);
    }

    /// Number of queued notifications
    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }
}

impl<F: ?Sized> Default for Callback<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: ?Sized> fmt::Debug for Callback<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.is_set() { "Callback(set)" } else { "Callback(unset)" })
    }
}

/// Notifications the toolkit receives from one window
#[derive(Debug, Default)]
pub struct WindowCallbacks {
    /// Render the given region of the client area
    pub paint: Callback<dyn FnMut(Rect)>,
    pub resized: Callback<dyn FnMut(Size, WindowResizeReason)>,
    pub closed: Callback<dyn FnMut()>,
    /// Deliver one raw input event; the toolkit marks it handled in place
    pub input: Callback<dyn FnMut(&mut RawInputEvent)>,
    pub activated: Callback<dyn FnMut()>,
    pub deactivated: Callback<dyn FnMut()>,
    pub lost_focus: Callback<dyn FnMut()>,
    pub scaling_changed: Callback<dyn FnMut(f64)>,
    pub transparency_level_changed: Callback<dyn FnMut(WindowTransparencyLevel)>,
    pub window_state_changed: Callback<dyn FnMut(WindowState)>,
    pub position_changed: Callback<dyn FnMut(PixelPoint)>,
    /// Asked before closing; returning false keeps the window open
    pub closing: Callback<dyn FnMut(WindowCloseReason) -> bool>,
    pub extend_client_area_changed: Callback<dyn FnMut(bool)>,
}

impl WindowCallbacks {
    /// Create a set of empty callbacks
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;

    #[test]
    fn test_unset_callback_is_skipped() {
        let callback: Callback<dyn FnMut(u32) -> u32> = Callback::new();
        assert_eq!(callback.with(|f| f(1)), None);
    }

    #[test]
    fn test_callback_runs() {
        let callback: Callback<dyn FnMut(u32) -> u32> = Callback::new();
        callback.set(Box::new(|x| x * 2));
        assert_eq!(callback.with(|f| f(21)), Some(42));
        assert!(callback.is_set());
    }

    #[test]
    fn test_callback_can_clear_itself() {
        let callback: Rc<Callback<dyn FnMut()>> = Rc::new(Callback::new());
        let slot = Rc::downgrade(&callback);
        callback.set(Box::new(move || {
            if let Some(slot) = slot.upgrade() {
                slot.clear();
            }
        }));

        callback.with(|f| f());
        assert!(!callback.is_set());
    }

    #[test]
    fn test_nested_invocation_skipped() {
        let callback: Rc<Callback<dyn FnMut() -> u32>> = Rc::new(Callback::new());
        let slot = Rc::downgrade(&callback);
        callback.set(Box::new(move || {
            let nested = slot.upgrade().and_then(|slot| slot.with(|f| f()));
            assert_eq!(nested, None);
            7
        }));

        assert_eq!(callback.with(|f| f()), Some(7));
        assert!(callback.is_set());
    }

    #[test]
    fn test_nested_notification_delivered_after_outer() {
        let callback: Rc<Callback<dyn FnMut(u32)>> = Rc::new(Callback::new());
        let seen = Rc::new(RefCell::new(Vec::new()));

        let slot = Rc::downgrade(&callback);
        let log = seen.clone();
        callback.set(Box::new(move |value| {
            log.borrow_mut().push(value);
            if value == 1 {
                if let Some(slot) = slot.upgrade() {
                    slot.notify(|f| f(2));
                    slot.notify(|f| f(3));
                }
            }
        }));

        callback.notify(|f| f(1));
        assert_eq!(*seen.borrow(), vec![1, 2, 3]);
        assert_eq!(callback.pending(), 0);
        assert!(callback.is_set());
    }

    #[test]
    fn test_queued_notification_reaches_replacement() {
        let callback: Rc<Callback<dyn FnMut(u32)>> = Rc::new(Callback::new());
        let seen = Rc::new(RefCell::new(Vec::new()));

        let slot = Rc::downgrade(&callback);
        let log = seen.clone();
        callback.set(Box::new(move |_| {
            let Some(slot) = slot.upgrade() else {
                return;
            };
            let log = log.clone();
            slot.set(Box::new(move |value| log.borrow_mut().push(value)));
            slot.notify(|f| f(5));
        }));

        callback.notify(|f| f(0));
        assert_eq!(*seen.borrow(), vec![5]);
    }
}

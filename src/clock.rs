//! Render timer and frame clock
//!
//! The host renders frames; the toolkit renders on render timer ticks.
//! [`FrameClock`] turns host frames into ticks, at most one per frame no
//! matter how many windows report that frame.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use log::trace;

use crate::host::HostClock;

/// Handler called on every render tick with the host timestamp
pub type TickHandler = Rc<dyn Fn(Duration)>;

/// The toolkit's compositor, driven by render ticks
pub trait Compositor {
    fn on_render_tick(&self, elapsed: Duration);
}

/// Token for one render timer subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerSubscription(u64);

/// Render timer fanning ticks out to its subscribers
pub struct RenderTimer {
    handlers: RefCell<Vec<(TimerSubscription, TickHandler)>>,
    next_id: Cell<u64>,
    ticks: Cell<u64>,
    last_tick: Cell<Option<Duration>>,
}

impl RenderTimer {
    /// Create a new render timer
    pub fn new() -> Self {
        Self {
            handlers: RefCell::new(Vec::new()),
            next_id: Cell::new(1),
            ticks: Cell::new(0),
            last_tick: Cell::new(None),
        }
    }

    /// Subscribe a handler; ticks reach handlers in subscription order
    pub fn subscribe(&self, handler: TickHandler) -> TimerSubscription {
        let id = TimerSubscription(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.handlers.borrow_mut().push((id, handler));
        id
    }

    /// Subscribe a compositor
    pub fn subscribe_compositor(&self, compositor: Rc<dyn Compositor>) -> TimerSubscription {
        self.subscribe(Rc::new(move |elapsed| compositor.on_render_tick(elapsed)))
    }

    /// Remove a subscription; returns false if it was not subscribed
    pub fn unsubscribe(&self, subscription: TimerSubscription) -> bool {
        let mut handlers = self.handlers.borrow_mut();
        let before = handlers.len();
        handlers.retain(|(id, _)| *id != subscription);
        handlers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.handlers.borrow().len()
    }

    /// Number of ticks so far
    pub fn tick_count(&self) -> u64 {
        self.ticks.get()
    }

    /// Timestamp of the latest tick
    pub fn last_tick(&self) -> Option<Duration> {
        self.last_tick.get()
    }

    /// Advance the timer.
    ///
    /// Handlers see the subscriber list as it was when the tick started.
    pub fn tick(&self, elapsed: Duration) {
        self.ticks.set(self.ticks.get() + 1);
        self.last_tick.set(Some(elapsed));
        trace!("Render tick {} at {:?}", self.ticks.get(), elapsed);

        let handlers: Vec<TickHandler> = self
            .handlers
            .borrow()
            .iter()
            .map(|(_, handler)| Rc::clone(handler))
            .collect();

        for handler in handlers {
            handler(elapsed);
        }
    }
}

impl Default for RenderTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RenderTimer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderTimer")
            .field("subscribers", &self.subscriber_count())
            .field("ticks", &self.ticks.get())
            .finish()
    }
}

/// Drives the render timer from host frames
pub struct FrameClock {
    clock: Rc<dyn HostClock>,
    timer: Rc<RenderTimer>,
    last_frame: Cell<Option<u64>>,
}

impl FrameClock {
    /// Create a new frame clock
    pub fn new(clock: Rc<dyn HostClock>, timer: Rc<RenderTimer>) -> Self {
        Self {
            clock,
            timer,
            last_frame: Cell::new(None),
        }
    }

    /// Report a host frame. Returns whether the render timer ticked.
    pub fn on_host_frame(&self, frame: u64) -> bool {
        if self.last_frame.get() == Some(frame) {
            return false;
        }
        self.last_frame.set(Some(frame));

        let elapsed = Duration::from_micros(self.clock.ticks_usec());
        self.timer.tick(elapsed);
        true
    }

    pub fn last_frame(&self) -> Option<u64> {
        self.last_frame.get()
    }

    pub fn timer(&self) -> &Rc<RenderTimer> {
        &self.timer
    }
}

impl fmt::Debug for FrameClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameClock")
            .field("last_frame", &self.last_frame.get())
            .field("timer", &self.timer)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::headless::HeadlessHost;

    fn frame_clock() -> (Rc<HeadlessHost>, FrameClock) {
        let host = Rc::new(HeadlessHost::new());
        let clock = FrameClock::new(host.clone(), Rc::new(RenderTimer::new()));
        (host, clock)
    }

    #[test]
    fn test_same_frame_ticks_once() {
        let (_host, clock) = frame_clock();

        assert!(clock.on_host_frame(7));
        assert!(!clock.on_host_frame(7));
        assert_eq!(clock.timer().tick_count(), 1);

        assert!(clock.on_host_frame(8));
        assert_eq!(clock.timer().tick_count(), 2);
    }

    #[test]
    fn test_tick_uses_host_clock() {
        let (host, clock) = frame_clock();
        host.advance(Duration::from_micros(16_667));

        clock.on_host_frame(1);
        assert_eq!(
            clock.timer().last_tick(),
            Some(Duration::from_micros(16_667))
        );
    }

    #[test]
    fn test_fan_out_in_order() {
        let timer = RenderTimer::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        for name in ["compositor", "window"] {
            let seen = seen.clone();
            timer.subscribe(Rc::new(move |_| seen.borrow_mut().push(name)));
        }

        timer.tick(Duration::ZERO);
        assert_eq!(*seen.borrow(), vec!["compositor", "window"]);
    }

    #[test]
    fn test_unsubscribe() {
        let timer = RenderTimer::new();
        let count = Rc::new(Cell::new(0));

        let counter = count.clone();
        let subscription = timer.subscribe(Rc::new(move |_| counter.set(counter.get() + 1)));

        timer.tick(Duration::ZERO);
        assert!(timer.unsubscribe(subscription));
        assert!(!timer.unsubscribe(subscription));
        timer.tick(Duration::ZERO);

        assert_eq!(count.get(), 1);
        assert_eq!(timer.subscriber_count(), 0);
    }

    #[test]
    fn test_unsubscribe_during_tick() {
        let timer = Rc::new(RenderTimer::new());
        let subscription = Rc::new(Cell::new(None));

        let weak = Rc::downgrade(&timer);
        let own = subscription.clone();
        let id = timer.subscribe(Rc::new(move |_| {
            if let (Some(timer), Some(id)) = (weak.upgrade(), own.get()) {
                timer.unsubscribe(id);
            }
        }));
        subscription.set(Some(id));

        timer.tick(Duration::ZERO);
        assert_eq!(timer.subscriber_count(), 0);
    }

    struct CountingCompositor(Cell<u32>);

    impl Compositor for CountingCompositor {
        fn on_render_tick(&self, _elapsed: Duration) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn test_compositor_subscription() {
        let timer = RenderTimer::new();
        let compositor = Rc::new(CountingCompositor(Cell::new(0)));
        timer.subscribe_compositor(compositor.clone());

        timer.tick(Duration::ZERO);
        timer.tick(Duration::ZERO);
        assert_eq!(compositor.0.get(), 2);
    }
}

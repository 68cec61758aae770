//! Event loop integration
//!
//! A calloop loop standing in for the host's main loop: a repeating timer
//! produces numbered frames.

use std::time::Duration;

use calloop::timer::{TimeoutAction, Timer};
use calloop::{EventLoop as CalLoop, LoopHandle, LoopSignal, RegistrationToken};
use log::{debug, error};

/// Host loop wrapper
pub struct EventLoop {
    /// Calloop event loop
    event_loop: CalLoop<'static, ()>,
    /// Loop signal for waking/stopping
    signal: LoopSignal,
}

impl EventLoop {
    /// Create a new event loop
    pub fn new() -> anyhow::Result<Self> {
        let event_loop = CalLoop::try_new()?;
        let signal = event_loop.get_signal();

        Ok(Self { event_loop, signal })
    }

    /// Get a handle to register event sources
    pub fn handle(&self) -> LoopHandle<'static, ()> {
        self.event_loop.handle()
    }

    /// Get the loop signal for waking
    pub fn signal(&self) -> LoopSignal {
        self.signal.clone()
    }

    /// Call `on_frame` every `interval` with an increasing frame number,
    /// starting at 1, until it returns false
    pub fn add_frame_timer(
        &self,
        interval: Duration,
        mut on_frame: impl FnMut(u64) -> bool + 'static,
    ) -> anyhow::Result<RegistrationToken> {
        let mut frame = 0u64;
        let token = self
            .event_loop
            .handle()
            .insert_source(Timer::from_duration(interval), move |_, _, _| {
                frame += 1;
                if on_frame(frame) {
                    TimeoutAction::ToDuration(interval)
                } else {
                    debug!("Frame timer stopped after frame {}", frame);
                    TimeoutAction::Drop
                }
            })
            .map_err(|e| anyhow::anyhow!("Failed to add frame timer: {}", e.error))?;

        debug!("Frame timer added with interval {:?}", interval);
        Ok(token)
    }

    /// Run one iteration of the event loop
    pub fn dispatch(&mut self, timeout: Option<Duration>) -> anyhow::Result<()> {
        self.event_loop.dispatch(timeout, &mut ())?;
        Ok(())
    }

    /// Run the event loop until stopped
    pub fn run(&mut self) -> anyhow::Result<()> {
        debug!("Starting event loop");

        if let Err(e) = self.event_loop.run(None::<Duration>, &mut (), |_| {}) {
            error!("Event loop error: {}", e);
            return Err(e.into());
        }

        debug!("Event loop stopped");
        Ok(())
    }

    /// Stop the event loop
    pub fn stop(&self) {
        self.signal.stop();
    }

    /// Wake the event loop from another thread
    pub fn wake(&self) {
        self.signal.wakeup();
    }
}

//! Scheduler: timed suspension points and cancellation.
//!
//! A run only ever waits on a timer. Putting that wait behind [`Scheduler`]
//! lets tests replay an animation on a [`VirtualClock`] in microseconds,
//! while [`ThreadScheduler`] sleeps for real and wakes early on cancellation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Shared flag asking an in-flight run to stop at its next suspension point.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a token that is not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Check if cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// A suspension was interrupted by cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("suspension interrupted by cancellation")]
pub struct Cancelled;

/// Source of timed suspensions.
pub trait Scheduler {
    /// Suspend for `duration`, returning early with [`Cancelled`] once
    /// `cancel` is set. A cancelled token fails even zero-length sleeps.
    fn sleep(&mut self, duration: Duration, cancel: &CancelToken) -> Result<(), Cancelled>;
}

impl<S: Scheduler + ?Sized> Scheduler for &mut S {
    fn sleep(&mut self, duration: Duration, cancel: &CancelToken) -> Result<(), Cancelled> {
        (**self).sleep(duration, cancel)
    }
}

/// Sleeps the current thread, polling the cancel token.
#[derive(Debug, Clone, Copy)]
pub struct ThreadScheduler {
    /// Longest single sleep between cancellation checks.
    granularity: Duration,
}

impl Default for ThreadScheduler {
    fn default() -> Self {
        Self::new(Duration::from_millis(5))
    }
}

impl ThreadScheduler {
    /// Create a scheduler checking for cancellation at least every `granularity`.
    pub fn new(granularity: Duration) -> Self {
        Self {
            granularity: granularity.max(Duration::from_micros(100)),
        }
    }
}

impl Scheduler for ThreadScheduler {
    fn sleep(&mut self, duration: Duration, cancel: &CancelToken) -> Result<(), Cancelled> {
        // A deadline past the clock's range means "until cancelled".
        let deadline = Instant::now().checked_add(duration);
        loop {
            if cancel.is_cancelled() {
                return Err(Cancelled);
            }
            let slice = match deadline {
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        return Ok(());
                    }
                    (deadline - now).min(self.granularity)
                }
                None => self.granularity,
            };
            thread::sleep(slice);
        }
    }
}

/// Scheduler that never waits; it only advances a virtual clock.
#[derive(Debug, Clone, Default)]
pub struct VirtualClock {
    now: Duration,
    sleeps: Vec<Duration>,
}

impl VirtualClock {
    /// Create a clock at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed so far.
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// Every suspension requested, in order.
    pub fn sleeps(&self) -> &[Duration] {
        &self.sleeps
    }
}

impl Scheduler for VirtualClock {
    fn sleep(&mut self, duration: Duration, cancel: &CancelToken) -> Result<(), Cancelled> {
        if cancel.is_cancelled() {
            return Err(Cancelled);
        }
        self.now = self.now.saturating_add(duration);
        self.sleeps.push(duration);
        Ok(())
    }
}

use std::time::Duration;

use tokio::time::Instant;

pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(500);

/// Trailing-edge debouncer driven by explicit timestamps.
///
/// Every `push` replaces the pending value and restarts the quiet period, so
/// only the most recent value can ever be released by `poll`.
#[derive(Debug)]
pub struct Debouncer<T> {
    quiet: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(quiet: Duration) -> Self {
        Self { quiet, pending: None }
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet
    }

    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.quiet));
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending value becomes due, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, at)| *at)
    }

    /// Release the pending value once its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match self.pending.take() {
            Some((value, at)) if now >= at => Some(value),
            other => {
                self.pending = other;
                None
            }
        }
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET_PERIOD)
    }
}

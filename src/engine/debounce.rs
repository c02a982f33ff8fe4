use std::time::{Duration, Instant};

pub const SEARCH_QUIET: Duration = Duration::from_millis(300);
pub const SLIDER_QUIET: Duration = Duration::from_millis(200);

/// A value that only takes effect once its raw input has been stable for
/// the quiet window. Time is passed in by the caller.
#[derive(Debug, Clone)]
pub struct Debounced<T> {
    settled: T,
    pending: Option<(T, Instant)>,
    quiet: Duration,
}

impl<T: Clone + PartialEq> Debounced<T> {
    pub fn new(initial: T, quiet: Duration) -> Self {
        Self {
            settled: initial,
            pending: None,
            quiet,
        }
    }

    pub fn value(&self) -> &T {
        &self.settled
    }

    /// Each call restarts the quiet window.
    pub fn set(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now));
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, since)| *since + self.quiet)
    }

    /// Promotes the pending value once the window has elapsed. Returns true
    /// when the settled value actually changed.
    pub fn settle(&mut self, now: Instant) -> bool {
        match self.deadline() {
            Some(deadline) if now >= deadline => {}
            _ => return false,
        }

        match self.pending.take() {
            Some((value, _)) if value != self.settled => {
                self.settled = value;
                true
            }
            _ => false,
        }
    }

    /// Bypasses the window, e.g. for a "reset filters" action.
    pub fn force(&mut self, value: T) -> bool {
        self.pending = None;
        if value == self.settled {
            return false;
        }
        self.settled = value;
        true
    }
}

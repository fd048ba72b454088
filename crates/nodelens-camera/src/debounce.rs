use std::time::Duration;

/// Coalesces repeated writes into one delayed write.
///
/// Each [`schedule`](Self::schedule) replaces the pending payload and pushes the deadline to
/// `now + interval`; [`poll`](Self::poll) hands the payload out once the deadline has passed.
/// Time is supplied by the caller, so the debouncer itself never blocks or spawns.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    interval: Duration,
    pending: Option<Pending<T>>,
}

#[derive(Debug, Clone)]
struct Pending<T> {
    payload: T,
    deadline: Duration,
}

impl<T> Debouncer<T> {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            pending: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn schedule(&mut self, payload: T, now: Duration) {
        self.pending = Some(Pending {
            payload,
            deadline: now + self.interval,
        });
    }

    /// Drops the pending payload, returning it if there was one.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.payload)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    pub fn peek(&self) -> Option<&T> {
        self.pending.as_ref().map(|p| &p.payload)
    }

    /// Takes the payload if its quiet period has elapsed at `now`.
    pub fn poll(&mut self, now: Duration) -> Option<T> {
        if self.pending.as_ref().is_some_and(|p| now >= p.deadline) {
            self.cancel()
        } else {
            None
        }
    }

    /// Takes the payload regardless of the deadline.
    pub fn flush(&mut self) -> Option<T> {
        self.cancel()
    }
}

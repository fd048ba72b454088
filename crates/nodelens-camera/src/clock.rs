use quanta::{Clock, Mock};
use std::sync::Arc;
use std::time::Duration;

/// Monotonic clock driving the debounce timer.
///
/// Clones share the same time source, mocked or not.
#[derive(Clone, Debug)]
pub struct ViewClock {
    inner: Clock,
    ref_time: quanta::Instant,
}

/// Handle advancing every clone of a mocked [`ViewClock`].
#[derive(Clone, Debug)]
pub struct ViewClockMock(Arc<Mock>);

impl ViewClockMock {
    pub fn increment(&self, amount: Duration) {
        self.0.increment(amount);
    }

    /// Advances to `at` past the reference time; earlier values are ignored so the clock stays
    /// monotonic.
    pub fn advance_to(&self, at: Duration) {
        let now = Duration::from_nanos(self.0.value());
        if at > now {
            self.increment(at - now);
        }
    }
}

impl ViewClock {
    pub fn new() -> Self {
        let inner = Clock::new();
        let ref_time = inner.now();
        Self { inner, ref_time }
    }

    /// A clock starting at zero that only moves when the returned mock says so.
    pub fn mock() -> (Self, ViewClockMock) {
        let (inner, mock) = Clock::mock();
        let ref_time = inner.now();
        (Self { inner, ref_time }, ViewClockMock(mock))
    }

    /// Time elapsed since the clock was created.
    pub fn now(&self) -> Duration {
        self.inner.now().duration_since(self.ref_time)
    }
}

impl Default for ViewClock {
    fn default() -> Self {
        Self::new()
    }
}

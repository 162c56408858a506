use std::time::Duration;

/// A result value paired with the measured wall-clock duration of the
/// retried store invocation that produced it. Pre-flight validation and
/// rate-limit waits are not included.
#[derive(Debug, Clone, PartialEq)]
pub struct TimedResult<T> {
    duration: Duration,
    value: T,
}

impl<T> TimedResult<T> {
    pub fn new(duration: Duration, value: T) -> Self {
        Self { duration, value }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    /// Split into the (duration, value) pair
    pub fn into_parts(self) -> (Duration, T) {
        (self.duration, self.value)
    }
}

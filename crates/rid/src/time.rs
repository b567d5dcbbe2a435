use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Reference epoch: Monday, January 1, 2018 00:00:00 UTC
pub const EPOCH: Duration = Duration::from_secs(1_514_764_800);

/// A trait for time sources that return nanoseconds elapsed since [`EPOCH`].
///
/// This abstraction allows you to plug in the system clock or a mocked time
/// source in tests.
///
/// # Example
///
/// ```
/// use rid::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn current_nanos(&self) -> u64 {
///         1234
///     }
/// }
///
/// let time = FixedTime;
/// assert_eq!(time.current_nanos(), 1234);
/// ```
pub trait TimeSource {
    /// Returns the current time in nanoseconds since [`EPOCH`].
    fn current_nanos(&self) -> u64;
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn current_nanos(&self) -> u64 {
        (**self).current_nanos()
    }
}

/// Wall-clock time source backed by [`SystemTime`].
///
/// A wall clock set before [`EPOCH`] reads as zero rather than failing.
#[derive(Default, Clone, Copy, Debug)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn current_nanos(&self) -> u64 {
        nanos_since_epoch(SystemTime::now())
    }
}

/// Nanoseconds between [`EPOCH`] and `at`, saturating at both ends.
#[must_use]
pub fn nanos_since_epoch(at: SystemTime) -> u64 {
    at.duration_since(UNIX_EPOCH + EPOCH)
        .map_or(0, |elapsed| u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX))
}

/// Inverse of [`nanos_since_epoch`].
#[must_use]
pub fn time_from_nanos(nanos: u64) -> SystemTime {
    UNIX_EPOCH + EPOCH + Duration::from_nanos(nanos)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_is_2018() {
        assert_eq!(nanos_since_epoch(UNIX_EPOCH + EPOCH), 0);
        assert_eq!(time_from_nanos(0), UNIX_EPOCH + EPOCH);
    }

    #[test]
    fn before_epoch_saturates() {
        assert_eq!(nanos_since_epoch(UNIX_EPOCH), 0);
    }

    #[test]
    fn system_clock_is_after_epoch() {
        let nanos = SystemClock.current_nanos();
        assert!(nanos > 0);
        let back = time_from_nanos(nanos);
        let drift = SystemTime::now().duration_since(back).unwrap_or_default();
        assert!(drift < Duration::from_secs(1));
    }
}

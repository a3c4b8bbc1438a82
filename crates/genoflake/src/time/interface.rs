use core::time::Duration;
use std::sync::Arc;

/// Snowflake epoch: Tuesday, July 25, 2023 00:00:00 UTC
pub const EPOCH: Duration = Duration::from_millis(1_690_243_200_000);

/// [`EPOCH`] in milliseconds since the Unix epoch.
pub const EPOCH_MILLIS: i64 = EPOCH.as_millis() as i64;

/// A source of timestamps in milliseconds since [`EPOCH`].
///
/// Values may be negative or move backward; the generator decides how to
/// treat them. Plugging in a fixed or stepping clock makes generation
/// deterministic in tests.
///
/// # Example
///
/// ```
/// use genoflake::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn current_millis(&self) -> i64 {
///         1234
///     }
/// }
///
/// assert_eq!(FixedTime.current_millis(), 1234);
/// ```
pub trait TimeSource {
    /// Returns the current time in milliseconds since [`EPOCH`].
    fn current_millis(&self) -> i64;
}

impl<T: TimeSource + ?Sized> TimeSource for Arc<T> {
    fn current_millis(&self) -> i64 {
        (**self).current_millis()
    }
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn current_millis(&self) -> i64 {
        (**self).current_millis()
    }
}

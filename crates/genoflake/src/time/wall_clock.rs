use std::time::{SystemTime, UNIX_EPOCH};

use crate::{EPOCH_MILLIS, TimeSource};

/// The system wall clock, offset to [`EPOCH`](crate::EPOCH).
///
/// Wall time can step backward under NTP corrections; see
/// [`ClockPolicy`](crate::ClockPolicy) for how a node reacts.
#[derive(Clone, Copy, Debug, Default)]
pub struct WallClock;

impl TimeSource for WallClock {
    fn current_millis(&self) -> i64 {
        let unix_millis = match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(since) => since.as_millis() as i64,
            Err(before) => -(before.duration().as_millis() as i64),
        };
        unix_millis - EPOCH_MILLIS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_constant() {
        assert_eq!(EPOCH_MILLIS, 1_690_243_200_000);
        let epoch = chrono::DateTime::from_timestamp_millis(EPOCH_MILLIS).unwrap_or_default();
        assert_eq!(epoch.to_rfc3339(), "2023-07-25T00:00:00+00:00");
    }

    #[test]
    fn wall_clock_is_past_epoch() {
        let now = WallClock.current_millis();
        assert!(now > 0);
        assert!(now <= crate::SnowflakeId::TIMESTAMP_MASK);
    }
}

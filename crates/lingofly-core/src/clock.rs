//! Clock abstraction for deterministic scheduling.
//!
//! Visual actions and the audio watchdog are expressed as offsets from a
//! point in time read through [`Clock`]. Production code uses
//! [`SystemClock`]; tests inject a clock they can move by hand.

use chrono::{DateTime, TimeDelta, Utc};

/// Abstraction over system time for deterministic behavior.
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock that delegates to the system clock.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Converts a non-negative offset in seconds into a millisecond-resolution
/// `TimeDelta`. Negative or non-finite input yields zero.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn offset_from_secs(secs: f64) -> TimeDelta {
    if !secs.is_finite() || secs <= 0.0 {
        return TimeDelta::zero();
    }
    TimeDelta::milliseconds((secs * 1000.0).round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_from_secs_rounds_to_milliseconds() {
        assert_eq!(offset_from_secs(0.5), TimeDelta::milliseconds(500));
        assert_eq!(offset_from_secs(1.0), TimeDelta::seconds(1));
        assert_eq!(offset_from_secs(0.0004), TimeDelta::zero());
    }

    #[test]
    fn test_offset_from_secs_clamps_invalid_input_to_zero() {
        assert_eq!(offset_from_secs(-2.0), TimeDelta::zero());
        assert_eq!(offset_from_secs(f64::NAN), TimeDelta::zero());
        assert_eq!(offset_from_secs(f64::INFINITY), TimeDelta::zero());
    }
}

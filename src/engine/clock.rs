//! Run timing.
//!
//! Elapsed time is measured on the tokio clock so that paused-time tests
//! observe exactly the pacing delays that were awaited.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tokio::time::Instant;

/// Wall-clock duration of one run.
///
/// Displays as seconds with exactly two decimals, e.g. `"1.23 s"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElapsedTime(Duration);

impl ElapsedTime {
    /// The reset baseline.
    pub const ZERO: Self = Self(Duration::ZERO);

    /// Wrap a duration.
    #[must_use]
    pub const fn new(duration: Duration) -> Self {
        Self(duration)
    }

    /// Underlying duration.
    #[must_use]
    pub const fn as_duration(&self) -> Duration {
        self.0
    }

    /// Elapsed seconds as a float.
    #[must_use]
    pub fn as_secs_f64(&self) -> f64 {
        self.0.as_secs_f64()
    }
}

impl fmt::Display for ElapsedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} s", self.as_secs_f64())
    }
}

/// Stopwatch started when a run enters `Running`.
#[derive(Debug, Clone, Copy)]
pub struct RunClock {
    started: Instant,
}

impl RunClock {
    /// Start measuring now.
    #[must_use]
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    /// Time since `start`. Never negative.
    #[must_use]
    pub fn elapsed(&self) -> ElapsedTime {
        ElapsedTime(self.started.elapsed())
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: display always has exactly two fractional digits and a unit.
        #[test]
        fn prop_display_two_decimals(millis in 0u64..10_000_000) {
            let text = ElapsedTime::new(Duration::from_millis(millis)).to_string();
            prop_assert!(text.ends_with(" s"));
            let number = text.trim_end_matches(" s");
            let (whole, frac) = number.split_once('.').unwrap();
            prop_assert!(!whole.is_empty());
            prop_assert_eq!(frac.len(), 2);
            prop_assert!(number.parse::<f64>().unwrap() >= 0.0);
        }
    }
}

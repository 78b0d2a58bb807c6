use chrono::{DateTime, Utc};

/// Wall clock used to stamp attempts and submissions.
///
/// Frozen in tests so attempt durations and submission dates are predictable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Clock {
    #[default]
    System,
    Frozen(DateTime<Utc>),
}

impl Clock {
    #[must_use]
    pub fn system() -> Self {
        Self::System
    }

    #[must_use]
    pub fn frozen(at: DateTime<Utc>) -> Self {
        Self::Frozen(at)
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Self::System => Utc::now(),
            Self::Frozen(at) => *at,
        }
    }

    /// Whole seconds elapsed since `earlier`. A start in the future counts as zero.
    #[must_use]
    pub fn seconds_since(&self, earlier: DateTime<Utc>) -> u64 {
        u64::try_from((self.now() - earlier).num_seconds()).unwrap_or(0)
    }
}

/// 2023-11-14T22:13:20Z, the instant every frozen test clock reads.
pub const FIXED_TEST_TIMESTAMP: i64 = 1_700_000_000;

/// # Panics
///
/// Panics if [`FIXED_TEST_TIMESTAMP`] is out of chrono's range.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(FIXED_TEST_TIMESTAMP, 0)
        .expect("test timestamp within range")
}

#[must_use]
pub fn fixed_clock() -> Clock {
    Clock::frozen(fixed_now())
}

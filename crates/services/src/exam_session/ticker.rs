use std::time::Duration;

use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

/// Explicit start/stop handle for the once-per-second countdown beat.
///
/// The ticker owns its timer; dropping it (e.g. when the view holding the
/// session is torn down) releases the timer and no further ticks are produced.
pub struct CountdownTicker {
    interval: Interval,
    stopped: bool,
}

impl CountdownTicker {
    /// Start ticking every `period`. The first tick fires one period from now.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn start(period: Duration) -> Self {
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self {
            interval,
            stopped: false,
        }
    }

    #[must_use]
    pub fn every_second() -> Self {
        Self::start(Duration::from_secs(1))
    }

    /// Wait for the next tick. Returns `None` once the ticker has been stopped.
    pub async fn next_tick(&mut self) -> Option<Instant> {
        if self.stopped {
            return None;
        }
        Some(self.interval.tick().await)
    }

    pub fn stop(&mut self) {
        self.stopped = true;
    }

    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }
}

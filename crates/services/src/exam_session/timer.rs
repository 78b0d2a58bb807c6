/// Lifecycle of the session countdown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CountdownState {
    Running,
    /// Held while a manual submission is in flight.
    Paused,
    /// Reached zero. Terminal.
    Expired,
    /// Cancelled after a successful submission. Terminal.
    Stopped,
}

/// What a single tick did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CountdownTick {
    Running { remaining: u32 },
    /// The tick that took the countdown to zero. Emitted exactly once.
    Expired,
    /// The countdown was not running; nothing changed.
    Inactive,
}

/// Remaining-seconds countdown for an exam session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Countdown {
    remaining: u32,
    state: CountdownState,
}

impl Countdown {
    /// A zero-length countdown still runs and expires on its first tick.
    #[must_use]
    pub fn new(total_secs: u32) -> Self {
        Self {
            remaining: total_secs,
            state: CountdownState::Running,
        }
    }

    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    #[must_use]
    pub fn state(&self) -> CountdownState {
        self.state
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.state == CountdownState::Expired
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state == CountdownState::Running
    }

    pub fn tick(&mut self) -> CountdownTick {
        if self.state != CountdownState::Running {
            return CountdownTick::Inactive;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.state = CountdownState::Expired;
            CountdownTick::Expired
        } else {
            CountdownTick::Running {
                remaining: self.remaining,
            }
        }
    }

    pub fn pause(&mut self) {
        if self.state == CountdownState::Running {
            self.state = CountdownState::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.state == CountdownState::Paused {
            self.state = CountdownState::Running;
        }
    }

    pub fn stop(&mut self) {
        if matches!(self.state, CountdownState::Running | CountdownState::Paused) {
            self.state = CountdownState::Stopped;
        }
    }
}

//! Tick sources driving a session timer.
//!
//! The engine counts discrete ticks rather than wall-clock deltas, so any
//! implementation that delivers one nominal second per call satisfies the
//! contract. A scheduler that drifts (a throttled background process, say)
//! stretches the session rather than skipping time.

use std::thread;
use std::time::Duration;

/// A source of one-second ticks.
pub trait ClockSource {
    /// Block until the next tick boundary.
    fn next_tick(&mut self);
}

/// Wall-clock tick source with a fixed period.
#[derive(Debug)]
pub struct SystemClock {
    period: Duration,
}

impl SystemClock {
    /// One tick per second, the nominal session cadence.
    pub fn new() -> Self {
        Self {
            period: Duration::from_secs(1),
        }
    }

    /// Custom period, for demos and accelerated runs.
    pub fn with_period(period: Duration) -> Self {
        Self { period }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockSource for SystemClock {
    fn next_tick(&mut self) {
        thread::sleep(self.period);
    }
}

/// Manually advanced clock for deterministic tests.
///
/// `next_tick` returns immediately and records how many ticks it has handed
/// out, so tests never depend on real elapsed time.
#[derive(Debug, Default)]
pub struct ManualClock {
    delivered: u64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of ticks handed out so far.
    pub fn delivered(&self) -> u64 {
        self.delivered
    }
}

impl ClockSource for ManualClock {
    fn next_tick(&mut self) {
        self.delivered += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_counts_ticks() {
        let mut clock = ManualClock::new();
        assert_eq!(clock.delivered(), 0);
        clock.next_tick();
        clock.next_tick();
        assert_eq!(clock.delivered(), 2);
    }

    #[test]
    fn system_clock_sleeps_for_period() {
        let mut clock = SystemClock::with_period(Duration::from_millis(5));
        let before = std::time::Instant::now();
        clock.next_tick();
        assert!(before.elapsed() >= Duration::from_millis(5));
    }
}

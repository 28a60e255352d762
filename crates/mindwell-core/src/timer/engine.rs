//! Session timer engine.
//!
//! The engine is a tick-driven state machine. It does not own a thread or a
//! scheduler - a [`ClockSource`](super::ClockSource) (or any caller) delivers
//! one-second ticks via `on_tick()` while the session is running.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> (Paused | Completed)
//! Paused -> Running
//! Completed -> Running (restart only)
//! ```
//!
//! Elapsed time is counted in whole ticks, not wall-clock deltas: a 300
//! second session completes after exactly 300 ticks delivered while Running.
//!
//! ## Usage
//!
//! ```ignore
//! let mut timer = SessionTimer::new(&descriptor).with_notifier(notifier);
//! timer.start();
//! // Per clock tick:
//! timer.on_tick(); // Returns Some(Event::SessionCompleted) when done
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::events::Event;
use crate::registry::SessionDescriptor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Idle,
    Running,
    Paused,
    Completed,
}

/// Completion callback, invoked exactly once each time a session finishes.
pub type Notifier = Box<dyn FnMut() + Send>;

/// Core session timer.
///
/// One instance per open session view. All operations are total over state:
/// an operation invoked in a phase where it does not apply is a no-op rather
/// than an error, so rapid repeated input (a double-tapped play button)
/// cannot corrupt the timer or crash the view.
#[derive(Serialize, Deserialize)]
pub struct SessionTimer {
    session_id: String,
    /// Total duration in seconds, copied from the descriptor at construction.
    total_secs: u64,
    elapsed_secs: u64,
    phase: Phase,
    #[serde(skip)]
    notifier: Option<Notifier>,
}

impl SessionTimer {
    /// Create a timer for the given session, in the `Idle` phase at zero.
    pub fn new(descriptor: &SessionDescriptor) -> Self {
        Self {
            session_id: descriptor.id.clone(),
            total_secs: descriptor.total_secs,
            elapsed_secs: 0,
            phase: Phase::Idle,
            notifier: None,
        }
    }

    /// Register the completion callback. Replaces any previous one.
    pub fn with_notifier(mut self, notifier: Notifier) -> Self {
        self.notifier = Some(notifier);
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    pub fn total_secs(&self) -> u64 {
        self.total_secs
    }

    pub fn remaining_secs(&self) -> u64 {
        self.total_secs - self.elapsed_secs
    }

    /// 0.0 .. 1.0 fraction of the session elapsed.
    ///
    /// Recomputed on every read so it can never drift from `elapsed_secs`.
    /// A zero-length session reports 1.0 rather than dividing by zero.
    pub fn progress_ratio(&self) -> f64 {
        if self.total_secs == 0 {
            return 1.0;
        }
        self.elapsed_secs as f64 / self.total_secs as f64
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            phase: self.phase,
            session_id: self.session_id.clone(),
            elapsed_secs: self.elapsed_secs,
            remaining_secs: self.remaining_secs(),
            total_secs: self.total_secs,
            progress_ratio: self.progress_ratio(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin (from `Idle`) or resume (from `Paused`) consuming ticks.
    pub fn start(&mut self) -> Option<Event> {
        match self.phase {
            Phase::Idle | Phase::Paused => {
                // A zero-length session has nothing to tick through.
                if self.total_secs == 0 {
                    return Some(self.complete());
                }
                self.phase = Phase::Running;
                Some(Event::SessionStarted {
                    session_id: self.session_id.clone(),
                    total_secs: self.total_secs,
                    at: Utc::now(),
                })
            }
            // Completed is terminal until an explicit restart.
            Phase::Running | Phase::Completed => None,
        }
    }

    /// Freeze `elapsed_secs` at its current value.
    pub fn pause(&mut self) -> Option<Event> {
        match self.phase {
            Phase::Running => {
                self.phase = Phase::Paused;
                Some(Event::SessionPaused {
                    elapsed_secs: self.elapsed_secs,
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    /// Discard progress and return to `Idle`. Never notifies completion.
    pub fn stop(&mut self) -> Option<Event> {
        match self.phase {
            Phase::Idle => None,
            _ => {
                self.phase = Phase::Idle;
                self.elapsed_secs = 0;
                Some(Event::SessionStopped { at: Utc::now() })
            }
        }
    }

    /// Reset to zero and immediately begin running, from any phase.
    pub fn restart(&mut self) -> Option<Event> {
        self.elapsed_secs = 0;
        if self.total_secs == 0 {
            return Some(self.complete());
        }
        self.phase = Phase::Running;
        Some(Event::SessionRestarted {
            session_id: self.session_id.clone(),
            total_secs: self.total_secs,
            at: Utc::now(),
        })
    }

    /// Deliver one tick of simulated time.
    ///
    /// Ticks are only consumed while `Running`. A tick arriving in any other
    /// phase (a stray tick from a clock that outlived its session, or one
    /// racing a pause) is ignored without touching state.
    pub fn on_tick(&mut self) -> Option<Event> {
        if self.phase != Phase::Running {
            return None;
        }
        self.elapsed_secs += 1;
        if self.elapsed_secs >= self.total_secs {
            self.elapsed_secs = self.total_secs;
            return Some(self.complete());
        }
        None
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn complete(&mut self) -> Event {
        self.phase = Phase::Completed;
        if let Some(notifier) = self.notifier.as_mut() {
            notifier();
        }
        Event::SessionCompleted {
            session_id: self.session_id.clone(),
            total_secs: self.total_secs,
            at: Utc::now(),
        }
    }
}

impl std::fmt::Debug for SessionTimer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionTimer")
            .field("session_id", &self.session_id)
            .field("total_secs", &self.total_secs)
            .field("elapsed_secs", &self.elapsed_secs)
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{Category, Localized, SessionDescriptor};
    use proptest::prelude::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn descriptor(total_secs: u64) -> SessionDescriptor {
        SessionDescriptor {
            id: "test-session".into(),
            category: Category::Meditation,
            total_secs,
            title: Localized {
                en: "Test".into(),
                th: "Test".into(),
            },
            instructions: vec![],
        }
    }

    fn counting_notifier() -> (Arc<AtomicUsize>, Notifier) {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        (
            calls,
            Box::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        )
    }

    #[test]
    fn start_pause_resume() {
        let mut timer = SessionTimer::new(&descriptor(60));
        assert_eq!(timer.phase(), Phase::Idle);

        assert!(timer.start().is_some());
        assert_eq!(timer.phase(), Phase::Running);

        assert!(timer.pause().is_some());
        assert_eq!(timer.phase(), Phase::Paused);

        assert!(timer.start().is_some());
        assert_eq!(timer.phase(), Phase::Running);
    }

    #[test]
    fn pause_is_idempotent() {
        let mut timer = SessionTimer::new(&descriptor(60));
        timer.start();
        timer.on_tick();

        assert!(timer.pause().is_some());
        let elapsed = timer.elapsed_secs();
        assert!(timer.pause().is_none());
        assert_eq!(timer.phase(), Phase::Paused);
        assert_eq!(timer.elapsed_secs(), elapsed);
    }

    #[test]
    fn five_minute_session_completes_on_final_tick() {
        let (calls, notifier) = counting_notifier();
        let mut timer = SessionTimer::new(&descriptor(300)).with_notifier(notifier);
        timer.start();

        for _ in 0..299 {
            assert!(timer.on_tick().is_none());
        }
        assert_eq!(timer.phase(), Phase::Running);
        assert_eq!(timer.elapsed_secs(), 299);
        assert!((timer.progress_ratio() - 299.0 / 300.0).abs() < 1e-9);

        let event = timer.on_tick();
        assert!(matches!(event, Some(Event::SessionCompleted { .. })));
        assert_eq!(timer.phase(), Phase::Completed);
        assert_eq!(timer.elapsed_secs(), 300);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn stray_ticks_while_paused_do_not_count() {
        let (calls, notifier) = counting_notifier();
        let mut timer = SessionTimer::new(&descriptor(300)).with_notifier(notifier);

        timer.start();
        for _ in 0..100 {
            timer.on_tick();
        }
        timer.pause();
        for _ in 0..50 {
            assert!(timer.on_tick().is_none());
        }
        assert_eq!(timer.elapsed_secs(), 100);

        timer.start();
        for _ in 0..200 {
            timer.on_tick();
        }
        assert_eq!(timer.phase(), Phase::Completed);
        assert_eq!(timer.elapsed_secs(), 300);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn stop_resets_without_notifying() {
        let (calls, notifier) = counting_notifier();
        let mut timer = SessionTimer::new(&descriptor(5)).with_notifier(notifier);

        timer.start();
        for _ in 0..3 {
            timer.on_tick();
        }
        assert!(timer.stop().is_some());
        assert_eq!(timer.phase(), Phase::Idle);
        assert_eq!(timer.elapsed_secs(), 0);
        assert_eq!(timer.progress_ratio(), 0.0);
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        // Already idle: nothing to stop.
        assert!(timer.stop().is_none());
    }

    #[test]
    fn ticks_while_idle_are_ignored() {
        let mut timer = SessionTimer::new(&descriptor(60));
        assert!(timer.on_tick().is_none());
        assert_eq!(timer.elapsed_secs(), 0);
        assert_eq!(timer.phase(), Phase::Idle);
    }

    #[test]
    fn completed_is_terminal_until_restart() {
        let (calls, notifier) = counting_notifier();
        let mut timer = SessionTimer::new(&descriptor(2)).with_notifier(notifier);

        timer.start();
        timer.on_tick();
        timer.on_tick();
        assert_eq!(timer.phase(), Phase::Completed);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        // start() and stray ticks cannot escape or re-notify.
        assert!(timer.start().is_none());
        assert!(timer.on_tick().is_none());
        assert_eq!(timer.phase(), Phase::Completed);
        assert_eq!(timer.elapsed_secs(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let event = timer.restart();
        assert!(matches!(event, Some(Event::SessionRestarted { .. })));
        assert_eq!(timer.phase(), Phase::Running);
        assert_eq!(timer.elapsed_secs(), 0);
        assert_eq!(timer.progress_ratio(), 0.0);

        timer.on_tick();
        timer.on_tick();
        assert_eq!(timer.phase(), Phase::Completed);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn restart_mid_session_resets_progress() {
        let mut timer = SessionTimer::new(&descriptor(60));
        timer.start();
        for _ in 0..30 {
            timer.on_tick();
        }
        timer.restart();
        assert_eq!(timer.phase(), Phase::Running);
        assert_eq!(timer.elapsed_secs(), 0);
    }

    #[test]
    fn zero_duration_completes_on_first_start() {
        let (calls, notifier) = counting_notifier();
        let mut timer = SessionTimer::new(&descriptor(0)).with_notifier(notifier);

        assert_eq!(timer.progress_ratio(), 1.0);
        let event = timer.start();
        assert!(matches!(event, Some(Event::SessionCompleted { .. })));
        assert_eq!(timer.phase(), Phase::Completed);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn snapshot_reports_remaining_time() {
        let mut timer = SessionTimer::new(&descriptor(300));
        timer.start();
        for _ in 0..120 {
            timer.on_tick();
        }
        assert_eq!(timer.remaining_secs(), 180);

        match timer.snapshot() {
            Event::StateSnapshot {
                phase,
                elapsed_secs,
                remaining_secs,
                total_secs,
                ..
            } => {
                assert_eq!(phase, Phase::Running);
                assert_eq!(elapsed_secs, 120);
                assert_eq!(remaining_secs, 180);
                assert_eq!(total_secs, 300);
            }
            _ => panic!("Expected StateSnapshot"),
        }
    }

    #[test]
    fn serde_roundtrip_preserves_state() {
        let mut timer = SessionTimer::new(&descriptor(300));
        timer.start();
        for _ in 0..42 {
            timer.on_tick();
        }
        timer.pause();

        let json = serde_json::to_string(&timer).unwrap();
        let restored: SessionTimer = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.phase(), Phase::Paused);
        assert_eq!(restored.elapsed_secs(), 42);
        assert_eq!(restored.total_secs(), 300);
        assert_eq!(restored.session_id(), "test-session");
    }

    proptest! {
        #[test]
        fn completes_after_exactly_total_ticks(total in 1u64..2000) {
            let (calls, notifier) = counting_notifier();
            let mut timer = SessionTimer::new(&descriptor(total)).with_notifier(notifier);
            timer.start();

            for i in 1..total {
                prop_assert!(timer.on_tick().is_none());
                prop_assert_eq!(timer.elapsed_secs(), i);
                prop_assert_eq!(timer.phase(), Phase::Running);
            }
            timer.on_tick();
            prop_assert_eq!(timer.phase(), Phase::Completed);
            prop_assert_eq!(timer.elapsed_secs(), total);
            prop_assert_eq!(calls.load(Ordering::SeqCst), 1);

            // Ticks past completion change nothing.
            timer.on_tick();
            prop_assert_eq!(timer.elapsed_secs(), total);
            prop_assert_eq!(calls.load(Ordering::SeqCst), 1);
        }

        #[test]
        fn progress_ratio_is_monotone_and_bounded(total in 1u64..500, ticks in 0u64..600) {
            let mut timer = SessionTimer::new(&descriptor(total));
            timer.start();

            let mut last = timer.progress_ratio();
            for _ in 0..ticks {
                timer.on_tick();
                let ratio = timer.progress_ratio();
                prop_assert!(ratio >= last);
                prop_assert!((0.0..=1.0).contains(&ratio));
                last = ratio;
            }
            prop_assert!(timer.elapsed_secs() <= total);
        }
    }
}

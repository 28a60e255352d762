mod clock;
mod engine;

pub use clock::{ClockSource, ManualClock, SystemClock};
pub use engine::{Notifier, Phase, SessionTimer};

use crate::events::Event;

/// Drive a timer with ticks from `clock` until it leaves the `Running` phase.
///
/// The clock is borrowed only for the duration of the run, so a tick
/// subscription cannot outlive the session it drives. `on_progress` is called
/// after every tick with the updated timer. Returns the completion event if
/// the run ended by finishing the session.
pub fn drive<C: ClockSource>(
    timer: &mut SessionTimer,
    clock: &mut C,
    mut on_progress: impl FnMut(&SessionTimer),
) -> Option<Event> {
    while timer.phase() == Phase::Running {
        clock.next_tick();
        let event = timer.on_tick();
        on_progress(timer);
        if event.is_some() {
            return event;
        }
    }
    None
}

/// Format a second count as `m:ss` for display.
pub fn format_clock(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

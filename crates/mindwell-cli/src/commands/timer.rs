use chrono::Utc;
use clap::Subcommand;
use mindwell_core::{CoreError, Database, Event, Registry, SessionTimer};

const TIMER_KEY: &str = "session_timer";

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start a new session, or resume the persisted one
    Start {
        /// Session id; required when no timer is persisted yet
        id: Option<String>,
    },
    /// Pause the running timer
    Pause,
    /// Resume a paused timer
    Resume,
    /// Stop and reset to idle, discarding progress
    Stop,
    /// Restart the session from zero
    Restart,
    /// Deliver discrete one-second ticks to the persisted timer
    Tick {
        #[arg(long, default_value_t = 1)]
        count: u64,
    },
    /// Print the current timer state as JSON
    Status,
    /// Forget the persisted timer entirely
    Clear,
}

fn load_timer(db: &Database) -> Option<SessionTimer> {
    let json = db.kv_get(TIMER_KEY).ok()??;
    serde_json::from_str(&json).ok()
}

fn require_timer(db: &Database) -> Result<SessionTimer, Box<dyn std::error::Error>> {
    load_timer(db).ok_or_else(|| "no session in progress; run `mindwell timer start <id>`".into())
}

fn save_timer(db: &Database, timer: &SessionTimer) -> Result<(), Box<dyn std::error::Error>> {
    db.kv_set(TIMER_KEY, &serde_json::to_string(timer)?)?;
    Ok(())
}

fn print_outcome(
    event: Option<Event>,
    timer: &SessionTimer,
) -> Result<(), Box<dyn std::error::Error>> {
    // No-op transitions fall back to a snapshot so there is always output.
    match event {
        Some(event) => println!("{}", serde_json::to_string_pretty(&event)?),
        None => println!("{}", serde_json::to_string_pretty(&timer.snapshot())?),
    }
    Ok(())
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        TimerAction::Start { id } => {
            let mut timer = match (load_timer(&db), id) {
                // An explicit id always opens a fresh session.
                (_, Some(id)) => {
                    let registry = Registry::builtin();
                    let descriptor = registry
                        .get(&id)
                        .ok_or_else(|| CoreError::UnknownSession(id.clone()))?;
                    SessionTimer::new(descriptor)
                }
                (Some(timer), None) => timer,
                (None, None) => return Err(
                    "no session in progress; run `mindwell timer start <id>`".into()
                ),
            };
            let event = timer.start();
            print_outcome(event, &timer)?;
            save_timer(&db, &timer)?;
        }
        TimerAction::Pause => {
            let mut timer = require_timer(&db)?;
            let event = timer.pause();
            print_outcome(event, &timer)?;
            save_timer(&db, &timer)?;
        }
        TimerAction::Resume => {
            // start() resumes from Paused; this is a readability alias.
            let mut timer = require_timer(&db)?;
            let event = timer.start();
            print_outcome(event, &timer)?;
            save_timer(&db, &timer)?;
        }
        TimerAction::Stop => {
            let mut timer = require_timer(&db)?;
            let event = timer.stop();
            print_outcome(event, &timer)?;
            save_timer(&db, &timer)?;
        }
        TimerAction::Restart => {
            let mut timer = require_timer(&db)?;
            let event = timer.restart();
            print_outcome(event, &timer)?;
            save_timer(&db, &timer)?;
        }
        TimerAction::Tick { count } => {
            let mut timer = require_timer(&db)?;
            let mut completed = None;
            for _ in 0..count {
                if let Some(event) = timer.on_tick() {
                    completed = Some(event);
                }
            }
            if let Some(Event::SessionCompleted { ref session_id, .. }) = completed {
                if let Some(descriptor) = Registry::builtin().get(session_id) {
                    db.record_completion(descriptor, Utc::now())?;
                }
            }
            print_outcome(completed, &timer)?;
            save_timer(&db, &timer)?;
        }
        TimerAction::Status => {
            let timer = require_timer(&db)?;
            println!("{}", serde_json::to_string_pretty(&timer.snapshot())?);
        }
        TimerAction::Clear => {
            db.kv_delete(TIMER_KEY)?;
            println!("{{\"type\": \"timer_cleared\"}}");
        }
    }
    Ok(())
}

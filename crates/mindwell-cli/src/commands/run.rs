use std::io::Write;
use std::time::Duration;

use chrono::Utc;
use clap::Args;
use mindwell_core::timer::{drive, format_clock, SystemClock};
use mindwell_core::{CoreError, Database, Registry, SessionTimer};

#[derive(Args)]
pub struct RunArgs {
    /// Session id to run
    pub id: String,
    /// Tick period in milliseconds (1000 = real time)
    #[arg(long, default_value_t = 1000)]
    pub period_ms: u64,
}

pub fn run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let registry = Registry::builtin();
    let descriptor = registry
        .get(&args.id)
        .ok_or_else(|| CoreError::UnknownSession(args.id.clone()))?;

    let mut timer = SessionTimer::new(descriptor)
        .with_notifier(Box::new(|| println!("\nSession complete!")));
    let mut clock = SystemClock::with_period(Duration::from_millis(args.period_ms));

    println!(
        "{} ({})",
        descriptor.title.en,
        format_clock(descriptor.total_secs)
    );
    timer.start();

    // The clock lives only as long as this loop; nothing ticks after it.
    let completion = drive(&mut timer, &mut clock, |t| {
        print!(
            "\r{} / {}  ({:>5.1}%)",
            format_clock(t.elapsed_secs()),
            format_clock(t.total_secs()),
            t.progress_ratio() * 100.0,
        );
        let _ = std::io::stdout().flush();
    });

    if let Some(event) = completion {
        let db = Database::open()?;
        db.record_completion(descriptor, Utc::now())?;
        println!("{}", serde_json::to_string_pretty(&event)?);
    }
    Ok(())
}

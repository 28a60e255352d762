use clap::Subcommand;
use mindwell_core::timer::format_clock;
use mindwell_core::Database;

#[derive(Subcommand)]
pub enum HistoryAction {
    /// Recently completed sessions, newest first
    List {
        #[arg(long, default_value_t = 20)]
        limit: u32,
    },
    /// Aggregate stats as JSON
    Stats,
    /// Delete all history
    Clear,
}

pub fn run(action: HistoryAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        HistoryAction::List { limit } => {
            for record in db.recent(limit)? {
                println!(
                    "{}  {:<18} {:>6}  {}",
                    record.completed_at.format("%Y-%m-%d %H:%M"),
                    record.session_id,
                    format_clock(record.duration_secs),
                    record.title,
                );
            }
        }
        HistoryAction::Stats => {
            println!("{}", serde_json::to_string_pretty(&db.stats()?)?);
        }
        HistoryAction::Clear => {
            db.clear_history()?;
            println!("history cleared");
        }
    }
    Ok(())
}

use clap::Subcommand;
use mindwell_core::timer::format_clock;
use mindwell_core::{CoreError, Language, Registry};

use crate::common::LangArg;

#[derive(Subcommand)]
pub enum SessionAction {
    /// List the session catalog
    List {
        /// Display language
        #[arg(long, value_enum, default_value = "en")]
        lang: LangArg,
    },
    /// Show one session with its instructions
    Show {
        /// Session id, e.g. `mindfulness-5`
        id: String,
        /// Display language
        #[arg(long, value_enum, default_value = "en")]
        lang: LangArg,
    },
}

pub fn run(action: SessionAction) -> Result<(), Box<dyn std::error::Error>> {
    let registry = Registry::builtin();

    match action {
        SessionAction::List { lang } => {
            let lang: Language = lang.into();
            for session in registry.sessions() {
                println!(
                    "{:<18} {:>6}  {:<10}  {}",
                    session.id,
                    format_clock(session.total_secs),
                    session.category.as_str(),
                    session.title.get(lang),
                );
            }
        }
        SessionAction::Show { id, lang } => {
            let session = registry
                .get(&id)
                .ok_or_else(|| CoreError::UnknownSession(id.clone()))?;
            let lang: Language = lang.into();
            println!(
                "{} ({})",
                session.title.get(lang),
                format_clock(session.total_secs)
            );
            for line in &session.instructions {
                println!("  - {}", line.get(lang));
            }
        }
    }
    Ok(())
}

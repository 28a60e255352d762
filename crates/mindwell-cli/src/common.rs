use clap::ValueEnum;
use mindwell_core::Language;

/// Display language flag shared by catalog commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LangArg {
    En,
    Th,
}

impl From<LangArg> for Language {
    fn from(value: LangArg) -> Self {
        match value {
            LangArg::En => Language::En,
            LangArg::Th => Language::Th,
        }
    }
}

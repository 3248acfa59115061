use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Converts a student schedule export into an iCalendar file.
#[derive(Parser, Debug)]
#[command(name = "coursecal", version)]
pub struct Cli {
    /// Raw schedule JSON (or normalized events with --events)
    pub input: PathBuf,

    /// Write here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Keep only these term codes (repeatable)
    #[arg(short, long = "term", value_name = "CODE")]
    pub terms: Vec<String>,

    /// Input is a JSON array of already normalized events
    #[arg(long)]
    pub events: bool,

    /// Log the first N occurrences of each event instead of writing output
    #[arg(long, value_name = "N")]
    pub preview: Option<u16>,

    /// Write normalized events as JSON instead of calendar text
    #[arg(long, conflicts_with = "payloads")]
    pub json: bool,

    /// Write one provider event body per line instead of calendar text
    #[arg(long, value_enum, value_name = "PROVIDER")]
    pub payloads: Option<Provider>,

    /// Settings file (defaults to ./config.toml when present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Google,
    Outlook,
}

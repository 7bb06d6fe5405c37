//! Command-line argument parsing for the replay tool
//!
//! Supports:
//! - Loading rows from CSV and edit columns from a YAML session
//! - Reading surface events from a file or stdin
//! - An explicit grid config file instead of the user config

use clap::Parser;
use std::path::PathBuf;

/// Replay recorded surface events against an editable grid
#[derive(Parser, Debug)]
#[command(
    name = "gridpro-replay",
    version,
    about = "Replay surface events against an editable grid"
)]
pub struct CliArgs {
    /// CSV file with the row items (first record is the header)
    #[arg(value_name = "ROWS")]
    pub rows: PathBuf,

    /// YAML session describing the edit columns
    #[arg(value_name = "SESSION")]
    pub session: PathBuf,

    /// JSON-lines file of surface events; `-` or omitted reads stdin
    #[arg(value_name = "EVENTS")]
    pub events: Option<PathBuf>,

    /// Grid config file (defaults to the user config)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print batched surface commands one per line
    #[arg(long)]
    pub flatten: bool,
}

/// Where surface events are read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventSource {
    Stdin,
    File(PathBuf),
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct ReplayConfig {
    pub rows: PathBuf,
    pub session: PathBuf,
    pub events: EventSource,
    pub config: Option<PathBuf>,
    pub flatten: bool,
}

impl CliArgs {
    /// Convert parsed CLI args into replay configuration
    pub fn into_config(self) -> Result<ReplayConfig, String> {
        if self.rows == self.session {
            return Err("Rows and session must be different files".to_string());
        }

        let events = match self.events {
            None => EventSource::Stdin,
            Some(path) if path.as_os_str() == "-" => EventSource::Stdin,
            Some(path) => EventSource::File(path),
        };

        Ok(ReplayConfig {
            rows: self.rows,
            session: self.session,
            events,
            config: self.config,
            flatten: self.flatten,
        })
    }
}

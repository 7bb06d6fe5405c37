use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::Parser;

use gridpro::column::EditHandler;
use gridpro::commands::SurfaceCmd;
use gridpro::config::GridConfig;
use gridpro::messages::SurfaceMsg;
use gridpro::model::GridPro;
use gridpro::rows::{load_rows, Row};
use gridpro::session::Session;
use gridpro::update::UpdateOutcome;

mod cli;

use cli::{CliArgs, EventSource, ReplayConfig};

/// Counts of what a replay did
#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct ReplaySummary {
    routed: usize,
    synced: usize,
    ignored: usize,
    failed: usize,
    invalid: usize,
}

/// Feed JSON-lines events into the grid, writing one report line per event
/// followed by the surface commands it produced
fn replay(
    grid: &mut GridPro<Row>,
    events: impl BufRead,
    flatten: bool,
    out: &mut impl Write,
) -> Result<ReplaySummary> {
    let mut summary = ReplaySummary::default();

    for (index, line) in events.lines().enumerate() {
        let line = line.context("Failed to read events")?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        match SurfaceMsg::from_json(line) {
            Ok(msg) => grid.post(msg),
            Err(e) => {
                tracing::warn!(line = index + 1, error = %e, "skipping malformed event");
                writeln!(out, "invalid event at line {}: {}", index + 1, e)?;
                summary.invalid += 1;
                continue;
            }
        }

        for result in grid.process_pending() {
            match result {
                Ok(UpdateOutcome::Routed(edit)) => {
                    summary.routed += 1;
                    writeln!(
                        out,
                        "routed {} key={} path={}",
                        edit.column.id(),
                        edit.key,
                        edit.path
                    )?;
                }
                Ok(UpdateOutcome::Synced { column, property }) => {
                    summary.synced += 1;
                    writeln!(out, "synced {} {}", column, property)?;
                }
                Ok(UpdateOutcome::Ignored) => {
                    summary.ignored += 1;
                    writeln!(out, "ignored")?;
                }
                Err(e) => {
                    summary.failed += 1;
                    writeln!(out, "error: {}", e)?;
                }
            }
        }
        write_commands(grid.take_commands(), flatten, out)?;
    }

    Ok(summary)
}

fn write_commands(commands: Vec<SurfaceCmd>, flatten: bool, out: &mut impl Write) -> Result<()> {
    let commands = if flatten {
        commands.into_iter().flat_map(SurfaceCmd::flatten).collect()
    } else {
        commands
    };
    for command in commands {
        writeln!(out, "> {}", serde_json::to_string(&command)?)?;
    }
    Ok(())
}

fn run(config: ReplayConfig) -> Result<ReplaySummary> {
    let grid_config = match &config.config {
        Some(path) => GridConfig::load_from_path(path)?,
        None => GridConfig::load(),
    };
    let rows = load_rows(&config.rows)?;
    let session = Session::load(&config.session)?;

    let mut grid = GridPro::with_config(grid_config)?;
    session.apply(&mut grid, |declared| {
        let source = declared.source_header();
        let handler: EditHandler<Row> = Rc::new(move |row: &Row, path: &str| {
            tracing::info!(
                line = row.line(),
                path,
                source = %source,
                value = row.get(&source),
                "edit confirmed"
            );
        });
        handler
    })?;
    let keys = grid.set_items(rows);
    tracing::info!(
        rows = keys.len(),
        columns = grid.column_count(),
        "grid ready"
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_commands(grid.take_commands(), config.flatten, &mut out)?;

    let summary = match &config.events {
        EventSource::Stdin => replay(&mut grid, io::stdin().lock(), config.flatten, &mut out)?,
        EventSource::File(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open events at {}", path.display()))?;
            replay(&mut grid, BufReader::new(file), config.flatten, &mut out)?
        }
    };
    tracing::info!(dispatched = grid.dispatched_edits(), "replay finished");
    Ok(summary)
}

fn main() -> Result<()> {
    gridpro::tracing::init();

    let config = CliArgs::parse()
        .into_config()
        .map_err(anyhow::Error::msg)?;
    let summary = run(config)?;

    eprintln!(
        "{} routed, {} synced, {} ignored, {} failed, {} invalid",
        summary.routed, summary.synced, summary.ignored, summary.failed, summary.invalid
    );
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

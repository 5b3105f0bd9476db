//! Activity Tracker CLI
//!
//! Command-line driver for the tracker-engine library. It supplies
//! everything the engine deliberately leaves to its embedder:
//! - Loads the activity configuration (TOML)
//! - Restores persisted state from a file store and saves it back
//! - Replays a sequence of navigation/pairing/time commands
//! - Prints a status report (text or JSON)
//!
//! All tracking semantics live in the engine; this binary only feeds it
//! wall-clock instants and gestures.

use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use std::path::PathBuf;

use tracker_engine::{load_state, save_state, FileStore, StateStore, TrackingList, STATE_KEY};

mod commands;
mod config;
mod report;

/// Activity Tracker - track time across mergeable activities
#[derive(Parser, Debug)]
#[command(name = "tracker-cli")]
#[command(about = "Track elapsed time across a small set of mergeable activities", long_about = None)]
#[command(version)]
struct Args {
    /// Path to the tracker configuration (TOML)
    #[arg(short, long, value_name = "FILE", default_value = "tracker.toml")]
    config: PathBuf,

    /// Directory holding persisted tracker state
    #[arg(short, long, value_name = "DIR", default_value = ".tracker-state")]
    state_dir: PathBuf,

    /// Write the built-in default configuration to the --config path and exit
    #[arg(long)]
    write_default_config: bool,

    /// Discard any saved state before running (use after a config change)
    #[arg(long)]
    fresh: bool,

    /// Print the status report as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,

    /// Commands to replay in order, e.g. `next toggle tick status`
    #[arg(value_name = "COMMAND")]
    commands: Vec<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose, args.quiet);

    log::info!("Activity Tracker CLI v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Using engine library v{}", tracker_engine::VERSION);

    if args.write_default_config {
        config::write_default_config(&args.config)?;
        println!("Wrote default configuration to {:?}", args.config);
        return Ok(());
    }

    let tracker_config = config::load_config(&args.config)?;
    let mut list = TrackingList::from_config(&tracker_config)?;
    let mut store = FileStore::new(&args.state_dir)?;

    if args.fresh {
        log::info!("discarding saved state on request");
        store.remove(STATE_KEY)?;
    }

    if load_state(&mut list, &store, Utc::now().timestamp())? {
        log::debug!("state restored from {:?}", args.state_dir);
    } else {
        log::debug!("no saved state, starting from the configuration");
    }

    let commands = commands::parse(&args.commands)?;
    for command in &commands {
        commands::apply(&mut list, command, Utc::now().timestamp(), args.json)?;
    }

    // a bare invocation (or one with no trailing `status`) still reports
    if !commands.iter().any(|c| matches!(c, commands::Command::Status)) {
        report::print(&list, args.json)?;
    }

    list.update_accrual(Utc::now().timestamp());
    save_state(&list, &mut store)?;
    log::debug!("state saved to {:?}", args.state_dir);

    Ok(())
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}

//! ETS2/ATS Telemetry Replay CLI
//!
//! Stands in for the game: reads a recorded stream of host callbacks, drives
//! the ets2-telemetry-core engine exactly as the plugin host would, and runs
//! a snapshot publisher on its own thread as the external consumer.
//! - Replay of JSON-lines host call recordings
//! - Snapshot output (JSON lines, file or stdout)
//! - Channel/event subscription listing
//! - Replay summary

use anyhow::{Context, Result};
use clap::Parser;
use ets2_telemetry_core::Telemetry;
use std::path::PathBuf;
use std::sync::atomic::Ordering;

mod config;
mod publisher;
mod replay;
mod report;

use config::AppConfig;
use publisher::SnapshotPublisher;

/// ETS2 Telemetry - Replay recorded host callbacks through the telemetry engine
#[derive(Parser, Debug)]
#[command(name = "ets2-telemetry-cli")]
#[command(about = "Replay ETS2/ATS telemetry recordings into dashboard snapshots", long_about = None)]
#[command(version)]
struct Args {
    /// Path to a recorded host call stream (JSON lines)
    #[arg(short, long, value_name = "FILE")]
    replay: Option<PathBuf>,

    /// Output file for document snapshots (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Path to configuration file (config.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Host game id (eut2 or ats)
    #[arg(long, value_name = "ID")]
    game_id: Option<String>,

    /// Host game name, ending in the game version
    #[arg(long, value_name = "NAME")]
    game_name: Option<String>,

    /// Pretty-print snapshots
    #[arg(long)]
    pretty: bool,

    /// Maximum number of snapshots to write
    #[arg(long, value_name = "COUNT")]
    max_snapshots: Option<usize>,

    /// Print the channels and events a host adapter subscribes to, then exit
    #[arg(long)]
    list_channels: bool,

    /// Verbosity level (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

impl Args {
    /// Command-line flags win over the configuration file
    fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(replay) = &self.replay {
            config.input.replay = Some(replay.clone());
        }
        if let Some(game_id) = &self.game_id {
            config.input.game_id = game_id.clone();
        }
        if let Some(game_name) = &self.game_name {
            config.input.game_name = game_name.clone();
        }
        if let Some(output) = &self.output {
            config.output.path = Some(output.clone());
        }
        if self.pretty {
            config.output.pretty = true;
        }
        if let Some(max) = self.max_snapshots {
            config.output.max_snapshots = Some(max);
        }
    }
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::info!("ETS2 Telemetry CLI v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Using telemetry library v{}", ets2_telemetry_core::VERSION);

    let mut config = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from: {:?}", path);
            config::load_config(path)?
        }
        None => AppConfig::default(),
    };
    args.apply_overrides(&mut config);

    if args.list_channels {
        return list_channels(&config);
    }

    match config.input.replay.clone() {
        Some(path) => replay_mode(&config, &path),
        None => {
            // No input - show help
            println!("ETS2 Telemetry - No replay specified");
            println!("\nQuick Start:");
            println!("  ets2-telemetry-cli --replay session.jsonl --output snapshots.jsonl");
            println!("  ets2-telemetry-cli --list-channels");
            println!("\nFor configuration files:");
            println!("  ets2-telemetry-cli --config config.toml");
            println!("\nUse --help for more options");
            Ok(())
        }
    }
}

/// Replay a recording through the engine with the snapshot publisher attached
fn replay_mode(config: &AppConfig, path: &PathBuf) -> Result<()> {
    let calls = replay::read_replay(path).with_context(|| format!("Failed to read replay file: {:?}", path))?;
    log::info!("Loaded {} host calls from {:?}", calls.len(), path);

    let publisher = SnapshotPublisher::from_config(&config.output);
    let written = publisher.written();

    let mut telemetry = Telemetry::init(&config.input.host(), config.telemetry.clone(), Some(Box::new(publisher)))
        .context("Failed to initialize telemetry")?;

    let stats = replay::run(&calls, &mut telemetry);
    let summary = report::Summary {
        stats,
        snapshots: 0,
        job_state: telemetry.job_state(),
        document: telemetry.snapshot(),
    };

    telemetry.shutdown().context("Failed to shut down telemetry")?;

    let summary = report::Summary {
        snapshots: written.load(Ordering::SeqCst),
        ..summary
    };
    if config.output.path.is_some() {
        print!("{}", summary.render());
    } else {
        eprint!("{}", summary.render());
    }

    Ok(())
}

/// Print the subscription list of a host adapter
fn list_channels(config: &AppConfig) -> Result<()> {
    let telemetry =
        Telemetry::init(&config.input.host(), config.telemetry.clone(), None).context("Failed to initialize telemetry")?;

    println!("Channels:");
    for registration in telemetry.channel_registrations() {
        match registration.index_count {
            Some(count) => println!("  {} [0..{}]", registration.name, count),
            None => println!("  {}", registration.name),
        }
    }

    println!("\nEvents:");
    for name in telemetry.event_names() {
        println!("  {}", name);
    }

    telemetry.shutdown()?;
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
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .target(env_logger::Target::Stderr)
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let args = Args::parse_from([
            "ets2-telemetry-cli",
            "--replay",
            "a.jsonl",
            "--game-id",
            "ats",
            "--max-snapshots",
            "5",
            "--pretty",
        ]);
        let mut config = AppConfig::default();
        config.output.path = Some(PathBuf::from("out.jsonl"));
        args.apply_overrides(&mut config);

        assert_eq!(config.input.replay, Some(PathBuf::from("a.jsonl")));
        assert_eq!(config.input.game_id, "ats");
        assert_eq!(config.output.max_snapshots, Some(5));
        assert!(config.output.pretty);
        assert_eq!(config.output.path, Some(PathBuf::from("out.jsonl")));
    }

    #[test]
    fn test_verbosity_flags() {
        let args = Args::parse_from(["ets2-telemetry-cli", "-vv", "--list-channels"]);
        assert_eq!(args.verbose, 2);
        assert!(args.list_channels);
        assert!(!args.quiet);
    }
}

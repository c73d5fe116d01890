//! Cricket CLI
//!
//! Match list, per-match analytics and seeded live simulation from the
//! command line.

#[cfg(feature = "cli")]
use anyhow::Result;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "cricket")]
#[command(about = "Cricket match analytics and live score simulation", long_about = None)]
struct Cli {
    /// Engine config file (JSON or YAML); falls back to CRICKET_CONFIG_PATH
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Fixture file to read matches from instead of the embedded set
    #[arg(long, global = true)]
    fixtures: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// List matches with parsed scores and run rates
    Matches {
        /// Print JSON instead of text
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Derive analytics for one match
    Analyze {
        /// Match id
        #[arg(long)]
        id: u32,

        /// Print JSON instead of text
        #[arg(long, default_value = "false")]
        json: bool,

        /// Also write the analytics JSON to this file
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Apply simulator ticks to the match list
    Simulate {
        #[arg(long, default_value = "42")]
        seed: u64,

        #[arg(long, default_value = "10")]
        ticks: u32,
    },

    /// Run a live session on a virtual clock
    Watch {
        /// Open this match's detail view as well
        #[arg(long)]
        id: Option<u32>,

        #[arg(long, default_value = "42")]
        seed: u64,

        /// Seconds of session time to run
        #[arg(long, default_value = "60")]
        seconds: u32,

        /// Sleep for real between steps
        #[arg(long, default_value = "false")]
        realtime: bool,
    },
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    use cricket_core::{LiveScoreSimulator, MatchAnalytics, MatchDataSource, MatchSnapshot, MatchSummary};
    use cricket_cli::{format_match_line, format_report, format_tick, load_config, load_source, write_json};
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    let source = load_source(cli.fixtures.as_deref())?;

    match cli.command {
        Commands::Matches { json } => {
            let matches: Vec<MatchSummary> =
                source.list_live_matches().iter().map(MatchSummary::normalize).collect();
            if json {
                println!("{}", serde_json::to_string_pretty(&matches)?);
            } else {
                println!("🏏 {} matches", matches.len());
                for summary in &matches {
                    println!("   {}", format_match_line(summary));
                }
            }
        }

        Commands::Analyze { id, json, out } => {
            let Some(raw) = source.get_match_detail(id) else {
                anyhow::bail!("❌ Match not found: {id}");
            };
            let snapshot = MatchSnapshot::normalize(&raw);
            let analytics = MatchAnalytics::derive(&snapshot, &config);

            if json {
                println!("{}", serde_json::to_string_pretty(&analytics)?);
            } else {
                println!("{}", format_match_line(&snapshot.summary));
                println!("{}", format_report(&analytics));
            }

            if let Some(path) = out {
                write_json(&path, &analytics)?;
                println!("\n📄 Analytics saved to: {}", path.display());
            }
        }

        Commands::Simulate { seed, ticks } => {
            let mut matches: Vec<MatchSummary> =
                source.list_live_matches().iter().map(MatchSummary::normalize).collect();
            let mut simulator = LiveScoreSimulator::from_seed(seed, &config);

            println!("🎲 Simulating {ticks} ticks (seed {seed})");
            for tick in 1..=ticks {
                let outcomes = simulator.tick_all(&mut matches);
                for (summary, outcome) in matches.iter().zip(&outcomes) {
                    if let Some(line) = format_tick(summary, outcome) {
                        println!("   tick {tick:>3}: {line}");
                    }
                }
            }

            println!("\n✅ Final scores");
            for summary in &matches {
                println!("   {}", format_match_line(summary));
            }
        }

        Commands::Watch { id, seed, seconds, realtime } => {
            watch(source, config, id, seed, seconds, realtime);
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn watch(
    source: cricket_core::FixtureSource,
    config: cricket_core::EngineConfig,
    id: Option<u32>,
    seed: u64,
    seconds: u32,
    realtime: bool,
) {
    use chrono::{Duration, Utc};
    use cricket_cli::{format_match_line, format_report};
    use cricket_core::sim::PollOutcome;
    use cricket_core::LiveSession;

    let start = Utc::now();
    let mut session = LiveSession::new(source, config, seed, start);
    if let Some(id) = id {
        if session.open_detail(id, start).is_none() {
            println!("⚠️  Match {id} not found; watching the list only");
        }
    }

    println!("👀 Watching for {seconds}s of session time");
    for step in 0..=seconds {
        let now = start + Duration::seconds(step as i64);
        let polled = session.poll(now);

        if polled.list == PollOutcome::Ran {
            println!("\n⏱  t+{step}s list refresh");
            for summary in session.matches() {
                println!("   {}", format_match_line(summary));
            }
        }
        for (detail_id, outcome) in &polled.details {
            if *outcome != PollOutcome::Ran {
                continue;
            }
            if let Some(view) = session.detail(*detail_id) {
                println!("\n⏱  t+{step}s detail refresh");
                println!("{}", format_report(&view.analytics));
                if !view.is_refreshing() {
                    log::info!("match {detail_id} left live; detail refresh stopped");
                }
            }
        }

        if realtime {
            std::thread::sleep(std::time::Duration::from_secs(1));
        }
    }

    session.shutdown();
    println!("\n✅ Session closed");
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("cricket CLI is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}

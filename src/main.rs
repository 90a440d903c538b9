use clap::{Args, Parser, Subcommand};
use once_cell::sync::Lazy;
use owo_colors::OwoColorize;
use std::num::NonZeroU32;
use std::path::PathBuf;

use srarq::config::{Retransmission, SimulationConfig};
use srarq::engine;
use srarq::protocol::{SelectiveRepeat, scenario};
use srarq::transmission::lossy::RandomCorruption;
use srarq::util::report::{buffer_status, divider, sequences, stats_summary, window_status};
use srarq::util::timer_logger::{PROGRAM_START_TIME, log_message};

#[derive(Parser, Debug)]
#[command(author, version, about = "Selective-Repeat ARQ simulator", long_about = None)]
struct Cli {
    /// Simulation parameters (TOML). Command line flags override it.
    #[arg(short, long, value_name = "CONFIG", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Walk through the documented loss-and-retransmit example.
    Scenario {
        /// Window size, at least 3.
        #[arg(short, long, value_name = "WINDOW")]
        window: Option<NonZeroU32>,
    },
    /// Push frames through a randomly corrupting channel, step by step.
    Simulate(Overrides),
    /// Same as `simulate`, with sender and receiver on separate tasks.
    Actors(Overrides),
}

#[derive(Args, Debug)]
struct Overrides {
    #[arg(short, long, value_name = "WINDOW")]
    window: Option<NonZeroU32>,

    #[arg(short, long, value_name = "FRAMES")]
    frames: Option<u32>,

    /// Probability in [0, 1] that a frame is corrupted in transit.
    #[arg(short = 'p', long, value_name = "RATE")]
    corruption_rate: Option<f64>,

    /// Seed for the channel; omit for a different run every time.
    #[arg(short, long, value_name = "SEED")]
    seed: Option<u64>,

    #[arg(short, long, value_enum)]
    retransmission: Option<Retransmission>,

    #[arg(short, long, value_name = "N")]
    max_transmissions: Option<u32>,
}

impl Overrides {
    fn apply(self, mut config: SimulationConfig) -> anyhow::Result<SimulationConfig> {
        if let Some(window) = self.window {
            config.window_size = window;
        }
        if let Some(frames) = self.frames {
            config.frames = frames;
        }
        if let Some(rate) = self.corruption_rate {
            config.corruption_rate = rate;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(retransmission) = self.retransmission {
            config.retransmission = retransmission;
        }
        if let Some(max) = self.max_transmissions {
            config.max_transmissions = max;
        }
        config.validate()?;
        Ok(config)
    }
}

fn banner(title: &str) {
    println!("{}", divider('='));
    log_message(&title.bold().to_string());
    println!("{}", divider('='));
}

fn print_final(protocol: &SelectiveRepeat) {
    println!("{}", divider('-'));
    print!("{}", window_status(protocol.sender()));
    println!("{}", divider('-'));
    print!("{}", buffer_status(protocol.receiver()));
    println!("{}", divider('-'));
    log_message(&format!(
        "Delivered in order: {}",
        sequences(protocol.delivered_in_order()).green()
    ));
}

fn run_scenario(window: NonZeroU32) -> anyhow::Result<()> {
    banner("Selective Repeat: documented scenario");
    let protocol = scenario::documented(window, |label, transmission, _| {
        println!("{}", divider('-'));
        let reception = transmission.reception.to_string();
        let reception = if transmission.acknowledged() {
            reception.green().to_string()
        } else {
            reception.red().to_string()
        };
        log_message(&format!(
            "{label} frame {}: {reception}",
            transmission.sequence.bright_blue()
        ));
    })?;
    print_final(&protocol);
    Ok(())
}

fn run_simulation(config: &SimulationConfig) -> anyhow::Result<()> {
    banner("Selective Repeat: simulation");
    log_message(&format!(
        "{} frames, window {}, corruption rate {}, {:?} retransmissions",
        config.frames, config.window_size, config.corruption_rate, config.retransmission
    ));

    let mut channel = RandomCorruption::new(config.corruption_rate, config.seed)?;
    let mut protocol = SelectiveRepeat::from_config(config);
    let stats = protocol.run(config.frames, &mut channel)?;
    log_message(&stats_summary(stats));

    print_final(&protocol);
    Ok(())
}

async fn run_actors(config: &SimulationConfig) -> anyhow::Result<()> {
    banner("Selective Repeat: sender and receiver tasks");
    let channel = RandomCorruption::new(config.corruption_rate, config.seed)?;
    let report = engine::run_session(config, channel).await?;

    log_message(&stats_summary(&report.stats));
    log_message(&format!(
        "Delivered in order: {}",
        sequences(&report.delivered).green()
    ));
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Set RUST_LOG to see protocol records.
    env_logger::init();
    Lazy::force(&PROGRAM_START_TIME);

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };

    match cli.command {
        Command::Scenario { window } => run_scenario(window.unwrap_or(config.window_size)),
        Command::Simulate(overrides) => run_simulation(&overrides.apply(config)?),
        Command::Actors(overrides) => run_actors(&overrides.apply(config)?).await,
    }
}

//! Agarium Headless
//!
//! Runs one or more local sessions against a shared in-process hub without
//! a window. Rendering and real pointer capture live elsewhere; here each
//! session is steered by a scripted pilot.

pub mod app;
pub mod input;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use agarium_core::GameConfig;
use app::App;

/// Command-line options.
#[derive(Debug, Clone, Parser)]
#[command(name = "agarium", about = "Run Agarium sessions headless")]
pub struct Args {
    /// TOML file overriding world constants.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Number of local sessions sharing one hub.
    #[arg(long, default_value_t = 2)]
    pub sessions: usize,

    /// Ticks to simulate before exiting.
    #[arg(long, default_value_t = 3_600)]
    pub ticks: u64,

    /// Simulation tick rate (Hz).
    #[arg(long, default_value_t = 60)]
    pub tick_rate: u32,

    /// Base seed; session `i` uses `seed + i`.
    #[arg(long, default_value_t = 12_345)]
    pub seed: u32,

    /// Pace ticks against the wall clock instead of a virtual one.
    #[arg(long)]
    pub realtime: bool,
}

impl Args {
    /// Reject options the app loop cannot run with.
    pub fn check(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.sessions > 0, "need at least one session");
        // The clock advances in whole milliseconds per tick.
        anyhow::ensure!(
            (1..=1_000).contains(&self.tick_rate),
            "tick rate must be between 1 and 1000 Hz, got {}",
            self.tick_rate
        );
        Ok(())
    }
}

/// Install the global tracing subscriber. `RUST_LOG` overrides the default.
pub fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("agarium=info".parse()?))
        .try_init()?;
    Ok(())
}

/// Headless entry point.
pub fn run(args: Args) -> anyhow::Result<()> {
    init_tracing()?;

    let config = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => GameConfig::default(),
    };
    args.check()?;

    tracing::info!(
        sessions = args.sessions,
        ticks = args.ticks,
        tick_rate = args.tick_rate,
        realtime = args.realtime,
        "Starting Agarium (headless)"
    );

    let mut app = App::new(config, args.sessions, args.seed, args.tick_rate);
    if args.realtime {
        app.run_realtime(args.ticks);
    } else {
        app.run_virtual(args.ticks);
    }
    app.log_summary();

    Ok(())
}

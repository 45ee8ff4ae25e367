//! Walkabout Testbed
//!
//! Walks a scripted agent through a procedural world without a renderer and
//! prints the session summary as JSON.
//!
//! Use `--config <path>` or `WALKABOUT_CONFIG` to pick a config file.
//! Set `RUST_LOG=info` (or `trace` for every tick) to follow along.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;
use walkabout_physics::{Octants, Partition, PartitionKind, Quadrants, WalkaboutConfig};
use walkabout_testbed::config::{load_config, CONFIG_ENV};
use walkabout_testbed::{scripted_walk, world, Action, Phase, Session, SessionSummary};

#[derive(Parser, Debug)]
#[command(name = "walkabout-testbed", about = "Headless movement collision testbed")]
struct Args {
    /// Load configuration from a TOML file
    #[arg(long, short = 'c', value_name = "PATH")]
    config: Option<PathBuf>,

    /// Ticks spent in each walking phase
    #[arg(long, value_name = "TICKS", default_value_t = 1000)]
    ticks: u32,

    /// Ticks to run before the world mesh is indexed
    #[arg(long, value_name = "TICKS", default_value_t = 10)]
    bootstrap: u32,

    /// Override the configured partition scheme
    #[arg(long, value_enum)]
    partition: Option<PartitionArg>,

    /// Sleep between ticks to run at the configured cadence
    #[arg(long)]
    realtime: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum PartitionArg {
    Octree,
    Quadtree,
}

impl From<PartitionArg> for PartitionKind {
    fn from(arg: PartitionArg) -> Self {
        match arg {
            PartitionArg::Octree => PartitionKind::Octree,
            PartitionArg::Quadtree => PartitionKind::Quadtree,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let mut config = load_config(args.config.as_deref(), std::env::var(CONFIG_ENV).ok())?;
    if let Some(partition) = args.partition {
        config.index.partition = partition.into();
    }

    let summary = match config.index.partition {
        PartitionKind::Octree => run::<Octants>(config, &args)?,
        PartitionKind::Quadtree => run::<Quadrants>(config, &args)?,
    };

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn run<P: Partition>(config: WalkaboutConfig, args: &Args) -> anyhow::Result<SessionSummary> {
    let pace = args
        .realtime
        .then(|| Duration::from_millis(config.movement.tick_interval_ms));
    let script = scripted_walk(&config, args.ticks);

    let mut session = Session::<P>::new(config);
    session.run(&[Phase::new(Action::Wait, args.bootstrap)], pace);

    let triangles = world::build_world().context("Failed to build world mesh")?;
    session.load_world(triangles);
    session.run(&script, pace);

    let summary = session.summary().clone();
    info!(
        ticks = summary.ticks,
        contacts = summary.contacts,
        grounded_ticks = summary.grounded_ticks,
        respawns = summary.respawns,
        "Session finished"
    );
    Ok(summary)
}

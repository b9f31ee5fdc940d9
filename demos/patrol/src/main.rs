//! patrol: a simulated robot run for the bbcon behavior-based controller.
//!
//! A point robot wanders a circular arena bounded by a dark line, steering
//! around a round obstacle, until its camera finds the green target patch or
//! it is about to collide.  Sensors and motors are simulated in [`world`];
//! everything else is the real controller.
//!
//! # Usage
//!
//! ```bash
//! patrol                                  # defaults, deterministic policy
//! patrol --policy stochastic --seed 7
//! patrol --config patrol.json --realtime  # pace at config.period_ms
//! RUST_LOG=debug patrol                   # per-tick decisions
//! ```

mod world;

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use tracing::info;
use tracing_subscriber::EnvFilter;

use bb_behavior::{AvoidObstacle, CollisionStop, FoundTarget, KeepInArea, Thresholds, Wander};
use bb_control::{BbconBuilder, ControllerObserver, Decision, Pacer, RunSummary, SleepPacer};
use bb_core::{ControllerConfig, SelectionPolicy, Tick};
use bb_motor::Motob;
use bb_sensor::SensorBank;

use world::{Channel, SharedWorld, World, WorldDrive, WorldSensor};

/// Cycle limit used when neither the config file nor the CLI sets one.
const DEFAULT_MAX_TICKS: u64 = 2_000;

// ── Configuration ─────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
struct Priorities {
    wander:       f64,
    avoid:        f64,
    keep_in_area: f64,
    collision:    f64,
    target:       f64,
}

impl Default for Priorities {
    fn default() -> Self {
        Self { wander: 0.5, avoid: 2.0, keep_in_area: 3.0, collision: 10.0, target: 8.0 }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct PatrolConfig {
    controller: ControllerConfig,
    thresholds: Thresholds,
    priorities: Priorities,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum PolicyArg {
    Deterministic,
    Stochastic,
}

impl From<PolicyArg> for SelectionPolicy {
    fn from(p: PolicyArg) -> Self {
        match p {
            PolicyArg::Deterministic => SelectionPolicy::Deterministic,
            PolicyArg::Stochastic    => SelectionPolicy::Stochastic,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "patrol")]
#[command(about = "Run the behavior-based controller in a simulated arena", long_about = None)]
struct Cli {
    /// JSON config file (controller, thresholds, priorities)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the RNG seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// Override the arbitration policy
    #[arg(short, long, value_enum)]
    policy: Option<PolicyArg>,

    /// Override the cycle limit
    #[arg(short = 'n', long)]
    max_ticks: Option<u64>,

    /// Sleep out each loop period instead of running flat out
    #[arg(long)]
    realtime: bool,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    print_config: bool,
}

fn load_config(cli: &Cli) -> Result<PatrolConfig> {
    let mut cfg = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))?
        }
        None => PatrolConfig::default(),
    };
    if let Some(seed) = cli.seed {
        cfg.controller.seed = seed;
    }
    if let Some(policy) = cli.policy {
        cfg.controller.policy = policy.into();
    }
    if let Some(n) = cli.max_ticks {
        cfg.controller.max_ticks = Some(n);
    }
    cfg.controller.max_ticks.get_or_insert(DEFAULT_MAX_TICKS);
    cfg.thresholds.validate()?;
    Ok(cfg)
}

// ── Observer ──────────────────────────────────────────────────────────────────

/// Tallies which behavior won each tick.
#[derive(Default)]
struct WinTally {
    wins:  BTreeMap<String, u64>,
    names: Vec<String>,
}

impl ControllerObserver for WinTally {
    fn on_decision(&mut self, _tick: Tick, decision: &Decision) {
        let name = decision
            .winner
            .and_then(|id| self.names.get(id.index()).cloned())
            .unwrap_or_else(|| "<none>".to_owned());
        *self.wins.entry(name).or_default() += 1;
    }

    fn on_run_end(&mut self, summary: &RunSummary) {
        for (name, n) in &self.wins {
            info!(behavior = %name, wins = n, "tally");
        }
        info!(ticks = summary.ticks, reason = ?summary.reason, "patrol over");
    }
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let cfg = load_config(&cli)?;
    if cli.print_config {
        println!("{}", serde_json::to_string_pretty(&cfg)?);
        return Ok(());
    }

    let world: SharedWorld = Arc::new(Mutex::new(World::default()));

    let mut bank = SensorBank::new();
    let sonar = bank.add(WorldSensor::new("sonar", Channel::Sonar, Arc::clone(&world)))?;
    let floor = bank.add(WorldSensor::new("ir_array", Channel::Floor, Arc::clone(&world)))?;
    let camera = bank.add(WorldSensor::new("camera", Channel::Camera, Arc::clone(&world)))?;

    let th = &cfg.thresholds;
    let pr = &cfg.priorities;
    let motob = Motob::new(WorldDrive::new(Arc::clone(&world)), cfg.controller.default_speed);
    let builder = BbconBuilder::new(cfg.controller.clone(), motob)
        .sensors(bank)
        .behavior(Wander::new(pr.wander))
        .behavior(AvoidObstacle::new(sonar, th, pr.avoid))
        .behavior(KeepInArea::new(floor, th, pr.keep_in_area))
        .behavior(CollisionStop::new(sonar, th, pr.collision))
        .behavior(FoundTarget::new(camera, th, pr.target));

    let summary = if cli.realtime {
        run(builder.pacer(SleepPacer::new()))?
    } else {
        run(builder)?
    };

    let w = world.lock().map_err(|_| anyhow::anyhow!("world state poisoned"))?;
    println!(
        "{:?} after {} ticks at ({:.1}, {:.1}), travelled {:.0} cm",
        summary.reason, summary.ticks, w.x, w.y, w.distance_cm
    );
    Ok(())
}

fn run<P: Pacer>(builder: BbconBuilder<Motob<WorldDrive>, P>) -> Result<RunSummary> {
    let mut bbcon = builder.build()?;
    let mut tally = WinTally {
        names: bbcon.registry().slots().iter().map(|s| s.name().to_owned()).collect(),
        ..Default::default()
    };
    Ok(bbcon.run(&mut tally)?)
}

//! cover — run the covering simulation on a text map.
//!
//! Agents enter through the map's single `S` cell and spread until every
//! reachable cell holds a settled agent.  Without `--async` every agent acts
//! every tick; with `--async P` each agent (and the spawner) acts with
//! probability `P`.  Asynchronous runs can stall on maps with pillars or
//! doorways (such as `maps/office.map`); `--ticks` bounds them.
//!
//! ```text
//! cover maps/room.map
//! cover maps/corridor.map --async 0.5 --seed 7 --output out/ --json
//! cover maps/spiral.map --tps 10 --watch
//! ```

use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cov_core::{Discipline, SimConfig, Tick};
use cov_grid::load_map_file;
use cov_output::{CsvWriter, SimOutputObserver};
use cov_sim::{SimBuilder, SimObserver, Snapshot, TickSummary};

// ── Command line ──────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "cover", version, about = "Fill a grid region with agents from a single source cell")]
struct Args {
    /// Text map: '#' wall, 'S' source (exactly one), '.' or space free,
    /// ';' starts a comment line.
    map: PathBuf,

    /// Activation rate in [0, 1].  Selects the asynchronous discipline.
    #[arg(long = "async", value_name = "P")]
    activation: Option<f64>,

    /// Master RNG seed.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Stop after this many ticks even if the region is not packed.
    #[arg(long, default_value_t = 10_000)]
    ticks: u64,

    /// Ticks per second; 0 runs unpaced.
    #[arg(long, default_value_t = 0.0)]
    tps: f64,

    /// Write agent_snapshots.csv and tick_summaries.csv into this directory.
    #[arg(long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Snapshot every N ticks (CSV rows and --watch frames).
    #[arg(long, default_value_t = 1)]
    snapshot_every: u64,

    /// Print the grid at every snapshot.
    #[arg(long)]
    watch: bool,

    /// Print run statistics as JSON instead of text.
    #[arg(long)]
    json: bool,

    /// Debug-level logging (spawns and settlements).
    #[arg(short, long)]
    verbose: bool,
}

// ── Observer ──────────────────────────────────────────────────────────────────

/// Paces the loop, optionally draws frames, and forwards to the CSV writer.
struct CliObserver {
    output:   Option<SimOutputObserver<CsvWriter>>,
    interval: Option<Duration>,
    watch:    bool,
    last:     Instant,
}

impl SimObserver for CliObserver {
    fn on_tick_end(&mut self, tick: Tick, summary: &TickSummary) {
        if let Some(out) = self.output.as_mut() {
            out.on_tick_end(tick, summary);
        }
        if let Some(interval) = self.interval {
            thread::sleep(interval.saturating_sub(self.last.elapsed()));
            self.last = Instant::now();
        }
    }

    fn on_snapshot(&mut self, tick: Tick, snapshot: &Snapshot<'_>) {
        if let Some(out) = self.output.as_mut() {
            out.on_snapshot(tick, snapshot);
        }
        if self.watch {
            println!("{tick}");
            print!("{}", snapshot.render());
        }
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        if let Some(out) = self.output.as_mut() {
            out.on_sim_end(final_tick);
        }
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn init_tracing(verbose: bool) -> Result<()> {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("installing tracing subscriber")
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose)?;

    // 1. Map.
    let grid = load_map_file(&args.map)
        .with_context(|| format!("loading map {}", args.map.display()))?;

    // 2. Configuration.
    let config = SimConfig {
        total_ticks:           args.ticks,
        seed:                  args.seed,
        discipline:            Discipline::from_activation(args.activation)?,
        output_interval_ticks: args.snapshot_every,
    };
    let mut sim = SimBuilder::new(config, grid).tick_rate(args.tps).build()?;
    info!(
        map = %args.map.display(),
        discipline = %sim.config.discipline,
        reachable = sim.reachable_cells(),
        seed = args.seed,
        "starting"
    );
    debug!(source = %sim.grid.source(), centre = ?sim.grid.geometric_center(), "map analysis");

    // 3. Output.
    let output = match &args.output {
        Some(dir) => Some(SimOutputObserver::new(
            CsvWriter::new(dir).with_context(|| format!("opening output in {}", dir.display()))?,
        )),
        None => None,
    };
    let mut observer = CliObserver {
        output,
        interval: sim.clock.tick_interval(),
        watch:    args.watch,
        last:     Instant::now(),
    };

    // 4. Run.
    let started = Instant::now();
    sim.run_until_complete(args.ticks, &mut observer)?;
    let elapsed = started.elapsed();

    if let Some(err) = observer.output.as_mut().and_then(|o| o.take_error()) {
        return Err(err).context("writing simulation output");
    }

    // 5. Report.
    let stats = sim.stats();
    if !stats.complete {
        warn!(
            ticks = stats.ticks,
            settled = stats.settled,
            agents = stats.agents,
            "tick limit reached before the region was packed"
        );
    }
    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        print!("{}", sim.snapshot().render());
        println!("{stats}");
        println!("wall time  : {:.3}s", elapsed.as_secs_f64());
    }
    Ok(())
}

//! torus: walks a population of travelers across a migration network.
//!
//! Without `--config` the network is the default N×N torus.  With
//! `--export <dir>` the torus is first written out as a `Local_Migration.bin`
//! rate file pair and the run then reads it back through the file-backed
//! factory, so both paths can be compared from the command line.
//!
//! A JSON summary is printed to stdout; logs go to stderr.

mod export;
mod logging;

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Result, bail};
use clap::Parser;
use log::{debug, info};
use serde::Serialize;

use mig_core::{DAYS_PER_YEAR, ExternalNodeId, Gender, NodeIdMap, SimRng, Traveler};
use mig_factory::{
    DefaultMigrationInfoFactory, MigrationConfig, construct_migration_info_factory, setup_nodes,
};

// ── Command line ──────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(version, about = "Walk travelers across a migration network")]
struct Args {
    /// Migration configuration (JSON).  Defaults to a torus built from the
    /// options below.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Torus side length when no config is given.
    #[arg(long, default_value_t = 5)]
    torus_size: u32,

    /// Per-neighbour daily migration rate when no config is given.
    #[arg(long, default_value_t = 0.1)]
    rate: f64,

    /// Node count for file-backed configs (external ids 1..=N).
    #[arg(long, default_value_t = 100)]
    nodes: u32,

    /// Demographics id reference the rate files must match.
    #[arg(long, default_value = "Default Geography")]
    id_reference: String,

    #[arg(long, default_value_t = 1_000)]
    travelers: usize,

    #[arg(long, default_value_t = 30)]
    days: u32,

    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Export the torus as a rate file into this directory and run from it.
    #[arg(long)]
    export: Option<PathBuf>,

    /// off, error, warn, info, debug or trace.
    #[arg(long, default_value = "info")]
    log_level: String,
}

// ── Travelers ─────────────────────────────────────────────────────────────────

struct Person {
    age_days: f64,
    gender:   Gender,
    /// Index into the node list (== suid).
    node:     usize,
    trips:    u32,
}

impl Traveler for Person {
    fn age_days(&self) -> f64 {
        self.age_days
    }

    fn gender(&self) -> Gender {
        self.gender
    }
}

// ── Summary ───────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct Summary {
    factory:             String,
    nodes:               usize,
    travelers:           usize,
    days:                u32,
    trips:               u64,
    trips_by_type:       BTreeMap<&'static str, u64>,
    never_moved:         usize,
    min_node_occupancy:  usize,
    max_node_occupancy:  usize,
    elapsed_ms:          u128,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(&args.log_level)?;
    let started = Instant::now();

    let mut config = match &args.config {
        Some(path) => MigrationConfig::from_json_file(path)?,
        None => MigrationConfig {
            use_default_migration: true,
            torus_size: args.torus_size,
            default_local_rate: args.rate,
            ..MigrationConfig::default()
        },
    };

    let node_ids = if config.use_default_migration {
        DefaultMigrationInfoFactory::from_config(&config)?.node_id_map()?
    } else {
        NodeIdMap::from_external_ids((1..=args.nodes).map(ExternalNodeId))?
    };
    if node_ids.is_empty() {
        bail!("no nodes to simulate");
    }

    if let Some(dir) = &args.export {
        if !config.use_default_migration {
            bail!("--export needs a default-geography configuration");
        }
        let torus = DefaultMigrationInfoFactory::from_config(&config)?;
        export::export_torus(&torus, &node_ids, &args.id_reference, dir)?;
        config = MigrationConfig {
            use_default_migration: false,
            input_dir: dir.clone(),
            enable_local: true,
            local_filename: export::LOCAL_FILENAME.to_string(),
            // The exported rates already include x_Local_Migration.
            x_local: 1.0,
            ..config
        };
    }

    let mut factory = construct_migration_info_factory(&config, &args.id_reference)?;
    let mut nodes = setup_nodes(factory.as_mut(), &node_ids, args.seed)?;

    let mut rng = SimRng::new(args.seed);
    let mut people: Vec<Person> = (0..args.travelers)
        .map(|_| Person {
            age_days: rng.gen_range(0.0..80.0 * DAYS_PER_YEAR),
            gender:   if rng.gen_bool(0.5) { Gender::Female } else { Gender::Male },
            node:     rng.gen_range(0..nodes.len()),
            trips:    0,
        })
        .collect();
    info!("{} travelers on {} nodes for {} days", people.len(), nodes.len(), args.days);

    let mut trips_by_type: BTreeMap<&'static str, u64> = BTreeMap::new();
    for day in 0..args.days {
        let mut moved = 0u64;
        for person in &mut people {
            let node = &mut nodes[person.node];
            if let Some(step) = node.pick_migration_step(&*person) {
                // Departures due after today wait for a later step.
                if step.wait_time < 1.0 {
                    person.node = step.destination.index();
                    person.trips += 1;
                    moved += 1;
                    *trips_by_type.entry(step.migration_type.label()).or_default() += 1;
                }
            }
            person.age_days += 1.0;
        }
        debug!("day {day}: {moved} trips");
    }

    let mut occupancy = vec![0usize; nodes.len()];
    for person in &people {
        occupancy[person.node] += 1;
    }

    let summary = Summary {
        factory:            factory.kind().to_string(),
        nodes:              nodes.len(),
        travelers:          people.len(),
        days:               args.days,
        trips:              trips_by_type.values().sum(),
        trips_by_type,
        never_moved:        people.iter().filter(|p| p.trips == 0).count(),
        min_node_occupancy: occupancy.iter().copied().min().unwrap_or(0),
        max_node_occupancy: occupancy.iter().copied().max().unwrap_or(0),
        elapsed_ms:         started.elapsed().as_millis(),
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Parser;
use routemap::mapgen::{LayerRole, layer_role};
use routemap::{GeneratedRun, MapConfig, RoomCategory, generate_run};
use tools::{init_logging, load_config};
use tracing::info;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 1000)]
    runs: u64,
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();
    let config = load_config(args.config.as_deref(), None)?;

    println!("Sweeping {} runs starting at seed {}...", args.runs, args.seed);
    let mut orphans = 0_usize;
    let mut runs_with_orphans = 0_u64;
    for offset in 0..args.runs {
        let seed = args.seed.wrapping_add(offset);
        let run = generate_run(seed, &config)?;
        if let Err(violation) = check_run(&run, &config) {
            bail!("Invariant failed for seed {seed}: {violation}");
        }
        let run_orphans = run.orphan_count();
        if run_orphans > 0 {
            runs_with_orphans += 1;
            orphans += run_orphans;
        }
    }

    info!(runs = args.runs, runs_with_orphans, orphans, "sweep finished");
    println!("Sweep completed: {runs_with_orphans} runs left {orphans} nodes unreachable.");
    Ok(())
}

fn check_run(run: &GeneratedRun, config: &MapConfig) -> Result<(), String> {
    let map = &run.map;
    if map.len() != config.total_layers {
        return Err(format!("expected {} layers, got {}", config.total_layers, map.len()));
    }
    if run.connections.len() != map.len().saturating_sub(1) {
        return Err(format!("expected {} boundaries", map.len().saturating_sub(1)));
    }

    for (index, rooms) in map.layers().iter().enumerate() {
        let layer = index + 1;
        let role = layer_role(layer, config);
        let forced_room = match role {
            LayerRole::First => Some(RoomCategory::Monster),
            LayerRole::Treasure => Some(RoomCategory::Treasure),
            LayerRole::PreFinal => Some(RoomCategory::Rest),
            LayerRole::Final => Some(RoomCategory::Boss),
            LayerRole::Drawn => None,
        };
        match forced_room {
            Some(room) if rooms.iter().any(|r| *r != room) => {
                return Err(format!("layer {layer} should only hold {room}: {rooms:?}"));
            }
            Some(_) => {}
            None => {
                if !(config.min_nodes..=config.max_nodes).contains(&rooms.len()) {
                    return Err(format!("layer {layer} has {} nodes", rooms.len()));
                }
                for room in [
                    RoomCategory::EliteMonster,
                    RoomCategory::Treasure,
                    RoomCategory::Rest,
                    RoomCategory::Shop,
                    RoomCategory::Event,
                ] {
                    if rooms.iter().filter(|r| **r == room).count() > 1 {
                        return Err(format!("layer {layer} repeats {room}: {rooms:?}"));
                    }
                }
            }
        }
    }

    for (boundary, edges) in run.connections.boundaries().iter().enumerate() {
        let upper = map.layer(boundary).map_or(0, <[_]>::len);
        for from in 0..upper {
            if run.connections.out_degree(boundary, from) > config.max_out_degree {
                return Err(format!("boundary {boundary} node {from} exceeds the degree cap"));
            }
        }
        let planned: Vec<_> = edges.iter().filter(|edge| !edge.fallback).collect();
        for (i, left) in planned.iter().enumerate() {
            if let Some(right) = planned[i + 1..].iter().find(|right| left.crosses(right)) {
                return Err(format!("boundary {boundary}: {left:?} crosses {right:?}"));
            }
        }
    }
    Ok(())
}

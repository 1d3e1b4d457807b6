use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use routemap::generate_run;
use tools::{init_logging, load_config, render_text};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Run seed; both the rooms and the connections derive from it
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Override the number of layers (forced layers keep their positions)
    #[arg(short, long)]
    layers: Option<usize>,
    /// Path to a JSON map config
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Print the run as JSON instead of text
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let config = load_config(args.config.as_deref(), args.layers)?;
    let run = generate_run(args.seed, &config).context("Generation rejected the config")?;

    if args.json {
        let json = serde_json::to_string_pretty(&run).context("Failed to serialize run")?;
        println!("{json}");
    } else {
        println!("Seed: {}", run.seed);
        print!("{}", render_text(&run.map, &run.connections));
        println!("Map fingerprint: {:016x}", run.map.fingerprint());
        println!("Connection fingerprint: {:016x}", run.connections.fingerprint());
    }

    Ok(())
}

//! Shared plumbing for the command-line callers: config loading, logging, text output.

use std::fs;
use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use routemap::{ConnectionSet, Map, MapConfig};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub fn init_logging() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "routemap=info,tools=info".into()),
        )
        .with(fmt::layer().with_writer(io::stderr))
        .init();
}

/// Reads a JSON config file, applying `--layers` on top when given.
pub fn load_config(path: Option<&Path>, total_layers: Option<usize>) -> Result<MapConfig> {
    let mut config = match path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            serde_json::from_str::<MapConfig>(&raw)
                .with_context(|| format!("Failed to parse config JSON: {}", path.display()))?
        }
        None => MapConfig::default(),
    };
    if let Some(total_layers) = total_layers {
        config.total_layers = total_layers;
    }
    config.validate().context("Invalid map config")?;
    Ok(config)
}

/// One line of `[layer-index Room]` nodes per layer, each followed by its outgoing edges.
pub fn render_text(map: &Map, connections: &ConnectionSet) -> String {
    let mut out = String::new();
    for (layer, rooms) in map.layers().iter().enumerate() {
        let nodes: Vec<String> = rooms
            .iter()
            .enumerate()
            .map(|(index, room)| format!("[{layer}-{index} {room}]"))
            .collect();
        out.push_str(&nodes.join("  "));
        out.push('\n');

        if let Some(edges) = connections.boundary(layer) {
            let links: Vec<String> = edges
                .iter()
                .map(|edge| {
                    let marker = if edge.fallback { "*" } else { "" };
                    format!("{layer}-{}->{}-{}{marker}", edge.from, layer + 1, edge.to)
                })
                .collect();
            out.push_str(&format!("  links: {}\n", links.join(", ")));
            let orphans = connections.orphans(layer, map.layer(layer + 1).map_or(0, <[_]>::len));
            if !orphans.is_empty() {
                out.push_str(&format!("  unreachable below: {orphans:?}\n"));
            }
        }
    }
    out
}

//! Run map generation: rooms per layer first, then the edges between layers.

pub mod model;
pub mod progression;
pub mod weights;

mod connections;
mod generator;
mod seed;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::{ConfigError, MapConfig};
use crate::rng::{ChaChaSource, RandomSource};

pub use connections::ConnectionBuilder;
pub use generator::MapBuilder;
pub use model::{Connection, ConnectionSet, Layer, Map, MapShapeError};
pub use progression::{LayerRole, layer_role, node_count, weights_for};
pub use seed::{Stream, derive_stream_seed};
pub use weights::{WeightTable, choose};

/// Builds a map with default rules; forced layers stay at their fixed positions.
pub fn build_map(total_layers: usize, rng: &mut impl RandomSource) -> Map {
    MapBuilder::new(MapConfig::with_total_layers(total_layers)).build(rng)
}

pub fn build_connections(map: &Map, rng: &mut impl RandomSource) -> ConnectionSet {
    ConnectionBuilder::default().build(map, rng)
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedRun {
    pub seed: u64,
    pub map: Map,
    pub connections: ConnectionSet,
}

impl GeneratedRun {
    pub fn orphan_count(&self) -> usize {
        self.map
            .layers()
            .iter()
            .skip(1)
            .enumerate()
            .map(|(boundary, lower)| self.connections.orphans(boundary, lower.len()).len())
            .sum()
    }
}

/// Generates rooms and connections from independent streams of `run_seed`.
pub fn generate_run(run_seed: u64, config: &MapConfig) -> Result<GeneratedRun, ConfigError> {
    config.validate()?;

    let mut room_rng = ChaChaSource::seed_from_u64(derive_stream_seed(run_seed, Stream::Rooms));
    let map = MapBuilder::new(config.clone()).build(&mut room_rng);

    let mut link_rng =
        ChaChaSource::seed_from_u64(derive_stream_seed(run_seed, Stream::Connections));
    let connections = ConnectionBuilder::from_config(config).build(&map, &mut link_rng);

    let run = GeneratedRun { seed: run_seed, map, connections };
    info!(
        seed = run_seed,
        layers = run.map.len(),
        orphans = run.orphan_count(),
        fingerprint = run.map.fingerprint(),
        "run map generated"
    );
    Ok(run)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_run_matches_manual_stream_wiring() {
        let seed = 123_u64;
        let run = generate_run(seed, &MapConfig::default()).expect("default config is valid");

        let map = build_map(
            15,
            &mut ChaChaSource::seed_from_u64(derive_stream_seed(seed, Stream::Rooms)),
        );
        let connections = build_connections(
            &map,
            &mut ChaChaSource::seed_from_u64(derive_stream_seed(seed, Stream::Connections)),
        );

        assert_eq!(run.map, map);
        assert_eq!(run.connections, connections);
    }

    #[test]
    fn generate_run_rejects_invalid_config() {
        let config = MapConfig::with_total_layers(0);
        assert_eq!(generate_run(1, &config), Err(ConfigError::NoLayers));
    }
}

pub mod config;
pub mod mapgen;
pub mod rng;
pub mod types;

pub use config::{ConfigError, MapConfig};
pub use mapgen::{
    Connection, ConnectionBuilder, ConnectionSet, GeneratedRun, Layer, Map, MapBuilder,
    MapShapeError, WeightTable, build_connections, build_map, generate_run,
};
pub use rng::{ChaChaSource, RandomSource, ScriptedSource};
pub use types::*;

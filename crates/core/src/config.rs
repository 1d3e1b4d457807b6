//! Generation parameters for one run, defaulting to the fifteen-layer layout.
//!
//! Forced layer positions are absolute, 1-based layer numbers. They are not
//! rescaled when `total_layers` changes; a forced index past the end of the
//! run never applies.

use std::error::Error;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::mapgen::WeightTable;
use crate::types::RoomCategory;

pub const DEFAULT_TOTAL_LAYERS: usize = 15;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub total_layers: usize,
    pub first_layer: usize,
    pub treasure_layer: usize,
    pub pre_final_layer: usize,
    pub final_layer: usize,
    pub base_weights: WeightTable,
    /// Layers up to and including this one never draw EliteMonster or Rest.
    pub early_layer_cutoff: usize,
    /// Layers past this one never draw Rest.
    pub late_rest_cutoff: usize,
    pub min_nodes: usize,
    pub max_nodes: usize,
    pub first_nodes: usize,
    pub pre_final_nodes: usize,
    pub final_nodes: usize,
    pub max_out_degree: usize,
    pub max_links_per_node: usize,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            total_layers: DEFAULT_TOTAL_LAYERS,
            first_layer: 1,
            treasure_layer: 8,
            pre_final_layer: 14,
            final_layer: 15,
            base_weights: default_base_weights(),
            early_layer_cutoff: 4,
            late_rest_cutoff: 12,
            min_nodes: 2,
            max_nodes: 4,
            first_nodes: 1,
            pre_final_nodes: 3,
            final_nodes: 1,
            max_out_degree: 3,
            max_links_per_node: 3,
        }
    }
}

impl MapConfig {
    /// Default parameters with a different layer count; forced layers keep their positions.
    pub fn with_total_layers(total_layers: usize) -> Self {
        Self { total_layers, ..Self::default() }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.total_layers == 0 {
            return Err(ConfigError::NoLayers);
        }

        let forced = self.forced_layers();
        for (position, &(name, index)) in forced.iter().enumerate() {
            if index == 0 {
                return Err(ConfigError::ZeroLayerIndex { name });
            }
            if let Some(&(first, _)) = forced[..position].iter().find(|&&(_, seen)| seen == index) {
                return Err(ConfigError::SharedForcedLayer { first, second: name, index });
            }
        }

        if self.min_nodes == 0 || self.min_nodes > self.max_nodes {
            return Err(ConfigError::InvalidNodeRange { min: self.min_nodes, max: self.max_nodes });
        }
        if self.first_nodes == 0 || self.pre_final_nodes == 0 || self.final_nodes == 0 {
            return Err(ConfigError::EmptyFixedLayer);
        }

        for (category, weight) in self.base_weights.iter() {
            if category == RoomCategory::Boss {
                return Err(ConfigError::BossInBaseWeights);
            }
            if weight < 0 {
                return Err(ConfigError::NegativeWeight { category, weight });
            }
        }

        if self.max_out_degree == 0 || self.max_links_per_node == 0 {
            return Err(ConfigError::ZeroLinkLimit);
        }
        Ok(())
    }

    fn forced_layers(&self) -> [(&'static str, usize); 4] {
        [
            ("first_layer", self.first_layer),
            ("treasure_layer", self.treasure_layer),
            ("pre_final_layer", self.pre_final_layer),
            ("final_layer", self.final_layer),
        ]
    }
}

pub fn default_base_weights() -> WeightTable {
    WeightTable::new()
        .with(RoomCategory::Monster, 50)
        .with(RoomCategory::EliteMonster, 20)
        .with(RoomCategory::Treasure, 15)
        .with(RoomCategory::Rest, 10)
        .with(RoomCategory::Shop, 5)
        .with(RoomCategory::Event, 5)
}

/// Describes why a [`MapConfig`] cannot drive generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    NoLayers,
    ZeroLayerIndex { name: &'static str },
    SharedForcedLayer { first: &'static str, second: &'static str, index: usize },
    InvalidNodeRange { min: usize, max: usize },
    EmptyFixedLayer,
    BossInBaseWeights,
    NegativeWeight { category: RoomCategory, weight: i32 },
    ZeroLinkLimit,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoLayers => write!(f, "total_layers must be at least 1"),
            Self::ZeroLayerIndex { name } => write!(f, "{name} is 1-based and cannot be 0"),
            Self::SharedForcedLayer { first, second, index } => {
                write!(f, "{first} and {second} both claim layer {index}")
            }
            Self::InvalidNodeRange { min, max } => {
                write!(f, "node range {min}..={max} is empty or allows zero nodes")
            }
            Self::EmptyFixedLayer => write!(f, "fixed layer node counts must be at least 1"),
            Self::BossInBaseWeights => {
                write!(f, "Boss is reserved for the final layer and cannot be a base weight")
            }
            Self::NegativeWeight { category, weight } => {
                write!(f, "base weight for {category} is negative ({weight})")
            }
            Self::ZeroLinkLimit => write!(f, "link limits must be at least 1"),
        }
    }
}

impl Error for ConfigError {}

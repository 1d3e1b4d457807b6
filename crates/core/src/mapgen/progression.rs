//! Per-layer policy rules: how wide a layer is and which rooms it may draw.

use crate::config::MapConfig;
use crate::rng::{RandomSource, uniform_range};
use crate::types::RoomCategory;

use super::weights::WeightTable;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LayerRole {
    First,
    Treasure,
    PreFinal,
    Final,
    Drawn,
}

impl LayerRole {
    pub fn is_forced(self) -> bool {
        !matches!(self, LayerRole::Drawn)
    }

    /// Only the two closing layers use the strict single-room tables.
    pub fn is_strict(self) -> bool {
        matches!(self, LayerRole::PreFinal | LayerRole::Final)
    }
}

pub fn layer_role(layer: usize, config: &MapConfig) -> LayerRole {
    if layer == config.first_layer {
        LayerRole::First
    } else if layer == config.treasure_layer {
        LayerRole::Treasure
    } else if layer == config.pre_final_layer {
        LayerRole::PreFinal
    } else if layer == config.final_layer {
        LayerRole::Final
    } else {
        LayerRole::Drawn
    }
}

/// Node count for the 1-based `layer`. Only fixed layers skip the draw.
pub fn node_count(layer: usize, config: &MapConfig, rng: &mut impl RandomSource) -> usize {
    match layer_role(layer, config) {
        LayerRole::PreFinal => config.pre_final_nodes,
        LayerRole::Final => config.final_nodes,
        LayerRole::First => config.first_nodes,
        LayerRole::Treasure | LayerRole::Drawn => {
            uniform_range(rng, config.min_nodes, config.max_nodes)
        }
    }
}

/// Weight table the 1-based `layer` draws from before adjacency filtering.
pub fn weights_for(layer: usize, strict: bool, config: &MapConfig) -> WeightTable {
    if layer == config.first_layer {
        return WeightTable::single(RoomCategory::Monster);
    }
    if layer == config.treasure_layer {
        return WeightTable::single(RoomCategory::Treasure);
    }
    if strict {
        if layer == config.pre_final_layer {
            return WeightTable::single(RoomCategory::Rest);
        }
        if layer == config.final_layer {
            return WeightTable::single(RoomCategory::Boss);
        }
    }

    let mut weights = config.base_weights.clone();
    if layer <= config.early_layer_cutoff {
        weights.exclude(RoomCategory::EliteMonster);
        weights.exclude(RoomCategory::Rest);
    }
    if layer > config.late_rest_cutoff {
        weights.exclude(RoomCategory::Rest);
    }
    weights
}

//! Layer-by-layer room assignment: width, base table, adjacency exclusions, draw.

use tracing::{debug, trace};

use crate::config::MapConfig;
use crate::rng::RandomSource;
use crate::types::RoomCategory;

use super::model::{Layer, Map};
use super::progression::{layer_role, node_count, weights_for};
use super::weights::{WeightTable, choose};

pub struct MapBuilder {
    config: MapConfig,
}

impl MapBuilder {
    pub fn new(config: MapConfig) -> Self {
        Self { config }
    }

    pub fn build(&self, rng: &mut impl RandomSource) -> Map {
        let mut layers: Vec<Layer> = Vec::with_capacity(self.config.total_layers);
        for layer in 1..=self.config.total_layers {
            let rooms = self.build_layer(layer, layers.last().map(Vec::as_slice), rng);
            trace!(layer, ?rooms, "layer assigned");
            layers.push(rooms);
        }
        Map::from_generated(layers)
    }

    fn build_layer(
        &self,
        layer: usize,
        parents: Option<&[RoomCategory]>,
        rng: &mut impl RandomSource,
    ) -> Layer {
        let role = layer_role(layer, &self.config);
        let count = node_count(layer, &self.config, rng);
        let weights = weights_for(layer, role.is_strict(), &self.config);

        if role.is_forced() {
            let forced = weights.iter().next().map_or(RoomCategory::Monster, |(room, _)| room);
            return vec![forced; count];
        }

        let mut rooms = Layer::with_capacity(count);
        for node in 0..count {
            let mut working = weights.clone();
            if let Some(parents) = parents.filter(|parents| !parents.is_empty()) {
                exclude_parent(&mut working, parents, node);
                exclude_siblings(&mut working, &rooms);
            }
            working.retain_positive();
            if working.is_empty() {
                debug!(layer, node, "every room excluded; substituting Monster");
                working = WeightTable::single(RoomCategory::Monster);
            }
            // A non-empty table of positive weights always yields a room.
            rooms.push(choose(&working, rng).unwrap_or(RoomCategory::Monster));
        }
        rooms
    }
}

/// Blocks a special room directly below the same special room.
fn exclude_parent(weights: &mut WeightTable, parents: &[RoomCategory], node: usize) {
    let parent = parents[node.min(parents.len() - 1)];
    if parent.is_special() {
        weights.exclude(parent);
    }
}

fn exclude_siblings(weights: &mut WeightTable, siblings: &[RoomCategory]) {
    for &sibling in siblings {
        if sibling.is_sibling_capped() {
            weights.exclude(sibling);
        }
    }
}

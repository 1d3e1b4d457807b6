//! Edge synthesis between consecutive layers under a degree cap and a no-crossing rule.

use std::cmp::Ordering;

use tracing::{debug, warn};

use crate::config::MapConfig;
use crate::rng::{RandomSource, uniform_range};

use super::model::{Connection, ConnectionSet, Map};

pub struct ConnectionBuilder {
    max_out_degree: usize,
    max_links_per_node: usize,
}

impl Default for ConnectionBuilder {
    fn default() -> Self {
        Self::from_config(&MapConfig::default())
    }
}

impl ConnectionBuilder {
    pub fn new(max_out_degree: usize, max_links_per_node: usize) -> Self {
        Self { max_out_degree, max_links_per_node: max_links_per_node.max(1) }
    }

    pub fn from_config(config: &MapConfig) -> Self {
        Self::new(config.max_out_degree, config.max_links_per_node)
    }

    pub fn build(&self, map: &Map, rng: &mut impl RandomSource) -> ConnectionSet {
        let mut boundaries = Vec::with_capacity(map.len().saturating_sub(1));
        for (boundary, pair) in map.layers().windows(2).enumerate() {
            boundaries.push(self.build_boundary(boundary, pair[0].len(), pair[1].len(), rng));
        }
        ConnectionSet::from_boundaries(boundaries)
    }

    fn build_boundary(
        &self,
        boundary: usize,
        upper_count: usize,
        lower_count: usize,
        rng: &mut impl RandomSource,
    ) -> Vec<Connection> {
        let mut edges: Vec<Connection> = Vec::new();
        let mut out_degree = vec![0_usize; upper_count];

        for to in 0..lower_count {
            let wanted = uniform_range(rng, 1, self.max_links_per_node);
            let candidates = ranked_candidates(to, upper_count, lower_count);
            let mut linked: Vec<usize> = Vec::with_capacity(wanted);

            let mut cursor = 0;
            while linked.len() < wanted && cursor < candidates.len() {
                let take_nearest = rng.next_f64() < 0.5;
                let from = if take_nearest || cursor + 1 >= candidates.len() {
                    candidates[cursor]
                } else {
                    candidates[cursor + 1]
                };
                cursor += 1;

                if out_degree[from] >= self.max_out_degree || linked.contains(&from) {
                    continue;
                }
                let edge = Connection::new(from, to);
                if edges.iter().any(|accepted| accepted.crosses(&edge)) {
                    continue;
                }
                edges.push(edge);
                out_degree[from] += 1;
                linked.push(from);
            }

            if linked.is_empty() {
                let open =
                    candidates.iter().copied().find(|&from| out_degree[from] < self.max_out_degree);
                match open {
                    Some(from) => {
                        debug!(boundary, from, to, "planar walk failed; linking nearest open node");
                        edges.push(Connection { from, to, fallback: true });
                        out_degree[from] += 1;
                    }
                    None => warn!(boundary, to, "every upper node saturated; node left unreachable"),
                }
            }
        }
        edges
    }
}

/// Upper indices ordered by distance to the lower node's projected position; ties keep index order.
fn ranked_candidates(to: usize, upper_count: usize, lower_count: usize) -> Vec<usize> {
    let projected = to as f64 * upper_count as f64 / lower_count as f64;
    let distance = |from: usize| (from as f64 - projected).abs();
    let mut candidates: Vec<usize> = (0..upper_count).collect();
    candidates.sort_by(|&a, &b| distance(a).partial_cmp(&distance(b)).unwrap_or(Ordering::Equal));
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{ChaChaSource, ScriptedSource};
    use crate::types::RoomCategory::{Boss, Monster, Rest};

    fn widths(counts: &[usize]) -> Map {
        Map::from_layers(counts.iter().map(|&count| vec![Monster; count]).collect())
            .expect("test layers are non-empty")
    }

    #[test]
    fn candidates_sort_by_projected_distance() {
        assert_eq!(ranked_candidates(0, 3, 1), vec![0, 1, 2]);
        assert_eq!(ranked_candidates(1, 4, 2), vec![2, 1, 3, 0]);
        // 1 * 3 / 2 = 1.5: indices 1 and 2 tie and keep ascending order.
        assert_eq!(ranked_candidates(1, 3, 2), vec![1, 2, 0]);
    }

    #[test]
    fn one_boundary_per_adjacent_layer_pair() {
        let map = widths(&[1, 3, 2, 4, 1]);
        let set = ConnectionBuilder::default().build(&map, &mut ChaChaSource::seed_from_u64(3));
        assert_eq!(set.len(), 4);
        assert!(ConnectionBuilder::default()
            .build(&widths(&[2]), &mut ScriptedSource::constant(0.3))
            .is_empty());
    }

    #[test]
    fn rest_layer_feeds_the_boss() {
        let map = Map::from_layers(vec![vec![Rest, Rest, Rest], vec![Boss]]).expect("valid map");
        let set = ConnectionBuilder::default().build(&map, &mut ScriptedSource::constant(0.0));
        assert_eq!(set.boundary(0), Some(&[Connection::new(0, 0)][..]));
    }

    #[test]
    fn second_nearest_pick_and_fallback_trace() {
        let map = widths(&[2, 2]);
        let set = ConnectionBuilder::default().build(&map, &mut ScriptedSource::constant(0.99));
        assert_eq!(
            set.boundary(0),
            Some(&[Connection::new(1, 0), Connection { from: 1, to: 1, fallback: true }][..])
        );
    }

    #[test]
    fn saturated_upper_node_leaves_orphan() {
        // Maximum link count with only one candidate; the fourth lower node cannot attach.
        let map = widths(&[1, 4]);
        let set = ConnectionBuilder::default().build(&map, &mut ScriptedSource::constant(0.99));
        assert_eq!(set.out_degree(0, 0), 3);
        assert_eq!(set.orphans(0, 4), vec![3]);
        assert!(set.boundary(0).unwrap_or_default().iter().all(|edge| !edge.fallback));
    }

    #[test]
    fn nearest_picks_at_max_link_count_never_exceed_degree_cap() {
        // Seven lower nodes against a capacity of six: both upper nodes saturate.
        let map = widths(&[2, 7]);
        let mut rng = ScriptedSource::new(vec![0.99, 0.0, 0.0, 0.0]);
        let set = ConnectionBuilder::default().build(&map, &mut rng);
        assert_eq!(set.out_degree(0, 0), 3);
        assert_eq!(set.out_degree(0, 1), 3);
        assert!(!set.orphans(0, 7).is_empty());
        assert_eq!(set.boundary(0).map_or(0, <[_]>::len), 6);
    }

    #[test]
    fn degree_cap_and_planarity_hold_for_random_widths() {
        let builder = ConnectionBuilder::default();
        for seed in 0..300_u64 {
            let mut rng = ChaChaSource::seed_from_u64(seed);
            let counts: Vec<usize> =
                (0..6).map(|_| uniform_range(&mut rng, 1, 4)).collect();
            let map = widths(&counts);
            let set = builder.build(&map, &mut rng);
            for (boundary, edges) in set.boundaries().iter().enumerate() {
                for from in 0..counts[boundary] {
                    assert!(set.out_degree(boundary, from) <= 3, "seed {seed} boundary {boundary}");
                }
                let planned: Vec<_> = edges.iter().filter(|edge| !edge.fallback).collect();
                for (i, left) in planned.iter().enumerate() {
                    for right in &planned[i + 1..] {
                        assert!(!left.crosses(right), "seed {seed}: {left:?} crosses {right:?}");
                    }
                }
            }
        }
    }

    #[test]
    fn custom_degree_cap_is_respected() {
        let map = widths(&[1, 4]);
        let set = ConnectionBuilder::new(1, 3).build(&map, &mut ScriptedSource::constant(0.99));
        assert_eq!(set.out_degree(0, 0), 1);
        assert_eq!(set.orphans(0, 4), vec![1, 2, 3]);
    }
}

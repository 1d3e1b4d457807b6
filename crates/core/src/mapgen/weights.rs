//! Ordered category weight tables and the weighted draw over them.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::rng::RandomSource;
use crate::types::RoomCategory;

/// Category weights in insertion order. Entries with weight `<= 0` never win a draw.
///
/// Deserialization goes through [`WeightTable::set`], so a repeated category keeps one entry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<(RoomCategory, i32)>", into = "Vec<(RoomCategory, i32)>")]
pub struct WeightTable {
    entries: Vec<(RoomCategory, i32)>,
}

impl WeightTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(category: RoomCategory) -> Self {
        Self { entries: vec![(category, 1)] }
    }

    /// Replaces the weight in place, or appends a new entry at the end.
    pub fn set(&mut self, category: RoomCategory, weight: i32) {
        match self.entries.iter_mut().find(|(existing, _)| *existing == category) {
            Some(entry) => entry.1 = weight,
            None => self.entries.push((category, weight)),
        }
    }

    pub fn with(mut self, category: RoomCategory, weight: i32) -> Self {
        self.set(category, weight);
        self
    }

    pub fn exclude(&mut self, category: RoomCategory) {
        for entry in self.entries.iter_mut().filter(|(existing, _)| *existing == category) {
            entry.1 = 0;
        }
    }

    pub fn weight(&self, category: RoomCategory) -> i32 {
        self.entries
            .iter()
            .find(|(existing, _)| *existing == category)
            .map_or(0, |(_, weight)| *weight)
    }

    pub fn retain_positive(&mut self) {
        self.entries.retain(|(_, weight)| *weight > 0);
    }

    pub fn total(&self) -> i64 {
        self.entries
            .iter()
            .filter(|(_, weight)| *weight > 0)
            .map(|(_, weight)| i64::from(*weight))
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (RoomCategory, i32)> + '_ {
        self.entries.iter().copied()
    }

    pub fn contains(&self, category: RoomCategory) -> bool {
        self.entries.iter().any(|(existing, _)| *existing == category)
    }
}

impl FromIterator<(RoomCategory, i32)> for WeightTable {
    fn from_iter<I: IntoIterator<Item = (RoomCategory, i32)>>(iter: I) -> Self {
        let mut table = WeightTable::new();
        for (category, weight) in iter {
            table.set(category, weight);
        }
        table
    }
}

impl From<Vec<(RoomCategory, i32)>> for WeightTable {
    fn from(entries: Vec<(RoomCategory, i32)>) -> Self {
        entries.into_iter().collect()
    }
}

impl From<WeightTable> for Vec<(RoomCategory, i32)> {
    fn from(table: WeightTable) -> Self {
        table.entries
    }
}

/// Draws one category proportionally to its weight.
///
/// Returns `None` only when no entry carries a positive weight. When rounding
/// walks past every entry the last positive entry wins.
pub fn choose(table: &WeightTable, rng: &mut impl RandomSource) -> Option<RoomCategory> {
    let total = table.total();
    if total <= 0 {
        warn!(entries = table.len(), "weighted draw over a table with no positive weight");
        return None;
    }

    let mut remaining = rng.next_f64() * total as f64;
    let mut last = None;
    for (category, weight) in table.iter().filter(|(_, weight)| *weight > 0) {
        let weight = f64::from(weight);
        if remaining < weight {
            return Some(category);
        }
        remaining -= weight;
        last = Some(category);
    }
    last
}

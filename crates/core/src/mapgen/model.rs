//! Public data models for generated run maps and their inter-layer connections.

use std::error::Error;
use std::fmt;

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

use crate::types::RoomCategory;

pub type Layer = Vec<RoomCategory>;

/// Layers ordered top to bottom; a node is addressed by `(layer, index)`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Map {
    layers: Vec<Layer>,
}

impl Map {
    /// Wraps hand-built layers, rejecting any layer without nodes.
    pub fn from_layers(layers: Vec<Layer>) -> Result<Self, MapShapeError> {
        if let Some(layer) = layers.iter().position(Vec::is_empty) {
            return Err(MapShapeError::EmptyLayer { layer });
        }
        Ok(Self { layers })
    }

    pub(super) fn from_generated(layers: Vec<Layer>) -> Self {
        Self { layers }
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer(&self, layer: usize) -> Option<&[RoomCategory]> {
        self.layers.get(layer).map(Vec::as_slice)
    }

    pub fn node(&self, layer: usize, index: usize) -> Option<RoomCategory> {
        self.layers.get(layer).and_then(|nodes| nodes.get(index)).copied()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend((self.layers.len() as u32).to_le_bytes());
        for layer in &self.layers {
            bytes.extend((layer.len() as u32).to_le_bytes());
            bytes.extend(layer.iter().map(|category| category.code()));
        }
        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }
}

/// Edge from node `from` of layer `L` to node `to` of layer `L + 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Connection {
    pub from: usize,
    pub to: usize,
    /// Added after the planar walk failed; may cross other edges.
    #[serde(default)]
    pub fallback: bool,
}

impl Connection {
    pub fn new(from: usize, to: usize) -> Self {
        Self { from, to, fallback: false }
    }

    pub fn crosses(&self, other: &Connection) -> bool {
        (self.from < other.from && self.to > other.to)
            || (self.from > other.from && self.to < other.to)
    }
}

/// One edge collection per layer boundary; entry `l` joins layer `l` to `l + 1`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionSet {
    boundaries: Vec<Vec<Connection>>,
}

impl ConnectionSet {
    pub(super) fn from_boundaries(boundaries: Vec<Vec<Connection>>) -> Self {
        Self { boundaries }
    }

    pub fn boundaries(&self) -> &[Vec<Connection>] {
        &self.boundaries
    }

    pub fn boundary(&self, layer: usize) -> Option<&[Connection]> {
        self.boundaries.get(layer).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.boundaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boundaries.is_empty()
    }

    /// Lower-layer indices reachable from `(layer, index)`, ascending.
    pub fn targets_from(&self, layer: usize, index: usize) -> Vec<usize> {
        let mut targets: Vec<usize> = self
            .boundary(layer)
            .unwrap_or_default()
            .iter()
            .filter(|connection| connection.from == index)
            .map(|connection| connection.to)
            .collect();
        targets.sort_unstable();
        targets.dedup();
        targets
    }

    pub fn out_degree(&self, layer: usize, from: usize) -> usize {
        self.boundary(layer)
            .unwrap_or_default()
            .iter()
            .filter(|connection| connection.from == from)
            .count()
    }

    /// Nodes of layer `layer + 1` with no incoming edge; unreachable for the player.
    pub fn orphans(&self, layer: usize, lower_count: usize) -> Vec<usize> {
        let edges = self.boundary(layer).unwrap_or_default();
        (0..lower_count).filter(|&to| !edges.iter().any(|edge| edge.to == to)).collect()
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend((self.boundaries.len() as u32).to_le_bytes());
        for edges in &self.boundaries {
            bytes.extend((edges.len() as u32).to_le_bytes());
            for edge in edges {
                bytes.extend((edge.from as u32).to_le_bytes());
                bytes.extend((edge.to as u32).to_le_bytes());
                bytes.push(u8::from(edge.fallback));
            }
        }
        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }
}

/// Describes why hand-built layers cannot form a [`Map`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapShapeError {
    EmptyLayer { layer: usize },
}

impl fmt::Display for MapShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyLayer { layer } => write!(f, "layer {layer} has no nodes"),
        }
    }
}

impl Error for MapShapeError {}

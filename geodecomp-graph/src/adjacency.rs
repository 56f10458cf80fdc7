//! Per-node neighbor lookup.
//!
//! Grounded on the original's conditional compilation between a
//! `std::map`-backed adjacency and a `Region`-backed sparse edge set
//! (`USE_MAP_ADJACENCY` in `distributedptscotchunstructuredpartition.h`):
//! here both live side by side as two implementations of one trait rather
//! than a compile-time switch.

use std::collections::HashMap;

use geodecomp_coord::{Coord, Streak};
use geodecomp_region::Region;

/// `neighbors_of(node) -> list<node>`. No self-loop requirement.
pub trait Adjacency: Send + Sync {
    fn neighbors_of(&self, node: u64) -> Vec<u64>;

    fn degree(&self, node: u64) -> usize {
        self.neighbors_of(node).len()
    }
}

/// Dense/explicit adjacency backed by a hash map, convenient for
/// hand-built test graphs and small meshes.
#[derive(Debug, Clone, Default)]
pub struct HashMapAdjacency {
    edges: HashMap<u64, Vec<u64>>,
}

impl HashMapAdjacency {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_edge(&mut self, from: u64, to: u64) {
        self.edges.entry(from).or_default().push(to);
    }

    pub fn insert_undirected_edge(&mut self, a: u64, b: u64) {
        self.insert_edge(a, b);
        self.insert_edge(b, a);
    }
}

impl Adjacency for HashMapAdjacency {
    fn neighbors_of(&self, node: u64) -> Vec<u64> {
        self.edges.get(&node).cloned().unwrap_or_default()
    }
}

/// Sparse adjacency stored as a `Region<2>` edge set: `(from, to)` pairs as
/// coordinates. Favorable when the edge set is itself highly structured
/// (e.g. stencil-like connectivity) and compresses well under run-length
/// encoding.
#[derive(Debug, Clone, Default)]
pub struct RegionAdjacency {
    edges: Region<2>,
}

impl RegionAdjacency {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_edge(&mut self, from: u64, to: u64) {
        self.edges.insert_coord(Coord::new([to as i64, from as i64]));
    }

    pub fn insert_undirected_edge(&mut self, a: u64, b: u64) {
        self.insert_edge(a, b);
        self.insert_edge(b, a);
    }
}

impl Adjacency for RegionAdjacency {
    fn neighbors_of(&self, node: u64) -> Vec<u64> {
        self.edges
            .streaks()
            .filter(|s| s.origin.get(1) == node as i64)
            .flat_map(|s: Streak<2>| (s.origin.x()..s.end_x).map(|x| x as u64))
            .collect()
    }
}

//! `ReorderingUnstructuredGrid` (spec.md §4.I): maps logical cell ids to a
//! physical layout clustering rows of similar length within aligned
//! blocks of `SIGMA` slots, matching SELL-C-σ vectorization constraints.
//!
//! Grounded on `reorderingunstructuredgrid.h`'s `setWeights` (counting row
//! occurrences in a `(row, col)` weight matrix) and the original's
//! SIGMA-window `stable_sort` by descending row length — `nbg_ch/ordering.rs`
//! uses the same "bucket, then stable-sort within a bounded window" shape
//! for its own row-length-driven reordering.

pub mod error;

pub use error::GridError;

use std::collections::HashMap;

use geodecomp_coord::Coord;
use geodecomp_region::Region;

/// Default alignment width for SELL-C-σ-style blocking, matching the
/// original's typical vector width for wide-SIMD targets.
pub const DEFAULT_SIGMA: usize = 32;

/// A fixed logical ↔ physical id bijection over a node set, built once
/// from that node set and a weight matrix's row lengths. `resize` is
/// unsupported: the extent is the node-set's cardinality, fixed at
/// construction (spec.md §4.I).
#[derive(Debug, Clone)]
pub struct ReorderingUnstructuredGrid {
    sigma: usize,
    logical_to_physical: HashMap<u64, u64>,
    physical_to_logical: Vec<u64>,
}

impl ReorderingUnstructuredGrid {
    /// Build the reordering for `nodes`, using `weights` — an iterator of
    /// `(row, col)` matrix entries — to compute each row's length.
    ///
    /// `nodes` is walked in streak order (not insertion order) before any
    /// id is assigned, so the physical layout depends only on the node
    /// set's geometry and the weight matrix, matching the original's
    /// requirement that reordering be deterministic given those two
    /// inputs.
    pub fn new(nodes: &Region<1>, weights: impl IntoIterator<Item = (u64, u64)>, sigma: usize) -> Self {
        let sigma = sigma.max(1);

        let mut row_len: HashMap<u64, u64> = HashMap::new();
        for (row, _col) in weights {
            *row_len.entry(row).or_insert(0) += 1;
        }

        let mut pairs: Vec<(u64, u64)> = nodes
            .coords()
            .map(|c| {
                let id = c.x() as u64;
                (id, row_len.get(&id).copied().unwrap_or(0))
            })
            .collect();

        for window in pairs.chunks_mut(sigma) {
            window.sort_by(|a, b| b.1.cmp(&a.1));
        }

        let mut logical_to_physical = HashMap::with_capacity(pairs.len());
        let mut physical_to_logical = Vec::with_capacity(pairs.len());
        for (physical_id, (logical_id, _row_len)) in pairs.into_iter().enumerate() {
            logical_to_physical.insert(logical_id, physical_id as u64);
            physical_to_logical.push(logical_id);
        }

        ReorderingUnstructuredGrid {
            sigma,
            logical_to_physical,
            physical_to_logical,
        }
    }

    pub fn sigma(&self) -> usize {
        self.sigma
    }

    pub fn len(&self) -> usize {
        self.physical_to_logical.len()
    }

    pub fn is_empty(&self) -> bool {
        self.physical_to_logical.is_empty()
    }

    pub fn logical_to_physical(&self, logical_id: u64) -> Option<u64> {
        self.logical_to_physical.get(&logical_id).copied()
    }

    pub fn physical_to_logical(&self, physical_id: u64) -> Option<u64> {
        self.physical_to_logical.get(physical_id as usize).copied()
    }

    /// Always fails: the original leaves resizing unimplemented, and
    /// spec.md §4.I states the extent is defined by the node set and
    /// weight matrix supplied at construction.
    pub fn resize(&mut self, _new_len: usize) -> Result<(), GridError> {
        Err(GridError::UnsupportedOperation("resize"))
    }

    /// Render `logical_region` as physical ids, in ascending physical
    /// order, so the wire representation is independent of this rank's
    /// local SIGMA-block reordering. Logical ids outside this grid's node
    /// set are dropped rather than erroring — see DESIGN.md's resolution
    /// of the "partially overlapping region" open question.
    pub fn save_region(&self, logical_region: &Region<1>) -> Vec<u64> {
        let mut physical_ids: Vec<u64> = logical_region
            .coords()
            .filter_map(|c| self.logical_to_physical(c.x() as u64))
            .collect();
        physical_ids.sort_unstable();
        physical_ids
    }

    /// Inverse of `save_region`: physical ids back to a `Region<1>` of
    /// logical ids. Physical ids outside `[0, len())` are dropped.
    pub fn load_region(&self, physical_ids: &[u64]) -> Region<1> {
        physical_ids
            .iter()
            .filter_map(|&p| self.physical_to_logical(p))
            .map(|logical_id| Coord::<1>::new([logical_id as i64]))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geodecomp_coord::Streak;

    fn node_set(ids: &[i64]) -> Region<1> {
        ids.iter().map(|&id| Coord::<1>::new([id])).collect()
    }

    #[test]
    fn bijection_round_trips_every_logical_id() {
        let nodes = node_set(&[0, 1, 2, 3, 4, 5, 6, 7]);
        let weights = vec![(0, 0), (0, 1), (1, 0), (3, 0), (3, 1), (3, 2)];
        let grid = ReorderingUnstructuredGrid::new(&nodes, weights, 4);

        for logical in 0..8u64 {
            let physical = grid.logical_to_physical(logical).unwrap();
            assert_eq!(grid.physical_to_logical(physical), Some(logical));
        }
    }

    #[test]
    fn sigma_block_sort_is_non_increasing_and_stable() {
        let nodes = node_set(&[0, 1, 2, 3]);
        // rows 0 and 2 tie at length 1; row 0 precedes row 2 in the node
        // set, so a stable sort keeps 0 before 2 in the output too.
        let weights = vec![(0, 0), (1, 0), (1, 1), (1, 2), (2, 0), (3, 0), (3, 1)];
        let grid = ReorderingUnstructuredGrid::new(&nodes, weights, 4);

        let mut physical_order: Vec<(u64, u64)> = (0..4)
            .map(|p| {
                let logical = grid.physical_to_logical(p).unwrap();
                let len = match logical {
                    0 => 1,
                    1 => 3,
                    2 => 1,
                    3 => 2,
                    _ => unreachable!(),
                };
                (logical, len)
            })
            .collect();

        let lens: Vec<u64> = physical_order.iter().map(|&(_, l)| l).collect();
        assert_eq!(lens, vec![3, 2, 1, 1]);

        physical_order.retain(|&(_, l)| l == 1);
        let tied_logical_order: Vec<u64> = physical_order.into_iter().map(|(l, _)| l).collect();
        assert_eq!(tied_logical_order, vec![0, 2]);
    }

    #[test]
    fn windows_beyond_sigma_sort_independently() {
        // Two SIGMA=2 windows: [0,1] and [2,3]. Row lengths 1,5,1,5 would
        // sort to 5,1 within each window if windows were respected, not
        // 5,5,1,1 as a single global sort would produce.
        let nodes = node_set(&[0, 1, 2, 3]);
        let mut weights = Vec::new();
        for row in [1u64, 3] {
            for col in 0..5u64 {
                weights.push((row, col));
            }
        }
        weights.push((0, 0));
        weights.push((2, 0));

        let grid = ReorderingUnstructuredGrid::new(&nodes, weights, 2);
        let order: Vec<u64> = (0..4).map(|p| grid.physical_to_logical(p).unwrap()).collect();
        assert_eq!(order, vec![1, 0, 3, 2]);
    }

    #[test]
    fn resize_is_unsupported() {
        let nodes = node_set(&[0, 1]);
        let mut grid = ReorderingUnstructuredGrid::new(&nodes, Vec::new(), 4);
        assert!(matches!(grid.resize(4), Err(GridError::UnsupportedOperation(_))));
    }

    #[test]
    fn save_and_load_region_round_trip_through_physical_ids() {
        let nodes = node_set(&[0, 1, 2, 3]);
        let weights = vec![(1, 0), (1, 1), (3, 0)];
        let grid = ReorderingUnstructuredGrid::new(&nodes, weights, 4);

        let mut logical_region = Region::<1>::new();
        logical_region.insert_streak(Streak::new(Coord::new([1]), 3).unwrap());

        let physical_ids = grid.save_region(&logical_region);
        let round_tripped = grid.load_region(&physical_ids);
        assert_eq!(round_tripped, logical_region);
    }

    #[test]
    fn save_region_drops_ids_outside_the_node_set() {
        let nodes = node_set(&[0, 1]);
        let grid = ReorderingUnstructuredGrid::new(&nodes, Vec::new(), 4);

        let mut region = Region::<1>::new();
        region.insert_coord(Coord::new([0]));
        region.insert_coord(Coord::new([99]));

        assert_eq!(grid.save_region(&region), vec![grid.logical_to_physical(0).unwrap()]);
    }
}

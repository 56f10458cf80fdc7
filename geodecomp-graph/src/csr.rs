//! Compressed-sparse-row view of a local cell range's adjacency.
//!
//! Grounded on spec.md §4.E step 2 (`vert_tab`/`edge_tab`) and on the wire
//! shape of `formats/ebg_csr.rs`'s offsets/heads pair.

use rayon::prelude::*;

use crate::adjacency::Adjacency;

/// `vert_tab[i] = edge_base_of_i`, `edge_tab` concatenates
/// `adjacency.neighbors_of(start + i)` for `i` in `[0, local_cells)`.
///
/// `vert_tab` has `local_cells + 1` entries; the neighbors of local vertex
/// `i` are `edge_tab[vert_tab[i]..vert_tab[i + 1]]`, expressed as *local*
/// indices relative to `start` (neighbors outside `[start, start+local_cells)`
/// are dropped — they belong to another rank's local graph and are not
/// needed to bisect this one).
#[derive(Debug, Clone)]
pub struct Csr {
    pub start: u64,
    pub vert_tab: Vec<usize>,
    pub edge_tab: Vec<usize>,
}

impl Csr {
    pub fn build(adjacency: &dyn Adjacency, start: u64, local_cells: usize) -> Csr {
        let rows: Vec<Vec<usize>> = (0..local_cells)
            .into_par_iter()
            .map(|i| {
                adjacency
                    .neighbors_of(start + i as u64)
                    .into_iter()
                    .filter_map(|n| {
                        let local = n.checked_sub(start)?;
                        if (local as usize) < local_cells {
                            Some(local as usize)
                        } else {
                            None
                        }
                    })
                    .collect()
            })
            .collect();

        let mut vert_tab = Vec::with_capacity(local_cells + 1);
        let mut edge_tab = Vec::new();
        vert_tab.push(0);
        for row in rows {
            edge_tab.extend(row);
            vert_tab.push(edge_tab.len());
        }

        Csr { start, vert_tab, edge_tab }
    }

    pub fn local_cells(&self) -> usize {
        self.vert_tab.len().saturating_sub(1)
    }

    pub fn neighbors_of_local(&self, local: usize) -> &[usize] {
        &self.edge_tab[self.vert_tab[local]..self.vert_tab[local + 1]]
    }
}

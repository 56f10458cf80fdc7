//! Wires `CellComponent`s together from an `Initializer` and an
//! `Adjacency` and runs them to completion (spec.md §6, §4.H).

use std::collections::HashMap;

use geodecomp_coord::CoordBox;
use geodecomp_graph::Adjacency;
use geodecomp_region::Region;

use crate::cell::Cell;
use crate::component::CellComponent;
use crate::error::DataflowError;
use crate::receiver::ReceiverDirectory;

/// Caller-provided grid setup (spec.md §6). `grid_box` and `max_steps`
/// bound the simulation; `init_cell` seeds the per-cell state for each
/// node id the initializer's grid box covers.
pub trait Initializer<C: Cell>: Send + Sync {
    fn grid_box(&self) -> CoordBox<1>;
    fn get_adjacency(&self, region: &Region<1>) -> Box<dyn Adjacency>;
    fn init_cell(&self, id: u64) -> C;
    fn max_steps(&self) -> u64;
}

/// Build one `CellComponent` per node in `initializer.grid_box()`, wire
/// them against `initializer.get_adjacency`, and run every one to
/// `max_steps` concurrently. All ranks in a single call must share
/// `basename`; a second simulation running in the same process needs a
/// distinct one (spec.md §6).
pub async fn run_simulation<C: Cell>(
    initializer: &(impl Initializer<C> + ?Sized),
    basename: &str,
) -> Result<HashMap<u64, C>, DataflowError> {
    let grid_box = initializer.grid_box();
    let mut region = Region::<1>::new();
    region.insert_box(grid_box);

    let ids: Vec<u64> = region.coords().map(|c| c.x() as u64).collect();
    let adjacency = initializer.get_adjacency(&region);

    let directory: ReceiverDirectory<C::Msg> = ReceiverDirectory::new();
    let mut components = Vec::with_capacity(ids.len());
    for &id in &ids {
        let neighbors = adjacency.neighbors_of(id);
        let cell = initializer.init_cell(id);
        components.push(CellComponent::new(id, neighbors, cell, basename, directory.clone())?);
    }

    let max_steps = initializer.max_steps();
    let handles: Vec<_> = components
        .into_iter()
        .map(|component| {
            let id = component.id();
            (id, tokio::spawn(component.setup_dataflow(max_steps)))
        })
        .collect();

    let mut result = HashMap::with_capacity(handles.len());
    for (id, handle) in handles {
        let cell = handle
            .await
            .map_err(|_| DataflowError::Cancelled(format!("cell {id}")))??;
        result.insert(id, cell);
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Neighborhood;
    use geodecomp_coord::Coord;
    use geodecomp_graph::HashMapAdjacency;

    #[derive(Clone)]
    struct Counter {
        updates: u32,
        last_seen: HashMap<u64, u32>,
    }

    impl Cell for Counter {
        type Msg = u32;
        const NANO_STEPS_PER_STEP: u32 = 1;

        fn update(&mut self, hood: &mut Neighborhood<'_, u32>, _nano_step: u32, _step: u64) {
            self.updates += 1;
            for &neighbor in hood.neighbors() {
                let msg = *hood.get(neighbor).unwrap();
                self.last_seen.insert(neighbor, msg);
            }
        }
    }

    struct RingInitializer {
        n: u64,
        max_steps: u64,
    }

    impl Initializer<Counter> for RingInitializer {
        fn grid_box(&self) -> CoordBox<1> {
            CoordBox::new(Coord::new([0]), Coord::new([self.n as i64]))
        }

        fn get_adjacency(&self, _region: &Region<1>) -> Box<dyn Adjacency> {
            let mut adj = HashMapAdjacency::new();
            for i in 0..self.n {
                adj.insert_undirected_edge(i, (i + 1) % self.n);
            }
            Box::new(adj)
        }

        fn init_cell(&self, _id: u64) -> Counter {
            Counter {
                updates: 0,
                last_seen: HashMap::new(),
            }
        }

        fn max_steps(&self) -> u64 {
            self.max_steps
        }
    }

    #[tokio::test]
    async fn dataflow_liveness_every_cell_completes_max_steps_updates() {
        let initializer = RingInitializer { n: 4, max_steps: 3 };
        let result = run_simulation(&initializer, "ring").await.unwrap();

        assert_eq!(result.len(), 4);
        for cell in result.values() {
            assert_eq!(cell.updates, 3);
        }
    }
}

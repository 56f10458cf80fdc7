//! `geodecomp`: a facade over the distributed stencil/cellular-automaton
//! simulation core.
//!
//! This crate re-exports the workspace's sub-crates and defines the
//! umbrella [`Error`] every sub-crate's error converts into — it's the
//! only crate in the workspace that depends on all the others, so it's
//! also the only one that can own that conversion without a dependency
//! cycle (mirrors `butterfly-common::Error`'s `From<std::io::Error>`
//! pattern, lifted one level to wrap whole sub-crate error enums instead
//! of a single external one).
//!
//! | Re-export | Spec component |
//! |---|---|
//! | [`coord`] | A: `Coord`/`Streak`/`CoordBox` |
//! | [`region`] | B: `Region<N>` |
//! | [`graph`] | C/D/E: `Adjacency`, `Partition`, `DistributedPartitioner` |
//! | [`partition`] | F: `PartitionManager` |
//! | [`dataflow`] | G/H: `Receiver<M>`, `CellComponent<Cell, Msg>` |
//! | [`grid`] | I: `ReorderingUnstructuredGrid` |

pub use geodecomp_common as common;
pub use geodecomp_coord as coord;
pub use geodecomp_dataflow as dataflow;
pub use geodecomp_grid as grid;
pub use geodecomp_graph as graph;
pub use geodecomp_partition as partition;
pub use geodecomp_region as region;

pub use geodecomp_common::init_tracing;
pub use geodecomp_coord::{Coord, CoordBox, Streak};
pub use geodecomp_dataflow::{run_simulation, Cell, CellComponent, Initializer, Neighborhood, Receiver, ReceiverDirectory};
pub use geodecomp_grid::ReorderingUnstructuredGrid;
pub use geodecomp_graph::{Adjacency, DistributedPartitioner, HashMapAdjacency, Partition as PartitionTrait, RegionAdjacency};
pub use geodecomp_partition::PartitionManager;
pub use geodecomp_region::{Bounded, Region, Topology, Torus, TorusX};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Region(#[from] geodecomp_region::RegionError),

    #[error(transparent)]
    Graph(#[from] geodecomp_graph::PartitionError),

    #[error(transparent)]
    Dataflow(#[from] geodecomp_dataflow::DataflowError),

    #[error(transparent)]
    Grid(#[from] geodecomp_grid::GridError),

    #[error(transparent)]
    Common(#[from] geodecomp_common::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

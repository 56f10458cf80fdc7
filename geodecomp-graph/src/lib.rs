//! Graph adjacency, CSR construction and distributed partitioning.
//!
//! [`DistributedPartitioner`] consumes an [`Adjacency`] and produces a
//! [`Partition`], following spec.md §4.E: each simulated rank slices its
//! initial cell range, builds a local CSR view, hands it to a pluggable
//! [`PartitionBackend`], and the resulting partials are merged across
//! ranks through a [`Transport`].

pub mod adjacency;
pub mod backend;
pub mod csr;
pub mod error;
pub mod partition;
pub mod partitioner;
pub mod transport;

pub use adjacency::{Adjacency, HashMapAdjacency, RegionAdjacency};
pub use backend::{PartitionBackend, RecursiveBisectionBackend};
pub use csr::Csr;
pub use error::{PartitionBackendError, PartitionError, TransportError};
pub use partition::{Partition, SimplePartition};
pub use partitioner::DistributedPartitioner;
pub use transport::{InProcessTransport, Transport};

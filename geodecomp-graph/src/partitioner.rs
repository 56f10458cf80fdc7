//! `DistributedPartitioner`: recursive bisection plus all-to-all region
//! exchange, grounded on `distributedptscotchunstructuredpartition.h`.

use rayon::prelude::*;
use tracing::{debug, warn};

use geodecomp_coord::Coord;
use geodecomp_region::Region;

use crate::adjacency::Adjacency;
use crate::backend::PartitionBackend;
use crate::csr::Csr;
use crate::error::{PartitionBackendError, PartitionError};
use crate::partition::SimplePartition;
use crate::transport::Transport;

pub struct DistributedPartitioner<'a> {
    backend: &'a dyn PartitionBackend,
    transport: &'a dyn Transport,
}

impl<'a> DistributedPartitioner<'a> {
    pub fn new(backend: &'a dyn PartitionBackend, transport: &'a dyn Transport) -> Self {
        DistributedPartitioner { backend, transport }
    }

    /// Partition `total_cells` cells, weighted by `weights` (one weight per
    /// partition; `weights.len()` is also the number of simulated ranks —
    /// each rank owns exactly one partition's initial linear slice, then
    /// the backend may reassign some of its local cells to other
    /// partitions for balance).
    pub fn run(
        &self,
        total_cells: u64,
        weights: &[f64],
        adjacency: &dyn Adjacency,
    ) -> Result<SimplePartition<1>, PartitionError> {
        let num_partitions = weights.len();
        if num_partitions == 0 {
            return Err(PartitionError::Backend(PartitionBackendError::Failed(
                "weights must not be empty".to_string(),
            )));
        }
        let weight_sum: f64 = weights.iter().sum();
        if weight_sum <= 0.0 {
            return Err(PartitionError::Backend(PartitionBackendError::Failed(
                "sum of weights must be positive".to_string(),
            )));
        }

        let boundaries = Self::weighted_boundaries(total_cells, weights, weight_sum);
        debug!(total_cells, num_partitions, "computed rank cell-range boundaries");

        let per_rank_partials: Vec<Vec<Region<1>>> = (0..num_partitions)
            .into_par_iter()
            .map(|rank| -> Result<Vec<Region<1>>, PartitionError> {
                let start = boundaries[rank];
                let end = boundaries[rank + 1];
                let local_cells = (end - start) as usize;

                let csr = Csr::build(adjacency, start, local_cells);
                let labels = self.backend.partition(&csr, num_partitions)?;
                if labels.len() != local_cells {
                    return Err(PartitionError::Backend(PartitionBackendError::LabelCountMismatch {
                        expected: local_cells,
                        got: labels.len(),
                    }));
                }

                let mut partials = vec![Region::<1>::new(); num_partitions];
                for (i, &label) in labels.iter().enumerate() {
                    partials[label].insert_coord(Coord::new([(start + i as u64) as i64]));
                }
                Ok(partials)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let regions = self.transport.exchange_all(per_rank_partials).map_err(|e| {
            warn!(error = %e, "all-to-all region exchange failed");
            PartitionError::Transport(e)
        })?;

        let map = regions.into_iter().enumerate().collect();
        Ok(SimplePartition::new(map))
    }

    fn weighted_boundaries(total_cells: u64, weights: &[f64], weight_sum: f64) -> Vec<u64> {
        let mut boundaries = Vec::with_capacity(weights.len() + 1);
        boundaries.push(0u64);
        let mut cumulative = 0.0;
        for &w in weights {
            cumulative += w;
            let boundary = ((cumulative / weight_sum) * total_cells as f64).floor() as u64;
            boundaries.push(boundary.min(total_cells));
        }
        *boundaries.last_mut().unwrap() = total_cells;
        boundaries
    }
}

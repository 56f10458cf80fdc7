//! The all-to-all partial-region exchange (spec.md §4.E step 5).
//!
//! Each rank's partials are serialized before being handed to another
//! rank's merge step, the same way they would cross a real wire boundary;
//! `geodecomp-region`'s `Region<N>` already derives `Serialize`/
//! `Deserialize` for exactly this purpose. A real cluster deployment would
//! swap `InProcessTransport` for one backed by MPI or a TCP mesh without
//! touching `DistributedPartitioner`.

use geodecomp_region::Region;

use crate::error::TransportError;

pub trait Transport: Send + Sync {
    /// `partials[rank][partition]` in, `merged[partition]` out — the union
    /// of every rank's contribution to that partition.
    fn exchange_all(&self, partials: Vec<Vec<Region<1>>>) -> Result<Vec<Region<1>>, TransportError>;
}

#[derive(Debug, Default)]
pub struct InProcessTransport;

impl Transport for InProcessTransport {
    fn exchange_all(&self, partials: Vec<Vec<Region<1>>>) -> Result<Vec<Region<1>>, TransportError> {
        let num_partitions = partials.first().map(Vec::len).unwrap_or(0);
        let mut merged = vec![Region::<1>::new(); num_partitions];

        for (rank, rank_partials) in partials.into_iter().enumerate() {
            for (partition, region) in rank_partials.into_iter().enumerate() {
                let bytes = bincode::serialize(&region).map_err(|e| TransportError::ExchangeFailed {
                    rank,
                    reason: e.to_string(),
                })?;
                let decoded: Region<1> =
                    bincode::deserialize(&bytes).map_err(|e| TransportError::ExchangeFailed {
                        rank,
                        reason: e.to_string(),
                    })?;
                merged[partition] = merged[partition].union(&decoded);
            }
        }

        Ok(merged)
    }
}

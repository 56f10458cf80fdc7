//! `PartitionManager`: derives a rank's own region, its per-neighbor ghost
//! zones and its neighbor-rank map from a [`Partition`].
//!
//! Grounded on `hpxdataflowsimulator.h`'s `PartitionManager::resetRegions` /
//! `ownRegion()` call shape: a simulation doesn't talk to `Partition`
//! directly, it asks its `PartitionManager` "what do I own" and "who
//! borders me", both derived lazily from the same underlying `Partition`.

use std::collections::HashMap;
use std::marker::PhantomData;

use geodecomp_coord::Coord;
use geodecomp_graph::Partition;
use geodecomp_region::{Region, Topology};

/// Derives own-region, ghost zones and the neighbor-rank map for `rank`
/// within `partition`, using `T` to decide how the halo wraps at the grid
/// boundary.
pub struct PartitionManager<'a, const N: usize, T: Topology<N>> {
    rank: usize,
    partition: &'a dyn Partition<N>,
    dimensions: Coord<N>,
    halo_width: i64,
    _topology: PhantomData<T>,
}

impl<'a, const N: usize, T: Topology<N>> PartitionManager<'a, N, T> {
    pub fn new(rank: usize, partition: &'a dyn Partition<N>, dimensions: Coord<N>, halo_width: i64) -> Self {
        PartitionManager {
            rank,
            partition,
            dimensions,
            halo_width,
            _topology: PhantomData,
        }
    }

    pub fn rank(&self) -> usize {
        self.rank
    }

    /// The region of cells this rank owns and updates.
    pub fn own_region(&self) -> Region<N> {
        self.partition.region(self.rank)
    }

    /// The cells of `neighbor_rank` that fall within this rank's halo, i.e.
    /// the ghost cells this rank must receive to update its own region.
    pub fn ghost_zone_for(&self, neighbor_rank: usize) -> Region<N> {
        if neighbor_rank == self.rank {
            return Region::new();
        }
        let halo = self.own_region().expand_with_topology::<T>(self.halo_width, self.dimensions);
        halo.intersect(&self.partition.region(neighbor_rank))
    }

    /// Ranks that actually border this one (non-empty ghost zone), sorted.
    pub fn neighbor_ranks(&self) -> Vec<usize> {
        (0..self.partition.num_ranks())
            .filter(|&r| r != self.rank && !self.ghost_zone_for(r).is_empty())
            .collect()
    }

    /// `rank -> ghost region` for every bordering rank.
    pub fn neighbor_rank_map(&self) -> HashMap<usize, Region<N>> {
        self.neighbor_ranks()
            .into_iter()
            .map(|r| (r, self.ghost_zone_for(r)))
            .collect()
    }

    /// Union of every neighbor's ghost zone: all foreign cells this rank
    /// must hold a local copy of to update its own region.
    pub fn outer_ghost_zone(&self) -> Region<N> {
        self.neighbor_rank_map()
            .values()
            .fold(Region::new(), |acc, zone| acc.union(zone))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geodecomp_graph::SimplePartition;
    use geodecomp_region::Bounded;

    fn linear_partition(total: i64, num_ranks: i64) -> SimplePartition<1> {
        let mut map = HashMap::new();
        let per_rank = total / num_ranks;
        for rank in 0..num_ranks {
            let mut region = Region::<1>::new();
            let start = rank * per_rank;
            let end = if rank == num_ranks - 1 { total } else { start + per_rank };
            region.insert_streak(geodecomp_coord::Streak::new(Coord::new([start]), end).unwrap());
            map.insert(rank as usize, region);
        }
        SimplePartition::new(map)
    }

    #[test]
    fn own_region_matches_partition() {
        let partition = linear_partition(100, 4);
        let pm = PartitionManager::<1, Bounded>::new(0, &partition, Coord::diagonal(100), 2);
        assert_eq!(pm.own_region(), partition.region(0));
    }

    #[test]
    fn ghost_zone_covers_only_the_halo_overlap() {
        let partition = linear_partition(100, 4);
        // rank 0 owns [0, 25); halo width 2 -> [-2, 27) clipped to [0, 27)
        let pm = PartitionManager::<1, Bounded>::new(0, &partition, Coord::diagonal(100), 2);
        let ghost = pm.ghost_zone_for(1);
        assert_eq!(ghost.size(), 2);
        assert!(ghost.count(&Coord::new([25])));
        assert!(ghost.count(&Coord::new([26])));
    }

    #[test]
    fn neighbor_rank_map_only_lists_bordering_ranks() {
        let partition = linear_partition(100, 4);
        let pm = PartitionManager::<1, Bounded>::new(0, &partition, Coord::diagonal(100), 2);
        let neighbors = pm.neighbor_ranks();
        assert_eq!(neighbors, vec![1]);

        let map = pm.neighbor_rank_map();
        assert_eq!(map.len(), 1);
        assert!(map.contains_key(&1));
    }

    #[test]
    fn outer_ghost_zone_unions_every_neighbor() {
        let partition = linear_partition(100, 4);
        // rank 1 owns [25, 50); borders both rank 0 and rank 2.
        let pm = PartitionManager::<1, Bounded>::new(1, &partition, Coord::diagonal(100), 2);
        let outer = pm.outer_ghost_zone();
        assert_eq!(outer.size(), 4);
        assert!(outer.count(&Coord::new([23])));
        assert!(outer.count(&Coord::new([24])));
        assert!(outer.count(&Coord::new([50])));
        assert!(outer.count(&Coord::new([51])));
    }

    #[test]
    fn rank_is_never_its_own_neighbor() {
        let partition = linear_partition(100, 4);
        let pm = PartitionManager::<1, Bounded>::new(0, &partition, Coord::diagonal(100), 50);
        assert!(pm.ghost_zone_for(0).is_empty());
        assert!(!pm.neighbor_ranks().contains(&0));
    }
}

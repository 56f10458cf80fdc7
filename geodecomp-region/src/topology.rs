//! Grid topologies used by `Region::expand_with_topology`.
//!
//! A topology decides, per axis, whether coordinates wrap around
//! (periodic/torus boundary) and how an out-of-range coordinate is mapped
//! back into the grid. `normalize` returning `None` is this crate's
//! replacement for the original's `-1`-diagonal "out of bounds" sentinel.

use geodecomp_coord::Coord;

pub trait Topology<const N: usize> {
    /// Does axis 0 (the streak axis) wrap around?
    fn wraps_axis(axis: usize) -> bool;

    /// Map `coord` into `[0, dimensions)` according to this topology.
    /// `None` means the coordinate is out of bounds and should be dropped.
    fn normalize(coord: Coord<N>, dimensions: Coord<N>) -> Option<Coord<N>>;
}

/// No axis wraps; out-of-range coordinates are dropped.
pub struct Bounded;

impl<const N: usize> Topology<N> for Bounded {
    fn wraps_axis(_axis: usize) -> bool {
        false
    }

    fn normalize(coord: Coord<N>, dimensions: Coord<N>) -> Option<Coord<N>> {
        for axis in 0..N {
            if coord.get(axis) < 0 || coord.get(axis) >= dimensions.get(axis) {
                return None;
            }
        }
        Some(coord)
    }
}

/// Every axis wraps (periodic boundary in all directions).
pub struct Torus;

impl<const N: usize> Topology<N> for Torus {
    fn wraps_axis(_axis: usize) -> bool {
        true
    }

    fn normalize(coord: Coord<N>, dimensions: Coord<N>) -> Option<Coord<N>> {
        let mut out = coord;
        for axis in 0..N {
            let dim = dimensions.get(axis);
            if dim <= 0 {
                return None;
            }
            out.set(axis, coord.get(axis).rem_euclid(dim));
        }
        Some(out)
    }
}

/// Axis 0 wraps (periodic in the streak direction), all other axes are
/// bounded. Common for 1-D ring topologies and for grids whose halo only
/// needs to wrap along the vectorized axis.
pub struct TorusX;

impl<const N: usize> Topology<N> for TorusX {
    fn wraps_axis(axis: usize) -> bool {
        axis == 0
    }

    fn normalize(coord: Coord<N>, dimensions: Coord<N>) -> Option<Coord<N>> {
        let mut out = coord;
        let dim_x = dimensions.get(0);
        if dim_x <= 0 {
            return None;
        }
        out.set(0, coord.get(0).rem_euclid(dim_x));
        for axis in 1..N {
            if out.get(axis) < 0 || out.get(axis) >= dimensions.get(axis) {
                return None;
            }
        }
        Some(out)
    }
}

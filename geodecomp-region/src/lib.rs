//! Run-length-encoded N-dimensional coordinate set.
//!
//! `Region<N>` is the set-of-coordinates primitive every grid operation,
//! halo exchange and partition in the workspace is expressed in terms of.
//! Internally it stores a sorted, maximally-fused `Vec<Streak<N>>`: every
//! streak is a contiguous run along axis 0, and no two streaks in the
//! vector share a row and overlap or touch. That invariant is what makes
//! `==` a plain vector comparison and iteration come out in lexicographic
//! (z, ..., y, x) order for free — `Coord<N>`'s `Ord` impl already sorts
//! highest axis first, and streaks are kept sorted by `origin` under that
//! same order.
//!
//! This is a flattened analogue of the original's hierarchical per-axis
//! index vectors (`indices[0..N)`, each level pointing into the one
//! below). The hierarchy was an encoding optimization for a template-
//! recursive C++ implementation; the externally observable behavior
//! (streaks, coords, size, equality, the set algebra, expansion) is
//! unchanged and is what `geodecomp-graph`/`geodecomp-dataflow` and the
//! tests below depend on. See `DESIGN.md` for the full rationale.

pub mod error;
pub mod topology;

pub use error::RegionError;
pub use topology::{Bounded, Topology, Torus, TorusX};

use geodecomp_coord::{Coord, CoordBox, Streak};
use serde::{Deserialize, Serialize};

fn same_row<const N: usize>(a: &Coord<N>, b: &Coord<N>) -> bool {
    (1..N).all(|axis| a.get(axis) == b.get(axis))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region<const N: usize> {
    streaks: Vec<Streak<N>>,
}

impl<const N: usize> Default for Region<N> {
    fn default() -> Self {
        Region { streaks: Vec::new() }
    }
}

impl<const N: usize> Region<N> {
    pub fn new() -> Self {
        Region::default()
    }

    pub fn is_empty(&self) -> bool {
        self.streaks.is_empty()
    }

    pub fn clear(&mut self) {
        self.streaks.clear();
    }

    /// Number of maximal streaks (after fusion), not the number of points.
    pub fn num_streaks(&self) -> usize {
        self.streaks.len()
    }

    /// Total number of coordinates in the set.
    pub fn size(&self) -> i64 {
        self.streaks.iter().map(|s| s.len()).sum()
    }

    pub fn bounding_box(&self) -> CoordBox<N> {
        let Some(first) = self.streaks.first() else {
            return CoordBox::new(Coord::origin(), Coord::origin());
        };
        let mut min = first.origin;
        let mut max = first.origin;
        for s in &self.streaks {
            min = min.min(&s.origin);
            let mut end_point = s.origin;
            end_point.set(0, s.end_x - 1);
            max = max.max(&end_point);
        }
        let dims = (max - min) + Coord::diagonal(1);
        CoordBox::new(min, dims)
    }

    /// Maximal streaks, in lexicographic order.
    pub fn streaks(&self) -> impl Iterator<Item = Streak<N>> + '_ {
        self.streaks.iter().copied()
    }

    pub fn streaks_to_vec(&self) -> Vec<Streak<N>> {
        self.streaks.clone()
    }

    /// Individual coordinates, in lexicographic (z, ..., y, x) order.
    pub fn coords(&self) -> impl Iterator<Item = Coord<N>> + '_ {
        self.streaks.iter().flat_map(|s| {
            let origin = s.origin;
            (s.origin.x()..s.end_x).map(move |x| {
                let mut c = origin;
                c.set(0, x);
                c
            })
        })
    }

    pub fn count(&self, c: &Coord<N>) -> bool {
        self.streaks
            .iter()
            .any(|s| same_row(&s.origin, c) && s.contains_x(c.x()))
    }

    pub fn insert_coord(&mut self, c: Coord<N>) {
        self.insert_streak(Streak::new_unchecked(c, c.x() + 1));
    }

    pub fn remove_coord(&mut self, c: Coord<N>) {
        self.remove_streak(Streak::new_unchecked(c, c.x() + 1));
    }

    pub fn insert_box(&mut self, b: CoordBox<N>) {
        if b.dimensions.prod() <= 0 {
            return;
        }
        let width = b.dimensions.x();
        let mut row_dims = b.dimensions;
        row_dims.set(0, 1);
        for p in CoordBox::new(b.origin, row_dims).iter() {
            self.insert_streak(Streak::new_unchecked(p, p.x() + width));
        }
    }

    pub fn remove_box(&mut self, b: CoordBox<N>) {
        if b.dimensions.prod() <= 0 {
            return;
        }
        let width = b.dimensions.x();
        let mut row_dims = b.dimensions;
        row_dims.set(0, 1);
        for p in CoordBox::new(b.origin, row_dims).iter() {
            self.remove_streak(Streak::new_unchecked(p, p.x() + width));
        }
    }

    /// Insert a streak, fusing with any overlapping or touching streaks in
    /// the same row. Zero/negative-length streaks are silently discarded,
    /// matching the original's `operator<<`.
    pub fn insert_streak(&mut self, s: Streak<N>) {
        if s.is_empty() {
            return;
        }

        let mut new_origin_x = s.origin.x();
        let mut new_end_x = s.end_x;
        // Single forward pass suffices because `self.streaks` is sorted by
        // `origin`: any later streak able to fuse with the growing run
        // appears after any earlier one in this same scan.
        self.streaks.retain(|existing| {
            if same_row(&existing.origin, &s.origin)
                && existing.origin.x() <= new_end_x
                && new_origin_x <= existing.end_x
            {
                new_origin_x = new_origin_x.min(existing.origin.x());
                new_end_x = new_end_x.max(existing.end_x);
                false
            } else {
                true
            }
        });

        let mut fused_origin = s.origin;
        fused_origin.set(0, new_origin_x);
        let fused = Streak::new_unchecked(fused_origin, new_end_x);
        let pos = self
            .streaks
            .binary_search_by(|probe| probe.origin.cmp(&fused.origin))
            .unwrap_or_else(|e| e);
        self.streaks.insert(pos, fused);
    }

    /// Remove a streak, splitting any streaks it partially overlaps.
    /// Zero-length streaks and removal from an empty region are no-ops.
    pub fn remove_streak(&mut self, s: Streak<N>) {
        if s.is_empty() || self.streaks.is_empty() {
            return;
        }

        let mut result = Vec::with_capacity(self.streaks.len());
        for existing in self.streaks.drain(..) {
            let overlaps = same_row(&existing.origin, &s.origin)
                && existing.origin.x() < s.end_x
                && existing.end_x > s.origin.x();

            if !overlaps {
                result.push(existing);
                continue;
            }

            if existing.origin.x() < s.origin.x() {
                let mut left = existing;
                left.end_x = s.origin.x();
                result.push(left);
            }
            if existing.end_x > s.end_x {
                let mut right_origin = existing.origin;
                right_origin.set(0, s.end_x);
                result.push(Streak::new_unchecked(right_origin, existing.end_x));
            }
        }
        result.sort_by(|a, b| a.origin.cmp(&b.origin));
        self.streaks = result;
    }

    pub fn union(&self, other: &Region<N>) -> Region<N> {
        let mut result = self.clone();
        for s in &other.streaks {
            result.insert_streak(*s);
        }
        result
    }

    pub fn difference(&self, other: &Region<N>) -> Region<N> {
        let mut result = self.clone();
        for s in &other.streaks {
            result.remove_streak(*s);
        }
        result
    }

    /// `A ∩ B = A − (A − B)`.
    pub fn intersect(&self, other: &Region<N>) -> Region<N> {
        self.difference(&self.difference(other))
    }

    /// Grow the region by `width` in every direction (Chebyshev/box halo,
    /// no wrap-around).
    pub fn expand(&self, width: i64) -> Region<N> {
        let mut ret = Region::new();
        let dia = Coord::<N>::diagonal(width);
        for s in &self.streaks {
            let box_origin = s.origin - dia;
            let mut box_dim = Coord::<N>::diagonal(2 * width + 1);
            box_dim.set(0, 1);
            let end_x = s.end_x + width;
            for p in CoordBox::new(box_origin, box_dim).iter() {
                ret.insert_streak(Streak::new_unchecked(p, end_x));
            }
        }
        ret
    }

    /// As `expand`, but coordinates that leave the grid are wrapped or
    /// dropped according to `T`, rather than left as out-of-range entries.
    pub fn expand_with_topology<T: Topology<N>>(&self, width: i64, dimensions: Coord<N>) -> Region<N> {
        let mut ret = Region::new();
        let dia = Coord::<N>::diagonal(width);
        for s in &self.streaks {
            let box_origin = s.origin - dia;
            let mut box_dim = Coord::<N>::diagonal(2 * width + 1);
            box_dim.set(0, 1);
            let end_x = s.end_x + width;
            for p in CoordBox::new(box_origin, box_dim).iter() {
                let new_streak = Streak::new_unchecked(p, end_x);
                if T::wraps_axis(0) {
                    Self::split_streak::<T>(new_streak, &mut ret, dimensions);
                } else {
                    let trimmed = Self::trim_streak(new_streak, dimensions);
                    Self::normalize_streak::<T>(trimmed, &mut ret, dimensions);
                }
            }
        }
        ret
    }

    fn trim_streak(s: Streak<N>, dimensions: Coord<N>) -> Streak<N> {
        let width = dimensions.x();
        let mut origin = s.origin;
        origin.set(0, origin.x().max(0));
        let end_x = width.min(s.end_x);
        Streak::new_unchecked(origin, end_x)
    }

    fn split_streak<T: Topology<N>>(streak: Streak<N>, target: &mut Region<N>, dimensions: Coord<N>) {
        let width = dimensions.x();
        let mut current_x = streak.origin.x();

        if current_x < 0 {
            let mut section = streak;
            section.end_x = streak.end_x.min(0);
            current_x = section.end_x;
            section.origin.set(0, section.origin.x() + width);
            section.end_x += width;
            Self::normalize_streak::<T>(section, target, dimensions);
        }

        if current_x < streak.end_x {
            let mut section = streak;
            section.origin.set(0, current_x);
            section.end_x = streak.end_x.min(width);
            current_x = section.end_x;
            Self::normalize_streak::<T>(section, target, dimensions);
        }

        if current_x < streak.end_x {
            let mut section = streak;
            section.origin.set(0, current_x - width);
            section.end_x = streak.end_x - width;
            Self::normalize_streak::<T>(section, target, dimensions);
        }
    }

    fn normalize_streak<T: Topology<N>>(s: Streak<N>, target: &mut Region<N>, dimensions: Coord<N>) {
        if let Some(origin) = T::normalize(s.origin, dimensions) {
            let end_x = origin.x() + s.len();
            target.insert_streak(Streak::new_unchecked(origin, end_x));
        }
    }

    /// Strict streak insertion for parsers/deserializers that should
    /// reject malformed input rather than silently drop it.
    pub fn try_insert_streak(&mut self, origin: Coord<N>, end_x: i64) -> Result<(), RegionError> {
        match Streak::new(origin, end_x) {
            Some(s) => {
                self.insert_streak(s);
                Ok(())
            }
            None => Err(RegionError::InvalidStreak {
                origin_x: origin.x(),
                end_x,
            }),
        }
    }
}

impl<const N: usize> FromIterator<Coord<N>> for Region<N> {
    fn from_iter<I: IntoIterator<Item = Coord<N>>>(iter: I) -> Self {
        let mut region = Region::new();
        for c in iter {
            region.insert_coord(c);
        }
        region
    }
}

impl<const N: usize> FromIterator<Streak<N>> for Region<N> {
    fn from_iter<I: IntoIterator<Item = Streak<N>>>(iter: I) -> Self {
        let mut region = Region::new();
        for s in iter {
            region.insert_streak(s);
        }
        region
    }
}

//! N-dimensional coordinate, streak and bounding-box primitives.
//!
//! These are the value types every other crate in the workspace builds on:
//! `Coord<N>` is a point, `Streak<N>` a contiguous run of points along axis
//! 0, and `CoordBox<N>` an axis-aligned box of points.

use std::cmp::Ordering;
use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// An `N`-dimensional integer point.
///
/// Ordered lexicographically by the highest axis first (z, ..., y, x), which
/// is the order `Region<N>`'s run-length storage and its iterators rely on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord<const N: usize> {
    c: [i64; N],
}

impl<const N: usize> Coord<N> {
    pub fn new(c: [i64; N]) -> Self {
        Coord { c }
    }

    /// A point with every component set to `v`.
    pub fn diagonal(v: i64) -> Self {
        Coord { c: [v; N] }
    }

    pub fn origin() -> Self {
        Coord::diagonal(0)
    }

    pub fn x(&self) -> i64 {
        self.c[0]
    }

    pub fn get(&self, axis: usize) -> i64 {
        self.c[axis]
    }

    pub fn set(&mut self, axis: usize, v: i64) {
        self.c[axis] = v;
    }

    pub fn as_slice(&self) -> &[i64; N] {
        &self.c
    }

    pub fn min(&self, other: &Self) -> Self {
        let mut out = [0i64; N];
        for i in 0..N {
            out[i] = self.c[i].min(other.c[i]);
        }
        Coord::new(out)
    }

    pub fn max(&self, other: &Self) -> Self {
        let mut out = [0i64; N];
        for i in 0..N {
            out[i] = self.c[i].max(other.c[i]);
        }
        Coord::new(out)
    }

    pub fn dot(&self, other: &Self) -> i64 {
        (0..N).map(|i| self.c[i] * other.c[i]).sum()
    }

    /// Product of all components, used to turn a `dimensions` coord into a
    /// total cell count.
    pub fn prod(&self) -> i64 {
        self.c.iter().product()
    }
}

impl<const N: usize> Default for Coord<N> {
    fn default() -> Self {
        Coord::origin()
    }
}

impl<const N: usize> Add for Coord<N> {
    type Output = Coord<N>;

    fn add(self, rhs: Self) -> Self::Output {
        let mut out = [0i64; N];
        for i in 0..N {
            out[i] = self.c[i] + rhs.c[i];
        }
        Coord::new(out)
    }
}

impl<const N: usize> Sub for Coord<N> {
    type Output = Coord<N>;

    fn sub(self, rhs: Self) -> Self::Output {
        let mut out = [0i64; N];
        for i in 0..N {
            out[i] = self.c[i] - rhs.c[i];
        }
        Coord::new(out)
    }
}

impl<const N: usize> PartialOrd for Coord<N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<const N: usize> Ord for Coord<N> {
    fn cmp(&self, other: &Self) -> Ordering {
        for axis in (0..N).rev() {
            match self.c[axis].cmp(&other.c[axis]) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }
        Ordering::Equal
    }
}

/// A contiguous run of coordinates along axis 0, sharing all higher-axis
/// coordinates: `{origin, origin + (1,0,...), ..., origin + (end_x - origin.x
/// - 1, 0, ...)}`.
///
/// Invariant: `end_x > origin.x`. Constructing or inserting a streak with
/// `end_x <= origin.x` is a zero-length streak; the strict constructor
/// rejects it, the `Region` insert path silently discards it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Streak<const N: usize> {
    pub origin: Coord<N>,
    pub end_x: i64,
}

impl<const N: usize> Streak<N> {
    /// Construct a streak, returning `None` for zero/negative length.
    pub fn new(origin: Coord<N>, end_x: i64) -> Option<Self> {
        if end_x > origin.x() {
            Some(Streak { origin, end_x })
        } else {
            None
        }
    }

    /// Construct a streak without checking the length invariant. Callers
    /// must ensure `end_x > origin.x()`.
    pub fn new_unchecked(origin: Coord<N>, end_x: i64) -> Self {
        Streak { origin, end_x }
    }

    pub fn len(&self) -> i64 {
        self.end_x - self.origin.x()
    }

    pub fn is_empty(&self) -> bool {
        self.len() <= 0
    }

    pub fn contains_x(&self, x: i64) -> bool {
        x >= self.origin.x() && x < self.end_x
    }

    /// Do the two streaks share any higher-axis coordinates and overlap (or
    /// touch) along axis 0?
    pub fn intersects_or_touches(&self, other: &Self) -> bool {
        self.same_row(other) && self.origin.x() <= other.end_x && other.origin.x() <= self.end_x
    }

    pub fn intersects(&self, other: &Self) -> bool {
        self.same_row(other) && self.origin.x() < other.end_x && other.origin.x() < self.end_x
    }

    fn same_row(&self, other: &Self) -> bool {
        (1..N).all(|axis| self.origin.get(axis) == other.origin.get(axis))
    }
}

/// An axis-aligned box of points: `origin .. origin + dimensions`.
///
/// Iterates its points in row-major order (x fastest), matching the C++
/// `CoordBox::Iterator` used by `Region::expand`/`Region::expand_with_topology`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CoordBox<const N: usize> {
    pub origin: Coord<N>,
    pub dimensions: Coord<N>,
}

impl<const N: usize> CoordBox<N> {
    pub fn new(origin: Coord<N>, dimensions: Coord<N>) -> Self {
        CoordBox { origin, dimensions }
    }

    pub fn contains(&self, c: &Coord<N>) -> bool {
        (0..N).all(|axis| {
            let o = self.origin.get(axis);
            c.get(axis) >= o && c.get(axis) < o + self.dimensions.get(axis)
        })
    }

    pub fn size(&self) -> i64 {
        self.dimensions.prod()
    }

    pub fn iter(&self) -> CoordBoxIter<N> {
        CoordBoxIter {
            b: *self,
            next: if self.size() > 0 { Some(self.origin) } else { None },
        }
    }
}

impl<const N: usize> IntoIterator for CoordBox<N> {
    type Item = Coord<N>;
    type IntoIter = CoordBoxIter<N>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct CoordBoxIter<const N: usize> {
    b: CoordBox<N>,
    next: Option<Coord<N>>,
}

impl<const N: usize> Iterator for CoordBoxIter<N> {
    type Item = Coord<N>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        let mut c = current;
        let mut axis = 0;
        loop {
            let advanced = c.get(axis) + 1;
            if advanced < self.b.origin.get(axis) + self.b.dimensions.get(axis) {
                c.set(axis, advanced);
                self.next = Some(c);
                break;
            }
            c.set(axis, self.b.origin.get(axis));
            axis += 1;
            if axis == N {
                self.next = None;
                break;
            }
        }
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coord_ordering_is_lexicographic_highest_axis_first() {
        let a = Coord::<2>::new([5, 0]);
        let b = Coord::<2>::new([0, 1]);
        assert!(a < b, "higher axis (y) dominates x in ordering");
    }

    #[test]
    fn coord_arithmetic() {
        let a = Coord::<3>::new([1, 2, 3]);
        let b = Coord::<3>::new([4, 5, 6]);
        assert_eq!((a + b).as_slice(), &[5, 7, 9]);
        assert_eq!((b - a).as_slice(), &[3, 3, 3]);
        assert_eq!(a.dot(&b), 4 + 10 + 18);
    }

    #[test]
    fn coord_diagonal_and_prod() {
        let d = Coord::<3>::diagonal(4);
        assert_eq!(d.as_slice(), &[4, 4, 4]);
        assert_eq!(d.prod(), 64);
    }

    #[test]
    fn streak_rejects_zero_and_negative_length() {
        let origin = Coord::<2>::new([3, 0]);
        assert!(Streak::new(origin, 3).is_none());
        assert!(Streak::new(origin, 2).is_none());
        assert!(Streak::new(origin, 4).is_some());
    }

    #[test]
    fn streak_len_and_contains_x() {
        let s = Streak::new(Coord::<2>::new([2, 0]), 7).unwrap();
        assert_eq!(s.len(), 5);
        assert!(s.contains_x(2));
        assert!(s.contains_x(6));
        assert!(!s.contains_x(7));
    }

    #[test]
    fn streak_intersects_requires_same_row() {
        let a = Streak::new(Coord::<2>::new([0, 0]), 5).unwrap();
        let b = Streak::new(Coord::<2>::new([3, 1]), 8).unwrap();
        assert!(!a.intersects(&b));
        let c = Streak::new(Coord::<2>::new([3, 0]), 8).unwrap();
        assert!(a.intersects(&c));
    }

    #[test]
    fn coord_box_contains() {
        let b = CoordBox::new(Coord::<2>::new([1, 1]), Coord::<2>::diagonal(3));
        assert!(b.contains(&Coord::new([1, 1])));
        assert!(b.contains(&Coord::new([3, 3])));
        assert!(!b.contains(&Coord::new([4, 1])));
        assert!(!b.contains(&Coord::new([0, 1])));
    }

    #[test]
    fn coord_box_iterates_row_major_x_fastest() {
        let b = CoordBox::new(Coord::<2>::new([0, 0]), Coord::<2>::new([2, 2]));
        let points: Vec<_> = b.iter().map(|c| *c.as_slice()).collect();
        assert_eq!(points, vec![[0, 0], [1, 0], [0, 1], [1, 1]]);
    }

    #[test]
    fn coord_box_empty_dimension_yields_no_points() {
        let b = CoordBox::new(Coord::<2>::new([0, 0]), Coord::<2>::new([0, 3]));
        assert_eq!(b.iter().count(), 0);
    }
}

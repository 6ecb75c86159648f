use std::{fmt, ops::Index};

use derive_more::{Add, Constructor, Sub};
use serde::{Deserialize, Serialize};

/// The three axes of a volume, in memory order (row varies fastest).
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Row = 0,
    Col = 1,
    Slice = 2,
}

impl Axis {
    pub fn iter() -> impl Iterator<Item = Axis> {
        [Axis::Row, Axis::Col, Axis::Slice].into_iter()
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Axis::Row => "row",
            Axis::Col => "column",
            Axis::Slice => "slice",
        })
    }
}

/// One value per axis.
#[derive(
    Add, Sub, Constructor, Default, PartialEq, Eq, Debug, Copy, Clone, Hash, Serialize, Deserialize,
)]
pub struct PerAxis<T> {
    pub row: T,
    pub col: T,
    pub slice: T,
}

/// Sizes along each axis, `(rows, cols, slices)`.
pub type Extent = PerAxis<usize>;

impl<T> From<(T, T, T)> for PerAxis<T> {
    fn from((row, col, slice): (T, T, T)) -> Self {
        PerAxis { row, col, slice }
    }
}

impl<T> From<PerAxis<T>> for (T, T, T) {
    fn from(v: PerAxis<T>) -> Self {
        (v.row, v.col, v.slice)
    }
}

impl<T> PerAxis<T> {
    pub fn iter<'a>(&self) -> impl Iterator<Item = T> + 'a
    where
        T: Copy + 'a,
    {
        [self.row, self.col, self.slice].into_iter()
    }

    pub fn enumerate<'a>(&self) -> impl Iterator<Item = (Axis, T)> + 'a
    where
        T: Copy + 'a,
    {
        Axis::iter().zip(self.iter())
    }

    pub fn map<U>(self, mut f: impl FnMut(Axis, T) -> U) -> PerAxis<U> {
        PerAxis {
            row: f(Axis::Row, self.row),
            col: f(Axis::Col, self.col),
            slice: f(Axis::Slice, self.slice),
        }
    }
}

impl Extent {
    /// Total number of cells, or `None` if it doesn't fit in a `usize`.
    pub fn checked_volume(&self) -> Option<usize> {
        self.row.checked_mul(self.col)?.checked_mul(self.slice)
    }
}

impl<T> Index<Axis> for PerAxis<T> {
    type Output = T;

    fn index(&self, i: Axis) -> &T {
        match i {
            Axis::Row => &self.row,
            Axis::Col => &self.col,
            Axis::Slice => &self.slice,
        }
    }
}

/// Inclusive, 1-based `(lo, hi)` bounds along one axis, as handed over by the caller.
///
/// The values are kept unrounded; turning them into indices is the job of
/// [`crate::subselect::Rounding`].
#[derive(Constructor, Default, PartialEq, Debug, Copy, Clone, Serialize, Deserialize)]
pub struct BoundPair {
    pub lo: f64,
    pub hi: f64,
}

impl BoundPair {
    pub fn is_finite(&self) -> bool {
        self.lo.is_finite() && self.hi.is_finite()
    }
}

impl From<(f64, f64)> for BoundPair {
    fn from((lo, hi): (f64, f64)) -> Self {
        BoundPair { lo, hi }
    }
}

impl From<[f64; 2]> for BoundPair {
    fn from([lo, hi]: [f64; 2]) -> Self {
        BoundPair { lo, hi }
    }
}

impl From<IndexRange> for BoundPair {
    fn from(range: IndexRange) -> Self {
        BoundPair::new(range.start as f64, range.end as f64)
    }
}

impl fmt::Display for BoundPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.lo, self.hi)
    }
}

pub type Bounds3 = PerAxis<BoundPair>;

impl Bounds3 {
    pub fn from_pairs(
        rows: impl Into<BoundPair>,
        cols: impl Into<BoundPair>,
        slices: impl Into<BoundPair>,
    ) -> Self {
        PerAxis::new(rows.into(), cols.into(), slices.into())
    }
}

/// Resolved inclusive 1-based index range. Empty when `start > end`.
#[derive(Constructor, PartialEq, Eq, Debug, Copy, Clone, Hash, Serialize, Deserialize)]
pub struct IndexRange {
    pub start: usize,
    pub end: usize,
}

impl IndexRange {
    pub fn len(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            self.end - self.start + 1
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> {
        self.start..=self.end
    }
}

impl fmt::Display for IndexRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start, self.end)
    }
}

/// An axis-aligned block of a volume, one resolved range per axis.
pub type Region = PerAxis<IndexRange>;

impl Region {
    pub fn extent(&self) -> Extent {
        PerAxis::new(self.row.len(), self.col.len(), self.slice.len())
    }

    /// Builds a region from a 0-based corner and a per-axis size, the way
    /// bounding boxes are stored alongside image collections.
    ///
    /// Returns `None` if any size is zero.
    pub fn from_corner_and_dims(corner: Extent, dims: Extent) -> Option<Region> {
        if dims.iter().any(|d| d == 0) {
            return None;
        }
        let end = corner + dims;
        Some(PerAxis::new(
            IndexRange::new(corner.row + 1, end.row),
            IndexRange::new(corner.col + 1, end.col),
            IndexRange::new(corner.slice + 1, end.slice),
        ))
    }

    pub fn to_bounds(&self) -> Bounds3 {
        self.map(|_, range| range.into())
    }

    /// Whether every range lies within `[1, size]` of its axis.
    pub fn fits(&self, shape: Extent) -> bool {
        self.enumerate()
            .all(|(axis, range)| range.start >= 1 && range.end <= shape[axis])
    }

    /// Iterates 1-based `(row, col, slice)` positions in column-major order.
    pub fn positions(&self) -> impl Iterator<Item = (usize, usize, usize)> {
        let (rows, cols, slices) = (self.row, self.col, self.slice);
        slices.iter().flat_map(move |s| {
            cols.iter()
                .flat_map(move |c| rows.iter().map(move |r| (r, c, s)))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_and_dims() {
        let region =
            Region::from_corner_and_dims(Extent::new(0, 2, 5), Extent::new(3, 1, 2)).unwrap();
        assert_eq!(region.row, IndexRange::new(1, 3));
        assert_eq!(region.col, IndexRange::new(3, 3));
        assert_eq!(region.slice, IndexRange::new(6, 7));
        assert_eq!(region.extent(), Extent::new(3, 1, 2));

        assert!(Region::from_corner_and_dims(Extent::new(0, 0, 0), Extent::new(1, 0, 1)).is_none());
    }

    #[test]
    fn region_iterates_row_fastest() {
        let region = PerAxis::new(
            IndexRange::new(1, 2),
            IndexRange::new(3, 4),
            IndexRange::new(7, 7),
        );
        let positions: Vec<_> = region.positions().collect();
        assert_eq!(positions, vec![(1, 3, 7), (2, 3, 7), (1, 4, 7), (2, 4, 7)]);
    }

    #[test]
    fn fits() {
        let region = PerAxis::new(
            IndexRange::new(1, 2),
            IndexRange::new(1, 1),
            IndexRange::new(2, 3),
        );
        assert!(region.fits(Extent::new(2, 1, 3)));
        assert!(!region.fits(Extent::new(2, 1, 2)));
    }

    #[test]
    fn reversed_range_is_empty() {
        let range = IndexRange::new(3, 2);
        assert!(range.is_empty());
        assert_eq!(range.len(), 0);
        assert_eq!(range.iter().count(), 0);
        assert_eq!(IndexRange::new(2, 2).len(), 1);

        let region = PerAxis::new(range, IndexRange::new(1, 2), IndexRange::new(1, 1));
        assert_eq!(region.extent(), Extent::new(0, 2, 1));
    }

    #[test]
    fn checked_volume() {
        assert_eq!(Extent::new(2, 3, 4).checked_volume(), Some(24));
        assert_eq!(Extent::new(0, usize::MAX, 2).checked_volume(), Some(0));
        assert_eq!(Extent::new(1 << 32, 1 << 32, 2).checked_volume(), None);
    }

    #[test]
    fn bound_pair_conversions() {
        assert_eq!(BoundPair::from([1.0, 4.0]), BoundPair::new(1.0, 4.0));
        assert_eq!(
            BoundPair::from(IndexRange::new(2, 3)),
            BoundPair::new(2.0, 3.0)
        );
        assert!(!BoundPair::new(f64::NAN, 1.0).is_finite());
    }
}

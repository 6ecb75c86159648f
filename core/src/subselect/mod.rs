//! Extraction of an axis-aligned block from a [`Volume`].
//!
//! Bounds arrive as inclusive, 1-based floating point pairs per axis. They are
//! validated and turned into index ranges once, by [`resolve`], before the
//! output volume is allocated. The copy itself walks slices, then columns,
//! then rows, so the output keeps the axis order and orientation of the input.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::err::{BoundsProblem, Error};
use crate::geom::{Axis, BoundPair, Bounds3, Extent, IndexRange, PerAxis, Region};
use crate::volume::Volume;


/// How fractional bounds become index ranges and output sizes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rounding {
    /// Both bounds are rounded half away from zero and the output extent is
    /// the length of the rounded range.
    #[default]
    Consistent,
    /// The output extent is `trunc(hi - lo + 1)` of the raw bounds while the
    /// iterated range still uses the rounded bounds.
    ///
    /// For fractional bounds the two can disagree. Output cells past the
    /// iterated range stay `false`, iterated cells past the extent are dropped.
    Legacy,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubselectOptions {
    pub rounding: Rounding,
}

/// Validated bounds: the input cells to walk and the shape of the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved {
    pub region: Region,
    pub extent: Extent,
}

/// Copies the cells inside `rows × cols × slices` into a new volume.
///
/// Bounds are inclusive and 1-based. Fails with [`Error::InvalidBounds`] if a
/// pair is not finite, reversed, or reaches outside the volume once rounded.
pub fn subselect(
    volume: &Volume,
    rows: impl Into<BoundPair>,
    cols: impl Into<BoundPair>,
    slices: impl Into<BoundPair>,
) -> Result<Volume, Error> {
    subselect_with(
        volume,
        Bounds3::from_pairs(rows, cols, slices),
        &SubselectOptions::default(),
    )
}

#[instrument(skip(volume), fields(shape = ?volume.shape()))]
pub fn subselect_with(
    volume: &Volume,
    bounds: Bounds3,
    options: &SubselectOptions,
) -> Result<Volume, Error> {
    let resolved = resolve(bounds, volume.shape(), options.rounding)?;
    debug!(region = ?resolved.region, extent = ?resolved.extent, "Resolved bounds");
    Ok(copy_region(volume, resolved.region, resolved.extent))
}

/// Copies an already resolved region. Fails if it doesn't fit inside the volume.
pub fn select_region(volume: &Volume, region: Region) -> Result<Volume, Error> {
    subselect_with(volume, region.to_bounds(), &SubselectOptions::default())
}

/// Copies `region` without validating it.
///
/// # Panics
///
/// Every range of `region` must lie within `[1, size]` of its axis. Panics
/// otherwise rather than reading outside the volume. A range with
/// `start > end` is empty and gives a zero-sized output axis.
pub fn subselect_unchecked(volume: &Volume, region: Region) -> Volume {
    debug_assert!(
        region.fits(volume.shape()),
        "region {region:?} outside volume of shape {:?}",
        volume.shape()
    );
    copy_region(volume, region, region.extent())
}

/// Validates `bounds` against `shape` and computes the region to copy and the output extent.
pub fn resolve(bounds: Bounds3, shape: Extent, rounding: Rounding) -> Result<Resolved, Error> {
    let axes = bounds.map(|axis, pair| resolve_axis(axis, pair, shape[axis], rounding));
    let (row, col, slice) = (axes.row?, axes.col?, axes.slice?);

    Ok(Resolved {
        region: PerAxis::new(row.0, col.0, slice.0),
        extent: PerAxis::new(row.1, col.1, slice.1),
    })
}

fn resolve_axis(
    axis: Axis,
    bounds: BoundPair,
    size: usize,
    rounding: Rounding,
) -> Result<(IndexRange, usize), Error> {
    let invalid = |problem| Error::InvalidBounds {
        axis,
        bounds,
        size,
        problem,
    };

    if !bounds.is_finite() {
        return Err(invalid(BoundsProblem::NotFinite));
    }
    if bounds.hi < bounds.lo {
        return Err(invalid(BoundsProblem::Reversed));
    }

    // f64::round goes half away from zero.
    let start = bounds.lo.round();
    let end = bounds.hi.round();
    if start < 1.0 {
        return Err(invalid(BoundsProblem::BelowOne));
    }
    if end > size as f64 {
        return Err(invalid(BoundsProblem::PastEnd));
    }

    let range = IndexRange::new(start as usize, end as usize);
    let extent = match rounding {
        Rounding::Consistent => range.len(),
        Rounding::Legacy => {
            // hi >= lo, so this is at least 1.
            let extent = (bounds.hi - bounds.lo + 1.0).trunc() as usize;
            if extent != range.len() {
                warn!(
                    %axis, %bounds, %range, extent,
                    "Output extent disagrees with the iterated range"
                );
            }
            extent
        }
    };

    Ok((range, extent))
}

fn copy_region(volume: &Volume, region: Region, extent: Extent) -> Volume {
    let mut out = Volume::falses(extent);

    for (place_s, s) in region.slice.iter().enumerate().take(extent.slice) {
        for (place_c, c) in region.col.iter().enumerate().take(extent.col) {
            for (place_r, r) in region.row.iter().enumerate().take(extent.row) {
                out[[place_r, place_c, place_s]] = volume[[r - 1, c - 1, s - 1]];
            }
        }
    }

    out
}

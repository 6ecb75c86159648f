use miette::Diagnostic;
use thiserror::Error;

use crate::geom::{Axis, BoundPair, Extent};

/// Why a bound pair was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundsProblem {
    /// `lo` or `hi` is NaN or infinite.
    NotFinite,
    /// `hi < lo`.
    Reversed,
    /// The rounded lower bound is below 1.
    BelowOne,
    /// The rounded upper bound lies past the end of the axis.
    PastEnd,
}

impl std::fmt::Display for BoundsProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            BoundsProblem::NotFinite => "bounds are not finite",
            BoundsProblem::Reversed => "upper bound is below lower bound",
            BoundsProblem::BelowOne => "lower bound is below 1",
            BoundsProblem::PastEnd => "upper bound is past the end of the axis",
        })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Invalid {axis} bounds {bounds} for axis of size {size}: {problem}")]
    #[diagnostic(
        code(subvolume::bounds::invalid),
        help("Bounds are inclusive and 1-based: 1 <= lo <= hi <= axis size")
    )]
    InvalidBounds {
        axis: Axis,
        bounds: BoundPair,
        size: usize,
        problem: BoundsProblem,
    },

    #[error("Shape {shape:?} doesn't match a buffer of {len} cells")]
    #[diagnostic(code(subvolume::volume::shape_mismatch))]
    ShapeMismatch { shape: Extent, len: usize },

    #[error("Array layout error: {0}")]
    #[diagnostic(code(subvolume::volume::layout))]
    Layout(#[from] ndarray::ShapeError),
}

//! Axis-aligned sub-block extraction for 3D boolean volumes.
//!
//! A [`Volume`] is a dense `(rows, cols, slices)` array of booleans stored
//! column-major. [`subselect`] copies the cells inside three inclusive,
//! 1-based bound pairs into a fresh volume. The [`mask`] module builds such
//! volumes from ROI label maps and crops them to their content.

// #![warn(clippy::pedantic)]
#![warn(clippy::complexity)]
#![warn(clippy::correctness)]
#![warn(clippy::perf)]
#![warn(clippy::style)]
#![warn(clippy::suspicious)]
#![warn(clippy::print_stdout)]
#![warn(clippy::print_stderr)]
// #![warn(clippy::unwrap_used)]
// #![warn(clippy::expect_used)]

pub mod err;
pub mod geom;
pub mod mask;
pub mod subselect;
pub mod volume;

pub use err::{BoundsProblem, Error};
pub use geom::{Axis, BoundPair, Bounds3, Extent, IndexRange, PerAxis, Region};
pub use subselect::{subselect, subselect_unchecked, subselect_with, Rounding, SubselectOptions};
pub use volume::Volume;

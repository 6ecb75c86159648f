use std::ops::{Index, IndexMut};

use ndarray::{Array3, ShapeBuilder};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::err::Error;
use crate::geom::{Extent, PerAxis};

/// Dense 3D boolean array with `(rows, cols, slices)` shape.
///
/// Cells are laid out column-major: the row index varies fastest, then the
/// column, then the slice. Every constructor keeps the backing array in that
/// layout, whatever layout it was handed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "RawVolume", try_from = "RawVolume")]
pub struct Volume {
    data: Array3<bool>,
}

/// Serialized form: shape plus column-major cells.
#[derive(Serialize, Deserialize)]
struct RawVolume {
    shape: Extent,
    data: Vec<bool>,
}

/// 0-based offset of the 1-based cell `(row, col, slice)` in a column-major
/// buffer of the given shape.
///
/// All three indices must be at least 1.
pub fn linear_index(shape: Extent, row: usize, col: usize, slice: usize) -> usize {
    (row - 1) + shape.row * (col - 1) + shape.row * shape.col * (slice - 1)
}

impl Volume {
    /// Wraps a column-major buffer. Fails if the buffer length doesn't match the shape.
    pub fn from_column_major(shape: impl Into<Extent>, data: Vec<bool>) -> Result<Self, Error> {
        let shape = shape.into();
        if shape.checked_volume() != Some(data.len()) {
            return Err(Error::ShapeMismatch {
                shape,
                len: data.len(),
            });
        }

        let data = Array3::from_shape_vec((shape.row, shape.col, shape.slice).f(), data)?;
        Ok(Self { data })
    }

    /// A volume of the given shape with every cell `false`.
    pub fn falses(shape: impl Into<Extent>) -> Self {
        let shape = shape.into();
        Self {
            data: Array3::from_elem((shape.row, shape.col, shape.slice).f(), false),
        }
    }

    pub fn from_array(data: Array3<bool>) -> Self {
        if data.t().is_standard_layout() {
            return Self { data };
        }

        trace!(dim = ?data.dim(), "Relaying out array in column-major order");
        let mut relaid = Array3::from_elem(data.raw_dim().f(), false);
        relaid.assign(&data);
        Self { data: relaid }
    }

    pub fn shape(&self) -> Extent {
        let (row, col, slice) = self.data.dim();
        PerAxis::new(row, col, slice)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The cell at 1-based `(row, col, slice)`, or `None` outside the volume.
    pub fn get(&self, row: usize, col: usize, slice: usize) -> Option<bool> {
        if row == 0 || col == 0 || slice == 0 {
            return None;
        }
        self.data.get((row - 1, col - 1, slice - 1)).copied()
    }

    pub fn count_true(&self) -> usize {
        self.data.iter().filter(|&&cell| cell).count()
    }

    pub fn to_column_major_vec(&self) -> Vec<bool> {
        // The transposed view iterates with the row axis fastest.
        self.data.t().iter().copied().collect()
    }

    pub fn as_array(&self) -> &Array3<bool> {
        &self.data
    }

}

/// 0-based `[row, col, slice]` indexing. Panics outside the volume.
impl Index<[usize; 3]> for Volume {
    type Output = bool;

    fn index(&self, index: [usize; 3]) -> &bool {
        &self.data[index]
    }
}

impl IndexMut<[usize; 3]> for Volume {
    fn index_mut(&mut self, index: [usize; 3]) -> &mut bool {
        &mut self.data[index]
    }
}

impl From<Volume> for RawVolume {
    fn from(volume: Volume) -> Self {
        RawVolume {
            shape: volume.shape(),
            data: volume.to_column_major_vec(),
        }
    }
}

impl TryFrom<RawVolume> for Volume {
    type Error = Error;

    fn try_from(raw: RawVolume) -> Result<Self, Error> {
        Volume::from_column_major(raw.shape, raw.data)
    }
}

//! Boolean region-of-interest masks: pulling one ROI out of a bit-packed label
//! map, and cropping a mask down to the block that holds it.

use ndarray::Array3;
use tracing::{debug, instrument};

use crate::geom::{IndexRange, PerAxis, Region};
use crate::subselect::subselect_unchecked;
use crate::volume::Volume;

/// Extracts ROI number `roi` from a label map where every voxel stores one
/// membership bit per ROI.
///
/// A voxel belongs to the mask if bit `roi` of its label is set. ROIs past
/// the width of the label type give an all-false mask.
#[instrument(skip(labels), fields(dim = ?labels.dim()))]
pub fn mask_from_label_map(labels: &Array3<u32>, roi: u32) -> Volume {
    let mask = labels.mapv(|label| label.checked_shr(roi).map_or(false, |l| l & 1 != 0));
    Volume::from_array(mask)
}

/// The smallest region containing every `true` cell, or `None` if there is none.
pub fn bounding_box(volume: &Volume) -> Option<Region> {
    let mut min = [usize::MAX; 3];
    let mut max = [0; 3];
    let mut any = false;

    for ((r, c, s), &cell) in volume.as_array().indexed_iter() {
        if !cell {
            continue;
        }
        any = true;
        for (axis, index) in [r, c, s].into_iter().enumerate() {
            min[axis] = min[axis].min(index);
            max[axis] = max[axis].max(index);
        }
    }

    if !any {
        return None;
    }

    let range = |axis: usize| IndexRange::new(min[axis] + 1, max[axis] + 1);
    Some(PerAxis::new(range(0), range(1), range(2)))
}

/// Copies the bounding box of the mask into a new volume.
#[instrument(skip(volume), fields(shape = ?volume.shape()))]
pub fn crop_to_mask(volume: &Volume) -> Option<Volume> {
    let region = bounding_box(volume)?;
    debug!(?region, "Cropping to mask");
    Some(subselect_unchecked(volume, region))
}

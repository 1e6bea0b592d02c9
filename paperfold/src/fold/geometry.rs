//! Fold partitioning.
//!
//! Every fold gets the exact fractional height `H / N`; nothing is rounded
//! here and no remainder is pushed onto the last fold. Renderers that need
//! whole rows round each box on their own.

use crate::error::FoldError;

/// Measured container and per-fold height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoldMetrics {
    pub container_height: f32,
    pub folds: u16,
    pub fold_height: f32,
}

impl FoldMetrics {
    /// Partition `container_height` into `folds` equal bands.
    pub fn new(container_height: f32, folds: u16) -> Result<Self, FoldError> {
        if folds == 0 {
            return Err(FoldError::InvalidConfiguration(
                "fold count must be positive".into(),
            ));
        }
        if !(container_height.is_finite() && container_height > 0.0) {
            return Err(FoldError::InvalidConfiguration(format!(
                "container height {container_height} is not measurable"
            )));
        }
        Ok(Self {
            container_height,
            folds,
            fold_height: container_height / f32::from(folds),
        })
    }

    /// Geometry of fold `index`.
    pub fn fold(&self, index: u16) -> FoldGeometry {
        let i = f32::from(index);
        FoldGeometry {
            index,
            height: self.fold_height,
            half_height: self.fold_height / 2.0,
            top_offset: -(i * self.fold_height),
            bottom_offset: (i + 1.0) * self.fold_height - self.container_height,
        }
    }

    /// All folds in index order.
    pub fn iter(&self) -> impl Iterator<Item = FoldGeometry> + '_ {
        (0..self.folds).map(|index| self.fold(index))
    }
}

/// Where fold `index` sits and how its two content clones are shifted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoldGeometry {
    pub index: u16,
    pub height: f32,
    pub half_height: f32,
    /// Shift of the top half's clone so its slice starts at the fold's band.
    pub top_offset: f32,
    /// Shift of the bottom half's clone measured from the container's bottom edge.
    pub bottom_offset: f32,
}

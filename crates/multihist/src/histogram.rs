//! Multi-dimensional histogram container.
//!
//! [`Histogram`] owns an ordered axis set and a flat value storage sized to
//! the product of the axis extents. Filling maps coordinates through the axes
//! to a flat index; reading goes through signed axis indices or a
//! [`Cursor`](crate::Cursor).

use ndarray::{ArrayD, IxDyn, ShapeBuilder};

use crate::axis::{Axis, AxisSet};
use crate::index::stride::unfold;
use crate::iter::{Cells, Cursor};
use crate::storage::{ArrayStorage, Storage};

/// Coordinate type of an axis set.
pub type ValueOf<X> = <<X as AxisSet>::Axis as Axis>::Value;

// =============================================================================
// Errors
// =============================================================================

/// Histogram construction and access error.
#[derive(Debug, thiserror::Error)]
pub enum HistogramError {
    /// A histogram needs at least one axis.
    #[error("histogram needs at least one axis")]
    NoAxes,

    /// The product of axis extents overflows `usize`.
    #[error("total cell count overflows usize")]
    TooManyCells,

    /// Wrong number of coordinates or indices.
    #[error("expected {expected} values, one per axis, got {got}")]
    RankMismatch { expected: usize, got: usize },

    /// Storage length does not match the axes.
    #[error("storage has {got} cells, axes need {expected}")]
    StorageSize { expected: usize, got: usize },

    /// A signed axis index addresses no cell.
    #[error("index {index} out of range for axis {axis} (size {size}, flow: {flow})")]
    IndexOutOfRange {
        axis: usize,
        index: i32,
        size: usize,
        flow: bool,
    },

    /// Dense array export failed.
    #[error(transparent)]
    Shape(#[from] ndarray::ShapeError),
}

// =============================================================================
// Histogram
// =============================================================================

/// Histogram over an axis set `X` with cell storage `S`.
///
/// # Example
///
/// ```
/// use multihist::{AnyAxis, Histogram};
/// use multihist::axis::{Category, Regular};
///
/// let axes: Vec<AnyAxis> = vec![
///     Regular::new(4, 0.0, 1.0).unwrap().into(),
///     Category::new(vec![1i32, 2]).unwrap().into(),
/// ];
/// let mut hist: Histogram<_> = Histogram::new(axes).unwrap();
/// assert_eq!(hist.len(), 6 * 2);
///
/// hist.fill(&[0.3, 2.0]).unwrap();
/// hist.fill(&[0.3, 2.0]).unwrap();
/// assert_eq!(*hist.at(&[1, 1]).unwrap(), 2.0);
/// assert_eq!(hist.iter().sum::<f64>(), 2.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Histogram<X, S = ArrayStorage<f64>> {
    axes: X,
    storage: S,
}

impl<X: AxisSet, S: Storage> Histogram<X, S> {
    /// Create a histogram with zeroed storage.
    ///
    /// # Errors
    ///
    /// [`HistogramError::NoAxes`] for an empty axis set,
    /// [`HistogramError::TooManyCells`] if the cell count overflows.
    pub fn new(axes: X) -> Result<Self, HistogramError> {
        let len = checked_cell_count(&axes)?;
        log::debug!("creating histogram: rank={}, cells={}", axes.rank(), len);
        Ok(Self {
            axes,
            storage: S::zeroed(len),
        })
    }

    /// Create a histogram over existing cell values.
    ///
    /// # Errors
    ///
    /// As [`Histogram::new`], plus [`HistogramError::StorageSize`] if the
    /// storage length differs from the cell count.
    pub fn with_storage(axes: X, storage: S) -> Result<Self, HistogramError> {
        let len = checked_cell_count(&axes)?;
        if storage.len() != len {
            return Err(HistogramError::StorageSize {
                expected: len,
                got: storage.len(),
            });
        }
        log::debug!("wrapping storage: rank={}, cells={}", axes.rank(), len);
        Ok(Self { axes, storage })
    }

    /// Number of axes.
    #[inline]
    pub fn rank(&self) -> usize {
        self.axes.rank()
    }

    #[inline]
    pub fn axes(&self) -> &X {
        &self.axes
    }

    /// Axis at position `k`.
    ///
    /// # Panics
    ///
    /// Panics if `k >= rank()`.
    #[inline]
    pub fn axis(&self, k: usize) -> &X::Axis {
        self.axes.axis(k)
    }

    /// Total number of cells, flow cells included.
    #[inline]
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    #[inline]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_parts(self) -> (X, S) {
        (self.axes, self.storage)
    }

    // -------------------------------------------------------------------------
    // Filling
    // -------------------------------------------------------------------------

    /// Count one entry at `values`, one coordinate per axis.
    ///
    /// Returns `Ok(false)` if a coordinate maps to no cell (an unknown
    /// category, or an out-of-range value on an axis without flow bins).
    pub fn fill(&mut self, values: &[ValueOf<X>]) -> Result<bool, HistogramError>
    where
        ValueOf<X>: Sized,
    {
        match self.locate(values)? {
            Some(flat) => {
                self.storage.increment(flat);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Add `weight` at `values`, one coordinate per axis.
    ///
    /// Same drop semantics as [`Histogram::fill`].
    pub fn fill_weighted(
        &mut self,
        values: &[ValueOf<X>],
        weight: S::Value,
    ) -> Result<bool, HistogramError>
    where
        ValueOf<X>: Sized,
    {
        match self.locate(values)? {
            Some(flat) => {
                self.storage.add(flat, weight);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Flat index of the cell containing `values`, `None` if there is none.
    fn locate(&self, values: &[ValueOf<X>]) -> Result<Option<usize>, HistogramError>
    where
        ValueOf<X>: Sized,
    {
        self.check_rank(values.len())?;
        let indices = self
            .axes
            .as_slice()
            .iter()
            .zip(values)
            .map(|(axis, value)| axis.index(value));
        match self.flat_index(indices) {
            Ok(flat) => Ok(Some(flat)),
            Err(HistogramError::IndexOutOfRange { .. }) => Ok(None),
            Err(err) => Err(err),
        }
    }

    // -------------------------------------------------------------------------
    // Access
    // -------------------------------------------------------------------------

    /// Value of the cell at signed per-axis `indices`.
    ///
    /// # Errors
    ///
    /// [`HistogramError::RankMismatch`] or [`HistogramError::IndexOutOfRange`].
    pub fn at(&self, indices: &[i32]) -> Result<&S::Value, HistogramError> {
        self.check_rank(indices.len())?;
        let flat = self.flat_index(indices.iter().copied())?;
        Ok(self.storage.get(flat))
    }

    /// Encode one signed index per axis, rejecting indices that address no cell.
    ///
    /// Uses the stride layout of [`crate::index::stride`] without holding a
    /// descriptor table. Callers check the rank first.
    fn flat_index(&self, indices: impl IntoIterator<Item = i32>) -> Result<usize, HistogramError> {
        let mut flat = 0;
        let mut stride = 1;
        for (k, (axis, index)) in self.axes.as_slice().iter().zip(indices).enumerate() {
            if !axis.contains_index(index) {
                return Err(HistogramError::IndexOutOfRange {
                    axis: k,
                    index,
                    size: axis.size(),
                    flow: axis.has_flow(),
                });
            }
            flat += unfold(index, axis.size() as i32) * stride;
            stride *= axis.extent();
        }
        Ok(flat)
    }

    fn check_rank(&self, got: usize) -> Result<(), HistogramError> {
        let expected = self.rank();
        if got != expected {
            return Err(HistogramError::RankMismatch { expected, got });
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Traversal
    // -------------------------------------------------------------------------

    /// Cursor at flat index `flat`.
    #[inline]
    pub fn cursor(&self, flat: usize) -> Cursor<'_, X, S> {
        Cursor::new(&self.axes, &self.storage, flat)
    }

    /// Cursor at the first cell.
    #[inline]
    pub fn begin(&self) -> Cursor<'_, X, S> {
        self.cursor(0)
    }

    /// Cursor one past the last cell.
    #[inline]
    pub fn end(&self) -> Cursor<'_, X, S> {
        self.cursor(self.len())
    }

    /// Iterate all cell values in flat order.
    #[inline]
    pub fn iter(&self) -> Cells<'_, X, S> {
        Cells::new(self.begin(), self.end())
    }

    /// Copy all cells into a dense array.
    ///
    /// Array axis `k` has the extent of histogram axis `k` and is addressed
    /// by raw position: regular bins first, then overflow, then underflow.
    pub fn to_ndarray(&self) -> Result<ArrayD<S::Value>, HistogramError>
    where
        S::Value: Clone,
    {
        let shape: Vec<usize> = self.axes.as_slice().iter().map(Axis::extent).collect();
        let values: Vec<S::Value> = self.iter().cloned().collect();
        // Axis 0 varies fastest, which is column-major order.
        Ok(ArrayD::from_shape_vec(IxDyn(&shape).f(), values)?)
    }
}

impl<'h, X: AxisSet, S: Storage> IntoIterator for &'h Histogram<X, S> {
    type Item = &'h S::Value;
    type IntoIter = Cells<'h, X, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn checked_cell_count<X: AxisSet>(axes: &X) -> Result<usize, HistogramError> {
    let axes = axes.as_slice();
    if axes.is_empty() {
        return Err(HistogramError::NoAxes);
    }
    axes.iter()
        .try_fold(1usize, |acc, axis| acc.checked_mul(axis.extent()))
        .ok_or(HistogramError::TooManyCells)
}

// =============================================================================
// Tests
// =============================================================================

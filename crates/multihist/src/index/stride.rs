//! Stride table construction.
//!
//! Cells are laid out with axis 0 varying fastest. The stride of axis `k` is
//! the product of the extents of axes `0..k`:
//!
//! ```text
//! axes:     [ size 2 + flow | size 3 (no flow) | size 1 + flow ]
//! extents:  [       4       |        3         |       3       ]
//! strides:  [       1       |        4         |      12       ]
//! cells:    36
//! ```

use std::cell::Cell;

use crate::axis::Axis;

/// Per-axis stride descriptor.
///
/// `index` holds the axis index of the most recent decode and is the only
/// field that changes after construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dim {
    index: Cell<i32>,
    size: i32,
    stride: usize,
    flow: bool,
}

impl Dim {
    /// Create a descriptor with index 0.
    ///
    /// # Panics
    ///
    /// Panics if `size` exceeds [`MAX_BINS`](crate::axis::MAX_BINS).
    pub fn new(size: usize, flow: bool, stride: usize) -> Self {
        assert!(
            size <= crate::axis::MAX_BINS,
            "axis size {} exceeds the supported maximum of {}",
            size,
            crate::axis::MAX_BINS
        );
        Self {
            index: Cell::new(0),
            size: size as i32,
            stride,
            flow,
        }
    }

    /// Signed axis index written by the last decode.
    #[inline]
    pub fn index(&self) -> i32 {
        self.index.get()
    }

    #[inline]
    pub(crate) fn set_index(&self, index: i32) {
        self.index.set(index);
    }

    /// Number of regular bins.
    #[inline]
    pub fn size(&self) -> i32 {
        self.size
    }

    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    #[inline]
    pub fn has_flow(&self) -> bool {
        self.flow
    }

    /// Cells spanned by the axis.
    #[inline]
    pub fn extent(&self) -> usize {
        self.size as usize + if self.flow { 2 } else { 0 }
    }

    /// Returns `true` if `index` addresses a cell of this axis.
    #[inline]
    pub fn contains(&self, index: i32) -> bool {
        if self.flow {
            (-1..=self.size).contains(&index)
        } else {
            (0..self.size).contains(&index)
        }
    }

    /// Map a raw position along the axis to a signed index.
    ///
    /// Raw `size + 1` is the underflow cell and folds to `-1`; raw `size` is
    /// the overflow cell and keeps its value.
    #[inline]
    pub fn fold(&self, raw: usize) -> i32 {
        let raw = raw as i32;
        if self.flow && raw > self.size {
            raw - (self.size + 2)
        } else {
            raw
        }
    }

    /// Inverse of [`Dim::fold`].
    #[inline]
    pub fn unfold(&self, index: i32) -> usize {
        unfold(index, self.size)
    }
}

/// Raw position of signed `index` along an axis of `size` regular bins.
#[inline]
pub fn unfold(index: i32, size: i32) -> usize {
    if index < 0 {
        (index + size + 2) as usize
    } else {
        index as usize
    }
}

/// Build one descriptor per axis, axis 0 first.
///
/// Axis 0 has stride 1; every following stride is the previous stride times
/// the previous axis's extent. Callers guarantee the product of all extents
/// fits in `usize`.
pub fn build_strides<A: Axis>(axes: &[A]) -> Box<[Dim]> {
    let mut stride = 1usize;
    let dims: Box<[Dim]> = axes
        .iter()
        .map(|axis| {
            let dim = Dim::new(axis.size(), axis.has_flow(), stride);
            stride *= axis.extent();
            dim
        })
        .collect();
    log::trace!("built stride table: rank={}, cells={}", dims.len(), cell_count(&dims));
    dims
}

/// Total number of cells addressed by a stride table, 0 for an empty table.
#[inline]
pub fn cell_count(dims: &[Dim]) -> usize {
    dims.last().map_or(0, |d| d.stride * d.extent())
}

// =============================================================================
// Tests
// =============================================================================

//! multihist: multi-dimensional histograms with flat-index cell addressing.
//!
//! Cells of all axes live in one flat array with axis 0 varying fastest.
//! Axes may carry an underflow and an overflow cell; the indexing layer maps
//! between flat positions and signed per-axis indices where `-1` is underflow
//! and `size` is overflow.
//!
//! # Key Types
//!
//! - [`Histogram`] - axes plus storage, with fill, lookup and export
//! - [`Cursor`] / [`Cells`] - bidirectional traversal with per-axis bin access
//! - [`MultiIndex`] - flat/per-axis index conversion with decode caching
//! - [`axis`] - regular, variable, integer, circular and category axes
//! - [`Storage`] / [`ArrayStorage`] - flat cell value containers

pub mod axis;
pub mod histogram;
pub mod index;
pub mod iter;
pub mod storage;

// =============================================================================
// Convenience Re-exports
// =============================================================================

pub use axis::{AnyAxis, AnyBin, Axis, AxisError, AxisOptions, AxisSet, Interval};
pub use histogram::{Histogram, HistogramError};
pub use index::MultiIndex;
pub use iter::{Cells, Cursor};
pub use storage::{ArrayStorage, Storage};

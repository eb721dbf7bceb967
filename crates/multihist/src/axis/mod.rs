//! Histogram axes.
//!
//! An axis maps a coordinate to a signed bin index and describes the bin that
//! lives at a given index. The indexing core only needs two capabilities from
//! an axis, [`Axis::size`] and [`Axis::has_flow`]; everything else is used by
//! the [`Histogram`](crate::Histogram) container and by cursor bin accessors.
//!
//! # Index Convention
//!
//! Regular bins are numbered `0..size`. Axes with flow bins additionally own an
//! underflow cell at index `-1` and an overflow cell at index `size`:
//!
//! ```text
//! signed index:   -1 |  0 |  1 | ... | size-1 | size
//!                 ───┼────┼────┼─────┼────────┼─────
//!                 UF |        regular bins    |  OF
//! ```
//!
//! # Axis Types
//!
//! - [`Regular`] - equal-width bins, optionally in a transformed space
//! - [`Variable`] - bins with arbitrary increasing edges
//! - [`Integer`] - one bin per integer value
//! - [`Circular`] - periodic bins without flow cells
//! - [`Category`] - one bin per distinct value without flow cells
//! - [`AnyAxis`] - closed enum over the above for heterogeneous histograms

use std::fmt;

mod any;
mod category;
mod circular;
mod integer;
mod regular;
mod variable;

pub use any::{AnyAxis, AnyBin};
pub use category::{Category, CategoryValue};
pub use circular::Circular;
pub use integer::Integer;
pub use regular::{Regular, Transform};
pub use variable::Variable;

/// Largest regular bin count an axis may have.
///
/// Signed indices are `i32` and an axis with flow bins needs `size + 1` to fit.
pub const MAX_BINS: usize = (i32::MAX - 2) as usize;

// =============================================================================
// Axis Trait
// =============================================================================

/// A single histogram dimension.
pub trait Axis {
    /// Coordinate type accepted by [`Axis::index`].
    type Value: ?Sized;

    /// Bin descriptor returned by [`Axis::bin`].
    type Bin;

    /// Number of regular bins.
    fn size(&self) -> usize;

    /// Whether the axis owns an underflow and an overflow cell.
    fn has_flow(&self) -> bool;

    /// Number of cells the axis spans in the flat layout.
    #[inline]
    fn extent(&self) -> usize {
        if self.has_flow() {
            self.size() + 2
        } else {
            self.size()
        }
    }

    /// Map a coordinate to a signed bin index.
    ///
    /// Coordinates below the axis range map to `-1` and coordinates above it
    /// (or unknown ones) map to `size`. On axes without flow bins those
    /// indices address no cell.
    fn index(&self, value: &Self::Value) -> i32;

    /// Describe the bin at a signed index.
    fn bin(&self, index: i32) -> Self::Bin;

    /// Axis label, empty when unset.
    fn label(&self) -> &str;

    /// Returns `true` if `index` addresses a cell of this axis.
    #[inline]
    fn contains_index(&self, index: i32) -> bool {
        let size = self.size() as i64;
        let index = index as i64;
        if self.has_flow() {
            (-1..=size).contains(&index)
        } else {
            (0..size).contains(&index)
        }
    }
}

// =============================================================================
// Axis Sets
// =============================================================================

/// An ordered collection of axes of one type.
///
/// Fixed-size arrays carry their rank in the type ([`AxisSet::RANK`]), which
/// lets cursors reject out-of-range compile-time axis positions during
/// compilation. Vectors and boxed slices have a runtime rank.
pub trait AxisSet {
    /// Axis type stored in the set.
    type Axis: Axis;

    /// Rank known at compile time, if any.
    const RANK: Option<usize> = None;

    /// The axes in order, axis 0 first.
    fn as_slice(&self) -> &[Self::Axis];

    /// Number of axes.
    #[inline]
    fn rank(&self) -> usize {
        self.as_slice().len()
    }

    /// Axis at position `k`.
    ///
    /// # Panics
    ///
    /// Panics if `k >= rank()`.
    #[inline]
    fn axis(&self, k: usize) -> &Self::Axis {
        let axes = self.as_slice();
        assert!(
            k < axes.len(),
            "axis position {} out of range for rank {}",
            k,
            axes.len()
        );
        &axes[k]
    }
}

impl<A: Axis, const N: usize> AxisSet for [A; N] {
    type Axis = A;
    const RANK: Option<usize> = Some(N);

    #[inline]
    fn as_slice(&self) -> &[A] {
        self
    }
}

impl<A: Axis> AxisSet for Vec<A> {
    type Axis = A;

    #[inline]
    fn as_slice(&self) -> &[A] {
        self
    }
}

impl<A: Axis> AxisSet for Box<[A]> {
    type Axis = A;

    #[inline]
    fn as_slice(&self) -> &[A] {
        self
    }
}

// =============================================================================
// Options
// =============================================================================

/// Per-axis configuration shared by the axis constructors.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AxisOptions {
    /// Free-form axis label.
    pub label: String,
    /// Whether the axis gets underflow and overflow cells.
    ///
    /// Ignored by axes that never have flow cells ([`Circular`], [`Category`]).
    pub flow: bool,
}

impl Default for AxisOptions {
    fn default() -> Self {
        Self {
            label: String::new(),
            flow: true,
        }
    }
}

impl AxisOptions {
    /// Default options with a label.
    pub fn labeled(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Default::default()
        }
    }

    /// Disable underflow and overflow cells.
    pub fn without_flow(mut self) -> Self {
        self.flow = false;
        self
    }
}

// =============================================================================
// Bin Descriptors
// =============================================================================

/// Half-open bin interval `[lower, upper)`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Interval<T> {
    pub lower: T,
    pub upper: T,
}

impl<T: PartialOrd> Interval<T> {
    /// Returns `true` if `value` lies in `[lower, upper)`.
    #[inline]
    pub fn contains(&self, value: &T) -> bool {
        self.lower <= *value && *value < self.upper
    }
}

impl<T: fmt::Display> fmt::Display for Interval<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.lower, self.upper)
    }
}

// =============================================================================
// Errors
// =============================================================================

/// Axis construction error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AxisError {
    /// An axis needs at least one bin.
    #[error("axis must have at least one bin")]
    NoBins,

    /// Bin count does not fit the signed index range.
    #[error("axis has {0} bins, at most {max} are supported", max = MAX_BINS)]
    TooManyBins(usize),

    /// Range bounds are not finite, not ordered, or invalid for the transform.
    #[error("invalid axis range [{lower}, {upper})")]
    InvalidRange { lower: f64, upper: f64 },

    /// Power transform exponent must be finite and non-zero.
    #[error("power transform exponent must be finite and non-zero, got {0}")]
    InvalidPower(f64),

    /// Variable axis edges must be finite and strictly increasing.
    #[error("bin edges must be finite and strictly increasing")]
    UnsortedEdges,

    /// Variable axis needs at least two edges.
    #[error("variable axis needs at least 2 edges, got {0}")]
    TooFewEdges(usize),

    /// Circular perimeter must be finite and positive.
    #[error("circular perimeter must be finite and > 0, got {0}")]
    InvalidPerimeter(f64),

    /// Category values must be unique.
    #[error("duplicate category value {0}")]
    DuplicateCategory(String),
}

pub(crate) fn check_size(size: usize) -> Result<(), AxisError> {
    match size {
        0 => Err(AxisError::NoBins),
        n if n > MAX_BINS => Err(AxisError::TooManyBins(n)),
        _ => Ok(()),
    }
}

// =============================================================================
// Formatting Helpers
// =============================================================================

/// Write `s` as a single-quoted literal.
pub(crate) fn write_escaped(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_str("'")?;
    for c in s.chars() {
        if c == '\'' {
            f.write_str("\\'")?;
        } else {
            write!(f, "{c}")?;
        }
    }
    f.write_str("'")
}

/// Write the trailing `label=` / `uoflow=` part of an axis representation.
pub(crate) fn write_options(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    flow: Option<bool>,
) -> fmt::Result {
    if !label.is_empty() {
        f.write_str(", label=")?;
        write_escaped(f, label)?;
    }
    if flow == Some(false) {
        f.write_str(", uoflow=False")?;
    }
    f.write_str(")")
}

// =============================================================================
// Tests
// =============================================================================

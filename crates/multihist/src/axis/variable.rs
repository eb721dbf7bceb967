//! Bins with arbitrary increasing edges.

use std::fmt;

use super::{Axis, AxisError, AxisOptions, Interval, check_size, write_options};

/// Axis with bins between consecutive `edges`.
///
/// `n + 1` edges define `n` bins. Edges are stored sorted, so coordinate
/// lookup is a binary search.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Variable {
    edges: Box<[f64]>,
    options: AxisOptions,
}

impl Variable {
    /// Create an axis with flow bins and no label.
    pub fn new(edges: Vec<f64>) -> Result<Self, AxisError> {
        Self::with_options(edges, AxisOptions::default())
    }

    /// Create an axis with explicit options.
    ///
    /// # Errors
    ///
    /// - [`AxisError::TooFewEdges`] with fewer than two edges
    /// - [`AxisError::UnsortedEdges`] if edges are not finite and strictly increasing
    pub fn with_options(edges: Vec<f64>, options: AxisOptions) -> Result<Self, AxisError> {
        if edges.len() < 2 {
            return Err(AxisError::TooFewEdges(edges.len()));
        }
        check_size(edges.len() - 1)?;
        if edges.iter().any(|e| !e.is_finite()) || edges.windows(2).any(|w| !(w[0] < w[1])) {
            return Err(AxisError::UnsortedEdges);
        }
        Ok(Self {
            edges: edges.into_boxed_slice(),
            options,
        })
    }

    /// Bin edges, `size + 1` values.
    #[inline]
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// Lower edge of bin `index`, `-inf` for underflow and `+inf` past overflow.
    pub fn value(&self, index: i32) -> f64 {
        if index < 0 {
            f64::NEG_INFINITY
        } else {
            self.edges
                .get(index as usize)
                .copied()
                .unwrap_or(f64::INFINITY)
        }
    }
}

impl Axis for Variable {
    type Value = f64;
    type Bin = Interval<f64>;

    #[inline]
    fn size(&self) -> usize {
        self.edges.len() - 1
    }

    #[inline]
    fn has_flow(&self) -> bool {
        self.options.flow
    }

    fn index(&self, value: &f64) -> i32 {
        if value.is_nan() {
            return self.size() as i32;
        }
        // Number of edges <= value, minus one: -1 below the first edge,
        // size at or above the last.
        self.edges.partition_point(|e| e <= value) as i32 - 1
    }

    #[inline]
    fn bin(&self, index: i32) -> Interval<f64> {
        Interval {
            lower: self.value(index),
            upper: self.value(index.saturating_add(1)),
        }
    }

    #[inline]
    fn label(&self) -> &str {
        &self.options.label
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("variable(")?;
        for (i, edge) in self.edges.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{edge}")?;
        }
        write_options(f, &self.options.label, Some(self.options.flow))
    }
}

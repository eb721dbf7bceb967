//! Equal-width bins, optionally in a transformed coordinate space.

use std::fmt;

use super::{Axis, AxisError, AxisOptions, Interval, check_size, write_options};

// ============================================================================
// Transform
// ============================================================================

/// Coordinate transform applied before equal-width binning.
///
/// Bins are equally wide in the transformed space, so `Log` yields
/// logarithmically spaced edges in the original coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Transform {
    #[default]
    Identity,
    Log,
    Sqrt,
    /// `x.powf(p)`; `p` must be finite and non-zero.
    Pow(f64),
}

impl Transform {
    /// Map a coordinate into the binning space.
    #[inline]
    pub fn forward(self, x: f64) -> f64 {
        match self {
            Transform::Identity => x,
            Transform::Log => x.ln(),
            Transform::Sqrt => x.sqrt(),
            Transform::Pow(p) => x.powf(p),
        }
    }

    /// Map a binning-space value back to a coordinate.
    #[inline]
    pub fn inverse(self, y: f64) -> f64 {
        match self {
            Transform::Identity => y,
            Transform::Log => y.exp(),
            Transform::Sqrt => y * y,
            Transform::Pow(p) => y.powf(1.0 / p),
        }
    }

    fn suffix(self) -> &'static str {
        match self {
            Transform::Identity => "",
            Transform::Log => "_log",
            Transform::Sqrt => "_sqrt",
            Transform::Pow(_) => "_pow",
        }
    }
}

// ============================================================================
// Regular
// ============================================================================

/// Axis with `size` equal-width bins over `[lower, upper)`.
///
/// # Example
///
/// ```
/// use multihist::axis::{Axis, Regular};
///
/// let axis = Regular::new(4, 0.0, 1.0).unwrap();
/// assert_eq!(axis.index(&0.3), 1);
/// assert_eq!(axis.index(&-0.1), -1);
/// assert_eq!(axis.index(&1.0), 4);
/// assert_eq!(axis.bin(1).lower, 0.25);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Regular {
    size: usize,
    lower: f64,
    upper: f64,
    /// Lower bound in transformed space.
    min: f64,
    /// Range width in transformed space.
    delta: f64,
    transform: Transform,
    options: AxisOptions,
}

impl Regular {
    /// Create an identity-transform axis with flow bins and no label.
    pub fn new(size: usize, lower: f64, upper: f64) -> Result<Self, AxisError> {
        Self::with_options(size, lower, upper, Transform::Identity, AxisOptions::default())
    }

    /// Create an axis with a transform and explicit options.
    ///
    /// # Errors
    ///
    /// - [`AxisError::NoBins`] / [`AxisError::TooManyBins`] for a bad `size`
    /// - [`AxisError::InvalidPower`] for a zero or non-finite exponent
    /// - [`AxisError::InvalidRange`] if `lower >= upper` or the transformed
    ///   bounds are not finite and increasing
    pub fn with_options(
        size: usize,
        lower: f64,
        upper: f64,
        transform: Transform,
        options: AxisOptions,
    ) -> Result<Self, AxisError> {
        check_size(size)?;
        if let Transform::Pow(p) = transform {
            if !p.is_finite() || p == 0.0 {
                return Err(AxisError::InvalidPower(p));
            }
        }
        let invalid = AxisError::InvalidRange { lower, upper };
        if !(lower < upper) {
            return Err(invalid);
        }
        let min = transform.forward(lower);
        let max = transform.forward(upper);
        if !min.is_finite() || !max.is_finite() || !(min < max) {
            return Err(invalid);
        }

        Ok(Self {
            size,
            lower,
            upper,
            min,
            delta: max - min,
            transform,
            options,
        })
    }

    /// Lower edge of the axis range.
    #[inline]
    pub fn lower(&self) -> f64 {
        self.lower
    }

    /// Upper edge of the axis range.
    #[inline]
    pub fn upper(&self) -> f64 {
        self.upper
    }

    #[inline]
    pub fn transform(&self) -> Transform {
        self.transform
    }

    /// Lower edge of bin `index` in the original coordinate.
    ///
    /// Returns `-inf` for the underflow bin and `+inf` past the overflow bin.
    pub fn value(&self, index: i32) -> f64 {
        let size = self.size as i64;
        let index = index as i64;
        if index < 0 {
            f64::NEG_INFINITY
        } else if index > size {
            f64::INFINITY
        } else if index == 0 {
            self.lower
        } else if index == size {
            self.upper
        } else {
            let z = index as f64 / size as f64;
            self.transform.inverse(self.min + z * self.delta)
        }
    }
}

impl Axis for Regular {
    type Value = f64;
    type Bin = Interval<f64>;

    #[inline]
    fn size(&self) -> usize {
        self.size
    }

    #[inline]
    fn has_flow(&self) -> bool {
        self.options.flow
    }

    fn index(&self, value: &f64) -> i32 {
        let size = self.size as i32;
        if value.is_nan() {
            return size;
        }
        let z = (self.transform.forward(*value) - self.min) / self.delta;
        // Transforms return NaN only below their domain.
        if z.is_nan() || z < 0.0 {
            -1
        } else if z >= 1.0 {
            size
        } else {
            ((z * self.size as f64) as i32).min(size - 1)
        }
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

impl fmt::Display for Regular {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "regular{}({}, {}, {}",
            self.transform.suffix(),
            self.size,
            self.lower,
            self.upper
        )?;
        if let Transform::Pow(p) = self.transform {
            write!(f, ", {p}")?;
        }
        write_options(f, &self.options.label, Some(self.options.flow))
    }
}

// ============================================================================
// Tests
// ============================================================================

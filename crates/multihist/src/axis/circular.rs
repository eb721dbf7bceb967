//! Periodic axis.

use std::f64::consts::TAU;
use std::fmt;

use super::{Axis, AxisError, AxisOptions, Interval, check_size, write_options};

/// Axis with `size` equal bins over one period `[phase, phase + perimeter)`.
///
/// Coordinates wrap around, so every finite coordinate lands in a regular
/// bin and the axis never has flow cells.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Circular {
    size: usize,
    phase: f64,
    perimeter: f64,
    label: String,
}

impl Circular {
    /// Create an axis over `[0, 2π)`.
    pub fn new(size: usize) -> Result<Self, AxisError> {
        Self::with_options(size, 0.0, TAU, AxisOptions::default())
    }

    /// Create an axis with an explicit period.
    ///
    /// Only the label of `options` is used.
    pub fn with_options(
        size: usize,
        phase: f64,
        perimeter: f64,
        options: AxisOptions,
    ) -> Result<Self, AxisError> {
        check_size(size)?;
        if !perimeter.is_finite() || perimeter <= 0.0 {
            return Err(AxisError::InvalidPerimeter(perimeter));
        }
        if !phase.is_finite() {
            return Err(AxisError::InvalidRange {
                lower: phase,
                upper: phase + perimeter,
            });
        }
        Ok(Self {
            size,
            phase,
            perimeter,
            label: options.label,
        })
    }

    #[inline]
    pub fn phase(&self) -> f64 {
        self.phase
    }

    #[inline]
    pub fn perimeter(&self) -> f64 {
        self.perimeter
    }

    /// Lower edge of bin `index` (not wrapped).
    #[inline]
    pub fn value(&self, index: i32) -> f64 {
        self.phase + self.perimeter * (index as f64 / self.size as f64)
    }
}

impl Axis for Circular {
    type Value = f64;
    type Bin = Interval<f64>;

    #[inline]
    fn size(&self) -> usize {
        self.size
    }

    #[inline]
    fn has_flow(&self) -> bool {
        false
    }

    fn index(&self, value: &f64) -> i32 {
        let size = self.size as i32;
        if !value.is_finite() {
            return size;
        }
        let z = (value - self.phase) / self.perimeter;
        let z = z - z.floor();
        ((z * self.size as f64) as i32).min(size - 1)
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
        &self.label
    }
}

impl fmt::Display for Circular {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "circular({}", self.size)?;
        if self.phase != 0.0 {
            write!(f, ", phase={}", self.phase)?;
        }
        if self.perimeter != TAU {
            write!(f, ", perimeter={}", self.perimeter)?;
        }
        write_options(f, &self.label, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, 0)]
    #[case(0.9, 0)]
    #[case(1.0, 1)]
    #[case(3.5, 3)]
    #[case(4.0, 0)]
    #[case(-0.5, 3)]
    #[case(9.25, 1)]
    #[case(f64::NAN, 4)]
    fn index_wraps(#[case] x: f64, #[case] expected: i32) {
        let axis = Circular::with_options(4, 0.0, 4.0, AxisOptions::default()).unwrap();
        assert_eq!(axis.index(&x), expected);
    }

    #[test]
    fn never_has_flow() {
        let axis = Circular::with_options(4, 0.0, 4.0, AxisOptions::default()).unwrap();
        assert!(!axis.has_flow());
        assert_eq!(axis.extent(), 4);
    }

    #[test]
    fn bins() {
        let axis = Circular::new(4).unwrap();
        let bin = axis.bin(1);
        assert_relative_eq!(bin.lower, TAU / 4.0);
        assert_relative_eq!(bin.upper, TAU / 2.0);
    }

    #[test]
    fn rejects_bad_perimeter() {
        assert_eq!(
            Circular::with_options(4, 0.0, -1.0, AxisOptions::default()),
            Err(AxisError::InvalidPerimeter(-1.0))
        );
    }

    #[test]
    fn display() {
        assert_eq!(Circular::new(8).unwrap().to_string(), "circular(8)");
        let axis = Circular::with_options(4, 1.0, 4.0, AxisOptions::labeled("phi")).unwrap();
        assert_eq!(
            axis.to_string(),
            "circular(4, phase=1, perimeter=4, label='phi')"
        );
    }
}

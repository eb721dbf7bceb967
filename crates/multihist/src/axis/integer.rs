//! One bin per integer value.

use std::fmt;

use super::{Axis, AxisError, AxisOptions, Interval, check_size, write_options};

/// Axis with one bin per integer in `[lower, upper)`.
///
/// Bin `i` is `[lower + i, lower + i + 1)`. The flow bins extend to
/// `i32::MIN` and `i32::MAX`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Integer {
    lower: i32,
    size: usize,
    options: AxisOptions,
}

impl Integer {
    /// Create an axis with flow bins and no label.
    pub fn new(lower: i32, upper: i32) -> Result<Self, AxisError> {
        Self::with_options(lower, upper, AxisOptions::default())
    }

    /// Create an axis with explicit options.
    pub fn with_options(lower: i32, upper: i32, options: AxisOptions) -> Result<Self, AxisError> {
        if lower >= upper {
            return Err(AxisError::InvalidRange {
                lower: lower.into(),
                upper: upper.into(),
            });
        }
        let size = (upper as i64 - lower as i64) as usize;
        check_size(size)?;
        Ok(Self {
            lower,
            size,
            options,
        })
    }

    #[inline]
    pub fn lower(&self) -> i32 {
        self.lower
    }

    /// Exclusive upper bound.
    #[inline]
    pub fn upper(&self) -> i32 {
        (self.lower as i64 + self.size as i64) as i32
    }

    /// Lower edge of bin `index`.
    pub fn value(&self, index: i32) -> i32 {
        let size = self.size as i64;
        let index = index as i64;
        if index < 0 {
            i32::MIN
        } else if index > size {
            i32::MAX
        } else {
            (self.lower as i64 + index) as i32
        }
    }

    /// Index of a floating-point coordinate, floored to the integer below.
    pub(crate) fn index_f64(&self, value: f64) -> i32 {
        if value.is_nan() {
            return self.size as i32;
        }
        let offset = value.floor() - self.lower as f64;
        if offset < 0.0 {
            -1
        } else if offset >= self.size as f64 {
            self.size as i32
        } else {
            offset as i32
        }
    }
}

impl Axis for Integer {
    type Value = i32;
    type Bin = Interval<i32>;

    #[inline]
    fn size(&self) -> usize {
        self.size
    }

    #[inline]
    fn has_flow(&self) -> bool {
        self.options.flow
    }

    #[inline]
    fn index(&self, value: &i32) -> i32 {
        let offset = *value as i64 - self.lower as i64;
        if offset < 0 {
            -1
        } else {
            offset.min(self.size as i64) as i32
        }
    }

    #[inline]
    fn bin(&self, index: i32) -> Interval<i32> {
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

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "integer({}, {}", self.lower, self.upper())?;
        write_options(f, &self.options.label, Some(self.options.flow))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(-5, -1)]
    #[case(-2, -1)]
    #[case(-1, 0)]
    #[case(0, 1)]
    #[case(2, 3)]
    #[case(3, 4)]
    #[case(i32::MAX, 4)]
    fn index(#[case] v: i32, #[case] expected: i32) {
        let axis = Integer::new(-1, 3).unwrap();
        assert_eq!(axis.size(), 4);
        assert_eq!(axis.index(&v), expected);
    }

    #[rstest]
    #[case(-1.5, -1)]
    #[case(-0.5, 0)]
    #[case(2.99, 3)]
    #[case(3.0, 4)]
    #[case(f64::NAN, 4)]
    fn index_f64(#[case] x: f64, #[case] expected: i32) {
        let axis = Integer::new(-1, 3).unwrap();
        assert_eq!(axis.index_f64(x), expected);
    }

    #[test]
    fn bins() {
        let axis = Integer::new(-1, 3).unwrap();
        assert_eq!(axis.bin(0), Interval { lower: -1, upper: 0 });
        assert_eq!(axis.bin(-1), Interval { lower: i32::MIN, upper: -1 });
        assert_eq!(axis.bin(4), Interval { lower: 3, upper: i32::MAX });
    }

    #[test]
    fn rejects_empty_range() {
        assert_eq!(
            Integer::new(2, 2),
            Err(AxisError::InvalidRange {
                lower: 2.0,
                upper: 2.0
            })
        );
    }

    #[test]
    fn display() {
        let axis = Integer::new(-1, 3).unwrap();
        assert_eq!(axis.to_string(), "integer(-1, 3)");
        let axis = Integer::with_options(0, 2, AxisOptions::default().without_flow()).unwrap();
        assert_eq!(axis.to_string(), "integer(0, 2, uoflow=False)");
    }
}

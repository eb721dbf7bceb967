//! Closed enum over the built-in axis types.

use std::fmt;

use super::{Axis, Category, Circular, Integer, Interval, Regular, Variable};

/// Any built-in axis, for histograms whose axes differ in type.
///
/// All variants accept `f64` coordinates. The integer and category variants
/// floor or match the coordinate as an integer; a non-integral coordinate
/// never matches a category.
///
/// Categories with non-integer values (such as `Category<String>`) have no
/// `f64` coordinate and are not a variant; use them in a homogeneous axis set
/// like `Vec<Category<String>>`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AnyAxis {
    Regular(Regular),
    Variable(Variable),
    Integer(Integer),
    Circular(Circular),
    Category(Category<i32>),
}

/// Bin descriptor of an [`AnyAxis`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AnyBin {
    Interval(Interval<f64>),
    Integer(Interval<i32>),
    Category(i32),
}

impl AnyBin {
    /// The interval of a continuous bin, `None` for other kinds.
    pub fn as_interval(&self) -> Option<Interval<f64>> {
        match self {
            AnyBin::Interval(interval) => Some(*interval),
            _ => None,
        }
    }
}

impl fmt::Display for AnyBin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnyBin::Interval(interval) => fmt::Display::fmt(interval, f),
            AnyBin::Integer(interval) => fmt::Display::fmt(interval, f),
            AnyBin::Category(value) => fmt::Display::fmt(value, f),
        }
    }
}

impl Axis for AnyAxis {
    type Value = f64;
    type Bin = AnyBin;

    #[inline]
    fn size(&self) -> usize {
        match self {
            AnyAxis::Regular(a) => a.size(),
            AnyAxis::Variable(a) => a.size(),
            AnyAxis::Integer(a) => a.size(),
            AnyAxis::Circular(a) => a.size(),
            AnyAxis::Category(a) => a.size(),
        }
    }

    #[inline]
    fn has_flow(&self) -> bool {
        match self {
            AnyAxis::Regular(a) => a.has_flow(),
            AnyAxis::Variable(a) => a.has_flow(),
            AnyAxis::Integer(a) => a.has_flow(),
            AnyAxis::Circular(a) => a.has_flow(),
            AnyAxis::Category(a) => a.has_flow(),
        }
    }

    fn index(&self, value: &f64) -> i32 {
        match self {
            AnyAxis::Regular(a) => a.index(value),
            AnyAxis::Variable(a) => a.index(value),
            AnyAxis::Integer(a) => a.index_f64(*value),
            AnyAxis::Circular(a) => a.index(value),
            AnyAxis::Category(a) => {
                let in_range = value.fract() == 0.0
                    && *value >= i32::MIN as f64
                    && *value <= i32::MAX as f64;
                if in_range {
                    a.index(&(*value as i32))
                } else {
                    a.size() as i32
                }
            }
        }
    }

    fn bin(&self, index: i32) -> AnyBin {
        match self {
            AnyAxis::Regular(a) => AnyBin::Interval(a.bin(index)),
            AnyAxis::Variable(a) => AnyBin::Interval(a.bin(index)),
            AnyAxis::Integer(a) => AnyBin::Integer(a.bin(index)),
            AnyAxis::Circular(a) => AnyBin::Interval(a.bin(index)),
            AnyAxis::Category(a) => AnyBin::Category(a.bin(index)),
        }
    }

    #[inline]
    fn label(&self) -> &str {
        match self {
            AnyAxis::Regular(a) => a.label(),
            AnyAxis::Variable(a) => a.label(),
            AnyAxis::Integer(a) => a.label(),
            AnyAxis::Circular(a) => a.label(),
            AnyAxis::Category(a) => a.label(),
        }
    }
}

impl fmt::Display for AnyAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnyAxis::Regular(a) => fmt::Display::fmt(a, f),
            AnyAxis::Variable(a) => fmt::Display::fmt(a, f),
            AnyAxis::Integer(a) => fmt::Display::fmt(a, f),
            AnyAxis::Circular(a) => fmt::Display::fmt(a, f),
            AnyAxis::Category(a) => fmt::Display::fmt(a, f),
        }
    }
}

impl From<Regular> for AnyAxis {
    fn from(axis: Regular) -> Self {
        AnyAxis::Regular(axis)
    }
}

impl From<Variable> for AnyAxis {
    fn from(axis: Variable) -> Self {
        AnyAxis::Variable(axis)
    }
}

impl From<Integer> for AnyAxis {
    fn from(axis: Integer) -> Self {
        AnyAxis::Integer(axis)
    }
}

impl From<Circular> for AnyAxis {
    fn from(axis: Circular) -> Self {
        AnyAxis::Circular(axis)
    }
}

impl From<Category<i32>> for AnyAxis {
    fn from(axis: Category<i32>) -> Self {
        AnyAxis::Category(axis)
    }
}

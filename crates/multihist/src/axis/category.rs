//! One bin per distinct category value.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use super::{Axis, AxisError, AxisOptions, check_size, write_escaped, write_options};

/// Values usable as categories.
///
/// Implemented for the primitive integers and `String`. `write_repr` controls
/// how a value appears in the axis representation (strings are quoted).
pub trait CategoryValue: Clone + Eq + Hash + fmt::Debug {
    /// Write a literal representation of the value.
    fn write_repr(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

macro_rules! impl_category_value_int {
    ($($t:ty),*) => {
        $(
            impl CategoryValue for $t {
                fn write_repr(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{self}")
                }
            }
        )*
    };
}

impl_category_value_int!(i8, i16, i32, i64, u8, u16, u32, u64, isize, usize);

impl CategoryValue for String {
    fn write_repr(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_escaped(f, self)
    }
}

/// Axis with one bin per category value, in insertion order.
///
/// Unknown values map to index `size`, which addresses no cell: categories
/// never have flow bins.
///
/// # Example
///
/// ```
/// use multihist::axis::{Axis, Category};
///
/// let axis = Category::new(vec!["red".to_string(), "blue".to_string()]).unwrap();
/// assert_eq!(axis.index(&"blue".to_string()), 1);
/// assert_eq!(axis.index(&"green".to_string()), 2);
/// assert_eq!(axis.bin(0), "red");
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(
        try_from = "CategoryRepr<T>",
        into = "CategoryRepr<T>",
        bound = "T: CategoryValue + serde::Serialize + serde::de::DeserializeOwned"
    )
)]
pub struct Category<T: CategoryValue> {
    values: Box<[T]>,
    lookup: HashMap<T, i32>,
    label: String,
}

impl<T: CategoryValue> Category<T> {
    /// Create an unlabeled axis.
    pub fn new(values: Vec<T>) -> Result<Self, AxisError> {
        Self::with_options(values, AxisOptions::default())
    }

    /// Create an axis with explicit options.
    ///
    /// Only the label of `options` is used.
    ///
    /// # Errors
    ///
    /// - [`AxisError::NoBins`] for an empty value list
    /// - [`AxisError::DuplicateCategory`] if a value repeats
    pub fn with_options(values: Vec<T>, options: AxisOptions) -> Result<Self, AxisError> {
        check_size(values.len())?;
        let mut lookup = HashMap::with_capacity(values.len());
        for (i, value) in values.iter().enumerate() {
            if lookup.insert(value.clone(), i as i32).is_some() {
                return Err(AxisError::DuplicateCategory(format!("{value:?}")));
            }
        }
        Ok(Self {
            values: values.into_boxed_slice(),
            lookup,
            label: options.label,
        })
    }

    /// Category values in bin order.
    #[inline]
    pub fn values(&self) -> &[T] {
        &self.values
    }
}

impl<T: CategoryValue> Axis for Category<T> {
    type Value = T;
    type Bin = T;

    #[inline]
    fn size(&self) -> usize {
        self.values.len()
    }

    #[inline]
    fn has_flow(&self) -> bool {
        false
    }

    #[inline]
    fn index(&self, value: &T) -> i32 {
        self.lookup
            .get(value)
            .copied()
            .unwrap_or(self.values.len() as i32)
    }

    /// # Panics
    ///
    /// Panics if `index` is outside `[0, size)`.
    #[inline]
    fn bin(&self, index: i32) -> T {
        assert!(
            index >= 0 && (index as usize) < self.values.len(),
            "category index {} out of range for {} categories",
            index,
            self.values.len()
        );
        self.values[index as usize].clone()
    }

    #[inline]
    fn label(&self) -> &str {
        &self.label
    }
}

impl<T: CategoryValue> fmt::Display for Category<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("category(")?;
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            value.write_repr(f)?;
        }
        write_options(f, &self.label, None)
    }
}

/// Serialized form; the lookup table is rebuilt on load.
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct CategoryRepr<T> {
    values: Vec<T>,
    #[serde(default)]
    label: String,
}

#[cfg(feature = "serde")]
impl<T: CategoryValue> TryFrom<CategoryRepr<T>> for Category<T> {
    type Error = AxisError;

    fn try_from(repr: CategoryRepr<T>) -> Result<Self, AxisError> {
        Self::with_options(repr.values, AxisOptions::labeled(repr.label))
    }
}

#[cfg(feature = "serde")]
impl<T: CategoryValue> From<Category<T>> for CategoryRepr<T> {
    fn from(axis: Category<T>) -> Self {
        Self {
            values: axis.values.into_vec(),
            label: axis.label,
        }
    }
}

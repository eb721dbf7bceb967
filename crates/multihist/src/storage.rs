//! Cell value storage.
//!
//! A storage is a flat array of cell values addressed by flat index. It knows
//! nothing about axes; [`Histogram`](crate::Histogram) sizes it and translates
//! axis coordinates into flat indices.

use std::ops::{AddAssign, Index};

/// Flat array of cell values.
pub trait Storage {
    /// Cell value type.
    type Value;

    /// Create a storage of `len` zero-valued cells.
    fn zeroed(len: usize) -> Self
    where
        Self: Sized;

    /// Number of cells.
    fn len(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Value of cell `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    fn get(&self, index: usize) -> &Self::Value;

    /// Add `value` to cell `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    fn add(&mut self, index: usize, value: Self::Value);

    /// Add one to cell `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    fn increment(&mut self, index: usize);
}

/// Dense storage backed by a boxed slice.
///
/// # Example
///
/// ```
/// use multihist::{ArrayStorage, Storage};
///
/// let mut storage = ArrayStorage::<u32>::zeroed(3);
/// storage.increment(1);
/// storage.add(1, 4);
/// assert_eq!(storage.as_slice(), &[0, 5, 0]);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArrayStorage<T> {
    values: Box<[T]>,
}

impl<T> ArrayStorage<T> {
    /// Wrap existing cell values.
    pub fn from_vec(values: Vec<T>) -> Self {
        Self {
            values: values.into_boxed_slice(),
        }
    }

    /// All cell values in flat order.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.values
    }

    pub fn into_vec(self) -> Vec<T> {
        self.values.into_vec()
    }
}

impl<T: Default> ArrayStorage<T> {
    /// Reset every cell to its default value.
    pub fn reset(&mut self) {
        self.values.iter_mut().for_each(|v| *v = T::default());
    }
}

impl<T> Storage for ArrayStorage<T>
where
    T: Clone + Default + AddAssign + From<u8>,
{
    type Value = T;

    fn zeroed(len: usize) -> Self {
        Self {
            values: vec![T::default(); len].into_boxed_slice(),
        }
    }

    #[inline]
    fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    fn get(&self, index: usize) -> &T {
        &self.values[index]
    }

    #[inline]
    fn add(&mut self, index: usize, value: T) {
        self.values[index] += value;
    }

    #[inline]
    fn increment(&mut self, index: usize) {
        self.values[index] += T::from(1u8);
    }
}

impl<T> Index<usize> for ArrayStorage<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        &self.values[index]
    }
}

impl<T> From<Vec<T>> for ArrayStorage<T> {
    fn from(values: Vec<T>) -> Self {
        Self::from_vec(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeroed_add_increment() {
        let mut storage = ArrayStorage::<f64>::zeroed(4);
        assert_eq!(storage.len(), 4);
        assert!(!storage.is_empty());
        storage.increment(2);
        storage.add(2, 0.5);
        storage.add(0, 2.0);
        assert_eq!(storage.as_slice(), &[2.0, 0.0, 1.5, 0.0]);
        assert_eq!(storage[2], 1.5);
        assert_eq!(*storage.get(0), 2.0);
    }

    #[test]
    fn reset_clears_values() {
        let mut storage = ArrayStorage::from(vec![1u64, 2, 3]);
        storage.reset();
        assert_eq!(storage.into_vec(), vec![0, 0, 0]);
    }

    #[test]
    #[should_panic]
    fn get_out_of_range_panics() {
        let storage = ArrayStorage::<u32>::zeroed(2);
        storage.get(2);
    }
}

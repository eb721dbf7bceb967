//! Bidirectional traversal of histogram cells.
//!
//! - [`Cursor`] - a position in the flat cell array with per-axis bin access
//! - [`Cells`] - a double-ended iterator over cell values built from two cursors
//!
//! A cursor moves by whole cells and never checks bounds; the valid positions
//! are `[0, len)` plus the end position `len`, which may be compared against
//! but not read.
//!
//! # Example
//!
//! ```
//! use multihist::Histogram;
//! use multihist::axis::Integer;
//!
//! let mut hist = Histogram::<_, multihist::ArrayStorage<u32>>::new([Integer::new(0, 2).unwrap()])
//!     .unwrap();
//! hist.fill(&[1]).unwrap();
//!
//! let mut cursor = hist.begin();
//! let end = hist.end();
//! while cursor != end {
//!     if cursor.idx(0) == 1 {
//!         assert_eq!(*cursor.value(), 1);
//!         assert_eq!(cursor.first_bin().lower, 1);
//!     }
//!     cursor.advance();
//! }
//! ```

use std::fmt;
use std::iter::FusedIterator;
use std::ptr;

use crate::axis::{Axis, AxisSet};
use crate::index::MultiIndex;
use crate::storage::Storage;

/// Bin descriptor type of an axis set.
pub type BinOf<X> = <<X as AxisSet>::Axis as Axis>::Bin;

// =============================================================================
// Cursor
// =============================================================================

/// A cell position over borrowed axes and storage.
///
/// The cursor owns its stride table; clones copy it. Per-axis indices are
/// decoded on the first read after a move and cached for further reads at the
/// same position.
pub struct Cursor<'h, X: AxisSet, S: Storage> {
    axes: &'h X,
    storage: &'h S,
    index: MultiIndex,
}

impl<'h, X: AxisSet, S: Storage> Cursor<'h, X, S> {
    /// Create a cursor at flat index `flat`.
    pub fn new(axes: &'h X, storage: &'h S, flat: usize) -> Self {
        Self {
            axes,
            storage,
            index: MultiIndex::new(axes.as_slice(), flat),
        }
    }

    /// Move to the next cell.
    #[inline]
    pub fn advance(&mut self) {
        self.index.increment();
    }

    /// Move to the previous cell.
    #[inline]
    pub fn retreat(&mut self) {
        self.index.decrement();
    }

    /// Current flat index.
    #[inline]
    pub fn index(&self) -> usize {
        self.index.flat()
    }

    /// Signed index of `axis` at the current cell.
    ///
    /// # Panics
    ///
    /// Panics if `axis` is not a valid axis position.
    #[inline]
    pub fn idx(&self, axis: usize) -> i32 {
        self.index.idx(axis)
    }

    /// Signed indices of all axes at the current cell.
    pub fn indices(&self) -> Vec<i32> {
        self.index.indices()
    }

    /// Value of the current cell.
    ///
    /// # Panics
    ///
    /// Panics at the end position.
    #[inline]
    pub fn value(&self) -> &'h S::Value {
        self.storage.get(self.index.flat())
    }

    /// Bin of axis 0 at the current cell.
    #[inline]
    pub fn first_bin(&self) -> BinOf<X> {
        self.bin(0)
    }

    /// Bin of axis `D` at the current cell.
    ///
    /// For axis sets with a static rank, an out-of-range `D` fails to compile.
    #[inline]
    pub fn bin_at<const D: usize>(&self) -> BinOf<X> {
        const {
            assert!(
                match X::RANK {
                    Some(rank) => D < rank,
                    None => true,
                },
                "axis position out of range"
            )
        };
        self.bin(D)
    }

    /// Bin of `axis` at the current cell.
    ///
    /// # Panics
    ///
    /// Panics if `axis` is not a valid axis position.
    #[inline]
    pub fn bin(&self, axis: usize) -> BinOf<X> {
        self.axes.axis(axis).bin(self.index.idx(axis))
    }

    /// Returns `true` if both cursors read from the same storage instance.
    #[inline]
    pub fn same_storage(&self, other: &Self) -> bool {
        ptr::eq(self.storage, other.storage)
    }
}

impl<X: AxisSet, S: Storage> Clone for Cursor<'_, X, S> {
    fn clone(&self) -> Self {
        Self {
            axes: self.axes,
            storage: self.storage,
            index: self.index.clone(),
        }
    }
}

/// Cursors are equal when they read the same storage at the same flat index.
impl<X: AxisSet, S: Storage> PartialEq for Cursor<'_, X, S> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.same_storage(other) && self.index.flat() == other.index.flat()
    }
}

impl<X: AxisSet, S: Storage> Eq for Cursor<'_, X, S> {}

impl<X: AxisSet, S: Storage> fmt::Debug for Cursor<'_, X, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("flat", &self.index.flat())
            .field("rank", &self.index.rank())
            .field("storage", &ptr::from_ref(self.storage))
            .finish()
    }
}

// =============================================================================
// Cells
// =============================================================================

/// Iterator over cell values in flat order, from either end.
pub struct Cells<'h, X: AxisSet, S: Storage> {
    front: Cursor<'h, X, S>,
    back: Cursor<'h, X, S>,
}

impl<'h, X: AxisSet, S: Storage> Cells<'h, X, S> {
    /// Iterate the cells in `[front, back)`.
    ///
    /// # Panics
    ///
    /// Panics if the cursors read different storages or `front` is past `back`.
    pub fn new(front: Cursor<'h, X, S>, back: Cursor<'h, X, S>) -> Self {
        assert!(
            front.same_storage(&back),
            "cursors must read the same storage"
        );
        assert!(
            front.index() <= back.index(),
            "front cursor {} is past back cursor {}",
            front.index(),
            back.index()
        );
        Self { front, back }
    }

    /// Cursor at the next cell yielded from the front.
    #[inline]
    pub fn front(&self) -> &Cursor<'h, X, S> {
        &self.front
    }

    /// Cursor one past the next cell yielded from the back.
    #[inline]
    pub fn back(&self) -> &Cursor<'h, X, S> {
        &self.back
    }
}

impl<'h, X: AxisSet, S: Storage> Iterator for Cells<'h, X, S> {
    type Item = &'h S::Value;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        let value = self.front.value();
        self.front.advance();
        Some(value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.back.index() - self.front.index();
        (n, Some(n))
    }
}

impl<X: AxisSet, S: Storage> DoubleEndedIterator for Cells<'_, X, S> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        self.back.retreat();
        Some(self.back.value())
    }
}

impl<X: AxisSet, S: Storage> ExactSizeIterator for Cells<'_, X, S> {}

impl<X: AxisSet, S: Storage> FusedIterator for Cells<'_, X, S> {}

impl<X: AxisSet, S: Storage> Clone for Cells<'_, X, S> {
    fn clone(&self) -> Self {
        Self {
            front: self.front.clone(),
            back: self.back.clone(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ArrayStorage;
    use crate::axis::{AxisOptions, Integer, Interval};

    fn axes() -> [Integer; 2] {
        [
            Integer::new(0, 2).unwrap(),
            Integer::with_options(10, 12, AxisOptions::default().without_flow()).unwrap(),
        ]
    }

    fn storage() -> ArrayStorage<u32> {
        ArrayStorage::from_vec((0..8).collect())
    }

    #[test]
    fn advance_and_retreat() {
        let (axes, storage) = (axes(), storage());
        let mut cursor = Cursor::new(&axes, &storage, 3);
        cursor.advance();
        assert_eq!(cursor.index(), 4);
        cursor.retreat();
        assert_eq!(cursor.index(), 3);
        assert_eq!(*cursor.value(), 3);
    }

    #[test]
    fn equality_requires_same_storage() {
        let axes = axes();
        let (a, b) = (storage(), storage());
        assert_eq!(Cursor::new(&axes, &a, 2), Cursor::new(&axes, &a, 2));
        assert_ne!(Cursor::new(&axes, &a, 2), Cursor::new(&axes, &a, 3));
        assert_ne!(Cursor::new(&axes, &a, 2), Cursor::new(&axes, &b, 2));
    }

    #[test]
    fn clone_is_independent() {
        let (axes, storage) = (axes(), storage());
        let original = Cursor::new(&axes, &storage, 5);
        let mut copy = original.clone();
        assert_eq!(copy, original);
        copy.advance();
        assert_ne!(copy, original);
        assert_eq!(original.indices(), vec![1, 1]);
        assert_eq!(copy.indices(), vec![2, 1]);
    }

    #[test]
    fn bin_accessors_agree() {
        let (axes, storage) = (axes(), storage());
        // flat 7: axis 1 raw 1, axis 0 raw 3 -> underflow
        let cursor = Cursor::new(&axes, &storage, 7);
        assert_eq!(cursor.idx(0), -1);
        assert_eq!(cursor.idx(1), 1);

        assert_eq!(cursor.first_bin(), cursor.bin(0));
        assert_eq!(cursor.bin_at::<0>(), cursor.bin(0));
        assert_eq!(cursor.bin_at::<1>(), Interval { lower: 11, upper: 12 });
        assert_eq!(cursor.first_bin().upper, 0);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn runtime_bin_out_of_range_panics() {
        let (axes, storage) = (axes(), storage());
        let cursor = Cursor::new(&axes, &storage, 0);
        cursor.bin(2);
    }

    #[test]
    fn cells_both_directions() {
        let (axes, storage) = (axes(), storage());
        let cells = Cells::new(
            Cursor::new(&axes, &storage, 0),
            Cursor::new(&axes, &storage, 8),
        );
        assert_eq!(cells.len(), 8);
        let forward: Vec<u32> = cells.clone().copied().collect();
        assert_eq!(forward, (0..8).collect::<Vec<_>>());
        let backward: Vec<u32> = cells.rev().copied().collect();
        assert_eq!(backward, (0..8).rev().collect::<Vec<_>>());
    }

    #[test]
    fn cells_meet_in_the_middle() {
        let (axes, storage) = (axes(), storage());
        let mut cells = Cells::new(
            Cursor::new(&axes, &storage, 2),
            Cursor::new(&axes, &storage, 5),
        );
        assert_eq!(cells.next(), Some(&2));
        assert_eq!(cells.next_back(), Some(&4));
        assert_eq!(cells.len(), 1);
        // flat 3 is the underflow cell of axis 0
        assert_eq!(cells.front().idx(0), -1);
        assert_eq!(cells.next(), Some(&3));
        assert_eq!(cells.next(), None);
        assert_eq!(cells.next_back(), None);
    }

    #[test]
    #[should_panic(expected = "same storage")]
    fn cells_reject_mixed_storage() {
        let axes = axes();
        let (a, b) = (storage(), storage());
        Cells::new(Cursor::new(&axes, &a, 0), Cursor::new(&axes, &b, 8));
    }
}

//! Flat index ↔ per-axis index conversion.
//!
//! [`MultiIndex`] owns a stride table and a flat index. The flat index is the
//! only source of truth; per-axis indices are derived from it on demand and
//! cached until the flat index moves.

use std::cell::Cell;

use super::stride::{Dim, build_strides, cell_count};
use crate::axis::Axis;

/// Write the signed per-axis indices of `flat` into `dims`.
///
/// Works from the last axis down: each axis takes the quotient of the
/// remaining offset by its stride, and axis 0 takes what is left. Every raw
/// position is folded into the signed convention (see [`Dim::fold`]).
///
/// Out-of-range `flat` values are caught by a debug assertion only.
pub fn decode(flat: usize, dims: &[Dim]) {
    debug_assert!(
        flat < cell_count(dims) || dims.is_empty(),
        "flat index {} out of range for {} cells",
        flat,
        cell_count(dims)
    );
    let Some((first, rest)) = dims.split_first() else {
        return;
    };
    let mut remaining = flat;
    for dim in rest.iter().rev() {
        let raw = remaining / dim.stride();
        remaining -= raw * dim.stride();
        dim.set_index(dim.fold(raw));
    }
    first.set_index(first.fold(remaining));
}

/// Combine signed per-axis indices into a flat index.
///
/// # Panics
///
/// Panics if `indices.len() != dims.len()`. Out-of-range axis indices are
/// caught by a debug assertion only.
pub fn encode(indices: &[i32], dims: &[Dim]) -> usize {
    assert_eq!(
        indices.len(),
        dims.len(),
        "expected {} axis indices, got {}",
        dims.len(),
        indices.len()
    );
    indices
        .iter()
        .zip(dims)
        .map(|(&index, dim)| {
            debug_assert!(
                dim.contains(index),
                "axis index {} out of range for axis of size {} (flow: {})",
                index,
                dim.size(),
                dim.has_flow()
            );
            dim.unfold(index) * dim.stride()
        })
        .sum()
}

// =============================================================================
// MultiIndex
// =============================================================================

/// A flat cell position with lazily decoded per-axis indices.
///
/// Per-axis reads go through [`MultiIndex::idx`], which decodes only when the
/// flat index changed since the last decode. Repeated reads at one position
/// cost one decode in total.
///
/// Cloning deep-copies the stride table. `MultiIndex::default()` is the empty
/// (rank 0) index, which is also what `std::mem::take` leaves behind.
///
/// The decode cache makes the type `!Sync`.
#[derive(Clone, Debug, Default)]
pub struct MultiIndex {
    dims: Box<[Dim]>,
    flat: usize,
    /// Flat index the descriptors currently reflect.
    decoded: Cell<Option<usize>>,
}

impl MultiIndex {
    /// Build the stride table for `axes` and start at `flat`.
    pub fn new<A: Axis>(axes: &[A], flat: usize) -> Self {
        Self::from_dims(build_strides(axes), flat)
    }

    /// Start at `flat` over an existing stride table.
    pub fn from_dims(dims: Box<[Dim]>, flat: usize) -> Self {
        Self {
            dims,
            flat,
            decoded: Cell::new(None),
        }
    }

    /// Number of axes.
    #[inline]
    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        cell_count(&self.dims)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The stride table.
    #[inline]
    pub fn dims(&self) -> &[Dim] {
        &self.dims
    }

    /// Current flat index.
    #[inline]
    pub fn flat(&self) -> usize {
        self.flat
    }

    #[inline]
    pub fn set_flat(&mut self, flat: usize) {
        self.flat = flat;
    }

    #[inline]
    pub fn increment(&mut self) {
        self.flat += 1;
    }

    #[inline]
    pub fn decrement(&mut self) {
        self.flat -= 1;
    }

    /// Returns `true` if the next per-axis read has to decode.
    #[inline]
    pub fn is_stale(&self) -> bool {
        self.decoded.get() != Some(self.flat)
    }

    #[inline]
    fn refresh(&self) {
        if self.is_stale() {
            #[cfg(test)]
            tests::DECODES.with(|n| n.set(n.get() + 1));
            decode(self.flat, &self.dims);
            self.decoded.set(Some(self.flat));
        }
    }

    /// Signed index of `axis` at the current position.
    ///
    /// # Panics
    ///
    /// Panics if `axis >= rank()`.
    #[inline]
    pub fn idx(&self, axis: usize) -> i32 {
        assert!(
            axis < self.dims.len(),
            "axis position {} out of range for rank {}",
            axis,
            self.dims.len()
        );
        self.refresh();
        self.dims[axis].index()
    }

    /// Signed indices of all axes at the current position.
    pub fn indices(&self) -> Vec<i32> {
        self.refresh();
        self.dims.iter().map(Dim::index).collect()
    }

    /// Flat index of `indices` under this stride table.
    #[inline]
    pub fn encode(&self, indices: &[i32]) -> usize {
        encode(indices, &self.dims)
    }

    /// Move to the cell addressed by signed per-axis `indices`.
    ///
    /// The descriptors take the given indices directly, so the next
    /// per-axis read does not decode.
    ///
    /// # Panics
    ///
    /// Panics if `indices.len() != rank()`.
    pub fn set(&mut self, indices: &[i32]) {
        self.flat = encode(indices, &self.dims);
        for (dim, &index) in self.dims.iter().zip(indices) {
            dim.set_index(index);
        }
        self.decoded.set(Some(self.flat));
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::{AxisOptions, Integer};
    use rstest::rstest;

    thread_local! {
        /// Decode passes run by `MultiIndex::refresh` on this thread.
        pub(super) static DECODES: Cell<usize> = const { Cell::new(0) };
    }

    fn decodes() -> usize {
        DECODES.with(Cell::get)
    }

    fn int_axis(size: i32, flow: bool) -> Integer {
        let options = if flow {
            AxisOptions::default()
        } else {
            AxisOptions::default().without_flow()
        };
        Integer::with_options(0, size, options).unwrap()
    }

    #[rstest]
    #[case(0, 0)]
    #[case(1, 1)]
    #[case(2, 2)]
    #[case(3, 3)]
    #[case(4, -1)]
    fn single_axis_with_flow(#[case] flat: usize, #[case] expected: i32) {
        let mi = MultiIndex::new(&[int_axis(3, true)], flat);
        assert_eq!(mi.dims()[0].stride(), 1);
        assert_eq!(mi.dims()[0].size(), 3);
        assert_eq!(mi.len(), 5);
        assert_eq!(mi.idx(0), expected);
    }

    #[test]
    fn mixed_flow_decode() {
        // axis 0: size 2 with flow (extent 4, stride 1)
        // axis 1: size 2 without flow (extent 2, stride 4)
        let axes = [int_axis(2, true), int_axis(2, false)];
        let mi = MultiIndex::new(&axes, 5);
        assert_eq!(mi.dims()[1].stride(), 4);
        assert_eq!(mi.indices(), vec![1, 1]);

        let mi = MultiIndex::new(&axes, 7);
        assert_eq!(mi.indices(), vec![-1, 1]);

        let mi = MultiIndex::new(&axes, 2);
        assert_eq!(mi.indices(), vec![2, 0]);
    }

    #[test]
    fn axes_without_flow_stay_in_regular_range() {
        let axes = [int_axis(3, false), int_axis(2, false)];
        let mut mi = MultiIndex::new(&axes, 0);
        for flat in 0..mi.len() {
            mi.set_flat(flat);
            let indices = mi.indices();
            assert!((0..3).contains(&indices[0]));
            assert!((0..2).contains(&indices[1]));
            assert_eq!(mi.encode(&indices), flat);
        }
    }

    #[test]
    fn decode_is_memoized() {
        let axes = [int_axis(2, true), int_axis(3, true)];
        let mut mi = MultiIndex::new(&axes, 9);
        assert!(mi.is_stale());

        let first = mi.idx(1);
        assert!(!mi.is_stale());
        let snapshot = mi.dims().to_vec();

        // Same position: nothing is recomputed or rewritten.
        assert_eq!(mi.idx(1), first);
        assert_eq!(mi.idx(0), snapshot[0].index());
        assert!(!mi.is_stale());
        assert_eq!(mi.dims(), snapshot.as_slice());

        mi.increment();
        assert!(mi.is_stale());
        mi.idx(0);
        assert!(!mi.is_stale());
    }

    #[test]
    fn repeated_reads_decode_once() {
        let axes = [int_axis(2, true), int_axis(3, true)];
        let mut mi = MultiIndex::new(&axes, 9);
        let start = decodes();

        let first = mi.indices();
        assert_eq!(decodes(), start + 1);
        for _ in 0..3 {
            assert_eq!(mi.idx(0), first[0]);
            assert_eq!(mi.idx(1), first[1]);
        }
        assert_eq!(mi.indices(), first);
        assert_eq!(decodes(), start + 1);

        mi.increment();
        mi.idx(1);
        mi.idx(0);
        assert_eq!(decodes(), start + 2);

        // Moving back to a decoded position still decodes: only the last
        // position is cached.
        mi.decrement();
        mi.idx(0);
        assert_eq!(decodes(), start + 3);

        // `set` writes the descriptors directly.
        mi.set(&[-1, 2]);
        assert_eq!(mi.indices(), vec![-1, 2]);
        assert_eq!(decodes(), start + 3);
    }

    #[test]
    fn set_positions_without_decoding() {
        let axes = [int_axis(2, true), int_axis(3, false)];
        let mut mi = MultiIndex::new(&axes, 0);
        mi.set(&[-1, 2]);
        assert!(!mi.is_stale());
        assert_eq!(mi.flat(), 3 + 2 * 4);
        assert_eq!(mi.indices(), vec![-1, 2]);

        // A fresh index at the same flat position decodes to the same values.
        let fresh = MultiIndex::new(&axes, mi.flat());
        assert_eq!(fresh.indices(), vec![-1, 2]);
    }

    #[test]
    fn round_trip_every_cell() {
        let axes = [int_axis(2, true), int_axis(3, false), int_axis(1, true)];
        let mut mi = MultiIndex::new(&axes, 0);
        assert_eq!(mi.len(), 4 * 3 * 3);
        for flat in 0..mi.len() {
            mi.set_flat(flat);
            assert_eq!(mi.encode(&mi.indices()), flat);
        }
    }

    #[test]
    fn increment_then_decrement() {
        let mut mi = MultiIndex::new(&[int_axis(4, true)], 3);
        mi.increment();
        assert_eq!(mi.flat(), 4);
        mi.decrement();
        assert_eq!(mi.flat(), 3);
    }

    #[test]
    fn clone_owns_its_table() {
        let axes = [int_axis(2, true), int_axis(2, true)];
        let a = MultiIndex::new(&axes, 5);
        let mut b = a.clone();
        b.set_flat(0);
        assert_eq!(b.indices(), vec![0, 0]);
        assert_eq!(a.indices(), vec![1, 1]);
    }

    #[test]
    fn taken_index_is_empty() {
        let mut a = MultiIndex::new(&[int_axis(2, true)], 1);
        let b = std::mem::take(&mut a);
        assert_eq!(a.rank(), 0);
        assert!(a.is_empty());
        assert_eq!(b.rank(), 1);
        assert_eq!(b.idx(0), 1);
    }

    #[test]
    fn rank_zero_decode_is_noop() {
        decode(0, &[]);
        assert_eq!(encode(&[], &[]), 0);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn idx_out_of_range_panics() {
        let mi = MultiIndex::new(&[int_axis(2, true)], 0);
        mi.idx(1);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "out of range")]
    fn decode_past_last_cell_panics() {
        let dims = build_strides(&[int_axis(3, true)]);
        decode(cell_count(&dims), &dims);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "out of range")]
    fn encode_underflow_on_axis_without_flow_panics() {
        let dims = build_strides(&[int_axis(3, false)]);
        encode(&[-1], &dims);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "out of range")]
    fn encode_past_overflow_panics() {
        let dims = build_strides(&[int_axis(2, true), int_axis(2, true)]);
        encode(&[3, 0], &dims);
    }

    #[test]
    #[should_panic(expected = "expected 2 axis indices")]
    fn encode_rank_mismatch_panics() {
        let mi = MultiIndex::new(&[int_axis(2, true), int_axis(2, true)], 0);
        mi.encode(&[0]);
    }
}

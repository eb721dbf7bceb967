//! Cell addressing.
//!
//! A histogram stores its cells in one flat array. This module converts
//! between a flat position in that array and the signed per-axis indices of
//! the cell:
//!
//! - [`stride`] - builds the per-axis stride table from an axis list
//! - [`multi_index`] - encodes and decodes positions, caching the last decode
//!
//! # Layout
//!
//! Axis 0 varies fastest. Along an axis with flow bins, raw positions
//! `0..size` hold the regular bins, raw `size` the overflow cell and raw
//! `size + 1` the underflow cell:
//!
//! ```text
//! raw:     0   1   2   3   4
//! signed:  0   1   2   3  -1      (size 3, with flow)
//! ```

pub mod multi_index;
pub mod stride;

pub use multi_index::{MultiIndex, decode, encode};
pub use stride::{Dim, build_strides, cell_count};

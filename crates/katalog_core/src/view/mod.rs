//! Flat view derivation for the admin table and tree widgets.
//!
//! # Responsibility
//! - Filter and order flattened rows for tabular display.
//! - Keep rendering concerns out of the tree primitives.
//!
//! # Invariants
//! - Filters are order-preserving subsets of their input.
//! - The pipeline holds no state of its own.

pub mod filter;

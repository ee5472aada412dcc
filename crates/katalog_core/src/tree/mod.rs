//! Forest-shaped tree operations over category nodes.
//!
//! # Responsibility
//! - Provide pure copy-on-write primitives for one mutation intent each.
//! - Keep traversal and structural rules out of store/view layers.
//!
//! # Invariants
//! - Primitives never mutate their input forest; they build a fresh one.
//! - A missing target id is reported to the caller, never swallowed.
//! - Validation, cycle checks and logging stay at the store boundary.

pub mod ops;

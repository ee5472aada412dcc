//! State container layer.
//!
//! # Responsibility
//! - Own the forest and expose one entry point per mutation intent.
//! - Convert primitive-level misses into typed, user-facing errors.
//!
//! # Invariants
//! - The store is the sole writer; tree primitives stay pure.
//! - Rejected mutations leave the forest exactly as it was.

pub mod category_store;

//! Domain model for the storefront category catalog.
//!
//! # Responsibility
//! - Define the canonical category node and its request/patch shapes.
//! - Keep field-level validation next to the data it guards.
//!
//! # Invariants
//! - Every category is identified by a stable `CategoryId`.
//! - `slug` is the external URL-safe identity; uniqueness is enforced
//!   at the store boundary, format validity here.

pub mod category;

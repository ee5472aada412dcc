//! Search and status filtering over flattened category rows.
//!
//! # Responsibility
//! - Provide the flatten → search → status-filter pipeline for the
//!   admin table.
//! - Provide display ordering for tree-mode rendering.
//!
//! # Invariants
//! - A blank query is a pass-through; filtered output is always an
//!   order-preserving subset of the input.
//! - Matching is case-insensitive substring over name, slug and the
//!   optional description.
//! - Sibling display order is `sort_order` ascending with stable ties.

use crate::model::category::Category;
use crate::tree::ops::FlatNode;

/// Active/inactive row filter for the admin table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    /// Pass-through.
    All,
    /// Keep rows with `is_active == true`.
    Active,
    /// Keep rows with `is_active == false`.
    Inactive,
}

/// Keeps rows matching `query` case-insensitively on name, slug or
/// description (skipped when absent). A blank query keeps every row.
pub fn search<'a>(rows: Vec<FlatNode<'a>>, query: &str) -> Vec<FlatNode<'a>> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return rows;
    }
    rows.into_iter()
        .filter(|row| matches_query(row.category, &needle))
        .collect()
}

fn matches_query(category: &Category, needle: &str) -> bool {
    if category.name.to_lowercase().contains(needle) {
        return true;
    }
    if category.slug.to_lowercase().contains(needle) {
        return true;
    }
    category
        .description
        .as_deref()
        .is_some_and(|description| description.to_lowercase().contains(needle))
}

/// Keeps rows whose `is_active` matches the filter; `All` passes through.
pub fn filter_by_status(rows: Vec<FlatNode<'_>>, status: StatusFilter) -> Vec<FlatNode<'_>> {
    match status {
        StatusFilter::All => rows,
        StatusFilter::Active => rows
            .into_iter()
            .filter(|row| row.category.is_active)
            .collect(),
        StatusFilter::Inactive => rows
            .into_iter()
            .filter(|row| !row.category.is_active)
            .collect(),
    }
}

/// Returns a display-ordered copy of the forest for tree-mode rendering:
/// siblings sorted by `sort_order` ascending at every level, ties kept
/// in stored order (stable sort).
pub fn sorted_for_display(forest: &[Category]) -> Vec<Category> {
    let mut ordered: Vec<Category> = forest
        .iter()
        .map(|node| {
            let mut rebuilt = node.clone();
            rebuilt.children = sorted_for_display(&node.children);
            rebuilt
        })
        .collect();
    ordered.sort_by_key(|node| node.sort_order);
    ordered
}

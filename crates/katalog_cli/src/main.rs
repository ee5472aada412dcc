//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `katalog_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use katalog_core::{CategoryDraft, CategoryStore, StatusFilter, StoreError};

fn main() -> Result<(), StoreError> {
    let mut store = CategoryStore::new();

    let machines = store.create(CategoryDraft::new("Mesin Cuci"))?;
    let front = store.create(CategoryDraft {
        parent_id: Some(machines.id),
        ..CategoryDraft::new("Front Loading")
    })?;
    store.create(CategoryDraft {
        parent_id: Some(machines.id),
        sort_order: Some(1),
        ..CategoryDraft::new("Top Loading")
    })?;
    store.create(CategoryDraft {
        parent_id: Some(front.id),
        ..CategoryDraft::new("8-9kg")
    })?;
    store.create(CategoryDraft::new("Aksesoris"))?;

    println!("katalog_core version={}", katalog_core::core_version());
    println!("categories={}", store.len());
    for row in store.table_rows("", StatusFilter::All) {
        println!(
            "{}{} [{}]",
            "  ".repeat(row.depth),
            row.category.name,
            row.category.slug
        );
    }
    Ok(())
}

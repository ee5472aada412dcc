//! Core domain logic for the katalog storefront admin.
//! This crate is the single source of truth for category-tree invariants.

pub mod logging;
pub mod model;
pub mod store;
pub mod tree;
pub mod view;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::category::{
    now_epoch_ms, slugify, validate_slug, Category, CategoryDraft, CategoryId, CategoryPatch,
    CategoryValidationError,
};
pub use store::category_store::{CategoryStore, StoreError, StoreResult};
pub use tree::ops::{
    count_nodes, delete_by_id, delete_many_by_id, find_by_id, find_name_by_id, flatten,
    insert_as_child, list_parent_options, set_flag_for_ids, subtree_ids, take_by_id, update_by_id,
    would_create_cycle, CategoryFlag, FlatNode, ParentOption,
};
pub use view::filter::{filter_by_status, search, sorted_for_display, StatusFilter};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

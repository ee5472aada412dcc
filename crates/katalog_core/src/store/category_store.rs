//! Category store: the single-writer state container over the forest.
//!
//! # Responsibility
//! - Validate mutation intents and enforce hierarchy preconditions.
//! - Commit each accepted mutation as a whole-forest replacement.
//! - Emit one metadata-only log event per mutation outcome.
//!
//! # Invariants
//! - Mutations are atomic: either the full replacement forest is
//!   committed or the stored forest is untouched.
//! - Slugs are unique across the whole forest.
//! - A node never becomes its own ancestor; re-parent intents are
//!   cycle-checked before any structural work is committed.
//! - Deletion requires zero products and zero direct children; bulk
//!   deletion is all-or-nothing.

use crate::model::category::{
    slugify, validate_slug, Category, CategoryDraft, CategoryId, CategoryPatch,
    CategoryValidationError,
};
use crate::tree::ops::{self, CategoryFlag, FlatNode, ParentOption};
use crate::view::filter::{self, StatusFilter};
use log::{info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Result type used by store mutations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Typed outcome for rejected store mutations.
///
/// Display strings double as the human-readable notification messages
/// surfaced by the admin UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Name/slug field contents are invalid.
    Validation(CategoryValidationError),
    /// Target category does not exist.
    CategoryNotFound(CategoryId),
    /// Referenced parent does not exist.
    ParentNotFound(CategoryId),
    /// Slug already used by another category in the forest.
    DuplicateSlug(String),
    /// Re-parent would make the category its own ancestor.
    CycleDetected {
        category: CategoryId,
        parent: CategoryId,
    },
    /// Delete refused: products are still assigned.
    HasProducts {
        category: CategoryId,
        product_count: u32,
    },
    /// Delete refused: direct children still exist.
    HasChildren {
        category: CategoryId,
        child_count: usize,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::CategoryNotFound(id) => write!(f, "category not found: {id}"),
            Self::ParentNotFound(id) => write!(f, "parent category not found: {id}"),
            Self::DuplicateSlug(slug) => {
                write!(f, "slug `{slug}` is already used by another category")
            }
            Self::CycleDetected { category, parent } => write!(
                f,
                "cannot move category {category} under {parent}: it would become its own ancestor"
            ),
            Self::HasProducts {
                category,
                product_count,
            } => write!(
                f,
                "cannot delete category {category}: {product_count} product(s) still assigned"
            ),
            Self::HasChildren {
                category,
                child_count,
            } => write!(
                f,
                "cannot delete category {category}: {child_count} subcategory(ies) still attached"
            ),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<CategoryValidationError> for StoreError {
    fn from(value: CategoryValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Single-writer container for the category forest.
///
/// Owned by the UI state layer; every mutation goes through exactly one
/// method here, so the tree primitives stay pure and testable.
#[derive(Debug, Default)]
pub struct CategoryStore {
    forest: Vec<Category>,
}

impl CategoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a store from an existing forest.
    ///
    /// Import/seed path: the forest is trusted to have unique ids and
    /// consistent `parent_id` back-references.
    pub fn from_forest(forest: Vec<Category>) -> Self {
        Self { forest }
    }

    /// Current forest, read-only.
    pub fn forest(&self) -> &[Category] {
        &self.forest
    }

    /// Total node count across all roots.
    pub fn len(&self) -> usize {
        ops::count_nodes(&self.forest)
    }

    pub fn is_empty(&self) -> bool {
        self.forest.is_empty()
    }

    /// Finds a category by id at any depth.
    pub fn get(&self, id: CategoryId) -> Option<&Category> {
        ops::find_by_id(&self.forest, id)
    }

    /// Resolves a category's display name by id.
    pub fn name_of(&self, id: CategoryId) -> Option<&str> {
        ops::find_name_by_id(&self.forest, id)
    }

    /// Resolves the parent's display name for a category, live.
    ///
    /// There is no cached parent name anywhere in the model, so a parent
    /// rename is always reflected here immediately.
    pub fn parent_name(&self, id: CategoryId) -> Option<&str> {
        let parent_id = self.get(id)?.parent_id?;
        self.name_of(parent_id)
    }

    /// Parent dropdown candidates, excluding `exclude` and its subtree.
    pub fn parent_options(&self, exclude: Option<CategoryId>) -> Vec<ParentOption> {
        ops::list_parent_options(&self.forest, exclude)
    }

    /// Flat table rows: flatten → search → status filter.
    pub fn table_rows(&self, query: &str, status: StatusFilter) -> Vec<FlatNode<'_>> {
        let rows = ops::flatten(&self.forest);
        let rows = filter::search(rows, query);
        filter::filter_by_status(rows, status)
    }

    /// Display-ordered copy of the forest for tree-mode rendering.
    pub fn display_tree(&self) -> Vec<Category> {
        filter::sorted_for_display(&self.forest)
    }

    /// Creates a category from a draft and returns the stored node.
    ///
    /// Derives the slug from the name when absent; enforces forest-wide
    /// slug uniqueness and parent existence before anything is inserted.
    pub fn create(&mut self, draft: CategoryDraft) -> StoreResult<Category> {
        match self.create_inner(draft) {
            Ok(created) => {
                info!(
                    "event=category_create module=store status=ok id={} slug={} parent={}",
                    created.id,
                    created.slug,
                    display_parent(created.parent_id)
                );
                Ok(created)
            }
            Err(err) => {
                warn!("event=category_create module=store status=rejected reason=\"{err}\"");
                Err(err)
            }
        }
    }

    /// Applies a shallow patch to a category and returns the new node.
    ///
    /// A `parent_id` entry in the patch is a re-parent: the subtree is
    /// detached and reattached (appended last) under the new parent or
    /// the root list, after an explicit cycle check.
    pub fn update(&mut self, id: CategoryId, patch: CategoryPatch) -> StoreResult<Category> {
        match self.update_inner(id, patch) {
            Ok(updated) => {
                info!(
                    "event=category_update module=store status=ok id={} slug={}",
                    updated.id, updated.slug
                );
                Ok(updated)
            }
            Err(err) => {
                warn!(
                    "event=category_update module=store status=rejected id={id} reason=\"{err}\""
                );
                Err(err)
            }
        }
    }

    /// Deletes a category with zero products and zero direct children.
    pub fn delete(&mut self, id: CategoryId) -> StoreResult<()> {
        match self.delete_inner(id) {
            Ok(()) => {
                info!("event=category_delete module=store status=ok id={id}");
                Ok(())
            }
            Err(err) => {
                warn!(
                    "event=category_delete module=store status=rejected id={id} reason=\"{err}\""
                );
                Err(err)
            }
        }
    }

    /// Deletes every listed category, all-or-nothing.
    ///
    /// Aborts without removing anything when any id is unknown or any
    /// target still has products or direct children. Returns the number
    /// of removed categories.
    pub fn delete_many(&mut self, ids: &[CategoryId]) -> StoreResult<usize> {
        match self.delete_many_inner(ids) {
            Ok(removed) => {
                info!("event=category_delete_bulk module=store status=ok removed={removed}");
                Ok(removed)
            }
            Err(err) => {
                warn!("event=category_delete_bulk module=store status=rejected reason=\"{err}\"");
                Err(err)
            }
        }
    }

    /// Bulk-sets `is_active`; every id must exist. Returns updated count.
    pub fn set_active(&mut self, ids: &[CategoryId], value: bool) -> StoreResult<usize> {
        self.set_flag(ids, CategoryFlag::Active, value)
    }

    /// Bulk-sets `is_featured`; every id must exist. Returns updated count.
    pub fn set_featured(&mut self, ids: &[CategoryId], value: bool) -> StoreResult<usize> {
        self.set_flag(ids, CategoryFlag::Featured, value)
    }

    fn set_flag(
        &mut self,
        ids: &[CategoryId],
        flag: CategoryFlag,
        value: bool,
    ) -> StoreResult<usize> {
        match self.set_flag_inner(ids, flag, value) {
            Ok(updated) => {
                info!(
                    "event=category_toggle module=store status=ok flag={flag:?} value={value} updated={updated}"
                );
                Ok(updated)
            }
            Err(err) => {
                warn!(
                    "event=category_toggle module=store status=rejected flag={flag:?} reason=\"{err}\""
                );
                Err(err)
            }
        }
    }

    fn create_inner(&mut self, draft: CategoryDraft) -> StoreResult<Category> {
        let name = draft.name.trim().to_string();
        if name.is_empty() {
            return Err(CategoryValidationError::BlankName.into());
        }
        let slug = match &draft.slug {
            Some(slug) => slug.trim().to_string(),
            None => slugify(&name),
        };
        validate_slug(&slug)?;
        self.ensure_slug_free(&slug, None)?;
        if let Some(parent_id) = draft.parent_id {
            if ops::find_by_id(&self.forest, parent_id).is_none() {
                return Err(StoreError::ParentNotFound(parent_id));
            }
        }

        let mut node = Category::new(name, slug);
        node.description = draft.description;
        node.parent_id = draft.parent_id;
        node.image = draft.image;
        node.icon = draft.icon;
        node.sort_order = draft.sort_order.unwrap_or(0);
        node.is_active = draft.is_active.unwrap_or(true);
        node.is_featured = draft.is_featured.unwrap_or(false);
        let created = node.clone();

        match draft.parent_id {
            Some(parent_id) => {
                let next = ops::insert_as_child(&self.forest, parent_id, node)
                    .ok_or(StoreError::ParentNotFound(parent_id))?;
                self.forest = next;
            }
            None => self.forest.push(node),
        }
        Ok(created)
    }

    fn update_inner(&mut self, id: CategoryId, patch: CategoryPatch) -> StoreResult<Category> {
        let current = ops::find_by_id(&self.forest, id)
            .cloned()
            .ok_or(StoreError::CategoryNotFound(id))?;

        if let Some(name) = &patch.name {
            if name.trim().is_empty() {
                return Err(CategoryValidationError::BlankName.into());
            }
        }
        if let Some(slug) = &patch.slug {
            validate_slug(slug)?;
            self.ensure_slug_free(slug, Some(id))?;
        }

        let mut next =
            ops::update_by_id(&self.forest, id, &patch).ok_or(StoreError::CategoryNotFound(id))?;

        if let Some(new_parent) = patch.parent_id {
            if new_parent != current.parent_id {
                if let Some(parent_id) = new_parent {
                    if ops::find_by_id(&next, parent_id).is_none() {
                        return Err(StoreError::ParentNotFound(parent_id));
                    }
                    if ops::would_create_cycle(&next, id, parent_id) {
                        return Err(StoreError::CycleDetected {
                            category: id,
                            parent: parent_id,
                        });
                    }
                }
                let (pruned, mut detached) =
                    ops::take_by_id(&next, id).ok_or(StoreError::CategoryNotFound(id))?;
                match new_parent {
                    Some(parent_id) => {
                        next = ops::insert_as_child(&pruned, parent_id, detached)
                            .ok_or(StoreError::ParentNotFound(parent_id))?;
                    }
                    None => {
                        detached.parent_id = None;
                        next = pruned;
                        next.push(detached);
                    }
                }
            }
        }

        if let Some(target) = ops::find_by_id_mut(&mut next, id) {
            target.touch();
        }
        let updated = ops::find_by_id(&next, id)
            .cloned()
            .ok_or(StoreError::CategoryNotFound(id))?;
        self.forest = next;
        Ok(updated)
    }

    fn delete_inner(&mut self, id: CategoryId) -> StoreResult<()> {
        let node = ops::find_by_id(&self.forest, id).ok_or(StoreError::CategoryNotFound(id))?;
        check_removable(node)?;
        let next = ops::delete_by_id(&self.forest, id).ok_or(StoreError::CategoryNotFound(id))?;
        self.forest = next;
        Ok(())
    }

    fn delete_many_inner(&mut self, ids: &[CategoryId]) -> StoreResult<usize> {
        let mut targets = HashSet::new();
        for &id in ids {
            let node = ops::find_by_id(&self.forest, id).ok_or(StoreError::CategoryNotFound(id))?;
            check_removable(node)?;
            targets.insert(id);
        }
        let (next, removed) = ops::delete_many_by_id(&self.forest, &targets);
        self.forest = next;
        Ok(removed)
    }

    fn set_flag_inner(
        &mut self,
        ids: &[CategoryId],
        flag: CategoryFlag,
        value: bool,
    ) -> StoreResult<usize> {
        let mut targets = HashSet::new();
        for &id in ids {
            if ops::find_by_id(&self.forest, id).is_none() {
                return Err(StoreError::CategoryNotFound(id));
            }
            targets.insert(id);
        }
        let (next, updated) = ops::set_flag_for_ids(&self.forest, &targets, flag, value);
        self.forest = next;
        Ok(updated)
    }

    fn ensure_slug_free(&self, slug: &str, exclude: Option<CategoryId>) -> StoreResult<()> {
        let taken = ops::flatten(&self.forest)
            .into_iter()
            .any(|row| row.category.slug == slug && Some(row.category.id) != exclude);
        if taken {
            return Err(StoreError::DuplicateSlug(slug.to_string()));
        }
        Ok(())
    }
}

fn check_removable(node: &Category) -> StoreResult<()> {
    if node.product_count > 0 {
        return Err(StoreError::HasProducts {
            category: node.id,
            product_count: node.product_count,
        });
    }
    if !node.children.is_empty() {
        return Err(StoreError::HasChildren {
            category: node.id,
            child_count: node.children.len(),
        });
    }
    Ok(())
}

fn display_parent(parent_id: Option<CategoryId>) -> String {
    match parent_id {
        Some(id) => id.to_string(),
        None => "root".to_string(),
    }
}

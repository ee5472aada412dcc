//! Pure primitives over a category forest.
//!
//! # Responsibility
//! - Traverse, query and structurally rewrite a forest of categories.
//! - Return a freshly built forest for every structural mutation.
//!
//! # Invariants
//! - Depth-first pre-order everywhere: a parent precedes its children,
//!   sibling order is preserved as stored (display sorting is a view
//!   concern).
//! - Category ids are unique across the forest; the first match is
//!   canonical.
//! - No primitive inspects `product_count` or performs validation;
//!   preconditions belong to the store.

use crate::model::category::{Category, CategoryId, CategoryPatch};
use std::collections::HashSet;

/// One row of a flattened forest: the node plus its computed depth.
///
/// Depth is derived during traversal (roots are 0) and is the only
/// trustworthy level information in the system.
#[derive(Debug, Clone, Copy)]
pub struct FlatNode<'a> {
    pub category: &'a Category,
    pub depth: usize,
}

/// Parent-selection candidate for the admin dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentOption {
    pub id: CategoryId,
    pub name: String,
    /// Indentation depth in the dropdown, 0 for roots.
    pub depth: usize,
}

/// Boolean field targeted by bulk toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryFlag {
    /// `is_active` — storefront visibility.
    Active,
    /// `is_featured` — promotional flag.
    Featured,
}

/// Flattens the forest depth-first pre-order into view rows.
///
/// Every node reachable from the roots appears exactly once; a parent
/// always precedes its children and siblings keep their stored order.
pub fn flatten(forest: &[Category]) -> Vec<FlatNode<'_>> {
    let mut rows = Vec::new();
    collect_flat(forest, 0, &mut rows);
    rows
}

fn collect_flat<'a>(nodes: &'a [Category], depth: usize, rows: &mut Vec<FlatNode<'a>>) {
    for node in nodes {
        rows.push(FlatNode {
            category: node,
            depth,
        });
        collect_flat(&node.children, depth + 1, rows);
    }
}

/// Counts every node reachable from the roots.
pub fn count_nodes(forest: &[Category]) -> usize {
    forest
        .iter()
        .map(|node| 1 + count_nodes(&node.children))
        .sum()
}

/// Finds a node by id at any depth. First match is canonical.
pub fn find_by_id(forest: &[Category], id: CategoryId) -> Option<&Category> {
    for node in forest {
        if node.id == id {
            return Some(node);
        }
        if let Some(found) = find_by_id(&node.children, id) {
            return Some(found);
        }
    }
    None
}

pub(crate) fn find_by_id_mut(nodes: &mut [Category], id: CategoryId) -> Option<&mut Category> {
    for node in nodes.iter_mut() {
        if node.id == id {
            return Some(node);
        }
        if let Some(found) = find_by_id_mut(&mut node.children, id) {
            return Some(found);
        }
    }
    None
}

/// Resolves a node's display name by id.
///
/// This is the live lookup that replaces any denormalized parent-name
/// cache: callers resolve the name at read time instead of storing it.
pub fn find_name_by_id(forest: &[Category], id: CategoryId) -> Option<&str> {
    find_by_id(forest, id).map(|node| node.name.as_str())
}

/// Returns a new forest with `node` appended under `parent_id`.
///
/// Existing children keep their order; the new node is placed last and
/// gets its `parent_id` back-reference set. Returns `None` when the
/// parent does not exist anywhere in the forest.
pub fn insert_as_child(
    forest: &[Category],
    parent_id: CategoryId,
    mut node: Category,
) -> Option<Vec<Category>> {
    let mut next = forest.to_vec();
    let parent = find_by_id_mut(&mut next, parent_id)?;
    node.parent_id = Some(parent_id);
    parent.children.push(node);
    Some(next)
}

/// Returns a new forest with `patch` shallow-merged into the node `id`.
///
/// `children` and `parent_id` are left untouched; moving a node is a
/// structural operation built from [`take_by_id`] + [`insert_as_child`].
/// Returns `None` when `id` does not exist.
pub fn update_by_id(
    forest: &[Category],
    id: CategoryId,
    patch: &CategoryPatch,
) -> Option<Vec<Category>> {
    let mut next = forest.to_vec();
    let target = find_by_id_mut(&mut next, id)?;
    target.apply_patch(patch);
    Some(next)
}

/// Detaches the node `id` (subtree attached) from a new copy of the
/// forest, returning both the pruned forest and the detached node.
///
/// Returns `None` when `id` does not exist.
pub fn take_by_id(forest: &[Category], id: CategoryId) -> Option<(Vec<Category>, Category)> {
    let mut next = forest.to_vec();
    let taken = take_in_place(&mut next, id)?;
    Some((next, taken))
}

fn take_in_place(nodes: &mut Vec<Category>, id: CategoryId) -> Option<Category> {
    if let Some(index) = nodes.iter().position(|node| node.id == id) {
        return Some(nodes.remove(index));
    }
    for node in nodes.iter_mut() {
        if let Some(taken) = take_in_place(&mut node.children, id) {
            return Some(taken);
        }
    }
    None
}

/// Returns a new forest without the node `id` and its whole subtree.
///
/// Descendants disappear with the node since they are only reachable
/// through its `children`. Returns `None` when `id` does not exist.
pub fn delete_by_id(forest: &[Category], id: CategoryId) -> Option<Vec<Category>> {
    take_by_id(forest, id).map(|(next, _taken)| next)
}

/// Removes every listed node (subtrees cascade) in one pass.
///
/// Returns the new forest and how many listed ids were pruned directly;
/// a listed id nested inside another pruned subtree is not counted twice.
pub fn delete_many_by_id(
    forest: &[Category],
    ids: &HashSet<CategoryId>,
) -> (Vec<Category>, usize) {
    let mut removed = 0;
    let next = prune_listed(forest, ids, &mut removed);
    (next, removed)
}

fn prune_listed(
    nodes: &[Category],
    ids: &HashSet<CategoryId>,
    removed: &mut usize,
) -> Vec<Category> {
    nodes
        .iter()
        .filter_map(|node| {
            if ids.contains(&node.id) {
                *removed += 1;
                return None;
            }
            let mut kept = node.clone();
            kept.children = prune_listed(&node.children, ids, removed);
            Some(kept)
        })
        .collect()
}

/// Applies `value` to the flagged boolean on every node whose id is
/// listed, at any depth, leaving all other fields untouched.
///
/// Idempotent: applying the same toggle twice yields an identical
/// forest. Returns the new forest and the number of matched nodes.
pub fn set_flag_for_ids(
    forest: &[Category],
    ids: &HashSet<CategoryId>,
    flag: CategoryFlag,
    value: bool,
) -> (Vec<Category>, usize) {
    let mut updated = 0;
    let next = apply_flag(forest, ids, flag, value, &mut updated);
    (next, updated)
}

fn apply_flag(
    nodes: &[Category],
    ids: &HashSet<CategoryId>,
    flag: CategoryFlag,
    value: bool,
    updated: &mut usize,
) -> Vec<Category> {
    nodes
        .iter()
        .map(|node| {
            let mut rebuilt = node.clone();
            if ids.contains(&rebuilt.id) {
                match flag {
                    CategoryFlag::Active => rebuilt.is_active = value,
                    CategoryFlag::Featured => rebuilt.is_featured = value,
                }
                *updated += 1;
            }
            rebuilt.children = apply_flag(&node.children, ids, flag, value, updated);
            rebuilt
        })
        .collect()
}

/// Enumerates parent candidates pre-order with indentation depth.
///
/// When `exclude` is set, that node and its entire subtree are skipped,
/// so the dropdown can never offer the node itself or one of its
/// descendants as a parent.
pub fn list_parent_options(forest: &[Category], exclude: Option<CategoryId>) -> Vec<ParentOption> {
    let mut options = Vec::new();
    collect_parent_options(forest, 0, exclude, &mut options);
    options
}

fn collect_parent_options(
    nodes: &[Category],
    depth: usize,
    exclude: Option<CategoryId>,
    options: &mut Vec<ParentOption>,
) {
    for node in nodes {
        if exclude == Some(node.id) {
            continue;
        }
        options.push(ParentOption {
            id: node.id,
            name: node.name.clone(),
            depth,
        });
        collect_parent_options(&node.children, depth + 1, exclude, options);
    }
}

/// Collects the ids of `node` and all of its descendants, pre-order.
pub fn subtree_ids(node: &Category) -> Vec<CategoryId> {
    let mut ids = vec![node.id];
    for child in &node.children {
        ids.extend(subtree_ids(child));
    }
    ids
}

/// Checks whether re-parenting `node_id` under `candidate_parent_id`
/// would make the node its own ancestor.
///
/// Walks the `parent_id` chain upwards from the candidate; a visited
/// set guards against already-corrupt back-references. Called at the
/// mutation boundary, never inside the structural primitives.
pub fn would_create_cycle(
    forest: &[Category],
    node_id: CategoryId,
    candidate_parent_id: CategoryId,
) -> bool {
    let mut visited = HashSet::new();
    let mut cursor = Some(candidate_parent_id);
    while let Some(current) = cursor {
        if current == node_id {
            return true;
        }
        if !visited.insert(current) {
            return true;
        }
        cursor = find_by_id(forest, current).and_then(|node| node.parent_id);
    }
    false
}

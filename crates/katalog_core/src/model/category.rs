//! Category domain model.
//!
//! # Responsibility
//! - Define the category node shared by tree operations, views and store.
//! - Provide slug derivation and field-level validation.
//!
//! # Invariants
//! - `id` is stable and never reused for another category.
//! - `children` are exclusively owned: a node sits in exactly one
//!   `children` list (or the root list) at a time.
//! - Depth is never stored on the node; it is computed by flattening.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

static NON_SLUG_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("valid slug-run regex"));
static SLUG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("valid slug regex"));

/// Stable identifier for every category node.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type CategoryId = Uuid;

/// Validation error for category field contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    /// `name` is blank after trim.
    BlankName,
    /// `slug` is blank after trim.
    BlankSlug,
    /// `slug` contains characters outside `[a-z0-9-]` or has a bad shape.
    InvalidSlug(String),
}

impl Display for CategoryValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankName => write!(f, "category name must not be blank"),
            Self::BlankSlug => write!(f, "category slug must not be blank"),
            Self::InvalidSlug(slug) => write!(
                f,
                "invalid category slug `{slug}`; expected lowercase alphanumerics separated by `-`"
            ),
        }
    }
}

impl Error for CategoryValidationError {}

/// Canonical category node in the catalog forest.
///
/// Serialized field names follow the storefront REST payload shape
/// (camelCase), so this struct doubles as the wire model for the
/// persistence collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Stable global ID used for parent references and bulk selection.
    pub id: CategoryId,
    /// Display name shown in admin and storefront navigation.
    pub name: String,
    /// URL-safe identity, unique across the whole forest.
    pub slug: String,
    /// Optional free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Back-reference to the containing parent; `None` marks a root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<CategoryId>,
    /// Optional display image path. Not validated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Optional display icon token. Not validated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Sibling display order; ties keep original order (stable sort).
    pub sort_order: i64,
    /// Inactive categories are hidden from the storefront.
    pub is_active: bool,
    /// Promotional flag.
    pub is_featured: bool,
    /// Maintained by the inventory collaborator; read-only here except
    /// as a delete precondition.
    pub product_count: u32,
    /// Exclusively owned child nodes in display order.
    #[serde(default)]
    pub children: Vec<Category>,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Unix epoch milliseconds.
    pub updated_at: i64,
}

impl Category {
    /// Creates a root-level category with a generated stable ID.
    ///
    /// # Invariants
    /// - `children` starts empty, `product_count` starts at zero.
    /// - `is_active` starts `true`, `is_featured` starts `false`.
    pub fn new(name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), name, slug)
    }

    /// Creates a category with a caller-provided stable ID.
    ///
    /// Used by import/seed paths where identity already exists externally.
    pub fn with_id(id: CategoryId, name: impl Into<String>, slug: impl Into<String>) -> Self {
        let now = now_epoch_ms();
        Self {
            id,
            name: name.into(),
            slug: slug.into(),
            description: None,
            parent_id: None,
            image: None,
            icon: None,
            sort_order: 0,
            is_active: true,
            is_featured: false,
            product_count: 0,
            children: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Checks name and slug field contents.
    ///
    /// # Errors
    /// - `BlankName` when `name` trims to empty.
    /// - `BlankSlug` / `InvalidSlug` when `slug` is empty or malformed.
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        if self.name.trim().is_empty() {
            return Err(CategoryValidationError::BlankName);
        }
        validate_slug(&self.slug)
    }

    /// Shallow-merges `patch` into this node, leaving `children` untouched.
    ///
    /// `parent_id` handling is intentionally absent here: changing the
    /// parent is a structural move owned by the store, not a field merge.
    pub fn apply_patch(&mut self, patch: &CategoryPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(slug) = &patch.slug {
            self.slug = slug.clone();
        }
        if let Some(description) = &patch.description {
            self.description = Some(description.clone());
        }
        if let Some(image) = &patch.image {
            self.image = Some(image.clone());
        }
        if let Some(icon) = &patch.icon {
            self.icon = Some(icon.clone());
        }
        if let Some(sort_order) = patch.sort_order {
            self.sort_order = sort_order;
        }
        if let Some(is_active) = patch.is_active {
            self.is_active = is_active;
        }
        if let Some(is_featured) = patch.is_featured {
            self.is_featured = is_featured;
        }
    }

    /// Bumps `updated_at` to the current wall clock.
    pub fn touch(&mut self) {
        self.updated_at = now_epoch_ms();
    }
}

/// Create request for a new category.
///
/// `slug` is derived from `name` when absent. Unset booleans default to
/// an active, non-featured category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryDraft {
    pub name: String,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub parent_id: Option<CategoryId>,
    pub image: Option<String>,
    pub icon: Option<String>,
    pub sort_order: Option<i64>,
    pub is_active: Option<bool>,
    pub is_featured: Option<bool>,
}

impl CategoryDraft {
    /// Creates a draft with only a name; everything else defaulted.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Shallow-merge update for an existing category.
///
/// `None` means "leave unchanged". `parent_id` uses a nested option:
/// `Some(None)` re-parents to the root list, `Some(Some(id))` re-parents
/// under `id`, `None` keeps the current parent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub parent_id: Option<Option<CategoryId>>,
    pub image: Option<String>,
    pub icon: Option<String>,
    pub sort_order: Option<i64>,
    pub is_active: Option<bool>,
    pub is_featured: Option<bool>,
}

/// Derives a URL-safe slug from a display name.
///
/// Lowercases, collapses every run of non-alphanumerics to a single `-`
/// and trims leading/trailing `-`. The result may still be empty for
/// names with no alphanumeric content; callers validate afterwards.
pub fn slugify(name: &str) -> String {
    let lowered = name.to_lowercase();
    let replaced = NON_SLUG_RUN_RE.replace_all(&lowered, "-");
    replaced.trim_matches('-').to_string()
}

/// Checks slug shape: non-empty lowercase alphanumerics separated by `-`.
pub fn validate_slug(slug: &str) -> Result<(), CategoryValidationError> {
    if slug.trim().is_empty() {
        return Err(CategoryValidationError::BlankSlug);
    }
    if !SLUG_RE.is_match(slug) {
        return Err(CategoryValidationError::InvalidSlug(slug.to_string()));
    }
    Ok(())
}

/// Current wall clock as Unix epoch milliseconds.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}

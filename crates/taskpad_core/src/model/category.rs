//! Category domain record and the first-run default seed.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ValidationError;

/// Stable identifier for a category.
pub type CategoryId = Uuid;

/// Canonical category record. `color` is a presentation token; the core
/// only requires that it is present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub color: String,
}

/// Caller input for creating a category. Excludes `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryDraft {
    pub name: String,
    pub color: String,
}

impl CategoryDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        Ok(())
    }
}

/// Per-field update for a category. `id` is not expressible here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub color: Option<String>,
}

impl CategoryPatch {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(name) = self.name.as_deref() {
            if name.trim().is_empty() {
                return Err(ValidationError::EmptyName);
            }
        }
        Ok(())
    }
}

impl Category {
    /// Materializes a draft into a full record with a fresh id.
    pub fn from_draft(draft: CategoryDraft) -> Self {
        Self { id: Uuid::new_v4(), name: draft.name, color: draft.color }
    }

    /// Applies every set field of the patch over this record.
    pub fn apply(&mut self, patch: CategoryPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
    }
}

/// Installed as the category collection when durable storage holds no
/// `categories` record. Ids are fixed so a fresh install is deterministic.
pub fn default_categories() -> Vec<Category> {
    fn seed(id: u128, name: &str, color: &str) -> Category {
        Category { id: Uuid::from_u128(id), name: name.to_string(), color: color.to_string() }
    }

    vec![
        seed(1, "Work", "#4A90E2"),
        seed(2, "Personal", "#50C878"),
        seed(3, "Health & Fitness", "#FF6B6B"),
        seed(4, "Shopping", "#FFB347"),
    ]
}

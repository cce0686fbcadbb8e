//! Task domain record and its draft/patch request shapes.
//!
//! # Responsibility
//! - Define the canonical task record as persisted and served to callers.
//! - Keep generated fields out of caller-supplied input types.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `created_at` is assigned once from the clock and never mutated.
//! - The wire shape is camelCase JSON with RFC 3339 timestamp strings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::category::CategoryId;
use super::ValidationError;

/// Stable identifier for a task.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TaskId = Uuid;

/// Task urgency level, serialized lowercase on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// Canonical task record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Stable global id, assigned at creation.
    pub id: TaskId,
    /// Non-empty display title.
    pub title: String,
    /// Free text, may be empty.
    pub description: String,
    /// Foreign key into the category collection. Checked to exist at
    /// creation time only; never re-validated afterwards.
    pub category_id: CategoryId,
    pub priority: Priority,
    pub due_date: DateTime<Utc>,
    pub completed: bool,
    /// Creation instant, immutable after assignment.
    pub created_at: DateTime<Utc>,
}

/// Caller input for creating a task. Excludes `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub category_id: CategoryId,
    pub priority: Priority,
    pub due_date: DateTime<Utc>,
    pub completed: bool,
}

impl TaskDraft {
    /// Checks field-local rules. Cross-entity rules (category existence)
    /// are the repository's responsibility.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        Ok(())
    }
}

/// Per-field update for a task. Unset fields are left unchanged; `id` and
/// `created_at` are not expressible here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<CategoryId>,
    pub priority: Option<Priority>,
    pub due_date: Option<DateTime<Utc>>,
    pub completed: Option<bool>,
}

impl TaskPatch {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(title) = self.title.as_deref() {
            if title.trim().is_empty() {
                return Err(ValidationError::EmptyTitle);
            }
        }
        Ok(())
    }
}

impl Task {
    /// Materializes a draft into a full record with a fresh id and the
    /// current instant as `created_at`.
    pub fn from_draft(draft: TaskDraft) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: draft.title,
            description: draft.description,
            category_id: draft.category_id,
            priority: draft.priority,
            due_date: draft.due_date,
            completed: draft.completed,
            created_at: Utc::now(),
        }
    }

    /// Applies every set field of the patch over this record.
    pub fn apply(&mut self, patch: TaskPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(category_id) = patch.category_id {
            self.category_id = category_id;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
    }
}

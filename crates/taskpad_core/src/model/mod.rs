//! Domain model for the task manager core.
//!
//! # Responsibility
//! - Define canonical task/category records and their wire shape.
//! - Define draft/patch request structs so the "which fields are mutable"
//!   contract lives in the type system.
//!
//! # Invariants
//! - Every record is identified by a stable UUID assigned at creation.
//! - Generated fields (`id`, `created_at`) are not expressible in drafts or
//!   patches.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod category;
pub mod task;

use category::CategoryId;

/// Pre-mutation validation failure for draft/patch input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Task title is empty or whitespace-only.
    EmptyTitle,
    /// Category name is empty or whitespace-only.
    EmptyName,
    /// Task draft references a category id that does not exist.
    UnknownCategory(CategoryId),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "task title must not be empty"),
            Self::EmptyName => write!(f, "category name must not be empty"),
            Self::UnknownCategory(id) => {
                write!(f, "task references unknown category: {id}")
            }
        }
    }
}

impl Error for ValidationError {}

//! Task/category persistence core for the taskpad app.
//! This crate is the single source of truth for business invariants.

pub mod logging;
pub mod model;
pub mod repo;
pub mod session;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::category::{
    default_categories, Category, CategoryDraft, CategoryId, CategoryPatch,
};
pub use model::task::{Priority, Task, TaskDraft, TaskId, TaskPatch};
pub use model::ValidationError;
pub use repo::task_repo::{
    CategorySummary, RepoError, RepoResult, TaskFilter, TaskRepository,
};
pub use session::{SessionError, SessionResult, SessionStore, UserProfile};
pub use store::{
    FileStore, MemoryStore, PersistentStore, StoreError, StoreResult, KEY_CATEGORIES,
    KEY_TASKS, KEY_USER,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}

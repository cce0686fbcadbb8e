//! Task/category repository over a durable key/value store.
//!
//! # Responsibility
//! - Hydrate both collections from durable storage at startup.
//! - Validate and apply mutations, persisting the full collection before
//!   acknowledging them.
//! - Enforce the one cross-entity rule: a referenced category cannot be
//!   deleted.
//!
//! # Invariants
//! - Mutations build the next collection aside, write it through the store,
//!   and only then swap it in; callers never observe uncommitted state.
//! - Hydration never fails process start; degraded outcomes are recorded in
//!   an observable flag instead.
//! - `category_id` is checked against the category collection at task
//!   creation time only.

use std::error::Error;
use std::fmt::{Display, Formatter};

use log::{error, info, warn};

use crate::model::category::{
    default_categories, Category, CategoryDraft, CategoryId, CategoryPatch,
};
use crate::model::task::{Task, TaskDraft, TaskId, TaskPatch};
use crate::model::ValidationError;
use crate::store::{PersistentStore, StoreError, KEY_CATEGORIES, KEY_TASKS};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error surfaced to the view layer.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    TaskNotFound(TaskId),
    CategoryNotFound(CategoryId),
    /// Category deletion blocked by tasks still referencing it.
    CategoryInUse { id: CategoryId, task_count: usize },
    Persistence(StoreError),
    Codec(serde_json::Error),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::TaskNotFound(id) => write!(f, "task not found: {id}"),
            Self::CategoryNotFound(id) => write!(f, "category not found: {id}"),
            Self::CategoryInUse { id, task_count } => write!(
                f,
                "category {id} still referenced by {task_count} task(s)"
            ),
            Self::Persistence(err) => write!(f, "{err}"),
            Self::Codec(err) => write!(f, "record encoding failed: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Persistence(err) => Some(err),
            Self::Codec(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        Self::Persistence(value)
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Codec(value)
    }
}

/// Equality filter for task listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    /// Restrict results to a single category when set.
    pub category_id: Option<CategoryId>,
}

/// On-demand per-category aggregate. Recomputed from the live collection on
/// every call; never persisted or cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategorySummary {
    pub total: usize,
    pub completed: usize,
}

impl CategorySummary {
    pub fn pending(&self) -> usize {
        self.total - self.completed
    }

    /// Completed share in `0.0..=1.0`; `0.0` for an empty category.
    pub fn completion_ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.completed as f64 / self.total as f64
        }
    }
}

/// The task/category persistence core. Owns the authoritative in-memory
/// collections and writes every mutation through the injected store.
pub struct TaskRepository<'s, S: PersistentStore> {
    store: &'s S,
    tasks: Vec<Task>,
    categories: Vec<Category>,
    hydration_degraded: bool,
}

impl<'s, S: PersistentStore> TaskRepository<'s, S> {
    /// Creates a repository with empty tasks and the default category seed.
    /// Call [`initialize`](Self::initialize) to hydrate from the store.
    pub fn new(store: &'s S) -> Self {
        Self {
            store,
            tasks: Vec::new(),
            categories: default_categories(),
            hydration_degraded: false,
        }
    }

    /// Hydrates both collections from durable storage. Best-effort by
    /// contract: any read or decode failure degrades to the empty/default
    /// state and sets [`hydration_degraded`](Self::hydration_degraded)
    /// instead of blocking startup.
    pub fn initialize(&mut self) {
        match self.store.get(KEY_TASKS) {
            Ok(Some(bytes)) => {
                let (tasks, dropped) = decode_tasks(&bytes);
                if dropped > 0 {
                    self.hydration_degraded = true;
                    warn!(
                        "event=hydrate module=repo status=degraded record=tasks dropped={dropped}"
                    );
                }
                self.tasks = tasks;
            }
            Ok(None) => {}
            Err(err) => {
                self.hydration_degraded = true;
                error!(
                    "event=hydrate module=repo status=error record=tasks error={err}"
                );
            }
        }

        match self.store.get(KEY_CATEGORIES) {
            Ok(Some(bytes)) => match serde_json::from_slice::<Vec<Category>>(&bytes) {
                Ok(categories) => self.categories = categories,
                Err(err) => {
                    // keep the default seed rather than start without any
                    // category
                    self.hydration_degraded = true;
                    warn!(
                        "event=hydrate module=repo status=degraded record=categories error={err}"
                    );
                }
            },
            Ok(None) => {}
            Err(err) => {
                self.hydration_degraded = true;
                error!(
                    "event=hydrate module=repo status=error record=categories error={err}"
                );
            }
        }

        info!(
            "event=hydrate module=repo status=ok tasks={} categories={} degraded={}",
            self.tasks.len(),
            self.categories.len(),
            self.hydration_degraded
        );
    }

    /// Whether hydration fell back to empty/default state for any record.
    pub fn hydration_degraded(&self) -> bool {
        self.hydration_degraded
    }

    // ---- task mutations ----

    /// Creates a task from the draft, assigning a fresh id and `created_at`.
    /// The draft's category must exist at this point; it is never re-checked
    /// afterwards.
    pub fn add_task(&mut self, draft: TaskDraft) -> RepoResult<Task> {
        draft.validate()?;
        if !self.category_exists(draft.category_id) {
            return Err(ValidationError::UnknownCategory(draft.category_id).into());
        }

        let task = Task::from_draft(draft);
        let mut next = self.tasks.clone();
        next.push(task.clone());
        self.persist_tasks(&next)?;
        self.tasks = next;
        Ok(task)
    }

    /// Applies the set fields of `patch` over the task with `id`.
    pub fn update_task(&mut self, id: TaskId, patch: TaskPatch) -> RepoResult<Task> {
        patch.validate()?;
        let index = self
            .tasks
            .iter()
            .position(|task| task.id == id)
            .ok_or(RepoError::TaskNotFound(id))?;

        let mut next = self.tasks.clone();
        next[index].apply(patch);
        let updated = next[index].clone();
        self.persist_tasks(&next)?;
        self.tasks = next;
        Ok(updated)
    }

    /// Removes the task with `id`. Removing an absent id is a no-op
    /// success, matching a UI that may re-issue deletes against stale state.
    pub fn delete_task(&mut self, id: TaskId) -> RepoResult<()> {
        let mut next = self.tasks.clone();
        next.retain(|task| task.id != id);
        self.persist_tasks(&next)?;
        self.tasks = next;
        Ok(())
    }

    // ---- category mutations ----

    pub fn add_category(&mut self, draft: CategoryDraft) -> RepoResult<Category> {
        draft.validate()?;

        let category = Category::from_draft(draft);
        let mut next = self.categories.clone();
        next.push(category.clone());
        self.persist_categories(&next)?;
        self.categories = next;
        Ok(category)
    }

    pub fn update_category(
        &mut self,
        id: CategoryId,
        patch: CategoryPatch,
    ) -> RepoResult<Category> {
        patch.validate()?;
        let index = self
            .categories
            .iter()
            .position(|category| category.id == id)
            .ok_or(RepoError::CategoryNotFound(id))?;

        let mut next = self.categories.clone();
        next[index].apply(patch);
        let updated = next[index].clone();
        self.persist_categories(&next)?;
        self.categories = next;
        Ok(updated)
    }

    /// Removes the category with `id`. Rejected while any task references
    /// it; deletion is never cascaded. Removing an absent id is a no-op
    /// success.
    pub fn delete_category(&mut self, id: CategoryId) -> RepoResult<()> {
        let task_count = self
            .tasks
            .iter()
            .filter(|task| task.category_id == id)
            .count();
        if task_count > 0 {
            return Err(RepoError::CategoryInUse { id, task_count });
        }

        let mut next = self.categories.clone();
        next.retain(|category| category.id != id);
        self.persist_categories(&next)?;
        self.categories = next;
        Ok(())
    }

    // ---- queries ----

    /// Committed task collection in insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Committed category collection in insertion order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }

    /// Lists tasks, optionally restricted to one category. Pure read over
    /// committed state.
    pub fn list_tasks(&self, filter: &TaskFilter) -> Vec<Task> {
        self.tasks
            .iter()
            .filter(|task| match filter.category_id {
                Some(category_id) => task.category_id == category_id,
                None => true,
            })
            .cloned()
            .collect()
    }

    /// Per-category progress aggregate, recomputed from the live collection.
    pub fn category_summary(&self, id: CategoryId) -> CategorySummary {
        let mut summary = CategorySummary { total: 0, completed: 0 };
        for task in self.tasks.iter().filter(|task| task.category_id == id) {
            summary.total += 1;
            if task.completed {
                summary.completed += 1;
            }
        }
        summary
    }

    pub fn pending_count(&self) -> usize {
        self.tasks.iter().filter(|task| !task.completed).count()
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|task| task.completed).count()
    }

    // ---- persistence ----

    fn category_exists(&self, id: CategoryId) -> bool {
        self.categories.iter().any(|category| category.id == id)
    }

    fn persist_tasks(&self, tasks: &[Task]) -> RepoResult<()> {
        let bytes = serde_json::to_vec(tasks)?;
        self.store.set(KEY_TASKS, &bytes).map_err(|err| {
            error!("event=persist module=repo status=error record=tasks error={err}");
            RepoError::Persistence(err)
        })
    }

    fn persist_categories(&self, categories: &[Category]) -> RepoResult<()> {
        let bytes = serde_json::to_vec(categories)?;
        self.store.set(KEY_CATEGORIES, &bytes).map_err(|err| {
            error!(
                "event=persist module=repo status=error record=categories error={err}"
            );
            RepoError::Persistence(err)
        })
    }
}

/// Decodes the persisted task array record by record, dropping records that
/// fail to parse (bad date fields included). Returns the surviving tasks
/// and the number of records dropped. An undecodable top-level blob counts
/// as one drop and yields an empty collection.
fn decode_tasks(bytes: &[u8]) -> (Vec<Task>, usize) {
    let raw: Vec<serde_json::Value> = match serde_json::from_slice(bytes) {
        Ok(raw) => raw,
        Err(_) => return (Vec::new(), 1),
    };

    let mut tasks = Vec::with_capacity(raw.len());
    let mut dropped = 0;
    for value in raw {
        match serde_json::from_value::<Task>(value) {
            Ok(task) => tasks.push(task),
            Err(_) => dropped += 1,
        }
    }
    (tasks, dropped)
}

use chrono::{TimeZone as _, Utc};
use std::cell::Cell;
use taskpad_core::{
    CategoryDraft, CategoryId, FileStore, MemoryStore, PersistentStore, Priority, StoreError,
    StoreResult, TaskDraft, TaskRepository, KEY_CATEGORIES, KEY_TASKS,
};

#[test]
fn empty_store_hydrates_to_defaults_without_degradation() {
    let store = MemoryStore::new();
    let mut repo = TaskRepository::new(&store);
    repo.initialize();

    assert!(repo.tasks().is_empty());
    assert_eq!(repo.categories().len(), 4);
    assert!(!repo.hydration_degraded());
    // the default seed is in-memory only until a mutation persists it
    assert!(store.get(KEY_CATEGORIES).unwrap().is_none());
    assert!(store.get(KEY_TASKS).unwrap().is_none());
}

#[test]
fn committed_state_round_trips_through_rehydration() {
    let store = MemoryStore::new();
    let (tasks_before, categories_before) = {
        let mut repo = TaskRepository::new(&store);
        repo.initialize();

        let errands = repo
            .add_category(CategoryDraft {
                name: "Errands".to_string(),
                color: "#AA33AA".to_string(),
            })
            .unwrap();
        repo.add_task(draft(errands.id, "post office")).unwrap();
        repo.add_task(draft(errands.id, "bank")).unwrap();
        (repo.tasks().to_vec(), repo.categories().to_vec())
    };

    let mut rehydrated = TaskRepository::new(&store);
    rehydrated.initialize();

    assert_eq!(rehydrated.tasks(), tasks_before.as_slice());
    assert_eq!(rehydrated.categories(), categories_before.as_slice());
    assert!(!rehydrated.hydration_degraded());
}

#[test]
fn file_store_round_trips_across_process_boundaries() {
    let dir = tempfile::tempdir().unwrap();
    let created = {
        let store = FileStore::open(dir.path()).unwrap();
        let mut repo = TaskRepository::new(&store);
        repo.initialize();
        let category_id = repo.categories()[0].id;
        repo.add_task(draft(category_id, "durable")).unwrap()
    };

    let store = FileStore::open(dir.path()).unwrap();
    let mut repo = TaskRepository::new(&store);
    repo.initialize();

    assert_eq!(repo.tasks(), &[created]);
}

#[test]
fn corrupt_task_record_is_dropped_and_flagged() {
    let store = MemoryStore::new();
    store
        .set(
            KEY_TASKS,
            br#"[
                {"id":"00000000-0000-4000-8000-000000000001","title":"good",
                 "description":"","categoryId":"00000000-0000-0000-0000-000000000001",
                 "priority":"high","dueDate":"2026-04-01T10:00:00Z",
                 "completed":true,"createdAt":"2026-01-01T00:00:00Z"},
                {"id":"00000000-0000-4000-8000-000000000002","title":"bad",
                 "description":"","categoryId":"00000000-0000-0000-0000-000000000001",
                 "priority":"high","dueDate":"yesterday-ish",
                 "completed":false,"createdAt":"2026-01-01T00:00:00Z"}
            ]"#,
        )
        .unwrap();

    let mut repo = TaskRepository::new(&store);
    repo.initialize();

    assert_eq!(repo.tasks().len(), 1);
    assert_eq!(repo.tasks()[0].title, "good");
    assert!(repo.hydration_degraded());
}

#[test]
fn undecodable_categories_blob_keeps_default_seed() {
    let store = MemoryStore::new();
    store.set(KEY_CATEGORIES, b"{{ not json").unwrap();

    let mut repo = TaskRepository::new(&store);
    repo.initialize();

    assert_eq!(repo.categories().len(), 4);
    assert!(repo.hydration_degraded());
}

#[test]
fn read_failure_degrades_instead_of_failing_startup() {
    let store = UnreadableStore { reads: Cell::new(0) };
    let mut repo = TaskRepository::new(&store);
    repo.initialize();

    assert!(repo.tasks().is_empty());
    assert_eq!(repo.categories().len(), 4);
    assert!(repo.hydration_degraded());
    // both records were attempted
    assert_eq!(store.reads.get(), 2);
}

struct UnreadableStore {
    reads: Cell<u32>,
}

impl PersistentStore for UnreadableStore {
    fn get(&self, _key: &str) -> StoreResult<Option<Vec<u8>>> {
        self.reads.set(self.reads.get() + 1);
        Err(StoreError::Backend("medium offline".to_string()))
    }

    fn set(&self, _key: &str, _value: &[u8]) -> StoreResult<()> {
        Ok(())
    }

    fn remove(&self, _key: &str) -> StoreResult<()> {
        Ok(())
    }
}

fn draft(category_id: CategoryId, title: &str) -> TaskDraft {
    TaskDraft {
        title: title.to_string(),
        description: String::new(),
        category_id,
        priority: Priority::Medium,
        due_date: Utc.with_ymd_and_hms(2026, 7, 4, 9, 0, 0).unwrap(),
        completed: false,
    }
}

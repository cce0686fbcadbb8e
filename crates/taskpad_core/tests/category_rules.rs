use chrono::{TimeZone as _, Utc};
use taskpad_core::{
    CategoryDraft, CategoryId, CategoryPatch, MemoryStore, Priority, RepoError, TaskDraft,
    TaskRepository, ValidationError,
};
use uuid::Uuid;

#[test]
fn fresh_repository_carries_default_seed() {
    let store = MemoryStore::new();
    let mut repo = TaskRepository::new(&store);
    repo.initialize();

    let names: Vec<_> = repo
        .categories()
        .iter()
        .map(|category| category.name.as_str())
        .collect();
    assert_eq!(names, ["Work", "Personal", "Health & Fitness", "Shopping"]);
    assert!(!repo.hydration_degraded());
}

#[test]
fn add_rejects_blank_name() {
    let store = MemoryStore::new();
    let mut repo = TaskRepository::new(&store);
    repo.initialize();

    let err = repo
        .add_category(CategoryDraft { name: "\t".to_string(), color: "#000000".to_string() })
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::EmptyName)
    ));
    assert_eq!(repo.categories().len(), 4);
}

#[test]
fn update_patches_fields_and_keeps_id() {
    let store = MemoryStore::new();
    let mut repo = TaskRepository::new(&store);
    repo.initialize();
    let id = repo.categories()[0].id;

    let updated = repo
        .update_category(
            id,
            CategoryPatch { name: Some("Office".to_string()), ..CategoryPatch::default() },
        )
        .unwrap();
    assert_eq!(updated.id, id);
    assert_eq!(updated.name, "Office");
    // color untouched
    assert_eq!(updated.color, "#4A90E2");
}

#[test]
fn update_missing_category_returns_not_found() {
    let store = MemoryStore::new();
    let mut repo = TaskRepository::new(&store);
    repo.initialize();

    let missing = Uuid::new_v4();
    let err = repo
        .update_category(missing, CategoryPatch::default())
        .unwrap_err();
    assert!(matches!(err, RepoError::CategoryNotFound(id) if id == missing));
}

#[test]
fn delete_blocked_while_tasks_reference_it() {
    let store = MemoryStore::new();
    let mut repo = TaskRepository::new(&store);
    repo.initialize();
    let category_id = repo.categories()[0].id;

    repo.add_task(task_in(category_id)).unwrap();
    repo.add_task(task_in(category_id)).unwrap();

    let err = repo.delete_category(category_id).unwrap_err();
    assert!(matches!(
        err,
        RepoError::CategoryInUse { id, task_count: 2 } if id == category_id
    ));
    assert!(repo.category(category_id).is_some());

    // removing the referencing tasks unblocks deletion
    let ids: Vec<_> = repo.tasks().iter().map(|task| task.id).collect();
    for id in ids {
        repo.delete_task(id).unwrap();
    }
    repo.delete_category(category_id).unwrap();
    assert!(repo.category(category_id).is_none());
}

#[test]
fn delete_absent_category_is_a_noop() {
    let store = MemoryStore::new();
    let mut repo = TaskRepository::new(&store);
    repo.initialize();

    repo.delete_category(Uuid::new_v4()).unwrap();
    assert_eq!(repo.categories().len(), 4);
}

fn task_in(category_id: CategoryId) -> TaskDraft {
    TaskDraft {
        title: "anchored".to_string(),
        description: String::new(),
        category_id,
        priority: Priority::Low,
        due_date: Utc.with_ymd_and_hms(2026, 2, 2, 8, 0, 0).unwrap(),
        completed: false,
    }
}

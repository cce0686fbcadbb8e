//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `taskpad_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use chrono::Utc;
use taskpad_core::{MemoryStore, Priority, TaskDraft, TaskRepository};

fn main() {
    println!("taskpad_core version={}", taskpad_core::core_version());

    let store = MemoryStore::new();
    let mut repo = TaskRepository::new(&store);
    repo.initialize();
    println!("categories={}", repo.categories().len());

    let category_id = repo.categories()[0].id;
    let created = repo
        .add_task(TaskDraft {
            title: "smoke task".to_string(),
            description: String::new(),
            category_id,
            priority: Priority::Low,
            due_date: Utc::now(),
            completed: false,
        })
        .expect("memory store writes cannot fail");
    println!("tasks={} first_id={}", repo.tasks().len(), created.id);
}

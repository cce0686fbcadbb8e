//! Repository layer: authoritative in-memory collections plus write-through
//! persistence.
//!
//! # Responsibility
//! - Own the task/category collections and every mutation applied to them.
//! - Isolate record encoding and store access from callers.
//!
//! # Invariants
//! - New in-memory state is published only after the durable write
//!   succeeded; a failed write leaves the observable collections unchanged.
//! - Repository APIs return semantic errors (`TaskNotFound`,
//!   `CategoryInUse`) in addition to store transport errors.

pub mod task_repo;

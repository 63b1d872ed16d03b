//! Repository layer abstractions.
//!
//! # Responsibility
//! - Define read contracts the services consume.
//! - Keep the data source (bundled dataset, future API) out of services.
//!
//! # Invariants
//! - Writes validate records before they are stored.
//! - Writes against an unknown id return `RepoError::TaskNotFound` or
//!   `RepoError::CommentNotFound`; reads return `Ok(None)`.
//! - Inserting a task whose id is taken returns `RepoError::DuplicateTask`.

pub mod tracker_repo;

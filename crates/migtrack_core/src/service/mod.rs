//! Core use-case services.
//!
//! # Responsibility
//! - Compose repository reads with pure metrics into view-ready results.
//! - Keep CLI/UI layers decoupled from data-source details.

pub mod dashboard_service;
pub mod task_service;

//! Core domain logic for the migration tracker.
//! This crate is the single source of truth for project metrics and board
//! invariants; views only render what it returns.

pub mod board;
pub mod config;
pub mod logging;
pub mod metrics;
pub mod model;
pub mod repo;
pub mod seed;
pub mod service;
pub mod timeline;

pub use board::{BoardError, BoardFilter, BoardTotals, MoveOutcome, ProjectBoard};
pub use config::{ConfigError, MetricsConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use metrics::{
    blocker_sla_impact, compute_accountability, compute_averages, compute_bottlenecks,
    compute_sla_compliance, compute_task_rollup, compute_urgency, compute_urgency_within,
    compute_velocity, derive_risk_distribution, predict_completion, DashboardInputs,
    DashboardSnapshot,
};
pub use model::blocker::{Blocker, BlockerValidationError, ImpactLevel, NewBlocker};
pub use model::comment::{
    ActivityEntry, ActivityKind, Comment, CommentValidationError, NewComment,
};
pub use model::ids::{BlockerId, CommentId, ProjectId, TaskId};
pub use model::phase::{Phase, PhasePlan, PhaseProgress};
pub use model::project::{Project, ProjectValidationError, RiskLevel, RiskThresholds};
pub use model::task::{
    NewTask, Task, TaskPriority, TaskStatus, TaskValidationError, UrgencyStatus,
};
pub use model::{days_until, ParseEnumError};
pub use repo::tracker_repo::{InMemoryTrackerRepository, RepoError, RepoResult, TrackerRepository};
pub use seed::{reference_dataset, Dataset, SeedError};
pub use service::dashboard_service::{BlockerImpact, DashboardService, TaskUrgency};
pub use service::task_service::{TaskService, TaskServiceError};
pub use timeline::{BarPosition, ProjectBar, TimelineWindow};

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

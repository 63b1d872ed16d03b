//! Dashboard use-case service.
//!
//! # Responsibility
//! - Build `DashboardSnapshot`s and per-record views from repository data.
//!
//! # Invariants
//! - The service holds a validated `MetricsConfig`.
//! - Every read is side-effect free apart from diagnostic logging.
//! - Blocker hours are evaluated at the caller's `now`, never the stored
//!   snapshot alone.

use crate::board::{BoardError, ProjectBoard};
use crate::config::{ConfigError, MetricsConfig};
use crate::metrics::sla::{
    blocker_sla_impact, compute_accountability, EntityAccountability, SlaImpact,
};
use crate::metrics::snapshot::{DashboardInputs, DashboardSnapshot};
use crate::metrics::urgency::compute_urgency_within;
use crate::model::blocker::{Blocker, ImpactLevel};
use crate::model::ids::{BlockerId, TaskId};
use crate::model::task::{TaskStatus, UrgencyStatus};
use crate::repo::tracker_repo::{RepoError, RepoResult, TrackerRepository};
use crate::timeline::{ProjectBar, TimelineWindow};
use chrono::{DateTime, NaiveDate, Utc};
use log::info;
use serde::Serialize;

/// One task with its urgency evaluated at a given instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskUrgency {
    pub task_id: TaskId,
    pub title: String,
    pub assigned_entity: String,
    pub status: TaskStatus,
    pub urgency: UrgencyStatus,
    pub urgency_color: &'static str,
}

/// One blocker with its SLA impact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockerImpact {
    pub blocker_id: BlockerId,
    pub task_title: String,
    pub entity_name: String,
    pub responsible_person: String,
    pub hours_blocked: u32,
    pub impact: SlaImpact,
    pub impact_level: ImpactLevel,
    pub estimated_resolution: Option<NaiveDate>,
    pub past_estimate: bool,
}

/// Read-only dashboard facade over a tracker repository.
pub struct DashboardService<R: TrackerRepository> {
    repo: R,
    config: MetricsConfig,
}

impl<R: TrackerRepository> DashboardService<R> {
    /// # Errors
    /// - Returns the first `ConfigError` reported by `MetricsConfig::validate`.
    pub fn new(repo: R, config: MetricsConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { repo, config })
    }

    pub fn config(&self) -> &MetricsConfig {
        &self.config
    }

    pub fn snapshot(&self, now: DateTime<Utc>) -> RepoResult<DashboardSnapshot> {
        let projects = self.repo.list_projects()?;
        let blockers = self.live_blockers(now)?;
        let phase_durations = self.repo.list_phase_durations()?;
        let velocity = self.repo.velocity_sample()?;

        let snapshot = DashboardSnapshot::compute(
            DashboardInputs {
                projects: &projects,
                blockers: &blockers,
                phase_durations: &phase_durations,
                velocity,
            },
            &self.config,
            now,
        );
        info!(
            "event=dashboard_snapshot module=service status=ok projects={} blockers={} critical={} sla_pct={}",
            snapshot.total_projects,
            blockers.len(),
            snapshot.risk.critical,
            snapshot.sla.percentage
        );
        Ok(snapshot)
    }

    /// Tasks in repository order with urgency at `now`.
    pub fn task_urgencies(&self, now: DateTime<Utc>) -> RepoResult<Vec<TaskUrgency>> {
        let window = self.config.urgency_risk_window_days;
        Ok(self
            .repo
            .list_tasks()?
            .into_iter()
            .map(|task| {
                let urgency = compute_urgency_within(&task, now, window);
                TaskUrgency {
                    urgency,
                    urgency_color: urgency.color(),
                    task_id: task.id,
                    title: task.title,
                    assigned_entity: task.assigned_entity,
                    status: task.status,
                }
            })
            .collect())
    }

    /// Blockers with hours and SLA impact evaluated at `now`.
    pub fn blocker_impacts(&self, now: DateTime<Utc>) -> RepoResult<Vec<BlockerImpact>> {
        Ok(self
            .live_blockers(now)?
            .into_iter()
            .map(|blocker| BlockerImpact {
                impact: blocker_sla_impact(blocker.hours_blocked),
                past_estimate: blocker.is_past_estimate(now),
                impact_level: blocker.impact,
                estimated_resolution: blocker.estimated_resolution,
                blocker_id: blocker.id,
                task_title: blocker.task_title,
                entity_name: blocker.entity_name,
                responsible_person: blocker.responsible_person,
                hours_blocked: blocker.hours_blocked,
            })
            .collect())
    }

    /// Per-entity blocker accountability at `now`, without the rest of the
    /// snapshot.
    pub fn accountability(
        &self,
        now: DateTime<Utc>,
    ) -> RepoResult<Vec<EntityAccountability>> {
        Ok(compute_accountability(&self.live_blockers(now)?))
    }

    /// Kanban board over the repository's current projects.
    pub fn board(&self) -> RepoResult<ProjectBoard> {
        let projects = self.repo.list_projects()?;
        ProjectBoard::from_projects(projects, self.config.risk).map_err(|err| match err {
            BoardError::Validation(err) => RepoError::InvalidProject(err),
            BoardError::ProjectNotFound(id) => RepoError::ProjectNotFound(id),
        })
    }

    /// Gantt rows for every project inside `window`.
    pub fn timeline(&self, window: &TimelineWindow) -> RepoResult<Vec<ProjectBar>> {
        let projects = self.repo.list_projects()?;
        Ok(window.project_bars(&projects, &self.config.risk))
    }

    fn live_blockers(&self, now: DateTime<Utc>) -> RepoResult<Vec<Blocker>> {
        Ok(self
            .repo
            .list_blockers()?
            .iter()
            .map(|blocker| blocker.at(now))
            .collect())
    }
}

//! Portfolio-level aggregates over a project set.

use crate::metrics::{percent_of, rounded_mean};
use crate::model::days_until;
use crate::model::ids::ProjectId;
use crate::model::phase::Phase;
use crate::model::project::{Project, RiskLevel, RiskThresholds};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

/// Project counts per risk bucket with rounded percentages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RiskDistribution {
    pub healthy: usize,
    pub warning: usize,
    pub critical: usize,
    pub total: usize,
    pub healthy_pct: u32,
    pub warning_pct: u32,
    pub critical_pct: u32,
}

impl RiskDistribution {
    pub fn count(&self, level: RiskLevel) -> usize {
        match level {
            RiskLevel::Healthy => self.healthy,
            RiskLevel::Warning => self.warning,
            RiskLevel::Critical => self.critical,
        }
    }

    pub fn percentage(&self, level: RiskLevel) -> u32 {
        match level {
            RiskLevel::Healthy => self.healthy_pct,
            RiskLevel::Warning => self.warning_pct,
            RiskLevel::Critical => self.critical_pct,
        }
    }
}

/// Rounded means of completion rate and health score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Averages {
    pub avg_completion: u32,
    pub avg_health_score: u32,
}

/// Task counters summed across projects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct TaskRollup {
    pub completed: u64,
    pub total: u64,
    pub blocked: u64,
    /// `completed / total`; `0.0` when there are no tasks.
    pub completion_ratio: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PhaseCount {
    pub phase: Phase,
    pub count: usize,
}

/// Entry of the "projects at risk" list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AtRiskProject {
    pub id: ProjectId,
    pub name: String,
    pub status: Phase,
    pub risk_level: RiskLevel,
    pub health_score: u8,
}

/// Entry of the "upcoming deadlines" list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpcomingDeadline {
    pub id: ProjectId,
    pub name: String,
    pub status: Phase,
    pub target_end_date: NaiveDate,
    pub days_until: i64,
    pub is_overdue: bool,
    pub is_urgent: bool,
}

/// Partitions projects into risk buckets.
///
/// Percentages are rounded independently, so they may not sum to exactly 100.
/// An empty set yields all zeros.
pub fn derive_risk_distribution(
    projects: &[Project],
    thresholds: &RiskThresholds,
) -> RiskDistribution {
    let mut distribution = RiskDistribution {
        total: projects.len(),
        ..RiskDistribution::default()
    };
    for project in projects {
        match project.risk_level(thresholds) {
            RiskLevel::Healthy => distribution.healthy += 1,
            RiskLevel::Warning => distribution.warning += 1,
            RiskLevel::Critical => distribution.critical += 1,
        }
    }

    let total = distribution.total as u64;
    distribution.healthy_pct = percent_of(distribution.healthy as u64, total);
    distribution.warning_pct = percent_of(distribution.warning as u64, total);
    distribution.critical_pct = percent_of(distribution.critical as u64, total);
    distribution
}

pub fn compute_averages(projects: &[Project]) -> Averages {
    let count = projects.len() as u64;
    let completion_sum: u64 = projects.iter().map(|p| u64::from(p.completion_rate)).sum();
    let health_sum: u64 = projects.iter().map(|p| u64::from(p.health_score)).sum();
    Averages {
        avg_completion: rounded_mean(completion_sum, count),
        avg_health_score: rounded_mean(health_sum, count),
    }
}

pub fn compute_task_rollup(projects: &[Project]) -> TaskRollup {
    let mut rollup = TaskRollup::default();
    for project in projects {
        rollup.completed += u64::from(project.completed_tasks);
        rollup.total += u64::from(project.total_tasks);
        rollup.blocked += u64::from(project.blocked_tasks);
    }
    if rollup.total > 0 {
        rollup.completion_ratio = rollup.completed as f64 / rollup.total as f64;
    }
    rollup
}

/// Project count per phase in workflow order, empty phases included.
pub fn compute_phase_distribution(projects: &[Project]) -> Vec<PhaseCount> {
    Phase::ALL
        .into_iter()
        .map(|phase| PhaseCount {
            phase,
            count: projects.iter().filter(|p| p.status == phase).count(),
        })
        .collect()
}

/// Projects already in `Production`.
pub fn completed_project_count(projects: &[Project]) -> usize {
    projects.iter().filter(|p| p.status.is_terminal()).count()
}

/// Warning and critical projects, critical first, then lowest health first.
pub fn projects_at_risk(
    projects: &[Project],
    thresholds: &RiskThresholds,
    limit: usize,
) -> Vec<AtRiskProject> {
    let mut at_risk: Vec<AtRiskProject> = projects
        .iter()
        .filter_map(|project| {
            let risk_level = project.risk_level(thresholds);
            risk_level.needs_attention().then(|| AtRiskProject {
                id: project.id.clone(),
                name: project.name.clone(),
                status: project.status,
                risk_level,
                health_score: project.health_score,
            })
        })
        .collect();

    // Stable sort keeps input order among equal keys.
    at_risk.sort_by(|a, b| {
        let a_critical = a.risk_level == RiskLevel::Critical;
        let b_critical = b.risk_level == RiskLevel::Critical;
        b_critical
            .cmp(&a_critical)
            .then(a.health_score.cmp(&b.health_score))
    });
    at_risk.truncate(limit);
    at_risk
}

/// Undelivered projects ordered by nearest target date.
pub fn upcoming_deadlines(
    projects: &[Project],
    now: DateTime<Utc>,
    urgent_days: i64,
    limit: usize,
) -> Vec<UpcomingDeadline> {
    let mut pending: Vec<&Project> = projects
        .iter()
        .filter(|project| !project.status.is_terminal())
        .collect();
    pending.sort_by_key(|project| project.target_end_date);

    pending
        .into_iter()
        .take(limit)
        .map(|project| {
            let days = days_until(project.target_end_date, now);
            UpcomingDeadline {
                id: project.id.clone(),
                name: project.name.clone(),
                status: project.status,
                target_end_date: project.target_end_date,
                days_until: days,
                is_overdue: days <= 0,
                is_urgent: days <= urgent_days,
            }
        })
        .collect()
}

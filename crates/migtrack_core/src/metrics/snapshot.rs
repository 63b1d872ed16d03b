//! One-shot bundle of every dashboard indicator.

use crate::config::MetricsConfig;
use crate::metrics::bottleneck::{compute_bottlenecks, Bottleneck, PhaseDuration};
use crate::metrics::forecast::{
    compute_velocity, predict_completion, CompletionForecast, VelocityReport, VelocitySample,
};
use crate::metrics::portfolio::{
    completed_project_count, compute_averages, compute_phase_distribution, compute_task_rollup,
    derive_risk_distribution, projects_at_risk, upcoming_deadlines, AtRiskProject, Averages,
    PhaseCount, RiskDistribution, TaskRollup, UpcomingDeadline,
};
use crate::metrics::sla::{
    compute_accountability, compute_sla_compliance, EntityAccountability, SlaCompliance,
};
use crate::model::blocker::Blocker;
use crate::model::project::Project;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Borrowed inputs for one snapshot.
#[derive(Debug, Clone, Copy)]
pub struct DashboardInputs<'a> {
    pub projects: &'a [Project],
    pub blockers: &'a [Blocker],
    pub phase_durations: &'a [PhaseDuration],
    pub velocity: VelocitySample,
}

/// Every indicator shown by the dashboard, metrics and charts views.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub generated_at: DateTime<Utc>,
    pub total_projects: usize,
    pub completed_projects: usize,
    pub risk: RiskDistribution,
    pub averages: Averages,
    pub tasks: TaskRollup,
    pub phases: Vec<PhaseCount>,
    pub velocity: VelocityReport,
    pub forecast: CompletionForecast,
    pub sla: SlaCompliance,
    pub bottlenecks: Vec<Bottleneck>,
    pub accountability: Vec<EntityAccountability>,
    pub at_risk: Vec<AtRiskProject>,
    pub upcoming_deadlines: Vec<UpcomingDeadline>,
}

impl DashboardSnapshot {
    pub fn compute(
        inputs: DashboardInputs<'_>,
        config: &MetricsConfig,
        now: DateTime<Utc>,
    ) -> Self {
        let projects = inputs.projects;
        Self {
            generated_at: now,
            total_projects: projects.len(),
            completed_projects: completed_project_count(projects),
            risk: derive_risk_distribution(projects, &config.risk),
            averages: compute_averages(projects),
            tasks: compute_task_rollup(projects),
            phases: compute_phase_distribution(projects),
            velocity: compute_velocity(
                inputs.velocity.completed_this_week,
                inputs.velocity.completed_last_week,
            ),
            forecast: predict_completion(projects, config.velocity_per_week, now),
            sla: compute_sla_compliance(projects, now, config.sla_min_completion),
            bottlenecks: compute_bottlenecks(
                inputs.phase_durations,
                config.bottleneck_threshold_days,
            ),
            accountability: compute_accountability(inputs.blockers),
            at_risk: projects_at_risk(projects, &config.risk, config.list_limit),
            upcoming_deadlines: upcoming_deadlines(
                projects,
                now,
                config.deadline_urgent_days,
                config.list_limit,
            ),
        }
    }
}

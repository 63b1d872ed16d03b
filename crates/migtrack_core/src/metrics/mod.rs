//! Derived project analytics.
//!
//! # Responsibility
//! - Compute aggregate and per-project indicators for every dashboard view.
//! - Keep all computations pure: inputs are borrowed, outputs are values.
//!
//! # Invariants
//! - No function panics or yields NaN/Infinity; empty inputs and zero
//!   denominators produce documented neutral values (`0`, `None`).
//! - Percentages round half up to the nearest integer.
//! - "Now" is always an explicit argument.

pub mod bottleneck;
pub mod forecast;
pub mod portfolio;
pub mod sla;
pub mod snapshot;
pub mod urgency;

pub use bottleneck::{compute_bottlenecks, Bottleneck, PhaseDuration};
pub use forecast::{
    compute_velocity, predict_completion, CompletionForecast, VelocityReport, VelocitySample,
};
pub use portfolio::{
    completed_project_count, compute_averages, compute_phase_distribution,
    compute_task_rollup, derive_risk_distribution, projects_at_risk, upcoming_deadlines,
    AtRiskProject, Averages, PhaseCount, RiskDistribution, TaskRollup, UpcomingDeadline,
};
pub use sla::{
    blocker_sla_impact, compute_accountability, compute_sla_compliance, EntityAccountability,
    SlaCompliance, SlaImpact,
};
pub use snapshot::{DashboardInputs, DashboardSnapshot};
pub use urgency::{compute_urgency, compute_urgency_within};

/// `part / whole * 100`, rounded half up; `0` when `whole == 0`.
pub fn percent_of(part: u64, whole: u64) -> u32 {
    if whole == 0 {
        return 0;
    }
    let rounded = (part * 200 + whole) / (whole * 2);
    u32::try_from(rounded).unwrap_or(u32::MAX)
}

/// Integer mean rounded half up; `0` for an empty input.
pub(crate) fn rounded_mean(sum: u64, count: u64) -> u32 {
    if count == 0 {
        return 0;
    }
    let rounded = (sum * 2 + count) / (count * 2);
    u32::try_from(rounded).unwrap_or(u32::MAX)
}

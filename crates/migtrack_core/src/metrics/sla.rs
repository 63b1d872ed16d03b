//! SLA compliance and blocker accountability.

use crate::metrics::{percent_of, rounded_mean};
use crate::model::blocker::Blocker;
use crate::model::days_until;
use crate::model::project::Project;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

const HOURS_PER_DAY: u32 = 24;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SlaCompliance {
    /// `on_time / total * 100`, rounded; `0` for an empty set.
    pub percentage: u32,
    pub on_time: usize,
    pub total: usize,
}

/// Blocked time split into whole days and leftover hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SlaImpact {
    pub days: u32,
    pub hours: u32,
}

/// Delay attributed to one responsible entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityAccountability {
    pub entity_name: String,
    pub blocker_count: usize,
    /// Distinct projects referenced by this entity's blockers.
    pub projects_affected: usize,
    pub total_hours_blocked: u64,
    /// Mean hours blocked per blocker, rounded.
    pub avg_response_hours: u32,
    /// `round(total_hours_blocked / 24)`.
    pub impact_days: u64,
}

/// A project is on time when its deadline is still ahead and it is at least
/// `min_completion` percent complete.
pub fn compute_sla_compliance(
    projects: &[Project],
    now: DateTime<Utc>,
    min_completion: u8,
) -> SlaCompliance {
    let on_time = projects
        .iter()
        .filter(|project| {
            days_until(project.target_end_date, now) > 0
                && project.completion_rate >= min_completion
        })
        .count();
    SlaCompliance {
        percentage: percent_of(on_time as u64, projects.len() as u64),
        on_time,
        total: projects.len(),
    }
}

pub fn blocker_sla_impact(hours_blocked: u32) -> SlaImpact {
    SlaImpact {
        days: hours_blocked / HOURS_PER_DAY,
        hours: hours_blocked % HOURS_PER_DAY,
    }
}

/// Rolls blockers up per responsible entity.
///
/// Sorted by total hours blocked (descending), then entity name. Blockers
/// without a project reference do not count toward `projects_affected`.
pub fn compute_accountability(blockers: &[Blocker]) -> Vec<EntityAccountability> {
    #[derive(Default)]
    struct Accumulator<'a> {
        blocker_count: usize,
        total_hours: u64,
        projects: BTreeSet<&'a str>,
    }

    let mut by_entity: BTreeMap<&str, Accumulator<'_>> = BTreeMap::new();
    for blocker in blockers {
        let entry = by_entity.entry(blocker.entity_name.trim()).or_default();
        entry.blocker_count += 1;
        entry.total_hours += u64::from(blocker.hours_blocked);
        if let Some(project_id) = &blocker.project_id {
            entry.projects.insert(project_id.as_str());
        }
    }

    let mut rollup: Vec<EntityAccountability> = by_entity
        .into_iter()
        .map(|(entity_name, acc)| EntityAccountability {
            entity_name: entity_name.to_string(),
            blocker_count: acc.blocker_count,
            projects_affected: acc.projects.len(),
            total_hours_blocked: acc.total_hours,
            avg_response_hours: rounded_mean(acc.total_hours, acc.blocker_count as u64),
            impact_days: (acc.total_hours + u64::from(HOURS_PER_DAY / 2))
                / u64::from(HOURS_PER_DAY),
        })
        .collect();
    rollup.sort_by(|a, b| {
        b.total_hours_blocked
            .cmp(&a.total_hours_blocked)
            .then_with(|| a.entity_name.cmp(&b.entity_name))
    });
    rollup
}

#[cfg(test)]
mod tests {
    use super::blocker_sla_impact;

    #[test]
    fn impact_splits_days_and_hours() {
        assert_eq!(blocker_sla_impact(96).days, 4);
        assert_eq!(blocker_sla_impact(96).hours, 0);
        assert_eq!(blocker_sla_impact(50).days, 2);
        assert_eq!(blocker_sla_impact(50).hours, 2);
        assert_eq!(blocker_sla_impact(0).days, 0);
    }
}

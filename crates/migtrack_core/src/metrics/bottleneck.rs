//! Phase bottleneck detection.
//!
//! The phase duration table is an input. Each row states how many projects
//! are waiting in a phase and their average time there in days. A live
//! source would aggregate these rows from blocker durations grouped by the
//! blocked project's phase; this module only applies the threshold.

use crate::model::phase::Phase;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseDuration {
    pub phase: Phase,
    pub project_count: u32,
    pub avg_days: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Bottleneck {
    pub phase: Phase,
    pub count: u32,
    pub avg_days: u32,
}

/// Rows whose average duration exceeds `threshold_days`, in input order.
pub fn compute_bottlenecks(table: &[PhaseDuration], threshold_days: u32) -> Vec<Bottleneck> {
    table
        .iter()
        .filter(|row| row.avg_days > threshold_days)
        .map(|row| Bottleneck {
            phase: row.phase,
            count: row.project_count,
            avg_days: row.avg_days,
        })
        .collect()
}

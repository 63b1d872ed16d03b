//! Gantt timeline geometry.
//!
//! Bars are positioned as percentages of a fixed date window. The left edge
//! is clamped at `0`, and the width never runs past the right edge.

use crate::model::ids::ProjectId;
use crate::model::phase::Phase;
use crate::model::project::{Project, RiskLevel, RiskThresholds};
use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;

/// Horizontal placement of one bar, in percent of the window width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BarPosition {
    pub left_pct: f64,
    pub width_pct: f64,
}

/// One project row of the Gantt chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectBar {
    pub project_id: ProjectId,
    pub name: String,
    pub status: Phase,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub risk_level: RiskLevel,
    /// Bar fill, taken from the risk level.
    pub color: &'static str,
    pub completion_rate: u8,
    pub position: BarPosition,
}

/// Inclusive date window rendered by the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Default for TimelineWindow {
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2024, 12, 1).unwrap_or(NaiveDate::MIN),
            end: NaiveDate::from_ymd_opt(2025, 5, 31).unwrap_or(NaiveDate::MAX),
        }
    }
}

impl TimelineWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// First day of each month header, starting at the window's month.
    pub fn months(&self, count: u32) -> Vec<NaiveDate> {
        let Some(first) = self.start.with_day(1) else {
            return Vec::new();
        };
        (0..count)
            .filter_map(|offset| first.checked_add_months(Months::new(offset)))
            .collect()
    }

    /// Bar placement for `[start, end]`; a missing start falls back to the
    /// window start. Degenerate windows yield a zero bar.
    pub fn bar_position(&self, start: Option<NaiveDate>, end: NaiveDate) -> BarPosition {
        let total_days = (self.end - self.start).num_days() as f64;
        if total_days <= 0.0 {
            return BarPosition {
                left_pct: 0.0,
                width_pct: 0.0,
            };
        }
        let start = start.unwrap_or(self.start);
        let offset_days = (start - self.start).num_days() as f64;
        let duration_days = (end - start).num_days() as f64;

        let left = (offset_days / total_days * 100.0).max(0.0);
        let width = duration_days / total_days * 100.0;
        BarPosition {
            left_pct: left,
            width_pct: width.min(100.0 - left).max(0.0),
        }
    }

    /// Gantt rows for `projects`, in input order.
    pub fn project_bars(
        &self,
        projects: &[Project],
        thresholds: &RiskThresholds,
    ) -> Vec<ProjectBar> {
        projects
            .iter()
            .map(|project| {
                let risk_level = project.risk_level(thresholds);
                ProjectBar {
                    project_id: project.id.clone(),
                    name: project.name.clone(),
                    status: project.status,
                    start: project.start_date.unwrap_or(self.start),
                    end: project.target_end_date,
                    risk_level,
                    color: risk_level.color(),
                    completion_rate: project.completion_rate,
                    position: self.bar_position(project.start_date, project.target_end_date),
                }
            })
            .collect()
    }
}

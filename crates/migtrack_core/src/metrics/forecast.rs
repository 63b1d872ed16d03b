//! Throughput trend and completion forecast.

use crate::model::project::Project;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Task completion counts for two consecutive periods.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VelocitySample {
    pub completed_this_week: u32,
    pub completed_last_week: u32,
}

/// Week-over-week task completion trend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VelocityReport {
    /// Tasks completed in the current period.
    pub value: u32,
    pub previous: u32,
    /// Percent change rounded to one decimal; `None` when `previous == 0`.
    pub percent_change: Option<f64>,
}

impl VelocityReport {
    pub fn is_improving(&self) -> bool {
        self.percent_change.is_some_and(|change| change > 0.0)
    }
}

/// Forecast of when all remaining tasks finish at a constant velocity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CompletionForecast {
    /// Sum of `total_tasks - completed_tasks` across projects.
    pub remaining_tasks: u64,
    /// `None` when velocity is not a positive finite number.
    pub weeks: Option<u32>,
    pub date: Option<DateTime<Utc>>,
}

pub fn compute_velocity(current_week: u32, previous_week: u32) -> VelocityReport {
    let percent_change = (previous_week > 0).then(|| {
        let change =
            (f64::from(current_week) - f64::from(previous_week)) / f64::from(previous_week) * 100.0;
        (change * 10.0).round() / 10.0
    });
    VelocityReport {
        value: current_week,
        previous: previous_week,
        percent_change,
    }
}

/// `weeks = ceil(remaining / velocity)`; `date = now + weeks * 7 days`.
pub fn predict_completion(
    projects: &[Project],
    velocity_per_week: f64,
    now: DateTime<Utc>,
) -> CompletionForecast {
    let remaining_tasks: u64 = projects.iter().map(|p| u64::from(p.open_tasks())).sum();
    let mut forecast = CompletionForecast {
        remaining_tasks,
        weeks: None,
        date: None,
    };
    if !velocity_per_week.is_finite() || velocity_per_week <= 0.0 {
        return forecast;
    }

    let weeks = (remaining_tasks as f64 / velocity_per_week).ceil();
    if weeks > f64::from(u32::MAX) {
        return forecast;
    }
    let weeks = weeks as u32;
    forecast.weeks = Some(weeks);
    forecast.date = Duration::try_weeks(i64::from(weeks))
        .and_then(|offset| now.checked_add_signed(offset));
    forecast
}

//! Task urgency derivation.
//!
//! Urgency is recomputed on every read from `(status, planned_end_date, now)`:
//! - `Done` status -> `Done`
//! - `Blocked` status -> `Blocked`
//! - deadline midnight already passed (`days_until <= 0`) -> `Overdue`
//! - `days_until <= risk_window_days` -> `Risk`
//! - otherwise -> `On Track`

use crate::config::DEFAULT_URGENCY_RISK_WINDOW_DAYS;
use crate::model::days_until;
use crate::model::task::{Task, TaskStatus, UrgencyStatus};
use chrono::{DateTime, Utc};

/// Urgency with the default risk window.
pub fn compute_urgency(task: &Task, now: DateTime<Utc>) -> UrgencyStatus {
    compute_urgency_within(task, now, DEFAULT_URGENCY_RISK_WINDOW_DAYS)
}

pub fn compute_urgency_within(
    task: &Task,
    now: DateTime<Utc>,
    risk_window_days: i64,
) -> UrgencyStatus {
    match task.status {
        TaskStatus::Done => UrgencyStatus::Done,
        TaskStatus::Blocked => UrgencyStatus::Blocked,
        TaskStatus::Pending | TaskStatus::InProgress => {
            let days = days_until(task.planned_end_date, now);
            if days <= 0 {
                UrgencyStatus::Overdue
            } else if days <= risk_window_days {
                UrgencyStatus::Risk
            } else {
                UrgencyStatus::OnTrack
            }
        }
    }
}

//! Task domain model.
//!
//! # Responsibility
//! - Define task records scheduled inside project phases.
//! - Provide the urgency vocabulary derived by `metrics::urgency`.
//!
//! # Invariants
//! - Urgency is never stored on a task; it is a function of
//!   `(status, planned_end_date, now)`.
//! - `responsible_person` is meaningful only while `status == Blocked`.

use crate::model::ids::TaskId;
use crate::model::ParseEnumError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Task lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    Blocked,
    Done,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::Pending,
        TaskStatus::InProgress,
        TaskStatus::Blocked,
        TaskStatus::Done,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Blocked => "Blocked",
            Self::Done => "Done",
        }
    }
}

impl Display for TaskStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = ParseEnumError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim();
        TaskStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(normalized))
            .ok_or_else(|| ParseEnumError::new("task status", normalized))
    }
}

/// Derived deadline/blocking label for one task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UrgencyStatus {
    #[serde(rename = "On Track")]
    OnTrack,
    Risk,
    Overdue,
    Blocked,
    Done,
}

impl UrgencyStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OnTrack => "On Track",
            Self::Risk => "Risk",
            Self::Overdue => "Overdue",
            Self::Blocked => "Blocked",
            Self::Done => "Done",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::OnTrack => "#10b981",
            Self::Risk => "#f59e0b",
            Self::Overdue | Self::Blocked => "#ef4444",
            Self::Done => "#6b7280",
        }
    }
}

impl Display for UrgencyStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Priority chosen when a task is created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    High,
    #[default]
    Medium,
    Low,
}

/// Validation errors for task records and creation requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    EmptyId,
    EmptyTitle,
    EmptyAssignee,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "task id cannot be empty"),
            Self::EmptyTitle => write!(f, "task title cannot be empty"),
            Self::EmptyAssignee => write!(f, "task must be assigned to an entity"),
        }
    }
}

impl Error for TaskValidationError {}

/// Unit of work inside a project phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: TaskStatus,
    #[serde(default)]
    pub priority: TaskPriority,
    /// Team or vendor the task is assigned to.
    pub assigned_entity: String,
    pub is_deliverable: bool,
    pub is_blocker: bool,
    pub planned_end_date: NaiveDate,
    /// Person accountable for unblocking.
    #[serde(default)]
    pub responsible_person: Option<String>,
}

impl Task {
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.id.is_blank() {
            return Err(TaskValidationError::EmptyId);
        }
        if self.title.trim().is_empty() {
            return Err(TaskValidationError::EmptyTitle);
        }
        if self.assigned_entity.trim().is_empty() {
            return Err(TaskValidationError::EmptyAssignee);
        }
        Ok(())
    }

    /// Marks the task blocked and records who must unblock it.
    pub fn mark_blocked(&mut self, responsible_person: impl Into<String>) {
        self.status = TaskStatus::Blocked;
        self.responsible_person = Some(responsible_person.into());
    }

    /// Sets `status`; leaving `Blocked` clears the responsible person.
    pub fn set_status(&mut self, status: TaskStatus) {
        self.status = status;
        if status != TaskStatus::Blocked {
            self.responsible_person = None;
        }
    }
}

/// Creation request for a task; mirrors the create-task form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub assigned_to: String,
    pub planned_end_date: NaiveDate,
    pub is_deliverable: bool,
    pub is_blocker: bool,
    pub priority: TaskPriority,
}

impl NewTask {
    /// Builds a `Pending` task with a generated id.
    ///
    /// # Errors
    /// - `EmptyTitle` / `EmptyAssignee` when required fields are blank.
    pub fn into_task(self) -> Result<Task, TaskValidationError> {
        let task = Task {
            id: TaskId::generate(),
            title: self.title.trim().to_string(),
            description: self.description,
            status: TaskStatus::Pending,
            priority: self.priority,
            assigned_entity: self.assigned_to.trim().to_string(),
            is_deliverable: self.is_deliverable,
            is_blocker: self.is_blocker,
            planned_end_date: self.planned_end_date,
            responsible_person: None,
        };
        task.validate()?;
        Ok(task)
    }
}

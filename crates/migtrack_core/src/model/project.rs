//! Project domain model.
//!
//! # Responsibility
//! - Define the project record rendered by board, timeline and dashboard.
//! - Derive the categorical risk level from the health score at read time.
//!
//! # Invariants
//! - `completed_tasks <= total_tasks`.
//! - `blocked_tasks <= total_tasks - completed_tasks`.
//! - `completion_rate` and `health_score` are within `0..=100`.
//! - Deserialization runs `Project::validate()`.

use crate::model::ids::ProjectId;
use crate::model::phase::Phase;
use crate::model::ParseEnumError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Categorical health indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Healthy,
    Warning,
    Critical,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 3] = [RiskLevel::Healthy, RiskLevel::Warning, RiskLevel::Critical];

    /// Classifies a health score against the given thresholds.
    pub fn from_health_score(score: u8, thresholds: &RiskThresholds) -> Self {
        if score >= thresholds.healthy_min {
            Self::Healthy
        } else if score >= thresholds.warning_min {
            Self::Warning
        } else {
            Self::Critical
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Healthy => "HEALTHY",
            Self::Warning => "WARNING",
            Self::Critical => "CRITICAL",
        }
    }

    /// Bar/badge colour used by every view.
    pub fn color(self) -> &'static str {
        match self {
            Self::Healthy => "#10b981",
            Self::Warning => "#f59e0b",
            Self::Critical => "#ef4444",
        }
    }

    /// Whether this level belongs in the at-risk list.
    pub fn needs_attention(self) -> bool {
        self != Self::Healthy
    }
}

impl Display for RiskLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = ParseEnumError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim();
        RiskLevel::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(normalized))
            .ok_or_else(|| ParseEnumError::new("risk level", normalized))
    }
}

/// Minimum health scores for each non-critical risk level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskThresholds {
    /// Scores at or above this value are `HEALTHY`.
    pub healthy_min: u8,
    /// Scores at or above this value (and below `healthy_min`) are `WARNING`.
    pub warning_min: u8,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            healthy_min: 70,
            warning_min: 50,
        }
    }
}

/// Validation errors for project records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectValidationError {
    EmptyId,
    EmptyName,
    CompletedExceedsTotal { completed: u32, total: u32 },
    BlockedExceedsOpen { blocked: u32, open: u32 },
    CompletionRateOutOfRange(u8),
    HealthScoreOutOfRange(u8),
}

impl Display for ProjectValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "project id cannot be empty"),
            Self::EmptyName => write!(f, "project name cannot be empty"),
            Self::CompletedExceedsTotal { completed, total } => write!(
                f,
                "completed_tasks ({completed}) must be <= total_tasks ({total})"
            ),
            Self::BlockedExceedsOpen { blocked, open } => write!(
                f,
                "blocked_tasks ({blocked}) must be <= open tasks ({open})"
            ),
            Self::CompletionRateOutOfRange(value) => {
                write!(f, "completion_rate ({value}) must be within 0..=100")
            }
            Self::HealthScoreOutOfRange(value) => {
                write!(f, "health_score ({value}) must be within 0..=100")
            }
        }
    }
}

impl Error for ProjectValidationError {}

/// Migration project tracked on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ProjectRecord")]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub description: String,
    /// Current workflow phase (kanban column).
    pub status: Phase,
    /// Percent complete, `0..=100`.
    pub completion_rate: u8,
    pub total_tasks: u32,
    pub completed_tasks: u32,
    pub blocked_tasks: u32,
    pub target_end_date: NaiveDate,
    /// Timeline bar start; views fall back to the timeline window start.
    pub start_date: Option<NaiveDate>,
    /// Composite wellness score, `0..=100`.
    pub health_score: u8,
    pub project_manager: String,
    pub has_deliverables: bool,
}

/// Unvalidated wire shape; accepts the legacy `app_name` key.
#[derive(Deserialize)]
struct ProjectRecord {
    id: ProjectId,
    #[serde(alias = "app_name")]
    name: String,
    #[serde(default)]
    description: String,
    status: Phase,
    completion_rate: u8,
    total_tasks: u32,
    completed_tasks: u32,
    blocked_tasks: u32,
    target_end_date: NaiveDate,
    #[serde(default)]
    start_date: Option<NaiveDate>,
    health_score: u8,
    project_manager: String,
    #[serde(default)]
    has_deliverables: bool,
}

impl TryFrom<ProjectRecord> for Project {
    type Error = ProjectValidationError;

    fn try_from(record: ProjectRecord) -> Result<Self, Self::Error> {
        let project = Self {
            id: record.id,
            name: record.name,
            description: record.description,
            status: record.status,
            completion_rate: record.completion_rate,
            total_tasks: record.total_tasks,
            completed_tasks: record.completed_tasks,
            blocked_tasks: record.blocked_tasks,
            target_end_date: record.target_end_date,
            start_date: record.start_date,
            health_score: record.health_score,
            project_manager: record.project_manager,
            has_deliverables: record.has_deliverables,
        };
        project.validate()?;
        Ok(project)
    }
}

impl Project {
    /// Checks count and range invariants.
    pub fn validate(&self) -> Result<(), ProjectValidationError> {
        if self.id.is_blank() {
            return Err(ProjectValidationError::EmptyId);
        }
        if self.name.trim().is_empty() {
            return Err(ProjectValidationError::EmptyName);
        }
        if self.completed_tasks > self.total_tasks {
            return Err(ProjectValidationError::CompletedExceedsTotal {
                completed: self.completed_tasks,
                total: self.total_tasks,
            });
        }
        let open = self.open_tasks();
        if self.blocked_tasks > open {
            return Err(ProjectValidationError::BlockedExceedsOpen {
                blocked: self.blocked_tasks,
                open,
            });
        }
        if self.completion_rate > 100 {
            return Err(ProjectValidationError::CompletionRateOutOfRange(
                self.completion_rate,
            ));
        }
        if self.health_score > 100 {
            return Err(ProjectValidationError::HealthScoreOutOfRange(
                self.health_score,
            ));
        }
        Ok(())
    }

    /// Tasks not yet completed. Saturates for unvalidated records.
    pub fn open_tasks(&self) -> u32 {
        self.total_tasks.saturating_sub(self.completed_tasks)
    }

    /// Risk level derived from `health_score`.
    pub fn risk_level(&self, thresholds: &RiskThresholds) -> RiskLevel {
        RiskLevel::from_health_score(self.health_score, thresholds)
    }
}

#[cfg(test)]
mod tests {
    use super::{RiskLevel, RiskThresholds};

    #[test]
    fn default_thresholds_classify_boundaries() {
        let thresholds = RiskThresholds::default();
        assert_eq!(RiskLevel::from_health_score(70, &thresholds), RiskLevel::Healthy);
        assert_eq!(RiskLevel::from_health_score(69, &thresholds), RiskLevel::Warning);
        assert_eq!(RiskLevel::from_health_score(50, &thresholds), RiskLevel::Warning);
        assert_eq!(RiskLevel::from_health_score(49, &thresholds), RiskLevel::Critical);
        assert_eq!(RiskLevel::from_health_score(0, &thresholds), RiskLevel::Critical);
    }

    #[test]
    fn risk_level_parses_wire_names() {
        assert_eq!("warning".parse::<RiskLevel>().unwrap(), RiskLevel::Warning);
        assert!("OK".parse::<RiskLevel>().is_err());
    }

    #[test]
    fn risk_colors_follow_severity() {
        let colors: Vec<&str> = RiskLevel::ALL.into_iter().map(RiskLevel::color).collect();
        assert_eq!(colors, vec!["#10b981", "#f59e0b", "#ef4444"]);
    }
}

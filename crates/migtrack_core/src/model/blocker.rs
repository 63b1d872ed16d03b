//! Blocker records attributing task delay to a responsible party.
//!
//! # Invariants
//! - `hours_blocked` is accumulated whole hours; it never decreases.
//! - `reason`, `entity_name` and `responsible_person` are non-empty.
//! - `estimated_resolution` is advisory; it never changes `hours_blocked`.

use crate::model::days_until;
use crate::model::ids::{BlockerId, ProjectId, TaskId};
use crate::model::ParseEnumError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Business impact declared when the blocker is registered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl ImpactLevel {
    pub const ALL: [ImpactLevel; 3] = [ImpactLevel::Low, ImpactLevel::Medium, ImpactLevel::High];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl Display for ImpactLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImpactLevel {
    type Err = ParseEnumError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim();
        ImpactLevel::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(normalized))
            .ok_or_else(|| ParseEnumError::new("impact level", normalized))
    }
}

/// Validation errors for blocker registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockerValidationError {
    EmptyReason,
    EmptyEntity,
    EmptyResponsiblePerson,
}

impl Display for BlockerValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyReason => write!(f, "blocker reason cannot be empty"),
            Self::EmptyEntity => write!(f, "blocker responsible entity cannot be empty"),
            Self::EmptyResponsiblePerson => {
                write!(f, "blocker responsible person cannot be empty")
            }
        }
    }
}

impl Error for BlockerValidationError {}

/// Recorded impediment on one task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blocker {
    pub id: BlockerId,
    pub task_id: Option<TaskId>,
    pub task_title: String,
    /// Project whose schedule absorbs the delay.
    pub project_id: Option<ProjectId>,
    pub reason: String,
    pub responsible_person: String,
    /// Vendor or team accountable for the delay.
    pub entity_name: String,
    pub start_time: DateTime<Utc>,
    pub hours_blocked: u32,
    /// Date the responsible party committed to.
    #[serde(default)]
    pub estimated_resolution: Option<NaiveDate>,
    #[serde(default)]
    pub impact: ImpactLevel,
}

impl Blocker {
    pub fn validate(&self) -> Result<(), BlockerValidationError> {
        if self.reason.trim().is_empty() {
            return Err(BlockerValidationError::EmptyReason);
        }
        if self.entity_name.trim().is_empty() {
            return Err(BlockerValidationError::EmptyEntity);
        }
        if self.responsible_person.trim().is_empty() {
            return Err(BlockerValidationError::EmptyResponsiblePerson);
        }
        Ok(())
    }

    /// Hours blocked as of `now`, never less than the recorded total.
    pub fn hours_blocked_at(&self, now: DateTime<Utc>) -> u32 {
        let elapsed = (now - self.start_time).num_hours().max(0);
        let elapsed = u32::try_from(elapsed).unwrap_or(u32::MAX);
        elapsed.max(self.hours_blocked)
    }

    /// Copy with `hours_blocked` advanced to `now`.
    pub fn at(&self, now: DateTime<Utc>) -> Self {
        Self {
            hours_blocked: self.hours_blocked_at(now),
            ..self.clone()
        }
    }

    /// Whether the committed resolution date has already passed.
    pub fn is_past_estimate(&self, now: DateTime<Utc>) -> bool {
        self.estimated_resolution
            .is_some_and(|date| days_until(date, now) <= 0)
    }
}

/// Registration request for a new blocker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBlocker {
    pub reason: String,
    pub responsible_entity: String,
    pub responsible_person: String,
    pub estimated_resolution: Option<NaiveDate>,
    pub impact: ImpactLevel,
}

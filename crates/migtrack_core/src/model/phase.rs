//! Migration workflow phases.
//!
//! # Invariants
//! - `Phase::ALL` is ordered by `position()`; positions start at 1.
//! - Any phase may follow any other; no transition rules are encoded here.

use crate::model::task::{Task, TaskStatus};
use crate::model::ParseEnumError;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Fixed ordered stage of the migration workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Phase {
    Discovery,
    Design,
    Development,
    Testing,
    #[serde(rename = "UAT")]
    Uat,
    #[serde(rename = "Pre-Production")]
    PreProduction,
    Production,
}

impl Phase {
    /// Every phase in workflow order.
    pub const ALL: [Phase; 7] = [
        Phase::Discovery,
        Phase::Design,
        Phase::Development,
        Phase::Testing,
        Phase::Uat,
        Phase::PreProduction,
        Phase::Production,
    ];

    /// Display name, also used as the wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Discovery => "Discovery",
            Self::Design => "Design",
            Self::Development => "Development",
            Self::Testing => "Testing",
            Self::Uat => "UAT",
            Self::PreProduction => "Pre-Production",
            Self::Production => "Production",
        }
    }

    /// 1-based position in the workflow.
    pub fn position(self) -> u8 {
        match self {
            Self::Discovery => 1,
            Self::Design => 2,
            Self::Development => 3,
            Self::Testing => 4,
            Self::Uat => 5,
            Self::PreProduction => 6,
            Self::Production => 7,
        }
    }

    /// Column accent colour.
    pub fn color(self) -> &'static str {
        match self {
            Self::Discovery => "#3B82F6",
            Self::Design => "#8B5CF6",
            Self::Development => "#10B981",
            Self::Testing => "#F59E0B",
            Self::Uat => "#EC4899",
            Self::PreProduction => "#6366F1",
            Self::Production => "#10B981",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Discovery => "🔍",
            Self::Design => "🎨",
            Self::Development => "⚙️",
            Self::Testing => "🧪",
            Self::Uat => "✅",
            Self::PreProduction => "🚀",
            Self::Production => "✨",
        }
    }

    /// Whether a project in this phase counts as delivered.
    pub fn is_terminal(self) -> bool {
        self == Self::Production
    }
}

impl Display for Phase {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Phase {
    type Err = ParseEnumError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim();
        Phase::ALL
            .into_iter()
            .find(|phase| phase.as_str().eq_ignore_ascii_case(normalized))
            .ok_or_else(|| ParseEnumError::new("phase", normalized))
    }
}

/// Phase record inside one project plan, with the tasks scheduled in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhasePlan {
    pub id: String,
    pub phase: Phase,
    pub order_index: u8,
    pub tasks: Vec<Task>,
}

/// Done/total task progress for one phase plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PhaseProgress {
    pub done: usize,
    pub total: usize,
    /// Rounded percentage; `0` for an empty phase.
    pub percent: u8,
}

impl PhasePlan {
    pub fn new(id: impl Into<String>, phase: Phase, tasks: Vec<Task>) -> Self {
        Self {
            id: id.into(),
            phase,
            order_index: phase.position(),
            tasks,
        }
    }

    pub fn progress(&self) -> PhaseProgress {
        let total = self.tasks.len();
        let done = self
            .tasks
            .iter()
            .filter(|task| task.status == TaskStatus::Done)
            .count();
        let percent = if total == 0 {
            0
        } else {
            ((done * 200 + total) / (total * 2)) as u8
        };
        PhaseProgress {
            done,
            total,
            percent,
        }
    }
}

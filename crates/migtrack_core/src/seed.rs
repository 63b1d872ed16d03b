//! Reference dataset.
//!
//! # Responsibility
//! - Load the bundled sample portfolio used by the CLI and tests.
//! - Resolve phase plans to task records by id.
//!
//! # Invariants
//! - Every record passes its model validation before it is returned.
//! - Phase plans reference only tasks present in the dataset.

use crate::metrics::bottleneck::PhaseDuration;
use crate::metrics::forecast::VelocitySample;
use crate::model::blocker::{Blocker, BlockerValidationError};
use crate::model::comment::{ActivityEntry, Comment, CommentValidationError};
use crate::model::ids::TaskId;
use crate::model::phase::{Phase, PhasePlan};
use crate::model::project::Project;
use crate::model::task::{Task, TaskValidationError};
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

const REFERENCE_DATASET_JSON: &str = include_str!("../data/reference_dataset.json");

/// Fully resolved dataset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub projects: Vec<Project>,
    pub tasks: Vec<Task>,
    pub phases: Vec<PhasePlan>,
    pub blockers: Vec<Blocker>,
    pub phase_durations: Vec<PhaseDuration>,
    pub velocity: VelocitySample,
    pub comments: Vec<Comment>,
    pub activity: Vec<ActivityEntry>,
}

#[derive(Deserialize)]
struct DatasetRecord {
    projects: Vec<Project>,
    tasks: Vec<Task>,
    phases: Vec<PhasePlanRecord>,
    blockers: Vec<Blocker>,
    phase_durations: Vec<PhaseDuration>,
    velocity: VelocitySample,
    #[serde(default)]
    comments: Vec<Comment>,
    #[serde(default)]
    activity: Vec<ActivityEntry>,
}

#[derive(Deserialize)]
struct PhasePlanRecord {
    id: String,
    phase: Phase,
    task_ids: Vec<TaskId>,
}

#[derive(Debug)]
pub enum SeedError {
    Parse(serde_json::Error),
    InvalidTask(TaskValidationError),
    InvalidBlocker(BlockerValidationError),
    InvalidComment(CommentValidationError),
    UnknownTask { phase_id: String, task_id: TaskId },
}

impl Display for SeedError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid dataset: {err}"),
            Self::InvalidTask(err) => write!(f, "invalid dataset task: {err}"),
            Self::InvalidBlocker(err) => write!(f, "invalid dataset blocker: {err}"),
            Self::InvalidComment(err) => write!(f, "invalid dataset comment: {err}"),
            Self::UnknownTask { phase_id, task_id } => {
                write!(f, "phase `{phase_id}` references unknown task `{task_id}`")
            }
        }
    }
}

impl Error for SeedError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::InvalidTask(err) => Some(err),
            Self::InvalidBlocker(err) => Some(err),
            Self::InvalidComment(err) => Some(err),
            Self::UnknownTask { .. } => None,
        }
    }
}

impl From<serde_json::Error> for SeedError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

impl From<TaskValidationError> for SeedError {
    fn from(value: TaskValidationError) -> Self {
        Self::InvalidTask(value)
    }
}

impl From<BlockerValidationError> for SeedError {
    fn from(value: BlockerValidationError) -> Self {
        Self::InvalidBlocker(value)
    }
}

impl From<CommentValidationError> for SeedError {
    fn from(value: CommentValidationError) -> Self {
        Self::InvalidComment(value)
    }
}

/// Loads the bundled sample portfolio.
pub fn reference_dataset() -> Result<Dataset, SeedError> {
    load_dataset(REFERENCE_DATASET_JSON)
}

/// Parses and validates a dataset document.
///
/// Project records validate during deserialization; tasks, blockers and
/// comments are validated after parsing. `comments` and `activity` may be
/// omitted.
pub fn load_dataset(json: &str) -> Result<Dataset, SeedError> {
    let record: DatasetRecord = serde_json::from_str(json)?;
    for task in &record.tasks {
        task.validate()?;
    }
    for blocker in &record.blockers {
        blocker.validate()?;
    }
    for comment in &record.comments {
        comment.validate()?;
    }

    let mut phases = Vec::with_capacity(record.phases.len());
    for plan in record.phases {
        let mut tasks = Vec::with_capacity(plan.task_ids.len());
        for task_id in plan.task_ids {
            let Some(task) = record.tasks.iter().find(|task| task.id == task_id) else {
                return Err(SeedError::UnknownTask {
                    phase_id: plan.id,
                    task_id,
                });
            };
            tasks.push(task.clone());
        }
        phases.push(PhasePlan::new(plan.id, plan.phase, tasks));
    }

    Ok(Dataset {
        projects: record.projects,
        tasks: record.tasks,
        phases,
        blockers: record.blockers,
        phase_durations: record.phase_durations,
        velocity: record.velocity,
        comments: record.comments,
        activity: record.activity,
    })
}

#[cfg(test)]
mod tests {
    use super::{load_dataset, reference_dataset, SeedError};
    use crate::model::blocker::ImpactLevel;

    #[test]
    fn reference_dataset_loads() {
        let dataset = reference_dataset().expect("bundled dataset should be valid");
        assert_eq!(dataset.projects.len(), 10);
        assert_eq!(dataset.tasks.len(), 6);
        assert_eq!(dataset.phases.len(), 3);
        assert_eq!(dataset.blockers.len(), 3);
        assert_eq!(dataset.phase_durations.len(), 3);
        assert_eq!(dataset.comments.len(), 1);
        assert_eq!(dataset.comments[0].thread_len(), 2);
        assert_eq!(dataset.activity.len(), 2);
    }

    #[test]
    fn blocker_form_fields_default_when_absent() {
        let dataset = reference_dataset().expect("bundled dataset should be valid");
        for blocker in &dataset.blockers {
            assert_eq!(blocker.impact, ImpactLevel::Medium);
            assert_eq!(blocker.estimated_resolution, None);
        }
    }

    #[test]
    fn unknown_phase_task_is_rejected() {
        let json = r#"{
            "projects": [],
            "tasks": [],
            "phases": [{ "id": "p1", "phase": "Design", "task_ids": ["t9"] }],
            "blockers": [],
            "phase_durations": [],
            "velocity": { "completed_this_week": 0, "completed_last_week": 0 }
        }"#;
        let err = load_dataset(json).unwrap_err();
        assert!(matches!(err, SeedError::UnknownTask { .. }));
        assert!(err.to_string().contains("t9"));
    }

    #[test]
    fn blank_comment_is_rejected() {
        let json = r#"{
            "projects": [],
            "tasks": [],
            "phases": [],
            "blockers": [],
            "phase_durations": [],
            "velocity": { "completed_this_week": 0, "completed_last_week": 0 },
            "comments": [{
                "id": "c1", "task_id": "t1", "author": "Ana", "content": "  ",
                "created_at": "2025-01-10T10:30:00Z"
            }]
        }"#;
        let err = load_dataset(json).unwrap_err();
        assert!(matches!(err, SeedError::InvalidComment(_)));
    }
}

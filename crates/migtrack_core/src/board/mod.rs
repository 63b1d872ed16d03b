//! Kanban board state.
//!
//! # Responsibility
//! - Group projects into one column per workflow phase.
//! - Apply drag-and-drop moves and view filters to caller-owned state.
//!
//! # Invariants
//! - Every project lives in exactly one column and `project.status` equals
//!   that column's phase.
//! - Any phase may move to any other phase; there are no transition rules.
//! - Column order is input order until a project is moved.

mod filter;

pub use filter::BoardFilter;

use crate::model::ids::ProjectId;
use crate::model::phase::Phase;
use crate::model::project::{Project, ProjectValidationError, RiskLevel, RiskThresholds};
use log::info;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    ProjectNotFound(ProjectId),
    Validation(ProjectValidationError),
}

impl Display for BoardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ProjectNotFound(id) => write!(f, "project not found on board: {id}"),
            Self::Validation(err) => write!(f, "{err}"),
        }
    }
}

impl Error for BoardError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::ProjectNotFound(_) => None,
        }
    }
}

impl From<ProjectValidationError> for BoardError {
    fn from(value: ProjectValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Result of a move request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved { from: Phase, to: Phase, index: usize },
    /// Source and destination column were the same.
    Unchanged,
}

/// Header counters for the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoardTotals {
    pub total: usize,
    pub critical: usize,
    pub completed: usize,
}

/// Projects grouped per phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectBoard {
    columns: BTreeMap<Phase, Vec<Project>>,
    thresholds: RiskThresholds,
}

impl ProjectBoard {
    /// Groups validated projects by `status`, preserving input order.
    ///
    /// # Errors
    /// - `Validation` when any project violates its invariants.
    pub fn from_projects(
        projects: Vec<Project>,
        thresholds: RiskThresholds,
    ) -> Result<Self, BoardError> {
        let mut columns: BTreeMap<Phase, Vec<Project>> =
            Phase::ALL.into_iter().map(|phase| (phase, Vec::new())).collect();
        for project in projects {
            project.validate()?;
            columns.entry(project.status).or_default().push(project);
        }
        Ok(Self {
            columns,
            thresholds,
        })
    }

    pub fn column(&self, phase: Phase) -> &[Project] {
        self.columns.get(&phase).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All projects in phase order, then column order.
    pub fn projects(&self) -> impl Iterator<Item = &Project> {
        self.columns.values().flatten()
    }

    pub fn into_projects(self) -> Vec<Project> {
        self.columns.into_values().flatten().collect()
    }

    pub fn get(&self, id: &ProjectId) -> Option<&Project> {
        self.projects().find(|project| &project.id == id)
    }

    /// Moves a project into `to` at `index` (clamped to the column length).
    ///
    /// Moving within the same column leaves the board untouched.
    pub fn move_project(
        &mut self,
        id: &ProjectId,
        to: Phase,
        index: usize,
    ) -> Result<MoveOutcome, BoardError> {
        let (from, position) = self
            .locate(id)
            .ok_or_else(|| BoardError::ProjectNotFound(id.clone()))?;
        if from == to {
            return Ok(MoveOutcome::Unchanged);
        }

        let mut project = match self.columns.get_mut(&from) {
            Some(column) => column.remove(position),
            None => return Err(BoardError::ProjectNotFound(id.clone())),
        };
        project.status = to;

        let destination = self.columns.entry(to).or_default();
        let index = index.min(destination.len());
        destination.insert(index, project);

        info!(
            "event=board_move module=board status=ok project_id={} from={} to={} index={}",
            id, from, to, index
        );
        Ok(MoveOutcome::Moved { from, to, index })
    }

    /// Columns restricted to projects matching `filter`; every phase is
    /// present, possibly empty.
    pub fn filtered(&self, filter: &BoardFilter) -> BTreeMap<Phase, Vec<&Project>> {
        self.columns
            .iter()
            .map(|(phase, projects)| {
                let matching = projects
                    .iter()
                    .filter(|project| filter.matches(project, &self.thresholds))
                    .collect();
                (*phase, matching)
            })
            .collect()
    }

    /// Sorted, de-duplicated manager names for the filter picker.
    pub fn project_managers(&self) -> Vec<String> {
        self.projects()
            .map(|project| project.project_manager.trim())
            .filter(|name| !name.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    pub fn totals(&self) -> BoardTotals {
        BoardTotals {
            total: self.projects().count(),
            critical: self
                .projects()
                .filter(|p| p.risk_level(&self.thresholds) == RiskLevel::Critical)
                .count(),
            completed: self.column(Phase::Production).len(),
        }
    }

    fn locate(&self, id: &ProjectId) -> Option<(Phase, usize)> {
        self.columns.iter().find_map(|(phase, projects)| {
            projects
                .iter()
                .position(|project| &project.id == id)
                .map(|index| (*phase, index))
        })
    }
}

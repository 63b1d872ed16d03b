//! Tracker repository contract and in-memory implementation.
//!
//! # Responsibility
//! - Serve projects, tasks, phase plans and blockers to services.
//! - Hold session-scoped mutations (tasks, blockers, comments) in memory only.
//!
//! # Invariants
//! - Nothing is persisted; dropping the repository discards all changes.
//! - Stored tasks, blockers and comments always pass their `validate()`.
//! - Task ids are unique.

use crate::metrics::bottleneck::PhaseDuration;
use crate::metrics::forecast::VelocitySample;
use crate::model::blocker::{Blocker, BlockerValidationError};
use crate::model::comment::{ActivityEntry, Comment, CommentValidationError};
use crate::model::ids::{CommentId, ProjectId, TaskId};
use crate::model::phase::PhasePlan;
use crate::model::project::{Project, ProjectValidationError};
use crate::model::task::{Task, TaskValidationError};
use crate::seed::{reference_dataset, Dataset, SeedError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug)]
pub enum RepoError {
    ProjectNotFound(ProjectId),
    TaskNotFound(TaskId),
    CommentNotFound(CommentId),
    DuplicateTask(TaskId),
    InvalidProject(ProjectValidationError),
    InvalidTask(TaskValidationError),
    InvalidBlocker(BlockerValidationError),
    InvalidComment(CommentValidationError),
    Seed(SeedError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ProjectNotFound(id) => write!(f, "project not found: {id}"),
            Self::TaskNotFound(id) => write!(f, "task not found: {id}"),
            Self::CommentNotFound(id) => write!(f, "comment not found: {id}"),
            Self::DuplicateTask(id) => write!(f, "task already exists: {id}"),
            Self::InvalidProject(err) => write!(f, "{err}"),
            Self::InvalidTask(err) => write!(f, "{err}"),
            Self::InvalidBlocker(err) => write!(f, "{err}"),
            Self::InvalidComment(err) => write!(f, "{err}"),
            Self::Seed(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidProject(err) => Some(err),
            Self::InvalidTask(err) => Some(err),
            Self::InvalidBlocker(err) => Some(err),
            Self::InvalidComment(err) => Some(err),
            Self::Seed(err) => Some(err),
            Self::ProjectNotFound(_)
            | Self::TaskNotFound(_)
            | Self::CommentNotFound(_)
            | Self::DuplicateTask(_) => None,
        }
    }
}

impl From<ProjectValidationError> for RepoError {
    fn from(value: ProjectValidationError) -> Self {
        Self::InvalidProject(value)
    }
}

impl From<TaskValidationError> for RepoError {
    fn from(value: TaskValidationError) -> Self {
        Self::InvalidTask(value)
    }
}

impl From<BlockerValidationError> for RepoError {
    fn from(value: BlockerValidationError) -> Self {
        Self::InvalidBlocker(value)
    }
}

impl From<CommentValidationError> for RepoError {
    fn from(value: CommentValidationError) -> Self {
        Self::InvalidComment(value)
    }
}

impl From<SeedError> for RepoError {
    fn from(value: SeedError) -> Self {
        Self::Seed(value)
    }
}

/// Data access contract for tracker views and services.
pub trait TrackerRepository {
    fn list_projects(&self) -> RepoResult<Vec<Project>>;
    fn get_project(&self, id: &ProjectId) -> RepoResult<Option<Project>>;
    fn list_tasks(&self) -> RepoResult<Vec<Task>>;
    fn get_task(&self, id: &TaskId) -> RepoResult<Option<Task>>;
    fn list_phases(&self) -> RepoResult<Vec<PhasePlan>>;
    fn list_blockers(&self) -> RepoResult<Vec<Blocker>>;
    fn list_phase_durations(&self) -> RepoResult<Vec<PhaseDuration>>;
    fn velocity_sample(&self) -> RepoResult<VelocitySample>;
    fn insert_task(&mut self, task: Task) -> RepoResult<TaskId>;
    fn update_task(&mut self, task: Task) -> RepoResult<()>;
    fn insert_blocker(&mut self, blocker: Blocker) -> RepoResult<()>;
    /// Top-level comments on `task_id`, oldest first, replies nested.
    fn list_comments(&self, task_id: &TaskId) -> RepoResult<Vec<Comment>>;
    fn insert_comment(&mut self, comment: Comment) -> RepoResult<()>;
    /// Appends `reply` to the thread holding `parent_id`; returns the thread.
    fn add_reply(&mut self, parent_id: &CommentId, reply: Comment) -> RepoResult<Comment>;
    /// Increments the like counter of a comment or reply; returns the new count.
    fn like_comment(&mut self, id: &CommentId) -> RepoResult<u32>;
    fn list_activity(&self) -> RepoResult<Vec<ActivityEntry>>;
    fn record_activity(&mut self, entry: ActivityEntry) -> RepoResult<()>;
}

/// Session-scoped repository backed by owned vectors.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTrackerRepository {
    dataset: Dataset,
}

impl InMemoryTrackerRepository {
    /// Validates every project and wraps the dataset.
    pub fn new(dataset: Dataset) -> RepoResult<Self> {
        for project in &dataset.projects {
            project.validate()?;
        }
        Ok(Self { dataset })
    }

    /// Repository over the bundled reference dataset.
    pub fn seeded() -> RepoResult<Self> {
        Self::new(reference_dataset()?)
    }
}

impl TrackerRepository for InMemoryTrackerRepository {
    fn list_projects(&self) -> RepoResult<Vec<Project>> {
        Ok(self.dataset.projects.clone())
    }

    fn get_project(&self, id: &ProjectId) -> RepoResult<Option<Project>> {
        Ok(self.dataset.projects.iter().find(|p| &p.id == id).cloned())
    }

    fn list_tasks(&self) -> RepoResult<Vec<Task>> {
        Ok(self.dataset.tasks.clone())
    }

    fn get_task(&self, id: &TaskId) -> RepoResult<Option<Task>> {
        Ok(self.dataset.tasks.iter().find(|t| &t.id == id).cloned())
    }

    fn list_phases(&self) -> RepoResult<Vec<PhasePlan>> {
        Ok(self.dataset.phases.clone())
    }

    fn list_blockers(&self) -> RepoResult<Vec<Blocker>> {
        Ok(self.dataset.blockers.clone())
    }

    fn list_phase_durations(&self) -> RepoResult<Vec<PhaseDuration>> {
        Ok(self.dataset.phase_durations.clone())
    }

    fn velocity_sample(&self) -> RepoResult<VelocitySample> {
        Ok(self.dataset.velocity)
    }

    fn insert_task(&mut self, task: Task) -> RepoResult<TaskId> {
        task.validate()?;
        if self.dataset.tasks.iter().any(|t| t.id == task.id) {
            return Err(RepoError::DuplicateTask(task.id));
        }
        let id = task.id.clone();
        self.dataset.tasks.push(task);
        Ok(id)
    }

    /// Replaces the task and every phase-plan copy of it.
    fn update_task(&mut self, task: Task) -> RepoResult<()> {
        task.validate()?;
        let Some(slot) = self.dataset.tasks.iter_mut().find(|t| t.id == task.id) else {
            return Err(RepoError::TaskNotFound(task.id));
        };
        *slot = task.clone();
        for plan in &mut self.dataset.phases {
            for planned in plan.tasks.iter_mut().filter(|t| t.id == task.id) {
                *planned = task.clone();
            }
        }
        Ok(())
    }

    fn insert_blocker(&mut self, blocker: Blocker) -> RepoResult<()> {
        blocker.validate()?;
        self.dataset.blockers.push(blocker);
        Ok(())
    }

    fn list_comments(&self, task_id: &TaskId) -> RepoResult<Vec<Comment>> {
        Ok(self
            .dataset
            .comments
            .iter()
            .filter(|c| &c.task_id == task_id)
            .cloned()
            .collect())
    }

    fn insert_comment(&mut self, comment: Comment) -> RepoResult<()> {
        comment.validate()?;
        self.dataset.comments.push(comment);
        Ok(())
    }

    fn add_reply(&mut self, parent_id: &CommentId, reply: Comment) -> RepoResult<Comment> {
        reply.validate()?;
        if !reply.replies.is_empty() {
            return Err(CommentValidationError::NestedReply(reply.id).into());
        }
        let Some(thread) = self
            .dataset
            .comments
            .iter_mut()
            .find(|c| &c.id == parent_id || c.replies.iter().any(|r| &r.id == parent_id))
        else {
            return Err(RepoError::CommentNotFound(parent_id.clone()));
        };
        thread.replies.push(reply);
        Ok(thread.clone())
    }

    fn like_comment(&mut self, id: &CommentId) -> RepoResult<u32> {
        let target = self.dataset.comments.iter_mut().find_map(|thread| {
            if &thread.id == id {
                Some(thread)
            } else {
                thread.replies.iter_mut().find(|r| &r.id == id)
            }
        });
        let Some(comment) = target else {
            return Err(RepoError::CommentNotFound(id.clone()));
        };
        comment.likes = comment.likes.saturating_add(1);
        Ok(comment.likes)
    }

    fn list_activity(&self) -> RepoResult<Vec<ActivityEntry>> {
        Ok(self.dataset.activity.clone())
    }

    fn record_activity(&mut self, entry: ActivityEntry) -> RepoResult<()> {
        self.dataset.activity.push(entry);
        Ok(())
    }
}

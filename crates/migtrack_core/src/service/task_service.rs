//! Task and blocker use-case service.
//!
//! # Responsibility
//! - Create tasks from form requests.
//! - Register blockers and flip the affected task to `Blocked`.
//! - Post, reply to and like task comments.
//! - Append one activity entry per successful mutation.
//!
//! # Invariants
//! - A blocker is stored only after its task update succeeds validation.
//! - Activity is recorded after the mutation it describes, never before.
//! - Changes live in the repository for the session only.

use crate::model::blocker::{Blocker, BlockerValidationError, NewBlocker};
use crate::model::comment::{
    ActivityEntry, ActivityKind, Comment, CommentValidationError, NewComment,
};
use crate::model::ids::{BlockerId, CommentId, ProjectId, TaskId};
use crate::model::task::{NewTask, Task, TaskStatus, TaskValidationError};
use crate::repo::tracker_repo::{RepoError, TrackerRepository};
use chrono::{DateTime, Utc};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum TaskServiceError {
    TaskNotFound(TaskId),
    CommentNotFound(CommentId),
    InvalidTask(TaskValidationError),
    InvalidBlocker(BlockerValidationError),
    InvalidComment(CommentValidationError),
    Repo(RepoError),
}

impl Display for TaskServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TaskNotFound(id) => write!(f, "task not found: {id}"),
            Self::CommentNotFound(id) => write!(f, "comment not found: {id}"),
            Self::InvalidTask(err) => write!(f, "{err}"),
            Self::InvalidBlocker(err) => write!(f, "{err}"),
            Self::InvalidComment(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TaskServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidTask(err) => Some(err),
            Self::InvalidBlocker(err) => Some(err),
            Self::InvalidComment(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::TaskNotFound(_) | Self::CommentNotFound(_) => None,
        }
    }
}

impl From<RepoError> for TaskServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::TaskNotFound(id) => Self::TaskNotFound(id),
            RepoError::CommentNotFound(id) => Self::CommentNotFound(id),
            RepoError::InvalidTask(err) => Self::InvalidTask(err),
            RepoError::InvalidBlocker(err) => Self::InvalidBlocker(err),
            RepoError::InvalidComment(err) => Self::InvalidComment(err),
            other => Self::Repo(other),
        }
    }
}

impl From<TaskValidationError> for TaskServiceError {
    fn from(value: TaskValidationError) -> Self {
        Self::InvalidTask(value)
    }
}

impl From<BlockerValidationError> for TaskServiceError {
    fn from(value: BlockerValidationError) -> Self {
        Self::InvalidBlocker(value)
    }
}

impl From<CommentValidationError> for TaskServiceError {
    fn from(value: CommentValidationError) -> Self {
        Self::InvalidComment(value)
    }
}

/// Task mutation facade over a tracker repository.
pub struct TaskService<R: TrackerRepository> {
    repo: R,
}

impl<R: TrackerRepository> TaskService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    pub fn into_repo(self) -> R {
        self.repo
    }

    /// Creates a `Pending` task and logs the assignment.
    ///
    /// # Errors
    /// - `InvalidTask` when title or assignee is blank.
    pub fn create_task(
        &mut self,
        request: NewTask,
        now: DateTime<Utc>,
    ) -> Result<Task, TaskServiceError> {
        let task = request.into_task()?;
        self.repo.insert_task(task.clone())?;
        self.record(
            ActivityKind::Assignment,
            &task.id,
            &task.assigned_entity,
            "was assigned",
            Some(task.title.clone()),
            now,
        )?;
        info!(
            "event=task_create module=service status=ok task_id={} deliverable={} blocker={}",
            task.id, task.is_deliverable, task.is_blocker
        );
        Ok(task)
    }

    /// Moves a task to `status`; leaving `Blocked` clears the responsible person.
    pub fn set_task_status(
        &mut self,
        task_id: &TaskId,
        status: TaskStatus,
        now: DateTime<Utc>,
    ) -> Result<Task, TaskServiceError> {
        let mut task = self.require_task(task_id)?;
        let previous = task.status;
        task.set_status(status);
        self.repo.update_task(task.clone())?;
        self.record(
            ActivityKind::StatusChange,
            &task.id,
            &task.assigned_entity,
            "changed the status of",
            Some(format!("{previous} -> {}", task.status)),
            now,
        )?;
        info!(
            "event=task_status module=service status=ok task_id={} task_status={}",
            task.id, task.status
        );
        Ok(task)
    }

    /// Records a blocker on `task_id` starting at `now`.
    ///
    /// # Errors
    /// - `TaskNotFound` for an unknown task.
    /// - `InvalidBlocker` when reason, entity or person is blank.
    pub fn register_blocker(
        &mut self,
        task_id: &TaskId,
        project_id: Option<ProjectId>,
        request: NewBlocker,
        now: DateTime<Utc>,
    ) -> Result<Blocker, TaskServiceError> {
        let mut task = self.require_task(task_id)?;
        let blocker = Blocker {
            id: BlockerId::generate(),
            task_id: Some(task.id.clone()),
            task_title: task.title.clone(),
            project_id,
            reason: request.reason.trim().to_string(),
            responsible_person: request.responsible_person.trim().to_string(),
            entity_name: request.responsible_entity.trim().to_string(),
            start_time: now,
            hours_blocked: 0,
            estimated_resolution: request.estimated_resolution,
            impact: request.impact,
        };
        blocker.validate()?;

        task.mark_blocked(blocker.responsible_person.clone());
        task.is_blocker = true;
        self.repo.update_task(task)?;
        self.repo.insert_blocker(blocker.clone())?;
        self.record(
            ActivityKind::Blocker,
            task_id,
            &blocker.responsible_person,
            "registered a blocker on",
            Some(blocker.entity_name.clone()),
            now,
        )?;
        info!(
            "event=blocker_register module=service status=ok blocker_id={} task_id={}",
            blocker.id, task_id
        );
        Ok(blocker)
    }

    /// Posts a top-level comment on `task_id`.
    ///
    /// # Errors
    /// - `TaskNotFound` for an unknown task.
    /// - `InvalidComment` when author or content is blank.
    pub fn post_comment(
        &mut self,
        task_id: &TaskId,
        request: NewComment,
        now: DateTime<Utc>,
    ) -> Result<Comment, TaskServiceError> {
        let task = self.require_task(task_id)?;
        let comment = request.into_comment(task.id.clone(), now)?;
        self.repo.insert_comment(comment.clone())?;
        self.record(
            ActivityKind::Comment,
            &task.id,
            &comment.author,
            "commented on",
            None,
            now,
        )?;
        info!(
            "event=comment_post module=service status=ok comment_id={} task_id={}",
            comment.id, task.id
        );
        Ok(comment)
    }

    /// Replies inside the thread holding `parent_id` and returns that thread.
    ///
    /// Replying to a reply appends to the same thread.
    pub fn reply_to_comment(
        &mut self,
        parent_id: &CommentId,
        request: NewComment,
        now: DateTime<Utc>,
    ) -> Result<Comment, TaskServiceError> {
        let task_id = self.thread_task(parent_id)?;
        let reply = request.into_comment(task_id.clone(), now)?;
        let author = reply.author.clone();
        let thread = self.repo.add_reply(parent_id, reply)?;
        self.record(ActivityKind::Comment, &task_id, &author, "replied on", None, now)?;
        info!(
            "event=comment_reply module=service status=ok thread_id={} task_id={}",
            thread.id, task_id
        );
        Ok(thread)
    }

    pub fn like_comment(&mut self, comment_id: &CommentId) -> Result<u32, TaskServiceError> {
        let likes = self.repo.like_comment(comment_id)?;
        info!(
            "event=comment_like module=service status=ok comment_id={} likes={}",
            comment_id, likes
        );
        Ok(likes)
    }

    pub fn comments(&self, task_id: &TaskId) -> Result<Vec<Comment>, TaskServiceError> {
        let task = self.require_task(task_id)?;
        Ok(self.repo.list_comments(&task.id)?)
    }

    /// Activity feed, newest first, optionally limited to one task.
    pub fn activity(
        &self,
        task_id: Option<&TaskId>,
    ) -> Result<Vec<ActivityEntry>, TaskServiceError> {
        let mut entries: Vec<ActivityEntry> = self
            .repo
            .list_activity()?
            .into_iter()
            .filter(|entry| task_id.map_or(true, |id| &entry.task_id == id))
            .collect();
        entries.reverse();
        entries.sort_by(|a, b| b.at.cmp(&a.at));
        Ok(entries)
    }

    fn thread_task(&self, comment_id: &CommentId) -> Result<TaskId, TaskServiceError> {
        for task in self.repo.list_tasks()? {
            let threads = self.repo.list_comments(&task.id)?;
            let found = threads.iter().any(|thread| {
                &thread.id == comment_id || thread.replies.iter().any(|r| &r.id == comment_id)
            });
            if found {
                return Ok(task.id);
            }
        }
        Err(TaskServiceError::CommentNotFound(comment_id.clone()))
    }

    fn record(
        &mut self,
        kind: ActivityKind,
        task_id: &TaskId,
        actor: &str,
        action: &str,
        details: Option<String>,
        at: DateTime<Utc>,
    ) -> Result<(), TaskServiceError> {
        self.repo.record_activity(ActivityEntry {
            kind,
            task_id: task_id.clone(),
            actor: actor.to_string(),
            action: action.to_string(),
            details,
            at,
        })?;
        Ok(())
    }

    fn require_task(&self, task_id: &TaskId) -> Result<Task, TaskServiceError> {
        self.repo
            .get_task(task_id)?
            .ok_or_else(|| TaskServiceError::TaskNotFound(task_id.clone()))
    }
}

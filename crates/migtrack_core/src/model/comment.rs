//! Task discussion threads and the activity feed.
//!
//! # Invariants
//! - Threads are two levels deep: a reply never carries replies.
//! - `author` and `content` are trimmed and non-empty.
//! - Activity entries are append-only and kept in insertion order.

use crate::model::ids::{CommentId, TaskId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentValidationError {
    EmptyAuthor,
    EmptyContent,
    NestedReply(CommentId),
}

impl Display for CommentValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyAuthor => write!(f, "comment author cannot be empty"),
            Self::EmptyContent => write!(f, "comment content cannot be empty"),
            Self::NestedReply(id) => write!(f, "reply `{id}` cannot carry replies"),
        }
    }
}

impl Error for CommentValidationError {}

/// Top-level comment or reply on a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub task_id: TaskId,
    pub author: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub likes: u32,
    #[serde(default)]
    pub replies: Vec<Comment>,
}

impl Comment {
    pub fn validate(&self) -> Result<(), CommentValidationError> {
        if self.author.trim().is_empty() {
            return Err(CommentValidationError::EmptyAuthor);
        }
        if self.content.trim().is_empty() {
            return Err(CommentValidationError::EmptyContent);
        }
        for reply in &self.replies {
            if !reply.replies.is_empty() {
                return Err(CommentValidationError::NestedReply(reply.id.clone()));
            }
            reply.validate()?;
        }
        Ok(())
    }

    /// Comment plus all replies.
    pub fn thread_len(&self) -> usize {
        1 + self.replies.len()
    }
}

/// Comment form payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub author: String,
    pub content: String,
}

impl NewComment {
    /// Builds a fresh comment with zero likes and no replies.
    pub fn into_comment(
        self,
        task_id: TaskId,
        now: DateTime<Utc>,
    ) -> Result<Comment, CommentValidationError> {
        let comment = Comment {
            id: CommentId::generate(),
            task_id,
            author: self.author.trim().to_string(),
            content: self.content.trim().to_string(),
            created_at: now,
            likes: 0,
            replies: Vec::new(),
        };
        comment.validate()?;
        Ok(comment)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Comment,
    StatusChange,
    Assignment,
    Blocker,
}

impl ActivityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Comment => "comment",
            Self::StatusChange => "status_change",
            Self::Assignment => "assignment",
            Self::Blocker => "blocker",
        }
    }
}

impl Display for ActivityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line of the task activity feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub kind: ActivityKind,
    pub task_id: TaskId,
    pub actor: String,
    pub action: String,
    #[serde(default)]
    pub details: Option<String>,
    pub at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::{Comment, CommentValidationError, NewComment};
    use crate::model::ids::TaskId;
    use chrono::{TimeZone, Utc};

    fn request(author: &str, content: &str) -> NewComment {
        NewComment {
            author: author.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn new_comment_trims_and_starts_empty() {
        let now = Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap();
        let comment = request(" Ana ", "  Revisar VPN ")
            .into_comment(TaskId::new("t2"), now)
            .unwrap();
        assert_eq!(comment.author, "Ana");
        assert_eq!(comment.content, "Revisar VPN");
        assert_eq!(comment.likes, 0);
        assert_eq!(comment.thread_len(), 1);
    }

    #[test]
    fn whitespace_content_is_rejected() {
        let now = Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap();
        let err = request("Ana", " \n ")
            .into_comment(TaskId::new("t2"), now)
            .unwrap_err();
        assert_eq!(err, CommentValidationError::EmptyContent);
        let err = request("", "ok")
            .into_comment(TaskId::new("t2"), now)
            .unwrap_err();
        assert_eq!(err, CommentValidationError::EmptyAuthor);
    }

    #[test]
    fn replies_cannot_nest() {
        let now = Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap();
        let make = || {
            request("Ana", "hola")
                .into_comment(TaskId::new("t2"), now)
                .unwrap()
        };
        let mut reply = make();
        reply.replies.push(make());
        let nested_id = reply.id.clone();
        let root = Comment {
            replies: vec![reply],
            ..make()
        };
        assert_eq!(
            root.validate(),
            Err(CommentValidationError::NestedReply(nested_id))
        );
    }
}

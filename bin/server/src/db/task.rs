//! Task model and repository.
//!
//! Every operation is scoped to one owner. Mutations that reference a
//! task the owner does not hold (wrong owner, unknown id) affect zero
//! rows and are not an error; callers always get the owner's full,
//! freshly-read list back.

use brass_lantern_core::TaskId;
use brass_lantern_identity::MemberId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use std::str::FromStr;

/// A task owned by a single member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Task ID.
    pub id: TaskId,
    /// Owning member, as issued by the identity provider.
    pub member_id: String,
    /// Task text.
    pub text: String,
    /// Completion flag.
    pub completed: bool,
    /// When the task was created.
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new, incomplete task for the given owner.
    #[must_use]
    pub fn new(member_id: &MemberId, text: String) -> Self {
        Self {
            id: TaskId::new(),
            member_id: member_id.as_str().to_string(),
            text,
            completed: false,
            created_at: Utc::now(),
        }
    }
}

/// Row type for task queries.
#[derive(FromRow)]
struct TaskRow {
    id: String,
    member_id: String,
    text: String,
    completed: bool,
    created_at: DateTime<Utc>,
}

impl TaskRow {
    fn try_into_task(self) -> Result<Task, sqlx::Error> {
        let id = TaskId::from_str(&self.id).map_err(|e| {
            sqlx::Error::Decode(Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("invalid task id '{}': {}", self.id, e),
            )))
        })?;
        Ok(Task {
            id,
            member_id: self.member_id,
            text: self.text,
            completed: self.completed,
            created_at: self.created_at,
        })
    }
}

/// Repository for task operations.
pub struct TaskRepository {
    pool: SqlitePool,
}

impl TaskRepository {
    /// Creates a new task repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Lists the owner's tasks, incomplete first, then by id (creation
    /// order, since ids are ULIDs).
    pub async fn list(&self, member_id: &MemberId) -> Result<Vec<Task>, sqlx::Error> {
        let rows: Vec<TaskRow> = sqlx::query_as(
            r#"
            SELECT id, member_id, text, completed, created_at
            FROM tasks
            WHERE member_id = ?
            ORDER BY completed ASC, id ASC
            "#,
        )
        .bind(member_id.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TaskRow::try_into_task).collect()
    }

    /// Adds a task and returns the owner's full list.
    pub async fn add(&self, member_id: &MemberId, text: &str) -> Result<Vec<Task>, sqlx::Error> {
        let task = Task::new(member_id, text.to_string());

        sqlx::query(
            r#"
            INSERT INTO tasks (id, member_id, text, completed, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(task.id.to_string())
        .bind(&task.member_id)
        .bind(&task.text)
        .bind(task.completed)
        .bind(task.created_at)
        .execute(&self.pool)
        .await?;

        self.list(member_id).await
    }

    /// Marks a task completed and returns the owner's full list.
    pub async fn mark_completed(
        &self,
        member_id: &MemberId,
        id: &TaskId,
    ) -> Result<Vec<Task>, sqlx::Error> {
        sqlx::query(
            r#"
            UPDATE tasks SET completed = TRUE
            WHERE id = ? AND member_id = ?
            "#,
        )
        .bind(id.to_string())
        .bind(member_id.as_str())
        .execute(&self.pool)
        .await?;

        self.list(member_id).await
    }

    /// Deletes a task and returns the owner's full list.
    pub async fn delete(
        &self,
        member_id: &MemberId,
        id: &TaskId,
    ) -> Result<Vec<Task>, sqlx::Error> {
        sqlx::query(
            r#"
            DELETE FROM tasks
            WHERE id = ? AND member_id = ?
            "#,
        )
        .bind(id.to_string())
        .bind(member_id.as_str())
        .execute(&self.pool)
        .await?;

        self.list(member_id).await
    }
}

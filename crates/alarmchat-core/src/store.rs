use crate::db::DbPool;
use crate::error::CoreError;
use crate::models::{NewTaskData, Recurrence, ScheduledTask};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Row shape of the `scheduled_tasks` table. The recurrence variant is
/// flattened into the `is_recurring` + `end_date` columns.
#[derive(Debug, Clone, FromRow)]
struct TaskRow {
    id: i64,
    description: String,
    execution_time: DateTime<Utc>,
    is_recurring: bool,
    end_date: Option<DateTime<Utc>>,
}

impl From<TaskRow> for ScheduledTask {
    fn from(row: TaskRow) -> Self {
        let recurrence = match (row.is_recurring, row.end_date) {
            (false, _) => Recurrence::Once,
            (true, None) => Recurrence::Daily,
            (true, Some(until)) => Recurrence::DailyUntil(until),
        };
        ScheduledTask {
            id: row.id,
            description: row.description,
            execution_time: row.execution_time,
            recurrence,
        }
    }
}

fn recurrence_columns(recurrence: Recurrence) -> (bool, Option<DateTime<Utc>>) {
    match recurrence {
        Recurrence::Once => (false, None),
        Recurrence::Daily => (true, None),
        Recurrence::DailyUntil(until) => (true, Some(until)),
    }
}

/// Persistence port for scheduled tasks.
///
/// Injected into the sweeper explicitly so tests can substitute doubles.
#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn add_task(&self, data: NewTaskData) -> Result<ScheduledTask, CoreError>;
    async fn find_task_by_id(&self, id: i64) -> Result<Option<ScheduledTask>, CoreError>;
    /// All tasks, soonest first.
    async fn list_tasks(&self) -> Result<Vec<ScheduledTask>, CoreError>;
    /// All tasks with `execution_time <= now` (inclusive).
    async fn load_due_tasks(&self, now: DateTime<Utc>) -> Result<Vec<ScheduledTask>, CoreError>;
    async fn update_task(&self, task: &ScheduledTask) -> Result<(), CoreError>;
    /// Idempotent: deleting an already-deleted task is a no-op, not an error.
    async fn delete_task(&self, id: i64) -> Result<(), CoreError>;
}

/// SQLite implementation of the task store.
#[derive(Clone)]
pub struct SqliteTaskStore {
    pool: DbPool,
}

impl SqliteTaskStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskStore for SqliteTaskStore {
    async fn add_task(&self, data: NewTaskData) -> Result<ScheduledTask, CoreError> {
        let (is_recurring, end_date) = recurrence_columns(data.recurrence);
        let row: TaskRow = sqlx::query_as(
            r#"INSERT INTO scheduled_tasks (description, execution_time, is_recurring, end_date)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&data.description)
        .bind(data.execution_time)
        .bind(is_recurring)
        .bind(end_date)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn find_task_by_id(&self, id: i64) -> Result<Option<ScheduledTask>, CoreError> {
        let row: Option<TaskRow> = sqlx::query_as("SELECT * FROM scheduled_tasks WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Into::into))
    }

    async fn list_tasks(&self) -> Result<Vec<ScheduledTask>, CoreError> {
        let rows: Vec<TaskRow> =
            sqlx::query_as("SELECT * FROM scheduled_tasks ORDER BY execution_time ASC")
                .fetch_all(&self.pool)
                .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn load_due_tasks(&self, now: DateTime<Utc>) -> Result<Vec<ScheduledTask>, CoreError> {
        let rows: Vec<TaskRow> = sqlx::query_as(
            "SELECT * FROM scheduled_tasks WHERE execution_time <= $1 ORDER BY execution_time ASC",
        )
        .bind(now)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update_task(&self, task: &ScheduledTask) -> Result<(), CoreError> {
        let (is_recurring, end_date) = recurrence_columns(task.recurrence);
        let result = sqlx::query(
            r#"UPDATE scheduled_tasks
            SET description = $1, execution_time = $2, is_recurring = $3, end_date = $4
            WHERE id = $5
            "#,
        )
        .bind(&task.description)
        .bind(task.execution_time)
        .bind(is_recurring)
        .bind(end_date)
        .bind(task.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(CoreError::NotFound(task.id.to_string()));
        }
        Ok(())
    }

    async fn delete_task(&self, id: i64) -> Result<(), CoreError> {
        sqlx::query("DELETE FROM scheduled_tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

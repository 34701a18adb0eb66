use crate::db::DbPool;
use crate::error::CoreError;
use crate::models::Alarm;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::info;

/// Port to the platform's alarm-delivery subsystem.
///
/// The sweeper only asks for a future delivery tagged with a task id and
/// label; exact-timing guarantees and presentation are the platform's problem.
#[async_trait]
pub trait AlarmScheduler: Send + Sync {
    async fn request_alarm(
        &self,
        label: &str,
        at: DateTime<Utc>,
        task_id: i64,
    ) -> Result<(), CoreError>;
}

/// Bundled scheduler that records each request in the `alarms` table, where
/// the CLI alarm list can show what has been armed.
#[derive(Clone)]
pub struct SqliteAlarmScheduler {
    pool: DbPool,
}

impl SqliteAlarmScheduler {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// All recorded alarm requests, soonest first.
    pub async fn list_alarms(&self) -> Result<Vec<Alarm>, CoreError> {
        let alarms = sqlx::query_as("SELECT * FROM alarms ORDER BY trigger_time ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(alarms)
    }

    /// Drops recorded requests for a task, used when the user cancels it.
    pub async fn clear_alarms_for_task(&self, task_id: i64) -> Result<(), CoreError> {
        sqlx::query("DELETE FROM alarms WHERE task_id = $1")
            .bind(task_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl AlarmScheduler for SqliteAlarmScheduler {
    async fn request_alarm(
        &self,
        label: &str,
        at: DateTime<Utc>,
        task_id: i64,
    ) -> Result<(), CoreError> {
        sqlx::query("INSERT INTO alarms (message, trigger_time, task_id) VALUES ($1, $2, $3)")
            .bind(label)
            .bind(at)
            .bind(task_id)
            .execute(&self.pool)
            .await
            .map_err(|e| CoreError::AlarmScheduling(e.to_string()))?;

        info!(task_id, %at, label, "alarm request recorded");
        Ok(())
    }
}

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The fixed daily recurrence step: exactly 24 hours in absolute epoch time.
///
/// Deliberately not calendar-day-aware, so a rescheduled task keeps a constant
/// 86,400,000 ms cadence across DST transitions.
pub const DAILY_STEP_MS: i64 = 86_400_000;

/// How a scheduled task behaves once it has come due.
///
/// A tagged variant instead of an `is_recurring` flag plus a nullable end
/// date, so the sweep's behavioural branches stay exhaustive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recurrence {
    /// Fires once, then the record is removed.
    Once,
    /// Rescheduled one day later on every sweep, indefinitely.
    Daily,
    /// Rescheduled daily while the next execution time stays at or before the
    /// end date (inclusive); removed once it would pass it.
    DailyUntil(DateTime<Utc>),
}

/// A persisted unit of deferred work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledTask {
    /// Assigned by the store on creation; monotonically increasing, never reused.
    pub id: i64,
    pub description: String,
    /// The concrete instant the task is due. Always an absolute time; no
    /// relative or symbolic times are stored.
    pub execution_time: DateTime<Utc>,
    pub recurrence: Recurrence,
}

/// What the sweeper should do with a due task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueOutcome {
    /// Delete the record; no follow-up alarm.
    Remove,
    /// Persist the new execution time and arm an alarm for it.
    Reschedule(DateTime<Utc>),
}

impl ScheduledTask {
    /// The execution time one daily step after the current one.
    pub fn next_execution_time(&self) -> DateTime<Utc> {
        self.execution_time + Duration::milliseconds(DAILY_STEP_MS)
    }

    /// Decides the fate of this task once it has come due.
    pub fn due_outcome(&self) -> DueOutcome {
        match self.recurrence {
            Recurrence::Once => DueOutcome::Remove,
            Recurrence::Daily => DueOutcome::Reschedule(self.next_execution_time()),
            Recurrence::DailyUntil(until) => {
                let next = self.next_execution_time();
                if next <= until {
                    DueOutcome::Reschedule(next)
                } else {
                    DueOutcome::Remove
                }
            }
        }
    }
}

/// Data required to create a new scheduled task.
#[derive(Debug, Clone)]
pub struct NewTaskData {
    pub description: String,
    pub execution_time: DateTime<Utc>,
    pub recurrence: Recurrence,
}

/// A recorded alarm request, as handed to the platform scheduler.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Alarm {
    pub id: i64,
    pub message: String,
    pub trigger_time: DateTime<Utc>,
    /// Id of the scheduled task the alarm was armed for, when known.
    pub task_id: Option<i64>,
}

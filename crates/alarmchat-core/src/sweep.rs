//! The due-task sweeper.
//!
//! A periodically triggered unit of work that brings the persisted task set up
//! to date with real time: one-time tasks that have fired are removed, daily
//! tasks are advanced by one fixed 24 h step and re-armed, and bounded daily
//! tasks whose next step would pass their end date are removed.
//!
//! Each invocation either fails as a whole (the due-task query itself failed,
//! leaving the retry decision to the external trigger) or succeeds, with any
//! per-task write failures logged and reported rather than aborting the rest
//! of the due set. A crash mid-sweep is safe: still-due tasks are simply
//! re-selected on the next trigger, and task deletion is idempotent.

use crate::alarm::AlarmScheduler;
use crate::clock::Clock;
use crate::error::CoreError;
use crate::models::{DueOutcome, ScheduledTask};
use crate::store::TaskStore;
use tracing::{debug, warn};

/// Tally of one sweep invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Tasks selected as due at the start of the sweep.
    pub due: usize,
    /// Recurring tasks advanced by one day.
    pub rescheduled: usize,
    /// One-time tasks and exhausted bounded tasks removed.
    pub removed: usize,
    /// Tasks whose store write failed; they stay due and are retried next sweep.
    pub failed: usize,
    /// Reschedules whose alarm request failed after the update was persisted.
    pub alarm_failures: usize,
}

enum Processed {
    Removed,
    Rescheduled { alarm_armed: bool },
}

/// Sweeps due tasks against the store and arms follow-up alarms.
///
/// Collaborators are injected so the sweep can be driven directly in tests
/// with controlled store state and a fake clock.
pub struct Sweeper<S, A, C> {
    store: S,
    alarms: A,
    clock: C,
}

impl<S, A, C> Sweeper<S, A, C>
where
    S: TaskStore,
    A: AlarmScheduler,
    C: Clock,
{
    pub fn new(store: S, alarms: A, clock: C) -> Self {
        Self { store, alarms, clock }
    }

    /// Runs one sweep.
    ///
    /// Returns `Err` only when the due-task query itself fails; per-task
    /// failures are absorbed into the report.
    pub async fn run(&self) -> Result<SweepReport, CoreError> {
        let now = self.clock.now();
        let due_tasks = self.store.load_due_tasks(now).await?;

        let mut report = SweepReport {
            due: due_tasks.len(),
            ..SweepReport::default()
        };

        if due_tasks.is_empty() {
            debug!(%now, "no tasks are due");
            return Ok(report);
        }

        for task in &due_tasks {
            match self.process(task).await {
                Ok(Processed::Removed) => report.removed += 1,
                Ok(Processed::Rescheduled { alarm_armed }) => {
                    report.rescheduled += 1;
                    if !alarm_armed {
                        report.alarm_failures += 1;
                    }
                }
                Err(e) => {
                    warn!(task_id = task.id, error = %e, "failed processing due task");
                    report.failed += 1;
                }
            }
        }

        debug!(
            due = report.due,
            rescheduled = report.rescheduled,
            removed = report.removed,
            failed = report.failed,
            "sweep finished"
        );
        Ok(report)
    }

    async fn process(&self, task: &ScheduledTask) -> Result<Processed, CoreError> {
        match task.due_outcome() {
            DueOutcome::Remove => {
                self.store.delete_task(task.id).await?;
                debug!(task_id = task.id, "due task removed");
                Ok(Processed::Removed)
            }
            DueOutcome::Reschedule(next) => {
                let updated = ScheduledTask {
                    execution_time: next,
                    ..task.clone()
                };
                // The update is committed before the alarm request. If the
                // request then fails, the new time is already persisted and
                // the task is re-armed by a later sweep once it comes due
                // again; until then no alarm is pending for it.
                self.store.update_task(&updated).await?;

                let alarm_armed = match self
                    .alarms
                    .request_alarm(&task.description, next, task.id)
                    .await
                {
                    Ok(()) => true,
                    Err(e) => {
                        warn!(task_id = task.id, error = %e, "alarm request failed after reschedule");
                        false
                    }
                };
                Ok(Processed::Rescheduled { alarm_armed })
            }
        }
    }
}

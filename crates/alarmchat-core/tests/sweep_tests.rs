use alarmchat_core::alarm::AlarmScheduler;
use alarmchat_core::clock::Clock;
use alarmchat_core::error::CoreError;
use alarmchat_core::models::{NewTaskData, Recurrence, ScheduledTask, DAILY_STEP_MS};
use alarmchat_core::store::TaskStore;
use alarmchat_core::sweep::Sweeper;
use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct FakeStoreInner {
    tasks: BTreeMap<i64, ScheduledTask>,
    next_id: i64,
    fail_reads: bool,
    fail_writes_for: HashSet<i64>,
}

/// In-memory task store with per-task failure injection.
#[derive(Clone, Default)]
struct FakeStore {
    inner: Arc<Mutex<FakeStoreInner>>,
}

impl FakeStore {
    fn insert(&self, description: &str, execution_time: DateTime<Utc>, recurrence: Recurrence) -> i64 {
        let mut inner = self.inner.lock().unwrap();
        inner.next_id += 1;
        let id = inner.next_id;
        inner.tasks.insert(
            id,
            ScheduledTask {
                id,
                description: description.to_string(),
                execution_time,
                recurrence,
            },
        );
        id
    }

    fn get(&self, id: i64) -> Option<ScheduledTask> {
        self.inner.lock().unwrap().tasks.get(&id).cloned()
    }

    fn len(&self) -> usize {
        self.inner.lock().unwrap().tasks.len()
    }

    fn fail_reads(&self) {
        self.inner.lock().unwrap().fail_reads = true;
    }

    fn fail_writes_for(&self, id: i64) {
        self.inner.lock().unwrap().fail_writes_for.insert(id);
    }
}

fn injected_failure() -> CoreError {
    CoreError::Io(std::io::Error::new(std::io::ErrorKind::Other, "injected"))
}

#[async_trait]
impl TaskStore for FakeStore {
    async fn add_task(&self, data: NewTaskData) -> Result<ScheduledTask, CoreError> {
        let id = self.insert(&data.description, data.execution_time, data.recurrence);
        Ok(self.get(id).unwrap())
    }

    async fn find_task_by_id(&self, id: i64) -> Result<Option<ScheduledTask>, CoreError> {
        Ok(self.get(id))
    }

    async fn list_tasks(&self) -> Result<Vec<ScheduledTask>, CoreError> {
        Ok(self.inner.lock().unwrap().tasks.values().cloned().collect())
    }

    async fn load_due_tasks(&self, now: DateTime<Utc>) -> Result<Vec<ScheduledTask>, CoreError> {
        let inner = self.inner.lock().unwrap();
        if inner.fail_reads {
            return Err(injected_failure());
        }
        Ok(inner
            .tasks
            .values()
            .filter(|t| t.execution_time <= now)
            .cloned()
            .collect())
    }

    async fn update_task(&self, task: &ScheduledTask) -> Result<(), CoreError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.fail_writes_for.contains(&task.id) {
            return Err(injected_failure());
        }
        if !inner.tasks.contains_key(&task.id) {
            return Err(CoreError::NotFound(task.id.to_string()));
        }
        inner.tasks.insert(task.id, task.clone());
        Ok(())
    }

    async fn delete_task(&self, id: i64) -> Result<(), CoreError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.fail_writes_for.contains(&id) {
            return Err(injected_failure());
        }
        inner.tasks.remove(&id);
        Ok(())
    }
}

/// Records alarm requests; can be flipped to reject them.
#[derive(Clone, Default)]
struct RecordingAlarms {
    requests: Arc<Mutex<Vec<(String, DateTime<Utc>, i64)>>>,
    fail: Arc<Mutex<bool>>,
}

impl RecordingAlarms {
    fn requests(&self) -> Vec<(String, DateTime<Utc>, i64)> {
        self.requests.lock().unwrap().clone()
    }

    fn reject_requests(&self) {
        *self.fail.lock().unwrap() = true;
    }
}

#[async_trait]
impl AlarmScheduler for RecordingAlarms {
    async fn request_alarm(
        &self,
        label: &str,
        at: DateTime<Utc>,
        task_id: i64,
    ) -> Result<(), CoreError> {
        if *self.fail.lock().unwrap() {
            return Err(CoreError::AlarmScheduling("permission denied".to_string()));
        }
        self.requests
            .lock()
            .unwrap()
            .push((label.to_string(), at, task_id));
        Ok(())
    }
}

#[derive(Clone, Copy)]
struct FixedClock(DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 12, 25, 12, 0, 0).unwrap()
}

fn one_day() -> Duration {
    Duration::milliseconds(DAILY_STEP_MS)
}

fn sweeper(
    store: &FakeStore,
    alarms: &RecordingAlarms,
    at: DateTime<Utc>,
) -> Sweeper<FakeStore, RecordingAlarms, FixedClock> {
    Sweeper::new(store.clone(), alarms.clone(), FixedClock(at))
}

#[tokio::test]
async fn one_time_due_task_is_removed_without_alarm() {
    let store = FakeStore::default();
    let alarms = RecordingAlarms::default();
    let id = store.insert("wake me", now() - Duration::hours(1), Recurrence::Once);

    let report = sweeper(&store, &alarms, now()).run().await.unwrap();

    assert_eq!(report.due, 1);
    assert_eq!(report.removed, 1);
    assert_eq!(report.rescheduled, 0);
    assert!(store.get(id).is_none());
    assert!(alarms.requests().is_empty());
}

#[tokio::test]
async fn daily_task_advances_exactly_one_day_and_arms_alarm() {
    let store = FakeStore::default();
    let alarms = RecordingAlarms::default();
    let due_at = now() - Duration::hours(1);
    let id = store.insert("standup", due_at, Recurrence::Daily);

    let report = sweeper(&store, &alarms, now()).run().await.unwrap();

    assert_eq!(report.rescheduled, 1);
    let task = store.get(id).unwrap();
    assert_eq!(task.execution_time, due_at + one_day());

    let requests = alarms.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0], ("standup".to_string(), due_at + one_day(), id));
}

#[tokio::test]
async fn bounded_task_within_window_is_rescheduled() {
    let store = FakeStore::default();
    let alarms = RecordingAlarms::default();
    let due_at = now() - Duration::hours(1);
    let until = due_at + Duration::days(7);
    let id = store.insert("meds", due_at, Recurrence::DailyUntil(until));

    let report = sweeper(&store, &alarms, now()).run().await.unwrap();

    assert_eq!(report.rescheduled, 1);
    assert_eq!(store.get(id).unwrap().execution_time, due_at + one_day());
    assert_eq!(alarms.requests().len(), 1);
}

#[tokio::test]
async fn bounded_task_past_window_is_deleted_without_alarm() {
    let store = FakeStore::default();
    let alarms = RecordingAlarms::default();
    let due_at = now() - Duration::hours(1);
    // end date 12h away: less than the +1 day step
    let id = store.insert(
        "short range",
        due_at,
        Recurrence::DailyUntil(due_at + Duration::hours(12)),
    );

    let report = sweeper(&store, &alarms, now()).run().await.unwrap();

    assert_eq!(report.removed, 1);
    assert!(store.get(id).is_none());
    assert!(alarms.requests().is_empty());
}

#[tokio::test]
async fn end_date_equal_to_next_time_reschedules_once_then_terminates() {
    let store = FakeStore::default();
    let alarms = RecordingAlarms::default();
    let due_at = now() - Duration::hours(1);
    let until = due_at + one_day();
    let id = store.insert("last call", due_at, Recurrence::DailyUntil(until));

    // inclusive boundary: rescheduled, not deleted
    let report = sweeper(&store, &alarms, now()).run().await.unwrap();
    assert_eq!(report.rescheduled, 1);
    assert_eq!(store.get(id).unwrap().execution_time, until);

    // the following sweep finds it due again and terminates it
    let later = until + Duration::minutes(5);
    let report = sweeper(&store, &alarms, later).run().await.unwrap();
    assert_eq!(report.removed, 1);
    assert!(store.get(id).is_none());
}

#[tokio::test]
async fn empty_due_set_is_a_noop_success() {
    let store = FakeStore::default();
    let alarms = RecordingAlarms::default();
    store.insert("future", now() + Duration::hours(3), Recurrence::Once);

    let report = sweeper(&store, &alarms, now()).run().await.unwrap();

    assert_eq!(report, alarmchat_core::sweep::SweepReport::default());
    assert_eq!(store.len(), 1);
    assert!(alarms.requests().is_empty());
}

#[tokio::test]
async fn failure_on_one_task_does_not_abort_the_rest() {
    let store = FakeStore::default();
    let alarms = RecordingAlarms::default();
    let failing = store.insert("flaky", now() - Duration::hours(2), Recurrence::Daily);
    let healthy = store.insert("solid", now() - Duration::hours(1), Recurrence::Once);
    store.fail_writes_for(failing);

    let report = sweeper(&store, &alarms, now()).run().await.unwrap();

    assert_eq!(report.due, 2);
    assert_eq!(report.failed, 1);
    assert_eq!(report.removed, 1);
    // the failing task is unchanged and will reappear as due next sweep
    assert_eq!(
        store.get(failing).unwrap().execution_time,
        now() - Duration::hours(2)
    );
    assert!(store.get(healthy).is_none());
}

#[tokio::test]
async fn store_read_failure_fails_the_whole_sweep() {
    let store = FakeStore::default();
    let alarms = RecordingAlarms::default();
    store.insert("unreachable", now() - Duration::hours(1), Recurrence::Once);
    store.fail_reads();

    let result = sweeper(&store, &alarms, now()).run().await;

    assert!(result.is_err());
    // no partial side effects
    assert_eq!(store.len(), 1);
    assert!(alarms.requests().is_empty());
}

#[tokio::test]
async fn immediate_second_sweep_finds_nothing_due() {
    let store = FakeStore::default();
    let alarms = RecordingAlarms::default();
    store.insert("once", now() - Duration::hours(1), Recurrence::Once);
    store.insert("daily", now() - Duration::minutes(30), Recurrence::Daily);

    let first = sweeper(&store, &alarms, now()).run().await.unwrap();
    assert_eq!(first.due, 2);

    let second = sweeper(&store, &alarms, now()).run().await.unwrap();
    assert_eq!(second.due, 0);
    assert_eq!(alarms.requests().len(), 1);
}

#[tokio::test]
async fn backlog_catches_up_one_step_per_sweep() {
    let store = FakeStore::default();
    let alarms = RecordingAlarms::default();
    // three days overdue, e.g. the device was off
    let due_at = now() - Duration::days(3);
    let id = store.insert("buried", due_at, Recurrence::Daily);

    for step in 1..=3 {
        let report = sweeper(&store, &alarms, now()).run().await.unwrap();
        assert_eq!(report.rescheduled, 1);
        assert_eq!(
            store.get(id).unwrap().execution_time,
            due_at + one_day() * step
        );
    }

    // caught up: execution time is now past `now`
    let report = sweeper(&store, &alarms, now()).run().await.unwrap();
    assert_eq!(report.due, 0);
}

#[tokio::test]
async fn alarm_failure_is_reported_but_update_stands() {
    let store = FakeStore::default();
    let alarms = RecordingAlarms::default();
    alarms.reject_requests();
    let due_at = now() - Duration::hours(1);
    let id = store.insert("no permission", due_at, Recurrence::Daily);

    let report = sweeper(&store, &alarms, now()).run().await.unwrap();

    assert_eq!(report.rescheduled, 1);
    assert_eq!(report.alarm_failures, 1);
    assert_eq!(report.failed, 0);
    // update committed before the alarm request; corrected on a later sweep
    assert_eq!(store.get(id).unwrap().execution_time, due_at + one_day());
    assert!(alarms.requests().is_empty());
}

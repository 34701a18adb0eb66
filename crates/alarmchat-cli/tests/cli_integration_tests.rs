use predicates::prelude::*;

mod helpers;
use helpers::CliTestHarness;

#[test]
fn add_then_list_shows_the_task() {
    let harness = CliTestHarness::new();

    harness
        .run_success(&["add", "dentist", "--at", "tomorrow"])
        .stdout(predicate::str::contains("Created task"));

    harness
        .run_success(&["list"])
        .stdout(predicate::str::contains("dentist"));
}

#[test]
fn say_with_a_time_sends_an_alarm_request() {
    let harness = CliTestHarness::new();

    harness
        .run_success(&["say", "wake", "me", "at", "7:30"])
        .stdout(predicate::str::contains("Alarm request sent"));

    harness
        .run_success(&["alarms"])
        .stdout(predicate::str::contains("wake me at 7:30"));
}

#[test]
fn say_with_a_date_schedules_a_task() {
    let harness = CliTestHarness::new();

    harness
        .run_success(&["say", "task", "meeting", "on", "25-12-2099"])
        .stdout(predicate::str::contains("Scheduled"));

    harness
        .run_success(&["list"])
        .stdout(predicate::str::contains("task meeting on 25-12-2099"));
}

#[test]
fn say_without_anything_schedulable_reports_back() {
    let harness = CliTestHarness::new();

    harness
        .run_success(&["say", "hello", "there"])
        .stdout(predicate::str::contains("No time, date, or place"));

    harness
        .run_success(&["list"])
        .stdout(predicate::str::contains("No scheduled tasks."));
}

#[test]
fn say_navigate_prints_a_map_lookup() {
    let harness = CliTestHarness::new();

    harness
        .run_success(&["say", "navigate", "to", "central", "park"])
        .stdout(predicate::str::contains("central park"))
        .stdout(predicate::str::contains("geo:0,0?q=central+park"));
}

#[test]
fn sweep_with_nothing_due_is_a_noop() {
    let harness = CliTestHarness::new();

    harness
        .run_success(&["sweep"])
        .stdout(predicate::str::contains("No tasks due."));
}

#[test]
fn sweep_removes_an_overdue_one_time_task() {
    let harness = CliTestHarness::new();

    harness.run_success(&["add", "expired", "--at", "yesterday"]);
    harness
        .run_success(&["sweep"])
        .stdout(predicate::str::contains("due task(s)"));

    harness
        .run_success(&["list"])
        .stdout(predicate::str::contains("No scheduled tasks."));
}

#[test]
fn sweep_reschedules_an_overdue_daily_task() {
    let harness = CliTestHarness::new();

    harness.run_success(&["add", "standup", "--at", "yesterday", "--daily"]);
    harness.run_success(&["sweep"]);

    // still present, advanced by one day
    harness
        .run_success(&["list"])
        .stdout(predicate::str::contains("standup"));
}

#[test]
fn delete_with_force_removes_the_task() {
    let harness = CliTestHarness::new();

    harness.run_success(&["add", "doomed", "--at", "tomorrow"]);
    harness
        .run_success(&["delete", "1", "--force"])
        .stdout(predicate::str::contains("Deleted task 1"));

    harness
        .run_success(&["list"])
        .stdout(predicate::str::contains("No scheduled tasks."));
}

#[test]
fn delete_of_unknown_task_reports_not_found() {
    let harness = CliTestHarness::new();

    harness
        .command()
        .args(["delete", "42", "--force"])
        .assert()
        .stderr(predicate::str::contains("not found"));
}

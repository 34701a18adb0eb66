use alarmchat_core::alarm::SqliteAlarmScheduler;
use alarmchat_core::clock::SystemClock;
use alarmchat_core::store::SqliteTaskStore;
use alarmchat_core::sweep::{SweepReport, Sweeper};
use anyhow::Result;
use owo_colors::OwoColorize;
use std::time::Duration;
use tracing::error;

/// Runs the due-task sweep once, or on a fixed interval when `every_minutes`
/// is given (the stand-in for the platform's periodic work scheduler).
pub async fn sweep(
    store: SqliteTaskStore,
    alarms: SqliteAlarmScheduler,
    every_minutes: Option<u64>,
) -> Result<()> {
    let sweeper = Sweeper::new(store, alarms, SystemClock);

    let Some(minutes) = every_minutes else {
        let report = sweeper.run().await?;
        print_report(&report);
        return Ok(());
    };

    let mut ticker = tokio::time::interval(Duration::from_secs(minutes * 60));
    loop {
        ticker.tick().await;
        // a failed invocation is retried on the next tick
        match sweeper.run().await {
            Ok(report) => print_report(&report),
            Err(e) => error!(error = %e, "sweep invocation failed"),
        }
    }
}

fn print_report(report: &SweepReport) {
    if report.due == 0 {
        println!("No tasks due.");
        return;
    }
    println!(
        "Swept {} due task(s): {} rescheduled, {} removed, {} failed",
        report.due.to_string().bold(),
        report.rescheduled.to_string().green(),
        report.removed.to_string().cyan(),
        report.failed.to_string().red(),
    );
    if report.alarm_failures > 0 {
        println!(
            "{} {} alarm request(s) failed; affected tasks will be re-armed on a later sweep",
            "!".yellow().bold(),
            report.alarm_failures
        );
    }
}

use alarmchat_core::alarm::SqliteAlarmScheduler;
use alarmchat_core::store::TaskStore;
use anyhow::Result;
use owo_colors::{OwoColorize, Style};

pub async fn delete_task(
    store: &impl TaskStore,
    alarms: &SqliteAlarmScheduler,
    id: i64,
) -> Result<()> {
    store.delete_task(id).await?;
    // drop any recorded alarm requests along with the task
    alarms.clear_alarms_for_task(id).await?;

    let success_style = Style::new().green().bold();
    println!("{} Deleted task {}", "✓".style(success_style), id);
    Ok(())
}

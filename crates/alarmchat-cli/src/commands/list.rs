use crate::views::table::display_tasks;
use alarmchat_core::store::TaskStore;
use anyhow::Result;
use chrono_tz::Tz;

pub async fn list_tasks(store: &impl TaskStore, tz: Tz) -> Result<()> {
    let tasks = store.list_tasks().await?;
    display_tasks(&tasks, tz);
    Ok(())
}

use crate::views::table::display_alarms;
use alarmchat_core::alarm::SqliteAlarmScheduler;
use anyhow::Result;
use chrono_tz::Tz;

pub async fn list_alarms(alarms: &SqliteAlarmScheduler, tz: Tz) -> Result<()> {
    let recorded = alarms.list_alarms().await?;
    display_alarms(&recorded, tz);
    Ok(())
}

use crate::cli::AddCommand;
use crate::parser::parse_due_date;
use alarmchat_core::alarm::AlarmScheduler;
use alarmchat_core::models::{NewTaskData, Recurrence};
use alarmchat_core::store::TaskStore;
use anyhow::Result;
use chrono_tz::Tz;
use owo_colors::{OwoColorize, Style};

pub async fn add_task(
    store: &impl TaskStore,
    alarms: &impl AlarmScheduler,
    tz: Tz,
    command: AddCommand,
) -> Result<()> {
    let execution_time = parse_due_date(&command.at)?;

    let recurrence = if let Some(until) = &command.until {
        Recurrence::DailyUntil(parse_due_date(until)?)
    } else if command.daily {
        Recurrence::Daily
    } else {
        Recurrence::Once
    };

    let task = store
        .add_task(NewTaskData {
            description: command.description.clone(),
            execution_time,
            recurrence,
        })
        .await?;
    alarms
        .request_alarm(&task.description, execution_time, task.id)
        .await?;

    let success_style = Style::new().green().bold();
    let info_style = Style::new().blue();
    println!(
        "{} Created task: {}",
        "✓".style(success_style),
        task.description.bright_white().bold()
    );
    println!(
        "  {} Task ID: {}",
        "→".style(info_style),
        task.id.to_string().yellow()
    );
    println!(
        "  {} Due: {}",
        "→".style(info_style),
        execution_time
            .with_timezone(&tz)
            .format("%Y-%m-%d %H:%M %Z")
            .to_string()
            .cyan()
    );
    match recurrence {
        Recurrence::Daily => println!("  {} Repeats daily", "→".style(info_style)),
        Recurrence::DailyUntil(until) => println!(
            "  {} Repeats daily until {}",
            "→".style(info_style),
            until.with_timezone(&tz).format("%Y-%m-%d")
        ),
        Recurrence::Once => {}
    }

    Ok(())
}

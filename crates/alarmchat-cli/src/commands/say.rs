use crate::cli::SayCommand;
use crate::parser::{parse_message, Intent};
use alarmchat_core::alarm::AlarmScheduler;
use alarmchat_core::models::{NewTaskData, Recurrence};
use alarmchat_core::store::TaskStore;
use anyhow::Result;
use chrono::Utc;
use chrono_tz::Tz;
use owo_colors::{OwoColorize, Style};

/// Handles one chat message: pattern-match it into an intent and act on it.
pub async fn say(
    store: &impl TaskStore,
    alarms: &impl AlarmScheduler,
    tz: Tz,
    command: SayCommand,
) -> Result<()> {
    let text = command.text.join(" ");
    let success_style = Style::new().green().bold();
    let info_style = Style::new().blue();

    match parse_message(&text, Utc::now(), tz) {
        Intent::SetAlarm { label, at } => {
            let task = store
                .add_task(NewTaskData {
                    description: label.clone(),
                    execution_time: at,
                    recurrence: Recurrence::Once,
                })
                .await?;
            alarms.request_alarm(&label, at, task.id).await?;

            let local = at.with_timezone(&tz);
            println!(
                "{} Alarm request sent for {} — \"{}\"",
                "✓".style(success_style),
                local.format("%Y-%m-%d %H:%M %Z").to_string().cyan(),
                label
            );
            println!("  {} Task ID: {}", "→".style(info_style), task.id.to_string().yellow());
        }
        Intent::ScheduleTask {
            description,
            at,
            recurrence,
        } => {
            let task = store
                .add_task(NewTaskData {
                    description: description.clone(),
                    execution_time: at,
                    recurrence,
                })
                .await?;
            alarms.request_alarm(&description, at, task.id).await?;

            let local = at.with_timezone(&tz);
            println!(
                "{} Scheduled \"{}\" for {}",
                "✓".style(success_style),
                description,
                local.format("%Y-%m-%d %H:%M %Z").to_string().cyan()
            );
            println!("  {} Task ID: {}", "→".style(info_style), task.id.to_string().yellow());
            match recurrence {
                Recurrence::Daily => {
                    println!("  {} Repeats daily", "→".style(info_style));
                }
                Recurrence::DailyUntil(until) => {
                    println!(
                        "  {} Repeats daily until {}",
                        "→".style(info_style),
                        until.with_timezone(&tz).format("%Y-%m-%d")
                    );
                }
                Recurrence::Once => {}
            }
        }
        Intent::OpenMap { query } => {
            println!("{} Opening location: {}", "🗺".style(info_style), query);
            println!("  geo:0,0?q={}", query.replace(' ', "+"));
        }
        Intent::Unrecognized => {
            println!(
                "{} No time, date, or place found in \"{}\".",
                "!".yellow().bold(),
                text
            );
            println!("  Try: \"wake me at 6:30 AM\" or \"task meeting on 25-12-2025\"");
        }
    }

    Ok(())
}

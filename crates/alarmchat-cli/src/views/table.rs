use alarmchat_core::models::{Alarm, Recurrence, ScheduledTask};
use chrono::Utc;
use chrono_humanize::HumanTime;
use chrono_tz::Tz;
use comfy_table::{Attribute, Cell, Color, Row, Table};

pub fn display_tasks(tasks: &[ScheduledTask], tz: Tz) {
    if tasks.is_empty() {
        println!("No scheduled tasks.");
        return;
    }

    let now = Utc::now();
    let mut table = Table::new();
    table.set_header(vec!["ID", "Description", "When", "In", "Repeats"]);

    for task in tasks {
        let mut row = Row::new();
        row.add_cell(Cell::new(task.id.to_string()));

        let mut display_name = String::new();
        if task.recurrence != Recurrence::Once {
            display_name.push('↻'); // Recurring symbol
            display_name.push(' ');
        }
        display_name.push_str(&task.description);

        let mut name_cell = Cell::new(display_name);
        if task.execution_time <= now {
            // overdue: the next sweep will pick it up
            name_cell = name_cell.fg(Color::Red).add_attribute(Attribute::Bold);
        }
        row.add_cell(name_cell);

        let local = task.execution_time.with_timezone(&tz);
        row.add_cell(Cell::new(local.format("%Y-%m-%d %H:%M %Z").to_string()));
        row.add_cell(Cell::new(HumanTime::from(task.execution_time).to_string()));
        row.add_cell(Cell::new(describe_recurrence(&task.recurrence, tz)));

        table.add_row(row);
    }

    println!("{table}");
}

pub fn display_alarms(alarms: &[Alarm], tz: Tz) {
    if alarms.is_empty() {
        println!("No alarm requests recorded.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Message", "Trigger time", "Task"]);

    for alarm in alarms {
        let local = alarm.trigger_time.with_timezone(&tz);
        table.add_row(vec![
            Cell::new(alarm.id.to_string()),
            Cell::new(&alarm.message),
            Cell::new(local.format("%Y-%m-%d %H:%M %Z").to_string()),
            Cell::new(
                alarm
                    .task_id
                    .map(|id| id.to_string())
                    .unwrap_or_else(|| "-".to_string()),
            ),
        ]);
    }

    println!("{table}");
}

fn describe_recurrence(recurrence: &Recurrence, tz: Tz) -> String {
    match recurrence {
        Recurrence::Once => "once".to_string(),
        Recurrence::Daily => "daily".to_string(),
        Recurrence::DailyUntil(until) => {
            format!("daily until {}", until.with_timezone(&tz).format("%Y-%m-%d"))
        }
    }
}

use clap::Parser;
use dialoguer::Confirm;
use owo_colors::{OwoColorize, Style};

use alarmchat_core::alarm::SqliteAlarmScheduler;
use alarmchat_core::db;
use alarmchat_core::error::CoreError;
use alarmchat_core::store::{SqliteTaskStore, TaskStore};

mod cli;
mod commands;
mod config;
mod parser;
mod timezone;
mod views;

#[tokio::main]
async fn main() {
    use tracing_subscriber::EnvFilter;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let config = config::Config::new().unwrap_or_default();
    let tz = match timezone::validate_timezone(&config.timezone) {
        Ok(tz) => tz,
        Err(msg) => {
            eprintln!("{} {}", "Error:".red().bold(), msg);
            std::process::exit(1);
        }
    };

    let db_pool = match db::establish_connection(&config.database_path).await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    };
    let store = SqliteTaskStore::new(db_pool.clone());
    let alarms = SqliteAlarmScheduler::new(db_pool);

    let cli = cli::Cli::parse();

    let result = match cli.command {
        cli::Commands::Say(command) => commands::say::say(&store, &alarms, tz, command).await,
        cli::Commands::Add(command) => commands::add::add_task(&store, &alarms, tz, command).await,
        cli::Commands::List => commands::list::list_tasks(&store, tz).await,
        cli::Commands::Alarms => commands::alarms::list_alarms(&alarms, tz).await,
        cli::Commands::Delete(command) => {
            let task = match store.find_task_by_id(command.id).await {
                Ok(Some(t)) => t,
                Ok(None) => {
                    let error_style = Style::new().red().bold();
                    eprintln!(
                        "{} Task with ID '{}' not found.",
                        "Error:".style(error_style),
                        command.id
                    );
                    return;
                }
                Err(e) => {
                    handle_error(e.into());
                    return;
                }
            };

            if !command.force {
                let confirmation = Confirm::new()
                    .with_prompt(format!(
                        "Are you sure you want to delete task '{}'?",
                        task.description
                    ))
                    .default(false)
                    .interact()
                    .unwrap_or(false);

                if !confirmation {
                    println!("Deletion cancelled.");
                    return;
                }
            }
            commands::delete::delete_task(&store, &alarms, command.id).await
        }
        cli::Commands::Sweep(command) => {
            commands::sweep::sweep(store.clone(), alarms.clone(), command.every).await
        }
    };

    if let Err(e) = result {
        handle_error(e);
    }
}

fn handle_error(err: anyhow::Error) {
    let error_style = Style::new().red().bold();

    if let Some(core_error) = err.downcast_ref::<CoreError>() {
        match core_error {
            CoreError::NotFound(s) => {
                eprintln!("{} Task not found: {}", "Error:".style(error_style), s);
            }
            CoreError::InvalidInput(s) => {
                eprintln!("{} Invalid input: {}", "Error:".style(error_style), s);
            }
            CoreError::AlarmScheduling(s) => {
                eprintln!(
                    "{} Alarm could not be scheduled: {}",
                    "Error:".style(error_style),
                    s.yellow()
                );
            }
            other => {
                eprintln!("{} {}", "Error:".style(error_style), other);
            }
        }
    } else {
        eprintln!("{} {}", "Error:".style(error_style), err);
    }

    std::process::exit(1);
}

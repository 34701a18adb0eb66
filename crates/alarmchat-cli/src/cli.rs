use clap::{Parser, Subcommand};

/// Type natural-language requests and have them become alarms and reminders
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Send a chat message, e.g. "wake me at 7:00" or "task meeting on 25-12-2025"
    Say(SayCommand),
    /// Schedule a task explicitly
    Add(AddCommand),
    /// List scheduled tasks
    List,
    /// Show alarm requests handed to the platform
    Alarms,
    /// Delete a scheduled task
    Delete(DeleteCommand),
    /// Sweep due tasks: reschedule recurring ones, drop completed ones
    Sweep(SweepCommand),
}

#[derive(Parser, Debug, Clone)]
pub struct SayCommand {
    /// The message, as you would type it into the chat box
    #[clap(required = true, num_args = 1..)]
    pub text: Vec<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct AddCommand {
    /// What the reminder is about
    pub description: String,
    /// When it is due (e.g. "tomorrow 7am", "2025-12-25 09:00")
    #[clap(long)]
    pub at: String,
    /// Repeat every day
    #[clap(long)]
    pub daily: bool,
    /// Stop repeating after this date (implies --daily)
    #[clap(long)]
    pub until: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct DeleteCommand {
    /// The ID of the task to delete
    pub id: i64,
    /// Force deletion without confirmation
    #[clap(short, long)]
    pub force: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct SweepCommand {
    /// Keep sweeping on a fixed interval (minutes) instead of running once
    #[clap(long)]
    pub every: Option<u64>,
}

pub mod add;
pub mod alarms;
pub mod delete;
pub mod list;
pub mod say;
pub mod sweep;

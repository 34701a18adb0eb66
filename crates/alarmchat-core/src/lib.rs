//! # Alarmchat Core Library
//!
//! Scheduling core behind the alarmchat CLI: persisted scheduled-task records,
//! the periodic due-task sweeper that keeps them honest against real time, and
//! the port through which future alarm deliveries are requested.
//!
//! ## Core Modules
//!
//! - [`db`]: Database connection and migration management
//! - [`models`]: Task records, recurrence variants, and transfer objects
//! - [`store`]: Task persistence behind the [`store::TaskStore`] trait
//! - [`alarm`]: Alarm-scheduling port and the bundled sqlite-backed recorder
//! - [`sweep`]: The due-task sweeper
//! - [`clock`]: Wall-clock abstraction so sweeps are testable with fake time
//! - [`error`]: Error types with context
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use alarmchat_core::{
//!     alarm::SqliteAlarmScheduler,
//!     clock::SystemClock,
//!     db,
//!     models::{NewTaskData, Recurrence},
//!     store::{SqliteTaskStore, TaskStore},
//!     sweep::Sweeper,
//! };
//! use chrono::Utc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let pool = db::establish_connection("alarmchat.db").await?;
//!     let store = SqliteTaskStore::new(pool.clone());
//!
//!     let task = store
//!         .add_task(NewTaskData {
//!             description: "Daily standup".to_string(),
//!             execution_time: Utc::now(),
//!             recurrence: Recurrence::Daily,
//!         })
//!         .await?;
//!     println!("Created task {}", task.id);
//!
//!     let sweeper = Sweeper::new(store, SqliteAlarmScheduler::new(pool), SystemClock);
//!     let report = sweeper.run().await?;
//!     println!("Swept {} due task(s)", report.due);
//!
//!     Ok(())
//! }
//! ```

pub mod alarm;
pub mod clock;
pub mod db;
pub mod error;
pub mod models;
pub mod store;
pub mod sweep;

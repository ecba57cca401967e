//! # Tomato Core Library
//!
//! Business logic for the Tomato Pomodoro timer. The `tomato` CLI is a thin
//! terminal layer over this crate.
//!
//! ## Architecture
//!
//! - **Session Controller**: a tick-driven state machine over work, short
//!   break and long break. The caller invokes `tick()` once per second.
//! - **Clock**: injected tick source, real-time or instant for tests
//! - **Session**: host that owns the controller plus stats, tasks, quotes,
//!   persistence and notifications
//! - **Storage**: SQLite key-value store and TOML configuration
//!
//! ## Key Components
//!
//! - [`SessionController`]: core timer state machine
//! - [`Session`]: single-writer host reacting to phase completions
//! - [`Database`]: key-value persistence for stats and tasks
//! - [`Config`]: application configuration management

pub mod error;
pub mod events;
pub mod notify;
pub mod quotes;
pub mod session;
pub mod stats;
pub mod storage;
pub mod tasks;
pub mod timer;

pub use error::{ConfigError, CoreError, StorageError};
pub use events::Event;
pub use notify::{Cue, Notifier, Notifiers};
pub use session::{Command, RunOptions, RunSummary, Session};
pub use stats::Stats;
pub use storage::{Config, Database, KvStore, MemoryStore};
pub use tasks::{Task, TaskList};
pub use timer::{Clock, InstantClock, IntervalClock, Mode, SessionController, Settings};

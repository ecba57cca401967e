pub mod completions;
pub mod config;
pub mod quote;
pub mod stats;
pub mod task;
pub mod timer;

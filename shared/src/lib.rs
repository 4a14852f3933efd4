//! Shared types for the scenario orchestration system
//!
//! Contains the deployable instance model, the retry utility used for
//! health polling, and the logger facade every component logs through.

pub mod errors;
pub mod logging;
pub mod retry;
pub mod types;

pub use errors::*;
pub use logging::{LogRecord, LogSink, Logger, MemorySink, TracingSink};
pub use retry::{wait_for, RetryPolicy};
pub use types::*;

//! Shared error types for the scenario orchestration system

use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SharedError {
    #[error("Retry budget exhausted after {attempts} attempts ({elapsed:?})")]
    RetryExhausted { attempts: u32, elapsed: Duration },

    #[error("Invalid URL: {input}")]
    InvalidUrl { input: String },

    #[error("Log sink failure: {message}")]
    Sink { message: String },
}

pub type SharedResult<T> = Result<T, SharedError>;

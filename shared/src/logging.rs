//! Logger facade shared by every orchestration component
//!
//! A [`Logger`] is a cheap handle over process-scoped sink state. The sink is
//! created on the first `log` call and lives as long as any handle does; the
//! global handle lives for the whole process. Logging is best-effort: sink
//! errors and sink panics never reach the caller.

use crate::errors::{SharedError, SharedResult};
use crate::types::{Labels, LogLevel};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, OnceLock};
use tracing::{debug, error, info, trace, warn};

static GLOBAL_LOGGER: OnceLock<Logger> = OnceLock::new();

/// Structured log event handed to sinks
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LogRecord {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub message: String,
    pub source_component: String,
    pub labels: Labels,
}

/// Destination for log records
pub trait LogSink: Send + Sync {
    fn emit(&self, record: &LogRecord) -> SharedResult<()>;
}

type SinkFactory = Box<dyn Fn() -> Arc<dyn LogSink> + Send + Sync>;

struct LoggerState {
    factory: SinkFactory,
    sink: OnceLock<Arc<dyn LogSink>>,
}

/// Handle to a lazily initialized log sink
#[derive(Clone)]
pub struct Logger {
    state: Arc<LoggerState>,
}

impl Logger {
    /// Process-wide logger backed by [`TracingSink`]
    pub fn global() -> Logger {
        GLOBAL_LOGGER
            .get_or_init(|| Logger::lazy(|| Arc::new(TracingSink::new(None)) as Arc<dyn LogSink>))
            .clone()
    }

    /// Logger whose sink is built by `factory` on first use
    pub fn lazy<F>(factory: F) -> Self
    where
        F: Fn() -> Arc<dyn LogSink> + Send + Sync + 'static,
    {
        Self {
            state: Arc::new(LoggerState {
                factory: Box::new(factory),
                sink: OnceLock::new(),
            }),
        }
    }

    /// Logger writing to an already constructed sink
    pub fn with_sink(sink: Arc<dyn LogSink>) -> Self {
        Self::lazy(move || sink.clone())
    }

    pub fn is_initialized(&self) -> bool {
        self.state.sink.get().is_some()
    }

    pub fn log(&self, level: LogLevel, text: &str, source_component: &str, labels: &Labels) {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            let sink = self.state.sink.get_or_init(|| (self.state.factory)());
            let record = LogRecord {
                timestamp: Utc::now(),
                level,
                message: text.to_string(),
                source_component: source_component.to_string(),
                labels: labels.clone(),
            };
            sink.emit(&record)
        }));

        match outcome {
            Ok(Ok(())) => {}
            Ok(Err(e)) => eprintln!("⚠️ Dropped log event from {source_component}: {e}"),
            Err(_) => eprintln!("⚠️ Log sink panicked while handling event from {source_component}"),
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Logger::global()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("initialized", &self.is_initialized())
            .finish()
    }
}

/// Sink forwarding records to `tracing`, installing a subscriber if none exists
pub struct TracingSink;

impl TracingSink {
    pub fn new(log_level: Option<&str>) -> Self {
        init_tracing_with_level(log_level);
        Self
    }
}

impl LogSink for TracingSink {
    fn emit(&self, record: &LogRecord) -> SharedResult<()> {
        let labels = serde_json::to_string(&record.labels).map_err(|e| SharedError::Sink {
            message: e.to_string(),
        })?;
        let timestamp = record.timestamp.format("%H:%M:%S%.3f").to_string();
        let component = record.source_component.as_str();
        let message = record.message.as_str();

        match record.level {
            LogLevel::Error => error!(component = %component, labels = %labels, timestamp = %timestamp, "{}", message),
            LogLevel::Warn => warn!(component = %component, labels = %labels, timestamp = %timestamp, "{}", message),
            LogLevel::Info => info!(component = %component, labels = %labels, timestamp = %timestamp, "{}", message),
            LogLevel::Debug => debug!(component = %component, labels = %labels, timestamp = %timestamp, "{}", message),
            LogLevel::Trace => trace!(component = %component, labels = %labels, timestamp = %timestamp, "{}", message),
        }
        Ok(())
    }
}

/// In-memory sink collecting every record, for assertions in scenario tests
#[derive(Default)]
pub struct MemorySink {
    records: Mutex<Vec<LogRecord>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<LogRecord> {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.records().into_iter().map(|r| r.message).collect()
    }

    /// Count records at `level` whose message contains `fragment`
    pub fn count_matching(&self, level: LogLevel, fragment: &str) -> usize {
        self.records()
            .iter()
            .filter(|r| r.level == level && r.message.contains(fragment))
            .count()
    }

    pub fn contains(&self, level: LogLevel, fragment: &str) -> bool {
        self.count_matching(level, fragment) > 0
    }
}

impl LogSink for MemorySink {
    fn emit(&self, record: &LogRecord) -> SharedResult<()> {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(record.clone());
        Ok(())
    }
}

/// Install the stdout subscriber; returns false if one was already installed
///
/// `RUST_LOG` takes precedence over `log_level` when set.
pub fn init_tracing_with_level(log_level: Option<&str>) -> bool {
    use tracing_subscriber::{fmt, EnvFilter};

    let base_level = log_level.unwrap_or("info");
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("scenario={base_level},runner={base_level},shared={base_level}"))
    });

    fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init()
        .is_ok()
}

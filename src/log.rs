use std::fmt::Display;

use tokio::{sync::mpsc::Sender, task::JoinHandle};

use crate::{ArcPath, fs::Fs};

mod core;
mod data;
mod message;
mod mock;
#[cfg(test)]
mod tests;

pub use data::{LogLevel, LogMessage};
use message::Message;

/// The logging actor that provides a thread-safe interface for logging
/// operations.
///
/// This enum represents either a real logging actor or a mock implementation
/// for testing purposes. Messages below the configured print level go only
/// to the log files; the rest are also buffered and written to stderr when
/// the logger is flushed at shutdown, after the UI has released the
/// terminal.
///
/// # Examples
/// ```ignore
/// let log = Log::spawn(fs, LogLevel::Info, 7, log_dir).await?;
/// log.info("app", "starting up");
/// ```
///
/// # Thread Safety
/// This type is designed to be safely shared between threads. Cloning is
/// cheap as it only copies the channel sender or mock reference.
#[derive(Debug, Clone)]
pub enum Log {
    /// A real logging actor that writes to files and stderr
    Actual(Sender<Message>),
    /// A mock implementation storing messages in memory
    Mock(mock::Mock),
}

impl Log {
    /// Creates a new logging instance and spawns its actor.
    ///
    /// # Arguments
    /// * `fs` - The filesystem actor for file operations
    /// * `level` - Minimum level for messages to reach stderr on flush
    /// * `max_age` - Maximum age of log files in days before deletion
    /// * `log_dir` - Directory where log files are stored
    ///
    /// # Errors
    /// Returns an error if the log directory or files cannot be created.
    pub async fn spawn(
        fs: Fs,
        level: LogLevel,
        max_age: usize,
        log_dir: ArcPath,
    ) -> anyhow::Result<Self> {
        let (log, _) = core::Core::build(fs, level, max_age, log_dir).await?.spawn();
        Ok(log)
    }

    /// Creates a new mock logging instance for testing.
    pub fn mock() -> Self {
        Self::Mock(mock::Mock::new())
    }

    /// Sends a [`LogMessage`] to the logger from a detached task so the
    /// caller is never blocked on file I/O.
    ///
    /// # Panics
    /// If the logger was already flushed.
    fn log(&self, scope: &'static str, message: String, level: LogLevel) {
        match self {
            Self::Actual(sender) => {
                let sender = sender.clone();
                tokio::spawn(async move {
                    sender
                        .send(Message::Log(LogMessage {
                            level,
                            scope,
                            message,
                        }))
                        .await
                        .expect("attempt to use logger after a flush");
                });
            }
            Self::Mock(mock) => mock.log(scope, message, level),
        }
    }

    /// Log a message with the `INFO` level.
    pub fn info<M: Display>(&self, scope: &'static str, message: M) {
        self.log(scope, message.to_string(), LogLevel::Info);
    }

    /// Log a message with the `WARNING` level.
    pub fn warn<M: Display>(&self, scope: &'static str, message: M) {
        self.log(scope, message.to_string(), LogLevel::Warning);
    }

    /// Log a message with the `ERROR` level.
    pub fn error<M: Display>(&self, scope: &'static str, message: M) {
        self.log(scope, message.to_string(), LogLevel::Error);
    }

    /// Flushes the logger by printing buffered messages to stderr and
    /// closing the log files. The logger is destroyed; any later logging
    /// attempt will panic.
    ///
    /// # Panics
    /// If called twice.
    pub fn flush(self) -> JoinHandle<()> {
        match self {
            Self::Actual(sender) => tokio::spawn(async move {
                sender
                    .send(Message::Flush)
                    .await
                    .expect("flushing a logger twice");
            }),
            Self::Mock(mock) => mock.flush(),
        }
    }

    /// Deletes log files older than the `max_age` given at spawn time.
    pub async fn collect_garbage(&self) {
        match self {
            Self::Actual(sender) => {
                let _ = sender.send(Message::CollectGarbage).await;
            }
            Self::Mock(_) => {}
        }
    }
}

use anyhow::Context;
use tokio::{io::AsyncWriteExt, task::JoinHandle};

use crate::{ArcFile, ArcPath, fs::Fs};

use super::{
    Log,
    data::{LogLevel, LogMessage},
    message::Message,
};

/// Prefix of timestamped log file names, also used to recognize files that
/// belong to the garbage collector.
const LOG_FILE_PREFIX: &str = "ring-my-phone_";

/// The core of the logging system that manages logging to both stderr and
/// log files.
///
/// Writes every message to a timestamped log file and to a "latest" log
/// file, and keeps a buffer of messages at or above the configured print
/// level to emit on stderr when the logger is flushed.
#[derive(Debug)]
pub struct Core {
    /// Filesystem interface for file operations
    fs: Fs,
    /// Directory where log files are stored
    log_dir: ArcPath,
    /// Path to the current timestamped log file
    log_path: ArcPath,
    /// Handle to the current log file
    log_file: ArcFile,
    /// Handle to the "latest" log file
    latest_log_file: ArcFile,
    /// Buffer of messages to be printed to stderr on flush
    logs_to_print: Vec<LogMessage>,
    /// Minimum level of messages to be printed to stderr
    print_level: LogLevel,
    /// Maximum age of log files in days before they are deleted
    max_age: usize,
}

impl Core {
    /// Creates a new logger instance with the specified configuration.
    ///
    /// # Errors
    /// Returns an error if the log directory or either log file cannot be
    /// created.
    pub async fn build(
        fs: Fs,
        level: LogLevel,
        max_age: usize,
        log_dir: ArcPath,
    ) -> anyhow::Result<Self> {
        let name = format!(
            "{LOG_FILE_PREFIX}{}.log",
            chrono::Utc::now().format("%Y-%m-%d-%H-%M-%S")
        );
        let log_path = ArcPath::from(log_dir.join(name).as_path());
        let latest_log_path = ArcPath::from(log_dir.join("latest.log").as_path());

        fs.mkdir(log_dir.clone())
            .await
            .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;

        let log_file = fs
            .open_file(log_path.clone())
            .await
            .with_context(|| format!("Failed to create log file: {}", log_path.display()))?;
        let latest_log_file = fs.open_file(latest_log_path.clone()).await.with_context(|| {
            format!(
                "Failed to create latest log file: {}",
                latest_log_path.display()
            )
        })?;

        Ok(Self {
            fs,
            log_dir,
            log_path,
            log_file,
            latest_log_file,
            logs_to_print: Vec::new(),
            print_level: level,
            max_age,
        })
    }

    /// Transforms the logger core into an actor.
    ///
    /// # Returns
    /// A tuple containing:
    /// - A [`Log`] instance that can be used to send messages to the actor
    /// - A join handle for the spawned task
    pub fn spawn(mut self) -> (Log, JoinHandle<()>) {
        let (tx, mut rx) = tokio::sync::mpsc::channel(crate::BUFFER_SIZE);
        let handle = tokio::spawn(async move {
            while let Some(command) = rx.recv().await {
                match command {
                    Message::Log(msg) => {
                        self.log(msg).await;
                    }
                    Message::Flush => {
                        self.flush();
                        rx.close();
                        break;
                    }
                    Message::CollectGarbage => {
                        self.collect_garbage().await;
                    }
                }
            }
        });
        (Log::Actual(tx), handle)
    }

    /// Writes a message to both log files and, if it meets the print level,
    /// to the stderr buffer.
    ///
    /// # Panics
    /// If either log file cannot be written.
    async fn log(&mut self, message: LogMessage) {
        let line = format!("{}\n", &message);

        let mut lock = self.log_file.write().await;
        lock.write_all(line.as_bytes())
            .await
            .expect("Failed to write to the current log file");
        lock.flush()
            .await
            .expect("Failed to flush the current log file");
        drop(lock);

        let mut lock = self.latest_log_file.write().await;
        lock.write_all(line.as_bytes())
            .await
            .expect("Failed to write to the latest log file");
        lock.flush()
            .await
            .expect("Failed to flush the latest log file");
        drop(lock);

        if message.level >= self.print_level {
            self.logs_to_print.push(message);
        }
    }

    /// Prints buffered messages to stderr and destroys the logger.
    fn flush(self) {
        for message in &self.logs_to_print {
            eprintln!("{}", message);
        }
        if !self.logs_to_print.is_empty() {
            eprintln!("Check the full log file: {}", self.log_path.display());
        }
    }

    /// Deletes log files older than `max_age` days. A `max_age` of zero
    /// disables collection.
    async fn collect_garbage(&mut self) {
        if self.max_age == 0 {
            return;
        }

        let now = std::time::SystemTime::now();

        let Ok(entries) = self.fs.read_dir(self.log_dir.clone()).await else {
            self.log(LogMessage {
                level: LogLevel::Error,
                scope: "log",
                message: "Failed to read the logs directory during garbage collection".into(),
            })
            .await;
            return;
        };

        for entry in entries {
            let Some(filename) = entry.file_name() else {
                continue;
            };
            let filename = filename.to_string_lossy();
            if !filename.starts_with(LOG_FILE_PREFIX) || !filename.ends_with(".log") {
                continue;
            }
            if entry == self.log_path {
                continue;
            }

            let Ok(modified) = self.fs.modified(entry.clone()).await else {
                continue;
            };
            let Ok(age) = now.duration_since(modified) else {
                continue;
            };
            let age_days = age.as_secs() / 60 / 60 / 24;

            if age_days as usize > self.max_age && self.fs.remove_file(entry.clone()).await.is_err()
            {
                self.log(LogMessage {
                    level: LogLevel::Warning,
                    scope: "log",
                    message: format!("Failed to remove the log file: {}", entry.display()),
                })
                .await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::path::Path;

    use super::*;
    use crate::ArcPath;

    fn log_dir() -> ArcPath {
        ArcPath::from(Path::new("/mock/logs"))
    }

    #[tokio::test]
    async fn test_build_and_log() {
        let fs = Fs::mock(HashMap::new());
        let mut core = Core::build(fs, LogLevel::Info, 0, log_dir()).await.unwrap();
        core.log(LogMessage {
            level: LogLevel::Info,
            scope: "test",
            message: "hello".to_string(),
        })
        .await;
        assert_eq!(core.logs_to_print.len(), 1);
        core.flush();
    }

    #[tokio::test]
    async fn test_print_level_filtering() {
        let fs = Fs::mock(HashMap::new());
        let mut core = Core::build(fs, LogLevel::Warning, 0, log_dir())
            .await
            .unwrap();
        core.log(LogMessage {
            level: LogLevel::Info,
            scope: "test",
            message: "quiet".to_string(),
        })
        .await;
        assert!(core.logs_to_print.is_empty());
        core.log(LogMessage {
            level: LogLevel::Error,
            scope: "test",
            message: "loud".to_string(),
        })
        .await;
        assert_eq!(core.logs_to_print.len(), 1);
    }

    #[tokio::test]
    async fn test_collect_garbage_removes_old_logs() {
        // Mock files report the epoch as mtime, so any nonzero max_age sees
        // them as expired.
        let stale = ArcPath::from(Path::new("/mock/logs/ring-my-phone_2000-01-01-00-00-00.log"));
        let other = ArcPath::from(Path::new("/mock/logs/latest.log"));
        let mut files = HashMap::new();
        files.insert(stale.clone(), String::new());
        files.insert(other.clone(), String::new());
        let fs = Fs::mock(files);

        let mut core = Core::build(fs.clone(), LogLevel::Info, 7, log_dir())
            .await
            .unwrap();
        core.collect_garbage().await;

        let remaining = fs.read_dir(log_dir()).await.unwrap();
        assert!(!remaining.contains(&stale));
        assert!(remaining.contains(&other));
    }

    #[tokio::test]
    async fn test_collect_garbage_noop_when_max_age_zero() {
        let stale = ArcPath::from(Path::new("/mock/logs/ring-my-phone_2000-01-01-00-00-00.log"));
        let mut files = HashMap::new();
        files.insert(stale.clone(), String::new());
        let fs = Fs::mock(files);

        let mut core = Core::build(fs.clone(), LogLevel::Info, 0, log_dir())
            .await
            .unwrap();
        core.collect_garbage().await;

        assert!(fs.read_dir(log_dir()).await.unwrap().contains(&stale));
    }
}

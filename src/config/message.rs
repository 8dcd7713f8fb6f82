use tokio::sync::oneshot;

use crate::{ArcPath, ArcStr, log::LogLevel};

use super::data::{PathOpt, StrOpt, USizeOpt};

/// Messages that can be sent to the configuration actor.
///
/// Each variant represents an operation on the configuration; operations
/// that return a value carry a channel to send the result back to the
/// caller.
#[derive(Debug)]
pub enum Message {
    /// Load configuration from file
    Load {
        tx: oneshot::Sender<anyhow::Result<()>>,
    },
    /// Save configuration to file
    Save {
        tx: oneshot::Sender<anyhow::Result<()>>,
    },
    /// Get a path-based configuration value
    GetPath {
        opt: PathOpt,
        tx: oneshot::Sender<ArcPath>,
    },
    /// Get a numeric configuration value
    GetUSize {
        opt: USizeOpt,
        tx: oneshot::Sender<usize>,
    },
    /// Get a string configuration value
    GetStr {
        opt: StrOpt,
        tx: oneshot::Sender<ArcStr>,
    },
    /// Get the current log level
    GetLogLevel { tx: oneshot::Sender<LogLevel> },
    /// Set a path-based configuration value
    SetPath { opt: PathOpt, path: ArcPath },
    /// Set a numeric configuration value
    SetUSize { opt: USizeOpt, value: usize },
    /// Set a string configuration value
    SetStr { opt: StrOpt, value: ArcStr },
    /// Set the log level
    SetLogLevel { level: LogLevel },
}

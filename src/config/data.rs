use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{ArcPath, ArcStr, log::LogLevel};

/// Shortest idle-reset delay the status display supports.
pub const RESET_DELAY_MIN_MS: usize = 3000;
/// Longest idle-reset delay the status display supports.
pub const RESET_DELAY_MAX_MS: usize = 5000;

/// Options for path-based configuration values.
#[derive(Debug, Clone, Copy)]
pub enum PathOpt {
    /// Directory where log files are stored
    LogDir,
}

/// Options for numeric configuration values.
#[derive(Debug, Clone, Copy)]
pub enum USizeOpt {
    /// Maximum age of log files in days before they are deleted
    MaxAge,
    /// Byte budget of the outbound message queue
    OutboxBytes,
    /// Largest inbound frame accepted from the bridge, in bytes
    InboxBytes,
    /// Idle delay before the status display reverts to Ready, in
    /// milliseconds
    ResetDelayMs,
    /// Dictionary key the command value is written under
    CommandKey,
}

/// Options for string configuration values.
#[derive(Debug, Clone, Copy)]
pub enum StrOpt {
    /// Address of the phone's companion bridge
    BridgeAddr,
}

/// The configuration data structure that holds all configurable values.
///
/// Unknown keys in the file are ignored and missing keys fall back to their
/// defaults, so a partially edited file still loads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Data {
    /// Address of the phone's companion bridge
    bridge_addr: String,
    /// Dictionary key the command value is written under
    command_key: usize,
    /// Idle delay before the status display reverts to Ready
    reset_delay_ms: usize,
    /// Byte budget of the outbound message queue
    outbox_bytes: usize,
    /// Largest inbound frame accepted from the bridge
    inbox_bytes: usize,
    /// Directory where log files are stored
    log_dir: PathBuf,
    /// Current log level
    log_level: LogLevel,
    /// Maximum age of log files in days before they are deleted
    max_age: usize,
}

impl Default for Data {
    fn default() -> Self {
        Self {
            bridge_addr: "127.0.0.1:17235".to_string(),
            command_key: 0x0,
            reset_delay_ms: 4000,
            outbox_bytes: 256,
            inbox_bytes: 256,
            log_dir: PathBuf::from("/tmp/ring-my-phone/logs"),
            log_level: LogLevel::Warning,
            max_age: 0,
        }
    }
}

impl Data {
    /// Gets a path-based configuration value.
    pub fn path(&self, opt: PathOpt) -> ArcPath {
        match opt {
            PathOpt::LogDir => ArcPath::from(self.log_dir.as_path()),
        }
    }

    /// Sets a path-based configuration value.
    pub fn set_path(&mut self, opt: PathOpt, path: ArcPath) {
        match opt {
            PathOpt::LogDir => self.log_dir = path.to_path_buf(),
        }
    }

    /// Gets a numeric configuration value.
    ///
    /// The reset delay is clamped to the supported 3–5 second window, so an
    /// out-of-range file value cannot wedge the display.
    pub fn usize(&self, opt: USizeOpt) -> usize {
        match opt {
            USizeOpt::MaxAge => self.max_age,
            USizeOpt::OutboxBytes => self.outbox_bytes,
            USizeOpt::InboxBytes => self.inbox_bytes,
            USizeOpt::ResetDelayMs => self
                .reset_delay_ms
                .clamp(RESET_DELAY_MIN_MS, RESET_DELAY_MAX_MS),
            USizeOpt::CommandKey => self.command_key,
        }
    }

    /// Sets a numeric configuration value.
    pub fn set_usize(&mut self, opt: USizeOpt, value: usize) {
        match opt {
            USizeOpt::MaxAge => self.max_age = value,
            USizeOpt::OutboxBytes => self.outbox_bytes = value,
            USizeOpt::InboxBytes => self.inbox_bytes = value,
            USizeOpt::ResetDelayMs => self.reset_delay_ms = value,
            USizeOpt::CommandKey => self.command_key = value,
        }
    }

    /// Gets a string configuration value.
    pub fn str_opt(&self, opt: StrOpt) -> ArcStr {
        match opt {
            StrOpt::BridgeAddr => ArcStr::from(self.bridge_addr.as_str()),
        }
    }

    /// Sets a string configuration value.
    pub fn set_str(&mut self, opt: StrOpt, value: ArcStr) {
        match opt {
            StrOpt::BridgeAddr => self.bridge_addr = value.to_string(),
        }
    }

    /// Gets the current log level.
    pub fn log_level(&self) -> LogLevel {
        self.log_level
    }

    /// Sets the log level.
    pub fn set_log_level(&mut self, level: LogLevel) {
        self.log_level = level;
    }
}

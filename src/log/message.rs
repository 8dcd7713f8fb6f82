use super::data::LogMessage;

/// Messages that can be sent to the logging actor.
#[derive(Debug)]
pub enum Message {
    /// Logs a message with the specified level and content
    Log(LogMessage),
    /// Writes buffered messages to stderr and destroys the logger
    Flush,
    /// Deletes log files older than the configured maximum age
    CollectGarbage,
}

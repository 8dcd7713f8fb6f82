use crate::app::Status;

/// Messages that can be sent to the display actor.
#[derive(Debug)]
pub enum Message {
    /// Update the status region
    Show(Status),
    /// Emit a short attention pulse
    Pulse,
    /// Release the terminal and stop
    Quit,
}

use std::fmt::Display;

use crate::link::Command;

/// What the status region of the display currently says.
///
/// Exactly one instance lives in [`AppState`]; only the App core mutates
/// it. `Ringing` and `Silencing` are the in-progress states shown the
/// moment a button is pressed, `Done` and `Failed` are the delivery
/// outcomes, and the reset timer brings any of them back to `Ready`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Ready,
    Ringing,
    Silencing,
    Done,
    Failed,
}

impl Status {
    /// Text shown in the status region.
    pub fn label(&self) -> &'static str {
        match self {
            Status::Ready => "Ready.",
            Status::Ringing => "Ringing",
            Status::Silencing => "Silencing",
            Status::Done => "Done.",
            Status::Failed => "Failed :(",
        }
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Application state owned by the App core and mutated only on its task.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// The currently displayed status
    pub status: Status,
}

/// What the mock App has recorded.
#[derive(Debug, Clone, Default)]
pub struct MockData {
    /// Commands handed to `resolve`
    pub resolved: Vec<Command>,
    /// Whether shutdown was requested
    pub shutdown_called: bool,
}

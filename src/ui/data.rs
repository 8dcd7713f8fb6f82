use ratatui::style::{Color, Modifier, Style};

use crate::app::Status;

/// The remote's three buttons, mapped onto key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Up key: ask the phone to ring
    Up,
    /// Enter key: reserved, currently a no-op
    Select,
    /// Down key: ask the phone to go silent
    Down,
}

/// Input events emitted by the display actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    /// A button was pressed
    Press(Button),
    /// The user asked to leave
    Quit,
}

/// Style of the status region for each state. The in-progress states draw
/// attention, the outcomes read green/red at a glance.
pub fn status_style(status: Status) -> Style {
    let style = Style::new().add_modifier(Modifier::BOLD);
    match status {
        Status::Ready => style,
        Status::Ringing => style.fg(Color::Yellow),
        Status::Silencing => style.fg(Color::Cyan),
        Status::Done => style.fg(Color::Green),
        Status::Failed => style.fg(Color::Red),
    }
}

/// What the mock display has recorded.
#[derive(Debug, Clone, Default)]
pub struct MockData {
    /// Last status handed to `show`
    pub last_status: Option<Status>,
    /// Number of attention pulses emitted
    pub pulses: usize,
    /// Whether quit was requested
    pub quit_called: bool,
}

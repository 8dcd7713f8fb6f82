use tokio::sync::mpsc::{self, Sender};

use crate::{app::Status, log::Log};

mod core;
mod data;
mod message;
mod mock;

pub use data::{Button, MockData, UiEvent};
use message::Message;

/// The display actor: the terminal stand-in for the watch face.
///
/// This enum represents either a real display actor that owns the terminal
/// or a mock implementation for testing. The real actor draws the three
/// text regions of the watch window, forwards key presses as [`UiEvent`]s
/// on the channel given at spawn time, and emits a terminal bell where the
/// watch would emit a short vibe pulse.
///
/// # Thread Safety
/// This type is designed to be safely shared between threads. Cloning is
/// cheap as it only copies the channel sender or mock reference.
#[derive(Debug, Clone)]
pub enum Ui {
    /// A real display actor that owns the terminal
    Actual(Sender<Message>),
    /// A mock implementation recording what was shown
    Mock(mock::Mock),
}

impl Ui {
    /// Takes over the terminal and spawns the display actor.
    ///
    /// # Arguments
    /// * `log` - The logging actor
    /// * `ui_events` - Channel on which key presses are forwarded
    ///
    /// # Errors
    /// Returns an error if the terminal cannot be initialized.
    pub fn spawn(log: Log, ui_events: mpsc::Sender<UiEvent>) -> anyhow::Result<Self> {
        let (ui, _) = core::Core::new(log, ui_events).spawn()?;
        Ok(ui)
    }

    /// Creates a new mock display instance for testing.
    pub fn mock() -> Self {
        Self::Mock(mock::Mock::new())
    }

    /// Updates the status region.
    pub async fn show(&self, status: Status) {
        match self {
            Self::Actual(sender) => {
                let _ = sender.send(Message::Show(status)).await;
            }
            Self::Mock(mock) => mock.show(status).await,
        }
    }

    /// Emits a short attention pulse.
    pub async fn pulse(&self) {
        match self {
            Self::Actual(sender) => {
                let _ = sender.send(Message::Pulse).await;
            }
            Self::Mock(mock) => mock.pulse().await,
        }
    }

    /// Releases the terminal and stops the display actor.
    pub async fn quit(&self) {
        match self {
            Self::Actual(sender) => {
                let _ = sender.send(Message::Quit).await;
            }
            Self::Mock(mock) => mock.quit().await,
        }
    }
}

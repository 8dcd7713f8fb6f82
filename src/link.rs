use tokio::sync::mpsc::{Sender, error::TrySendError};

use crate::{config::Config, log::Log};

mod core;
mod data;
mod message;
mod mock;
#[cfg(test)]
mod tests;

pub use data::{Command, Frame, FrameError, LinkError, LinkEvent, TUPLE_UINT, Tuple};
use message::Message;

/// The link actor: the message channel between this remote and the phone's
/// companion bridge.
///
/// This enum represents either a real link actor that owns the bridge
/// connection or a mock implementation for testing. Sends are
/// fire-and-forget: [`send`] only queues a command on the bounded outbox,
/// and the delivery outcome arrives later as a [`LinkEvent`] on the event
/// channel given at spawn time. Inbound traffic from the bridge surfaces on
/// the same event channel.
///
/// # Examples
/// ```ignore
/// let link = Link::spawn(&config, log, events_tx).await?;
/// link.send(Command::Start)?;
/// ```
///
/// # Thread Safety
/// This type is designed to be safely shared between threads. Cloning is
/// cheap as it only copies the channel sender or mock reference.
///
/// [`send`]: Link::send
#[derive(Debug, Clone)]
pub enum Link {
    /// A real link actor that owns the bridge connection
    Actual(Sender<Message>),
    /// A mock implementation recording sent commands
    Mock(mock::Mock),
}

impl Link {
    /// Connects to the companion bridge and spawns the link actor.
    ///
    /// # Arguments
    /// * `config` - Source of the bridge address, command key, and queue
    ///   budgets
    /// * `log` - The logging actor
    /// * `events` - Channel on which delivery outcomes and inbound messages
    ///   are reported
    ///
    /// # Errors
    /// Returns an error if the bridge cannot be reached.
    pub async fn spawn(
        config: &Config,
        log: Log,
        events: Sender<LinkEvent>,
    ) -> anyhow::Result<Self> {
        let (link, _) = core::Core::build(config, log, events).await?.spawn();
        Ok(link)
    }

    /// Creates a new mock link instance for testing.
    pub fn mock() -> Self {
        Self::Mock(mock::Mock::new())
    }

    /// Queues a command for transmission.
    ///
    /// Returns immediately; the delivery outcome arrives later on the event
    /// channel. If the outbox has no room left the command is not queued
    /// and [`LinkError::OutboxFull`] is returned.
    pub async fn send(&self, cmd: Command) -> Result<(), LinkError> {
        match self {
            Self::Actual(sender) => {
                sender
                    .try_send(Message::Send { cmd })
                    .map_err(|err| match err {
                        TrySendError::Full(_) => LinkError::OutboxFull,
                        TrySendError::Closed(_) => LinkError::Closed,
                    })
            }
            Self::Mock(mock) => mock.send(cmd).await,
        }
    }
}

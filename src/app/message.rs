use tokio::sync::oneshot;

/// Messages that can be sent to the App actor.
///
/// Button presses, link outcomes, and timer firings reach the actor on
/// their own channels; the mailbox only carries requests from outside the
/// event loop.
#[derive(Debug)]
pub enum Message {
    /// Shut the actor down, releasing the terminal
    Shutdown {
        tx: oneshot::Sender<anyhow::Result<()>>,
    },
}

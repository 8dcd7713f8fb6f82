use std::sync::Arc;

use tokio::sync::Mutex;

use super::data::{Command, LinkError};

/// In-memory state backing the link mock.
#[derive(Debug, Default)]
struct MockData {
    /// Commands handed to `send`, in order
    sent: Vec<Command>,
    /// When set, `send` reports a full outbox instead of queueing
    reject: bool,
}

/// Mock implementation of the Link actor for testing purposes.
///
/// Records sent commands for inspection and can be told to refuse sends,
/// standing in for a full outbox.
#[derive(Debug, Clone)]
pub struct Mock {
    data: Arc<Mutex<MockData>>,
}

impl Mock {
    /// Creates a new mock instance accepting all sends.
    pub fn new() -> Self {
        Self {
            data: Arc::new(Mutex::new(MockData::default())),
        }
    }

    /// Queues a command, or reports a full outbox when rejection is on.
    pub async fn send(&self, cmd: Command) -> Result<(), LinkError> {
        let mut data = self.data.lock().await;
        if data.reject {
            return Err(LinkError::OutboxFull);
        }
        data.sent.push(cmd);
        Ok(())
    }

    /// Returns the commands sent so far, in order.
    pub async fn sent(&self) -> Vec<Command> {
        self.data.lock().await.sent.clone()
    }

    /// Makes subsequent sends fail with a full outbox.
    pub async fn set_reject(&self, reject: bool) {
        self.data.lock().await.reject = reject;
    }
}

impl Default for Mock {
    fn default() -> Self {
        Self::new()
    }
}

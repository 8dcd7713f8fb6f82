use std::sync::Arc;

use tokio::sync::Mutex;

use crate::app::Status;

use super::data::MockData;

/// Mock implementation of the Ui actor for testing purposes.
///
/// Records the last shown status, pulse count, and quit requests instead of
/// touching a terminal.
#[derive(Debug, Clone)]
pub struct Mock {
    data: Arc<Mutex<MockData>>,
}

impl Mock {
    /// Creates a new mock instance with nothing recorded.
    pub fn new() -> Self {
        Self {
            data: Arc::new(Mutex::new(MockData::default())),
        }
    }

    /// Records the shown status.
    pub async fn show(&self, status: Status) {
        self.data.lock().await.last_status = Some(status);
    }

    /// Records an attention pulse.
    pub async fn pulse(&self) {
        self.data.lock().await.pulses += 1;
    }

    /// Records the quit request.
    pub async fn quit(&self) {
        self.data.lock().await.quit_called = true;
    }

    /// Returns a copy of everything recorded so far.
    pub async fn get_data(&self) -> MockData {
        self.data.lock().await.clone()
    }
}

impl Default for Mock {
    fn default() -> Self {
        Self::new()
    }
}

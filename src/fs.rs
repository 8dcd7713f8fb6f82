use std::{io, time::SystemTime};

use anyhow::Context;
use tokio::sync::mpsc::Sender;

use crate::{ArcFile, ArcPath};

mod core;
mod message;
mod mock;
#[cfg(test)]
mod tests;

pub use message::Message;

/// The filesystem actor that provides a thread-safe interface for file
/// operations.
///
/// This enum represents either a real filesystem actor or a mock
/// implementation for testing purposes. It provides a unified interface for
/// file operations regardless of the underlying implementation.
///
/// # Examples
/// ```ignore
/// let fs = Fs::spawn();
/// let contents = fs.read_to_string(path).await?;
/// ```
///
/// # Thread Safety
/// This type is designed to be safely shared between threads. Cloning is
/// cheap as it only copies the channel sender or mock reference.
#[derive(Debug, Clone)]
pub enum Fs {
    /// A real filesystem actor backed by tokio's fs primitives
    Actual(Sender<Message>),
    /// A mock implementation keeping file contents in memory
    Mock(mock::Mock),
}

impl Fs {
    /// Creates a new filesystem instance and spawns its actor.
    pub fn spawn() -> Self {
        let (fs, _) = core::Core::new().spawn();
        fs
    }

    /// Creates a new mock filesystem instance for testing.
    ///
    /// # Arguments
    /// * `files` - Initial file contents keyed by path
    pub fn mock(files: std::collections::HashMap<ArcPath, String>) -> Self {
        Self::Mock(mock::Mock::new(files))
    }

    /// Opens (or creates) a file for appending and returns a shared handle.
    /// Handles are cached, so two callers opening the same path share one
    /// file descriptor.
    pub async fn open_file(&self, path: ArcPath) -> io::Result<ArcFile> {
        match self {
            Self::Actual(sender) => {
                let (tx, rx) = tokio::sync::oneshot::channel();
                sender
                    .send(Message::OpenFile { path, tx })
                    .await
                    .context("Sending message to Fs actor")
                    .expect("Fs actor died");
                rx.await
                    .context("Awaiting response from Fs actor")
                    .expect("Fs actor died")
            }
            Self::Mock(mock) => mock.open_file(path).await,
        }
    }

    /// Reads a whole file into a string.
    pub async fn read_to_string(&self, path: ArcPath) -> io::Result<String> {
        match self {
            Self::Actual(sender) => {
                let (tx, rx) = tokio::sync::oneshot::channel();
                sender
                    .send(Message::ReadToString { path, tx })
                    .await
                    .context("Sending message to Fs actor")
                    .expect("Fs actor died");
                rx.await
                    .context("Awaiting response from Fs actor")
                    .expect("Fs actor died")
            }
            Self::Mock(mock) => mock.read_to_string(path).await,
        }
    }

    /// Replaces a file's contents, creating the file if it does not exist.
    pub async fn write_all(&self, path: ArcPath, contents: String) -> io::Result<()> {
        match self {
            Self::Actual(sender) => {
                let (tx, rx) = tokio::sync::oneshot::channel();
                sender
                    .send(Message::WriteAll { path, contents, tx })
                    .await
                    .context("Sending message to Fs actor")
                    .expect("Fs actor died");
                rx.await
                    .context("Awaiting response from Fs actor")
                    .expect("Fs actor died")
            }
            Self::Mock(mock) => mock.write_all(path, contents).await,
        }
    }

    /// Creates a directory and any missing parents.
    pub async fn mkdir(&self, path: ArcPath) -> io::Result<()> {
        match self {
            Self::Actual(sender) => {
                let (tx, rx) = tokio::sync::oneshot::channel();
                sender
                    .send(Message::Mkdir { path, tx })
                    .await
                    .context("Sending message to Fs actor")
                    .expect("Fs actor died");
                rx.await
                    .context("Awaiting response from Fs actor")
                    .expect("Fs actor died")
            }
            Self::Mock(mock) => mock.mkdir(path).await,
        }
    }

    /// Lists the entries of a directory.
    pub async fn read_dir(&self, path: ArcPath) -> io::Result<Vec<ArcPath>> {
        match self {
            Self::Actual(sender) => {
                let (tx, rx) = tokio::sync::oneshot::channel();
                sender
                    .send(Message::ReadDir { path, tx })
                    .await
                    .context("Sending message to Fs actor")
                    .expect("Fs actor died");
                rx.await
                    .context("Awaiting response from Fs actor")
                    .expect("Fs actor died")
            }
            Self::Mock(mock) => mock.read_dir(path).await,
        }
    }

    /// Removes a file.
    pub async fn remove_file(&self, path: ArcPath) -> io::Result<()> {
        match self {
            Self::Actual(sender) => {
                let (tx, rx) = tokio::sync::oneshot::channel();
                sender
                    .send(Message::RemoveFile { path, tx })
                    .await
                    .context("Sending message to Fs actor")
                    .expect("Fs actor died");
                rx.await
                    .context("Awaiting response from Fs actor")
                    .expect("Fs actor died")
            }
            Self::Mock(mock) => mock.remove_file(path).await,
        }
    }

    /// Returns a file's last modification time.
    pub async fn modified(&self, path: ArcPath) -> io::Result<SystemTime> {
        match self {
            Self::Actual(sender) => {
                let (tx, rx) = tokio::sync::oneshot::channel();
                sender
                    .send(Message::Modified { path, tx })
                    .await
                    .context("Sending message to Fs actor")
                    .expect("Fs actor died");
                rx.await
                    .context("Awaiting response from Fs actor")
                    .expect("Fs actor died")
            }
            Self::Mock(mock) => mock.modified(path).await,
        }
    }
}

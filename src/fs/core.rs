use std::{collections::HashMap, io, sync::Arc};

use tokio::{fs::OpenOptions, sync::RwLock, task::JoinHandle};

use crate::{ArcFile, ArcPath};

use super::{Fs, message::Message};

/// The core of the filesystem actor.
///
/// Wraps tokio's filesystem functions behind a message channel so callers
/// never touch the disk concurrently. Open file handles are cached: two
/// callers opening the same path share one descriptor, which keeps appends
/// from interleaving mid-line.
#[derive(Debug, Default)]
pub struct Core {
    /// The cache of open files, mapping paths to their shared handles
    files: HashMap<ArcPath, ArcFile>,
}

impl Core {
    /// Creates a new filesystem core with an empty handle cache.
    pub fn new() -> Self {
        Default::default()
    }

    /// Transforms the core into an actor ready to receive messages.
    ///
    /// # Returns
    /// A tuple containing:
    /// - An [`Fs`] instance that can be used to send messages to the actor
    /// - A join handle for the spawned task
    pub fn spawn(mut self) -> (Fs, JoinHandle<()>) {
        let (tx, mut rx) = tokio::sync::mpsc::channel(crate::BUFFER_SIZE);
        let handle = tokio::spawn(async move {
            while let Some(msg) = rx.recv().await {
                match msg {
                    Message::OpenFile { path, tx } => {
                        let _ = tx.send(self.open_file(path).await);
                    }
                    Message::ReadToString { path, tx } => {
                        let _ = tx.send(tokio::fs::read_to_string(path.as_ref()).await);
                    }
                    Message::WriteAll { path, contents, tx } => {
                        let _ = tx.send(tokio::fs::write(path.as_ref(), contents).await);
                    }
                    Message::Mkdir { path, tx } => {
                        let _ = tx.send(tokio::fs::create_dir_all(path.as_ref()).await);
                    }
                    Message::ReadDir { path, tx } => {
                        let _ = tx.send(Self::read_dir(path).await);
                    }
                    Message::RemoveFile { path, tx } => {
                        self.files.remove(&path);
                        let _ = tx.send(tokio::fs::remove_file(path.as_ref()).await);
                    }
                    Message::Modified { path, tx } => {
                        let res = match tokio::fs::metadata(path.as_ref()).await {
                            Ok(meta) => meta.modified(),
                            Err(e) => Err(e),
                        };
                        let _ = tx.send(res);
                    }
                }
            }
        });

        (Fs::Actual(tx), handle)
    }

    /// Opens a file for appending, creating it if missing, and caches the
    /// handle so later opens of the same path reuse it.
    async fn open_file(&mut self, path: ArcPath) -> io::Result<ArcFile> {
        if let Some(file) = self.files.get(&path) {
            return Ok(Arc::clone(file));
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .read(true)
            .open(path.as_ref())
            .await?;
        let file = Arc::new(RwLock::new(file));
        self.files.insert(path, Arc::clone(&file));
        Ok(file)
    }

    async fn read_dir(path: ArcPath) -> io::Result<Vec<ArcPath>> {
        let mut entries = tokio::fs::read_dir(path.as_ref()).await?;
        let mut paths = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            paths.push(ArcPath::from(entry.path().as_path()));
        }
        Ok(paths)
    }
}

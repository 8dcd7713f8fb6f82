use std::{
    collections::HashMap,
    io,
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};

use tokio::sync::{Mutex, RwLock};

use crate::{ArcFile, ArcPath};

/// In-memory state backing the filesystem mock.
#[derive(Debug, Default)]
pub struct MockData {
    /// File contents keyed by path
    files: HashMap<ArcPath, String>,
    /// Shared handles already given out for a path
    handles: HashMap<ArcPath, ArcFile>,
}

/// Mock implementation of the Fs actor for testing purposes.
///
/// File contents live in memory; handles returned by `open_file` are backed
/// by anonymous temporary files so code that writes through an [`ArcFile`]
/// still works without touching real paths.
#[derive(Debug, Clone)]
pub struct Mock {
    data: Arc<Mutex<MockData>>,
}

impl Mock {
    /// Creates a new mock instance with the provided file contents.
    pub fn new(files: HashMap<ArcPath, String>) -> Self {
        Self {
            data: Arc::new(Mutex::new(MockData {
                files,
                handles: HashMap::new(),
            })),
        }
    }

    /// Opens a file, backing the handle with an anonymous temporary file.
    pub async fn open_file(&self, path: ArcPath) -> io::Result<ArcFile> {
        let mut data = self.data.lock().await;
        if let Some(file) = data.handles.get(&path) {
            return Ok(Arc::clone(file));
        }
        let file = tokio::fs::File::from_std(tempfile::tempfile()?);
        let file = Arc::new(RwLock::new(file));
        data.files.entry(path.clone()).or_default();
        data.handles.insert(path, Arc::clone(&file));
        Ok(file)
    }

    /// Returns the stored contents for a path, or `NotFound`.
    pub async fn read_to_string(&self, path: ArcPath) -> io::Result<String> {
        let data = self.data.lock().await;
        data.files
            .get(&path)
            .cloned()
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
    }

    /// Stores contents for a path.
    pub async fn write_all(&self, path: ArcPath, contents: String) -> io::Result<()> {
        let mut data = self.data.lock().await;
        data.files.insert(path, contents);
        Ok(())
    }

    /// Directory creation always succeeds in the mock.
    pub async fn mkdir(&self, _path: ArcPath) -> io::Result<()> {
        Ok(())
    }

    /// Lists stored paths whose parent is the given directory.
    pub async fn read_dir(&self, path: ArcPath) -> io::Result<Vec<ArcPath>> {
        let data = self.data.lock().await;
        Ok(data
            .files
            .keys()
            .filter(|p| p.parent() == Some(path.as_ref()))
            .cloned()
            .collect())
    }

    /// Removes a stored file, or `NotFound`.
    pub async fn remove_file(&self, path: ArcPath) -> io::Result<()> {
        let mut data = self.data.lock().await;
        data.handles.remove(&path);
        data.files
            .remove(&path)
            .map(|_| ())
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
    }

    /// All mock files report the epoch as their modification time, so tests
    /// exercising age-based cleanup see them as arbitrarily old.
    pub async fn modified(&self, path: ArcPath) -> io::Result<SystemTime> {
        let data = self.data.lock().await;
        if data.files.contains_key(&path) {
            Ok(UNIX_EPOCH)
        } else {
            Err(io::Error::from(io::ErrorKind::NotFound))
        }
    }
}

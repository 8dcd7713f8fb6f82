use std::{io, time::SystemTime};

use tokio::sync::oneshot::Sender;

use crate::{ArcFile, ArcPath};

/// Messages that can be sent to the filesystem actor.
///
/// Each variant carries the data needed to perform its operation and a
/// channel to send the result back to the caller.
#[derive(Debug)]
pub enum Message {
    /// Opens (or creates) a file for appending, returning a shared handle
    OpenFile {
        path: ArcPath,
        tx: Sender<io::Result<ArcFile>>,
    },
    /// Reads a whole file into a string
    ReadToString {
        path: ArcPath,
        tx: Sender<io::Result<String>>,
    },
    /// Replaces a file's contents
    WriteAll {
        path: ArcPath,
        contents: String,
        tx: Sender<io::Result<()>>,
    },
    /// Creates a directory and any missing parents
    Mkdir {
        path: ArcPath,
        tx: Sender<io::Result<()>>,
    },
    /// Lists the entries of a directory
    ReadDir {
        path: ArcPath,
        tx: Sender<io::Result<Vec<ArcPath>>>,
    },
    /// Removes a file
    RemoveFile {
        path: ArcPath,
        tx: Sender<io::Result<()>>,
    },
    /// Returns a file's last modification time
    Modified {
        path: ArcPath,
        tx: Sender<io::Result<SystemTime>>,
    },
}

use anyhow::Context;

use crate::{ArcPath, fs::Fs};

use super::{Config, data::Data, message::Message};

/// The core configuration actor that handles file I/O and data management.
///
/// Reads and writes the TOML configuration file through the [`Fs`] actor
/// and serves typed accessors over the in-memory copy.
#[derive(Debug)]
pub struct Core {
    /// The filesystem actor for file operations
    fs: Fs,
    /// The path to the configuration file
    path: ArcPath,
    /// The current configuration data
    data: Data,
}

impl Core {
    /// Creates a new configuration core with default data.
    pub fn new(fs: Fs, path: ArcPath) -> Self {
        Self {
            fs,
            path,
            data: Data::default(),
        }
    }

    /// Spawns the configuration actor and returns a handle to it.
    pub fn spawn(mut self) -> (Config, tokio::task::JoinHandle<()>) {
        let (tx, mut rx) = tokio::sync::mpsc::channel(crate::BUFFER_SIZE);
        let handle = tokio::spawn(async move {
            while let Some(msg) = rx.recv().await {
                match msg {
                    Message::Load { tx } => {
                        let _ = tx.send(self.load().await);
                    }
                    Message::Save { tx } => {
                        let _ = tx.send(self.save().await);
                    }
                    Message::GetPath { opt, tx } => {
                        let _ = tx.send(self.data.path(opt));
                    }
                    Message::GetUSize { opt, tx } => {
                        let _ = tx.send(self.data.usize(opt));
                    }
                    Message::GetStr { opt, tx } => {
                        let _ = tx.send(self.data.str_opt(opt));
                    }
                    Message::GetLogLevel { tx } => {
                        let _ = tx.send(self.data.log_level());
                    }
                    Message::SetPath { opt, path } => {
                        self.data.set_path(opt, path);
                    }
                    Message::SetUSize { opt, value } => {
                        self.data.set_usize(opt, value);
                    }
                    Message::SetStr { opt, value } => {
                        self.data.set_str(opt, value);
                    }
                    Message::SetLogLevel { level } => {
                        self.data.set_log_level(level);
                    }
                }
            }
        });
        (Config::Actual(tx), handle)
    }

    /// Loads the configuration from the file.
    async fn load(&mut self) -> anyhow::Result<()> {
        let contents = self
            .fs
            .read_to_string(self.path.clone())
            .await
            .with_context(|| format!("Reading config file: {}", self.path.display()))?;
        self.data = toml::from_str(&contents)
            .with_context(|| format!("Parsing config file: {}", self.path.display()))?;
        Ok(())
    }

    /// Saves the current configuration to the file, creating its directory
    /// if needed.
    async fn save(&self) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            self.fs
                .mkdir(ArcPath::from(parent))
                .await
                .with_context(|| format!("Creating config directory: {}", parent.display()))?;
        }
        let contents = toml::to_string_pretty(&self.data).context("Serializing config")?;
        self.fs
            .write_all(self.path.clone(), contents)
            .await
            .with_context(|| format!("Writing config file: {}", self.path.display()))?;
        Ok(())
    }
}

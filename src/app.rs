use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::{
    sync::{Mutex, mpsc, oneshot},
    task::JoinHandle,
};

use crate::{
    ArcPath,
    link::{Command, LinkEvent},
};

mod core;
mod data;
mod message;

pub use data::{AppState, MockData, Status};
use message::Message;

/// A fully built application: actors up, bridge connected, not yet driving
/// a UI or resolving a command.
#[derive(Debug)]
pub struct Built {
    core: core::Core,
    link_events: mpsc::Receiver<LinkEvent>,
    reset_fires: mpsc::Receiver<()>,
}

/// App actor - central coordinator for the whole application.
///
/// This actor owns the status state machine and the reset timer, and wires
/// the display, link, config, and log actors together. It is driven by UI
/// key events, link delivery outcomes, and reset-timer firings, all merged
/// on one task so the status display always reflects the most recent event
/// it processed.
#[derive(Debug)]
pub enum App {
    /// Built but not spawned
    Ready(Box<Built>),
    /// Real implementation using message passing (spawned)
    Actual(mpsc::Sender<Message>),
    /// Mock implementation for testing
    Mock(Arc<Mutex<MockData>>),
}

impl App {
    /// Creates a new App with full initialization (but not spawned).
    ///
    /// Brings up the filesystem, config, log, and link actors, loading the
    /// configuration file (or writing the defaults back if it is missing)
    /// and connecting to the companion bridge.
    pub async fn build(config_path: ArcPath) -> Result<Self> {
        let (core, link_events, reset_fires) = core::Core::build(config_path).await?;
        Ok(Self::Ready(Box::new(Built {
            core,
            link_events,
            reset_fires,
        })))
    }

    /// Creates a mock App for testing.
    pub fn mock(data: MockData) -> Self {
        Self::Mock(Arc::new(Mutex::new(data)))
    }

    /// Sends one command, waits for its delivery outcome, and returns.
    ///
    /// This is the one-shot CLI path; no UI is created.
    pub async fn resolve(self, command: Command) -> Result<()> {
        match self {
            Self::Ready(built) => {
                let Built {
                    core,
                    mut link_events,
                    ..
                } = *built;
                core.resolve(command, &mut link_events).await
            }
            Self::Actual(_) => Err(anyhow::anyhow!("app already spawned, cannot resolve")),
            Self::Mock(data) => {
                let mut mock_data = data.lock().await;
                mock_data.resolved.push(command);
                Ok(())
            }
        }
    }

    /// Spawns the App actor for interactive mode.
    ///
    /// Takes over the terminal and returns a handle for shutting the actor
    /// down plus a join handle for the actor task.
    pub fn spawn(self) -> Result<(AppHandle, JoinHandle<()>)> {
        match self {
            Self::Ready(built) => {
                let Built {
                    core,
                    link_events,
                    reset_fires,
                } = *built;
                let (app, handle) = core.spawn_interactive(link_events, reset_fires)?;
                Ok((AppHandle { app }, handle))
            }
            Self::Actual(_) => Err(anyhow::anyhow!("app already spawned")),
            Self::Mock(data) => {
                let handle = tokio::spawn(async {});
                Ok((
                    AppHandle {
                        app: App::Mock(data),
                    },
                    handle,
                ))
            }
        }
    }
}

/// Handle for interacting with a spawned App actor.
pub struct AppHandle {
    app: App,
}

impl AppHandle {
    /// Shuts down the spawned App actor, releasing the terminal.
    pub async fn shutdown(&self) -> Result<()> {
        match &self.app {
            App::Actual(sender) => {
                let (tx, rx) = oneshot::channel();
                sender
                    .send(Message::Shutdown { tx })
                    .await
                    .context("Sending shutdown message to App actor")?;
                rx.await
                    .context("Awaiting response for shutdown from App actor")?
            }
            App::Mock(data) => {
                data.lock().await.shutdown_called = true;
                Ok(())
            }
            App::Ready(_) => Err(anyhow::anyhow!("app not spawned")),
        }
    }
}

use std::time::Duration;

use anyhow::Context;
use tokio::{sync::mpsc, task::JoinHandle};

use crate::{
    ArcPath,
    config::{Config, PathOpt, USizeOpt},
    fs::Fs,
    link::{Command, Link, LinkEvent},
    log::Log,
    timer::ResetTimer,
    ui::{Button, Ui, UiEvent},
};

use super::{
    App,
    data::{AppState, Status},
    message::Message,
};

const SCOPE: &str = "app";

/// How long a one-shot CLI send waits for its delivery outcome.
const RESOLVE_WAIT: Duration = Duration::from_secs(10);

/// Core implementation of the App actor: the status state machine and the
/// event-loop driver around it.
#[derive(Debug)]
pub struct Core {
    /// Application state
    state: AppState,
    /// Logging actor
    log: Log,
    /// Link actor carrying commands to the phone
    link: Link,
    /// Display actor; the mock surface until interactive mode installs the
    /// real terminal
    ui: Ui,
    /// The one outstanding reset timer, if any
    reset: ResetTimer,
    /// Idle delay before the status display reverts to Ready
    reset_delay: Duration,
}

impl Core {
    /// Creates a core from already-built collaborators. Tests use this to
    /// inject mocks.
    pub fn new(log: Log, link: Link, ui: Ui, reset: ResetTimer, reset_delay: Duration) -> Self {
        Self {
            state: AppState::default(),
            log,
            link,
            ui,
            reset,
            reset_delay,
        }
    }

    /// Builds the core with full initialization: filesystem, config, log,
    /// and link actors, in that order.
    ///
    /// # Returns
    /// The core plus the receivers for link events and reset-timer
    /// firings, which the caller threads back in when spawning the event
    /// loop.
    pub async fn build(
        config_path: ArcPath,
    ) -> anyhow::Result<(Self, mpsc::Receiver<LinkEvent>, mpsc::Receiver<()>)> {
        let fs = Fs::spawn();

        let config = Config::spawn(fs.clone(), config_path);
        if config.load().await.is_err() {
            config
                .save()
                .await
                .context("Writing the default config file")?;
        }

        let log = Log::spawn(
            fs,
            config.log_level().await,
            config.usize(USizeOpt::MaxAge).await,
            config.path(PathOpt::LogDir).await,
        )
        .await?;
        log.collect_garbage().await;

        let (link_tx, link_rx) = mpsc::channel(crate::BUFFER_SIZE);
        let link = Link::spawn(&config, log.clone(), link_tx).await?;

        let reset_delay = Duration::from_millis(config.usize(USizeOpt::ResetDelayMs).await as u64);
        let (reset, reset_rx) = ResetTimer::channel();

        log.info(SCOPE, "app initialized");

        // The real display is installed by spawn_interactive; resolve mode
        // never draws.
        let core = Self::new(log, link, Ui::mock(), reset, reset_delay);
        Ok((core, link_rx, reset_rx))
    }

    /// Spawns the App actor for interactive mode: takes over the terminal
    /// and merges UI events, link events, and timer firings on one task.
    pub fn spawn_interactive(
        mut self,
        mut link_rx: mpsc::Receiver<LinkEvent>,
        mut reset_rx: mpsc::Receiver<()>,
    ) -> anyhow::Result<(App, JoinHandle<()>)> {
        let (ui_tx, mut ui_rx) = mpsc::channel(crate::BUFFER_SIZE);
        self.ui = Ui::spawn(self.log.clone(), ui_tx)?;

        let (tx, mut rx) = mpsc::channel(crate::BUFFER_SIZE);
        let handle = tokio::spawn(async move {
            let mut core = self;
            core.ui.show(core.state.status).await;

            loop {
                tokio::select! {
                    Some(message) = rx.recv() => match message {
                        Message::Shutdown { tx } => {
                            let _ = tx.send(core.handle_shutdown().await);
                            break;
                        }
                    },
                    Some(ui_event) = ui_rx.recv() => match ui_event {
                        UiEvent::Press(button) => core.handle_press(button).await,
                        UiEvent::Quit => {
                            let _ = core.handle_shutdown().await;
                            break;
                        }
                    },
                    Some(link_event) = link_rx.recv() => {
                        core.handle_link_event(link_event).await;
                    }
                    Some(_) = reset_rx.recv() => {
                        core.handle_reset_fired().await;
                    }
                    else => break,
                }
            }
        });

        Ok((App::Actual(tx), handle))
    }

    /// One-shot CLI path: sends the command and waits (bounded) for its
    /// delivery outcome.
    pub async fn resolve(
        self,
        command: Command,
        link_rx: &mut mpsc::Receiver<LinkEvent>,
    ) -> anyhow::Result<()> {
        self.log.info(SCOPE, format!("one-shot {command} command"));
        let result = match self.link.send(command).await {
            Err(err) => Err(err).with_context(|| format!("Queueing the {command} command")),
            Ok(()) => Self::await_outcome(command, link_rx).await,
        };
        let _ = self.log.clone().flush().await;
        result
    }

    async fn await_outcome(
        command: Command,
        link_rx: &mut mpsc::Receiver<LinkEvent>,
    ) -> anyhow::Result<()> {
        let outcome = tokio::time::timeout(RESOLVE_WAIT, async {
            while let Some(event) = link_rx.recv().await {
                match event {
                    LinkEvent::Sent { cmd } if cmd == command => return Ok(()),
                    LinkEvent::SendFailed { cmd } if cmd == command => {
                        return Err(anyhow::anyhow!("the {command} command was not delivered"));
                    }
                    // Unrelated inbound traffic; keep waiting.
                    _ => continue,
                }
            }
            Err(anyhow::anyhow!("link closed before reporting an outcome"))
        })
        .await;

        match outcome {
            Ok(result) => {
                if result.is_ok() {
                    println!("{command} command delivered");
                }
                result
            }
            Err(_) => Err(anyhow::anyhow!(
                "no delivery outcome within {}s",
                RESOLVE_WAIT.as_secs()
            )),
        }
    }

    /// A button press: show the in-progress status first, then hand the
    /// command to the link.
    pub async fn handle_press(&mut self, button: Button) {
        match button {
            Button::Up => {
                self.set_status(Status::Ringing).await;
                self.dispatch(Command::Start).await;
            }
            Button::Down => {
                self.set_status(Status::Silencing).await;
                self.dispatch(Command::Stop).await;
            }
            Button::Select => {}
        }
    }

    /// Queues a command. A refused send gets the same treatment as a
    /// failed transmission, so the display never sticks in-progress.
    async fn dispatch(&mut self, cmd: Command) {
        if let Err(err) = self.link.send(cmd).await {
            self.log.warn(SCOPE, format!("dropping {cmd} command: {err}"));
            self.handle_link_event(LinkEvent::SendFailed { cmd }).await;
        }
    }

    /// A delivery outcome or inbound message from the link.
    pub async fn handle_link_event(&mut self, event: LinkEvent) {
        match event {
            LinkEvent::Sent { cmd } => {
                self.log.info(SCOPE, format!("{cmd} command delivered"));
                self.finish(Status::Done).await;
            }
            LinkEvent::SendFailed { cmd } => {
                self.log.warn(SCOPE, format!("{cmd} command failed"));
                self.finish(Status::Failed).await;
            }
            LinkEvent::Received(_) => {
                // Inbound payloads are not interpreted: pulse and show Done.
                self.ui.pulse().await;
                self.finish(Status::Done).await;
            }
        }
    }

    /// The reset timer fired: back to Ready, unconditionally.
    pub async fn handle_reset_fired(&mut self) {
        self.reset.clear();
        self.set_status(Status::Ready).await;
    }

    /// Releases the terminal and flushes buffered log output to stderr.
    pub async fn handle_shutdown(&mut self) -> anyhow::Result<()> {
        self.reset.cancel();
        self.ui.quit().await;
        let _ = self.log.clone().flush().await;
        Ok(())
    }

    /// Terminal statuses arm the reset timer, cancelling any pending one.
    async fn finish(&mut self, status: Status) {
        self.set_status(status).await;
        self.reset.arm(self.reset_delay);
    }

    async fn set_status(&mut self, status: Status) {
        self.state.status = status;
        self.ui.show(status).await;
    }

    /// The currently displayed status.
    pub fn status(&self) -> Status {
        self.state.status
    }

    /// Whether a reset timer is outstanding.
    pub fn reset_armed(&self) -> bool {
        self.reset.is_armed()
    }
}

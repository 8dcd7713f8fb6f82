use std::io::{Stdout, Write, stdout};

use ratatui::{
    Terminal,
    crossterm::{
        event::{self, Event, KeyCode, KeyEventKind},
        execute,
        terminal::{
            EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
        },
    },
    layout::{Alignment, Constraint, Layout},
    prelude::CrosstermBackend,
    style::{Modifier, Style},
    widgets::Paragraph,
};
use tokio::{sync::mpsc, task::JoinHandle};

use crate::{app::Status, log::Log};

use super::{
    Ui,
    data::{Button, UiEvent, status_style},
    message::Message,
};

const SCOPE: &str = "ui";

/// Core implementation of the display actor.
///
/// Owns the terminal for the lifetime of the actor: alternate screen and
/// raw mode are entered on spawn and left again on [`Message::Quit`]. Key
/// input is read on a dedicated blocking thread and forwarded as
/// [`UiEvent`]s.
pub struct Core {
    /// Logging interface
    log: Log,
    /// Where key presses are forwarded
    ui_events: mpsc::Sender<UiEvent>,
}

impl Core {
    /// Creates a new display core.
    pub fn new(log: Log, ui_events: mpsc::Sender<UiEvent>) -> Self {
        Self { log, ui_events }
    }

    /// Takes over the terminal and transforms the core into an actor.
    ///
    /// # Returns
    /// A tuple containing:
    /// - A [`Ui`] instance that can be used to send messages to the actor
    /// - A join handle for the spawned task
    ///
    /// # Errors
    /// Returns an error if the terminal cannot be initialized.
    pub fn spawn(self) -> anyhow::Result<(Ui, JoinHandle<()>)> {
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
        execute!(terminal.backend_mut(), EnterAlternateScreen)?;
        enable_raw_mode()?;

        Self::spawn_input_thread(self.ui_events.clone());

        let (tx, mut rx) = mpsc::channel(crate::BUFFER_SIZE);
        let log = self.log;
        let handle = tokio::spawn(async move {
            let mut status = Status::Ready;
            if let Err(err) = Self::draw(&mut terminal, status) {
                log.error(SCOPE, format!("failed to draw the window: {err}"));
            }
            while let Some(msg) = rx.recv().await {
                match msg {
                    Message::Show(new_status) => {
                        status = new_status;
                        if let Err(err) = Self::draw(&mut terminal, status) {
                            log.error(SCOPE, format!("failed to draw the window: {err}"));
                        }
                    }
                    Message::Pulse => {
                        // Terminal bell, standing in for the short vibe.
                        let mut out = stdout();
                        let _ = out.write_all(b"\x07");
                        let _ = out.flush();
                    }
                    Message::Quit => {
                        let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
                        let _ = disable_raw_mode();
                        break;
                    }
                }
            }
        });

        Ok((Ui::Actual(tx), handle))
    }

    /// Reads key input on a blocking thread and forwards it as events.
    /// The thread ends when the user quits or the receiving side is gone.
    fn spawn_input_thread(ui_events: mpsc::Sender<UiEvent>) {
        std::thread::spawn(move || {
            loop {
                let ui_event = match event::read() {
                    Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => match key.code {
                        KeyCode::Up => Some(UiEvent::Press(Button::Up)),
                        KeyCode::Down => Some(UiEvent::Press(Button::Down)),
                        KeyCode::Enter => Some(UiEvent::Press(Button::Select)),
                        KeyCode::Char('q') | KeyCode::Esc => Some(UiEvent::Quit),
                        _ => None,
                    },
                    Ok(_) => None,
                    Err(_) => Some(UiEvent::Quit),
                };
                if let Some(ui_event) = ui_event {
                    let quit = matches!(ui_event, UiEvent::Quit);
                    if ui_events.try_send(ui_event).is_err() || quit {
                        break;
                    }
                }
            }
        });
    }

    /// Draws the window: ring hint, status, silence hint, key help.
    fn draw(
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
        status: Status,
    ) -> std::io::Result<()> {
        terminal.draw(|frame| {
            let [ring, middle, silence, footer] = Layout::vertical([
                Constraint::Fill(1),
                Constraint::Fill(1),
                Constraint::Fill(1),
                Constraint::Length(1),
            ])
            .areas(frame.area());

            frame.render_widget(
                Paragraph::new("Ring ->").alignment(Alignment::Right),
                ring,
            );
            frame.render_widget(
                Paragraph::new(status.label())
                    .alignment(Alignment::Right)
                    .style(status_style(status)),
                middle,
            );
            frame.render_widget(
                Paragraph::new("Silence ->").alignment(Alignment::Right),
                silence,
            );
            frame.render_widget(
                Paragraph::new("up: ring  down: silence  q: quit")
                    .style(Style::new().add_modifier(Modifier::DIM)),
                footer,
            );
        })?;
        Ok(())
    }
}

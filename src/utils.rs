use std::{path::Path, sync::Arc};

use ratatui::crossterm::{
    execute,
    terminal::{LeaveAlternateScreen, disable_raw_mode},
};
use tokio::{fs::File, sync::RwLock};

/// Shared immutable string, cheap to clone between actors.
pub type ArcStr = Arc<str>;

/// Shared immutable path, cheap to clone between actors.
pub type ArcPath = Arc<Path>;

/// Shared file handle, guarded so only one writer touches it at a time.
pub type ArcFile = Arc<RwLock<File>>;

/// Replaces the standard panic hook with one that hands the terminal back
/// (raw mode off, alternate screen left) before printing the panic, so a
/// crash inside the UI actor does not leave the shell unusable.
pub fn install_panic_hook() -> anyhow::Result<()> {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(std::io::stdout(), LeaveAlternateScreen);
        default_hook(info);
    }));
    Ok(())
}

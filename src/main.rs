use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use ring_my_phone::ArcPath;
use ring_my_phone::app::{App, AppHandle};
use ring_my_phone::link::Command;
use ring_my_phone::utils::install_panic_hook;

#[derive(Parser)]
#[command(name = "ring-my-phone")]
#[command(about = "Remotely ring or silence the paired phone")]
struct Cli {
    /// Path to the configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask the phone to start ringing and report the delivery outcome
    Ring,
    /// Ask the phone to stop ringing and report the delivery outcome
    Silence,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    install_panic_hook()?;

    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(path) => ArcPath::from(path.as_path()),
        None => {
            let home = std::env::var("HOME").context("HOME is not set")?;
            let path = Path::new(&home)
                .join(".config")
                .join("ring-my-phone")
                .join("config.toml");
            ArcPath::from(path.as_path())
        }
    };

    let app = App::build(config_path).await?;

    match cli.command {
        Some(Commands::Ring) => app.resolve(Command::Start).await,
        Some(Commands::Silence) => app.resolve(Command::Stop).await,
        None => {
            let (handle, join) = app.spawn()?;
            run_until_exit(handle, join).await
        }
    }
}

/// Drives the interactive app until the user quits from the UI or the
/// process receives ctrl-c.
async fn run_until_exit(
    handle: AppHandle,
    mut join: tokio::task::JoinHandle<()>,
) -> anyhow::Result<()> {
    tokio::select! {
        res = &mut join => res.context("App task failed"),
        _ = tokio::signal::ctrl_c() => {
            handle.shutdown().await?;
            join.await.context("App task failed")
        }
    }
}

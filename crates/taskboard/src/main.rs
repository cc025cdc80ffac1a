/*
[INPUT]:  CLI arguments, YAML configuration file, OS shutdown signals
[OUTPUT]: Interactive task board (TUI) or a one-shot grouped listing
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags, startup flow, or shutdown handling
*/

mod cli;
mod tui;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex as StdMutex};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use taskboard::{BoardConfig, FetchController};

use crate::tui::{LOG_BUFFER_CAPACITY, LogBuffer, LogBufferHandle, LogWriterFactory, TuiOptions};

#[derive(Parser, Debug)]
#[command(name = "taskboard", version, about = "Task list grouped by status")]
struct Cli {
    /// Defaults to the per-user config file when present
    #[arg(long = "config", value_name = "PATH")]
    config_path: Option<PathBuf>,
    #[arg(long = "base-url", value_name = "URL")]
    base_url: Option<String>,
    #[arg(long = "subject", value_name = "ID")]
    subject: Option<String>,
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    log_level: String,
    /// Fetch once, print the grouped list and exit
    #[arg(long = "once")]
    once: bool,
    /// Validate configuration and exit
    #[arg(long = "dry-run")]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    let log_buffer: Option<LogBufferHandle> = if args.once || args.dry_run {
        None
    } else {
        Some(Arc::new(StdMutex::new(LogBuffer::new(LOG_BUFFER_CAPACITY))))
    };
    init_tracing(&args.log_level, log_buffer.clone())?;

    let config = load_config(&args)?;
    info!(
        base_url = %config.api.base_url,
        subject_id = %config.subject_id,
        refresh_secs = ?config.refresh.interval_secs,
        "configuration loaded"
    );

    if args.dry_run {
        info!("dry-run requested; configuration validated");
        return Ok(());
    }

    let client = config.build_client()?;
    let controller = FetchController::new(Arc::new(client), config.subject_id.clone());

    if args.once {
        return cli::run_once(controller).await;
    }

    let shutdown = CancellationToken::new();
    setup_signal_handlers(shutdown.clone());

    let options = TuiOptions {
        error_display: config.error_display(),
        refresh_interval: config.refresh_interval(),
    };
    let log_buffer = log_buffer.ok_or_else(|| anyhow!("log buffer missing in tui mode"))?;
    tui::run_tui(controller, options, log_buffer, shutdown).await?;
    info!("taskboard closed");
    Ok(())
}

fn init_tracing(log_level: &str, log_buffer: Option<LogBufferHandle>) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let result = match log_buffer {
        Some(buffer) => builder
            .with_ansi(false)
            .with_writer(LogWriterFactory::new(buffer))
            .try_init(),
        None => builder.with_writer(std::io::stderr).try_init(),
    };
    result
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(())
}

fn load_config(args: &Cli) -> Result<BoardConfig> {
    let mut config = match args.config_path.as_deref() {
        Some(path) => read_config(path)?,
        None => match BoardConfig::default_path().filter(|path| path.exists()) {
            Some(path) => read_config(&path)?,
            None => {
                info!("no config file found; using defaults");
                BoardConfig::default()
            }
        },
    };

    config.apply_env_overrides();
    if let Some(base_url) = args.base_url.as_ref() {
        config.api.base_url = base_url.clone();
    }
    if let Some(subject) = args.subject.as_ref() {
        config.subject_id = subject.clone();
    }
    config.validate().context("validate config")?;
    Ok(config)
}

fn read_config(path: &Path) -> Result<BoardConfig> {
    info!(config_path = %path.display(), "reading config");
    BoardConfig::from_file(path).context("load config")
}

fn setup_signal_handlers(shutdown: CancellationToken) {
    let shutdown_clone = shutdown.clone();
    tokio::spawn(async move {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to install SIGINT handler");
            return;
        }
        info!("received SIGINT");
        shutdown_clone.cancel();
    });

    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let shutdown_clone = shutdown.clone();
        tokio::spawn(async move {
            match signal(SignalKind::terminate()) {
                Ok(mut stream) => {
                    stream.recv().await;
                    info!("received SIGTERM");
                    shutdown_clone.cancel();
                }
                Err(err) => {
                    warn!(error = %err, "failed to install SIGTERM handler");
                }
            }
        });
    }
}

//! `craftwatch` — terminal status dashboard for a Minecraft server whose
//! ComputerCraft computer publishes `data/latest.json` and
//! `data/history.json`.
//!
//! Polls both documents on a fixed interval and shows server status, the
//! four stat cards, the online roster and a player-count chart. Logs go to
//! a file (default `/tmp/craftwatch.log`) so they never corrupt the
//! terminal.

mod action;
mod app;
mod component;
mod event;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use craftwatch_config::{CliOverrides, load_config, to_toml};
use craftwatch_core::{Dashboard, DashboardConfig, RefreshLoop, RosterRenderer, refresh_cycle};

use crate::app::App;

/// Terminal status dashboard for a ComputerCraft-published Minecraft server.
#[derive(Parser, Debug)]
#[command(name = "craftwatch", version, about)]
struct Cli {
    /// Base URL the data/ documents are published under
    /// (e.g. https://example.github.io/status/)
    #[arg(short = 'u', long)]
    url: Option<String>,

    /// Config file (defaults to the platform config dir)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Refresh interval in milliseconds
    #[arg(short = 'i', long, value_name = "MS")]
    interval: Option<u64>,

    /// Log file path
    #[arg(long, default_value = "/tmp/craftwatch.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Run one refresh cycle, print the dashboard as JSON and exit
    #[arg(long, conflicts_with = "print_config")]
    once: bool,

    /// Print the merged configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

/// File-based tracing; stdout belongs to the terminal UI. Hold the guard
/// for the lifetime of the process so buffered lines are flushed.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "craftwatch_tui={log_level},craftwatch_core={log_level},craftwatch_api={log_level}"
        ))
    });

    let log_dir = cli
        .log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(std::path::Path::new("."));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("craftwatch.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true),
        )
        .init();

    guard
}

/// One cycle without a terminal; prints the resulting view.
async fn run_once(config: &DashboardConfig) -> Result<()> {
    let client = config.build_client()?;
    let mut dashboard = Dashboard::new(RosterRenderer::new(config.avatars.clone()));
    let report = refresh_cycle(&mut dashboard, &client).await;
    info!(online = report.online(), chart = ?report.chart, "single cycle finished");

    println!("{}", serde_json::to_string_pretty(&dashboard.view(false))?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tui::install_hooks()?;
    let _log_guard = setup_tracing(&cli);

    let overrides = CliOverrides {
        base_url: cli.url.clone(),
        refresh_interval_ms: cli.interval,
    };
    let config = load_config(cli.config.as_deref(), &overrides)?;
    if cli.print_config {
        print!("{}", to_toml(&config)?);
        return Ok(());
    }
    let config = config.into_dashboard_config()?;

    info!(
        base_url = %config.base_url,
        interval = %humantime::format_duration(config.refresh_interval),
        "starting craftwatch"
    );

    if cli.once {
        return run_once(&config).await;
    }

    let (refresh_loop, handle) = RefreshLoop::from_config(&config)?;
    let mut app = App::new(refresh_loop, handle, config.refresh_interval);
    app.run().await?;

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn print_config_and_once_are_exclusive() {
        let cli = Cli::try_parse_from(["craftwatch", "--print-config", "-i", "5000"]).unwrap();
        assert!(cli.print_config);
        assert_eq!(cli.interval, Some(5000));
        assert!(Cli::try_parse_from(["craftwatch", "--print-config", "--once"]).is_err());
    }
}

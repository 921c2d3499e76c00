use std::io::{self, IsTerminal};
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use log::{error, info, warn};
use tokio_util::sync::CancellationToken;

use multi_ping_monitor::{
    AppConfig, ConfigOverrides, Monitor, MonitorError, PingExecutor, TableStyle, render_table,
    resolve_targets, write_table,
};

/// Ping several hosts at once and keep running latency statistics.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Hosts or IP addresses to monitor (replaces configured targets)
    targets: Vec<String>,

    /// Number of rounds, 0 to run until interrupted
    #[arg(short, long)]
    count: Option<u64>,

    /// Milliseconds between rounds
    #[arg(short, long)]
    interval: Option<u64>,

    /// Per-probe timeout in milliseconds
    #[arg(short, long)]
    timeout: Option<u64>,

    /// Round deadline in milliseconds
    #[arg(short, long)]
    deadline: Option<u64>,

    /// Save the resulting settings as the new defaults
    #[arg(long)]
    save: bool,
}

impl Cli {
    fn overrides(&mut self) -> ConfigOverrides {
        ConfigOverrides {
            targets: std::mem::take(&mut self.targets),
            count: self.count,
            interval_ms: self.interval,
            timeout_ms: self.timeout,
            round_deadline_ms: self.deadline,
        }
    }
}

async fn run(mut cli: Cli) -> Result<(), MonitorError> {
    let mut config = AppConfig::load();
    let save_path = if cli.save {
        Some(AppConfig::get_config_path()?)
    } else {
        None
    };
    config.apply_and_persist(cli.overrides(), save_path.as_deref())?;
    if let Some(path) = &save_path {
        info!("settings saved to {}", path.display());
    }

    let (targets, errors) = resolve_targets(&config.targets).await;
    for e in &errors {
        warn!("skipping target: {e}");
    }
    if targets.is_empty() {
        return Err(MonitorError::NoTargets);
    }

    let transport = Arc::new(PingExecutor::new()?);
    let mut monitor = Monitor::new(transport, targets, config.monitor_settings());

    let cancel = CancellationToken::new();
    let stop = cancel.clone();
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        }
    });

    let interactive = io::stdout().is_terminal();
    let style = TableStyle {
        green_threshold: config.green_threshold,
        yellow_threshold: config.yellow_threshold,
        color: interactive,
    };

    monitor
        .run(cancel, |targets, _report| {
            let table = render_table(targets, &style);
            if let Err(e) = write_table(&mut io::stdout().lock(), &table, interactive) {
                warn!("stdout closed, stopping: {e}");
                stop.cancel();
            }
        })
        .await;

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

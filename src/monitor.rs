use std::sync::Arc;
use std::time::Duration;

use log::info;
use tokio_util::sync::CancellationToken;

use crate::ping::PingTarget;
use crate::ping_executor::PingTransport;
use crate::round::{RoundReport, RoundTiming, run_round};

pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorSettings {
    /// Stop after this many rounds; `None` runs until cancelled.
    pub rounds: Option<u64>,
    /// Pause between the end of one round and the start of the next.
    pub interval: Duration,
    pub timing: RoundTiming,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            rounds: None,
            interval: DEFAULT_INTERVAL,
            timing: RoundTiming::default(),
        }
    }
}

/// Drives rounds on a fixed cadence over a fixed set of targets.
pub struct Monitor<T> {
    transport: Arc<T>,
    targets: Vec<PingTarget>,
    settings: MonitorSettings,
}

impl<T: PingTransport> Monitor<T> {
    pub fn new(transport: Arc<T>, targets: Vec<PingTarget>, settings: MonitorSettings) -> Self {
        Self {
            transport,
            targets,
            settings,
        }
    }

    pub fn targets(&self) -> &[PingTarget] {
        &self.targets
    }

    pub fn into_targets(self) -> Vec<PingTarget> {
        self.targets
    }

    /// Runs rounds until the configured count is reached or `cancel` fires,
    /// returning the number of rounds completed.
    ///
    /// Cancellation is checked before each round and while waiting between
    /// rounds; a round that has started always runs to completion.
    pub async fn run<F>(&mut self, cancel: CancellationToken, mut on_round: F) -> u64
    where
        F: FnMut(&[PingTarget], &RoundReport),
    {
        info!(
            "monitoring {} target(s) every {:?}",
            self.targets.len(),
            self.settings.interval
        );

        let mut completed = 0;
        loop {
            if cancel.is_cancelled() {
                break;
            }

            let report = run_round(&self.transport, &mut self.targets, self.settings.timing).await;
            completed += 1;
            on_round(&self.targets, &report);

            if self.settings.rounds.is_some_and(|rounds| completed >= rounds) {
                break;
            }

            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(self.settings.interval) => {}
            }
        }

        info!("monitoring stopped after {completed} round(s)");
        completed
    }
}

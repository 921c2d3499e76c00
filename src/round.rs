//! One probing round: fan a probe out to every target, fan the results back
//! in before the round deadline.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};
use tokio::task::JoinSet;
use tokio::time::{self, Instant};

use crate::ping::{PingOutcome, PingTarget};
use crate::ping_executor::PingTransport;

pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(1);
pub const DEFAULT_ROUND_DEADLINE: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundTiming {
    /// Handed to the transport for each individual probe.
    pub probe_timeout: Duration,
    /// Hard bound on how long the round waits for results.
    pub round_deadline: Duration,
}

impl Default for RoundTiming {
    fn default() -> Self {
        Self {
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            round_deadline: DEFAULT_ROUND_DEADLINE,
        }
    }
}

/// What happened during one round.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundReport {
    pub issued: usize,
    pub succeeded: usize,
    pub lost: usize,
    /// Probes still outstanding at the deadline. Their targets were not updated.
    pub abandoned: usize,
}

impl RoundReport {
    pub fn completed(&self) -> usize {
        self.succeeded + self.lost
    }
}

/// Probes every target once, concurrently, and applies each result that
/// arrives before `timing.round_deadline`.
///
/// Probes still running at the deadline are aborted. Their targets are left
/// untouched for this round, and a result that would have arrived later can
/// never reach a target.
pub async fn run_round<T: PingTransport>(
    transport: &Arc<T>,
    targets: &mut [PingTarget],
    timing: RoundTiming,
) -> RoundReport {
    let mut report = RoundReport::default();
    if targets.is_empty() {
        return report;
    }

    let deadline = Instant::now() + timing.round_deadline;
    let mut probes = JoinSet::new();

    for (index, target) in targets.iter().enumerate() {
        let transport = Arc::clone(transport);
        let ip = target.ip();
        probes.spawn(async move { (index, transport.ping(ip, timing.probe_timeout).await) });
    }
    report.issued = targets.len();

    loop {
        match time::timeout_at(deadline, probes.join_next()).await {
            Ok(Some(Ok((index, outcome)))) => {
                let target = &mut targets[index];
                debug!("{}: {:?}", target.address(), outcome);
                match outcome {
                    PingOutcome::Reply { .. } => report.succeeded += 1,
                    PingOutcome::Lost => report.lost += 1,
                }
                target.record_outcome(outcome);
            }
            Ok(Some(Err(e))) => {
                // The task is gone along with its index; count it as abandoned.
                warn!("probe task failed: {e}");
                report.abandoned += 1;
            }
            Ok(None) => break,
            Err(_) => {
                report.abandoned += probes.len();
                info!(
                    "round deadline of {:?} passed with {} probe(s) outstanding, abandoning them",
                    timing.round_deadline,
                    probes.len()
                );
                probes.abort_all();
                break;
            }
        }
    }

    report
}

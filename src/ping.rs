use std::net::IpAddr;

use chrono::{DateTime, Local};

use crate::stats::PingStatistics;

/// Result of a single probe as reported by a [`PingTransport`](crate::PingTransport).
///
/// Timeouts, unreachable hosts and transport errors all collapse into `Lost`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PingOutcome {
    Reply { response_time_ms: f64 },
    Lost,
}

impl PingOutcome {
    pub fn success(response_time_ms: f64) -> Self {
        PingOutcome::Reply { response_time_ms }
    }

    pub fn failure() -> Self {
        PingOutcome::Lost
    }

    pub fn is_success(&self) -> bool {
        matches!(self, PingOutcome::Reply { .. })
    }

    pub fn response_time_ms(&self) -> Option<f64> {
        match self {
            PingOutcome::Reply { response_time_ms } => Some(*response_time_ms),
            PingOutcome::Lost => None,
        }
    }
}

/// One monitored endpoint and everything observed about it so far.
#[derive(Debug, Clone)]
pub struct PingTarget {
    address: String,
    ip: IpAddr,
    statistics: PingStatistics,
    last_response_time: Option<f64>,
    last_failure: Option<DateTime<Local>>,
}

impl PingTarget {
    /// Creates a target for an already resolved address.
    ///
    /// `address` is what the operator asked for (hostname or literal IP) and is
    /// only used for display.
    pub fn new(address: impl Into<String>, ip: IpAddr) -> Self {
        Self {
            address: address.into(),
            ip,
            statistics: PingStatistics::new(),
            last_response_time: None,
            last_failure: None,
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn ip(&self) -> IpAddr {
        self.ip
    }

    pub fn statistics(&self) -> &PingStatistics {
        &self.statistics
    }

    /// Round-trip time of the most recent probe, `None` if it was lost or
    /// nothing has completed yet.
    pub fn last_response_time(&self) -> Option<f64> {
        self.last_response_time
    }

    /// When the most recent failure happened. Not cleared by later successes.
    pub fn last_failure(&self) -> Option<DateTime<Local>> {
        self.last_failure
    }

    /// Applies a completed probe, stamping failures with the current time.
    pub fn record_outcome(&mut self, outcome: PingOutcome) {
        self.record_outcome_at(outcome, Local::now());
    }

    pub fn record_outcome_at(&mut self, outcome: PingOutcome, at: DateTime<Local>) {
        match outcome {
            PingOutcome::Reply { response_time_ms } => {
                self.statistics.record_success(response_time_ms);
                self.last_response_time = Some(response_time_ms);
            }
            PingOutcome::Lost => {
                self.statistics.record_loss();
                self.last_response_time = None;
                self.last_failure = Some(at);
            }
        }
    }
}

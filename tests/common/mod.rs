#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::net::IpAddr;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use multi_ping_monitor::{PingOutcome, PingTarget, PingTransport};

/// One canned reply: how long the transport takes and what it reports.
#[derive(Debug, Clone, Copy)]
pub struct Scripted {
    pub delay: Duration,
    pub outcome: PingOutcome,
}

pub fn reply(delay_ms: u64, response_time_ms: f64) -> Scripted {
    Scripted {
        delay: Duration::from_millis(delay_ms),
        outcome: PingOutcome::success(response_time_ms),
    }
}

pub fn lost(delay_ms: u64) -> Scripted {
    Scripted {
        delay: Duration::from_millis(delay_ms),
        outcome: PingOutcome::failure(),
    }
}

/// In-memory transport replaying scripted replies per address, in order.
/// Once a script runs dry, its last entry repeats.
#[derive(Default)]
pub struct ScriptedTransport {
    scripts: Mutex<HashMap<IpAddr, VecDeque<Scripted>>>,
    finished: AtomicUsize,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script(self, ip: &str, replies: impl IntoIterator<Item = Scripted>) -> Self {
        self.scripts
            .lock()
            .unwrap()
            .insert(ip.parse().unwrap(), replies.into_iter().collect());
        self
    }

    /// Probes that ran to completion, including ones nobody waited for.
    pub fn finished(&self) -> usize {
        self.finished.load(Ordering::SeqCst)
    }

    fn next(&self, ip: IpAddr) -> Scripted {
        let mut scripts = self.scripts.lock().unwrap();
        let script = scripts.get_mut(&ip).expect("no script for address");
        if script.len() > 1 {
            script.pop_front().unwrap()
        } else {
            *script.front().expect("empty script")
        }
    }
}

impl PingTransport for ScriptedTransport {
    async fn ping(&self, ip: IpAddr, timeout: Duration) -> PingOutcome {
        let scripted = self.next(ip);
        let outcome = if scripted.delay > timeout {
            tokio::time::sleep(timeout).await;
            PingOutcome::failure()
        } else {
            tokio::time::sleep(scripted.delay).await;
            scripted.outcome
        };
        self.finished.fetch_add(1, Ordering::SeqCst);
        outcome
    }
}

pub fn targets(addresses: &[&str]) -> Vec<PingTarget> {
    addresses
        .iter()
        .map(|address| PingTarget::new(*address, address.parse().unwrap()))
        .collect()
}

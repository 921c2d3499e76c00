use std::future::Future;
use std::io;
use std::net::IpAddr;
use std::sync::atomic::{AtomicU16, Ordering};
use std::time::Duration;

use log::{debug, warn};
use surge_ping::{Client, Config, ICMP, IcmpPacket, PingIdentifier, PingSequence};

use crate::error::{MonitorError, Result};
use crate::ping::{PingOutcome, PingTarget};

const PAYLOAD: [u8; 56] = [0; 56];
const MAX_HOSTNAME_LEN: usize = 253;

/// Sends one echo request and waits for its reply.
///
/// Implementations must never report a reply that arrives after `timeout`,
/// and must fold every kind of failure into [`PingOutcome::Lost`].
pub trait PingTransport: Send + Sync + 'static {
    fn ping(&self, ip: IpAddr, timeout: Duration) -> impl Future<Output = PingOutcome> + Send;
}

/// ICMP echo transport backed by surge-ping.
pub struct PingExecutor {
    client_v4: Client,
    client_v6: Option<Client>,
    next_identifier: AtomicU16,
    next_sequence: AtomicU16,
}

impl PingExecutor {
    /// Opens the ICMP sockets. IPv4 is required, IPv6 is optional.
    pub fn new() -> Result<Self> {
        let client_v4 = Client::new(&Config::default()).map_err(MonitorError::Transport)?;
        let client_v6 = match Client::new(&Config::builder().kind(ICMP::V6).build()) {
            Ok(client) => Some(client),
            Err(e) => {
                warn!("IPv6 ping unavailable, IPv6 targets will report loss: {e}");
                None
            }
        };

        Ok(Self {
            client_v4,
            client_v6,
            next_identifier: AtomicU16::new(std::process::id() as u16),
            next_sequence: AtomicU16::new(0),
        })
    }

    fn client_for(&self, ip: IpAddr) -> Option<&Client> {
        match ip {
            IpAddr::V4(_) => Some(&self.client_v4),
            IpAddr::V6(_) => self.client_v6.as_ref(),
        }
    }
}

impl PingTransport for PingExecutor {
    async fn ping(&self, ip: IpAddr, timeout: Duration) -> PingOutcome {
        let Some(client) = self.client_for(ip) else {
            return PingOutcome::failure();
        };

        let identifier = PingIdentifier(self.next_identifier.fetch_add(1, Ordering::Relaxed));
        let sequence = PingSequence(self.next_sequence.fetch_add(1, Ordering::Relaxed));

        let mut pinger = client.pinger(ip, identifier).await;
        pinger.timeout(timeout);

        match pinger.ping(sequence, &PAYLOAD).await {
            Ok((IcmpPacket::V4(_), duration)) | Ok((IcmpPacket::V6(_), duration)) => {
                PingOutcome::success(duration.as_secs_f64() * 1000.0)
            }
            Err(e) => {
                debug!("ping {ip} failed: {e}");
                PingOutcome::failure()
            }
        }
    }
}

/// Checks that a hostname only holds characters DNS allows.
/// A trailing `:port` is accepted and dropped.
fn validate_hostname(hostname: &str) -> Option<&str> {
    let hostname = match hostname.rsplit_once(':') {
        Some((host, port)) if port.parse::<u16>().is_ok() => host,
        Some(_) => return None,
        None => hostname,
    };

    let valid = !hostname.is_empty()
        && hostname.len() <= MAX_HOSTNAME_LEN
        && !hostname.starts_with(['-', '.'])
        && hostname
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-');

    valid.then_some(hostname)
}

/// Turns an IP literal or hostname into the address to probe.
pub async fn resolve_address(address: &str) -> Result<IpAddr> {
    let address = address.trim();
    if let Ok(ip) = address.parse::<IpAddr>() {
        return Ok(ip);
    }

    let hostname =
        validate_hostname(address).ok_or_else(|| MonitorError::InvalidAddress(address.to_string()))?;

    let unresolvable = |source| MonitorError::Unresolvable {
        address: address.to_string(),
        source,
    };

    let mut addrs = tokio::net::lookup_host((hostname, 0))
        .await
        .map_err(unresolvable)?;

    addrs.next().map(|addr| addr.ip()).ok_or_else(|| {
        unresolvable(io::Error::new(
            io::ErrorKind::NotFound,
            "no addresses returned",
        ))
    })
}

/// Resolves every address independently. A bad address only costs its own
/// target; the rest are still returned.
pub async fn resolve_targets<S: AsRef<str>>(
    addresses: &[S],
) -> (Vec<PingTarget>, Vec<MonitorError>) {
    let mut targets = Vec::with_capacity(addresses.len());
    let mut errors = Vec::new();

    for address in addresses {
        let address = address.as_ref();
        match resolve_address(address).await {
            Ok(ip) => {
                debug!("{address} resolved to {ip}");
                targets.push(PingTarget::new(address.trim(), ip));
            }
            Err(e) => errors.push(e),
        }
    }

    (targets, errors)
}

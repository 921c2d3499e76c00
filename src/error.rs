use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("invalid address: {0:?}")]
    InvalidAddress(String),

    #[error("could not resolve {address}: {source}")]
    Unresolvable {
        address: String,
        #[source]
        source: io::Error,
    },

    #[error("no usable targets")]
    NoTargets,

    #[error("ICMP transport unavailable: {0}")]
    Transport(#[source] io::Error),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("config file error: {0}")]
    ConfigIo(#[from] io::Error),

    #[error("config format error: {0}")]
    ConfigFormat(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MonitorError>;

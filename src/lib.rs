//! Continuous multi-target ping monitor.
//!
//! Every round probes all targets concurrently within a bounded deadline and
//! folds the results into per-target running statistics (mean, sample
//! variance, min, max, loss rate).

pub mod config;
pub mod error;
pub mod latency_grade;
pub mod monitor;
pub mod ping;
pub mod ping_executor;
pub mod report;
pub mod round;
pub mod stats;

pub use config::{AppConfig, ConfigOverrides};
pub use error::{MonitorError, Result};
pub use latency_grade::LatencyGrade;
pub use monitor::{Monitor, MonitorSettings};
pub use ping::{PingOutcome, PingTarget};
pub use ping_executor::{PingExecutor, PingTransport, resolve_address, resolve_targets};
pub use report::{TableStyle, render_table, write_table};
pub use round::{RoundReport, RoundTiming, run_round};
pub use stats::PingStatistics;

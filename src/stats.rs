//! Running latency statistics for a single ping target.
//!
//! Samples are folded in with Welford's online algorithm, so memory stays
//! constant no matter how long the monitor runs.

/// Online aggregate of round-trip times and lost probes.
///
/// Only successful probes contribute latency samples. Lost probes are tallied
/// separately and never touch the mean, variance or extrema.
///
/// Every derived value is an `Option`: `None` means "not enough data yet",
/// which callers must not confuse with a zero latency.
#[derive(Debug, Clone)]
pub struct PingStatistics {
    sample_count: u64,
    lost_count: u64,
    mean: f64,
    /// Sum of squared deviations from the running mean (Welford's M2).
    m2: f64,
    /// `+inf` until the first sample arrives.
    min: f64,
    /// `-inf` until the first sample arrives.
    max: f64,
}

impl Default for PingStatistics {
    fn default() -> Self {
        Self::new()
    }
}

impl PingStatistics {
    pub fn new() -> Self {
        Self {
            sample_count: 0,
            lost_count: 0,
            mean: 0.0,
            m2: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    /// Folds one successful round-trip time (milliseconds) into the aggregates.
    pub fn record_success(&mut self, latency_ms: f64) {
        self.sample_count += 1;

        let delta = latency_ms - self.mean;
        self.mean += delta / self.sample_count as f64;
        // Second factor must use the updated mean.
        self.m2 += delta * (latency_ms - self.mean);

        if latency_ms < self.min {
            self.min = latency_ms;
        }
        if latency_ms > self.max {
            self.max = latency_ms;
        }
    }

    /// Tallies one lost probe. Latency aggregates are left untouched.
    pub fn record_loss(&mut self) {
        self.lost_count += 1;
    }

    /// Number of successful probes folded in.
    pub fn sample_count(&self) -> u64 {
        self.sample_count
    }

    pub fn lost_count(&self) -> u64 {
        self.lost_count
    }

    /// Successful and lost probes together.
    pub fn total_count(&self) -> u64 {
        self.sample_count + self.lost_count
    }

    pub fn mean(&self) -> Option<f64> {
        (self.sample_count > 0).then_some(self.mean)
    }

    /// Bessel-corrected sample variance; needs at least two samples.
    pub fn variance(&self) -> Option<f64> {
        if self.sample_count < 2 {
            return None;
        }
        Some((self.m2 / (self.sample_count - 1) as f64).max(0.0))
    }

    pub fn stddev(&self) -> Option<f64> {
        self.variance().map(f64::sqrt)
    }

    pub fn min(&self) -> Option<f64> {
        (self.sample_count > 0).then_some(self.min)
    }

    pub fn max(&self) -> Option<f64> {
        (self.sample_count > 0).then_some(self.max)
    }

    /// Fraction of probes lost, in `0.0..=1.0`.
    pub fn loss_rate(&self) -> Option<f64> {
        let total = self.total_count();
        (total > 0).then(|| self.lost_count as f64 / total as f64)
    }
}

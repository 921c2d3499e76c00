use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatencyGrade {
    Green,
    Yellow,
    Orange,
    Red,
}

impl LatencyGrade {
    /// Grades a round-trip time against the two thresholds (milliseconds).
    /// A missing response grades as `Red`.
    pub fn from_ping_response(response_time_ms: Option<f64>, green_threshold: u64, yellow_threshold: u64) -> Self {
        match response_time_ms {
            Some(time) if time < green_threshold as f64 => LatencyGrade::Green,
            Some(time) if time < yellow_threshold as f64 => LatencyGrade::Yellow,
            Some(_) => LatencyGrade::Orange,
            None => LatencyGrade::Red,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LatencyGrade::Green => "ok",
            LatencyGrade::Yellow => "slow",
            LatencyGrade::Orange => "very slow",
            LatencyGrade::Red => "down",
        }
    }

    /// ANSI SGR color code for terminal output.
    pub fn ansi_color(self) -> &'static str {
        match self {
            LatencyGrade::Green => "32",
            LatencyGrade::Yellow => "33",
            LatencyGrade::Orange => "38;5;208",
            LatencyGrade::Red => "31",
        }
    }
}

impl fmt::Display for LatencyGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grades() {
        assert_eq!(LatencyGrade::from_ping_response(Some(10.0), 100, 200), LatencyGrade::Green);
        assert_eq!(LatencyGrade::from_ping_response(Some(100.0), 100, 200), LatencyGrade::Yellow);
        assert_eq!(LatencyGrade::from_ping_response(Some(199.9), 100, 200), LatencyGrade::Yellow);
        assert_eq!(LatencyGrade::from_ping_response(Some(250.0), 100, 200), LatencyGrade::Orange);
        assert_eq!(LatencyGrade::from_ping_response(None, 100, 200), LatencyGrade::Red);
    }

    #[test]
    fn test_display_pads() {
        assert_eq!(format!("{:<6}|", LatencyGrade::Green), "ok    |");
    }
}

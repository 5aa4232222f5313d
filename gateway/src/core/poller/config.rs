use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default number of status queries before giving up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 30;

/// Default wait before each status query.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Text returned for a finished job with no extractable result under
/// [`MissingResultPolicy::Sentinel`].
pub const DEFAULT_SENTINEL_TEXT: &str = "not recognized";

/// What to do when a job succeeds but no result text can be extracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingResultPolicy {
    /// Answer with the sentinel text.
    #[default]
    Sentinel,
    /// Fail with `ResultMissing`.
    Error,
}

impl MissingResultPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sentinel => "sentinel",
            Self::Error => "error",
        }
    }
}

impl std::str::FromStr for MissingResultPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sentinel" | "lenient" => Ok(Self::Sentinel),
            "error" | "strict" => Ok(Self::Error),
            other => Err(format!(
                "Invalid missing-result policy '{other}', expected 'sentinel' or 'error'"
            )),
        }
    }
}

/// What to do when a status query fails at the transport level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportErrorPolicy {
    /// Treat the attempt as inconclusive; it still consumes budget.
    #[default]
    CountAttempt,
    /// Fail with `StatusQueryFailed` on the first transport error.
    Abort,
}

impl TransportErrorPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CountAttempt => "count_attempt",
            Self::Abort => "abort",
        }
    }
}

impl std::str::FromStr for TransportErrorPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "count" | "count_attempt" | "tolerate" => Ok(Self::CountAttempt),
            "abort" | "fail" => Ok(Self::Abort),
            other => Err(format!(
                "Invalid transport-error policy '{other}', expected 'count' or 'abort'"
            )),
        }
    }
}

/// Polling parameters.
///
/// `interval` and `max_attempts` are the only knobs that affect how long a
/// request is held open: the worst case is roughly `interval * max_attempts`
/// plus the provider round trips.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollerConfig {
    pub max_attempts: u32,
    pub interval: Duration,
    pub missing_result: MissingResultPolicy,
    pub transport_errors: TransportErrorPolicy,
    pub sentinel_text: String,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            interval: DEFAULT_POLL_INTERVAL,
            missing_result: MissingResultPolicy::default(),
            transport_errors: TransportErrorPolicy::default(),
            sentinel_text: DEFAULT_SENTINEL_TEXT.to_string(),
        }
    }
}

impl PollerConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.max_attempts == 0 {
            return Err("Poll max attempts must be at least 1".to_string());
        }

        if self.interval.is_zero() {
            return Err("Poll interval must be greater than zero".to_string());
        }

        if self.missing_result == MissingResultPolicy::Sentinel && self.sentinel_text.is_empty() {
            return Err("Sentinel text must not be empty".to_string());
        }

        Ok(())
    }

    /// Upper bound on time spent waiting between status queries.
    pub fn worst_case_wait(&self) -> Duration {
        self.interval.saturating_mul(self.max_attempts)
    }
}

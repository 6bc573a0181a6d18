use serde::Serialize;
use serde::ser::SerializeMap as _;

/// Load pattern a benchmark was run under.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString, Serialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    /// New connection per transaction, few clients.
    Overhead,
    Concurrent,
    /// More clients than the database accepts connections for.
    Extreme,
}

impl Scenario {
    pub const ALL: [Self; 3] = [Self::Overhead, Self::Concurrent, Self::Extreme];

    #[must_use]
    pub fn is_extreme_load(self) -> bool {
        matches!(self, Self::Extreme)
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Overhead => "Overhead",
            Self::Concurrent => "Concurrent",
            Self::Extreme => "Extreme",
        }
    }

    /// Long title used in the findings narrative.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Overhead => "Connection Overhead Test",
            Self::Concurrent => "Moderate Concurrency Test",
            Self::Extreme => "High Concurrency Test",
        }
    }
}

/// How the benchmark client reached the database.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString, Serialize,
)]
pub enum Strategy {
    #[strum(serialize = "direct")]
    #[serde(rename = "direct")]
    Direct,

    /// Through the pooler, which multiplexes client sessions onto few backends.
    #[strum(serialize = "pgbouncer")]
    #[serde(rename = "pgbouncer")]
    Pooled,
}

impl Strategy {
    pub const ALL: [Self; 2] = [Self::Direct, Self::Pooled];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Direct => "Direct",
            Self::Pooled => "PgBouncer",
        }
    }
}

/// Scalar facts pulled out of one pgbench log. Absent markers stay zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MetricRecord {
    /// Transactions per second.
    pub throughput: f64,
    /// Milliseconds.
    pub latency_mean: f64,
    /// Milliseconds.
    pub latency_std_dev: f64,
    pub scaling_factor: u64,
    pub client_count: u64,
    pub transactions_per_client: u64,
    pub transactions_processed: u64,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString, Serialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    ConnectionRefused,
    TooManyClients,
    TimeoutErrors,
    AuthenticationFailed,
    FatalErrors,
    GenericErrors,
}

/// Number of [`ErrorCategory`] variants.
pub const CATEGORY_COUNT: usize = 6;

impl ErrorCategory {
    pub const ALL: [Self; CATEGORY_COUNT] = [
        Self::ConnectionRefused,
        Self::TooManyClients,
        Self::TimeoutErrors,
        Self::AuthenticationFailed,
        Self::FatalErrors,
        Self::GenericErrors,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::ConnectionRefused => "Connection Refused",
            Self::TooManyClients => "Too Many Clients",
            Self::TimeoutErrors => "Timeout Errors",
            Self::AuthenticationFailed => "Authentication Failed",
            Self::FatalErrors => "Fatal Errors",
            Self::GenericErrors => "Generic Errors",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Occurrence count per [`ErrorCategory`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ErrorCounts {
    counts: [u64; CATEGORY_COUNT],
}

impl ErrorCounts {
    #[must_use]
    pub fn get(&self, category: ErrorCategory) -> u64 {
        self.counts[category.index()]
    }

    pub fn set(&mut self, category: ErrorCategory, count: u64) {
        self.counts[category.index()] = count;
    }

    #[must_use]
    pub fn with(mut self, category: ErrorCategory, count: u64) -> Self {
        self.set(category, count);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (ErrorCategory, u64)> + '_ {
        ErrorCategory::ALL
            .into_iter()
            .map(move |c| (c, self.get(c)))
    }

    /// Categories with at least one match, in table order.
    pub fn non_zero(&self) -> impl Iterator<Item = (ErrorCategory, u64)> + '_ {
        self.iter().filter(|(_, count)| *count > 0)
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.counts.iter().all(|c| *c == 0)
    }
}

impl Serialize for ErrorCounts {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.counts.len()))?;
        for (category, count) in self.iter() {
            map.serialize_entry(&category, &count)?;
        }
        map.end()
    }
}

/// Latency stability derived from the coefficient of variation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, Serialize)]
pub enum ConsistencyRating {
    Good,
    Fair,
    Poor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, Serialize)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReliabilityLabel {
    Excellent,
    Good,
    Poor,
    Critical,
}

impl ReliabilityLabel {
    #[must_use]
    pub fn headline(self) -> &'static str {
        match self {
            Self::Excellent => "EXCELLENT RELIABILITY",
            Self::Good => "GOOD RELIABILITY",
            Self::Poor => "POOR RELIABILITY",
            Self::Critical => "CRITICAL ERRORS DETECTED",
        }
    }
}

/// Everything known about one (scenario, strategy) run after evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluatedResult {
    pub metrics: MetricRecord,
    pub errors: ErrorCounts,
    pub total_attempted: u64,
    /// Percent of attempted transactions that were processed.
    pub success_rate: f64,
    pub error_rate: f64,
    pub connection_rejections: u64,
    pub timeout_rate: f64,
    pub has_critical_errors: bool,
    pub has_timeouts: bool,
    pub consistency: ConsistencyRating,
}

use crate::classify::classify;
use crate::extract::extract;
use crate::model::{
    ConsistencyRating, ErrorCategory, ErrorCounts, EvaluatedResult, MetricRecord, ReliabilityLabel,
};

/// Below this success rate a run counts as having critical errors.
pub const CRITICAL_SUCCESS_RATE: f64 = 95.0;
/// At or above this success rate a clean run is rated excellent.
pub const EXCELLENT_SUCCESS_RATE: f64 = 99.0;

/// Coefficient of variation (percent) above which latency is `Poor`.
pub const POOR_CV: f64 = 50.0;
/// Coefficient of variation (percent) above which latency is `Fair`.
pub const FAIR_CV: f64 = 25.0;

/// Derives reliability indicators from one run's metrics and error counts.
///
/// Every ratio is guarded: with nothing attempted the success rate is `0`,
/// and the timeout rate divides by at least one.
#[must_use]
pub fn evaluate(metrics: MetricRecord, errors: ErrorCounts) -> EvaluatedResult {
    let total_attempted = metrics
        .client_count
        .saturating_mul(metrics.transactions_per_client);

    let success_rate = if total_attempted > 0 {
        metrics.transactions_processed as f64 / total_attempted as f64 * 100.0
    } else {
        0.0
    };

    let connection_rejections = errors
        .get(ErrorCategory::ConnectionRefused)
        .saturating_add(errors.get(ErrorCategory::TooManyClients));

    let timeouts = errors.get(ErrorCategory::TimeoutErrors);
    let timeout_rate = timeouts as f64 / total_attempted.max(1) as f64 * 100.0;

    let has_critical_errors = connection_rejections > 0
        || errors.get(ErrorCategory::FatalErrors) > 0
        || success_rate < CRITICAL_SUCCESS_RATE;

    EvaluatedResult {
        metrics,
        errors,
        total_attempted,
        success_rate,
        error_rate: 100.0 - success_rate,
        connection_rejections,
        timeout_rate,
        has_critical_errors,
        // The timeout signature matches "timeout" without regard to case, so
        // any occurrence of the word in the log is already counted here.
        has_timeouts: timeouts > 0,
        consistency: consistency_rating(metrics.latency_mean, metrics.latency_std_dev),
    }
}

/// Extracts, classifies and evaluates one raw log.
#[must_use]
pub fn evaluate_log(text: &str) -> EvaluatedResult {
    evaluate(extract(text), classify(text))
}

/// Standard deviation as a percentage of the mean; `None` when either is zero.
#[must_use]
pub fn coefficient_of_variation(mean: f64, std_dev: f64) -> Option<f64> {
    (mean > 0.0 && std_dev > 0.0).then(|| std_dev / mean * 100.0)
}

#[must_use]
pub fn consistency_rating(mean: f64, std_dev: f64) -> ConsistencyRating {
    match coefficient_of_variation(mean, std_dev) {
        Some(cv) if cv > POOR_CV => ConsistencyRating::Poor,
        Some(cv) if cv > FAIR_CV => ConsistencyRating::Fair,
        _ => ConsistencyRating::Good,
    }
}

impl EvaluatedResult {
    #[must_use]
    pub fn coefficient_of_variation(&self) -> Option<f64> {
        coefficient_of_variation(self.metrics.latency_mean, self.metrics.latency_std_dev)
    }

    /// Rate-based label, overridden by [`ReliabilityLabel::Critical`].
    #[must_use]
    pub fn reliability_label(&self) -> ReliabilityLabel {
        if self.has_critical_errors {
            ReliabilityLabel::Critical
        } else if self.success_rate >= EXCELLENT_SUCCESS_RATE {
            ReliabilityLabel::Excellent
        } else if self.success_rate >= CRITICAL_SUCCESS_RATE {
            ReliabilityLabel::Good
        } else {
            ReliabilityLabel::Poor
        }
    }
}

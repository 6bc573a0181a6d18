use serde::Serialize;

use crate::model::{EvaluatedResult, Scenario, Strategy};

/// Both strategies' results for one scenario; either side may be missing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioRun {
    pub scenario: Scenario,
    pub direct: Option<EvaluatedResult>,
    pub pooled: Option<EvaluatedResult>,
}

impl ScenarioRun {
    #[must_use]
    pub fn new(
        scenario: Scenario,
        direct: Option<EvaluatedResult>,
        pooled: Option<EvaluatedResult>,
    ) -> Self {
        Self {
            scenario,
            direct,
            pooled,
        }
    }

    #[must_use]
    pub fn result(&self, strategy: Strategy) -> Option<&EvaluatedResult> {
        match strategy {
            Strategy::Direct => self.direct.as_ref(),
            Strategy::Pooled => self.pooled.as_ref(),
        }
    }

    #[must_use]
    pub fn comparison(&self) -> Option<ScenarioComparison> {
        compare(self.scenario, self.direct.as_ref(), self.pooled.as_ref())
    }
}

/// Relative figures for pooled vs. direct within one scenario.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScenarioComparison {
    /// `pooled / direct` throughput; only when both runs are healthy.
    pub throughput_ratio: Option<f64>,
    /// Percent latency reduction; only when both runs are healthy.
    pub latency_improvement_pct: Option<f64>,
    /// Success rate difference in percentage points.
    pub reliability_delta: f64,
    pub rejections_eliminated: Option<u64>,
    /// Direct connections were rejected under extreme load while the pooler
    /// served every client.
    pub capacity_demonstration: bool,
}

/// Pairs the two strategy results of a scenario.
///
/// Returns `None` unless both sides are present. Throughput and latency
/// figures need both runs free of critical errors and a non-zero direct
/// denominator; the reliability delta is always computed.
#[must_use]
pub fn compare(
    scenario: Scenario,
    direct: Option<&EvaluatedResult>,
    pooled: Option<&EvaluatedResult>,
) -> Option<ScenarioComparison> {
    let (direct, pooled) = (direct?, pooled?);

    let healthy = !direct.has_critical_errors && !pooled.has_critical_errors;

    let throughput_ratio = (healthy && direct.metrics.throughput > 0.0)
        .then(|| pooled.metrics.throughput / direct.metrics.throughput);

    let latency_improvement_pct = (healthy && direct.metrics.latency_mean > 0.0)
        .then(|| (1.0 - pooled.metrics.latency_mean / direct.metrics.latency_mean) * 100.0);

    let rejections_eliminated = direct
        .connection_rejections
        .checked_sub(pooled.connection_rejections)
        .filter(|n| *n > 0);

    let capacity_demonstration = scenario.is_extreme_load()
        && direct.has_critical_errors
        && direct.connection_rejections > 0
        && !pooled.has_critical_errors;

    Some(ScenarioComparison {
        throughput_ratio,
        latency_improvement_pct,
        reliability_delta: pooled.success_rate - direct.success_rate,
        rejections_eliminated,
        capacity_demonstration,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluate::{evaluate, evaluate_log};
    use crate::model::{ErrorCounts, MetricRecord};

    fn healthy(throughput: f64, latency_mean: f64) -> EvaluatedResult {
        evaluate(
            MetricRecord {
                throughput,
                latency_mean,
                client_count: 20,
                transactions_per_client: 100,
                transactions_processed: 2000,
                ..MetricRecord::default()
            },
            ErrorCounts::default(),
        )
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn missing_side_yields_no_comparison() {
        let r = healthy(1000.0, 2.0);
        assert_eq!(compare(Scenario::Overhead, None, None), None);
        assert_eq!(compare(Scenario::Overhead, Some(&r), None), None);
        assert_eq!(compare(Scenario::Overhead, None, Some(&r)), None);
    }

    #[test]
    fn throughput_ratio_and_latency_improvement() {
        let direct = healthy(1000.0, 2.0);
        let pooled = healthy(4000.0, 0.5);

        let Some(c) = compare(Scenario::Overhead, Some(&direct), Some(&pooled)) else {
            panic!("expected comparison");
        };
        assert_eq!(c.throughput_ratio, Some(4.0));
        assert_eq!(c.latency_improvement_pct, Some(75.0));
        assert_eq!(c.reliability_delta, 0.0);
        assert_eq!(c.rejections_eliminated, None);
        assert!(!c.capacity_demonstration);
    }

    #[test]
    fn zero_direct_figures_omit_ratios() {
        let direct = healthy(0.0, 0.0);
        let pooled = healthy(4000.0, 0.5);
        let Some(c) = compare(Scenario::Overhead, Some(&direct), Some(&pooled)) else {
            panic!("expected comparison");
        };
        assert_eq!(c.throughput_ratio, None);
        assert_eq!(c.latency_improvement_pct, None);
    }

    #[test]
    fn critical_side_omits_ratios_but_keeps_delta() {
        let direct = evaluate_log(
            "number of clients: 20\nnumber of transactions per client: 100\nnumber of transactions actually processed: 1000/2000\ntps = 500.0\nlatency average = 4.0 ms\n",
        );
        let pooled = healthy(4000.0, 0.5);
        let Some(c) = compare(Scenario::Concurrent, Some(&direct), Some(&pooled)) else {
            panic!("expected comparison");
        };
        assert_eq!(c.throughput_ratio, None);
        assert_eq!(c.latency_improvement_pct, None);
        assert!(approx(c.reliability_delta, 50.0));
        assert!(!c.capacity_demonstration);
    }

    #[test]
    fn extreme_rejections_are_a_capacity_demonstration() {
        let direct = evaluate_log(
            "number of clients: 1000\nnumber of transactions per client: 10\npgbench: error: connection to server failed: FATAL:  sorry, too many clients already\n",
        );
        let pooled = evaluate_log(
            "number of clients: 1000\nnumber of transactions per client: 10\nnumber of transactions actually processed: 9980/10000\ntps = 3512.25 (without initial connection time)\nlatency average = 284.7 ms\n",
        );
        assert_eq!(direct.success_rate, 0.0);
        assert_eq!(pooled.connection_rejections, 0);

        let Some(c) = compare(Scenario::Extreme, Some(&direct), Some(&pooled)) else {
            panic!("expected comparison");
        };
        assert!(c.capacity_demonstration);
        assert!(approx(c.reliability_delta, 99.8));
        assert_eq!(c.rejections_eliminated, Some(1));
        assert_eq!(c.throughput_ratio, None);

        // Same facts outside the extreme scenario are not flagged.
        let Some(c) = compare(Scenario::Concurrent, Some(&direct), Some(&pooled)) else {
            panic!("expected comparison");
        };
        assert!(!c.capacity_demonstration);
    }

    #[test]
    fn failed_pooler_is_not_a_capacity_demonstration() {
        let direct = evaluate_log("number of clients: 1000\ntoo many clients\n");
        let pooled = evaluate_log("number of clients: 1000\nFATAL: no more connections allowed (max_client_conn)\n");
        let Some(c) = compare(Scenario::Extreme, Some(&direct), Some(&pooled)) else {
            panic!("expected comparison");
        };
        assert!(!c.capacity_demonstration);
    }

    #[test]
    fn scenario_run_derives_comparison() {
        let run = ScenarioRun::new(
            Scenario::Overhead,
            Some(healthy(1000.0, 2.0)),
            Some(healthy(4000.0, 0.5)),
        );
        assert!(run.result(Strategy::Direct).is_some());
        assert_eq!(
            run.comparison().and_then(|c| c.throughput_ratio),
            Some(4.0)
        );
        assert_eq!(ScenarioRun::new(Scenario::Extreme, None, None).comparison(), None);
    }
}

use serde::Serialize;

use crate::compare::{ScenarioComparison, ScenarioRun};
use crate::model::Scenario;

/// A notable, reportable fact about one scenario.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Finding {
    /// Pooling removed per-transaction connection setup cost.
    OverheadEliminated {
        scenario: Scenario,
        clients: u64,
        throughput_ratio: f64,
        latency_improvement_pct: f64,
    },

    /// Direct connections were rejected at the server's connection ceiling
    /// while the pooler served every client.
    CapacityDemonstration {
        scenario: Scenario,
        clients: u64,
        pooled_throughput: f64,
    },

    DirectFailedUnderLoad {
        scenario: Scenario,
        clients: u64,
        pooled_healthy: bool,
    },

    ReliabilityGain {
        scenario: Scenario,
        clients: u64,
        delta: f64,
    },
}

impl Finding {
    #[must_use]
    pub fn scenario(&self) -> Scenario {
        match self {
            Self::OverheadEliminated { scenario, .. }
            | Self::CapacityDemonstration { scenario, .. }
            | Self::DirectFailedUnderLoad { scenario, .. }
            | Self::ReliabilityGain { scenario, .. } => *scenario,
        }
    }
}

struct Facts<'a> {
    run: &'a ScenarioRun,
    comparison: Option<ScenarioComparison>,
}

type Rule = fn(&Facts<'_>) -> Option<Finding>;

/// Evaluated in order for every scenario.
const RULES: [Rule; 4] = [
    overhead_eliminated,
    capacity_demonstration,
    direct_failed_under_load,
    reliability_gain,
];

/// Runs the rule table over each scenario, in scenario order.
#[must_use]
pub fn key_findings(runs: &[ScenarioRun]) -> Vec<Finding> {
    let mut out = Vec::new();
    for run in runs {
        let facts = Facts {
            run,
            comparison: run.comparison(),
        };
        out.extend(RULES.iter().filter_map(|rule| rule(&facts)));
    }
    out
}

fn overhead_eliminated(facts: &Facts<'_>) -> Option<Finding> {
    if facts.run.scenario != Scenario::Overhead {
        return None;
    }
    let c = facts.comparison?;
    let throughput_ratio = c.throughput_ratio?;
    Some(Finding::OverheadEliminated {
        scenario: facts.run.scenario,
        clients: facts.run.direct.as_ref().map_or(0, |d| d.metrics.client_count),
        throughput_ratio,
        latency_improvement_pct: c.latency_improvement_pct.unwrap_or_default(),
    })
}

fn capacity_demonstration(facts: &Facts<'_>) -> Option<Finding> {
    if !facts.comparison?.capacity_demonstration {
        return None;
    }
    let pooled = facts.run.pooled.as_ref()?;
    Some(Finding::CapacityDemonstration {
        scenario: facts.run.scenario,
        clients: pooled.metrics.client_count,
        pooled_throughput: pooled.metrics.throughput,
    })
}

fn direct_failed_under_load(facts: &Facts<'_>) -> Option<Finding> {
    if !facts.run.scenario.is_extreme_load() {
        return None;
    }
    let direct = facts.run.direct.as_ref()?;
    let demonstrated = facts.comparison.is_some_and(|c| c.capacity_demonstration);
    (direct.has_critical_errors && !demonstrated).then(|| Finding::DirectFailedUnderLoad {
        scenario: facts.run.scenario,
        clients: direct.metrics.client_count,
        pooled_healthy: facts
            .run
            .pooled
            .as_ref()
            .is_some_and(|p| !p.has_critical_errors),
    })
}

fn reliability_gain(facts: &Facts<'_>) -> Option<Finding> {
    let c = facts.comparison?;
    let clients = facts
        .run
        .pooled
        .as_ref()
        .or(facts.run.direct.as_ref())
        .map_or(0, |r| r.metrics.client_count);
    (c.reliability_delta > 0.0 && !c.capacity_demonstration).then(|| Finding::ReliabilityGain {
        scenario: facts.run.scenario,
        clients,
        delta: c.reliability_delta,
    })
}

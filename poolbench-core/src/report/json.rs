use serde::Serialize;

use super::{GENERATED_FORMAT, ReportOptions};
use crate::compare::{ScenarioComparison, ScenarioRun};
use crate::error::Result;
use crate::findings::{Finding, key_findings};
use crate::model::{EvaluatedResult, ReliabilityLabel, Scenario};

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    generated: String,
    detailed: bool,
    scenarios: Vec<JsonScenario<'a>>,
    findings: Vec<Finding>,
}

#[derive(Debug, Serialize)]
struct JsonScenario<'a> {
    scenario: Scenario,
    direct: Option<JsonSide<'a>>,
    pgbouncer: Option<JsonSide<'a>>,
    comparison: Option<ScenarioComparison>,
}

#[derive(Debug, Serialize)]
struct JsonSide<'a> {
    throughput: f64,
    latency_mean: f64,
    has_critical_errors: bool,
    label: ReliabilityLabel,
    #[serde(skip_serializing_if = "Option::is_none")]
    reliability: Option<&'a EvaluatedResult>,
}

impl<'a> JsonSide<'a> {
    fn new(r: &'a EvaluatedResult, detailed: bool) -> Self {
        Self {
            throughput: r.metrics.throughput,
            latency_mean: r.metrics.latency_mean,
            has_critical_errors: r.has_critical_errors,
            label: r.reliability_label(),
            reliability: detailed.then_some(r),
        }
    }
}

pub(crate) fn render(runs: &[ScenarioRun], options: &ReportOptions) -> Result<String> {
    let detailed = options.include_reliability_detail;

    let report = JsonReport {
        generated: options.generated_at.format(GENERATED_FORMAT).to_string(),
        detailed,
        scenarios: runs
            .iter()
            .map(|run| JsonScenario {
                scenario: run.scenario,
                direct: run.direct.as_ref().map(|r| JsonSide::new(r, detailed)),
                pgbouncer: run.pooled.as_ref().map(|r| JsonSide::new(r, detailed)),
                comparison: run.comparison(),
            })
            .collect(),
        findings: key_findings(runs),
    };

    let mut out = serde_json::to_string_pretty(&report)?;
    out.push('\n');
    Ok(out)
}

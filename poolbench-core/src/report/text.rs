use std::fmt::Write as _;

use super::format::*;
use super::{GENERATED_FORMAT, ReportOptions};
use crate::compare::{ScenarioComparison, ScenarioRun};
use crate::findings::{Finding, key_findings};
use crate::model::{EvaluatedResult, Strategy};

const NO_DATA: &str = "NO DATA";
const FAILED: &str = "FAILED or ERRORS";
const CONNECTION_LIMIT_FAILURE: &str =
    "Direct connections FAILED as expected (connection limit exceeded)";

const DETAIL_CONTENTS: [&str; 5] = [
    "Success/Error Rates",
    "Connection Rejection Counts",
    "Timeout Rates",
    "Error Type Classification",
    "Performance Consistency",
];

const BENEFITS: [&str; 4] = [
    "Eliminates connection establishment overhead",
    "Enables high concurrency beyond database limits",
    "Improves both throughput and latency",
    "Provides reliable connection pooling and queuing",
];

pub(crate) fn render(runs: &[ScenarioRun], options: &ReportOptions) -> String {
    let mut out = String::new();

    render_header(options, &mut out);
    render_performance(runs, &mut out);

    if options.include_reliability_detail {
        render_reliability(runs, &mut out);
        render_comparative(runs, &mut out);
    }

    render_findings(&key_findings(runs), &mut out);
    render_conclusion(&mut out);

    out
}

fn render_header(options: &ReportOptions, out: &mut String) {
    let (title, width) = if options.include_reliability_detail {
        ("PgBouncer Performance Test - DETAILED ANALYSIS", 60)
    } else {
        ("PgBouncer Performance Test Results", 50)
    };

    writeln!(out, "{title}").ok();
    writeln!(out, "{}", "=".repeat(width)).ok();
    writeln!(
        out,
        "Generated: {}",
        options.generated_at.format(GENERATED_FORMAT)
    )
    .ok();
    out.push('\n');

    if options.include_reliability_detail {
        out.push_str("This analysis includes comprehensive reliability metrics:\n");
        for item in DETAIL_CONTENTS {
            writeln!(out, "- {item}").ok();
        }
        out.push('\n');
    }
}

fn section(title: &str, out: &mut String) {
    writeln!(out, "{title}").ok();
    writeln!(out, "{}", "=".repeat(30)).ok();
}

fn render_performance(runs: &[ScenarioRun], out: &mut String) {
    section("PERFORMANCE SUMMARY", out);

    for run in runs {
        writeln!(out, "\n{} TEST", run.scenario.name().to_uppercase()).ok();
        writeln!(out, "{}", "-".repeat(20)).ok();

        for strategy in Strategy::ALL {
            let label = strategy.label();
            match run.result(strategy) {
                None => writeln!(out, "{label}: {NO_DATA}").ok(),
                Some(r) if r.has_critical_errors => writeln!(out, "{label}: {FAILED}").ok(),
                Some(r) => writeln!(
                    out,
                    "{label}: {} TPS, {} avg latency",
                    format_tps(r.metrics.throughput),
                    format_ms(r.metrics.latency_mean)
                )
                .ok(),
            };
        }

        if let Some(c) = run.comparison() {
            render_ratios(&c, out);
        }
    }
}

fn render_ratios(c: &ScenarioComparison, out: &mut String) {
    if let Some(ratio) = c.throughput_ratio {
        writeln!(out, "Throughput ratio: {ratio:.2}x").ok();
    }
    if let Some(pct) = c.latency_improvement_pct {
        writeln!(out, "Latency improvement: {}", format_signed_pct(pct)).ok();
    }
}

fn render_reliability(runs: &[ScenarioRun], out: &mut String) {
    out.push_str("\n\n");
    section("RELIABILITY ANALYSIS", out);

    for run in runs {
        writeln!(
            out,
            "\n{} TEST - RELIABILITY METRICS",
            run.scenario.name().to_uppercase()
        )
        .ok();
        writeln!(out, "{}", "-".repeat(40)).ok();

        for strategy in Strategy::ALL {
            match run.result(strategy) {
                Some(r) => render_result_detail(strategy, r, out),
                None => {
                    writeln!(out, "{}: {NO_DATA}", strategy.label()).ok();
                }
            }
        }
    }
}

fn render_result_detail(strategy: Strategy, r: &EvaluatedResult, out: &mut String) {
    writeln!(out, "\n{} Connection:", strategy.label()).ok();
    writeln!(out, "  Success Rate: {}", format_pct(r.success_rate)).ok();
    writeln!(out, "  Error Rate: {}", format_pct(r.error_rate)).ok();
    writeln!(
        out,
        "  Transactions: {}/{}",
        r.metrics.transactions_processed, r.total_attempted
    )
    .ok();

    if r.connection_rejections > 0 {
        writeln!(out, "  Connection Rejections: {}", r.connection_rejections).ok();
    }
    if r.timeout_rate > 0.0 {
        writeln!(out, "  Timeout Rate: {}", format_pct(r.timeout_rate)).ok();
    }

    if !r.errors.is_clean() {
        out.push_str("  Error Breakdown:\n");
        for (category, count) in r.errors.non_zero() {
            writeln!(out, "    {}: {count}", category.label()).ok();
        }
    }

    let cv = r
        .coefficient_of_variation()
        .map(|cv| format!(" (CV {})", format_pct(cv)))
        .unwrap_or_default();
    writeln!(out, "  Performance Consistency: {}{cv}", r.consistency).ok();

    if r.metrics.latency_std_dev > 0.0 {
        writeln!(out, "  Latency Std Dev: {}", format_ms(r.metrics.latency_std_dev)).ok();
    }

    writeln!(out, "  Assessment: {}", r.reliability_label().headline()).ok();
}

fn render_comparative(runs: &[ScenarioRun], out: &mut String) {
    out.push_str("\n\n");
    section("COMPARATIVE RELIABILITY", out);

    for run in runs {
        let name = run.scenario.name();
        let (Some(direct), Some(pooled), Some(c)) =
            (run.direct.as_ref(), run.pooled.as_ref(), run.comparison())
        else {
            writeln!(out, "\n{name} Test Comparison: {NO_DATA}").ok();
            continue;
        };

        writeln!(out, "\n{name} Test Comparison:").ok();
        writeln!(
            out,
            "  {} Success Rate: {}",
            Strategy::Direct.label(),
            format_pct(direct.success_rate)
        )
        .ok();
        writeln!(
            out,
            "  {} Success Rate: {}",
            Strategy::Pooled.label(),
            format_pct(pooled.success_rate)
        )
        .ok();
        writeln!(
            out,
            "  Reliability Improvement: {}",
            format_points(c.reliability_delta)
        )
        .ok();

        if let Some(n) = c.rejections_eliminated {
            writeln!(
                out,
                "  {} eliminated {n} connection rejections",
                Strategy::Pooled.label()
            )
            .ok();
        }
    }
}

fn render_findings(findings: &[Finding], out: &mut String) {
    out.push_str("\n\nKEY FINDINGS\n");
    writeln!(out, "{}", "-".repeat(20)).ok();

    if findings.is_empty() {
        out.push_str("No notable findings.\n\n");
        return;
    }

    for finding in findings {
        let (heading, lines) = describe(finding);
        writeln!(out, "{heading}:").ok();
        for line in lines {
            writeln!(out, "- {line}").ok();
        }
        out.push('\n');
    }
}

/// Wording for one finding: a heading and its bullet lines.
fn describe(finding: &Finding) -> (String, Vec<String>) {
    let pooler = Strategy::Pooled.label();

    match *finding {
        Finding::OverheadEliminated {
            scenario,
            clients,
            throughput_ratio,
            latency_improvement_pct,
        } => {
            let latency = if latency_improvement_pct >= 0.0 {
                format!("{pooler} reduced latency by {latency_improvement_pct:.0}%")
            } else {
                format!("{pooler} increased latency by {:.0}%", -latency_improvement_pct)
            };
            (
                heading(scenario.title(), clients),
                vec![
                    format!(
                        "{pooler} achieved {throughput_ratio:.1}x the throughput of direct connections"
                    ),
                    latency,
                    "This demonstrates the massive overhead of connection establishment"
                        .to_string(),
                ],
            )
        }
        Finding::CapacityDemonstration {
            scenario,
            clients,
            pooled_throughput,
        } => (
            heading(scenario.title(), clients),
            vec![
                CONNECTION_LIMIT_FAILURE.to_string(),
                format!("{pooler} successfully handled all {clients} clients"),
                format!("Achieved {pooled_throughput:.0} TPS with {clients} concurrent clients"),
                multiplexing_line(),
            ],
        ),
        Finding::DirectFailedUnderLoad {
            scenario,
            clients,
            pooled_healthy,
        } => {
            let pooled = if pooled_healthy {
                format!("{pooler} completed the same load without critical errors")
            } else {
                format!("No clean {pooler} run was available for comparison")
            };
            (
                heading(scenario.title(), clients),
                vec![CONNECTION_LIMIT_FAILURE.to_string(), pooled, multiplexing_line()],
            )
        }
        Finding::ReliabilityGain {
            scenario,
            clients,
            delta,
        } => (
            heading(scenario.title(), clients),
            vec![format!(
                "{pooler} improved success rate by {}",
                format_points(delta)
            )],
        ),
    }
}

fn heading(title: &str, clients: u64) -> String {
    if clients > 0 {
        format!("{title} ({clients} clients)")
    } else {
        title.to_string()
    }
}

fn multiplexing_line() -> String {
    format!(
        "This demonstrates {}'s ability to handle connection multiplexing",
        Strategy::Pooled.label()
    )
}

fn render_conclusion(out: &mut String) {
    out.push_str("CONCLUSION:\n");
    writeln!(out, "{} provides significant benefits:", Strategy::Pooled.label()).ok();
    for (i, benefit) in BENEFITS.iter().enumerate() {
        writeln!(out, "{}. {benefit}", i + 1).ok();
    }
}

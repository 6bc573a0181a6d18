use regex::Regex;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::model::MetricRecord;

/// Labelled values as pgbench prints them in its run summary.
struct Markers {
    throughput: Regex,
    latency_mean: Regex,
    latency_std_dev: Regex,
    scaling_factor: Regex,
    client_count: Regex,
    transactions_per_client: Regex,
    transactions_processed: Regex,
}

impl Markers {
    fn compile() -> Self {
        Self {
            throughput: marker(r"tps = ([0-9.]+)"),
            latency_mean: marker(r"latency average = ([0-9.]+) ms"),
            latency_std_dev: marker(r"latency stddev = ([0-9.]+) ms"),
            scaling_factor: marker(r"scaling factor: ([0-9]+)"),
            client_count: marker(r"number of clients: ([0-9]+)"),
            transactions_per_client: marker(r"number of transactions per client: ([0-9]+)"),
            transactions_processed: marker(
                r"number of transactions actually processed: ([0-9]+)",
            ),
        }
    }
}

static MARKERS: LazyLock<Markers> = LazyLock::new(Markers::compile);

fn marker(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|err| panic!("invalid marker pattern `{pattern}`: {err}"))
}

/// Pulls the summary numbers out of a pgbench log.
///
/// Every field is taken from the first occurrence of its marker. Logs from
/// aborted runs are often truncated, so a missing marker (or a captured value
/// that does not parse) leaves the field at zero instead of failing.
#[must_use]
pub fn extract(text: &str) -> MetricRecord {
    let m = &*MARKERS;
    MetricRecord {
        throughput: capture(&m.throughput, text),
        latency_mean: capture(&m.latency_mean, text),
        latency_std_dev: capture(&m.latency_std_dev, text),
        scaling_factor: capture(&m.scaling_factor, text),
        client_count: capture(&m.client_count, text),
        transactions_per_client: capture(&m.transactions_per_client, text),
        transactions_processed: capture(&m.transactions_processed, text),
    }
}

fn capture<T: FromStr + Default>(re: &Regex, text: &str) -> T {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or_default()
}

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use anyhow::Context as _;

const TS: &str = "20261019_093000";

const DIRECT_OVERHEAD: &str = "\
scaling factor: 10
number of clients: 20
number of transactions per client: 100
number of transactions actually processed: 2000/2000
latency average = 2.000 ms
latency stddev = 0.300 ms
tps = 1000.000000 (including reconnection times)
";

const POOLED_OVERHEAD: &str = "\
scaling factor: 10
number of clients: 20
number of transactions per client: 100
number of transactions actually processed: 2000/2000
latency average = 0.500 ms
latency stddev = 0.050 ms
tps = 4000.000000 (including reconnection times)
";

const DIRECT_EXTREME: &str = "\
pgbench: error: connection to server at \"127.0.0.1\", port 5432 failed: FATAL:  sorry, too many clients already
number of clients: 1000
number of transactions per client: 10
number of transactions actually processed: 0/10000
";

const POOLED_EXTREME: &str = "\
number of clients: 1000
number of transactions per client: 10
number of transactions actually processed: 9980/10000
latency average = 262.147 ms
latency stddev = 88.931 ms
tps = 3814.650227 (without initial connection time)
";

fn stage(dir: &Path) -> anyhow::Result<()> {
    for (name, body) in [
        ("direct_overhead", DIRECT_OVERHEAD),
        ("pgbouncer_overhead", POOLED_OVERHEAD),
        ("direct_extreme", DIRECT_EXTREME),
        ("pgbouncer_extreme", POOLED_EXTREME),
    ] {
        fs::write(dir.join(format!("{name}_{TS}.log")), body)
            .with_context(|| format!("write {name} log"))?;
    }
    Ok(())
}

fn run(dir: &Path, extra: &[&str]) -> anyhow::Result<Output> {
    let out = Command::new(env!("CARGO_BIN_EXE_poolbench"))
        .arg(dir)
        .arg(TS)
        .args(extra)
        .env_remove("POOLBENCH_SIMPLE")
        .env_remove("RUST_LOG")
        .output()
        .context("run poolbench binary")?;

    anyhow::ensure!(
        out.status.success(),
        "expected success, got {:?}\nstderr:\n{}",
        out.status.code(),
        String::from_utf8_lossy(&out.stderr)
    );
    Ok(out)
}

#[test]
fn detailed_report_is_written_and_echoed() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    stage(dir.path())?;

    let out = run(dir.path(), &[])?;

    let path = dir.path().join(format!("detailed_analysis_{TS}.txt"));
    let saved = fs::read_to_string(&path).context("read saved report")?;
    let stdout = String::from_utf8(out.stdout).context("stdout utf-8")?;

    anyhow::ensure!(stdout == saved, "stdout differs from saved report");
    anyhow::ensure!(saved.contains("Direct: 1000.00 TPS, 2.00 ms avg latency\n"));
    anyhow::ensure!(saved.contains("Throughput ratio: 4.00x\nLatency improvement: +75.0%\n"));
    anyhow::ensure!(saved.contains(
        "\nCONCURRENT TEST\n--------------------\nDirect: NO DATA\nPgBouncer: NO DATA\n"
    ));
    anyhow::ensure!(saved.contains("Reliability Improvement: +99.8 percentage points"));
    anyhow::ensure!(
        saved.contains("Direct connections FAILED as expected (connection limit exceeded)")
    );
    anyhow::ensure!(saved.contains("RELIABILITY ANALYSIS"));

    let stderr = String::from_utf8_lossy(&out.stderr);
    anyhow::ensure!(
        stderr.contains(&path.display().to_string()),
        "expected report path on stderr:\n{stderr}"
    );

    Ok(())
}

#[test]
fn simple_report_uses_summary_name() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    stage(dir.path())?;

    let out = run(dir.path(), &["--simple", "--no-echo"])?;
    anyhow::ensure!(out.stdout.is_empty(), "--no-echo must keep stdout empty");

    let saved = fs::read_to_string(dir.path().join(format!("summary_{TS}.txt")))
        .context("read saved summary")?;
    anyhow::ensure!(saved.starts_with("PgBouncer Performance Test Results\n"));
    anyhow::ensure!(!saved.contains("RELIABILITY ANALYSIS"));
    anyhow::ensure!(saved.contains("KEY FINDINGS"));
    anyhow::ensure!(!dir.path().join(format!("detailed_analysis_{TS}.txt")).exists());

    Ok(())
}

#[test]
fn json_report_parses() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    stage(dir.path())?;

    let out = run(dir.path(), &["--format", "json"])?;
    let saved = fs::read_to_string(dir.path().join(format!("detailed_analysis_{TS}.json")))
        .context("read saved json report")?;
    anyhow::ensure!(out.stdout == saved.as_bytes());

    let v: serde_json::Value = serde_json::from_str(&saved).context("parse json report")?;
    anyhow::ensure!(v["scenarios"].as_array().map(Vec::len) == Some(3));
    anyhow::ensure!(v["scenarios"][2]["comparison"]["capacity_demonstration"] == true);
    anyhow::ensure!(v["scenarios"][1]["direct"].is_null());

    Ok(())
}

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::compare::ScenarioRun;
use crate::evaluate::evaluate_log;
use crate::model::{EvaluatedResult, Scenario, Strategy};
use crate::report::{ReportFormat, ReportKind};

/// File naming inside a benchmark results directory.
///
/// Logs live at `<dir>/<strategy>_<scenario>_<timestamp>.log`; reports are
/// written next to them as `<dir>/<kind>_<timestamp>.<ext>`.
#[derive(Debug, Clone)]
pub struct ResultsLayout {
    dir: PathBuf,
    timestamp: String,
}

impl ResultsLayout {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>, timestamp: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            timestamp: timestamp.into(),
        }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    #[must_use]
    pub fn log_path(&self, strategy: Strategy, scenario: Scenario) -> PathBuf {
        self.dir
            .join(format!("{strategy}_{scenario}_{}.log", self.timestamp))
    }

    #[must_use]
    pub fn report_path(&self, kind: ReportKind, format: ReportFormat) -> PathBuf {
        self.dir.join(format!(
            "{kind}_{}.{}",
            self.timestamp,
            format.extension()
        ))
    }

    /// Reads and evaluates one run; `None` when its log is missing or unreadable.
    #[must_use]
    pub fn load_result(&self, strategy: Strategy, scenario: Scenario) -> Option<EvaluatedResult> {
        let path = self.log_path(strategy, scenario);
        let text = read_log(&path)?;
        let result = evaluate_log(&text);
        tracing::debug!(
            path = %path.display(),
            tps = result.metrics.throughput,
            latency_ms = result.metrics.latency_mean,
            success_rate = result.success_rate,
            critical = result.has_critical_errors,
            "evaluated benchmark log"
        );
        Some(result)
    }

    #[must_use]
    pub fn load_run(&self, scenario: Scenario) -> ScenarioRun {
        ScenarioRun::new(
            scenario,
            self.load_result(Strategy::Direct, scenario),
            self.load_result(Strategy::Pooled, scenario),
        )
    }

    /// Every scenario, in report order.
    #[must_use]
    pub fn load_all(&self) -> Vec<ScenarioRun> {
        Scenario::ALL.into_iter().map(|s| self.load_run(s)).collect()
    }
}

/// Reads a whole log once. Absence is a normal "no data" outcome.
///
/// Bytes that are not valid UTF-8 are replaced rather than rejected.
#[must_use]
pub fn read_log(path: &Path) -> Option<String> {
    tracing::debug!(path = %path.display(), "reading benchmark log");
    match fs::read(path) {
        Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
        Err(err) if err.kind() == ErrorKind::NotFound => {
            tracing::info!(path = %path.display(), "benchmark log not found");
            None
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "benchmark log unreadable");
            None
        }
    }
}

use anyhow::{Context as _, anyhow};
use chrono::Local;
use std::io::Write as _;

use poolbench_core::{ReportOptions, ResultsLayout, render};

use crate::cli::Cli;
use crate::exit_codes::ExitCode;
use crate::run_error::RunError;

pub(crate) fn run(cli: Cli) -> Result<ExitCode, RunError> {
    validate_timestamp(&cli.timestamp).map_err(RunError::InvalidInput)?;

    if !cli.results_dir.is_dir() {
        return Err(RunError::InvalidInput(anyhow!(
            "results directory `{}` does not exist or is not a directory",
            cli.results_dir.display()
        )));
    }

    let layout = ResultsLayout::new(&cli.results_dir, &cli.timestamp);
    let runs = layout.load_all();

    let options = ReportOptions {
        include_reliability_detail: !cli.simple,
        generated_at: Local::now().naive_local(),
    };

    let report = render(&runs, &options, cli.format.into())
        .context("render report")
        .map_err(RunError::RuntimeError)?;

    let path = layout.report_path(report.kind(), report.format());
    report
        .write_to(&path)
        .context("save report")
        .map_err(RunError::RuntimeError)?;
    tracing::info!(path = %path.display(), kind = %report.kind(), "report written");

    if !cli.no_echo {
        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(report.content().as_bytes())
            .and_then(|()| stdout.flush())
            .context("echo report to stdout")
            .map_err(RunError::RuntimeError)?;
    }
    eprintln!("analysis complete, report saved to: {}", path.display());

    Ok(ExitCode::Success)
}

/// The timestamp becomes part of file names; it must not escape the results directory.
fn validate_timestamp(ts: &str) -> anyhow::Result<()> {
    if ts.trim().is_empty() {
        anyhow::bail!("timestamp cannot be empty");
    }
    if ts.contains(['/', '\\']) {
        anyhow::bail!("invalid timestamp `{ts}` (must not contain path separators)");
    }
    Ok(())
}

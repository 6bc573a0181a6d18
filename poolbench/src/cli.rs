use clap::Parser;
use std::path::PathBuf;

use poolbench_core::ReportFormat;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report.
    Text,
    /// Machine-readable JSON document.
    Json,
}

impl From<OutputFormat> for ReportFormat {
    fn from(value: OutputFormat) -> Self {
        match value {
            OutputFormat::Text => Self::Text,
            OutputFormat::Json => Self::Json,
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "poolbench",
    author,
    version,
    about = "Analyze pgbench logs comparing direct connections with PgBouncer",
    long_about = "poolbench reads the pgbench logs of a finished benchmark run and writes a comparative report.\n\nFor each scenario (overhead, concurrent, extreme) and strategy (direct, pgbouncer) it expects `<RESULTS_DIR>/<strategy>_<scenario>_<TIMESTAMP>.log`. Missing logs are reported as NO DATA.\n\nThe report is written to `<RESULTS_DIR>/detailed_analysis_<TIMESTAMP>.txt` (or `summary_<TIMESTAMP>.txt` with --simple) and echoed to stdout.",
    after_help = "Examples:\n  poolbench ./results 20261019_093000\n  poolbench ./results 20261019_093000 --simple\n  poolbench ./results 20261019_093000 --format json --no-echo"
)]
pub struct Cli {
    /// Directory holding the benchmark logs
    #[arg(env = "POOLBENCH_RESULTS_DIR")]
    pub results_dir: PathBuf,

    /// Run timestamp embedded in the log file names
    #[arg(env = "POOLBENCH_TIMESTAMP")]
    pub timestamp: String,

    /// Performance summary and findings only (no reliability detail)
    #[arg(long, env = "POOLBENCH_SIMPLE")]
    pub simple: bool,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Do not echo the report to stdout
    #[arg(long)]
    pub no_echo: bool,

    /// Log filter for diagnostics on stderr (RUST_LOG takes precedence)
    #[arg(long, env = "POOLBENCH_LOG", default_value = "warn")]
    pub log_level: String,
}

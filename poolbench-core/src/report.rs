use chrono::NaiveDateTime;
use std::fs;
use std::path::Path;

use crate::compare::ScenarioRun;
use crate::error::{Error, Result};

mod format;
mod json;
mod text;

pub use format::{format_ms, format_pct, format_tps};

/// Timestamp layout of the `Generated:` header line.
pub const GENERATED_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum ReportFormat {
    Text,
    Json,
}

impl ReportFormat {
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Json => "json",
        }
    }
}

/// Which flavour of analysis a report holds; also its file stem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum ReportKind {
    /// Performance summary and findings only.
    Summary,
    /// Adds per-run reliability detail and comparative reliability.
    DetailedAnalysis,
}

#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub include_reliability_detail: bool,
    pub generated_at: NaiveDateTime,
}

impl ReportOptions {
    #[must_use]
    pub fn kind(&self) -> ReportKind {
        if self.include_reliability_detail {
            ReportKind::DetailedAnalysis
        } else {
            ReportKind::Summary
        }
    }
}

/// A rendered report. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    kind: ReportKind,
    format: ReportFormat,
    content: String,
}

impl Report {
    #[must_use]
    pub fn kind(&self) -> ReportKind {
        self.kind
    }

    #[must_use]
    pub fn format(&self) -> ReportFormat {
        self.format
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Writes the report; the file is closed when this returns.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        fs::write(path, &self.content).map_err(|source| Error::WriteReport {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Renders the scenarios in the order given.
///
/// Output depends only on `runs` and `options`; the sole varying input is
/// `options.generated_at`.
pub fn render(
    runs: &[ScenarioRun],
    options: &ReportOptions,
    format: ReportFormat,
) -> Result<Report> {
    let content = match format {
        ReportFormat::Text => text::render(runs, options),
        ReportFormat::Json => json::render(runs, options)?,
    };

    Ok(Report {
        kind: options.kind(),
        format,
        content,
    })
}

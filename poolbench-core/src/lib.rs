//! Analysis engine for pgbench logs comparing direct connections with
//! connections through a pooler.
//!
//! One log per (scenario, strategy) pair is read once, turned into a
//! [`MetricRecord`] and [`ErrorCounts`], evaluated into an
//! [`EvaluatedResult`], paired per scenario and rendered into a [`Report`].

pub mod classify;
pub mod compare;
pub mod evaluate;
pub mod extract;
pub mod findings;
pub mod layout;
pub mod model;
pub mod report;

mod error;

pub use classify::classify;
pub use compare::{ScenarioComparison, ScenarioRun, compare};
pub use error::{Error, Result};
pub use evaluate::{evaluate, evaluate_log};
pub use extract::extract;
pub use findings::{Finding, key_findings};
pub use layout::ResultsLayout;
pub use model::{
    ConsistencyRating, ErrorCategory, ErrorCounts, EvaluatedResult, MetricRecord,
    ReliabilityLabel, Scenario, Strategy,
};
pub use report::{Report, ReportFormat, ReportKind, ReportOptions, render};

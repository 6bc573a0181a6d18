use regex::{Regex, RegexBuilder};
use std::sync::LazyLock;

use crate::model::{CATEGORY_COUNT, ErrorCategory, ErrorCounts};

/// Phrases that identify one failure category in benchmark output.
#[derive(Debug, Clone, Copy)]
pub struct Signature {
    pub category: ErrorCategory,
    pub phrases: &'static [&'static str],
    pub case_insensitive: bool,
}

pub const SIGNATURES: [Signature; CATEGORY_COUNT] = [
    Signature {
        category: ErrorCategory::ConnectionRefused,
        phrases: &["connection refused", "could not connect"],
        case_insensitive: true,
    },
    Signature {
        category: ErrorCategory::TooManyClients,
        phrases: &["too many clients", "connection limit"],
        case_insensitive: true,
    },
    Signature {
        category: ErrorCategory::TimeoutErrors,
        phrases: &["timeout", "timed out"],
        case_insensitive: true,
    },
    Signature {
        category: ErrorCategory::AuthenticationFailed,
        phrases: &["authentication failed", "password authentication"],
        case_insensitive: true,
    },
    // Server-side severity markers are matched literally.
    Signature {
        category: ErrorCategory::FatalErrors,
        phrases: &["FATAL:"],
        case_insensitive: false,
    },
    Signature {
        category: ErrorCategory::GenericErrors,
        phrases: &["ERROR:"],
        case_insensitive: false,
    },
];

impl Signature {
    fn compile(&self) -> Regex {
        let alternation = self
            .phrases
            .iter()
            .map(|p| regex::escape(p))
            .collect::<Vec<_>>()
            .join("|");

        RegexBuilder::new(&alternation)
            .case_insensitive(self.case_insensitive)
            .build()
            .unwrap_or_else(|err| panic!("invalid signature for {}: {err}", self.category))
    }
}

static COMPILED: LazyLock<Vec<(ErrorCategory, Regex)>> = LazyLock::new(|| {
    SIGNATURES
        .iter()
        .map(|sig| (sig.category, sig.compile()))
        .collect()
});

/// Counts failure signatures per category.
///
/// Matching is lexical over the whole text: a phrase counts wherever it
/// appears, including inside unrelated lines.
#[must_use]
pub fn classify(text: &str) -> ErrorCounts {
    let mut counts = ErrorCounts::default();
    for (category, re) in COMPILED.iter() {
        counts.set(*category, re.find_iter(text).count() as u64);
    }
    counts
}

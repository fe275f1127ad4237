//! Test utilities for metacheck.
//!
//! Provides parsers and runners for the test file formats used in the metacheck project:
//! - meta blocks (`<--[event] ... -->`) turned into [`Fragment`]s
//! - `tests/fragments/*.test`: case files with meta blocks and expected issues
//!
//! [`Fragment`]: metacheck_core::Fragment

pub mod blocks;
pub mod cases;

use std::fmt;

/// What happened when one fragment case ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseOutcome {
    /// The report matched the expected `record: kind` lines.
    Pass,
    /// The report differed; both sides as `record: kind` lines.
    Mismatch {
        expected: Vec<String>,
        actual: Vec<String>,
    },
    /// The case could not be run at all.
    Broken { reason: String },
}

impl CaseOutcome {
    pub fn is_pass(&self) -> bool {
        matches!(self, CaseOutcome::Pass)
    }
}

/// A case that did not pass, with where it lives in its file.
#[derive(Debug, Clone)]
pub struct CaseFailure {
    pub name: String,
    pub line: usize,
    pub outcome: CaseOutcome,
}

/// Tally of a fragment case file.
#[derive(Debug, Default)]
pub struct CaseSummary {
    pub passed: usize,
    pub failures: Vec<CaseFailure>,
}

impl CaseSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, name: impl Into<String>, line: usize, outcome: CaseOutcome) {
        if outcome.is_pass() {
            self.passed += 1;
        } else {
            self.failures.push(CaseFailure {
                name: name.into(),
                line,
                outcome,
            });
        }
    }

    pub fn total(&self) -> usize {
        self.passed + self.failures.len()
    }

    pub fn all_passed(&self) -> bool {
        self.failures.is_empty()
    }
}

/// One line per failing case, then the differing issues: `-` for expected
/// issues the report lacks, `+` for reported issues nobody expected.
impl fmt::Display for CaseSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for failure in &self.failures {
            writeln!(f, "FAIL {} (line {})", failure.name, failure.line)?;
            match &failure.outcome {
                CaseOutcome::Mismatch { expected, actual } => {
                    for line in expected.iter().filter(|l| !actual.contains(*l)) {
                        writeln!(f, "  - {line}")?;
                    }
                    for line in actual.iter().filter(|l| !expected.contains(*l)) {
                        writeln!(f, "  + {line}")?;
                    }
                    if expected.iter().all(|l| actual.contains(l))
                        && actual.iter().all(|l| expected.contains(l))
                    {
                        writeln!(f, "  issues differ in order or count: {}", actual.join(", "))?;
                    }
                }
                CaseOutcome::Broken { reason } => writeln!(f, "  {reason}")?,
                CaseOutcome::Pass => {}
            }
        }
        write!(f, "fragment cases: {}/{} passed", self.passed, self.total())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_lists_missing_and_unexpected_issues() {
        let mut summary = CaseSummary::new();
        summary.record("clean", 1, CaseOutcome::Pass);
        summary.record(
            "dangling",
            12,
            CaseOutcome::Mismatch {
                expected: vec!["a: dangling_reference".into()],
                actual: vec!["a: missing_required_field".into()],
            },
        );
        summary.record(
            "empty",
            30,
            CaseOutcome::Broken {
                reason: "no meta blocks in input".into(),
            },
        );

        assert!(!summary.all_passed());
        assert_eq!(summary.total(), 3);
        assert_eq!(
            summary.to_string(),
            "FAIL dangling (line 12)\n  \
             - a: dangling_reference\n  \
             + a: missing_required_field\n\
             FAIL empty (line 30)\n  \
             no meta blocks in input\n\
             fragment cases: 1/3 passed"
        );
    }

    #[test]
    fn reordered_issues_are_called_out() {
        let mut summary = CaseSummary::new();
        summary.record(
            "order",
            1,
            CaseOutcome::Mismatch {
                expected: vec!["a: x".into(), "a: y".into()],
                actual: vec!["a: y".into(), "a: x".into()],
            },
        );
        assert!(summary.to_string().contains("issues differ in order or count: a: y, a: x"));
    }
}

//! Fragment test file parser and runner.
//!
//! Parses the `tests/fragments/*.test` format and runs each case through the
//! full check pipeline:
//!
//! ```text
//! # test: dangling trigger link
//! ---
//! <--[event]
//! @Events player jumps
//! @Triggers see <@link event player hops>
//! @Regex .*
//! -->
//! ---
//! player jumps: dangling_reference
//! ===
//! ```
//!
//! The expected section lists one `record: kind` line per issue, in report
//! order, or the single word `ok` for no issues.

use metacheck_core::{CheckConfig, check_fragments};

use crate::blocks::parse_blocks;
use crate::{CaseOutcome, CaseSummary};

/// A single fragment test case.
#[derive(Debug, Clone)]
pub struct FragmentTestCase {
    /// Test name from the `# test: name` line.
    pub name: String,
    /// Line number where the test starts (1-indexed).
    pub line_number: usize,
    /// The meta blocks to check.
    pub input: String,
    /// Expected `record: kind` lines; empty means no issues.
    pub expected: Vec<String>,
}

/// Parse the *.test file format into test cases.
pub fn parse_fragment_tests(content: &str) -> Vec<FragmentTestCase> {
    let mut cases = Vec::new();
    let lines: Vec<&str> = content.lines().collect();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i].trim();

        let Some(name) = line.strip_prefix("# test:") else {
            i += 1;
            continue;
        };
        let name = name.trim().to_string();
        let start_line = i + 1;
        i += 1;

        // Skip to first ---
        while i < lines.len() && lines[i].trim() != "---" {
            i += 1;
        }
        i += 1;

        let mut input_lines = Vec::new();
        while i < lines.len() && lines[i].trim() != "---" {
            input_lines.push(lines[i]);
            i += 1;
        }
        i += 1;

        let mut expected = Vec::new();
        while i < lines.len() && lines[i].trim() != "===" {
            let entry = lines[i].trim();
            if !entry.is_empty() && entry != "ok" {
                expected.push(entry.to_string());
            }
            i += 1;
        }
        i += 1;

        cases.push(FragmentTestCase {
            name,
            line_number: start_line,
            input: input_lines.join("\n"),
            expected,
        });
    }

    cases
}

/// Run one case with the default configuration.
pub fn run_fragment_test(case: &FragmentTestCase) -> CaseOutcome {
    let fragments = parse_blocks(&case.input, &case.name);
    if fragments.is_empty() {
        return CaseOutcome::Broken {
            reason: "no meta blocks in input".to_string(),
        };
    }

    let checked = check_fragments(&fragments, &CheckConfig::default());
    let actual: Vec<String> = checked
        .report
        .iter()
        .map(|issue| format!("{}: {}", issue.record, issue.kind))
        .collect();

    if actual == case.expected {
        CaseOutcome::Pass
    } else {
        CaseOutcome::Mismatch {
            expected: case.expected.clone(),
            actual,
        }
    }
}

/// Run every case and summarize.
pub fn run_fragment_tests(cases: &[FragmentTestCase]) -> CaseSummary {
    let mut summary = CaseSummary::new();
    for case in cases {
        summary.record(&case.name, case.line_number, run_fragment_test(case));
    }
    summary
}

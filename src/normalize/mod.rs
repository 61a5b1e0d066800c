//! Result normalization.
//!
//! Turns the raw text captured from a check into a [`CheckResult`]:
//!
//! 1. stdout and stderr are split into trimmed, non-blank lines; duplicate
//!    stdout lines are dropped (first occurrence wins)
//! 2. a timed-out check gets [`TIMEOUT_MESSAGE`] appended to stderr
//! 3. the check's post-processor, if any, rewrites stdout
//!
//! `new` is left empty; novelty is computed against the cache later.

pub mod outdated;
pub mod registry;
pub mod result;
pub mod version;

pub use outdated::OutdatedTable;
pub use registry::{PostProcessor, PostProcessorRegistry, Processed};
pub use result::{CheckResult, TIMEOUT_MESSAGE};
pub use version::{is_outdated, Version};

use std::collections::HashSet;
use tracing::Span;

use crate::checks::CheckDefinition;
use crate::shell::{RawOutput, TIMEOUT_STATUS};

/// Converts raw check output into results.
pub struct Normalizer {
    registry: PostProcessorRegistry,
    span: Span,
}

impl Normalizer {
    /// Create a normalizer using the given post-processors.
    pub fn new(registry: PostProcessorRegistry) -> Self {
        Self {
            registry,
            span: Span::none(),
        }
    }

    /// Attach the span that normalizer events are recorded in.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// The post-processor registry.
    pub fn registry(&self) -> &PostProcessorRegistry {
        &self.registry
    }

    /// Normalize one check's output. `kind` is the check's declared kind.
    pub fn normalize(
        &self,
        description: &str,
        stdout: &str,
        stderr: &str,
        status: i32,
        kind: Option<&str>,
    ) -> CheckResult {
        let _enter = self.span.enter();

        let mut stdout = dedupe(split_lines(stdout));
        let mut stderr = split_lines(stderr);

        if status == TIMEOUT_STATUS {
            stderr.push(TIMEOUT_MESSAGE.to_string());
        }

        let mut header = None;
        if !stdout.is_empty() {
            if let Some(processor) = self.registry.resolve(kind, description) {
                tracing::debug!("post-processing '{}' as {}", description, processor.kind());
                let processed = processor.process(stdout);
                header = processed.header;
                stdout = processed.stdout;
            }
        }

        CheckResult {
            description: description.to_string(),
            header,
            stdout,
            stderr,
            status,
            new: Default::default(),
        }
    }

    /// Normalize the outputs of a batch, pairing each with its check.
    pub fn normalize_all(
        &self,
        checks: &[CheckDefinition],
        outputs: Vec<RawOutput>,
    ) -> Vec<CheckResult> {
        checks
            .iter()
            .zip(outputs)
            .map(|(check, raw)| {
                self.normalize(
                    &raw.description,
                    &raw.stdout,
                    &raw.stderr,
                    raw.status,
                    check.kind.as_deref(),
                )
            })
            .collect()
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(PostProcessorRegistry::with_builtins())
    }
}

/// Split text into trimmed lines, dropping blank ones.
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

fn dedupe(lines: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    lines
        .into_iter()
        .filter(|line| seen.insert(line.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalize(stdout: &str, stderr: &str, status: i32) -> CheckResult {
        Normalizer::default().normalize("generic packages", stdout, stderr, status, None)
    }

    #[test]
    fn empty_output() {
        assert_eq!(normalize("", "", 0), CheckResult::new("generic packages"));
    }

    #[test]
    fn whitespace_only_output_is_empty() {
        assert_eq!(
            normalize(" \n \t \t\n \n  ", "   ", 0),
            CheckResult::new("generic packages")
        );
    }

    #[test]
    fn lines_are_trimmed_and_blank_lines_dropped() {
        let result = normalize("", "\tline one\nline two\nline three\n\n", 1);

        assert_eq!(result.stderr, vec!["line one", "line two", "line three"]);
        assert_eq!(result.status, 1);
        assert!(result.stdout.is_empty());
    }

    #[test]
    fn stdout_is_deduplicated_in_order() {
        let result = normalize("b\na\nb\nc\na\n", "", 0);
        assert_eq!(result.stdout, vec!["b", "a", "c"]);
    }

    #[test]
    fn stderr_keeps_duplicates() {
        let result = normalize("", "warn\nwarn\n", 0);
        assert_eq!(result.stderr, vec!["warn", "warn"]);
    }

    #[test]
    fn timeout_appends_sentinel_once() {
        let result = normalize("output\n", "\tline one\nline two\n\n", 124);

        assert_eq!(result.stdout, vec!["output"]);
        assert_eq!(
            result.stderr,
            vec!["line one", "line two", "ERROR: command timed out"]
        );
        assert_eq!(
            result
                .stderr
                .iter()
                .filter(|l| *l == TIMEOUT_MESSAGE)
                .count(),
            1
        );
    }

    #[test]
    fn new_is_always_empty() {
        let result = normalize("pkgA\npkgB\n", "", 0);
        assert!(result.new.is_empty());
    }

    #[test]
    fn outdated_kind_hoists_header_and_filters_rows() {
        let stdout = "Package  Current  Wanted  Latest  Location\n\
                      npm        3.7.5   3.8.0   3.8.0\n\
                      jshint     2.9.1   2.9.1   2.9.1\n";

        let result = Normalizer::default().normalize(
            "JavaScript tools",
            stdout,
            "",
            0,
            Some(OutdatedTable::KIND),
        );

        assert_eq!(
            result.header.as_deref(),
            Some("Package  Current  Wanted  Latest  Location")
        );
        assert_eq!(result.stdout, vec!["npm        3.7.5   3.8.0   3.8.0"]);
    }

    #[test]
    fn node_description_selects_outdated_table() {
        let stdout = "Package  Current  Wanted  Latest\nyo  1.6.0  1.7.0  1.7.0\n";

        let result = Normalizer::default().normalize("Node.js modules", stdout, "", 0, None);

        assert!(result.header.is_some());
        assert_eq!(result.stdout, vec!["yo  1.6.0  1.7.0  1.7.0"]);
    }

    #[test]
    fn other_checks_are_not_post_processed() {
        let result = normalize("Package  Current\nfoo 1 2\n", "", 0);

        assert!(result.header.is_none());
        assert_eq!(result.stdout.len(), 2);
    }

    #[test]
    fn normalize_all_uses_check_kinds() {
        let checks = vec![
            CheckDefinition::new("plain", "echo"),
            CheckDefinition::new("table", "echo").with_kind(OutdatedTable::KIND),
        ];
        let outputs = vec![
            RawOutput {
                description: "plain".into(),
                stdout: "Package Current Wanted Latest\n".into(),
                stderr: String::new(),
                status: 0,
            },
            RawOutput {
                description: "table".into(),
                stdout: "Package Current Wanted Latest\n".into(),
                stderr: String::new(),
                status: 0,
            },
        ];

        let results = Normalizer::default().normalize_all(&checks, outputs);

        assert_eq!(results[0].stdout.len(), 1);
        assert!(results[0].header.is_none());
        assert!(results[1].stdout.is_empty());
        assert!(results[1].header.is_some());
    }
}

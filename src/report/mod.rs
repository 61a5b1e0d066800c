//! Terminal reporting of check results.

pub mod theme;

pub use theme::{should_use_colors, ReportTheme};

use std::io::{self, Write};

use crate::normalize::CheckResult;

/// Writes check results for humans.
#[derive(Debug, Clone, Default)]
pub struct Reporter {
    theme: ReportTheme,
}

impl Reporter {
    /// Create a reporter with the given theme.
    pub fn new(theme: ReportTheme) -> Self {
        Self { theme }
    }

    /// The reporter's theme.
    pub fn theme(&self) -> &ReportTheme {
        &self.theme
    }

    /// Show every available update, with errors, grouped by check.
    ///
    /// Returns the number of update lines shown.
    pub fn show_all(&self, out: &mut dyn Write, results: &[CheckResult]) -> io::Result<usize> {
        let mut count = 0;

        for result in results.iter().filter(|r| r.has_output()) {
            writeln!(
                out,
                "{}",
                self.theme
                    .format_title(&format!("Checking {}...", result.description))
            )?;

            for line in &result.stderr {
                writeln!(out, "{}", self.theme.format_error(line))?;
            }

            if !result.stdout.is_empty() {
                if let Some(header) = &result.header {
                    writeln!(out, "{}", self.theme.format_header(header))?;
                }
                for line in &result.stdout {
                    writeln!(out, "{}", self.theme.format_info(line))?;
                    count += 1;
                }
            }

            writeln!(out)?;
        }

        Ok(count)
    }

    /// Show the update lists, marking new items with `+`, but only when
    /// something is new.
    ///
    /// Returns the number of new items.
    pub fn show_new(&self, out: &mut dyn Write, results: &[CheckResult]) -> io::Result<usize> {
        let new: usize = results.iter().map(|r| r.new.len()).sum();
        if new == 0 {
            return Ok(0);
        }

        for result in results.iter().filter(|r| !r.stdout.is_empty()) {
            writeln!(
                out,
                "{}",
                self.theme
                    .format_title(&format!(" Checking {}...", result.description))
            )?;

            if let Some(header) = &result.header {
                writeln!(out, "{}", self.theme.format_header(&format!(" {header}")))?;
            }

            for line in &result.stdout {
                let marker = if result.is_new(line) { '+' } else { ' ' };
                writeln!(out, "{}", self.theme.format_info(&format!("{marker}{line}")))?;
            }

            writeln!(out, " ")?;
        }

        Ok(new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(description: &str, stdout: &[&str], new: &[&str]) -> CheckResult {
        CheckResult {
            stdout: stdout.iter().map(|s| s.to_string()).collect(),
            new: new.iter().map(|s| s.to_string()).collect(),
            ..CheckResult::new(description)
        }
    }

    fn render(f: impl FnOnce(&Reporter, &mut Vec<u8>) -> io::Result<usize>) -> (String, usize) {
        let reporter = Reporter::new(ReportTheme::plain());
        let mut out = Vec::new();
        let count = f(&reporter, &mut out).unwrap();
        (String::from_utf8(out).unwrap(), count)
    }

    #[test]
    fn show_all_lists_every_item() {
        let results = vec![
            result("system packages", &["pkgA", "pkgB"], &[]),
            result("quiet", &[], &[]),
        ];

        let (text, count) = render(|r, out| r.show_all(out, &results));

        assert_eq!(text, "Checking system packages...\npkgA\npkgB\n\n");
        assert_eq!(count, 2);
    }

    #[test]
    fn show_all_prints_errors_before_items() {
        let results = vec![CheckResult {
            stderr: vec!["boom".to_string()],
            status: 1,
            header: Some("Package Current".to_string()),
            ..CheckResult::new("broken")
        }];

        let (text, count) = render(|r, out| r.show_all(out, &results));

        assert_eq!(text, "Checking broken...\nboom\n\n");
        assert_eq!(count, 0);
    }

    #[test]
    fn show_all_includes_header() {
        let results = vec![CheckResult {
            header: Some("Package  Current  Wanted  Latest".to_string()),
            ..result("Node.js modules", &["npm 3.7.5 3.8.0 3.8.0"], &[])
        }];

        let (text, _) = render(|r, out| r.show_all(out, &results));

        assert_eq!(
            text,
            "Checking Node.js modules...\nPackage  Current  Wanted  Latest\nnpm 3.7.5 3.8.0 3.8.0\n\n"
        );
    }

    #[test]
    fn show_new_is_silent_without_new_items() {
        let results = vec![result("a", &["pkgA"], &[])];

        let (text, count) = render(|r, out| r.show_new(out, &results));

        assert!(text.is_empty());
        assert_eq!(count, 0);
    }

    #[test]
    fn show_new_marks_new_items() {
        let results = vec![
            result("first", &["pkgA", "pkgB"], &["pkgB"]),
            result("second", &["pkgC"], &[]),
            result("empty", &[], &[]),
        ];

        let (text, count) = render(|r, out| r.show_new(out, &results));

        assert_eq!(
            text,
            " Checking first...\n pkgA\n+pkgB\n \n Checking second...\n pkgC\n \n"
        );
        assert_eq!(count, 1);
    }

    #[test]
    fn show_new_indents_header() {
        let results = vec![CheckResult {
            header: Some("Package Current".to_string()),
            ..result("table", &["npm 1 2 2"], &["npm 1 2 2"])
        }];

        let (text, _) = render(|r, out| r.show_new(out, &results));

        assert_eq!(text, " Checking table...\n Package Current\n+npm 1 2 2\n \n");
    }

    #[test]
    fn plain_output_strips_colors() {
        let results = vec![result("a", &["\x1b[0G\x1b[33mpkgA\x1b[39m"], &[])];

        let (text, _) = render(|r, out| r.show_all(out, &results));

        assert_eq!(text, "Checking a...\npkgA\n\n");
    }
}

//! Default code-review collaborator
//!
//! Lightweight static checks over raw file contents: readability (long
//! lines, comment density), performance (nested loops), security (hardcoded
//! secrets), and structure (oversized functions). The agent records the raw
//! result verbatim and never interprets individual findings.

use serde_json::{Value, json};
use tracing::debug;

use sessionstore::{SessionError, SessionResult};

use super::CodeReviewer;

/// Lines longer than this are flagged
const MAX_LINE_LEN: usize = 100;
/// Below this comment-to-code ratio, suggest commenting
const MIN_COMMENT_RATIO: f64 = 0.1;
/// Functions longer than this many lines are flagged
const MAX_FUNCTION_LINES: usize = 50;

/// Heuristic single-file reviewer
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicReviewer;

impl HeuristicReviewer {
    fn check_readability(lines: &[&str], issues: &mut Vec<String>, suggestions: &mut Vec<String>) {
        let long_lines: Vec<usize> = lines
            .iter()
            .enumerate()
            .filter(|(_, line)| line.chars().count() > MAX_LINE_LEN)
            .map(|(i, _)| i + 1)
            .collect();
        if !long_lines.is_empty() {
            let shown: Vec<String> = long_lines.iter().take(3).map(|n| n.to_string()).collect();
            issues.push(format!(
                "{} lines exceed {} characters (e.g. lines {})",
                long_lines.len(),
                MAX_LINE_LEN,
                shown.join(", ")
            ));
        }

        if !lines.is_empty() {
            let comment_lines = lines
                .iter()
                .filter(|line| {
                    let trimmed = line.trim_start();
                    trimmed.starts_with('#') || trimmed.starts_with("//")
                })
                .count();
            let ratio = comment_lines as f64 / lines.len() as f64;
            if ratio < MIN_COMMENT_RATIO {
                suggestions.push("Comment density is low; annotate the non-obvious logic".to_string());
            }
        }
    }

    fn check_performance(lines: &[&str], issues: &mut Vec<String>) {
        let mut nested_loops = 0usize;
        let mut loop_depth = 0usize;
        for line in lines {
            let trimmed = line.trim_start();
            if trimmed.starts_with("for ") || trimmed.starts_with("while ") {
                loop_depth += 1;
                if loop_depth > 1 {
                    nested_loops += 1;
                }
            }
            if !line.starts_with(' ') && !line.starts_with('\t') {
                loop_depth = 0;
            }
        }
        if nested_loops > 0 {
            issues.push(format!(
                "{} nested loops found; check the algorithmic complexity",
                nested_loops
            ));
        }
    }

    fn check_security(content: &str, issues: &mut Vec<String>) {
        let lowered = content.to_lowercase();
        if ["password", "secret", "api_key", "apikey"]
            .iter()
            .any(|k| lowered.contains(k))
            && content.contains('=')
        {
            issues.push("Possible hardcoded credential; move sensitive values out of source".to_string());
        }
    }

    fn check_structure(lines: &[&str], suggestions: &mut Vec<String>) {
        let mut function_lengths = Vec::new();
        let mut current = 0usize;
        let mut in_function = false;
        for line in lines {
            let trimmed = line.trim_start();
            let is_def = trimmed.starts_with("fn ")
                || trimmed.starts_with("pub fn ")
                || trimmed.starts_with("def ")
                || trimmed.starts_with("function ");
            if is_def {
                if in_function {
                    function_lengths.push(current);
                }
                in_function = true;
                current = 0;
            } else if in_function {
                current += 1;
            }
        }
        if in_function {
            function_lengths.push(current);
        }

        let long = function_lengths.iter().filter(|&&len| len > MAX_FUNCTION_LINES).count();
        if long > 0 {
            suggestions.push(format!(
                "{} functions exceed {} lines; consider splitting them",
                long, MAX_FUNCTION_LINES
            ));
        }
    }
}

impl CodeReviewer for HeuristicReviewer {
    fn review(&self, file_contents: &str) -> SessionResult<Value> {
        if file_contents.trim().is_empty() {
            return Err(SessionError::InvalidInput("empty file contents".to_string()));
        }

        let lines: Vec<&str> = file_contents.lines().collect();
        let mut issues = Vec::new();
        let mut suggestions = Vec::new();

        Self::check_readability(&lines, &mut issues, &mut suggestions);
        Self::check_performance(&lines, &mut issues);
        Self::check_security(file_contents, &mut issues);
        Self::check_structure(&lines, &mut suggestions);

        debug!(
            issues = issues.len(),
            suggestions = suggestions.len(),
            lines = lines.len(),
            "file reviewed"
        );

        Ok(json!({
            "issues": issues,
            "suggestions": suggestions,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collab::ReviewReport;

    #[test]
    fn test_clean_file_has_no_issues() {
        let content = "\
// A small, well-commented module
// with nothing to complain about.
fn add(a: u32, b: u32) -> u32 {
    a + b
}
";
        let value = HeuristicReviewer.review(content).unwrap();
        let report = ReviewReport::from_value(&value).unwrap();
        assert!(report.issues.is_empty());
    }

    #[test]
    fn test_long_lines_flagged() {
        let content = format!("let x = {};\n", "1 + ".repeat(40));
        let value = HeuristicReviewer.review(&content).unwrap();
        let report = ReviewReport::from_value(&value).unwrap();
        assert!(report.issues.iter().any(|i| i.contains("exceed")));
    }

    #[test]
    fn test_nested_loops_flagged() {
        let content = "\
fn scan() {
    for i in 0..10 {
        for j in 0..10 {
            println!(\"{} {}\", i, j);
        }
    }
}
";
        let value = HeuristicReviewer.review(content).unwrap();
        let report = ReviewReport::from_value(&value).unwrap();
        assert!(report.issues.iter().any(|i| i.contains("nested loops")));
    }

    #[test]
    fn test_hardcoded_secret_flagged() {
        let content = "let password = \"hunter2\";\n";
        let value = HeuristicReviewer.review(content).unwrap();
        let report = ReviewReport::from_value(&value).unwrap();
        assert!(report.issues.iter().any(|i| i.contains("credential")));
    }

    #[test]
    fn test_empty_contents_rejected() {
        let err = HeuristicReviewer.review("\n\n").unwrap_err();
        assert!(matches!(err, SessionError::InvalidInput(_)));
    }
}

//! Console rendering of search reports

use crate::search::{SearchReport, SearchResult, StopReason};
use forestgate_core::Label;
use std::fmt::Write;

/// Decimal places used when printing a found vector
pub const DISPLAY_PLACES: i32 = 4;

/// Human-readable summary of a run
pub fn render_text(report: &SearchReport, positive_label: &Label) -> String {
    let mut out = String::new();

    match &report.result {
        SearchResult::Found(found) => {
            let _ = writeln!(
                out,
                "Found class {} via {} attempt {}",
                positive_label, found.strategy, found.attempt
            );
            let _ = writeln!(out, "{}", format_vector(&found.rounded(DISPLAY_PLACES)));
        }
        SearchResult::Exhausted => {
            out.push_str("No positive example found in search.\n");
        }
        SearchResult::Stopped { reason } => {
            let why = match reason {
                StopReason::Cancelled => "cancelled",
                StopReason::DeadlineExceeded => "deadline exceeded",
            };
            let _ = writeln!(
                out,
                "Search stopped early ({}) after {} classifications.",
                why, report.classifications
            );
        }
    }

    out
}

/// `[0.9123, 0.0, 1.0]`; whole numbers keep one decimal place
pub fn format_vector(values: &[f64]) -> String {
    let parts: Vec<String> = values
        .iter()
        .map(|v| {
            if v.fract() == 0.0 {
                format!("{:.1}", v)
            } else {
                v.to_string()
            }
        })
        .collect();
    format!("[{}]", parts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{FoundExample, StrategyStats};

    fn report(result: SearchResult) -> SearchReport {
        SearchReport {
            result,
            classifications: 12,
            strategies: vec![StrategyStats {
                name: "high".to_string(),
                attempts: 12,
            }],
            elapsed_ms: 1,
        }
    }

    #[test]
    fn test_found_text() {
        let text = render_text(
            &report(SearchResult::Found(FoundExample {
                vector: vec![0.912345, 0.0, 0.10004],
                strategy: "high".to_string(),
                attempt: 12,
            })),
            &Label::Int(1),
        );
        assert_eq!(text, "Found class 1 via high attempt 12\n[0.9123, 0.0, 0.1]\n");
    }

    #[test]
    fn test_exhausted_text() {
        let text = render_text(&report(SearchResult::Exhausted), &Label::Int(1));
        assert_eq!(text, "No positive example found in search.\n");
    }

    #[test]
    fn test_stopped_text() {
        let text = render_text(
            &report(SearchResult::Stopped {
                reason: StopReason::Cancelled,
            }),
            &Label::Int(1),
        );
        assert!(text.contains("cancelled"));
        assert!(text.contains("12 classifications"));
    }
}

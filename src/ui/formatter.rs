//! Pure formatting functions for UI output.
//!
//! Builds the strings the binary prints and writes; no I/O happens here.

use console::style;

use crate::cli::orchestration::{PipelineOutcome, ReleaseAction, ReleaseResult};

/// Format an error message with a red prefix.
pub fn format_error(message: &str) -> String {
    format!("{} {}", style("ERROR:").red(), message)
}

/// Format a success message with a green checkmark.
pub fn format_success(message: &str) -> String {
    format!("{} {}", style("✓").green(), message)
}

/// Format a status message with a yellow arrow.
pub fn format_status(message: &str) -> String {
    format!("{} {}", style("→").yellow(), message)
}

/// One-line summary of a workflow outcome, without styling.
pub fn summarize_outcome(outcome: &PipelineOutcome) -> String {
    match outcome {
        PipelineOutcome::Skipped(reason) => format!("Nothing to release: {}", reason),
        PipelineOutcome::Completed(result) => summarize_result(result),
    }
}

fn summarize_result(result: &ReleaseResult) -> String {
    let from = result
        .previous_version
        .map(|v| format!(" (from {})", v))
        .unwrap_or_default();

    match (result.vetoed, result.action) {
        (true, _) => format!(
            "Release of {}{} suppressed by skip label, increment was {}",
            result.next_tag, from, result.increment
        ),
        (false, ReleaseAction::None) => format!(
            "Computed tag {}{}, increment was {}; nothing published",
            result.next_tag, from, result.increment
        ),
        (false, action) => format!(
            "Published {} {}{}, increment was {}",
            action, result.next_tag, from, result.increment
        ),
    }
}

/// Output variables in `name=value` lines, as CI output files expect.
pub fn format_outputs(result: &ReleaseResult) -> String {
    format!("tag={}\nincrement={}\n", result.next_tag, result.increment)
}

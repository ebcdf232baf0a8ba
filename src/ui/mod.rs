//! User interface module - terminal messages and CI output variables.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - Printing and writing output files

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::cli::orchestration::{PipelineOutcome, ReleaseResult};
use crate::error::Result;

pub mod formatter;

pub use formatter::{format_outputs, summarize_outcome};

pub fn display_error(message: &str) {
    eprintln!("{}", formatter::format_error(message));
}

pub fn display_success(message: &str) {
    println!("{}", formatter::format_success(message));
}

pub fn display_status(message: &str) {
    println!("{}", formatter::format_status(message));
}

/// Print the summary line for a workflow outcome
pub fn display_outcome(outcome: &PipelineOutcome) {
    let summary = summarize_outcome(outcome);
    match outcome {
        PipelineOutcome::Skipped(_) => display_status(&summary),
        PipelineOutcome::Completed(_) => display_success(&summary),
    }
}

/// Append the `tag` and `increment` output variables to `path`.
///
/// The file is created if missing; existing content is kept.
pub fn write_outputs(path: &Path, result: &ReleaseResult) -> Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(format_outputs(result).as_bytes())?;
    Ok(())
}

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod event;
pub mod git;
pub mod guard;
pub mod resolver;
pub mod ui;

pub use error::{ReleaseError, Result};

//! Analysis of pull request labels into a version increment

pub mod label_analyzer;

pub use label_analyzer::extract_increment;

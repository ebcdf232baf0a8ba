//! Host-facing layer: argument resolution and the release workflow

pub mod args;
pub mod orchestration;

pub use args::{Args, Settings};
pub use orchestration::{
    PipelineOutcome, ReleaseAction, ReleaseOptions, ReleaseResult, ReleaseWorkflow,
};

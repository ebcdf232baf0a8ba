//! label-release - cut a release when a labelled pull request is merged

mod exit_codes;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use label_release::cli::{Args, PipelineOutcome, ReleaseWorkflow, Settings};
use label_release::config::Backend;
use label_release::event::FileEventSource;
use label_release::git::github::GitHubConfig;
use label_release::git::{GitHubClient, Git2Repository, RefLister, ReleasePublisher};
use label_release::{ui, ReleaseError};

fn main() {
    init_tracing();

    let settings = match Args::parse().into_settings() {
        Ok(settings) => settings,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(exit_codes::CONFIG_ERROR);
        }
    };

    match run(&settings) {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => {
            ui::display_error(&format!("{:#}", e));
            if e.downcast_ref::<ReleaseError>().is_some_and(ReleaseError::is_remote) {
                ui::display_status("Nothing was retried; re-run once the backend is reachable");
            }
            std::process::exit(exit_codes::ERROR);
        }
    }
}

/// Console logging controlled by RUST_LOG (default: info)
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_filter(filter),
        )
        .init();
}

fn run(settings: &Settings) -> Result<()> {
    let events = FileEventSource::new();

    let outcome = match settings.backend {
        Backend::Github => {
            let client = GitHubClient::new(GitHubConfig {
                api_url: settings.github_api_url.clone(),
                repository: settings.require_repository()?.to_string(),
                token: settings.token.clone(),
            })
            .context("Failed to set up GitHub client")?;
            execute(settings, &events, &client, &client)?
        }
        Backend::Local => {
            let repo = Git2Repository::open(&settings.repo_path).with_context(|| {
                format!("Failed to open repository at {}", settings.repo_path.display())
            })?;
            execute(settings, &events, &repo, &repo)?
        }
    };

    ui::display_outcome(&outcome);

    if let PipelineOutcome::Completed(result) = &outcome {
        if let Some(path) = std::env::var_os("GITHUB_OUTPUT").filter(|p| !p.is_empty()) {
            let path = PathBuf::from(path);
            ui::write_outputs(&path, result)
                .with_context(|| format!("Failed to write outputs to {}", path.display()))?;
        }
    }

    Ok(())
}

fn execute(
    settings: &Settings,
    events: &FileEventSource,
    tags: &dyn RefLister,
    publisher: &dyn ReleasePublisher,
) -> label_release::Result<PipelineOutcome> {
    ReleaseWorkflow::new(events, tags, publisher).run(&settings.options)
}

// tests/local_backend_test.rs
use git2::{Repository, Signature};
use serde_json::json;
use label_release::cli::{PipelineOutcome, ReleaseAction, ReleaseOptions, ReleaseWorkflow};
use label_release::config::ReleaseStrategy;
use label_release::event::FileEventSource;
use label_release::git::{Git2Repository, RefLister};
use std::path::Path;
use tempfile::TempDir;

fn init_repo(dir: &Path) -> (Repository, String) {
    let repo = Repository::init(dir).unwrap();
    let sig = Signature::now("Test", "test@example.com").unwrap();
    let oid = {
        let tree_id = repo.index().unwrap().write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        repo.commit(Some("HEAD"), &sig, &sig, "initial", &tree, &[])
            .unwrap()
    };
    (repo, oid.to_string())
}

fn write_event(dir: &Path, sha: &str, labels: &[&str]) -> std::path::PathBuf {
    let labels: Vec<_> = labels.iter().map(|l| json!({ "name": l })).collect();
    let payload = json!({
        "action": "closed",
        "pull_request": {
            "merged": true,
            "merge_commit_sha": sha,
            "base": { "ref": "main" },
            "labels": labels
        }
    });
    let path = dir.join("event.json");
    std::fs::write(&path, payload.to_string()).unwrap();
    path
}

#[test]
fn test_tag_strategy_creates_next_tag_locally() {
    let dir = TempDir::new().unwrap();
    let (repo, sha) = init_repo(dir.path());
    let head = repo.revparse_single(&sha).unwrap();
    repo.tag_lightweight("v0.3.1", &head, false).unwrap();
    repo.tag_lightweight("snapshot", &head, false).unwrap();

    let event_dir = TempDir::new().unwrap();
    let mut options = ReleaseOptions::new("main", write_event(event_dir.path(), &sha, &["minor"]));
    options.release_strategy = ReleaseStrategy::Tag;

    let backend = Git2Repository::open(dir.path()).unwrap();
    let events = FileEventSource::new();
    let outcome = ReleaseWorkflow::new(&events, &backend, &backend)
        .run(&options)
        .unwrap();

    match outcome {
        PipelineOutcome::Completed(result) => {
            assert_eq!(result.next_tag, "v0.4.0");
            assert_eq!(result.action, ReleaseAction::Tag);
        }
        other => panic!("expected a completed run, got {:?}", other),
    }

    let tag = repo.revparse_single("refs/tags/v0.4.0").unwrap();
    assert_eq!(tag.peel_to_commit().unwrap().id().to_string(), sha);
}

#[test]
fn test_release_strategy_creates_annotated_tag() {
    let dir = TempDir::new().unwrap();
    let (repo, sha) = init_repo(dir.path());

    let event_dir = TempDir::new().unwrap();
    let options = ReleaseOptions::new("main", write_event(event_dir.path(), &sha, &["major"]));

    let backend = Git2Repository::open(dir.path()).unwrap();
    let events = FileEventSource::new();
    ReleaseWorkflow::new(&events, &backend, &backend)
        .run(&options)
        .unwrap();

    let object = repo.revparse_single("refs/tags/v1.0.0").unwrap();
    let tag = object.as_tag().expect("annotated tag");
    assert_eq!(tag.message(), Some("Release v1.0.0"));
}

#[test]
fn test_second_run_fails_on_existing_tag() {
    let dir = TempDir::new().unwrap();
    let (_repo, sha) = init_repo(dir.path());

    let event_dir = TempDir::new().unwrap();
    let mut options = ReleaseOptions::new("main", write_event(event_dir.path(), &sha, &["patch"]));
    options.release_strategy = ReleaseStrategy::Tag;
    options.next_tag = Some("v0.0.1".to_string());

    let backend = Git2Repository::open(dir.path()).unwrap();
    let events = FileEventSource::new();
    let workflow = ReleaseWorkflow::new(&events, &backend, &backend);

    workflow.run(&options).unwrap();
    assert!(workflow.run(&options).is_err());
    assert_eq!(backend.list_tags().unwrap(), Some(vec!["refs/tags/v0.0.1".to_string()]));
}

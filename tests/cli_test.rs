// tests/cli_test.rs
use git2::{Repository, Signature};
use serde_json::json;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const HOST_VARS: &[&str] = &[
    "INPUT_RELEASE_BRANCH",
    "INPUT_RELEASE_STRATEGY",
    "INPUT_TAG_FORMAT",
    "INPUT_VERSION_RANGE",
    "INPUT_NEXT_TAG",
    "INPUT_CUSTOM_RELEASE_SHA",
    "INPUT_GITHUB_API_URL",
    "INPUT_SKIP_LABELS",
    "INPUT_NO_LABEL_POLICY",
    "INPUT_BACKEND",
    "GITHUB_SHA",
    "GITHUB_EVENT_PATH",
    "GITHUB_REPOSITORY",
    "GITHUB_TOKEN",
    "GITHUB_OUTPUT",
];

/// Run the binary from `workdir` with a clean host environment
fn label_release(workdir: &Path, args: &[&str], env: &[(&str, &Path)]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_label-release"));
    for var in HOST_VARS {
        cmd.env_remove(var);
    }
    cmd.env("HOME", workdir)
        .env("XDG_CONFIG_HOME", workdir)
        .current_dir(workdir)
        .args(args);
    for (key, value) in env {
        cmd.env(key, value);
    }
    cmd.output().expect("Failed to execute label-release")
}

fn write_event(dir: &Path, base: &str, sha: &str, label: &str) -> std::path::PathBuf {
    let payload = json!({
        "action": "closed",
        "pull_request": {
            "merged": true,
            "merge_commit_sha": sha,
            "base": { "ref": base },
            "labels": [{ "name": label }]
        }
    });
    let path = dir.join("event.json");
    std::fs::write(&path, payload.to_string()).unwrap();
    path
}

#[test]
fn test_help() {
    let dir = TempDir::new().unwrap();
    let output = label_release(dir.path(), &["--help"], &[]);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("label-release"));
    assert!(stdout.contains("--release-branch"));
}

#[test]
fn test_base_mismatch_exits_successfully() {
    let dir = TempDir::new().unwrap();
    let event = write_event(dir.path(), "develop", "abc123", "patch");

    let output = label_release(
        dir.path(),
        &[
            "--release-branch",
            "main",
            "--repository",
            "octo/widgets",
            "--event-path",
            event.to_str().unwrap(),
        ],
        &[],
    );

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("base ref does not match release branch"));
}

#[test]
fn test_local_release_writes_outputs() {
    let dir = TempDir::new().unwrap();
    let repo = Repository::init(dir.path()).unwrap();
    let sig = Signature::now("Test", "test@example.com").unwrap();
    let sha = {
        let tree_id = repo.index().unwrap().write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        repo.commit(Some("HEAD"), &sig, &sig, "initial", &tree, &[])
            .unwrap()
            .to_string()
    };

    let events = TempDir::new().unwrap();
    let event = write_event(events.path(), "main", &sha, "minor");
    let outputs = events.path().join("github_output");

    let output = label_release(
        dir.path(),
        &["--backend", "local", "--release-strategy", "tag"],
        &[
            ("GITHUB_EVENT_PATH", event.as_path()),
            ("INPUT_RELEASE_BRANCH", Path::new("main")),
            ("GITHUB_OUTPUT", outputs.as_path()),
        ],
    );

    assert_eq!(output.status.code(), Some(0), "{:?}", output);
    assert_eq!(
        std::fs::read_to_string(&outputs).unwrap(),
        "tag=v0.1.0\nincrement=minor\n"
    );
    assert!(repo.revparse_single("refs/tags/v0.1.0").is_ok());
}

#[test]
fn test_invalid_strategy_is_a_config_error() {
    let dir = TempDir::new().unwrap();
    let output = label_release(dir.path(), &["--release-strategy", "publish"], &[]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_missing_release_branch_fails() {
    let dir = TempDir::new().unwrap();
    let event = write_event(dir.path(), "main", "abc123", "patch");

    let output = label_release(
        dir.path(),
        &["--repository", "octo/widgets", "--event-path", event.to_str().unwrap()],
        &[],
    );
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_unreachable_backend_reports_no_retry() {
    let dir = TempDir::new().unwrap();
    let event = write_event(dir.path(), "main", "abc123", "patch");

    let output = label_release(
        dir.path(),
        &[
            "--release-branch",
            "main",
            "--repository",
            "octo/widgets",
            "--github-api-url",
            "http://127.0.0.1:9",
            "--event-path",
            event.to_str().unwrap(),
        ],
        &[],
    );

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Listing tags failed"));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Nothing was retried"));
}

#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command as ProcessCommand;
use tempfile::TempDir;

fn git(path: &Path, args: &[&str]) {
    let output = ProcessCommand::new("git")
        .arg("-C")
        .arg(path)
        .args(args)
        .env("GIT_AUTHOR_NAME", "Ada")
        .env("GIT_AUTHOR_EMAIL", "ada@example.com")
        .env("GIT_COMMITTER_NAME", "Ada")
        .env("GIT_COMMITTER_EMAIL", "ada@example.com")
        .output()
        .expect("git should run");
    assert!(
        output.status.success(),
        "git {:?} should succeed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
}

fn init_git_repo(path: &Path) {
    git(path, &["init", "--quiet"]);
    git(path, &["symbolic-ref", "HEAD", "refs/heads/main"]);
}

fn commit(path: &Path, file: &str, message: &str) {
    fs::write(path.join(file), message).expect("fixture file should write");
    git(path, &["add", "."]);
    git(path, &["commit", "--quiet", "-m", message]);
}

/// A small repository with a CI workflow, a feature branch and mixed commits.
fn sample_repo() -> TempDir {
    let repo = TempDir::new().expect("temp dir should be created");
    init_git_repo(repo.path());
    fs::create_dir_all(repo.path().join(".github/workflows")).expect("workflow dir should create");
    fs::write(repo.path().join(".github/workflows/ci.yml"), "on: [push]")
        .expect("workflow should write");
    commit(repo.path(), "a.txt", "feat: add x");
    commit(repo.path(), "b.txt", "fix: bug");
    git(repo.path(), &["checkout", "--quiet", "-b", "feature/<b>bold</b>"]);
    commit(repo.path(), "c.txt", "hotfix: urgent");
    git(repo.path(), &["checkout", "--quiet", "main"]);
    commit(repo.path(), "d.txt", "merge branch");
    commit(repo.path(), "e.txt", "random note");
    repo
}

fn trunkcheck() -> Command {
    Command::cargo_bin("trunkcheck").expect("binary should compile")
}

#[test]
fn analyze_local_repo_writes_json_report() {
    let repo = sample_repo();
    let out = TempDir::new().expect("output dir should be created");
    let report_path = out.path().join("report.json");

    trunkcheck()
        .arg(repo.path())
        .arg("--format")
        .arg("json")
        .arg("--output")
        .arg(&report_path)
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Report saved to"))
        .stdout(predicate::str::contains("CI/CD Score: 20/100"));

    let rendered = fs::read_to_string(&report_path).expect("report should exist");
    let value: serde_json::Value = serde_json::from_str(&rendered).expect("report should be json");
    assert_eq!(value["main_branch"], "main");
    assert_eq!(value["total_commits"], 4);
    assert_eq!(value["total_branches"], 2);
    assert_eq!(value["ci_cd_score"], 20.0);
    assert_eq!(value["ci_indicators"][0], ".github/workflows/ci.yml");

    let recommendations = value["recommendations"]
        .as_array()
        .expect("recommendations should be an array");
    let last: Vec<_> = recommendations
        .iter()
        .rev()
        .take(3)
        .filter_map(|rec| rec.as_str())
        .collect();
    assert!(last.iter().any(|rec| rec.contains("pair programming")));
    assert!(last.iter().any(|rec| rec.contains("code review frequency")));
    assert!(last.iter().any(|rec| rec.contains("development metrics")));

    let feature = value["branch_info"]
        .as_array()
        .expect("branch_info should be an array")
        .iter()
        .find(|branch| branch["name"] == "feature/<b>bold</b>")
        .expect("feature branch should be reported");
    assert_eq!(feature["commit_count"], 1);
    assert_eq!(feature["is_main"], false);
}

#[test]
fn analyze_local_repo_writes_escaped_html_report() {
    let repo = sample_repo();
    let out = TempDir::new().expect("output dir should be created");
    let report_path = out.path().join("report.html");

    trunkcheck()
        .arg(repo.path())
        .arg("-o")
        .arg(&report_path)
        .arg("-s")
        .assert()
        .code(0)
        .stdout(predicate::str::contains("suggestions:"));

    let html = fs::read_to_string(&report_path).expect("report should exist");
    assert!(html.contains("Repository Analysis Report"));
    assert!(html.contains("feature/&lt;b&gt;bold&lt;/b&gt;"));
    assert!(!html.contains("<b>bold</b>"));
    assert!(html.contains("Implementation Guide"));
}

fn is_empty_dir(path: &Path) -> bool {
    fs::read_dir(path)
        .expect("dir should be readable")
        .next()
        .is_none()
}

#[test]
fn clones_file_url_and_cleans_up() {
    let repo = sample_repo();
    let tmp = TempDir::new().expect("scratch tmp dir should be created");
    let out = TempDir::new().expect("output dir should be created");
    let report_path = out.path().join("report.json");
    let url = format!("file://{}", repo.path().display());

    trunkcheck()
        .env("TMPDIR", tmp.path())
        .current_dir(out.path())
        .arg(&url)
        .args(["-f", "json", "-o"])
        .arg(&report_path)
        .assert()
        .code(0);

    let rendered = fs::read_to_string(&report_path).expect("report should exist");
    let value: serde_json::Value = serde_json::from_str(&rendered).expect("report should be json");
    assert_eq!(value["repository_url"], url.as_str());
    assert_eq!(value["total_commits"], 4);
    assert!(is_empty_dir(tmp.path()), "temporary clone should be removed");
}

#[test]
fn failure_after_clone_still_removes_temporary_directory() {
    let repo = sample_repo();
    let tmp = TempDir::new().expect("scratch tmp dir should be created");
    let out = TempDir::new().expect("output dir should be created");
    fs::write(out.path().join("blocker"), "not a directory").expect("blocker should write");
    let url = format!("file://{}", repo.path().display());

    trunkcheck()
        .env("TMPDIR", tmp.path())
        .current_dir(out.path())
        .arg(&url)
        .arg("-o")
        .arg(out.path().join("blocker/report.html"))
        .assert()
        .code(2);

    assert!(is_empty_dir(tmp.path()), "temporary clone should be removed");
}

#[test]
fn cloned_repository_cannot_configure_its_own_scoring() {
    let outside = TempDir::new().expect("outside dir should be created");
    fs::write(outside.path().join("id_rsa"), "secret").expect("secret should write");

    let repo = sample_repo();
    let escape = outside.path().display().to_string();
    fs::write(
        repo.path().join("trunkcheck.toml"),
        format!(
            "[ci]\nextra_indicators = [{0:?}, {0:?}, {0:?}, {0:?}, {0:?}]\n\n[report]\nmax_branches = 0\n",
            escape
        ),
    )
    .expect("config should write");
    commit(repo.path(), "f.txt", "chore: add config");

    let cwd = TempDir::new().expect("working dir should be created");
    let report_path = cwd.path().join("report.json");
    let url = format!("file://{}", repo.path().display());

    trunkcheck()
        .current_dir(cwd.path())
        .arg(&url)
        .args(["-f", "json", "-o"])
        .arg(&report_path)
        .assert()
        .code(0)
        .stdout(predicate::str::contains("CI/CD Score: 20/100"));

    let rendered = fs::read_to_string(&report_path).expect("report should exist");
    assert!(!rendered.contains("id_rsa"));
}

#[test]
fn unreachable_clone_url_exits_with_code_1() {
    let tmp = TempDir::new().expect("scratch tmp dir should be created");
    let out = TempDir::new().expect("output dir should be created");
    trunkcheck()
        .env("TMPDIR", tmp.path())
        .arg("file:///definitely/not/a/repo.git")
        .arg("-o")
        .arg(out.path().join("report.html"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("version control unavailable"));
    assert!(!out.path().join("report.html").exists());
    assert!(is_empty_dir(tmp.path()));
}

#[test]
fn plain_directory_is_not_a_git_repository() {
    let dir = TempDir::new().expect("temp dir should be created");
    trunkcheck()
        .arg(dir.path())
        .arg("-o")
        .arg(dir.path().join("report.html"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not a git repository"));
}

#[test]
fn empty_repository_produces_zeroed_report() {
    let repo = TempDir::new().expect("temp dir should be created");
    init_git_repo(repo.path());
    let report_path = repo.path().join("out/report.json");

    trunkcheck()
        .arg(repo.path())
        .args(["-f", "json", "-o"])
        .arg(&report_path)
        .assert()
        .code(0);

    let rendered = fs::read_to_string(&report_path).expect("report should exist");
    let value: serde_json::Value = serde_json::from_str(&rendered).expect("report should be json");
    assert_eq!(value["total_commits"], 0);
    assert_eq!(value["merge_frequency"], 0.0);
    assert_eq!(value["hotfix_frequency"], 0.0);
    assert_eq!(
        value["commit_patterns"]
            .as_array()
            .expect("patterns should be an array")
            .len(),
        0
    );
}

#[test]
fn invalid_working_directory_config_is_a_runtime_failure() {
    let repo = sample_repo();
    let cwd = TempDir::new().expect("working dir should be created");
    fs::write(
        cwd.path().join("trunkcheck.toml"),
        r#"
[report]
max_branches = 0
"#,
    )
    .expect("config should write");

    trunkcheck()
        .current_dir(cwd.path())
        .arg(repo.path())
        .arg("-o")
        .arg(cwd.path().join("report.html"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("config parse error"));
    assert!(!cwd.path().join("report.html").exists());
}

#[test]
fn indicator_outside_the_repository_is_rejected() {
    let repo = sample_repo();
    let cwd = TempDir::new().expect("working dir should be created");
    fs::write(
        cwd.path().join("trunkcheck.toml"),
        r#"
[ci]
extra_indicators = ["../outside"]
"#,
    )
    .expect("config should write");

    trunkcheck()
        .current_dir(cwd.path())
        .arg(repo.path())
        .arg("-o")
        .arg(cwd.path().join("report.html"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("must be a path inside the repository"));
}

#[test]
fn working_directory_config_extra_indicator_raises_ci_score() {
    let repo = sample_repo();
    fs::write(repo.path().join("bitbucket-pipelines.yml"), "pipelines: {}")
        .expect("pipeline should write");
    fs::write(
        repo.path().join("trunkcheck.toml"),
        r#"
[ci]
extra_indicators = ["bitbucket-pipelines.yml", "./bitbucket-pipelines.yml"]
"#,
    )
    .expect("config should write");

    trunkcheck()
        .current_dir(repo.path())
        .arg(repo.path())
        .arg("-o")
        .arg(repo.path().join("report.html"))
        .assert()
        .code(0)
        .stdout(predicate::str::contains("CI/CD Score: 40/100"));
}

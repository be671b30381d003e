use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

/// Throwaway git repository on `main` with a fixed identity.
pub struct TestRepo {
    dir: TempDir,
    counter: std::cell::Cell<usize>,
}

impl TestRepo {
    pub fn new() -> Self {
        let repo = Self {
            dir: TempDir::new().expect("temp dir should be created"),
            counter: std::cell::Cell::new(0),
        };
        repo.git(&["init", "--quiet"]);
        repo.git(&["symbolic-ref", "HEAD", "refs/heads/main"]);
        repo
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn git(&self, args: &[&str]) -> String {
        self.git_as("Test Author", "test@example.com", args)
    }

    pub fn git_as(&self, name: &str, email: &str, args: &[&str]) -> String {
        let output = Command::new("git")
            .arg("-C")
            .arg(self.path())
            .args(args)
            .env("GIT_AUTHOR_NAME", name)
            .env("GIT_AUTHOR_EMAIL", email)
            .env("GIT_COMMITTER_NAME", name)
            .env("GIT_COMMITTER_EMAIL", email)
            .output()
            .expect("git should run");
        assert!(
            output.status.success(),
            "git {:?} should succeed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    pub fn commit(&self, message: &str) {
        self.commit_as("Test Author", "test@example.com", message);
    }

    pub fn commit_as(&self, name: &str, email: &str, message: &str) {
        let n = self.counter.get() + 1;
        self.counter.set(n);
        fs::write(self.path().join(format!("file_{n}.txt")), message)
            .expect("fixture file should write");
        self.git_as(name, email, &["add", "."]);
        self.git_as(name, email, &["commit", "--quiet", "-m", message]);
    }
}

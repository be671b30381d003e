use crate::error::{Result, TrunkcheckError};
use std::ffi::OsStr;
use std::io::ErrorKind;
use std::path::Path;
use std::process::{Command, Output};
use tracing::{debug, warn};

/// Field separator used in `--format` strings so names containing `|` survive.
pub const FIELD_SEP: char = '\u{1f}';

/// Runs `git -C <root> ...` against one repository.
#[derive(Debug, Clone, Copy)]
pub struct Git<'a> {
    root: &'a Path,
}

impl<'a> Git<'a> {
    pub fn new(root: &'a Path) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        self.root
    }

    /// Runs a command that must succeed.
    pub fn run(&self, args: &[&str]) -> Result<String> {
        let output = spawn(self.root, args)?;
        if !output.status.success() {
            return Err(TrunkcheckError::GitCommand {
                command: args.join(" "),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Best-effort query: failures are logged and yield an empty string.
    pub fn query(&self, args: &[&str]) -> String {
        match self.run(args) {
            Ok(stdout) => stdout,
            Err(e) => {
                warn!(error = %e, "git query failed");
                String::new()
            }
        }
    }

    /// True when `git` exits successfully; output is discarded.
    pub fn succeeds(&self, args: &[&str]) -> bool {
        spawn(self.root, args)
            .map(|output| output.status.success())
            .unwrap_or(false)
    }

    pub fn ensure_repository(&self) -> Result<()> {
        let output = spawn(self.root, &["rev-parse", "--git-dir"])?;
        if output.status.success() {
            Ok(())
        } else {
            Err(TrunkcheckError::NotGitRepo(self.root.display().to_string()))
        }
    }
}

/// Runs git outside any repository, e.g. for `clone`.
pub fn run_detached(args: &[&OsStr]) -> Result<()> {
    let mut command = Command::new("git");
    command.args(args);
    let rendered = args
        .iter()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(" ");
    debug!(command = %rendered, "running git");
    let output = command.output().map_err(spawn_error)?;
    if !output.status.success() {
        return Err(TrunkcheckError::GitCommand {
            command: rendered,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(())
}

fn spawn(root: &Path, args: &[&str]) -> Result<Output> {
    debug!(command = %args.join(" "), "running git");
    Command::new("git")
        .arg("-C")
        .arg(root)
        .args(args)
        .output()
        .map_err(spawn_error)
}

fn spawn_error(e: std::io::Error) -> TrunkcheckError {
    if e.kind() == ErrorKind::NotFound {
        TrunkcheckError::VcsUnavailable("git executable not found on PATH".to_string())
    } else {
        TrunkcheckError::Io(e)
    }
}

/// Splits a line produced with [`FIELD_SEP`]-separated format fields.
pub fn fields(line: &str) -> Vec<&str> {
    line.split(FIELD_SEP).collect()
}

/// Non-empty lines of git output.
pub fn lines(output: &str) -> impl Iterator<Item = &str> {
    output.lines().map(str::trim_end).filter(|line| !line.is_empty())
}

use super::git::run_detached;
use crate::error::{Result, TrunkcheckError};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;
use tracing::info;

const CLONE_PREFIX: &str = "repo_analysis_";

/// Clone directories that are currently alive, for the interrupt handler.
static ACTIVE_CLONES: Mutex<Vec<PathBuf>> = Mutex::new(Vec::new());

/// A temporary clone directory that is listed in `ACTIVE_CLONES` while it
/// exists.
#[derive(Debug)]
struct CloneDir(TempDir);

impl CloneDir {
    fn create_in(parent: &Path) -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix(CLONE_PREFIX)
            .tempdir_in(parent)?;
        if let Ok(mut active) = ACTIVE_CLONES.lock() {
            active.push(dir.path().to_path_buf());
        }
        Ok(Self(dir))
    }

    fn path(&self) -> &Path {
        self.0.path()
    }
}

impl Drop for CloneDir {
    fn drop(&mut self) {
        if let Ok(mut active) = ACTIVE_CLONES.lock() {
            active.retain(|path| path != self.0.path());
        }
    }
}

/// Deletes every live clone directory. Returns how many were removed.
pub fn remove_active_clones() -> usize {
    remove_active_clones_where(|_| true)
}

fn remove_active_clones_where(select: impl Fn(&Path) -> bool) -> usize {
    let Ok(mut active) = ACTIVE_CLONES.lock() else {
        return 0;
    };
    let mut removed = 0;
    active.retain(|path| {
        if !select(path) {
            return true;
        }
        if std::fs::remove_dir_all(path).is_ok() {
            removed += 1;
        }
        false
    });
    removed
}

/// Where the analysis reads from: a local checkout or a temporary clone.
///
/// The temporary directory of a clone is removed when the workspace is
/// dropped, or by `remove_active_clones` if the process is interrupted.
#[derive(Debug)]
pub struct Workspace {
    root: PathBuf,
    clone: Option<CloneDir>,
}

impl Workspace {
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding the temporary clone, if any.
    pub fn clone_dir(&self) -> Option<&Path> {
        self.clone.as_ref().map(CloneDir::path)
    }
}

pub fn is_remote(source: &str) -> bool {
    ["http://", "https://", "ssh://", "git://", "file://", "git@"]
        .iter()
        .any(|scheme| source.starts_with(scheme))
}

/// Resolves the command-line source into a workspace, cloning remote URLs.
pub fn acquire(source: &str) -> Result<Workspace> {
    if is_remote(source) {
        return clone_in(&std::env::temp_dir(), source);
    }

    let root = PathBuf::from(source);
    if !root.exists() {
        return Err(TrunkcheckError::PathNotFound(source.to_string()));
    }
    Ok(Workspace { root, clone: None })
}

/// Mirrors `url` into a fresh temporary directory under `parent` and checks
/// out a working copy next to it.
pub(crate) fn clone_in(parent: &Path, url: &str) -> Result<Workspace> {
    let dir = CloneDir::create_in(parent)?;

    info!(url, "cloning repository");
    let mirror = dir.path().join("repo.git");
    let working = dir.path().join("working");

    run_detached(&[
        OsStr::new("clone"),
        OsStr::new("--mirror"),
        OsStr::new(url),
        mirror.as_os_str(),
    ])
    .map_err(|e| TrunkcheckError::VcsUnavailable(format!("clone of {url} failed: {e}")))?;
    run_detached(&[OsStr::new("clone"), mirror.as_os_str(), working.as_os_str()])
        .map_err(|e| TrunkcheckError::VcsUnavailable(format!("checkout of {url} failed: {e}")))?;

    Ok(Workspace {
        root: working,
        clone: Some(dir),
    })
}

use super::filesystem::{file_exists, list_files, relative_display, stays_inside};
use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};
use tracing::warn;

/// Paths whose presence in the repository root signals a CI/CD setup.
pub const DEFAULT_CI_INDICATORS: [&str; 6] = [
    ".github/workflows",
    ".gitlab-ci.yml",
    "Jenkinsfile",
    "azure-pipelines.yml",
    "circle.yml",
    ".travis.yml",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CiIndicator {
    pub path: String,
    pub present: bool,
    /// Configuration files backing the indicator; directories are walked.
    pub files: Vec<String>,
}

/// Checks each indicator once; configured entries that name a path already
/// checked (after dropping `.` segments) are skipped, as are entries that
/// would leave `root`.
pub fn detect_ci(root: &Path, extra_indicators: &[String]) -> Vec<CiIndicator> {
    let mut seen: HashSet<PathBuf> = HashSet::new();
    DEFAULT_CI_INDICATORS
        .iter()
        .map(|path| path.to_string())
        .chain(extra_indicators.iter().cloned())
        .filter(|path| {
            if stays_inside(path) {
                true
            } else {
                warn!(path = %path, "ignoring CI indicator outside the repository");
                false
            }
        })
        .filter(|path| seen.insert(normalized(path)))
        .map(|path| {
            let full = root.join(&path);
            let present = file_exists(&full);
            let files = if !present {
                Vec::new()
            } else if full.is_dir() {
                list_files(&full)
                    .iter()
                    .map(|file| relative_display(root, file))
                    .collect()
            } else {
                vec![path.clone()]
            };
            CiIndicator {
                path,
                present,
                files,
            }
        })
        .collect()
}

fn normalized(path: &str) -> PathBuf {
    Path::new(path)
        .components()
        .filter(|component| matches!(component, Component::Normal(_)))
        .collect()
}

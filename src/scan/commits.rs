use super::git::{lines, Git};
use tracing::info;

/// Subject lines of every commit on the checked-out branch, newest first.
pub fn commit_subjects(git: &Git) -> Vec<String> {
    info!("analyzing commit patterns");
    let output = git.query(&["log", "--format=%s"]);
    lines(&output).map(str::to_string).collect()
}

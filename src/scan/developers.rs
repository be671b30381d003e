use super::git::{fields, lines, Git, FIELD_SEP};
use crate::types::report::DeveloperActivity;
use chrono::{DateTime, FixedOffset};
use std::collections::{BTreeSet, HashMap};
use tracing::info;

#[derive(Debug, Clone)]
struct AuthorRecord {
    email: String,
    commits: usize,
    branches: BTreeSet<String>,
    last_activity: Option<DateTime<FixedOffset>>,
}

impl AuthorRecord {
    fn new(email: &str, last_activity: Option<DateTime<FixedOffset>>) -> Self {
        Self {
            email: email.to_string(),
            commits: 0,
            branches: BTreeSet::new(),
            last_activity,
        }
    }
}

pub fn collect_developers(git: &Git) -> Vec<DeveloperActivity> {
    info!("analyzing developer activity");
    let log_format = format!("--format=%an{FIELD_SEP}%ae{FIELD_SEP}%aI");
    let log = git.query(&["log", "--all", &log_format]);
    let ref_format = format!("--format=%(refname:short){FIELD_SEP}%(authorname)");
    let refs = git.query(&["for-each-ref", &ref_format, "refs/heads"]);
    aggregate(&log, &refs)
}

/// Folds `log --all` output (newest first) and branch tip authors into
/// per-author activity, busiest first.
fn aggregate(log: &str, refs: &str) -> Vec<DeveloperActivity> {
    let mut authors: HashMap<String, AuthorRecord> = HashMap::new();

    for line in lines(log) {
        let parts = fields(line);
        if parts.len() < 2 {
            continue;
        }
        let date = parts
            .get(2)
            .and_then(|date| DateTime::parse_from_rfc3339(date.trim()).ok());
        authors
            .entry(parts[0].to_string())
            .or_insert_with(|| AuthorRecord::new(parts[1], date))
            .commits += 1;
    }

    for line in lines(refs) {
        let parts = fields(line);
        if parts.len() < 2 {
            continue;
        }
        authors
            .entry(parts[1].to_string())
            .or_insert_with(|| AuthorRecord::new("", None))
            .branches
            .insert(parts[0].to_string());
    }

    let mut activity: Vec<DeveloperActivity> = authors
        .into_iter()
        .map(|(author, record)| DeveloperActivity {
            author,
            email: record.email,
            commits: record.commits,
            branches_created: record.branches.len(),
            // Commit sizes are not extracted.
            avg_commit_size: 0.0,
            last_activity: record.last_activity,
        })
        .collect();
    activity.sort_by(|a, b| b.commits.cmp(&a.commits).then_with(|| a.author.cmp(&b.author)));
    activity
}

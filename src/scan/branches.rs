use super::git::{fields, lines, Git, FIELD_SEP};
use crate::types::report::BranchFact;
use chrono::{DateTime, FixedOffset};
use std::collections::HashSet;
use tracing::{debug, info};

const REMOTE_PREFIX: &str = "origin/";
const SECONDS_PER_DAY: f64 = 86_400.0;

/// The detected integration branch and the revision that resolves it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MainBranch {
    pub name: String,
    pub rev: String,
}

pub fn detect_main_branch(git: &Git, candidates: &[String]) -> MainBranch {
    for candidate in candidates {
        for rev in [candidate.clone(), format!("{REMOTE_PREFIX}{candidate}")] {
            if git.succeeds(&["rev-parse", "--verify", "--quiet", &rev]) {
                debug!(branch = %candidate, %rev, "detected main branch");
                return MainBranch {
                    name: candidate.clone(),
                    rev,
                };
            }
        }
    }
    MainBranch {
        name: "main".to_string(),
        rev: "HEAD".to_string(),
    }
}

#[derive(Debug, Clone, PartialEq)]
struct BranchRef {
    name: String,
    rev: String,
    last_commit_date: Option<DateTime<FixedOffset>>,
}

pub fn collect_branches(git: &Git, main: &MainBranch) -> Vec<BranchFact> {
    info!("analyzing branch structure");
    let format = format!("--format=%(refname:short){FIELD_SEP}%(committerdate:iso-strict)");
    let listing = git.query(&["branch", "-a", &format]);

    parse_branch_listing(&listing)
        .into_iter()
        .map(|branch| {
            let range = format!("{}..{}", main.rev, branch.rev);
            let commit_count = git
                .query(&["rev-list", "--count", &range])
                .parse::<usize>()
                .unwrap_or(0);
            let log_format = format!("--format=%an{FIELD_SEP}%ct");
            let history = git.query(&["log", &log_format, &range]);
            let (author_count, lifespan_days) = summarize_history(&history);

            BranchFact {
                is_main: branch.name == main.name,
                name: branch.name,
                last_commit_date: branch.last_commit_date,
                commit_count,
                author_count,
                lifespan_days,
            }
        })
        .collect()
}

fn parse_branch_listing(listing: &str) -> Vec<BranchRef> {
    let mut seen = HashSet::new();
    let mut branches = Vec::new();
    for line in lines(listing) {
        if line.contains("HEAD") {
            continue;
        }
        let parts = fields(line);
        let Some(rev) = parts.first().map(|rev| rev.trim()) else {
            continue;
        };
        if rev.is_empty() || rev == "origin" || rev.starts_with('(') {
            continue;
        }
        let name = rev.strip_prefix(REMOTE_PREFIX).unwrap_or(rev).to_string();
        if !seen.insert(name.clone()) {
            continue;
        }
        let last_commit_date = parts
            .get(1)
            .and_then(|date| DateTime::parse_from_rfc3339(date.trim()).ok());
        branches.push(BranchRef {
            name,
            rev: rev.to_string(),
            last_commit_date,
        });
    }
    branches
}

/// Distinct authors and the span in days between the oldest and newest commit.
fn summarize_history(history: &str) -> (usize, f64) {
    let mut authors = HashSet::new();
    let mut oldest: Option<i64> = None;
    let mut newest: Option<i64> = None;
    for line in lines(history) {
        let parts = fields(line);
        if let Some(author) = parts.first() {
            authors.insert(author.to_string());
        }
        if let Some(ts) = parts.get(1).and_then(|ts| ts.trim().parse::<i64>().ok()) {
            oldest = Some(oldest.map_or(ts, |current| current.min(ts)));
            newest = Some(newest.map_or(ts, |current| current.max(ts)));
        }
    }
    let lifespan = match (oldest, newest) {
        (Some(oldest), Some(newest)) => (newest - oldest) as f64 / SECONDS_PER_DAY,
        _ => 0.0,
    };
    (authors.len(), lifespan)
}

use crate::types::report::{CommitCategory, CommitPattern};
use std::collections::HashMap;

type Rule = (fn(&str) -> bool, CommitCategory);

/// Evaluated top to bottom against the lower-cased subject; first match wins.
const RULES: [Rule; 10] = [
    (|msg| msg.starts_with("feat"), CommitCategory::Feat),
    (|msg| msg.starts_with("fix"), CommitCategory::Fix),
    (|msg| msg.starts_with("hotfix"), CommitCategory::Hotfix),
    (|msg| msg.starts_with("merge"), CommitCategory::Merge),
    (|msg| msg.starts_with("chore"), CommitCategory::Chore),
    (|msg| msg.starts_with("docs"), CommitCategory::Docs),
    (|msg| msg.starts_with("test"), CommitCategory::Test),
    (|msg| msg.starts_with("refactor"), CommitCategory::Refactor),
    (|msg| msg.contains("wip"), CommitCategory::Wip),
    (
        |msg| msg.contains("temp") || msg.contains("temporary"),
        CommitCategory::Temporary,
    ),
];

pub fn classify(message: &str) -> CommitCategory {
    let lowered = message.to_lowercase();
    RULES
        .iter()
        .find(|(matches, _)| matches(lowered.as_str()))
        .map(|(_, category)| *category)
        .unwrap_or(CommitCategory::Other)
}

/// Position of a category in the rule table, used to order ties.
fn rank(category: CommitCategory) -> usize {
    RULES
        .iter()
        .position(|(_, candidate)| *candidate == category)
        .unwrap_or(RULES.len())
}

pub fn commit_patterns<S: AsRef<str>>(messages: &[S]) -> Vec<CommitPattern> {
    let mut counts: HashMap<CommitCategory, usize> = HashMap::new();
    let mut total = 0usize;
    for message in messages {
        let message = message.as_ref();
        if message.trim().is_empty() {
            continue;
        }
        total += 1;
        *counts.entry(classify(message)).or_insert(0) += 1;
    }

    let mut patterns: Vec<CommitPattern> = counts
        .into_iter()
        .map(|(pattern, count)| CommitPattern {
            pattern,
            count,
            percentage: percentage(count, total),
        })
        .collect();
    patterns.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| rank(a.pattern).cmp(&rank(b.pattern)))
    });
    patterns
}

pub fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

pub fn total_commits(patterns: &[CommitPattern]) -> usize {
    patterns.iter().map(|pattern| pattern.count).sum()
}

pub fn count_of(patterns: &[CommitPattern], category: CommitCategory) -> usize {
    patterns
        .iter()
        .filter(|pattern| pattern.pattern == category)
        .map(|pattern| pattern.count)
        .sum()
}

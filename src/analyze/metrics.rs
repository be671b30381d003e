use super::patterns::{count_of, percentage, total_commits};
use crate::scan::ci::CiIndicator;
use crate::types::config::TrunkcheckConfig;
use crate::types::report::{BranchFact, CommitCategory, CommitPattern};
use crate::types::scoring::{Metrics, Score};
use tracing::info;

const CI_INDICATOR_POINTS: Score = 20.0;
const MAX_SCORE: Score = 100.0;
const LONG_LIVED_COMMITS: usize = 10;

pub fn calculate(
    branches: &[BranchFact],
    patterns: &[CommitPattern],
    ci_indicators: &[CiIndicator],
    config: &TrunkcheckConfig,
) -> Metrics {
    info!("calculating metrics");
    let total = total_commits(patterns);
    let merge_frequency = percentage(count_of(patterns, CommitCategory::Merge), total);
    let hotfix_frequency = percentage(count_of(patterns, CommitCategory::Hotfix), total);
    let has_feature_naming = branches
        .iter()
        .any(|branch| config.is_feature_branch(&branch.name));

    Metrics {
        branch_lifespan_avg: branch_lifespan_avg(branches),
        merge_frequency,
        hotfix_frequency,
        ci_cd_score: ci_cd_score(ci_indicators),
        trunk_based_score: trunk_based_score(
            long_lived_branches(branches, LONG_LIVED_COMMITS),
            merge_frequency,
            hotfix_frequency,
            has_feature_naming,
        ),
    }
}

/// Non-main branches carrying more than `threshold` commits beyond main.
pub fn long_lived_branches(branches: &[BranchFact], threshold: usize) -> usize {
    branches
        .iter()
        .filter(|branch| !branch.is_main && branch.commit_count > threshold)
        .count()
}

pub fn ci_cd_score(ci_indicators: &[CiIndicator]) -> Score {
    let present = ci_indicators
        .iter()
        .filter(|indicator| indicator.present)
        .count();
    (present as Score * CI_INDICATOR_POINTS).min(MAX_SCORE)
}

pub fn trunk_based_score(
    long_lived: usize,
    merge_frequency: f64,
    hotfix_frequency: f64,
    has_feature_naming: bool,
) -> Score {
    let mut score: Score = 0.0;

    score += match long_lived {
        0..=2 => 30.0,
        3..=5 => 20.0,
        6..=10 => 10.0,
        _ => 0.0,
    };

    if merge_frequency > 20.0 {
        score += 25.0;
    } else if merge_frequency > 10.0 {
        score += 15.0;
    } else if merge_frequency > 5.0 {
        score += 10.0;
    }

    if hotfix_frequency < 5.0 {
        score += 25.0;
    } else if hotfix_frequency < 10.0 {
        score += 15.0;
    } else if hotfix_frequency < 20.0 {
        score += 10.0;
    }

    if has_feature_naming {
        score += 20.0;
    }

    score
}

fn branch_lifespan_avg(branches: &[BranchFact]) -> f64 {
    let lifespans: Vec<f64> = branches
        .iter()
        .filter(|branch| !branch.is_main)
        .map(|branch| branch.lifespan_days)
        .collect();
    if lifespans.is_empty() {
        0.0
    } else {
        lifespans.iter().sum::<f64>() / lifespans.len() as f64
    }
}

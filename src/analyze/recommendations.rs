use super::metrics::long_lived_branches;
use super::patterns::total_commits;
use crate::types::report::{BranchFact, CommitPattern};
use crate::types::scoring::Score;

const TRUNK_SCORE_THRESHOLD: Score = 50.0;
const CI_SCORE_THRESHOLD: Score = 60.0;
const CONVENTIONAL_SHARE_THRESHOLD: f64 = 0.7;
const STALE_BRANCH_COMMITS: usize = 20;
const STALE_BRANCH_LIMIT: usize = 3;

pub const TRUNK_RECOMMENDATIONS: [&str; 3] = [
    "🔀 Implement trunk-based development: Reduce long-lived branches and increase merge frequency",
    "📝 Establish branch naming conventions: Use feature/, hotfix/, bugfix/ prefixes",
    "⏱️ Implement short-lived feature branches: Keep branches active for less than 2-3 days",
];

pub const CI_RECOMMENDATIONS: [&str; 3] = [
    "🚀 Implement CI/CD pipeline: Add automated testing, building, and deployment",
    "✅ Add automated testing: Unit tests, integration tests, and code quality checks",
    "🔒 Implement branch protection: Require PR reviews and status checks",
];

pub const CONVENTIONAL_COMMITS: &str =
    "📋 Adopt conventional commit messages: Use feat:, fix:, chore:, docs:, test:, refactor: prefixes";

pub const BRANCH_CLEANUP: &str =
    "🌿 Clean up long-lived branches: Merge or delete branches with >20 commits";

pub const ALWAYS: [&str; 3] = [
    "👥 Implement pair programming: Reduce single-developer branches",
    "🔄 Increase code review frequency: Require reviews for all changes",
    "📊 Add development metrics: Track cycle time, lead time, and deployment frequency",
];

pub fn generate(
    branches: &[BranchFact],
    patterns: &[CommitPattern],
    ci_cd_score: Score,
    trunk_based_score: Score,
) -> Vec<String> {
    let mut recommendations: Vec<String> = Vec::new();

    if trunk_based_score < TRUNK_SCORE_THRESHOLD {
        recommendations.extend(TRUNK_RECOMMENDATIONS.iter().map(|rec| rec.to_string()));
    }

    if ci_cd_score < CI_SCORE_THRESHOLD {
        recommendations.extend(CI_RECOMMENDATIONS.iter().map(|rec| rec.to_string()));
    }

    let total = total_commits(patterns);
    if total > 0 {
        let conventional: usize = patterns
            .iter()
            .filter(|pattern| pattern.pattern.is_conventional())
            .map(|pattern| pattern.count)
            .sum();
        if (conventional as f64 / total as f64) < CONVENTIONAL_SHARE_THRESHOLD {
            recommendations.push(CONVENTIONAL_COMMITS.to_string());
        }
    }

    if long_lived_branches(branches, STALE_BRANCH_COMMITS) > STALE_BRANCH_LIMIT {
        recommendations.push(BRANCH_CLEANUP.to_string());
    }

    recommendations.extend(ALWAYS.iter().map(|rec| rec.to_string()));
    recommendations
}

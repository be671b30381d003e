pub mod metrics;
pub mod patterns;
pub mod recommendations;

use crate::scan::RepoFacts;
use crate::types::config::TrunkcheckConfig;
use crate::types::report::AnalysisResult;
use chrono::Local;

pub fn analyze(
    repository_url: &str,
    facts: RepoFacts,
    config: &TrunkcheckConfig,
) -> AnalysisResult {
    let commit_patterns = patterns::commit_patterns(&facts.commit_subjects);
    let metrics = metrics::calculate(
        &facts.branches,
        &commit_patterns,
        &facts.ci_indicators,
        config,
    );
    let recommendations = recommendations::generate(
        &facts.branches,
        &commit_patterns,
        metrics.ci_cd_score,
        metrics.trunk_based_score,
    );

    // An indicator directory without files is still listed by its own path.
    let ci_indicators = facts
        .ci_indicators
        .iter()
        .filter(|indicator| indicator.present)
        .flat_map(|indicator| {
            if indicator.files.is_empty() {
                vec![indicator.path.clone()]
            } else {
                indicator.files.clone()
            }
        })
        .collect();

    AnalysisResult {
        repository_url: repository_url.to_string(),
        analysis_date: Local::now(),
        total_commits: patterns::total_commits(&commit_patterns),
        total_branches: facts.branches.len(),
        main_branch: facts.main_branch.name,
        branch_lifespan_avg: metrics.branch_lifespan_avg,
        merge_frequency: metrics.merge_frequency,
        hotfix_frequency: metrics.hotfix_frequency,
        ci_cd_score: metrics.ci_cd_score,
        trunk_based_score: metrics.trunk_based_score,
        ci_indicators,
        recommendations,
        branch_info: facts.branches,
        commit_patterns,
        developer_activity: facts.developers,
    }
}

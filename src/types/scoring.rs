pub type Score = f64;

/// Heuristic figures derived from branch facts and commit patterns.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Metrics {
    pub branch_lifespan_avg: f64,
    pub merge_frequency: f64,
    pub hotfix_frequency: f64,
    pub ci_cd_score: Score,
    pub trunk_based_score: Score,
}

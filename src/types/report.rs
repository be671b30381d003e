use chrono::{DateTime, FixedOffset, Local};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BranchFact {
    pub name: String,
    pub last_commit_date: Option<DateTime<FixedOffset>>,
    /// Commits reachable from this branch but not from the main branch.
    pub commit_count: usize,
    pub author_count: usize,
    pub lifespan_days: f64,
    pub is_main: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CommitCategory {
    #[serde(rename = "feat:")]
    Feat,
    #[serde(rename = "fix:")]
    Fix,
    #[serde(rename = "hotfix:")]
    Hotfix,
    #[serde(rename = "merge:")]
    Merge,
    #[serde(rename = "chore:")]
    Chore,
    #[serde(rename = "docs:")]
    Docs,
    #[serde(rename = "test:")]
    Test,
    #[serde(rename = "refactor:")]
    Refactor,
    #[serde(rename = "WIP")]
    Wip,
    #[serde(rename = "temporary")]
    Temporary,
    #[serde(rename = "other")]
    Other,
}

impl CommitCategory {
    pub fn label(self) -> &'static str {
        match self {
            Self::Feat => "feat:",
            Self::Fix => "fix:",
            Self::Hotfix => "hotfix:",
            Self::Merge => "merge:",
            Self::Chore => "chore:",
            Self::Docs => "docs:",
            Self::Test => "test:",
            Self::Refactor => "refactor:",
            Self::Wip => "WIP",
            Self::Temporary => "temporary",
            Self::Other => "other",
        }
    }

    pub fn is_conventional(self) -> bool {
        matches!(
            self,
            Self::Feat | Self::Fix | Self::Chore | Self::Docs | Self::Test | Self::Refactor
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommitPattern {
    pub pattern: CommitCategory,
    pub count: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeveloperActivity {
    pub author: String,
    pub email: String,
    pub commits: usize,
    pub branches_created: usize,
    pub avg_commit_size: f64,
    pub last_activity: Option<DateTime<FixedOffset>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    pub repository_url: String,
    pub analysis_date: DateTime<Local>,
    pub total_commits: usize,
    pub total_branches: usize,
    pub main_branch: String,
    pub branch_lifespan_avg: f64,
    pub merge_frequency: f64,
    pub hotfix_frequency: f64,
    pub ci_cd_score: f64,
    pub trunk_based_score: f64,
    pub ci_indicators: Vec<String>,
    pub recommendations: Vec<String>,
    pub branch_info: Vec<BranchFact>,
    pub commit_patterns: Vec<CommitPattern>,
    pub developer_activity: Vec<DeveloperActivity>,
}

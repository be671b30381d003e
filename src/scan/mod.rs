pub mod branches;
pub mod ci;
pub mod commits;
pub mod developers;
pub mod filesystem;
pub mod git;
pub mod workspace;

#[cfg(test)]
pub(crate) mod testutil;

use crate::error::Result;
use crate::types::config::TrunkcheckConfig;
use crate::types::report::{BranchFact, DeveloperActivity};
use branches::MainBranch;
use ci::CiIndicator;
use git::Git;
use std::path::Path;

/// Raw repository facts, collected once and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct RepoFacts {
    pub main_branch: MainBranch,
    pub branches: Vec<BranchFact>,
    pub commit_subjects: Vec<String>,
    pub developers: Vec<DeveloperActivity>,
    pub ci_indicators: Vec<CiIndicator>,
}

pub fn discover(root: &Path, config: &TrunkcheckConfig) -> Result<RepoFacts> {
    let git = Git::new(root);
    git.ensure_repository()?;

    let main_branch = branches::detect_main_branch(&git, &config.branches.main_candidates);
    let branches = branches::collect_branches(&git, &main_branch);
    let commit_subjects = commits::commit_subjects(&git);
    let developers = developers::collect_developers(&git);
    let ci_indicators = ci::detect_ci(git.root(), &config.ci.extra_indicators);

    Ok(RepoFacts {
        main_branch,
        branches,
        commit_subjects,
        developers,
        ci_indicators,
    })
}

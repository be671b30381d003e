use crate::error::TrunkcheckError;
use crate::scan::filesystem::stays_inside;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrunkcheckConfig {
    #[serde(default)]
    pub branches: BranchesConfig,
    #[serde(default)]
    pub ci: CiConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BranchesConfig {
    #[serde(default = "default_main_candidates")]
    pub main_candidates: Vec<String>,
    #[serde(default = "default_feature_prefixes")]
    pub feature_prefixes: Vec<String>,
}

impl Default for BranchesConfig {
    fn default() -> Self {
        Self {
            main_candidates: default_main_candidates(),
            feature_prefixes: default_feature_prefixes(),
        }
    }
}

fn default_main_candidates() -> Vec<String> {
    ["main", "master", "trunk", "develop"]
        .iter()
        .map(|name| name.to_string())
        .collect()
}

fn default_feature_prefixes() -> Vec<String> {
    vec!["feature/".to_string(), "feat/".to_string()]
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CiConfig {
    #[serde(default)]
    pub extra_indicators: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_max_branches")]
    pub max_branches: usize,
    #[serde(default = "default_max_developers")]
    pub max_developers: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            max_branches: default_max_branches(),
            max_developers: default_max_developers(),
        }
    }
}

fn default_max_branches() -> usize {
    20
}

fn default_max_developers() -> usize {
    10
}

impl TrunkcheckConfig {
    pub fn is_feature_branch(&self, name: &str) -> bool {
        self.branches
            .feature_prefixes
            .iter()
            .any(|prefix| name.starts_with(prefix.as_str()))
    }

    pub fn validate(&self) -> Result<(), TrunkcheckError> {
        if self.branches.main_candidates.is_empty() {
            return Err(TrunkcheckError::ConfigParse(
                "branches.main_candidates must not be empty".to_string(),
            ));
        }
        if self.branches.feature_prefixes.is_empty() {
            return Err(TrunkcheckError::ConfigParse(
                "branches.feature_prefixes must not be empty".to_string(),
            ));
        }

        if has_blank(&self.branches.main_candidates) {
            return Err(TrunkcheckError::ConfigParse(
                "branches.main_candidates contains a blank entry".to_string(),
            ));
        }
        if has_blank(&self.branches.feature_prefixes) {
            return Err(TrunkcheckError::ConfigParse(
                "branches.feature_prefixes contains a blank entry".to_string(),
            ));
        }
        if has_blank(&self.ci.extra_indicators) {
            return Err(TrunkcheckError::ConfigParse(
                "ci.extra_indicators contains a blank entry".to_string(),
            ));
        }
        if let Some(path) = self
            .ci
            .extra_indicators
            .iter()
            .find(|path| !stays_inside(path))
        {
            return Err(TrunkcheckError::ConfigParse(format!(
                "ci.extra_indicators entry `{path}` must be a path inside the repository"
            )));
        }

        if self.report.max_branches == 0 || self.report.max_developers == 0 {
            return Err(TrunkcheckError::ConfigParse(
                "report.max_branches and report.max_developers must be greater than 0"
                    .to_string(),
            ));
        }

        Ok(())
    }
}

fn has_blank(values: &[String]) -> bool {
    values.iter().any(|value| value.trim().is_empty())
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrunkcheckError {
    #[error("version control unavailable: {0}")]
    VcsUnavailable(String),

    #[error("not a git repository: {0}")]
    NotGitRepo(String),

    #[error("path does not exist: {0}")]
    PathNotFound(String),

    #[error("git {command} failed: {stderr}")]
    GitCommand { command: String, stderr: String },

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TrunkcheckError {
    /// Errors that mean the repository could not be reached through git at all.
    pub fn is_vcs_failure(&self) -> bool {
        matches!(
            self,
            Self::VcsUnavailable(_)
                | Self::NotGitRepo(_)
                | Self::PathNotFound(_)
                | Self::GitCommand { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, TrunkcheckError>;

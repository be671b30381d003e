pub mod html;
pub mod json;

use crate::error::{Result, TrunkcheckError};
use crate::types::config::TrunkcheckConfig;
use crate::types::report::AnalysisResult;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Html,
    Json,
}

#[derive(Debug, Clone, Copy)]
pub struct RenderOptions<'a> {
    pub detailed: bool,
    pub suggestions: bool,
    pub config: &'a TrunkcheckConfig,
}

pub fn render(
    result: &AnalysisResult,
    format: OutputFormat,
    options: RenderOptions<'_>,
) -> Result<String> {
    match format {
        OutputFormat::Html => Ok(html::to_html(result, options)),
        OutputFormat::Json => json::to_json(result).map_err(TrunkcheckError::Json),
    }
}

pub fn write_report(path: &Path, rendered: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, rendered)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn write_report_creates_missing_parent_directories() {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = dir.path().join("reports/nested/report.json");
        write_report(&path, "{}").expect("report should write");
        assert_eq!(
            fs::read_to_string(&path).expect("report should read"),
            "{}"
        );
    }
}

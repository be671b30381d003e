//! Standalone HTML report.
//!
//! Every string that originates from the repository (branch and author names,
//! commit pattern labels, recommendation text, URLs, dates) goes through
//! [`html_escape`] before it is written into markup.

use super::RenderOptions;
use crate::types::report::{AnalysisResult, BranchFact, DeveloperActivity};
use chrono::{DateTime, FixedOffset};

pub fn to_html(result: &AnalysisResult, options: RenderOptions<'_>) -> String {
    let mut html = String::new();
    html.push_str(&render_head());
    html.push_str("<body>\n");
    html.push_str(&render_header(result));
    html.push_str(&render_metrics(result));
    html.push_str(&render_scores(result));
    html.push_str(&render_recommendations(result));
    html.push_str(&render_branches(result, options));
    html.push_str(&render_commit_patterns(result));
    html.push_str(&render_developers(result, options));
    if options.suggestions {
        html.push_str(IMPLEMENTATION_GUIDE);
    }
    html.push_str("</body>\n</html>\n");
    html
}

fn render_head() -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Repository Analysis Report</title>
    <style>
{CSS}
    </style>
</head>
"#
    )
}

fn render_header(result: &AnalysisResult) -> String {
    format!(
        r#"<div class="header">
    <h1>🔍 Repository Analysis Report</h1>
    <p><strong>Repository:</strong> {}</p>
    <p><strong>Analysis Date:</strong> {}</p>
</div>
"#,
        html_escape(&result.repository_url),
        html_escape(&result.analysis_date.to_rfc3339())
    )
}

fn render_metrics(result: &AnalysisResult) -> String {
    let mut html = String::from("<h2>📊 Key Metrics</h2>\n");
    let metrics = [
        ("Total Commits", group_thousands(result.total_commits)),
        ("Total Branches", result.total_branches.to_string()),
        ("Main Branch", html_escape(&result.main_branch)),
        (
            "Average Branch Lifespan",
            format!("{:.1} days", result.branch_lifespan_avg),
        ),
        ("Merge Frequency", format!("{:.1}%", result.merge_frequency)),
        ("Hotfix Frequency", format!("{:.1}%", result.hotfix_frequency)),
    ];
    for (label, value) in metrics {
        html.push_str(&format!(
            "<div class=\"metric\"><strong>{label}:</strong> {value}</div>\n"
        ));
    }
    if !result.ci_indicators.is_empty() {
        let files = result
            .ci_indicators
            .iter()
            .map(|file| format!("<code>{}</code>", html_escape(file)))
            .collect::<Vec<_>>()
            .join(", ");
        html.push_str(&format!(
            "<div class=\"metric\"><strong>CI/CD Configuration:</strong> {files}</div>\n"
        ));
    }
    html
}

fn render_scores(result: &AnalysisResult) -> String {
    format!(
        r#"<h2>🎯 Scores</h2>
<div class="metric">
    <strong>CI/CD Score:</strong> <span class="score {}">{}/100</span>
    <p>Measures the presence of CI/CD infrastructure and automation.</p>
</div>
<div class="metric">
    <strong>Trunk-Based Development Score:</strong> <span class="score {}">{}/100</span>
    <p>Measures adherence to trunk-based development practices.</p>
</div>
"#,
        score_class(result.ci_cd_score),
        result.ci_cd_score,
        score_class(result.trunk_based_score),
        result.trunk_based_score
    )
}

fn render_recommendations(result: &AnalysisResult) -> String {
    let mut html =
        String::from("<h2>💡 Recommendations</h2>\n<div class=\"recommendations\">\n<ul>\n");
    for recommendation in &result.recommendations {
        html.push_str(&format!("<li>{}</li>\n", html_escape(recommendation)));
    }
    html.push_str("</ul>\n</div>\n");
    html
}

fn render_branches(result: &AnalysisResult, options: RenderOptions<'_>) -> String {
    let mut html = String::from(
        "<h2>🌿 Branch Analysis</h2>\n<table>\n<tr><th>Branch Name</th><th>Commits</th><th>Authors</th><th>Last Activity</th><th>Type</th></tr>\n",
    );
    let limit = row_limit(options.detailed, options.config.report.max_branches);
    for branch in result.branch_info.iter().take(limit) {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            html_escape(&branch.name),
            branch.commit_count,
            branch.author_count,
            format_date(branch.last_commit_date.as_ref()),
            branch_type(branch, options)
        ));
    }
    html.push_str("</table>\n");
    html.push_str(&truncation_note(result.branch_info.len(), limit, "branches"));
    html
}

fn render_commit_patterns(result: &AnalysisResult) -> String {
    let mut html = String::from(
        "<h2>📝 Commit Patterns</h2>\n<table>\n<tr><th>Pattern</th><th>Count</th><th>Percentage</th></tr>\n",
    );
    for pattern in &result.commit_patterns {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{:.1}%</td></tr>\n",
            html_escape(pattern.pattern.label()),
            pattern.count,
            pattern.percentage
        ));
    }
    html.push_str("</table>\n");
    html
}

fn render_developers(result: &AnalysisResult, options: RenderOptions<'_>) -> String {
    let mut html = String::from(
        "<h2>👥 Developer Activity</h2>\n<table>\n<tr><th>Developer</th><th>Commits</th><th>Branches Created</th><th>Last Activity</th></tr>\n",
    );
    let limit = row_limit(options.detailed, options.config.report.max_developers);
    for developer in result.developer_activity.iter().take(limit) {
        html.push_str(&developer_row(developer));
    }
    html.push_str("</table>\n");
    html.push_str(&truncation_note(
        result.developer_activity.len(),
        limit,
        "developers",
    ));
    html
}

fn developer_row(developer: &DeveloperActivity) -> String {
    format!(
        "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
        html_escape(&developer.author),
        developer.commits,
        developer.branches_created,
        format_date(developer.last_activity.as_ref())
    )
}

fn row_limit(detailed: bool, configured: usize) -> usize {
    if detailed {
        usize::MAX
    } else {
        configured
    }
}

fn truncation_note(total: usize, limit: usize, noun: &str) -> String {
    if total > limit {
        format!(
            "<p class=\"note\">Showing {limit} of {total} {noun}; use --detailed to list all.</p>\n"
        )
    } else {
        String::new()
    }
}

fn branch_type(branch: &BranchFact, options: RenderOptions<'_>) -> &'static str {
    if branch.is_main {
        "Main"
    } else if options.config.is_feature_branch(&branch.name) {
        "Feature"
    } else {
        "Other"
    }
}

fn format_date(date: Option<&DateTime<FixedOffset>>) -> String {
    date.map(|date| html_escape(&date.format("%Y-%m-%d %H:%M:%S %z").to_string()))
        .unwrap_or_else(|| "-".to_string())
}

fn score_class(score: f64) -> &'static str {
    if score >= 80.0 {
        "good"
    } else if score >= 50.0 {
        "warning"
    } else {
        "danger"
    }
}

fn group_thousands(value: usize) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

const CSS: &str = r#"
body { font-family: Arial, sans-serif; margin: 40px; line-height: 1.6; }
.header { background: #f4f4f4; padding: 20px; border-radius: 8px; margin-bottom: 30px; }
.metric { background: #e8f4fd; padding: 15px; margin: 10px 0; border-radius: 5px; border-left: 4px solid #2196F3; }
.score { font-size: 24px; font-weight: bold; color: #2196F3; }
.recommendations { background: #fff3cd; padding: 20px; border-radius: 5px; border-left: 4px solid #ffc107; }
.recommendations ul { margin: 10px 0; }
.recommendations li { margin: 8px 0; }
table { width: 100%; border-collapse: collapse; margin: 20px 0; }
th, td { border: 1px solid #ddd; padding: 12px; text-align: left; }
th { background-color: #f2f2f2; }
.note { color: #666; font-style: italic; }
.good { color: #28a745; }
.warning { color: #ffc107; }
.danger { color: #dc3545; }
"#;

const IMPLEMENTATION_GUIDE: &str = r#"<h2>🚀 Implementation Guide</h2>
<div class="recommendations">
    <h3>Trunk-Based Development Implementation:</h3>
    <ol>
        <li><strong>Establish Branch Naming Conventions:</strong>
            <ul>
                <li>feature/description - for new features</li>
                <li>hotfix/description - for urgent fixes</li>
                <li>bugfix/description - for bug fixes</li>
            </ul>
        </li>
        <li><strong>Implement Short-Lived Branches:</strong>
            <ul>
                <li>Keep feature branches active for 1-3 days maximum</li>
                <li>Merge frequently to main branch</li>
                <li>Delete branches after merging</li>
            </ul>
        </li>
        <li><strong>Enable Branch Protection:</strong>
            <ul>
                <li>Require pull request reviews</li>
                <li>Require status checks to pass</li>
                <li>Restrict pushes to main branch</li>
            </ul>
        </li>
    </ol>
    <h3>CI/CD Implementation:</h3>
    <ol>
        <li><strong>Add CI/CD Pipeline:</strong>
            <ul>
                <li>Automated testing on every commit</li>
                <li>Automated building and packaging</li>
                <li>Automated deployment to staging/production</li>
            </ul>
        </li>
        <li><strong>Quality Gates:</strong>
            <ul>
                <li>Code coverage requirements</li>
                <li>Static code analysis</li>
                <li>Security vulnerability scanning</li>
            </ul>
        </li>
        <li><strong>Monitoring and Alerting:</strong>
            <ul>
                <li>Build status notifications</li>
                <li>Deployment success/failure alerts</li>
                <li>Performance monitoring</li>
            </ul>
        </li>
    </ol>
</div>
"#;

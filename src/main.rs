mod analyze;
mod cli;
mod config;
mod error;
mod report;
mod scan;
mod types;

use crate::error::TrunkcheckError;
use clap::Parser;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const VCS_UNAVAILABLE: i32 = 1;
    pub const RUNTIME_FAILURE: i32 = 2;
    pub const INTERRUPTED: i32 = 130;
}

/// Ctrl-C skips destructors, so the handler removes any temporary clone
/// itself before exiting.
fn install_interrupt_handler() {
    let installed = ctrlc::set_handler(|| {
        let removed = scan::workspace::remove_active_clones();
        eprintln!("interrupted; removed {removed} temporary clone(s)");
        std::process::exit(exit_code::INTERRUPTED);
    });
    if let Err(e) = installed {
        warn!(error = %e, "could not install interrupt handler");
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    let default_level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: cli::Cli) -> Result<i32, TrunkcheckError> {
    info!(repository = %cli.repository, "starting analysis");

    let loaded = config::load_config(&std::env::current_dir()?)?;

    // The workspace owns any temporary clone; it is dropped at the end of this
    // block, before the report is written or an error reaches `main`.
    let result = {
        let workspace = scan::workspace::acquire(&cli.repository)?;
        if let Some(dir) = workspace.clone_dir() {
            debug!(dir = %dir.display(), "analyzing temporary clone");
        }
        let facts = scan::discover(workspace.root(), &loaded)?;
        analyze::analyze(&cli.repository, facts, &loaded)
    };

    let output_format = match cli.format {
        cli::ReportFormat::Html => report::OutputFormat::Html,
        cli::ReportFormat::Json => report::OutputFormat::Json,
    };
    let options = report::RenderOptions {
        detailed: cli.detailed,
        suggestions: cli.suggestions,
        config: &loaded,
    };
    let rendered = report::render(&result, output_format, options)?;
    let output_path = cli
        .output
        .clone()
        .unwrap_or_else(|| cli.format.default_output());
    report::write_report(&output_path, &rendered)?;

    if !cli.quiet {
        println!("Analysis complete! Report saved to: {}", output_path.display());
        println!("CI/CD Score: {}/100", result.ci_cd_score);
        println!(
            "Trunk-Based Development Score: {}/100",
            result.trunk_based_score
        );
        println!("Total Recommendations: {}", result.recommendations.len());

        if cli.suggestions {
            println!("suggestions:");
            for recommendation in &result.recommendations {
                println!("- {recommendation}");
            }
        }
    }

    Ok(exit_code::SUCCESS)
}

fn main() {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose, cli.quiet);
    install_interrupt_handler();

    match run(cli) {
        Ok(code) => {
            if code != exit_code::SUCCESS {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            let code = if e.is_vcs_failure() {
                exit_code::VCS_UNAVAILABLE
            } else {
                exit_code::RUNTIME_FAILURE
            };
            std::process::exit(code);
        }
    }
}

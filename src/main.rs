use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use history_patcher::{patch, plan, PatchReport};
use similar::{ChangeTag, TextDiff};
use std::path::{Path, PathBuf};

/// Target used when neither an argument nor the environment names one.
const DEFAULT_TARGET: &str = "docs/index.html";

#[derive(Parser)]
#[command(name = "history-patcher")]
#[command(
    about = "Inject age highlighting for older history items into a newsboard page",
    long_about = None
)]
#[command(version)]
struct Cli {
    /// HTML file to patch in place
    #[arg(env = "HISTORY_PATCHER_TARGET", default_value = DEFAULT_TARGET)]
    target: PathBuf,

    /// Dry run - show what would be changed without modifying the file
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Show unified diff of changes
    #[arg(short, long)]
    diff: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "history_patcher=warn".into()),
        )
        .init();

    let cli = Cli::parse();
    cmd_patch(&cli.target, cli.dry_run, cli.diff)
}

fn cmd_patch(target: &Path, dry_run: bool, show_diff: bool) -> Result<()> {
    let report = if dry_run {
        plan(target)
    } else {
        patch(target)
    }?;

    if show_diff && report.changed() {
        display_diff(&report);
    }

    if dry_run {
        println!(
            "{}",
            format!(
                "Dry run: would insert {} CSS rule(s) and {} script block(s) into {}",
                report.css_insertions,
                report.script_insertions,
                report.path.display()
            )
            .yellow()
        );
        return Ok(());
    }

    println!("{}", "Changes applied successfully".green());
    Ok(())
}

/// Helper: Show unified diff between original and patched content
fn display_diff(report: &PatchReport) {
    let file = report.path.display();
    println!("{}", format!("--- {} (original)", file).dimmed());
    println!("{}", format!("+++ {} (patched)", file).dimmed());

    let diff = TextDiff::from_lines(report.original.as_str(), report.patched.as_str());

    for change in diff.iter_all_changes() {
        let sign = match change.tag() {
            ChangeTag::Delete => format!("-{}", change).red(),
            ChangeTag::Insert => format!("+{}", change).green(),
            ChangeTag::Equal => format!(" {}", change).normal(),
        };
        print!("{}", sign);
    }
    println!();
}

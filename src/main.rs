use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use deltacov::checks::{CheckRunSettings, DEFAULT_REPORTS_DIR};
use deltacov::report::{ReportOptions, DEFAULT_MARKER, DEFAULT_TITLE};
use deltacov::render::ColorPolicy;
use deltacov::{cli, github};

/// deltacov: coverage check runs, badges and summary reports for GitHub.
#[derive(Parser)]
#[command(name = "deltacov", version, about)]
struct Cli {
    /// Log debug output (overridden by RUST_LOG).
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate per-view summary files into one JSON array.
    ReadSummaries {
        /// Directory containing `*-summary.json` files.
        #[arg(long)]
        dir: PathBuf,

        /// Select full-coverage summaries instead of delta-coverage ones.
        #[arg(long)]
        full_coverage: bool,

        /// Where to write the aggregated file.
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },

    /// Create a GitHub check run per view.
    CheckRuns {
        /// Aggregated summaries file.
        #[arg(long)]
        summaries: PathBuf,

        /// Directory holding `<view>/report.md`.
        #[arg(long, default_value = DEFAULT_REPORTS_DIR)]
        reports_dir: PathBuf,

        /// Conclude with success even when coverage rules are violated.
        #[arg(long)]
        ignore_coverage_failure: bool,

        /// External id attached to each check run.
        #[arg(long)]
        external_id: Option<String>,

        /// Commit to attach the check runs to (default: GITHUB_SHA).
        #[arg(long)]
        head_sha: Option<String>,

        /// Where to write the created check runs.
        #[arg(long, default_value = "check-runs.json")]
        output: PathBuf,
    },

    /// Render the coverage summary table for created check runs.
    Comment {
        /// Check runs file written by `check-runs`.
        #[arg(long)]
        check_runs: PathBuf,

        /// Report heading.
        #[arg(long, default_value = DEFAULT_TITLE)]
        title: String,

        /// Hidden marker identifying the report.
        #[arg(long, default_value = DEFAULT_MARKER)]
        marker: String,

        /// Draw shortfalls smaller than this many points in a near-miss
        /// colour. Without a value the band defaults to 10 points.
        #[arg(long, value_name = "POINTS", num_args = 0..=1)]
        near_miss_band: Option<Option<f64>>,

        /// Append the report to the job summary.
        #[arg(long)]
        step_summary: bool,

        /// Create or update the report comment on the pull request.
        #[arg(long)]
        post_comment: bool,
    },

    /// Generate a line-coverage badge per view.
    Badges {
        /// Aggregated summaries file.
        #[arg(long)]
        summaries: PathBuf,

        /// Output directory for the SVG files.
        #[arg(long, default_value = "badges")]
        out_dir: PathBuf,

        /// Embed the badges in the job summary.
        #[arg(long)]
        step_summary: bool,
    },
}

fn main() -> Result<()> {
    let args = Cli::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match args.command {
        Commands::ReadSummaries {
            dir,
            full_coverage,
            out_dir,
        } => {
            print!("{}", cli::cmd_read_summaries(&dir, full_coverage, &out_dir)?);
        }
        Commands::CheckRuns {
            summaries,
            reports_dir,
            ignore_coverage_failure,
            external_id,
            head_sha,
            output,
        } => {
            let ctx = github::Context::from_env().context("Failed to resolve GitHub context")?;
            let head_sha = head_sha
                .or_else(|| ctx.sha.clone())
                .context("--head-sha or GITHUB_SHA is required")?;
            let settings = CheckRunSettings {
                head_sha,
                external_id,
                ignore_coverage_failure,
                reports_dir,
            };
            print!("{}", cli::cmd_check_runs(&summaries, &settings, &ctx, &output)?);
        }
        Commands::Comment {
            check_runs,
            title,
            marker,
            near_miss_band,
            step_summary,
            post_comment,
        } => {
            let color_policy = match near_miss_band {
                Some(band) => ColorPolicy::near_miss(band),
                None => ColorPolicy::TwoTier,
            };
            let options = ReportOptions {
                title,
                marker,
                color_policy,
            };
            let body = cli::cmd_comment(&check_runs, &options)?;
            if step_summary {
                github::append_step_summary(&body).context("Failed to write job summary")?;
            }
            if post_comment {
                let ctx = github::Context::from_env().context("Failed to resolve GitHub context")?;
                ctx.post_comment(&body, &options.marker)
                    .context("Failed to post PR comment")?;
            }
            println!("{body}");
        }
        Commands::Badges {
            summaries,
            out_dir,
            step_summary,
        } => {
            let written = cli::cmd_badges(&summaries, &out_dir)?;
            let in_actions = std::env::var_os("GITHUB_OUTPUT").is_some();
            for (view, path) in &written {
                let path = path.display().to_string();
                if in_actions {
                    github::set_output(view, &path).context("Failed to set step output")?;
                }
                println!("{view}: {path}");
            }
            if step_summary {
                let paths: Vec<PathBuf> = written.into_iter().map(|(_, p)| p).collect();
                let markdown = cli::badges_summary(&paths)?;
                github::append_step_summary(&markdown).context("Failed to write job summary")?;
            }
        }
    }
    Ok(())
}

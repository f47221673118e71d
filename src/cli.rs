use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "gh-help-wanted",
    about = "Aggregate help-wanted issues and PRs into a single tracking issue",
    version
)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, env = "GH_HELP_WANTED_CONFIG")]
    pub config: Option<PathBuf>,

    /// Render and print the report without updating the tracking issue
    #[arg(long)]
    pub dry_run: bool,

    /// Verbosity level (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

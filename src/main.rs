use anyhow::{Context, Result};
use clap::Parser;
use gh_help_wanted::{
    cli::Cli, collect, error::user_friendly_error, github::GitHubClient, report, resolve, Config,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        user_friendly_error(&e).display();
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    setup_logging(cli.verbose)?;

    info!("Loading configuration");
    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;

    let client = GitHubClient::new().context("Failed to create GitHub client")?;

    println!("🔍 Resolving repositories...");
    let repos =
        resolve::resolve_repositories(&client, &config).context("Failed to resolve repositories")?;
    println!("📚 Tracking {} repositories", repos.len());

    println!("📥 Fetching open issues and PRs...");
    let buckets = collect::collect_items(&client, &repos).context("Failed to collect issues")?;
    println!(
        "✓ Collected {} items across {} project groups",
        buckets.item_count(),
        buckets.len()
    );

    let now = jiff::Timestamp::now();
    let lines = report::render_report(&buckets, &repos, now)?;
    let body = lines.join("\n");

    if cli.dry_run {
        info!("Dry run, skipping tracking issue update");
        println!("ℹ️  Dry run - tracking issue not updated");
    } else {
        let target = &config.tracking_issue;
        client
            .update_issue_body(&target.owner, &target.repo, target.number, &body)
            .with_context(|| {
                format!(
                    "Failed to update tracking issue {}/{}#{}",
                    target.owner, target.repo, target.number
                )
            })?;
        println!(
            "✓ Updated tracking issue {}/{}#{}",
            target.owner, target.repo, target.number
        );
    }

    println!("{}", body);

    Ok(())
}

fn setup_logging(verbosity: u8) -> Result<()> {
    let filter = match verbosity {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    Ok(())
}

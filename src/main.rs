//! kommit - CLI entry point.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use kommit::config::{CredentialStore, resolve_api_key, resolve_convention};
use kommit::generator::{DEFAULT_ENDPOINT, HttpGenerator};
use kommit::git::{GitCli, VersionControl, check_git_installed};
use kommit::prompt::TerminalPrompter;
use kommit::suggest::{collect_change_context, run_suggestion_loop};

/// Generate commit messages for staged changes with AI.
#[derive(Parser, Debug)]
#[command(name = "kommit")]
#[command(about = "Generate commit messages for staged changes with AI")]
#[command(version)]
struct Cli {
    /// Suggestion endpoint URL
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Repository to operate on
    #[arg(short = 'C', long = "repo", default_value = ".")]
    repo: PathBuf,

    /// API key (overrides the stored credential)
    #[arg(long)]
    api_key: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let prompter = TerminalPrompter;

    // Step 1: Check prerequisites
    check_git_installed().await.context("git is required")?;

    // Step 2: Resolve the API credential
    let api_key = match cli.api_key {
        Some(key) => key,
        None => {
            let store = CredentialStore::default_location()
                .context("Failed to locate the credential store")?;
            resolve_api_key(&store, &prompter).context("An API key is required")?
        }
    };

    // Step 3: Collect the change context (fatal when nothing is staged)
    let git = GitCli::new(&cli.repo);
    let mut ctx = collect_change_context(&git)
        .await
        .context("Failed to collect staged changes")?;

    // Step 4: Resolve the commit convention (dismissal means "none")
    ctx.convention =
        resolve_convention(&cli.repo, &prompter).context("Failed to resolve commit convention")?;

    // Step 5: Suggestion loop
    let generator = HttpGenerator::new(cli.endpoint, api_key);
    let selected = run_suggestion_loop(&ctx, &generator, &prompter)
        .await
        .context("Failed to generate commit message suggestions")?;

    // Step 6: Commit, unless the picker was dismissed
    match selected {
        Some(message) => {
            git.commit(&message)
                .await
                .context("Error creating commit")?;
            println!("Commit created with message: {}", message);
        }
        None => {
            println!("No commit message selected. Nothing committed.");
        }
    }

    Ok(())
}

/// Development-time tracing to stderr, filtered by `RUST_LOG` (default: warn).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}

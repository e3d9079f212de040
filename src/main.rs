//! gitscribe - CLI entry point.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use gitscribe::commit::{ChangeCollector, CommitExecutor};
use gitscribe::git::{Git2Backend, RepositoryHandle};
use gitscribe::llm::config::DEFAULT_API_VERSION;
use gitscribe::llm::{AzureOpenAiClient, GenerationConfig, generate_draft};
use gitscribe::review::terminal::render_preview;
use gitscribe::review::{ConsoleSurface, ReviewOutcome, run_review};

/// Generate a commit message for staged changes and review it interactively.
#[derive(Parser, Debug)]
#[command(name = "gitscribe")]
#[command(about = "Generate a commit message for staged changes and review it before committing")]
#[command(version)]
struct Cli {
    /// Path to the repository
    #[arg(short = 'C', long, default_value = ".")]
    repo: PathBuf,

    /// Display name for the repository
    #[arg(long)]
    name: Option<String>,

    /// Azure OpenAI endpoint, e.g. https://my-resource.openai.azure.com
    #[arg(long, env = "GITSCRIBE_ENDPOINT")]
    endpoint: Option<String>,

    /// API key for the endpoint
    #[arg(long, env = "GITSCRIBE_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Deployment name on the endpoint
    #[arg(long, env = "GITSCRIBE_DEPLOYMENT")]
    deployment: Option<String>,

    /// Model identifier, e.g. gpt-4o
    #[arg(long, env = "GITSCRIBE_MODEL")]
    model: Option<String>,

    /// REST API version
    #[arg(long, env = "GITSCRIBE_API_VERSION", default_value = DEFAULT_API_VERSION)]
    api_version: String,

    /// Print the suggested message without committing
    #[arg(long)]
    dry_run: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Step 1: Validate backend settings before touching the repository
    let config = GenerationConfig::new(
        cli.endpoint.as_deref().unwrap_or_default(),
        cli.api_key.as_deref().unwrap_or_default(),
        cli.deployment.as_deref().unwrap_or_default(),
        cli.model.as_deref().unwrap_or_default(),
    )
    .and_then(|c| c.with_api_version(&cli.api_version))
    .context("Invalid generation backend configuration")?;
    let generator = AzureOpenAiClient::new(config).context("Failed to set up generation backend")?;

    // Step 2: Collect staged changes
    let mut handle = RepositoryHandle::new(&cli.repo);
    if let Some(name) = &cli.name {
        handle = handle.with_name(name);
    }
    let label = handle.display_name();
    let backend = Git2Backend::new(handle);

    let patch = ChangeCollector::new(&backend)
        .collect_patch_content()
        .context("Failed to read staged changes")?;

    // Step 3: Preview only
    if cli.dry_run {
        if patch.trim().is_empty() {
            println!("No relevant changes detected.");
            return Ok(());
        }
        let draft = generate_draft(&generator, &patch)
            .await
            .context("Failed to generate commit message")?;
        println!("{}", render_preview(&draft, Some(&label)));
        return Ok(());
    }

    // Step 4: Interactive review
    let executor = CommitExecutor::new(&backend);
    let mut surface = ConsoleSurface::new().with_label(&label);

    let outcome = run_review(&patch, &generator, &executor, &mut surface)
        .await
        .context("Review aborted")?;

    if let ReviewOutcome::Committed { commit_id, .. } = outcome {
        println!("✓ Committed {}", short_id(&commit_id));
    }

    Ok(())
}

/// Install the tracing subscriber. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "gitscribe=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn short_id(id: &str) -> &str {
    id.get(..7).unwrap_or(id)
}

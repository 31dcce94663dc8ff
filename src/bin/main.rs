use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use hubcat::{Configuration, Hub, RepositoryName};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Opt {
    /// Extra configuration files, applied in order.
    #[clap(short, long, value_parser)]
    pub config: Vec<std::path::PathBuf>,
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List an owner's repositories.
    Repos {
        owner: String,
        #[clap(long)]
        page_size: Option<u32>,
        /// Only repositories last updated before this RFC 3339 timestamp.
        #[clap(long)]
        updated_before: Option<DateTime<Utc>>,
        /// Also fetch each repository's `latest` manifest list.
        #[clap(long)]
        manifests: bool,
    },
    /// List a repository's tags.
    Tags {
        repository: RepositoryName,
        #[clap(long)]
        page_size: Option<u32>,
    },
    /// Fetch a repository's manifest list.
    Manifests {
        repository: RepositoryName,
        #[clap(long, default_value = "latest")]
        reference: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Setup the logger
    tracing_subscriber::fmt()
        .with_target(true)
        .with_level(true)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let options = Opt::parse();

    let config = Configuration::config(Configuration::figment(options.config))?;
    let hub = Hub::from_config(&config).context("Failed to build HTTP client")?;

    let output = match options.command {
        Command::Repos {
            owner,
            page_size,
            updated_before,
            manifests,
        } => {
            let repos = match manifests {
                true => hub.describe(&owner, page_size, updated_before).await?,
                false => {
                    hub.catalog
                        .list_repositories(&owner, page_size, updated_before)
                        .await?
                }
            };
            serde_json::to_string_pretty(&repos)?
        }
        Command::Tags {
            repository,
            page_size,
        } => serde_json::to_string_pretty(&hub.catalog.list_tags(&repository, page_size).await?)?,
        Command::Manifests {
            repository,
            reference,
        } => serde_json::to_string_pretty(
            &hub.manifests
                .fetch_manifest_list_for(&repository, &reference)
                .await?,
        )?,
    };

    println!("{output}");

    Ok(())
}

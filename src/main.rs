use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pubpage::config::{find_config_file, load_config, Config};
use pubpage::render::{Page, PublicationsRenderer, RenderOutcome};
use pubpage::sources::OrcidClient;

/// pubpage - Fetch a researcher's publications from ORCID and render them into a web page
#[derive(Parser, Debug)]
#[command(name = "pubpage")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Fetch publications from ORCID and render them into a web page", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (can be used multiple times: -v, -vv)
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short)]
    quiet: bool,

    /// Configuration file path (defaults to ./pubpage.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch publications from ORCID and write the JSON document
    #[command(alias = "f")]
    Fetch {
        /// ORCID iD to fetch (overrides config and the ORCID_ID env var)
        #[arg(long)]
        orcid: Option<String>,

        /// Output path for the publications document
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Render the publications document into the page template
    #[command(alias = "r")]
    Render {
        /// Site base URL the document is fetched from
        #[arg(long)]
        base_url: Option<String>,

        /// Page template containing the pub-meta and pub-list regions
        #[arg(long)]
        template: Option<PathBuf>,

        /// Where to write the rendered page (defaults to in-place)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Fetch from ORCID, then render the page
    Run {
        /// ORCID iD to fetch (overrides config and the ORCID_ID env var)
        #[arg(long)]
        orcid: Option<String>,

        /// Site base URL the document is fetched from
        #[arg(long)]
        base_url: Option<String>,

        /// Page template containing the pub-meta and pub-list regions
        #[arg(long)]
        template: Option<PathBuf>,

        /// Where to write the rendered page (defaults to in-place)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match cli.config.clone().or_else(find_config_file) {
        Some(path) => load_config(&path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => Config::default(),
    };

    match cli.command {
        Commands::Fetch { orcid, out } => fetch(&config, orcid, out).await,
        Commands::Render {
            base_url,
            template,
            out,
        } => render(&config, base_url, template, out).await,
        Commands::Run {
            orcid,
            base_url,
            template,
            out,
        } => {
            fetch(&config, orcid, None).await?;
            render(&config, base_url, template, out).await
        }
    }
}

/// Fetch the ORCID record's works and write the publications document
async fn fetch(config: &Config, orcid: Option<String>, out: Option<PathBuf>) -> Result<()> {
    let orcid_id = orcid
        .or_else(|| config.orcid.id.clone())
        .context("no ORCID iD configured; pass --orcid or set ORCID_ID")?;
    let out = out.unwrap_or_else(|| config.site.document_path.clone());

    let client = OrcidClient::new(&orcid_id)?;
    let document = client.fetch_publications().await?;

    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }
    let json = serde_json::to_string_pretty(&document)?;
    std::fs::write(&out, json).with_context(|| format!("failed to write {}", out.display()))?;

    tracing::info!(count = document.count, path = %out.display(), "wrote publications document");
    Ok(())
}

/// Render the publications document into the page and write it out
async fn render(
    config: &Config,
    base_url: Option<String>,
    template: Option<PathBuf>,
    out: Option<PathBuf>,
) -> Result<()> {
    let base_url = base_url.unwrap_or_else(|| config.site.base_url.clone());
    let template = template.unwrap_or_else(|| config.site.template.clone());
    let out = out
        .or_else(|| config.site.output.clone())
        .unwrap_or_else(|| template.clone());

    let renderer = PublicationsRenderer::new(&base_url)?;
    let mut page = Page::load(&template)
        .with_context(|| format!("failed to read template {}", template.display()))?;

    match renderer.render_into(&mut page).await? {
        RenderOutcome::Rendered { items } => {
            tracing::info!(items, url = %renderer.document_url(), "rendered publications list");
        }
        RenderOutcome::Fallback => {
            tracing::warn!(url = %renderer.document_url(), "document unavailable, wrote fallback message");
        }
    }

    page.write_to(&out)
        .with_context(|| format!("failed to write {}", out.display()))?;
    tracing::info!(path = %out.display(), "wrote page");
    Ok(())
}

//! LeafScan CLI
//!
//! Same upload flow as the desktop widget, driven from the command line.
//!
//! ## Usage
//!
//! ```bash
//! # Classify one image against the default API (http://127.0.0.1:8000)
//! leafscan classify leaf.jpg
//!
//! # Point at another server, print JSON
//! leafscan classify leaf.jpg --api-url https://example.org/api --json
//!
//! # Check what the widget would make of a file, without uploading
//! leafscan inspect leaf.jpg
//! ```

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use leafscan_core::logging::LoggingBuilder;
use leafscan_core::{
    upload, Config, DropConfig, HttpClassifier, MimeFilter, Overrides, PreviewRegistry,
    SelectedFile, UploadSession,
};

/// LeafScan - leaf disease classification client
#[derive(Parser)]
#[command(name = "leafscan")]
#[command(version = "0.1.0")]
#[command(about = "LeafScan - leaf disease classification client")]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Config file (default: <config dir>/leafscan/config.json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Append warnings and errors as JSONL to this directory
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload an image to /classify and print the result
    Classify {
        /// Image file
        file: PathBuf,

        /// Classification API base URL
        #[arg(long)]
        api_url: Option<String>,

        /// Multipart field name carrying the image
        #[arg(long)]
        field: Option<String>,

        /// Print the raw result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show how a file would be treated by the drop target
    Inspect {
        /// Any file
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let (api_url, field_name) = match &cli.command {
        Commands::Classify { api_url, field, .. } => (api_url.clone(), field.clone()),
        Commands::Inspect { .. } => (None, None),
    };
    let config = Config::load(
        cli.config.as_deref(),
        Overrides {
            api_url,
            field_name,
            log_dir: cli.log_dir.clone(),
        },
    )
    .context("Failed to load configuration")?;

    LoggingBuilder::new("cli")
        .verbosity(cli.verbose)
        .logs_dir(config.log_dir.clone())
        .init()
        .context("Failed to open diagnostics log")?;

    match cli.command {
        Commands::Classify { file, json, .. } => classify(&config, &file, json).await,
        Commands::Inspect { file } => inspect(&file).await,
    }
}

async fn classify(config: &Config, path: &Path, json: bool) -> Result<()> {
    let file = SelectedFile::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let mut accepted = None;
    DropConfig::new(MimeFilter::default(), |f| accepted = Some(f))
        .offer(vec![file])
        .map_err(leafscan_core::LeafscanError::from)?;
    let file = accepted.ok_or_else(|| anyhow!("No file accepted"))?;

    let classifier = HttpClassifier::from_config(config)?;
    tracing::debug!(
        "Classifying {} via {} (field '{}')",
        file.name(),
        classifier.endpoint(),
        classifier.field_name()
    );
    let mut session = UploadSession::new(PreviewRegistry::new());

    let ticket = session.accept(file);
    let outcome = upload(&classifier, ticket).await;
    let failure = outcome.result.as_ref().err().cloned();
    session.settle(outcome);

    let result = session.result().cloned();
    session.teardown();

    match (result, failure) {
        (Some(result), _) if json => {
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(())
        }
        (Some(result), _) => {
            println!("Classification: {}", result.label);
            println!("Test Accuracy: {}%", result.accuracy);
            Ok(())
        }
        (None, Some(e)) => Err(anyhow!("Classification failed: {}", e)),
        (None, None) => Err(anyhow!("Classification failed: no result")),
    }
}

async fn inspect(path: &Path) -> Result<()> {
    let file = SelectedFile::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    println!("Name: {}", file.name());
    println!("Type: {}", file.mime());
    println!("Size: {} bytes", file.len());

    let filter = MimeFilter::default();
    if filter.matches(file.mime()) {
        println!("Accepted: yes");
    } else {
        println!("Accepted: no (expected {})", filter);
    }
    Ok(())
}

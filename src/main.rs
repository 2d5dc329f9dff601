#![allow(non_snake_case)]

mod app;
mod theme;

use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

use anyhow::Context;
use clap::Parser;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use leafscan_core::logging::LoggingBuilder;
use leafscan_core::{Config, HttpClassifier, Overrides};
use leafscan_ui::SharedClassifier;

/// Global classifier, built from the resolved config before launch
static CLASSIFIER: OnceLock<SharedClassifier> = OnceLock::new();

/// Get the classifier the window was launched with.
pub fn classifier() -> SharedClassifier {
    CLASSIFIER
        .get()
        .cloned()
        .expect("classifier is set before launch")
}

/// LeafScan - drop a leaf photo, get a diagnosis
#[derive(Parser, Debug)]
#[command(name = "leafscan-desktop")]
#[command(about = "LeafScan - drag-and-drop leaf disease classification")]
struct Args {
    /// Classification API base URL (POST <URL>/classify)
    #[arg(long, env = "LEAFSCAN_API_URL")]
    api_url: Option<String>,

    /// Multipart field name carrying the image
    #[arg(long)]
    field: Option<String>,

    /// Config file (default: <config dir>/leafscan/config.json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Append warnings and errors as JSONL to this directory
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = Config::load(
        args.config.as_deref(),
        Overrides {
            api_url: args.api_url,
            field_name: args.field,
            log_dir: args.log_dir,
        },
    )
    .context("Failed to load configuration")?;

    let log_path = LoggingBuilder::new("desktop")
        .default_level("info")
        .verbosity(args.verbose)
        .logs_dir(config.log_dir.clone())
        .init()
        .context("Failed to open diagnostics log")?;

    let classifier = HttpClassifier::from_config(&config)?;
    tracing::info!(
        "Starting LeafScan against {} (field '{}')",
        classifier.endpoint(),
        classifier.field_name()
    );
    if let Some(path) = log_path {
        tracing::info!("Diagnostics log: {}", path.display());
    }
    let _ = CLASSIFIER.set(Arc::new(classifier));

    let config = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("LeafScan")
            .with_inner_size(dioxus::desktop::LogicalSize::new(520.0, 720.0))
            .with_resizable(true),
    );

    dioxus::LaunchBuilder::desktop()
        .with_cfg(config)
        .launch(app::App);

    Ok(())
}

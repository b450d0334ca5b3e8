//! vbadge CLI: badge browser tabs with mentions found in a markdown vault
//!
//! Commands: lookup, watch, message, click, completions

mod config;
mod host;

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use serde_json::json;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use vbadge_broker::{ActionClickHandler, BackgroundRequest, PermissionMessageBroker};
use vbadge_core::{BadgeBoard, BadgeSink, TabId};
use vbadge_pipeline::{CycleOutcome, NavigationEvent, ServiceWorker, TabNavigationWatcher};
use vbadge_vault::{FileSettingsStore, VaultClient};

use crate::config::AppConfig;
use crate::host::{ConfigRuntime, JsonLinesBadge, LoggingInjector};

const EVENT_CHANNEL_CAPACITY: usize = 64;

#[derive(Parser)]
#[command(name = "vbadge")]
#[command(version)]
#[command(about = "Badge browser tabs with mentions found in a markdown vault")]
struct Cli {
    /// Saved connection settings (JSON as stored by the extension, or TOML)
    #[arg(long, global = true, default_value = "settings.json")]
    settings: PathBuf,

    /// Application config (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// More log output (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Run one navigation for a URL and print the resulting badge
    Lookup {
        url: String,
        /// Tab to attribute the navigation to
        #[arg(long, default_value_t = 1)]
        tab: u32,
    },
    /// Read NDJSON tab events from stdin and print every badge call
    Watch,
    /// Answer one popup message given as JSON
    Message { json: String },
    /// Simulate a toolbar icon click
    Click {
        #[arg(long)]
        tab: Option<u32>,
    },
    /// Generate shell completions
    Completions { shell: clap_complete::Shell },
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn outcome_label(outcome: CycleOutcome) -> &'static str {
    match outcome {
        CycleOutcome::Skipped => "skipped",
        CycleOutcome::Reconciled { .. } => "reconciled",
        CycleOutcome::Errored => "errored",
        CycleOutcome::Superseded => "superseded",
        CycleOutcome::Closed => "closed",
    }
}

fn build_watcher(
    cli: &Cli,
    config: &AppConfig,
    badge: Arc<dyn BadgeSink>,
) -> anyhow::Result<TabNavigationWatcher> {
    let client = Arc::new(
        VaultClient::new(config.vault.clone()).context("Failed to set up vault client")?,
    );
    let settings = Arc::new(FileSettingsStore::new(&cli.settings));
    Ok(TabNavigationWatcher::new(settings, client.clone(), client, badge))
}

async fn lookup(cli: &Cli, config: &AppConfig, url: &str, tab: TabId) -> anyhow::Result<()> {
    let board = Arc::new(BadgeBoard::new());
    let watcher = build_watcher(cli, config, board.clone())?;

    let outcome = watcher.handle(NavigationEvent::loading(tab, url)).await;
    if outcome == CycleOutcome::Skipped {
        tracing::warn!(
            settings = %cli.settings.display(),
            "lookup skipped: vault host or API key not configured"
        );
    }

    let report = json!({
        "tabId": tab,
        "url": url,
        "outcome": outcome_label(outcome),
        "badge": board.state(tab),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

async fn watch(cli: &Cli, config: &AppConfig) -> anyhow::Result<()> {
    let badge = Arc::new(JsonLinesBadge::default());
    let worker = ServiceWorker::new(Arc::new(build_watcher(cli, config, badge)?));

    let (tx, rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
    let dispatcher = worker
        .register(rx)
        .context("navigation listener already registered")?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<NavigationEvent>(&line) {
            Ok(event) => {
                if tx.send(event).await.is_err() {
                    break;
                }
            }
            Err(e) => tracing::warn!(error = %e, line = %line, "skipping malformed event"),
        }
    }

    drop(tx);
    dispatcher.await.context("navigation dispatcher failed")?;
    Ok(())
}

async fn message(config: &AppConfig, raw: &str) -> anyhow::Result<()> {
    let request: BackgroundRequest =
        serde_json::from_str(raw).context("Message is not a known request")?;
    let broker = Arc::new(PermissionMessageBroker::new(Arc::new(ConfigRuntime::new(
        config.runtime.clone(),
    ))));
    let reply = broker
        .dispatch(request)
        .await
        .context("Broker dropped the request without replying")?;
    println!("{}", serde_json::to_string(&reply)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = AppConfig::load(cli.config.as_deref())?;

    match &cli.command {
        Commands::Lookup { url, tab } => lookup(&cli, &config, url, TabId(*tab)).await?,
        Commands::Watch => watch(&cli, &config).await?,
        Commands::Message { json } => message(&config, json).await?,
        Commands::Click { tab } => {
            let handler = ActionClickHandler::new(Arc::new(LoggingInjector));
            handler.on_clicked(tab.map(TabId)).await;
        }
        Commands::Completions { shell } => {
            clap_complete::generate(*shell, &mut Cli::command(), "vbadge", &mut io::stdout());
        }
    }
    Ok(())
}

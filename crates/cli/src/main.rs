mod cmd;
mod output;
mod update;

#[cfg(test)]
mod testutil;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use protoc_vendored::VendoredStore;
use tracing_subscriber::EnvFilter;

use crate::cmd::{cmd_info, cmd_update, cmd_verify};
use crate::output::OutputFormat;

/// protoc-vendored - maintain the vendored protoc store
#[derive(Parser)]
#[command(name = "protoc-vendored")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Download a protoc release and rewrite the store with it
  Update {
    /// Store root (default: $PROTOC_VENDORED_STORE or the protoc-vendored crate directory)
    #[arg(long)]
    store: Option<PathBuf>,

    /// Release tag to vendor instead of the latest (e.g. v29.3)
    #[arg(long)]
    tag: Option<String>,
  },

  /// Show the protoc binary resolved for this platform
  Info {
    /// Store root (default: $PROTOC_VENDORED_STORE or the protoc-vendored crate directory)
    #[arg(long)]
    store: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
  },

  /// Check that every target binary and the include bundle are present
  Verify {
    /// Store root (default: $PROTOC_VENDORED_STORE or the protoc-vendored crate directory)
    #[arg(long)]
    store: Option<PathBuf>,
  },
}

fn open_store(store: Option<PathBuf>) -> VendoredStore {
  store.map(VendoredStore::new).unwrap_or_else(VendoredStore::locate)
}

#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();

  let filter = EnvFilter::try_from_default_env()
    .unwrap_or_else(|_| EnvFilter::new(if cli.verbose { "debug" } else { "info" }));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  match cli.command {
    Commands::Update { store, tag } => cmd_update(open_store(store), tag).await,
    Commands::Info { store, format } => cmd_info(open_store(store), format),
    Commands::Verify { store } => cmd_verify(open_store(store)),
  }
}

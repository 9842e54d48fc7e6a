//! Implementation of the `protoc-vendored update` command.
//!
//! Downloads one upstream protobuf release and rewrites the store with its
//! `protoc` binaries, include bundle and tag.

use std::time::Instant;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use protoc_vendored::VendoredStore;

use crate::output::{format_bytes, format_duration, print_success, symbols};
use crate::update::release::{ReleaseClient, ReleaseSource};
use crate::update::{UpdateOptions, update_store};

/// Execute the update command.
///
/// # Arguments
///
/// * `store` - The store to rewrite.
/// * `tag` - Release tag to vendor. If `None`, the latest release is used.
///
/// # Errors
///
/// Returns an error on any network or extraction failure. Files written before
/// the failure are left in place.
pub async fn cmd_update(store: VendoredStore, tag: Option<String>) -> Result<()> {
  let start = Instant::now();
  let client = ReleaseClient::new(ReleaseSource::from_env()).context("Failed to create HTTP client")?;

  let summary = update_store(&store, &client, &UpdateOptions { tag })
    .await
    .with_context(|| format!("Failed to update store at {}", store.root().display()))?;

  for binary in &summary.binaries {
    println!(
      "  {} {} {} {}",
      symbols::ADD.green(),
      binary.target.id().cyan(),
      format!("({})", format_bytes(binary.size)).dimmed(),
      binary.path.display().dimmed()
    );
  }
  println!(
    "  {} include: {} files",
    symbols::ADD.green(),
    summary.include_files
  );
  println!();

  match summary.previous.as_deref() {
    Some(previous) if previous != summary.tag => print_success(&format!(
      "Updated protoc {} {} {}",
      previous,
      symbols::ARROW,
      summary.tag.green()
    )),
    Some(_) => print_success(&format!("Re-vendored protoc {}", summary.tag)),
    None => print_success(&format!("Vendored protoc {}", summary.tag.green())),
  }
  println!(
    "  {} Duration: {}",
    symbols::INFO.dimmed(),
    format_duration(start.elapsed()).dimmed()
  );

  Ok(())
}

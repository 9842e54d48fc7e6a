use std::path::PathBuf;

use anyhow::Result;
use protoc_vendored::{Platform, SupportedTarget, VendoredStore};
use serde::Serialize;

use crate::output::{OutputFormat, print_info, print_json, print_stat};

#[derive(Debug, Serialize)]
struct Info {
  store: PathBuf,
  platform: Option<String>,
  target: Option<String>,
  binary: Option<PathBuf>,
  include: Option<PathBuf>,
  version: Option<String>,
  errors: Vec<String>,
}

/// Show what the resolver returns on this machine.
pub fn cmd_info(store: VendoredStore, format: OutputFormat) -> Result<()> {
  let mut errors = Vec::new();
  let platform = Platform::current();
  let target = platform.and_then(SupportedTarget::for_platform);

  let binary = store.binary_path().map_err(|e| errors.push(e.to_string())).ok();
  let include = store.include_path().map_err(|e| errors.push(e.to_string())).ok();
  let version = store.version().map_err(|e| errors.push(e.to_string())).ok();

  let info = Info {
    store: store.root().to_path_buf(),
    platform: platform.map(|p| p.triple()),
    target: target.map(|t| t.id().to_string()),
    binary,
    include,
    version,
    errors,
  };

  if format.is_json() {
    return print_json(&info);
  }

  let none = || "-".to_string();
  print_info(&format!("protoc-vendored v{}", env!("CARGO_PKG_VERSION")));
  print_stat("Store", &info.store.display().to_string());
  print_stat(
    "Platform",
    &info
      .platform
      .clone()
      .unwrap_or_else(|| format!("{}-{}", std::env::consts::ARCH, std::env::consts::OS)),
  );
  print_stat("Target", info.target.as_deref().unwrap_or("unsupported"));
  print_stat(
    "Binary",
    &info.binary.as_ref().map(|p| p.display().to_string()).unwrap_or_else(none),
  );
  print_stat(
    "Include",
    &info.include.as_ref().map(|p| p.display().to_string()).unwrap_or_else(none),
  );
  print_stat("Version", &info.version.clone().unwrap_or_else(none));
  for error in &info.errors {
    print_stat("Error", error);
  }

  Ok(())
}

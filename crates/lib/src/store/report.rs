use std::path::PathBuf;

use crate::target::SupportedTarget;

/// Presence of one target's binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetStatus {
  pub target: SupportedTarget,
  /// Where the binary is expected to live.
  pub path: PathBuf,
  pub present: bool,
}

/// Result of [`VendoredStore::verify`](crate::VendoredStore::verify).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreReport {
  /// One entry per [`SupportedTarget::ALL`], in the same order.
  pub targets: Vec<TargetStatus>,
  pub include_dir: PathBuf,
  pub include_present: bool,
  /// Number of `.proto` files found under the include directory.
  pub proto_files: usize,
  pub version: Option<String>,
  /// Files in `bin/` that belong to no supported target.
  pub unexpected: Vec<PathBuf>,
}

impl StoreReport {
  pub fn missing(&self) -> impl Iterator<Item = &TargetStatus> {
    self.targets.iter().filter(|s| !s.present)
  }

  /// True when every target binary and the include bundle are present.
  pub fn is_complete(&self) -> bool {
    self.include_present && self.targets.iter().all(|s| s.present)
  }
}

//! Error types for protoc-vendored.

use std::path::PathBuf;

use thiserror::Error;

/// Errors returned by the vendored store accessors.
#[derive(Debug, Error)]
pub enum Error {
  /// No vendored binary exists for this OS/architecture pair.
  #[error("protoc binary cannot be found for platform {os}-{arch}")]
  UnsupportedPlatform { os: String, arch: String },

  /// The platform is supported, but the store lacks the expected file or directory.
  #[error("vendored asset is missing: {}", path.display())]
  MissingAsset { path: PathBuf },

  /// Any other filesystem failure while reading the store.
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
}

/// Result type for store operations
pub type Result<T> = std::result::Result<T, Error>;

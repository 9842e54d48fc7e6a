use std::path::PathBuf;

use crate::consts::STORE_ENV_VAR;

/// Returns the store root, honouring `PROTOC_VENDORED_STORE` when set.
pub fn store_root() -> PathBuf {
  match std::env::var_os(STORE_ENV_VAR) {
    Some(path) if !path.is_empty() => PathBuf::from(path),
    _ => default_store_root(),
  }
}

/// The store shipped inside this crate, next to its `Cargo.toml`.
pub fn default_store_root() -> PathBuf {
  PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

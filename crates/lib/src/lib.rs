//! `protoc` binaries downloaded and stored inside the crate.
//!
//! Lets build scripts run `protoc` without installing it:
//!
//! ```no_run
//! let protoc = protoc_vendored::binary_path().unwrap();
//! let include = protoc_vendored::include_path().unwrap();
//! # let _ = (protoc, include);
//! ```
//!
//! The store lives next to this crate's `Cargo.toml` and is refreshed with
//! `protoc-vendored update`. Set `PROTOC_VENDORED_STORE` to use a store
//! elsewhere.

pub mod consts;
pub mod error;
pub mod platform;
pub mod store;
pub mod target;

use std::path::PathBuf;

pub use error::{Error, Result};
pub use platform::{Arch, Os, Platform};
pub use store::VendoredStore;
pub use store::report::{StoreReport, TargetStatus};
pub use target::SupportedTarget;

/// Return a path to the `protoc` binary for the running platform.
///
/// Fails with [`Error::UnsupportedPlatform`] when no binary is vendored for the
/// current OS and architecture, and with [`Error::MissingAsset`] when one
/// should be but the file is absent.
pub fn binary_path() -> Result<PathBuf> {
  VendoredStore::locate().binary_path()
}

/// Alias of [`binary_path`].
pub fn protoc_bin_path() -> Result<PathBuf> {
  binary_path()
}

/// Return a path to the directory of `.proto` files bundled with `protoc`.
pub fn include_path() -> Result<PathBuf> {
  VendoredStore::locate().include_path()
}

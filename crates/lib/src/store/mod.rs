//! The vendored asset store and the resolver over it.
//!
//! # Layout
//!
//! ```text
//! <root>/
//! ├── bin/
//! │   ├── protoc-linux-x86_64     # one binary per SupportedTarget
//! │   ├── ...
//! │   └── protoc-win32.exe
//! ├── include/                    # .proto files shipped with protoc
//! │   └── google/protobuf/...
//! └── version.txt                 # upstream release tag, informational
//! ```
//!
//! The store is read-only at runtime; every lookup only stats and
//! canonicalizes paths, so a [`VendoredStore`] can be shared freely between
//! threads.

pub mod paths;
pub mod report;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::consts::{BIN_DIR, INCLUDE_DIR, VERSION_FILE};
use crate::error::{Error, Result};
use crate::platform::Platform;
use crate::target::SupportedTarget;
use report::{StoreReport, TargetStatus};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendoredStore {
  root: PathBuf,
}

impl VendoredStore {
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self { root: root.into() }
  }

  /// The store at the configured root (see [`paths::store_root`]).
  pub fn locate() -> Self {
    Self::new(paths::store_root())
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  pub fn bin_dir(&self) -> PathBuf {
    self.root.join(BIN_DIR)
  }

  pub fn include_dir(&self) -> PathBuf {
    self.root.join(INCLUDE_DIR)
  }

  pub fn version_file(&self) -> PathBuf {
    self.root.join(VERSION_FILE)
  }

  /// Where `target`'s binary lives, whether or not it exists.
  pub fn binary_file(&self, target: SupportedTarget) -> PathBuf {
    self.bin_dir().join(target.binary_file_name())
  }

  /// Path to the binary for the running platform.
  pub fn binary_path(&self) -> Result<PathBuf> {
    self.binary_path_for(Platform::detect()?)
  }

  /// Path to the binary for `platform`.
  ///
  /// # Errors
  ///
  /// - [`Error::UnsupportedPlatform`] if `platform` has no target
  /// - [`Error::MissingAsset`] if the target's binary is not in the store
  pub fn binary_path_for(&self, platform: Platform) -> Result<PathBuf> {
    let target = SupportedTarget::for_platform(platform).ok_or_else(|| Error::UnsupportedPlatform {
      os: platform.os.to_string(),
      arch: platform.arch.to_string(),
    })?;
    self.target_binary_path(target)
  }

  /// Path to `target`'s binary, checked for existence.
  pub fn target_binary_path(&self, target: SupportedTarget) -> Result<PathBuf> {
    let path = self.binary_file(target);
    if !path.is_file() {
      return Err(Error::MissingAsset { path });
    }
    let path = dunce::canonicalize(&path)?;
    debug!(id = %target, path = ?path, "resolved protoc binary");
    Ok(path)
  }

  /// Path to the include bundle; the same on every platform.
  pub fn include_path(&self) -> Result<PathBuf> {
    let path = self.include_dir();
    if !path.is_dir() {
      return Err(Error::MissingAsset { path });
    }
    Ok(dunce::canonicalize(&path)?)
  }

  /// The vendored release tag, with surrounding whitespace removed.
  pub fn version(&self) -> Result<String> {
    let path = self.version_file();
    match fs::read_to_string(&path) {
      Ok(content) => Ok(content.trim().to_string()),
      Err(e) if e.kind() == io::ErrorKind::NotFound => Err(Error::MissingAsset { path }),
      Err(e) => Err(e.into()),
    }
  }

  /// Check the store against every supported target.
  pub fn verify(&self) -> Result<StoreReport> {
    let targets: Vec<TargetStatus> = SupportedTarget::ALL
      .into_iter()
      .map(|target| {
        let path = self.binary_file(target);
        TargetStatus {
          target,
          present: path.is_file(),
          path,
        }
      })
      .collect();

    let mut unexpected = Vec::new();
    match fs::read_dir(self.bin_dir()) {
      Ok(entries) => {
        for entry in entries {
          let path = entry?.path();
          if !targets.iter().any(|s| s.path == path) {
            unexpected.push(path);
          }
        }
      }
      Err(e) if e.kind() == io::ErrorKind::NotFound => {}
      Err(e) => return Err(e.into()),
    }
    unexpected.sort();

    let include_dir = self.include_dir();
    let include_present = include_dir.is_dir();
    let proto_files = if include_present {
      WalkDir::new(&include_dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && e.path().extension().is_some_and(|ext| ext == "proto"))
        .count()
    } else {
      0
    };

    let version = match self.version() {
      Ok(v) => Some(v),
      Err(Error::MissingAsset { .. }) => None,
      Err(e) => return Err(e),
    };

    debug!(root = ?self.root, proto_files, "verified store");

    Ok(StoreReport {
      targets,
      include_dir,
      include_present,
      proto_files,
      version,
      unexpected,
    })
  }
}

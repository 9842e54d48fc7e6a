//! Refresh of the vendored store from an upstream protobuf release.
//!
//! Targets are processed one at a time. A failure aborts the run and leaves
//! whatever was already written in place, without a version marker; re-run to
//! completion to restore a consistent store.

pub mod archive;
pub mod release;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use protoc_vendored::{SupportedTarget, VendoredStore};
use thiserror::Error;
use tracing::info;

use release::{ReleaseClient, tag_version};

/// The archive the include bundle is taken from.
pub const INCLUDE_SOURCE: SupportedTarget = SupportedTarget::LinuxX86_64;

/// Errors that can occur during update.
#[derive(Debug, Error)]
pub enum UpdateError {
  #[error("fetch failed for {url}: {message}")]
  Fetch { url: String, message: String },

  #[error("http client error: {0}")]
  Client(#[from] reqwest::Error),

  #[error("invalid archive {name}: {message}")]
  Archive { name: String, message: String },

  #[error("archive {archive} has no entry {entry}")]
  EntryMissing { archive: String, entry: String },

  #[error("io error: {0}")]
  Io(#[from] io::Error),
}

#[derive(Debug, Default)]
pub struct UpdateOptions {
  /// Release tag to vendor. The latest release is used when `None`.
  pub tag: Option<String>,
}

#[derive(Debug)]
pub struct VendoredBinary {
  pub target: SupportedTarget,
  pub path: PathBuf,
  pub size: u64,
}

#[derive(Debug)]
pub struct UpdateSummary {
  pub tag: String,
  /// Tag recorded in the store before this run, if any.
  pub previous: Option<String>,
  pub binaries: Vec<VendoredBinary>,
  pub include_files: usize,
}

/// Rewrite `store` with the binaries and include bundle of one upstream release.
pub async fn update_store(
  store: &VendoredStore,
  client: &ReleaseClient,
  options: &UpdateOptions,
) -> Result<UpdateSummary, UpdateError> {
  let previous = store.version().ok();
  let tag = match &options.tag {
    Some(tag) => tag.clone(),
    None => client.latest_tag().await?,
  };
  let version = tag_version(&tag);

  info!(tag = %tag, store = ?store.root(), "updating vendored protoc");

  // The marker goes first: a run that stops midway must not claim any release.
  remove_file_if_exists(&store.version_file())?;
  reset_dir(&store.bin_dir())?;
  reset_dir(&store.include_dir())?;

  let mut binaries = Vec::with_capacity(SupportedTarget::ALL.len());
  let mut include_files = 0;

  for target in SupportedTarget::ALL {
    let archive_name = target.archive_name(version);
    let bytes = client.download_archive(&tag, target).await?;

    let path = store.binary_file(target);
    let size = archive::extract_binary(&bytes, &archive_name, target, &path)?;
    info!(id = %target, size, "vendored binary");

    if target == INCLUDE_SOURCE {
      include_files = archive::extract_include(&bytes, &archive_name, &store.include_dir())?;
      info!(files = include_files, "vendored include bundle");
    }

    binaries.push(VendoredBinary { target, path, size });
  }

  fs::write(store.version_file(), format!("{}\n", tag))?;

  Ok(UpdateSummary {
    tag,
    previous,
    binaries,
    include_files,
  })
}

fn remove_file_if_exists(path: &Path) -> io::Result<()> {
  match fs::remove_file(path) {
    Ok(()) => Ok(()),
    Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
    Err(e) => Err(e),
  }
}

/// Remove `path` if present and recreate it empty.
fn reset_dir(path: &Path) -> io::Result<()> {
  match fs::remove_dir_all(path) {
    Ok(()) => {}
    Err(e) if e.kind() == io::ErrorKind::NotFound => {}
    Err(e) => return Err(e),
  }
  fs::create_dir_all(path)
}

#[cfg(test)]
mod tests {
  use super::release::{ReleaseSource, UPSTREAM_REPO};
  use super::*;
  use crate::testutil::protoc_archive;
  use tempfile::TempDir;

  fn source_for(server: &mockito::Server) -> ReleaseSource {
    ReleaseSource {
      api_base: server.url(),
      web_base: server.url(),
      repo: UPSTREAM_REPO.to_string(),
      token: None,
    }
  }

  fn binary_payload(target: SupportedTarget) -> Vec<u8> {
    format!("protoc for {}", target.id()).into_bytes()
  }

  /// Serve every target's archive for `tag`.
  async fn mock_archives(server: &mut mockito::Server, tag: &str) -> Vec<mockito::Mock> {
    let mut mocks = Vec::new();
    for target in SupportedTarget::ALL {
      let path = format!(
        "/{}/releases/download/{}/{}",
        UPSTREAM_REPO,
        tag,
        target.archive_name(tag_version(tag))
      );
      let body = protoc_archive(target, &binary_payload(target), true);
      let mock = server
        .mock("GET", path.as_str())
        .with_status(200)
        .with_header("content-type", "application/zip")
        .with_body(body)
        .create_async()
        .await;
      mocks.push(mock);
    }
    mocks
  }

  #[tokio::test]
  async fn update_populates_every_target() {
    let mut server = mockito::Server::new_async().await;
    let latest = server
      .mock("GET", "/repos/protocolbuffers/protobuf/releases/latest")
      .with_status(200)
      .with_header("content-type", "application/json")
      .with_body(r#"{"tag_name": "v29.3"}"#)
      .create_async()
      .await;
    let archives = mock_archives(&mut server, "v29.3").await;

    let temp = TempDir::new().unwrap();
    let store = VendoredStore::new(temp.path());
    fs::create_dir_all(store.bin_dir()).unwrap();
    fs::write(store.bin_dir().join("protoc-stale"), b"old").unwrap();
    fs::write(store.version_file(), "v28.0\n").unwrap();

    let client = ReleaseClient::new(source_for(&server)).unwrap();
    let summary = update_store(&store, &client, &UpdateOptions::default()).await.unwrap();

    latest.assert_async().await;
    for mock in &archives {
      mock.assert_async().await;
    }

    assert_eq!(summary.tag, "v29.3");
    assert_eq!(summary.previous.as_deref(), Some("v28.0"));
    assert_eq!(summary.binaries.len(), SupportedTarget::ALL.len());
    assert_eq!(summary.include_files, 2);

    let report = store.verify().unwrap();
    assert!(report.is_complete());
    assert!(report.unexpected.is_empty());
    assert_eq!(report.version.as_deref(), Some("v29.3"));

    for target in SupportedTarget::ALL {
      let path = store.binary_path_for(target.canonical_platform()).unwrap();
      assert_eq!(fs::read(path).unwrap(), binary_payload(target));
    }
    assert!(
      store
        .include_path()
        .unwrap()
        .join("google/protobuf/descriptor.proto")
        .is_file()
    );
  }

  #[tokio::test]
  async fn pinned_tag_skips_release_lookup() {
    let mut server = mockito::Server::new_async().await;
    let latest = server
      .mock("GET", "/repos/protocolbuffers/protobuf/releases/latest")
      .expect(0)
      .create_async()
      .await;
    let _archives = mock_archives(&mut server, "v28.2").await;

    let temp = TempDir::new().unwrap();
    let store = VendoredStore::new(temp.path());
    let client = ReleaseClient::new(source_for(&server)).unwrap();
    let options = UpdateOptions {
      tag: Some("v28.2".to_string()),
    };

    let summary = update_store(&store, &client, &options).await.unwrap();

    latest.assert_async().await;
    assert_eq!(summary.tag, "v28.2");
    assert_eq!(summary.previous, None);
    assert_eq!(store.version().unwrap(), "v28.2");
  }

  #[tokio::test]
  async fn missing_archive_aborts_without_version_marker() {
    let mut server = mockito::Server::new_async().await;
    // Only the first target is published; everything else falls through to mockito's 501.
    let first = SupportedTarget::ALL[0];
    let _archive = server
      .mock(
        "GET",
        format!(
          "/{}/releases/download/v29.3/{}",
          UPSTREAM_REPO,
          first.archive_name("29.3")
        )
        .as_str(),
      )
      .with_status(200)
      .with_body(protoc_archive(first, b"protoc", false))
      .create_async()
      .await;

    let temp = TempDir::new().unwrap();
    let store = VendoredStore::new(temp.path());
    let client = ReleaseClient::new(source_for(&server)).unwrap();
    let options = UpdateOptions {
      tag: Some("v29.3".to_string()),
    };

    let err = update_store(&store, &client, &options).await.unwrap_err();
    match err {
      UpdateError::Fetch { url, .. } => assert!(url.ends_with(&SupportedTarget::ALL[1].archive_name("29.3"))),
      other => panic!("expected fetch error, got {other}"),
    }

    assert!(store.binary_file(first).is_file());
    assert!(!store.version_file().exists());
    assert!(!store.verify().unwrap().is_complete());
  }

  #[tokio::test]
  async fn failed_update_clears_previous_version_marker() {
    // No archives are published, so every download falls through to mockito's 501.
    let server = mockito::Server::new_async().await;

    let temp = TempDir::new().unwrap();
    let store = VendoredStore::new(temp.path());
    fs::create_dir_all(store.bin_dir()).unwrap();
    for target in SupportedTarget::ALL {
      fs::write(store.binary_file(target), b"old protoc").unwrap();
    }
    fs::create_dir_all(store.include_dir()).unwrap();
    fs::write(store.version_file(), "v28.0\n").unwrap();
    assert!(store.verify().unwrap().is_complete());

    let client = ReleaseClient::new(source_for(&server)).unwrap();
    let options = UpdateOptions {
      tag: Some("v29.3".to_string()),
    };

    let err = update_store(&store, &client, &options).await.unwrap_err();
    assert!(matches!(err, UpdateError::Fetch { .. }), "{err}");

    assert!(!store.version_file().exists());
    let report = store.verify().unwrap();
    assert_eq!(report.version, None);
    assert!(!report.is_complete());
  }

  #[test]
  fn reset_dir_clears_contents() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("bin");
    fs::create_dir_all(dir.join("nested")).unwrap();
    fs::write(dir.join("nested").join("file"), b"x").unwrap();

    reset_dir(&dir).unwrap();

    assert!(dir.is_dir());
    assert_eq!(fs::read_dir(&dir).unwrap().count(), 0);
  }

  #[test]
  fn reset_dir_creates_missing() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("include");
    reset_dir(&dir).unwrap();
    assert!(dir.is_dir());
  }
}

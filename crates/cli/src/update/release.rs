//! Upstream release discovery and archive download.

use protoc_vendored::SupportedTarget;
use serde::Deserialize;
use tracing::{debug, info};

use super::UpdateError;

pub const DEFAULT_API_BASE: &str = "https://api.github.com";
pub const DEFAULT_WEB_BASE: &str = "https://github.com";
pub const UPSTREAM_REPO: &str = "protocolbuffers/protobuf";

/// Environment variable holding an optional GitHub API token.
pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

const USER_AGENT: &str = concat!("protoc-vendored/", env!("CARGO_PKG_VERSION"));

/// Where releases are looked up and downloaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseSource {
  pub api_base: String,
  pub web_base: String,
  pub repo: String,
  pub token: Option<String>,
}

impl Default for ReleaseSource {
  fn default() -> Self {
    Self {
      api_base: DEFAULT_API_BASE.to_string(),
      web_base: DEFAULT_WEB_BASE.to_string(),
      repo: UPSTREAM_REPO.to_string(),
      token: None,
    }
  }
}

impl ReleaseSource {
  /// Upstream GitHub, authenticated with `GITHUB_TOKEN` if it is set.
  pub fn from_env() -> Self {
    Self {
      token: std::env::var(TOKEN_ENV_VAR).ok().filter(|t| !t.is_empty()),
      ..Self::default()
    }
  }

  pub fn latest_release_url(&self) -> String {
    format!("{}/repos/{}/releases/latest", self.api_base, self.repo)
  }

  pub fn archive_url(&self, tag: &str, target: SupportedTarget) -> String {
    format!(
      "{}/{}/releases/download/{}/{}",
      self.web_base,
      self.repo,
      tag,
      target.archive_name(tag_version(tag))
    )
  }
}

/// Strip the leading `v` from a release tag (`v29.3` → `29.3`).
pub fn tag_version(tag: &str) -> &str {
  tag.strip_prefix('v').unwrap_or(tag)
}

#[derive(Debug, Deserialize)]
struct Release {
  tag_name: String,
}

/// HTTP client bound to a [`ReleaseSource`].
pub struct ReleaseClient {
  http: reqwest::Client,
  source: ReleaseSource,
}

impl ReleaseClient {
  pub fn new(source: ReleaseSource) -> Result<Self, UpdateError> {
    let http = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
    Ok(Self { http, source })
  }

  /// Tag of the newest non-prerelease upstream release.
  pub async fn latest_tag(&self) -> Result<String, UpdateError> {
    let url = self.source.latest_release_url();
    info!(url = %url, "looking up latest release");

    let mut request = self.http.get(&url).header("accept", "application/vnd.github+json");
    if let Some(token) = &self.source.token {
      request = request.bearer_auth(token);
    }

    let response = request.send().await.map_err(|e| fetch_error(&url, e))?;
    if !response.status().is_success() {
      return Err(UpdateError::Fetch {
        url,
        message: format!("HTTP {}", response.status()),
      });
    }

    let release: Release = response.json().await.map_err(|e| fetch_error(&url, e))?;
    debug!(tag = %release.tag_name, "latest release");
    Ok(release.tag_name)
  }

  /// Download the release archive for `target` into memory.
  pub async fn download_archive(&self, tag: &str, target: SupportedTarget) -> Result<Vec<u8>, UpdateError> {
    let url = self.source.archive_url(tag, target);
    info!(url = %url, "fetching archive");

    let response = self.http.get(&url).send().await.map_err(|e| fetch_error(&url, e))?;
    if !response.status().is_success() {
      return Err(UpdateError::Fetch {
        url,
        message: format!("HTTP {}", response.status()),
      });
    }

    let bytes = response.bytes().await.map_err(|e| fetch_error(&url, e))?;
    debug!(url = %url, size = bytes.len(), "download complete");
    Ok(bytes.to_vec())
  }
}

fn fetch_error(url: &str, e: reqwest::Error) -> UpdateError {
  UpdateError::Fetch {
    url: url.to_string(),
    message: e.to_string(),
  }
}

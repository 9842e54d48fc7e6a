pub mod arch;
pub mod os;

pub use arch::Arch;
pub use os::Os;

use std::fmt;

use crate::error::Error;

/// Platform identifier combining architecture and OS (e.g., "x86_64-linux")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Platform {
  pub arch: Arch,
  pub os: Os,
}

impl Platform {
  /// Create a new platform identifier
  pub fn new(arch: Arch, os: Os) -> Self {
    Self { arch, os }
  }

  /// Detect the current platform at runtime
  ///
  /// Returns `None` if the OS or architecture has no name in this crate
  pub fn current() -> Option<Self> {
    Some(Self {
      arch: Arch::current()?,
      os: Os::current()?,
    })
  }

  /// Like [`Platform::current`], but reports the raw platform constants on failure
  pub fn detect() -> Result<Self, Error> {
    Self::current().ok_or_else(|| Error::UnsupportedPlatform {
      os: std::env::consts::OS.to_string(),
      arch: std::env::consts::ARCH.to_string(),
    })
  }

  /// Parse `std::env::consts`-style names into a platform
  pub fn from_names(os: &str, arch: &str) -> Result<Self, Error> {
    match (Os::from_name(os), Arch::from_name(arch)) {
      (Some(os), Some(arch)) => Ok(Self { arch, os }),
      _ => Err(Error::UnsupportedPlatform {
        os: os.to_string(),
        arch: arch.to_string(),
      }),
    }
  }

  /// Returns the platform triple string (e.g., "x86_64-linux")
  pub fn triple(&self) -> String {
    format!("{}-{}", self.arch, self.os)
  }
}

impl fmt::Display for Platform {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.triple())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn platform_triple_format() {
    let platform = Platform::new(Arch::Aarch64, Os::MacOs);
    assert_eq!(platform.triple(), "aarch64-macos");

    let platform = Platform::new(Arch::X86_64, Os::Linux);
    assert_eq!(platform.triple(), "x86_64-linux");
  }

  #[test]
  fn from_names_keeps_raw_names_on_failure() {
    let err = Platform::from_names("freebsd", "x86_64").unwrap_err();
    match err {
      Error::UnsupportedPlatform { os, arch } => {
        assert_eq!(os, "freebsd");
        assert_eq!(arch, "x86_64");
      }
      other => panic!("unexpected error: {other}"),
    }
  }

  #[test]
  fn from_names_parses_known_pair() {
    let platform = Platform::from_names("windows", "x86").unwrap();
    assert_eq!(platform, Platform::new(Arch::X86, Os::Windows));
  }
}

//! The fixed set of targets the store carries a binary for.
//!
//! The (OS, architecture) → target mapping is one explicit `match`, so adding
//! or dropping a target is a single change and anything unlisted is
//! unsupported rather than falling through to a neighbour.

use std::fmt;

use crate::consts::{BIN_DIR, BINARY_STEM};
use crate::platform::{Arch, Os, Platform};

/// A platform for which upstream publishes a prebuilt `protoc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SupportedTarget {
  LinuxX86_32,
  LinuxX86_64,
  LinuxAarch64,
  LinuxPpcle64,
  LinuxS390_64,
  MacosX86_64,
  Win32,
}

impl SupportedTarget {
  /// Every supported target, in store order.
  pub const ALL: [SupportedTarget; 7] = [
    SupportedTarget::LinuxX86_32,
    SupportedTarget::LinuxX86_64,
    SupportedTarget::LinuxAarch64,
    SupportedTarget::LinuxPpcle64,
    SupportedTarget::LinuxS390_64,
    SupportedTarget::MacosX86_64,
    SupportedTarget::Win32,
  ];

  /// Look up the target for a platform.
  ///
  /// 64-bit Windows runs the 32-bit binary. macOS on aarch64 has no entry.
  pub fn for_platform(platform: Platform) -> Option<Self> {
    match (platform.os, platform.arch) {
      (Os::Linux, Arch::X86) => Some(Self::LinuxX86_32),
      (Os::Linux, Arch::X86_64) => Some(Self::LinuxX86_64),
      (Os::Linux, Arch::Aarch64) => Some(Self::LinuxAarch64),
      (Os::Linux, Arch::Powerpc64Le) => Some(Self::LinuxPpcle64),
      (Os::Linux, Arch::S390x) => Some(Self::LinuxS390_64),
      (Os::MacOs, Arch::X86_64) => Some(Self::MacosX86_64),
      (Os::Windows, Arch::X86 | Arch::X86_64) => Some(Self::Win32),
      _ => None,
    }
  }

  /// Upstream's name for this target, as found in release asset names.
  pub fn id(&self) -> &'static str {
    match self {
      Self::LinuxX86_32 => "linux-x86_32",
      Self::LinuxX86_64 => "linux-x86_64",
      Self::LinuxAarch64 => "linux-aarch_64",
      Self::LinuxPpcle64 => "linux-ppcle_64",
      Self::LinuxS390_64 => "linux-s390_64",
      Self::MacosX86_64 => "osx-x86_64",
      Self::Win32 => "win32",
    }
  }

  /// Parse an upstream target id back into a target
  pub fn from_id(id: &str) -> Option<Self> {
    Self::ALL.into_iter().find(|t| t.id() == id)
  }

  pub fn os(&self) -> Os {
    match self {
      Self::LinuxX86_32 | Self::LinuxX86_64 | Self::LinuxAarch64 | Self::LinuxPpcle64 | Self::LinuxS390_64 => {
        Os::Linux
      }
      Self::MacosX86_64 => Os::MacOs,
      Self::Win32 => Os::Windows,
    }
  }

  /// A platform that resolves to this target.
  pub fn canonical_platform(&self) -> Platform {
    let arch = match self {
      Self::LinuxX86_32 | Self::Win32 => Arch::X86,
      Self::LinuxX86_64 | Self::MacosX86_64 => Arch::X86_64,
      Self::LinuxAarch64 => Arch::Aarch64,
      Self::LinuxPpcle64 => Arch::Powerpc64Le,
      Self::LinuxS390_64 => Arch::S390x,
    };
    Platform::new(arch, self.os())
  }

  /// File name of this target's binary inside the store's `bin/` directory
  /// (e.g., `protoc-linux-x86_64`, `protoc-win32.exe`).
  pub fn binary_file_name(&self) -> String {
    format!("{}-{}{}", BINARY_STEM, self.id(), self.os().exe_suffix())
  }

  /// Name of the upstream release archive for `version` (a tag without the leading `v`).
  pub fn archive_name(&self, version: &str) -> String {
    format!("{}-{}-{}.zip", BINARY_STEM, version, self.id())
  }

  /// Path of the binary inside the upstream release archive.
  pub fn archive_binary_entry(&self) -> String {
    format!("{}/{}{}", BIN_DIR, BINARY_STEM, self.os().exe_suffix())
  }
}

impl fmt::Display for SupportedTarget {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.id())
  }
}

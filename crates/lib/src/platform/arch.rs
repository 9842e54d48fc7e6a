use std::fmt;

/// CPU architecture variants protoc-vendored knows how to name
///
/// `powerpc64` is split by byte order because upstream only ships a
/// little-endian binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arch {
  X86,
  X86_64,
  Aarch64,
  Powerpc64,
  Powerpc64Le,
  S390x,
}

impl Arch {
  /// Detect the current CPU architecture at runtime
  pub fn current() -> Option<Self> {
    match std::env::consts::ARCH {
      "powerpc64" if cfg!(target_endian = "little") => Some(Self::Powerpc64Le),
      name => Self::from_name(name),
    }
  }

  /// Parse an architecture name as reported by `std::env::consts::ARCH`
  ///
  /// `powerpc64le` is accepted for the little-endian variant, since the
  /// constant itself does not carry byte order.
  pub fn from_name(name: &str) -> Option<Self> {
    match name {
      "x86" => Some(Self::X86),
      "x86_64" => Some(Self::X86_64),
      "aarch64" => Some(Self::Aarch64),
      "powerpc64" => Some(Self::Powerpc64),
      "powerpc64le" => Some(Self::Powerpc64Le),
      "s390x" => Some(Self::S390x),
      _ => None,
    }
  }

  /// Returns the lowercase string identifier for this architecture
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::X86 => "x86",
      Self::X86_64 => "x86_64",
      Self::Aarch64 => "aarch64",
      Self::Powerpc64 => "powerpc64",
      Self::Powerpc64Le => "powerpc64le",
      Self::S390x => "s390x",
    }
  }
}

impl fmt::Display for Arch {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

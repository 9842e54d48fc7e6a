/// Environment variable overriding the store root.
pub const STORE_ENV_VAR: &str = "PROTOC_VENDORED_STORE";

/// File name stem shared by every vendored binary.
pub const BINARY_STEM: &str = "protoc";

pub const BIN_DIR: &str = "bin";
pub const INCLUDE_DIR: &str = "include";
pub const VERSION_FILE: &str = "version.txt";

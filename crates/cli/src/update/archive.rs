//! Extraction of the pieces we vendor from an upstream release zip.

use std::fs::{self, File};
use std::io::{self, Cursor};
use std::path::Path;

use protoc_vendored::SupportedTarget;
use protoc_vendored::consts::INCLUDE_DIR;
use zip::ZipArchive;
use zip::result::ZipError;

use super::UpdateError;

fn open<'a>(archive: &'a [u8], archive_name: &str) -> Result<ZipArchive<Cursor<&'a [u8]>>, UpdateError> {
  ZipArchive::new(Cursor::new(archive)).map_err(|e| UpdateError::Archive {
    name: archive_name.to_string(),
    message: e.to_string(),
  })
}

/// Extract `target`'s `protoc` executable to `dest`, returning its size in bytes.
pub fn extract_binary(
  archive: &[u8],
  archive_name: &str,
  target: SupportedTarget,
  dest: &Path,
) -> Result<u64, UpdateError> {
  let mut zip = open(archive, archive_name)?;
  let entry = target.archive_binary_entry();

  let mut file = match zip.by_name(&entry) {
    Ok(file) => file,
    Err(ZipError::FileNotFound) => {
      return Err(UpdateError::EntryMissing {
        archive: archive_name.to_string(),
        entry,
      });
    }
    Err(e) => {
      return Err(UpdateError::Archive {
        name: archive_name.to_string(),
        message: e.to_string(),
      });
    }
  };

  if let Some(parent) = dest.parent() {
    fs::create_dir_all(parent)?;
  }
  let mut out = File::create(dest)?;
  let written = io::copy(&mut file, &mut out)?;
  set_executable(dest)?;

  Ok(written)
}

/// Extract every entry under `include/` into `dest`, returning the number of files written.
///
/// Entries whose names would escape the archive root are rejected.
pub fn extract_include(archive: &[u8], archive_name: &str, dest: &Path) -> Result<usize, UpdateError> {
  let mut zip = open(archive, archive_name)?;
  let mut count = 0;

  for i in 0..zip.len() {
    let mut file = zip.by_index(i).map_err(|e| UpdateError::Archive {
      name: archive_name.to_string(),
      message: e.to_string(),
    })?;

    let Some(path) = file.enclosed_name() else {
      return Err(UpdateError::Archive {
        name: archive_name.to_string(),
        message: format!("unsafe entry name: {}", file.name()),
      });
    };
    let Ok(relative) = path.strip_prefix(INCLUDE_DIR) else {
      continue;
    };
    if relative.as_os_str().is_empty() {
      continue;
    }

    let dest_path = dest.join(relative);
    if file.is_dir() {
      fs::create_dir_all(&dest_path)?;
    } else {
      if let Some(parent) = dest_path.parent() {
        fs::create_dir_all(parent)?;
      }
      let mut out = File::create(&dest_path)?;
      io::copy(&mut file, &mut out)?;
      count += 1;
    }
  }

  if count == 0 {
    return Err(UpdateError::EntryMissing {
      archive: archive_name.to_string(),
      entry: format!("{}/", INCLUDE_DIR),
    });
  }

  Ok(count)
}

#[cfg(unix)]
fn set_executable(path: &Path) -> io::Result<()> {
  use std::os::unix::fs::PermissionsExt;
  fs::set_permissions(path, fs::Permissions::from_mode(0o755))
}

#[cfg(not(unix))]
fn set_executable(_path: &Path) -> io::Result<()> {
  Ok(())
}

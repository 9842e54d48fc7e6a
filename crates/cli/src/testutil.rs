//! Test helpers for building release archives in memory.

use std::io::{Cursor, Write};

use protoc_vendored::SupportedTarget;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Build a zip holding the given `(name, contents)` entries.
pub fn zip_of(entries: &[(&str, &[u8])]) -> Vec<u8> {
  let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
  let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
  for (name, contents) in entries {
    writer.start_file(*name, options).unwrap();
    writer.write_all(contents).unwrap();
  }
  writer.finish().unwrap().into_inner()
}

/// An archive shaped like an upstream `protoc-<version>-<target>.zip`.
pub fn protoc_archive(target: SupportedTarget, binary: &[u8], with_include: bool) -> Vec<u8> {
  let entry = target.archive_binary_entry();
  let mut entries: Vec<(&str, &[u8])> = vec![(entry.as_str(), binary), ("readme.txt", b"Protocol Buffers".as_slice())];
  if with_include {
    entries.push((
      "include/google/protobuf/descriptor.proto",
      b"syntax = \"proto2\";\npackage google.protobuf;\n".as_slice(),
    ));
    entries.push((
      "include/google/protobuf/compiler/plugin.proto",
      b"syntax = \"proto2\";\npackage google.protobuf.compiler;\n".as_slice(),
    ));
  }
  zip_of(&entries)
}

//! Verify command implementation.
//!
//! Checks that the store holds a binary for every supported target and the
//! include bundle.

use anyhow::{Result, bail};
use owo_colors::OwoColorize;
use protoc_vendored::VendoredStore;

use crate::output::{print_error, print_stat, print_success, print_warning, symbols};

pub fn cmd_verify(store: VendoredStore) -> Result<()> {
  let report = store.verify()?;

  print_stat("Store", &store.root().display().to_string());
  print_stat("Version", report.version.as_deref().unwrap_or("-"));
  println!();

  for status in &report.targets {
    if status.present {
      println!("  {} {}", symbols::SUCCESS.green(), status.target.id());
    } else {
      println!(
        "  {} {} {}",
        symbols::ERROR.red(),
        status.target.id(),
        format!("(missing {})", status.path.display()).dimmed()
      );
    }
  }
  if report.include_present {
    println!(
      "  {} include {}",
      symbols::SUCCESS.green(),
      format!("({} .proto files)", report.proto_files).dimmed()
    );
  } else {
    println!(
      "  {} include {}",
      symbols::ERROR.red(),
      format!("(missing {})", report.include_dir.display()).dimmed()
    );
  }

  for path in &report.unexpected {
    print_warning(&format!("unexpected file in store: {}", path.display()));
  }

  println!();
  if !report.is_complete() {
    let missing = report.missing().count() + usize::from(!report.include_present);
    print_error(&format!(
      "{} asset(s) missing, run `protoc-vendored update`",
      missing
    ));
    bail!("store at {} is incomplete", store.root().display());
  }

  print_success("Store is complete");
  Ok(())
}

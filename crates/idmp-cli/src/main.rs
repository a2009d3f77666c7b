//! `idmp` — batch loader producing an IDMPersonas-2.2 document from JSON
//! patron records.
//!
//! # Usage
//!
//! ```
//! idmp demos/patrons.json                  # document on stdout
//! idmp demos/patrons.json -o personas.xml
//! idmp demos/patrons.json --skip-invalid   # log bad records, keep going
//! ```

use std::{io::Write as _, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use idmp_core::persona::Persona;
use idmp_xml::PersonasBuilder;
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
  name = "idmp",
  about = "Build an IDMPersonas-2.2 document from patron records"
)]
struct Args {
  /// JSON file holding an array of persona records.
  input: PathBuf,

  /// Path to a TOML config file (output, skip_invalid).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Write the document here instead of stdout.
  #[arg(short, long, value_name = "FILE")]
  output: Option<PathBuf>,

  /// Log invalid records and keep going instead of aborting.
  #[arg(long)]
  skip_invalid: bool,
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  output:       Option<PathBuf>,
  #[serde(default)]
  skip_invalid: bool,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

fn main() -> Result<()> {
  // Logs go to stderr; stdout carries the document.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let args = Args::parse();

  // Load config file if provided.
  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flags override config file, which overrides defaults.
  let output = args.output.or(file_cfg.output);
  let skip_invalid = args.skip_invalid || file_cfg.skip_invalid;

  let raw = std::fs::read_to_string(&args.input)
    .with_context(|| format!("reading {}", args.input.display()))?;
  let records: Vec<Persona> =
    serde_json::from_str(&raw).context("parsing persona records")?;

  let total = records.len();
  let mut doc = PersonasBuilder::new();
  let mut appended = 0usize;

  for (index, record) in records.iter().enumerate() {
    match doc.append(record) {
      Ok(()) => appended += 1,
      Err(e) if skip_invalid => {
        tracing::warn!(
          "skipping record {index} (barcode {:?}): {e}",
          record.barcode
        );
      }
      Err(e) => {
        return Err(e).with_context(|| {
          format!("record {index} (barcode {:?})", record.barcode)
        });
      }
    }
  }

  if total > 0 && appended == 0 {
    anyhow::bail!("no valid records among {total}");
  }

  let bytes = doc.finish();
  match &output {
    Some(path) => std::fs::write(path, &bytes)
      .with_context(|| format!("writing {}", path.display()))?,
    None => std::io::stdout()
      .write_all(&bytes)
      .context("writing document to stdout")?,
  }

  tracing::info!("wrote {appended}/{total} personas");
  Ok(())
}

//! Rune API - contract inspection tool
//!
//! Checks JSON payloads against the contract shapes, prints zero-value
//! defaults, and decodes captured event streams.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use rune_api::codec;
use rune_api::{ApiConfig, ApiVersion, Contract, ShapeKind};
use serde_json::Value;
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

/// Rune API - Docker Engine API contract tool
#[derive(Parser)]
#[command(name = "rune-api")]
#[command(author = "Evoker Industries")]
#[command(version)]
#[command(about = "Inspect and validate Docker Engine API payloads", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the known shape kinds
    Kinds,

    /// Print the zero-value form of a shape
    #[command(name = "default")]
    Zero {
        /// Shape kind, e.g. container-config
        kind: ShapeKind,
    },

    /// Validate a payload and print its normalized form
    Check {
        /// Shape kind, e.g. container-info
        kind: ShapeKind,
        /// File to read; stdin when omitted
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Decode a captured event stream
    Events {
        /// File to read; stdin when omitted
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Print an endpoint path prefixed with the API version
    Path {
        /// Endpoint, e.g. /containers/json
        endpoint: String,
        /// API version; defaults to RUNE_API_VERSION or 1.18
        #[arg(long)]
        api_version: Option<ApiVersion>,
    },
}

fn open_input(file: Option<&Path>) -> anyhow::Result<Box<dyn Read>> {
    match file {
        Some(path) => {
            let handle = File::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            Ok(Box::new(handle))
        }
        None => Ok(Box::new(io::stdin())),
    }
}

/// Validate a payload and return its normalized form
///
/// Listings arrive as arrays; each row is checked and the array shape is kept.
fn normalize(kind: ShapeKind, value: Value) -> anyhow::Result<Value> {
    let normalize_one = |index: usize, item: Value| -> anyhow::Result<Value> {
        let shape = Contract::construct(kind, item)
            .with_context(|| format!("Item {} is not a valid {}", index, kind))?;
        Ok(shape.to_value()?)
    };

    match value {
        Value::Array(items) => {
            debug!("Checking {} {} payload(s)", items.len(), kind);
            let rows = items
                .into_iter()
                .enumerate()
                .map(|(index, item)| normalize_one(index, item))
                .collect::<anyhow::Result<Vec<_>>>()?;
            Ok(Value::Array(rows))
        }
        other => normalize_one(0, other),
    }
}

fn check(kind: ShapeKind, file: Option<&Path>) -> anyhow::Result<()> {
    let mut raw = String::new();
    open_input(file)?
        .read_to_string(&mut raw)
        .context("Failed to read payload")?;

    let value: Value = serde_json::from_str(&raw).context("Payload is not JSON")?;
    let output = normalize(kind, value)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    info!("{} payload is valid", kind);
    Ok(())
}

/// Print each decodable event; returns how many items were skipped
fn print_events<R: Read, W: Write>(reader: R, out: &mut W) -> anyhow::Result<usize> {
    let mut rejected = 0usize;
    let mut stream = codec::decode_events(reader);
    while let Some(event) = stream.next() {
        match event {
            Ok(event) => {
                let when = event
                    .timestamp()
                    .map(|ts| ts.to_rfc3339())
                    .unwrap_or_else(|| event.time.to_string());
                writeln!(out, "{} {} {} {}", when, event.status, event.id, event.from)?;
            }
            Err(e) if stream.is_broken() => {
                return Err(e).context("Event stream is malformed");
            }
            Err(e) => {
                warn!("Skipping invalid event: {}", e);
                rejected += 1;
            }
        }
    }
    Ok(rejected)
}

fn events(file: Option<&Path>) -> anyhow::Result<()> {
    let rejected = print_events(open_input(file)?, &mut io::stdout().lock())?;
    if rejected > 0 {
        bail!("{} event(s) failed validation", rejected);
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Commands::Kinds => {
            for kind in ShapeKind::ALL {
                println!("{:<28} {}", kind.name(), kind.wire_name());
            }
        }
        Commands::Zero { kind } => {
            let shape = Contract::default_for(kind);
            println!("{}", serde_json::to_string_pretty(&shape.to_value()?)?);
        }
        Commands::Check { kind, file } => check(kind, file.as_deref())?,
        Commands::Events { file } => events(file.as_deref())?,
        Commands::Path {
            endpoint,
            api_version,
        } => {
            let config = match api_version {
                Some(version) => ApiConfig::new(version),
                None => ApiConfig::from_env()?,
            };
            println!("{}", config.versioned_path(&endpoint));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_single_row_listing_stays_an_array() {
        let out = normalize(ShapeKind::Container, json!([{"Id": "a"}])).unwrap();
        assert!(out.is_array());
        assert_eq!(out[0]["Id"], "a");

        let out = normalize(ShapeKind::Container, json!({"Id": "a"})).unwrap();
        assert!(out.is_object());
    }

    #[test]
    fn test_invalid_row_is_reported() {
        let err = normalize(ShapeKind::Container, json!([{"Id": "a"}, {"Names": []}])).unwrap_err();
        assert!(err.to_string().contains("Item 1"));
    }

    #[test]
    fn test_bad_event_is_skipped() {
        let raw = concat!(
            r#"{"status":"start","id":"a","from":"base","time":"soon"}"#,
            r#"{"id":"b","time":2}"#,
            r#"{"status":"stop","id":"c","from":"base","time":3}"#,
        );
        let mut out = Vec::new();
        let rejected = print_events(raw.as_bytes(), &mut out).unwrap();
        assert_eq!(rejected, 2);
        let printed = String::from_utf8(out).unwrap();
        assert_eq!(printed.lines().count(), 1);
        assert!(printed.contains("stop c base"));
    }

    #[test]
    fn test_broken_event_stream_aborts() {
        let mut out = Vec::new();
        let err = print_events(r#"{"status":"stop","id":"c","time":3} {"sta"#.as_bytes(), &mut out)
            .unwrap_err();
        assert!(err.to_string().contains("malformed"));
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 1);
    }
}

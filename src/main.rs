//! Command-line interface for json2dynamodb
//!
//! # Usage Examples
//!
//! ## Convert
//! ```bash
//! # File in, store-JSON on stdout
//! json2dynamodb convert --input item.json
//!
//! # Gate on a schema and write to a file
//! json2dynamodb convert --input item.json \
//!   --schema item.schema.json \
//!   --output item.ddb.json
//!
//! # Match encoders that escape HTML characters
//! echo '{"v": "> 1"}' | json2dynamodb convert --html-safe
//! ```
//!
//! ## Normalize and compare
//! ```bash
//! json2dynamodb normalize --input item.json
//! json2dynamodb diff old.json new.json
//! ```
//!
//! Logging goes to stderr and is controlled by `RUST_LOG`
//! (e.g. `RUST_LOG=json2dynamodb=debug`).

use anyhow::Context;
use clap::{Parser, Subcommand};
use json2dynamodb::{ConvertError, ConvertOpts, InputField};
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "json2dynamodb")]
#[command(version)]
#[command(about = "Convert JSON documents into DynamoDB attribute-value JSON")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a JSON document to canonical store-JSON
    Convert {
        /// JSON document to convert ("-" for stdin)
        #[arg(long, short, default_value = json2dynamodb::STDIN)]
        input: PathBuf,

        /// Write the result here instead of stdout
        #[arg(long, short, value_name = "PATH")]
        output: Option<PathBuf>,

        #[command(flatten)]
        opts: ConvertOpts,
    },

    /// Print a JSON document compactly with sorted keys
    Normalize {
        /// JSON document to normalize ("-" for stdin)
        #[arg(long, short, default_value = json2dynamodb::STDIN)]
        input: PathBuf,
    },

    /// Check whether two JSON documents are equivalent (exit status 1 if not)
    Diff {
        /// First document
        a: PathBuf,

        /// Second document
        b: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> anyhow::Result<()> {
    // Initialize tracing; stdout is reserved for results
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            input,
            output,
            opts,
        } => run_convert(input, output, opts)?,
        Commands::Normalize { input } => {
            let raw = json2dynamodb::read_source(&input)?;
            let normalized = json2dynamodb::normalize_json(&raw)
                .with_context(|| format!("Failed to normalize {input:?}"))?;
            println!("{normalized}");
        }
        Commands::Diff { a, b } => {
            let left = json2dynamodb::read_source(&a)?;
            let right = json2dynamodb::read_source(&b)?;
            if json2dynamodb::equivalent(&left, &right) {
                println!("equivalent");
            } else {
                println!("different");
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

fn run_convert(
    input: PathBuf,
    output: Option<PathBuf>,
    opts: ConvertOpts,
) -> anyhow::Result<()> {
    let converter = opts.converter()?;
    if converter.has_schema() {
        tracing::info!("Validating against schema {:?}", opts.schema);
    } else if opts.schema.is_some() {
        tracing::warn!("Schema file {:?} is empty, validation skipped", opts.schema);
    }

    let raw = json2dynamodb::read_source(&input)?;
    tracing::info!("Converting {} bytes from {:?}", raw.len(), input);

    let bytes = converter.convert(&raw).map_err(|e| describe(e, &input))?;

    match output {
        Some(path) => {
            std::fs::write(&path, &bytes)
                .with_context(|| format!("Failed to write result to {path:?}"))?;
            tracing::info!("Wrote {} bytes to {:?}", bytes.len(), path);
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&bytes)?;
            stdout.write_all(b"\n")?;
            stdout.flush()?;
        }
    }
    Ok(())
}

/// Attach the user-facing summary and the input at fault to a conversion error.
fn describe(error: ConvertError, input: &std::path::Path) -> anyhow::Error {
    if error.is_internal() {
        tracing::error!("Internal conversion error: {error:?}");
    }
    let context = match error.input() {
        InputField::Json => format!("{} in {input:?}", error.summary()),
        InputField::Schema => error.summary().to_string(),
    };
    anyhow::Error::new(error).context(context)
}

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use coda_core::{Layout, RecordKind, layout_for};
use coda_ingest::{DecodedFile, ErrorPolicy, IngestOptions, Summary, decode_file};
use serde_json::json;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

mod config;
mod export;
mod logging;

use config::{Config, OutputFormat};

#[derive(Parser, Debug)]
#[command(
    name = "coda",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("CODA_BUILD_SHA"), ")"),
    about = "Decode CODA bank statement files"
)]
struct Cli {
    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decode every line and print the records
    Decode {
        file: PathBuf,

        #[arg(long, value_enum)]
        format: Option<OutputFormat>,

        /// abort | skip | collect (default from config)
        #[arg(long)]
        on_error: Option<ErrorPolicy>,
    },

    /// Count records per kind and total the movements
    Summary {
        file: PathBuf,

        #[arg(long, value_enum)]
        format: Option<OutputFormat>,

        #[arg(long)]
        on_error: Option<ErrorPolicy>,
    },

    /// Export transaction records as CSV
    Movements {
        file: PathBuf,

        /// Output path (default: stdout)
        #[arg(long)]
        out: Option<PathBuf>,

        #[arg(long)]
        on_error: Option<ErrorPolicy>,
    },

    /// Print the field layout tables
    Layout {
        #[arg(value_enum)]
        kind: Option<KindArg>,
    },

    /// Manage ~/.coda/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config if none exists
    Init,
    /// Print the effective config
    Show,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum KindArg {
    Initial,
    OldBalance,
    Transaction,
    TransactionPurpose,
}

impl From<KindArg> for RecordKind {
    fn from(k: KindArg) -> Self {
        match k {
            KindArg::Initial => RecordKind::Initial,
            KindArg::OldBalance => RecordKind::OldBalance,
            KindArg::Transaction => RecordKind::Transaction,
            KindArg::TransactionPurpose => RecordKind::TransactionPurpose,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config()?;
    logging::init(&cfg.log.level, cli.verbose);

    match cli.command {
        Command::Decode {
            file,
            format,
            on_error,
        } => {
            let decoded = ingest(&file, &cfg, on_error)?;
            print_records(&decoded, format.unwrap_or(cfg.output.format))?;
            if !decoded.errors.is_empty() {
                bail!("{} line(s) failed to decode", decoded.errors.len());
            }
        }

        Command::Summary {
            file,
            format,
            on_error,
        } => {
            let decoded = ingest(&file, &cfg, on_error)?;
            let summary = Summary::from_records(decoded.records());
            match format.unwrap_or(cfg.output.format) {
                OutputFormat::Text => {
                    println!("{}", summary);
                    println!("{:<20} {}", "unrecognized", decoded.unrecognized);
                    println!("{:<20} {}", "errors", decoded.errors.len() + decoded.rejected);
                }
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&summary)?);
                }
            }
        }

        Command::Movements { file, out, on_error } => {
            let decoded = ingest(&file, &cfg, on_error)?;
            let rows = match &out {
                Some(path) => {
                    let f = File::create(path)
                        .with_context(|| format!("create {}", path.display()))?;
                    export::write_movements(BufWriter::new(f), &decoded)?
                }
                None => export::write_movements(io::stdout().lock(), &decoded)?,
            };
            tracing::info!(rows, "exported movements");
        }

        Command::Layout { kind } => {
            let kinds = match kind {
                Some(k) => vec![RecordKind::from(k)],
                None => RecordKind::DECODABLE.to_vec(),
            };
            for kind in kinds {
                if let Some(layout) = layout_for(kind) {
                    print_layout(layout);
                }
            }
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                println!("# {}", config::config_path()?.display());
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

fn ingest(file: &Path, cfg: &Config, on_error: Option<ErrorPolicy>) -> Result<DecodedFile> {
    let opts = IngestOptions {
        on_error: on_error.unwrap_or(cfg.decode.on_error),
    };
    decode_file(file, &opts)
}

fn print_records(decoded: &DecodedFile, format: OutputFormat) -> Result<()> {
    let mut out = io::stdout().lock();
    match format {
        OutputFormat::Text => {
            for (k, r) in decoded.records().enumerate() {
                writeln!(out, "{}: {}", k, r)?;
            }
            for e in &decoded.errors {
                eprintln!("{}", e);
            }
        }
        OutputFormat::Json => {
            let errors: Vec<_> = decoded
                .errors
                .iter()
                .map(|e| {
                    json!({
                        "line_no": e.line_no,
                        "record": e.error.record,
                        "field": e.error.field,
                        "category": e.error.category(),
                        "message": e.error.to_string(),
                    })
                })
                .collect();
            let doc = json!({ "records": decoded.records, "errors": errors });
            writeln!(out, "{}", serde_json::to_string_pretty(&doc)?)?;
        }
    }
    Ok(())
}

fn print_layout(layout: &Layout) {
    println!("## {} ({} bytes)", layout.kind, layout.width());
    println!("{:>5} {:>5}  {:<30} {}", "start", "width", "field", "kind");
    for f in layout.fields {
        println!("{:>5} {:>5}  {:<30} {}", f.start, f.width, f.name, f.kind);
    }
    println!();
}

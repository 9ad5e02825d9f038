// crates/edge/src/cli.rs

use chrono::Utc;
use clap::{builder::ValueHint, Parser, Subcommand};
use query::{compile, filter_documents, segment_with, SegmentOptions};
use serde_json::Value as Json;
use std::{
    io::{self, Read},
    path::{Path, PathBuf},
    process::ExitCode,
};
use tracing::{debug, error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::{settings::Settings, Error, Result};

/// docq — search strings to document-store filters
#[tracing::instrument(skip_all)]
pub fn start() -> ExitCode {
    let cli = Cli::parse();

    let settings = Settings::load(cli.settings.as_deref());
    let level = settings
        .as_ref()
        .map(|s| s.log.level.clone())
        .unwrap_or_else(|_| "warn".to_string());
    init_tracing(&level);

    let result = settings.and_then(|settings| {
        info!("engaging {:?}", cli.command);
        run(&cli, &settings, io::stdin().lock())
    });

    result.map_or_else(
        |e| {
            error!("docq failed: {}", e);
            eprintln!("error: {e}");
            ExitCode::FAILURE
        },
        |out| {
            println!("{out}");
            ExitCode::SUCCESS
        },
    )
}

fn init_tracing(fallback: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_file(true)
                .with_line_number(true),
        )
        .init();
}

#[derive(Parser, Debug)]
#[command(name = "docq", version, about = "Compile search strings into document-store filters")]
pub struct Cli {
    /// Settings file (or set DOCQ_SETTINGS)
    #[arg(
        long,
        global = true,
        value_name = "PATH",
        env = "DOCQ_SETTINGS",
        value_hint = ValueHint::FilePath
    )]
    pub settings: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the document-store filter for a search string
    Compile(CompileCmd),
    /// Split a bracketed array of object literals, one per output line
    Segment(SegmentCmd),
    /// Print the documents of a JSON array that match a search string
    ///
    /// Documents are parsed as strict JSON after segmenting, so relaxed literals
    /// (single-quoted strings, unquoted keys, regex literals, type wrappers) are
    /// rejected; use `segment` for those.
    Find(FindCmd),
}

#[derive(Parser, Debug)]
pub struct CompileCmd {
    /// Search string, e.g. `title:"The Great Gatsby" pages<250`
    #[arg(value_name = "QUERY")]
    pub query: String,

    #[arg(long)]
    pub pretty: bool,
}

#[derive(Parser, Debug)]
pub struct SegmentCmd {
    /// Input file; stdin when omitted
    #[arg(value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub file: Option<PathBuf>,

    /// Count braces inside string literals too
    #[arg(long)]
    pub unguarded: bool,
}

#[derive(Parser, Debug)]
pub struct FindCmd {
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Strict JSON array of documents; stdin when omitted
    #[arg(value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub file: Option<PathBuf>,

    #[arg(long)]
    pub pretty: bool,
}

/// Execute a parsed command line and return what should be printed.
#[tracing::instrument(skip_all)]
pub fn run<R: Read>(cli: &Cli, settings: &Settings, stdin: R) -> Result<String> {
    match &cli.command {
        Commands::Compile(cmd) => do_compile(cmd),
        Commands::Segment(cmd) => {
            let input = read_input(cmd.file.as_deref(), stdin)?;
            let mut opts = SegmentOptions::from(&settings.segment);
            if cmd.unguarded {
                opts.quote_aware = false;
            }
            do_segment(&input, opts)
        }
        Commands::Find(cmd) => {
            let input = read_input(cmd.file.as_deref(), stdin)?;
            do_find(cmd, &input, SegmentOptions::from(&settings.segment))
        }
    }
}

fn read_input<R: Read>(file: Option<&Path>, mut stdin: R) -> Result<String> {
    match file {
        Some(path) => {
            debug!("reading {}", path.display());
            Ok(std::fs::read_to_string(path)?)
        }
        None => {
            let mut buf = String::new();
            stdin.read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn render(value: &Json, pretty: bool) -> Result<String> {
    Ok(if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    })
}

fn do_compile(cmd: &CompileCmd) -> Result<String> {
    let then = Utc::now();
    let expr = compile(&cmd.query)?;
    info!(
        "Query compiled in {} microseconds",
        (Utc::now() - then).num_microseconds().unwrap_or_default()
    );

    render(&expr.to_native(), cmd.pretty)
}

fn do_segment(input: &str, opts: SegmentOptions) -> Result<String> {
    let then = Utc::now();
    let segments = segment_with(input, opts)?;
    info!(
        "{} segments found in {} microseconds",
        segments.len(),
        (Utc::now() - then).num_microseconds().unwrap_or_default()
    );

    Ok(segments.join("\n"))
}

fn do_find(cmd: &FindCmd, input: &str, opts: SegmentOptions) -> Result<String> {
    let filter = compile(&cmd.query)?;

    let docs = segment_with(input, opts)?
        .into_iter()
        .enumerate()
        .map(|(index, text)| {
            serde_json::from_str::<Json>(text).map_err(|source| Error::Document { index, source })
        })
        .collect::<Result<Vec<_>>>()?;

    let hits = filter_documents(&filter, &docs);
    info!("{} of {} documents matched `{}`", hits.len(), docs.len(), filter);

    let lines = hits
        .into_iter()
        .map(|doc| render(doc, cmd.pretty))
        .collect::<Result<Vec<_>>>()?;
    Ok(lines.join("\n"))
}

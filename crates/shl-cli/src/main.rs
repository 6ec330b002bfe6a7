//! SHL CLI
//!
//! Builds a single-header library from a root header.

use anyhow::{bail, Context, Result};
use clap::Parser;
use shl_core::{BuildConfig, Error, InlinerConfig, TraceAction};
use shl_inliner::Inliner;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "shl")]
#[command(
    author,
    version,
    about = "Amalgamate a header tree into a single header",
    long_about = None
)]
struct Cli {
    /// The main header file
    #[arg(value_name = "MAIN_HEADER")]
    main_header: Option<PathBuf>,

    /// Headers whose #include should be removed (without inlining them)
    #[arg(
        long = "ignored-headers",
        alias = "ignored_headers",
        num_args = 0..,
        value_name = "HEADER"
    )]
    ignored_headers: Vec<String>,

    /// Header search paths, consulted in order
    #[arg(
        long = "header-search-paths",
        alias = "header_search_paths",
        num_args = 0..,
        value_name = "DIR"
    )]
    header_search_paths: Vec<PathBuf>,

    /// The single-header output file
    #[arg(short = 'o', long = "output-file", alias = "output_file", value_name = "FILE")]
    output_file: Option<PathBuf>,

    /// Build configuration file (.json, .yaml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write the decision trace as JSON
    #[arg(long, value_name = "FILE")]
    trace_json: Option<PathBuf>,

    /// Don't print the decision trace
    #[arg(short, long)]
    quiet: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Destination file, opened up front so write errors surface before work
/// starts. Existing content is only replaced once the run has succeeded,
/// and a file created by the open is removed again if the run fails.
struct OutputFile {
    path: PathBuf,
    file: File,
    existed: bool,
}

impl OutputFile {
    fn open(path: &Path) -> shl_core::Result<Self> {
        let existed = path.exists();
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)
            .map_err(|source| Error::IoWrite {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Self {
            path: path.to_path_buf(),
            file,
            existed,
        })
    }

    fn discard(self) {
        let Self { path, file, existed } = self;
        drop(file);
        if !existed {
            if let Err(e) = std::fs::remove_file(&path) {
                warn!("Failed to remove {}: {}", path.display(), e);
            }
        }
    }

    fn commit(mut self, contents: &[u8]) -> shl_core::Result<()> {
        let written = self.file.set_len(0).and_then(|_| {
            self.file.write_all(contents)?;
            self.file.flush()
        });

        written.map_err(|source| Error::IoWrite {
            path: self.path,
            source,
        })
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let (main_header, output_path, inliner_config) = settings(&cli)?;

    let output = OutputFile::open(&output_path)?;

    let (quiet, verbose) = (cli.quiet, cli.verbose);
    let inliner = Inliner::new(&inliner_config).with_observer(move |event| {
        if !quiet && (event.action != TraceAction::ElidedDuplicate || verbose > 0) {
            eprintln!("{}", event);
        }
    });
    for missing in inliner.resolver().missing_search_paths() {
        warn!("Header search path does not exist: {}", missing.display());
    }

    let amalgamation = match inliner.process(&main_header) {
        Ok(amalgamation) => amalgamation,
        Err(e) => {
            output.discard();
            return Err(e)
                .with_context(|| format!("Failed to amalgamate {}", main_header.display()));
        }
    };

    if let Some(trace_path) = &cli.trace_json {
        let json = serde_json::to_string_pretty(&amalgamation.trace)?;
        if let Err(e) = std::fs::write(trace_path, json) {
            output.discard();
            return Err(e)
                .with_context(|| format!("Failed to write trace to {}", trace_path.display()));
        }
    }

    output.commit(&amalgamation.to_bytes())?;

    info!(
        "Wrote {} lines from {} headers to {}",
        amalgamation.lines.len(),
        amalgamation.inlined_headers().len(),
        output_path.display()
    );

    Ok(())
}

fn init_logging(verbose: u8, quiet: bool) {
    let default_level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        _ => "trace",
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Merge the config file (if any) with the command line
///
/// Command-line paths replace the file's; search paths and ignored headers
/// from the command line come after the file's.
fn settings(cli: &Cli) -> Result<(PathBuf, PathBuf, InlinerConfig)> {
    let mut build = match &cli.config {
        Some(path) => BuildConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => BuildConfig {
            main_header: None,
            output_file: None,
            inliner: InlinerConfig::default(),
        },
    };

    build.inliner.extend(InlinerConfig {
        search_paths: cli.header_search_paths.clone(),
        ignored_headers: cli.ignored_headers.clone(),
    });

    let Some(main_header) = cli.main_header.clone().or(build.main_header) else {
        bail!("No main header given (pass MAIN_HEADER or set main_header in the config)");
    };
    let Some(output_file) = cli.output_file.clone().or(build.output_file) else {
        bail!("No output file given (pass -o or set output_file in the config)");
    };

    Ok((main_header, output_file, build.inliner))
}

//! Command-line interface.
//!
//! Four subcommands over the same loading pipeline: `lint` and `stats`
//! index whole workspaces, `lookup` and `format` operate on one file.
//! Exit codes: 0 clean, 1 findings or failed gates, 2 operational errors.

use std::path::{
    Path,
    PathBuf,
};
use std::process::ExitCode;

use clap::{
    Parser,
    Subcommand,
    ValueEnum,
};
use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::{
    self,
    ConfigError,
};
use crate::indexer::{
    IndexerError,
    WorkspaceIndexer,
};
use crate::input::{
    self,
    InputError,
};
use crate::lint::{
    self,
    Finding,
    LintOptions,
};
use crate::plural;
use crate::report::StatsReport;
use crate::syntax;

/// Lint, statistics and lookup for Qt Linguist TS translation catalogs.
#[derive(Parser, Debug)]
#[command(name = "linguist-ts", version, about, long_about = None)]
pub struct Args {
    /// Path to a configuration file (default: .linguist-ts.json in the
    /// current directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check catalogs for defects
    Lint {
        /// Files or directories to check
        #[arg(default_value = ".")]
        paths: Vec<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Exit non-zero on warnings as well as errors
        #[arg(long)]
        deny_warnings: bool,
    },

    /// Show translation statistics and coverage
    Stats {
        /// Files or directories to measure
        #[arg(default_value = ".")]
        paths: Vec<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Exit non-zero when a required locale falls short of the
        /// coverage threshold
        #[arg(long)]
        check: bool,
    },

    /// Resolve one translation the way a running application would
    Lookup {
        /// Catalog file
        file: PathBuf,

        /// Context name
        context: String,

        /// Source text
        source: String,

        /// Positional arguments substituted for %1, %2, ...
        args: Vec<String>,

        /// Disambiguation comment
        #[arg(long)]
        comment: Option<String>,

        /// Count for numerus messages; selects the plural form and
        /// substitutes %n
        #[arg(short = 'n', long = "count")]
        count: Option<i64>,
    },

    /// Rewrite a catalog in canonical form
    Format {
        /// Catalog file
        file: PathBuf,

        /// Rewrite the file in place instead of printing it
        #[arg(long, conflicts_with = "check")]
        write: bool,

        /// Exit non-zero when the file is not already canonical
        #[arg(long)]
        check: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Error, Debug)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Indexer(#[from] IndexerError),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error("Failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("Invalid log level '{level}': {source}")]
    InvalidLevel {
        level: String,
        source: tracing_subscriber::filter::ParseError,
    },

    #[error("Failed to open log file {}: {source}", .path.display())]
    OpenLogFile {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Exit code for a clean run.
const EXIT_OK: u8 = 0;
/// Exit code when findings were reported or a gate failed.
const EXIT_FINDINGS: u8 = 1;
/// Exit code for operational failures (bad paths, bad config, IO).
const EXIT_ERROR: u8 = 2;

/// Installs the global tracing subscriber.
///
/// Logs go to stderr so that report output on stdout stays clean, or to
/// `--log-file` when given. The returned guard must stay alive for the
/// duration of the process.
pub fn init_logging(args: &Args) -> Result<Option<WorkerGuard>, LoggingError> {
    let filter = match &args.log_level {
        Some(level) => EnvFilter::try_new(level)
            .map_err(|source| LoggingError::InvalidLevel { level: level.clone(), source })?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    if let Some(path) = &args.log_file {
        let file = std::fs::File::create(path)
            .map_err(|source| LoggingError::OpenLogFile { path: path.clone(), source })?;
        let (writer, guard) = tracing_appender::non_blocking(file);
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(writer)
            .with_ansi(false)
            .init();
        Ok(Some(guard))
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
        Ok(None)
    }
}

/// Runs one parsed invocation to completion.
pub async fn run(args: Args) -> ExitCode {
    match execute(args).await {
        Ok(code) => ExitCode::from(code),
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Dispatches to the matching subcommand.
async fn execute(args: Args) -> Result<u8, CliError> {
    let config_path = args.config.as_deref();
    match args.command {
        Command::Lint { paths, format, deny_warnings } => {
            lint_command(config_path, &paths, format, deny_warnings).await
        }
        Command::Stats { paths, format, check } => {
            stats_command(config_path, &paths, format, check).await
        }
        Command::Lookup { file, context, source, args, comment, count } => {
            lookup_command(&file, &context, &source, &args, comment.as_deref(), count)
        }
        Command::Format { file, write, check } => format_command(&file, write, check),
    }
}

/// Indexes the requested paths and reports lint findings.
async fn lint_command(
    config_path: Option<&Path>,
    paths: &[PathBuf],
    format: OutputFormat,
    deny_warnings: bool,
) -> Result<u8, CliError> {
    let settings = config::load(config_path, Path::new("."))?;
    let indexer = WorkspaceIndexer::new(&settings)?;
    let index = indexer.index_paths(paths).await?;

    let options = LintOptions {
        accelerators: settings.lint.accelerators,
        punctuation: settings.lint.punctuation,
    };

    let mut findings = index.findings;
    for file in &index.files {
        findings.extend(lint::check_catalog(
            &file.catalog,
            &file.path,
            file.detected_locale.as_deref(),
            &options,
        ));
    }
    findings.sort_by(|a, b| a.file.cmp(&b.file).then(a.line.cmp(&b.line)));

    print_findings(&findings, format)?;

    let failed = lint::has_errors(&findings) || (deny_warnings && !findings.is_empty());
    Ok(if failed { EXIT_FINDINGS } else { EXIT_OK })
}

/// Writes findings to stdout in the requested format.
fn print_findings(findings: &[Finding], format: OutputFormat) -> Result<(), CliError> {
    match format {
        OutputFormat::Text => {
            for finding in findings {
                println!("{finding}");
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(findings)?),
    }
    Ok(())
}

/// Renders per-catalog and cross-locale statistics, optionally gating on coverage.
async fn stats_command(
    config_path: Option<&Path>,
    paths: &[PathBuf],
    format: OutputFormat,
    check: bool,
) -> Result<u8, CliError> {
    let settings = config::load(config_path, Path::new("."))?;
    let indexer = WorkspaceIndexer::new(&settings)?;
    let index = indexer.index_paths(paths).await?;

    // Unparseable files cannot be measured; surface them off to the side
    for finding in &index.findings {
        eprintln!("{finding}");
    }

    let report = StatsReport::collect(&index.files);
    match format {
        OutputFormat::Text => print!("{}", report.render_text()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    if !check {
        return Ok(if index.findings.is_empty() { EXIT_OK } else { EXIT_FINDINGS });
    }

    let minimum = settings.coverage_minimum();
    let failing = report.below_threshold(&settings);
    for stats in &failing {
        eprintln!(
            "{}: coverage {:.1}% is below the minimum {:.1}%",
            stats.file.display(),
            stats.coverage_percent,
            minimum
        );
    }

    let failed = !failing.is_empty() || !index.findings.is_empty();
    Ok(if failed { EXIT_FINDINGS } else { EXIT_OK })
}

/// Resolves one translation from a single catalog file.
fn lookup_command(
    file: &Path,
    context: &str,
    source: &str,
    args: &[String],
    comment: Option<&str>,
    count: Option<i64>,
) -> Result<u8, CliError> {
    let catalog_file = input::load_catalog_file(file)?;
    let catalog = &catalog_file.catalog;

    let resolved = match count {
        Some(n) => catalog.translate_n(context, source, comment, n),
        None => catalog.translate(context, source, comment),
    };

    let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
    let resolved = if arg_refs.is_empty() {
        resolved.into_owned()
    } else {
        plural::substitute(&resolved, None, &arg_refs)
    };

    println!("{resolved}");
    Ok(EXIT_OK)
}

/// Rewrites a catalog in canonical form, or reports whether it already is.
fn format_command(file: &Path, write: bool, check: bool) -> Result<u8, CliError> {
    let original = std::fs::read_to_string(file)
        .map_err(|source| InputError::Read { path: file.to_path_buf(), source })?;
    let catalog_file = input::parse_catalog_file(file, &original)?;
    let canonical = syntax::to_xml(&catalog_file.catalog);
    let changed = canonical != original;

    if write {
        if changed {
            input::save_catalog_file(file, &catalog_file.catalog)?;
        }
        return Ok(EXIT_OK);
    }

    if check {
        if changed {
            eprintln!("{}: not in canonical form", file.display());
            return Ok(EXIT_FINDINGS);
        }
        return Ok(EXIT_OK);
    }

    print!("{canonical}");
    Ok(EXIT_OK)
}

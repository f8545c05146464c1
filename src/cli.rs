//! Command-line interface definitions using clap derive macros.
//!
//! Contains the top-level [`Cli`] parser, the [`Commands`] enum for
//! subcommands (serve, map, design, url, validate, init), and their
//! associated argument structs. Flags have environment variable
//! equivalents for deployments where CouchDB launches the binary.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "docviews",
    version,
    about = "Native CouchDB query server for switch, flow and tag views",
    propagate_version = true,
    after_help = "\x1b[1mQuick start:\x1b[0m\n  \
        docviews design > ddocs.json         Design documents for the built-in views\n  \
        docviews serve                       Run as a CouchDB query server on stdio\n  \
        docviews map tags flows.json         Evaluate a view over local documents"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the query server on stdin/stdout
    Serve(ServeArgs),

    /// Evaluate a view over documents from a file or stdin
    Map(MapArgs),

    /// Print design documents for the configured views
    Design(DesignArgs),

    /// Print the query URL of a view
    Url(UrlArgs),

    /// Validate a config file
    Validate(ValidateArgs),

    /// Generate a starter config file
    Init(InitArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    /// Config file path (.yaml, .json, .toml); auto-detected when omitted
    #[arg(short, long, env = "DOCVIEWS_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct LogArgs {
    /// Log level
    #[arg(short, long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: LogLevel,

    /// Force pretty (human-readable) log output
    #[arg(long)]
    pub pretty: bool,

    /// Force JSON log output (overrides TTY detection)
    #[arg(long, conflicts_with = "pretty")]
    pub json: bool,
}

#[derive(Args)]
#[command(after_help = "\x1b[1mCouchDB setup (local.ini):\x1b[0m\n  \
        [query_servers]\n  \
        docviews = /usr/local/bin/docviews serve")]
pub struct ServeArgs {
    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Args)]
#[command(after_help = "\x1b[1mExamples:\x1b[0m\n  \
        docviews map switch switches.json             All rows of the switch view\n  \
        docviews map tags flows.ndjson --key core     Flows tagged 'core'\n  \
        cat flows.json | docviews map flow            Read documents from stdin")]
pub struct MapArgs {
    /// View name, or <design>/<name>
    pub view: String,

    /// JSON array or NDJSON file of documents (stdin when omitted)
    pub input: Option<PathBuf>,

    /// Only print rows with this key
    #[arg(short, long)]
    pub key: Option<String>,

    #[command(flatten)]
    pub config: ConfigArgs,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Args)]
pub struct DesignArgs {
    /// Only print design documents for this database
    #[arg(short, long)]
    pub database: Option<String>,

    #[command(flatten)]
    pub config: ConfigArgs,
}

#[derive(Args)]
pub struct UrlArgs {
    /// View name, or <design>/<name>
    pub view: String,

    /// Restrict the query to one key
    #[arg(short, long)]
    pub key: Option<String>,

    /// CouchDB server (overrides the config connection)
    #[arg(long, env = "COUCHDB_SERVER")]
    pub server: Option<String>,

    #[command(flatten)]
    pub config: ConfigArgs,
}

#[derive(Args)]
pub struct ValidateArgs {
    /// Config file to validate
    #[arg(default_value = "docviews.yaml")]
    pub config: PathBuf,

    /// Output format
    #[arg(long, default_value = "text")]
    pub format: ValidateFormat,
}

#[derive(Args)]
pub struct InitArgs {
    /// Output format
    #[arg(short, long, default_value = "yaml")]
    pub format: ConfigFormat,

    /// Output file path
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    #[must_use]
    pub const fn to_tracing_level(&self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

#[derive(Clone, Debug, ValueEnum)]
pub enum ConfigFormat {
    Yaml,
    Json,
    Toml,
}

impl ConfigFormat {
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Yaml => "yaml",
            Self::Json => "json",
            Self::Toml => "toml",
        }
    }
}

#[derive(Clone, Debug, ValueEnum)]
pub enum ValidateFormat {
    Text,
    Json,
}

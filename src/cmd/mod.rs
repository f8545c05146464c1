//! Subcommand dispatch and execution.
//!
//! The [`dispatch`] function routes the parsed CLI to the appropriate
//! subcommand handler: [`serve`], [`map`], [`design`], [`url`],
//! [`validate`], or [`init`]. Each handler lives in its own submodule.

pub mod design;
pub mod init;
pub mod map;
pub mod serve;
pub mod url;
pub mod validate;

use std::path::Path;

use crate::catalog::Catalog;
use crate::cli::{Cli, Commands, ConfigArgs};
use crate::config::model::Config;
use crate::config::ConfigResolver;
use crate::error::DocviewsError;

pub async fn dispatch(cli: Cli) -> Result<(), DocviewsError> {
    match cli.command {
        Some(Commands::Serve(ref args)) => serve::execute(args).await,
        Some(Commands::Map(ref args)) => map::execute(args).await,
        Some(Commands::Design(ref args)) => design::execute(args).await,
        Some(Commands::Url(ref args)) => url::execute(args).await,
        Some(Commands::Validate(ref args)) => validate::execute(args).await,
        Some(Commands::Init(ref args)) => init::execute(args),
        None => {
            print_welcome();
            Ok(())
        }
    }
}

/// Resolve, load, and validate the config selected by `args`.
pub async fn load_config(args: &ConfigArgs) -> Result<(Config, Catalog), DocviewsError> {
    let resolver = ConfigResolver::discover(args.config.as_deref(), Path::new(".")).await?;
    let (config, source) = resolver.load_with_fallback().await?;
    let catalog = config.catalog()?;
    tracing::debug!(source, views = catalog.len(), "catalog loaded");
    Ok((config, catalog))
}

fn print_welcome() {
    let version = env!("CARGO_PKG_VERSION");
    println!(
        "\n  docviews v{version}: CouchDB map views for switches, flows and tags\n\n  \
         No command provided. To get started:\n\n    \
         docviews design                   Print design documents for the built-in views\n    \
         docviews serve                    Run as a CouchDB query server\n    \
         docviews map tags flows.json      Evaluate a view over local documents\n    \
         docviews --help                   See all commands and options\n"
    );
}

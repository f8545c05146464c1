//! `docviews url`: print the query URL of a view.

use url::Url;

use crate::catalog::Catalog;
use crate::cli::UrlArgs;
use crate::config::connection::parse_server;
use crate::config::model::Config;
use crate::error::DocviewsError;

pub async fn execute(args: &UrlArgs) -> Result<(), DocviewsError> {
    let (config, catalog) = super::load_config(&args.config).await?;
    println!("{}", query_url(args, &config, &catalog)?);
    Ok(())
}

/// `--server` wins over the configured connection.
fn query_url(args: &UrlArgs, config: &Config, catalog: &Catalog) -> Result<Url, DocviewsError> {
    let def = catalog.find(&args.view)?;
    let server = match args.server {
        Some(ref server) => parse_server(server).map_err(DocviewsError::InvalidConnection)?,
        None => config.connection()?.server,
    };
    def.query_url(&server, args.key.as_deref())
}

//! `docviews serve`: run the CouchDB query server on stdio.

use crate::cli::ServeArgs;
use crate::error::DocviewsError;
use crate::logging;
use crate::protocol::{stdio, QueryServer};

pub async fn execute(args: &ServeArgs) -> Result<(), DocviewsError> {
    logging::init(
        &args.log.log_level,
        logging::resolve_format(args.log.pretty, args.log.json),
    );

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "query server started");

    let mut server = QueryServer::new();
    let stats = stdio::serve_stdio(&mut server).await?;

    tracing::info!(
        commands = stats.commands,
        documents = stats.documents,
        map_failures = stats.map_failures,
        errors = stats.errors,
        "query server stopped"
    );
    Ok(())
}

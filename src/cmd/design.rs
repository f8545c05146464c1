//! `docviews design`: print design documents for the configured views.
//!
//! Output is a JSON array of `{"database", "document"}` objects, ready to
//! be PUT to `<server>/<database>/<document._id>`.

use crate::catalog::{Catalog, DesignDocument};
use crate::cli::DesignArgs;
use crate::error::DocviewsError;

pub async fn execute(args: &DesignArgs) -> Result<(), DocviewsError> {
    let (config, catalog) = super::load_config(&args.config).await?;
    let docs = select(&catalog, &config.language, args.database.as_deref());
    println!("{}", serde_json::to_string_pretty(&docs)?);
    Ok(())
}

fn select(catalog: &Catalog, language: &str, database: Option<&str>) -> Vec<DesignDocument> {
    catalog
        .design_documents(language)
        .into_iter()
        .filter(|d| database.map_or(true, |db| d.database == db))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_filter_keeps_matching_documents() {
        let docs = select(&Catalog::default(), "docviews", Some("flows"));
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].document["_id"], "_design/flows");
        assert_eq!(docs[0].document["views"]["flow"]["map"], "identity");
    }

    #[test]
    fn no_filter_keeps_everything() {
        assert_eq!(select(&Catalog::default(), "docviews", None).len(), 3);
        assert!(select(&Catalog::default(), "docviews", Some("ports")).is_empty());
    }
}

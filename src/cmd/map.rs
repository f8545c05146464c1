//! `docviews map`: evaluate one view over local documents.
//!
//! Reads a JSON array or NDJSON from a file or stdin, prints one JSON row
//! per line sorted by key then id, and logs documents the view rejects.

use tokio::io::AsyncReadExt;

use crate::catalog::ViewDef;
use crate::cli::MapArgs;
use crate::error::DocviewsError;
use crate::logging;
use crate::query;
use crate::views;

pub async fn execute(args: &MapArgs) -> Result<(), DocviewsError> {
    logging::init(
        &args.log.log_level,
        logging::resolve_format(args.log.pretty, args.log.json),
    );

    let (_, catalog) = super::load_config(&args.config).await?;
    let def = catalog.find(&args.view)?;

    let (content, label) = match args.input {
        Some(ref path) => (
            tokio::fs::read_to_string(path).await?,
            path.display().to_string(),
        ),
        None => {
            let mut buf = String::new();
            tokio::io::stdin().read_to_string(&mut buf).await?;
            (buf, "stdin".to_string())
        }
    };

    let (documents, result) = evaluate(def, &content, &label, args.key.as_deref())?;

    for failure in &result.failures {
        tracing::warn!(
            index = failure.index,
            doc_id = failure.id.as_deref().unwrap_or("<no _id>"),
            error = %failure.error,
            "document skipped"
        );
    }

    for row in &result.rows {
        println!("{}", serde_json::to_string(row)?);
    }

    tracing::info!(
        view = %def.view_path(),
        documents,
        rows = result.rows.len(),
        skipped = result.failures.len(),
        "view evaluated"
    );
    Ok(())
}

/// Parse `content` and run the view over it, returning the document count
/// alongside the rows.
fn evaluate(
    def: &ViewDef,
    content: &str,
    label: &str,
    key: Option<&str>,
) -> Result<(usize, query::QueryResult), DocviewsError> {
    let docs = query::parse_documents(content, label)?;
    let view = views::build(&def.kind);
    Ok((docs.len(), query::run(view.as_ref(), &docs, key)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    const FLOWS: &str = r#"{"_id": "f2", "tags": ["edge", "core"]}
{"_id": "f1", "tags": ["core", "core"]}
{"_id": "f3", "tags": "core"}
"#;

    #[test]
    fn tags_view_over_ndjson() {
        let catalog = Catalog::default();
        let (documents, result) =
            evaluate(catalog.find("tags").unwrap(), FLOWS, "flows.ndjson", Some("core")).unwrap();
        assert_eq!(documents, 3);
        let ids: Vec<_> = result.rows.iter().map(|r| r.id.as_deref()).collect();
        assert_eq!(ids, vec![Some("f1"), Some("f1"), Some("f2")]);
        assert_eq!(result.failures.len(), 1);
        assert_eq!(result.failures[0].id.as_deref(), Some("f3"));
    }

    #[test]
    fn invalid_input_is_reported() {
        let catalog = Catalog::default();
        let err = evaluate(catalog.find("switch").unwrap(), "[1, 2]", "switches.json", None)
            .unwrap_err();
        assert!(matches!(err, DocviewsError::InvalidDocuments { .. }));
    }
}

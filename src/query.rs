//! Offline view evaluation.
//!
//! Runs a view over a batch of documents and produces CouchDB-style rows
//! (`id`, `key`, `value`), sorted by key and then document id, optionally
//! restricted to one key. This mirrors a `?key=` lookup against the real
//! index without reimplementing it.

use serde::Serialize;
use serde_json::Value;

use crate::error::{DocviewsError, ViewError};
use crate::views::{Document, View};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    pub id: Option<String>,
    pub key: String,
    pub value: Value,
}

/// A document the view could not map, by position in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub index: usize,
    pub id: Option<String>,
    pub error: ViewError,
}

#[derive(Debug, Default)]
pub struct QueryResult {
    pub rows: Vec<Row>,
    pub failures: Vec<Failure>,
}

/// Parse either a JSON array of documents or newline-delimited JSON.
pub fn parse_documents(content: &str, source_label: &str) -> Result<Vec<Document>, DocviewsError> {
    let invalid = |reason: String| DocviewsError::InvalidDocuments {
        source_label: source_label.to_string(),
        reason,
    };

    let trimmed = content.trim_start();
    let values: Vec<Value> = if trimmed.starts_with('[') {
        serde_json::from_str(trimmed).map_err(|e| invalid(e.to_string()))?
    } else {
        trimmed
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(n, line)| {
                serde_json::from_str(line).map_err(|e| invalid(format!("line {}: {e}", n + 1)))
            })
            .collect::<Result<_, _>>()?
    };

    values
        .into_iter()
        .enumerate()
        .map(|(i, value)| {
            Document::from_value(value)
                .ok_or_else(|| invalid(format!("item {i} is not a JSON object")))
        })
        .collect()
}

/// Map every document, collecting rows and per-document failures.
pub fn run(view: &dyn View, docs: &[Document], key: Option<&str>) -> QueryResult {
    let mut result = QueryResult::default();

    for (index, doc) in docs.iter().enumerate() {
        match view.map(doc) {
            Ok(emits) => result.rows.extend(
                emits
                    .into_iter()
                    .filter(|e| key.map_or(true, |k| e.key == k))
                    .map(|e| Row {
                        id: doc.id().map(str::to_string),
                        key: e.key,
                        value: e.value,
                    }),
            ),
            Err(error) => result.failures.push(Failure {
                index,
                id: doc.id().map(str::to_string),
                error,
            }),
        }
    }

    result
        .rows
        .sort_by(|a, b| a.key.cmp(&b.key).then_with(|| a.id.cmp(&b.id)));
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::{IdentityView, TagsView};
    use serde_json::json;

    fn docs() -> Vec<Document> {
        parse_documents(
            r#"[
                {"_id": "f2", "tags": ["edge", "core"]},
                {"_id": "f1", "tags": ["core"]},
                {"_id": "f3"}
            ]"#,
            "test",
        )
        .unwrap()
    }

    #[test]
    fn parses_ndjson() {
        let docs = parse_documents("{\"_id\": \"a\"}\n\n{\"_id\": \"b\"}\n", "stdin").unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[1].id(), Some("b"));
    }

    #[test]
    fn rejects_non_objects() {
        let err = parse_documents("[1]", "test").unwrap_err();
        assert!(err.to_string().contains("item 0 is not a JSON object"));
        let err = parse_documents("{\"_id\": 1}\nnope", "test").unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn rows_sorted_by_key_then_id() {
        let result = run(&TagsView::default(), &docs(), None);
        let order: Vec<(&str, Option<&str>)> = result
            .rows
            .iter()
            .map(|r| (r.key.as_str(), r.id.as_deref()))
            .collect();
        assert_eq!(
            order,
            vec![("core", Some("f1")), ("core", Some("f2")), ("edge", Some("f2"))]
        );
        assert!(result.failures.is_empty());
    }

    #[test]
    fn key_filter_restricts_rows() {
        let result = run(&IdentityView::default(), &docs(), Some("f3"));
        assert_eq!(result.rows.len(), 1);
        assert_eq!(result.rows[0].value, json!({"_id": "f3"}));
    }

    #[test]
    fn failures_do_not_stop_other_documents() {
        let docs = parse_documents(r#"[{"tags": ["a"]}, {"_id": "ok"}]"#, "test").unwrap();
        let result = run(&IdentityView::default(), &docs, None);
        assert_eq!(result.rows.len(), 1);
        assert_eq!(result.failures.len(), 1);
        assert_eq!(result.failures[0].index, 0);
    }
}

//! Tag fan-out: one `(tag, document)` pair per tag occurrence.
//!
//! Duplicate labels on the same document are emitted once per occurrence,
//! so the index counts how many times a document carries a tag. An absent
//! or `null` field yields nothing; any shape other than an array of
//! strings is a [`ViewError::MalformedTags`].

use serde_json::Value;

use super::{Document, Emit, View};
use crate::error::ViewError;

/// Fans a document out over the labels in `field`.
///
/// Only an array of strings is accepted. A bare string, number, boolean
/// or object in the field is a [`ViewError::MalformedTags`] for that
/// document; it is never coerced into a label or treated as absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagsView {
    field: String,
}

impl TagsView {
    #[must_use]
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Tag labels carried by `doc`, in document order.
    pub fn labels<'d>(&self, doc: &'d Document) -> Result<Option<Vec<&'d str>>, ViewError> {
        let Some(value) = doc.get(&self.field) else {
            return Ok(None);
        };
        match value {
            Value::Null => Ok(None),
            Value::Array(items) => items
                .iter()
                .map(|item| item.as_str().ok_or_else(|| self.malformed(item)))
                .collect::<Result<Vec<_>, _>>()
                .map(Some),
            other => Err(self.malformed(other)),
        }
    }

    fn malformed(&self, found: &Value) -> ViewError {
        ViewError::MalformedTags {
            field: self.field.clone(),
            found: json_type(found),
        }
    }
}

impl Default for TagsView {
    fn default() -> Self {
        Self::new("tags")
    }
}

impl View for TagsView {
    fn map(&self, doc: &Document) -> Result<Vec<Emit>, ViewError> {
        let Some(labels) = self.labels(doc)? else {
            return Ok(Vec::new());
        };
        if labels.is_empty() {
            return Ok(Vec::new());
        }
        let value = doc.to_value();
        Ok(labels
            .into_iter()
            .map(|label| Emit::new(label, value.clone()))
            .collect())
    }
}

const fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

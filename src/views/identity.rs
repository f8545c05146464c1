//! Identity projection: one `(id, document)` pair per document.
//!
//! Backs the `switch` and `flow` views, which index switch and flow
//! records by their identifier.

use super::{Document, Emit, View};
use crate::error::ViewError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityView {
    id_field: String,
}

impl IdentityView {
    #[must_use]
    pub fn new(id_field: impl Into<String>) -> Self {
        Self {
            id_field: id_field.into(),
        }
    }
}

impl Default for IdentityView {
    fn default() -> Self {
        Self::new("_id")
    }
}

impl View for IdentityView {
    fn map(&self, doc: &Document) -> Result<Vec<Emit>, ViewError> {
        let id = doc
            .id_in(&self.id_field)
            .ok_or_else(|| ViewError::MissingId {
                field: self.id_field.clone(),
            })?;
        Ok(vec![Emit::new(id, doc.to_value())])
    }
}

//! Map views over CouchDB documents.
//!
//! A [`View`] takes one [`Document`] and returns the [`Emit`] pairs it
//! contributes to an index. Views are pure: no shared state, no I/O, and
//! a failure on one document never affects another. The concrete views
//! are [`IdentityView`] (keyed by document id) and [`TagsView`] (one pair
//! per tag occurrence). [`ViewKind`] is the serializable definition that
//! builds either of them.

pub mod identity;
pub mod kind;
pub mod tags;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub use identity::IdentityView;
pub use kind::ViewKind;
pub use tags::TagsView;

use crate::error::ViewError;

/// A semi-structured document as stored in a CouchDB database.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document(Map<String, Value>);

impl Document {
    #[must_use]
    pub const fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Wrap an arbitrary JSON value. Returns `None` unless it is an object.
    #[must_use]
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self(fields)),
            _ => None,
        }
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// The string identifier stored under `field`, if any.
    #[must_use]
    pub fn id_in(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(Value::as_str)
    }

    /// The CouchDB `_id` of the document.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id_in("_id")
    }

    #[must_use]
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }
}

impl From<Map<String, Value>> for Document {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// One `(key, value)` pair contributed to an index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Emit {
    pub key: String,
    pub value: Value,
}

impl Emit {
    #[must_use]
    pub fn new(key: impl Into<String>, value: Value) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }

    /// Wire form used by the query server: `[key, value]`.
    #[must_use]
    pub fn to_pair(&self) -> Value {
        Value::Array(vec![Value::String(self.key.clone()), self.value.clone()])
    }
}

pub trait View: Send + Sync {
    fn map(&self, doc: &Document) -> Result<Vec<Emit>, ViewError>;
}

/// Build the concrete view for a definition.
#[must_use]
pub fn build(kind: &ViewKind) -> Box<dyn View> {
    match kind {
        ViewKind::Identity { id_field } => Box::new(IdentityView::new(id_field.clone())),
        ViewKind::Tags { field } => Box::new(TagsView::new(field.clone())),
    }
}

//! Textual view definitions.
//!
//! A [`ViewKind`] is written as `identity`, `identity:<field>`, `tags` or
//! `tags:<field>`. The same text is used in config files, as the `map`
//! source of generated design documents, and as the `add_fun` payload
//! CouchDB sends back to the query server.

use std::fmt;
use std::str::FromStr;

const DEFAULT_ID_FIELD: &str = "_id";
const DEFAULT_TAGS_FIELD: &str = "tags";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ViewKind {
    Identity { id_field: String },
    Tags { field: String },
}

impl ViewKind {
    #[must_use]
    pub fn identity() -> Self {
        Self::Identity {
            id_field: DEFAULT_ID_FIELD.to_string(),
        }
    }

    #[must_use]
    pub fn tags() -> Self {
        Self::Tags {
            field: DEFAULT_TAGS_FIELD.to_string(),
        }
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identity { id_field } if id_field == DEFAULT_ID_FIELD => f.write_str("identity"),
            Self::Identity { id_field } => write!(f, "identity:{id_field}"),
            Self::Tags { field } if field == DEFAULT_TAGS_FIELD => f.write_str("tags"),
            Self::Tags { field } => write!(f, "tags:{field}"),
        }
    }
}

impl FromStr for ViewKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (head, field) = match s.split_once(':') {
            Some((head, field)) => (head, Some(field.trim())),
            None => (s, None),
        };
        if field.is_some_and(str::is_empty) {
            return Err(format!("'{s}' names an empty field"));
        }
        match head.trim() {
            "identity" => Ok(Self::Identity {
                id_field: field.unwrap_or(DEFAULT_ID_FIELD).to_string(),
            }),
            "tags" => Ok(Self::Tags {
                field: field.unwrap_or(DEFAULT_TAGS_FIELD).to_string(),
            }),
            other => Err(format!(
                "unknown view kind '{other}' (expected 'identity' or 'tags')"
            )),
        }
    }
}

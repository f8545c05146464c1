//! Serde data structures for the docviews configuration file.
//!
//! Contains [`Config`] (the root) and [`ViewEntry`]. Both derive
//! `Serialize` and `Deserialize` with `deny_unknown_fields` for strict
//! parsing. Fields are kept as raw strings so that validation can report
//! every problem at once; [`Config::catalog`] converts a validated config
//! into a [`Catalog`].

use serde::{Deserialize, Serialize};

use super::connection::Connection;
use super::validation::validate;
use crate::catalog::{Catalog, ViewDef, DEFAULT_LANGUAGE};
use crate::error::{DocviewsError, ValidationError};

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

fn is_default_language(v: &str) -> bool {
    v == DEFAULT_LANGUAGE
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection: Option<String>,

    #[serde(
        default = "default_language",
        skip_serializing_if = "is_default_language"
    )]
    pub language: String,

    pub views: Vec<ViewEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ViewEntry {
    pub name: String,

    pub design: String,

    /// Defaults to the design group name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,

    pub kind: String,
}

impl ViewEntry {
    #[must_use]
    pub fn database(&self) -> &str {
        self.database.as_deref().unwrap_or(&self.design)
    }
}

impl Config {
    /// The config equivalent of [`Catalog::default`].
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            connection: None,
            language: default_language(),
            views: Catalog::default()
                .views()
                .iter()
                .map(|v| ViewEntry {
                    name: v.name.clone(),
                    design: v.design.clone(),
                    database: (v.database != v.design).then(|| v.database.clone()),
                    kind: v.kind.to_string(),
                })
                .collect(),
        }
    }

    /// Validate and convert into a [`Catalog`].
    pub fn catalog(&self) -> Result<Catalog, DocviewsError> {
        validate(self).map_err(|errors| DocviewsError::ConfigValidation { errors })?;
        let mut views = Vec::with_capacity(self.views.len());
        for entry in &self.views {
            let kind = entry
                .kind
                .parse()
                .map_err(|e: String| DocviewsError::ConfigValidation {
                    errors: vec![ValidationError {
                        view: entry.name.clone(),
                        field: "kind".into(),
                        message: e,
                        suggestion: None,
                    }],
                })?;
            views.push(ViewDef::new(
                &entry.name,
                &entry.design,
                entry.database(),
                kind,
            ));
        }
        Ok(Catalog::new(views))
    }

    /// The configured connection, or the local default when none is set.
    pub fn connection(&self) -> Result<Connection, DocviewsError> {
        self.connection
            .as_deref()
            .map_or_else(Connection::local, Connection::parse)
            .map_err(DocviewsError::InvalidConnection)
    }
}

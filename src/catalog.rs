//! View registration metadata.
//!
//! A [`ViewDef`] names a view, its design group, and the database it
//! indexes. A [`Catalog`] is the full set of registered views: it resolves
//! names, renders design documents, and builds query URLs of the form
//! `<server>/<database>/_design/<group>/_view/<name>?key=...`.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{json, Map, Value};
use url::Url;

use crate::error::DocviewsError;
use crate::views::ViewKind;

/// Design-document language understood by the `docviews serve` query server.
pub const DEFAULT_LANGUAGE: &str = "docviews";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewDef {
    pub name: String,
    pub design: String,
    pub database: String,
    pub kind: ViewKind,
}

impl ViewDef {
    #[must_use]
    pub fn new(name: &str, design: &str, database: &str, kind: ViewKind) -> Self {
        Self {
            name: name.to_string(),
            design: design.to_string(),
            database: database.to_string(),
            kind,
        }
    }

    #[must_use]
    pub fn design_id(&self) -> String {
        format!("_design/{}", self.design)
    }

    /// Path of the view relative to its database.
    #[must_use]
    pub fn view_path(&self) -> String {
        format!("_design/{}/_view/{}", self.design, self.name)
    }

    /// Absolute query URL for this view, optionally restricted to one key.
    pub fn query_url(&self, server: &Url, key: Option<&str>) -> Result<Url, DocviewsError> {
        let mut url = server.clone();
        url.path_segments_mut()
            .map_err(|()| {
                DocviewsError::InvalidConnection(format!("'{server}' cannot be a base URL"))
            })?
            .pop_if_empty()
            .push(&self.database)
            .push("_design")
            .push(&self.design)
            .push("_view")
            .push(&self.name);
        url.set_query(None);
        if let Some(key) = key {
            let encoded = serde_json::to_string(key)?;
            url.query_pairs_mut().append_pair("key", &encoded);
        }
        Ok(url)
    }
}

/// One rendered design document and the database it belongs in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DesignDocument {
    pub database: String,
    pub document: Value,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    views: Vec<ViewDef>,
}

impl Default for Catalog {
    /// The `switch`, `flow` and `tags` views used by the switch controller.
    fn default() -> Self {
        Self::new(vec![
            ViewDef::new("switch", "switches", "switches", ViewKind::identity()),
            ViewDef::new("flow", "flows", "flows", ViewKind::identity()),
            ViewDef::new("tags", "tags", "tags", ViewKind::tags()),
        ])
    }
}

impl Catalog {
    #[must_use]
    pub const fn new(views: Vec<ViewDef>) -> Self {
        Self { views }
    }

    #[must_use]
    pub fn views(&self) -> &[ViewDef] {
        &self.views
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.views.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    /// Look up a view by name, or by `<design>/<name>` when names collide.
    pub fn find(&self, name: &str) -> Result<&ViewDef, DocviewsError> {
        let found = match name.split_once('/') {
            Some((design, view)) => self
                .views
                .iter()
                .find(|v| v.design == design && v.name == view),
            None => self.views.iter().find(|v| v.name == name),
        };
        found.ok_or_else(|| DocviewsError::UnknownView {
            name: name.to_string(),
            known: self
                .views
                .iter()
                .map(|v| v.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        })
    }

    /// Render one design document per `(database, design)` pair, sorted by
    /// database then design.
    #[must_use]
    pub fn design_documents(&self, language: &str) -> Vec<DesignDocument> {
        let mut groups: BTreeMap<(&str, &str), Map<String, Value>> = BTreeMap::new();
        for view in &self.views {
            groups
                .entry((view.database.as_str(), view.design.as_str()))
                .or_default()
                .insert(view.name.clone(), json!({ "map": view.kind.to_string() }));
        }

        groups
            .into_iter()
            .map(|((database, design), views)| DesignDocument {
                database: database.to_string(),
                document: json!({
                    "_id": format!("_design/{design}"),
                    "language": language,
                    "views": views,
                }),
            })
            .collect()
    }
}

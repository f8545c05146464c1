//! Configuration validation with detailed error reporting.
//!
//! The [`validate`] function checks a parsed [`Config`] for structural
//! errors such as an empty catalog, invalid view or design names,
//! duplicate registrations, unknown view kinds, and malformed connection
//! strings. Returns a list of [`ValidationError`] values with per-field
//! suggestions.

use std::collections::HashSet;

use super::connection::Connection;
use super::model::Config;
use crate::catalog::Catalog;
use crate::error::ValidationError;
use crate::views::ViewKind;

/// Validate a view or design name. Returns `Ok(())` or a human-readable error.
pub fn validate_name(kind: &str, name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err(format!("{kind} cannot be empty"));
    }
    if name.contains('/') {
        return Err(format!("{kind} cannot contain '/'"));
    }
    if name.starts_with('_') {
        return Err(format!("{kind} cannot start with '_' (reserved by CouchDB)"));
    }
    Ok(())
}

/// Validate a database name against CouchDB's naming rules.
pub fn validate_database(name: &str) -> Result<(), String> {
    let mut chars = name.chars();
    match chars.next() {
        None => return Err("database cannot be empty".into()),
        Some(c) if !c.is_ascii_lowercase() => {
            return Err(format!(
                "database '{name}' must start with a lowercase letter"
            ))
        }
        Some(_) => {}
    }
    if let Some(bad) = chars.find(|c| {
        !(c.is_ascii_lowercase() || c.is_ascii_digit() || "_$()+-/".contains(*c))
    }) {
        return Err(format!("database '{name}' contains invalid character '{bad}'"));
    }
    Ok(())
}

pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Some(ref conn) = config.connection {
        if let Err(msg) = Connection::parse(conn) {
            errors.push(ValidationError {
                view: "(root)".into(),
                field: "connection".into(),
                message: msg,
                suggestion: Some("expected e.g. 'driver=couchdb;server=localhost'".into()),
            });
        }
    }

    if config.language.trim().is_empty() {
        errors.push(ValidationError {
            view: "(root)".into(),
            field: "language".into(),
            message: "language cannot be empty".into(),
            suggestion: Some(format!("use '{}'", crate::catalog::DEFAULT_LANGUAGE)),
        });
    }

    if config.views.is_empty() {
        errors.push(ValidationError {
            view: "(root)".into(),
            field: "views".into(),
            message: "at least one view must be defined".into(),
            suggestion: None,
        });
        return Err(errors);
    }

    let mut seen = HashSet::new();

    for (i, entry) in config.views.iter().enumerate() {
        let view_id = if entry.name.is_empty() {
            format!("views[{i}]")
        } else {
            entry.name.clone()
        };

        if let Err(msg) = validate_name("name", &entry.name) {
            errors.push(ValidationError {
                view: view_id.clone(),
                field: "name".into(),
                message: msg,
                suggestion: None,
            });
        }

        if let Err(msg) = validate_name("design", &entry.design) {
            errors.push(ValidationError {
                view: view_id.clone(),
                field: "design".into(),
                message: msg,
                suggestion: entry
                    .design
                    .strip_prefix("_design/")
                    .map(|group| format!("did you mean '{group}'?")),
            });
        }

        if let Err(msg) = validate_database(entry.database()) {
            errors.push(ValidationError {
                view: view_id.clone(),
                field: "database".into(),
                message: msg,
                suggestion: None,
            });
        }

        if !seen.insert((entry.design.as_str(), entry.name.as_str())) {
            errors.push(ValidationError {
                view: view_id.clone(),
                field: "name".into(),
                message: format!("duplicate view in design '{}'", entry.design),
                suggestion: None,
            });
        }

        if let Err(msg) = entry.kind.parse::<ViewKind>() {
            errors.push(ValidationError {
                view: view_id.clone(),
                field: "kind".into(),
                message: msg,
                suggestion: Some("use 'identity', 'identity:<field>', 'tags' or 'tags:<field>'".into()),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[must_use]
/// Human-readable summary of a validated catalog.
pub fn format_validation_report(path: &str, catalog: &Catalog) -> String {
    let mut lines = vec![format!("  {} views\n", catalog.len())];

    for view in catalog.views() {
        lines.push(format!(
            "  {}  -> /{}/{}",
            view.name,
            view.database,
            view.view_path(),
        ));
        lines.push(format!("    map: {}", view.kind));
    }

    format!("{} is valid\n{}", path, lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::model::ViewEntry;

    fn entry(name: &str, design: &str, kind: &str) -> ViewEntry {
        ViewEntry {
            name: name.into(),
            design: design.into(),
            database: None,
            kind: kind.into(),
        }
    }

    fn config(views: Vec<ViewEntry>) -> Config {
        Config {
            connection: None,
            language: "docviews".into(),
            views,
        }
    }

    #[test]
    fn builtin_config_passes() {
        assert!(validate(&Config::builtin()).is_ok());
    }

    #[test]
    fn empty_views_fails() {
        let errors = validate(&config(vec![])).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("at least one view"));
    }

    #[test]
    fn duplicate_view_fails() {
        let errors = validate(&config(vec![
            entry("switch", "switches", "identity"),
            entry("switch", "switches", "tags"),
        ]))
        .unwrap_err();
        assert!(errors.iter().any(|e| e.message.contains("duplicate view")));
    }

    #[test]
    fn same_name_in_other_design_passes() {
        assert!(validate(&config(vec![
            entry("by_id", "switches", "identity"),
            entry("by_id", "flows", "identity"),
        ]))
        .is_ok());
    }

    #[test]
    fn design_prefix_gets_suggestion() {
        let errors = validate(&config(vec![entry("tags", "_design/tags", "tags")])).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.suggestion.as_deref() == Some("did you mean 'tags'?")));
    }

    #[test]
    fn unknown_kind_fails() {
        let errors = validate(&config(vec![entry("ports", "ports", "reduce")])).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "kind"));
    }

    #[test]
    fn bad_database_fails() {
        let mut e = entry("switch", "switches", "identity");
        e.database = Some("Switches".into());
        let errors = validate(&config(vec![e])).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.message.contains("must start with a lowercase letter")));
    }

    #[test]
    fn bad_connection_fails() {
        let mut c = Config::builtin();
        c.connection = Some("driver=mysql;server=localhost".into());
        let errors = validate(&c).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "connection"));
    }

    #[test]
    fn collects_every_error() {
        let mut c = config(vec![entry("", "a/b", "bogus")]);
        c.language = String::new();
        let errors = validate(&c).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert!(fields.contains(&"language"));
        assert!(fields.contains(&"name"));
        assert!(fields.contains(&"design"));
        assert!(fields.contains(&"kind"));
        assert_eq!(errors[1].view, "views[0]");
    }

    #[test]
    fn report_lists_view_paths() {
        let report = format_validation_report("docviews.yaml", &Catalog::default());
        assert!(report.starts_with("docviews.yaml is valid"));
        assert!(report.contains("3 views"));
        assert!(report.contains("switch  -> /switches/_design/switches/_view/switch"));
        assert!(report.contains("map: tags"));
    }
}

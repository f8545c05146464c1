//! Unified error types for docviews.
//!
//! Defines [`DocviewsError`] (the main crate error enum), [`ViewError`]
//! for failures scoped to a single document, and [`ValidationError`]
//! for config validation failures. All use `thiserror` or a manual
//! `Display`. Error messages include contextual hints to guide the user
//! toward a fix.

use std::path::PathBuf;

/// A map failure for one document. Never affects other documents.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ViewError {
    #[error("document has no string '{field}' field")]
    MissingId { field: String },

    #[error("'{field}' must be an array of strings, found {found}")]
    MalformedTags { field: String, found: &'static str },
}

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub view: String,
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "  view {}: {}: {}", self.view, self.field, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " ({suggestion})")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

fn format_errors(errors: &[ValidationError]) -> String {
    use std::fmt::Write;
    let mut buf = String::new();
    for (i, e) in errors.iter().enumerate() {
        if i > 0 {
            buf.push('\n');
        }
        // write! to String is infallible (only fails on OOM which is unrecoverable)
        let _ = write!(buf, "{e}");
    }
    buf
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum DocviewsError {
    #[error("No config source found.\n\n  {hint}")]
    NoConfigSource { hint: String },

    #[error("Config file not found: {}", path.display())]
    ConfigFileNotFound { path: PathBuf },

    #[error("Config parse error in {path}:\n  {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Config validation failed:\n{}", format_errors(.errors))]
    ConfigValidation { errors: Vec<ValidationError> },

    #[error("Unsupported config format: '{0}'")]
    UnsupportedFormat(String),

    #[error("Unknown view '{name}' (known: {known})")]
    UnknownView { name: String, known: String },

    #[error("Invalid connection string: {0}")]
    InvalidConnection(String),

    #[error("Invalid documents in {source_label}: {reason}")]
    InvalidDocuments { source_label: String, reason: String },

    #[error("File already exists: {}", path.display())]
    FileExists { path: PathBuf },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_display_includes_suggestion() {
        let err = ValidationError {
            view: "tags".into(),
            field: "design".into(),
            message: "design cannot contain '/'".into(),
            suggestion: Some("did you mean 'tags'?".into()),
        };
        assert_eq!(
            err.to_string(),
            "  view tags: design: design cannot contain '/' (did you mean 'tags'?)"
        );
    }

    #[test]
    fn config_validation_lists_every_error() {
        let errors = vec![
            ValidationError {
                view: "a".into(),
                field: "name".into(),
                message: "one".into(),
                suggestion: None,
            },
            ValidationError {
                view: "b".into(),
                field: "kind".into(),
                message: "two".into(),
                suggestion: None,
            },
        ];
        let msg = DocviewsError::ConfigValidation { errors }.to_string();
        assert!(msg.contains("view a: name: one"));
        assert!(msg.contains("view b: kind: two"));
    }
}

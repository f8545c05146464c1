//! Concrete [`ConfigSource`](super::ConfigSource) implementations.
//!
//! Provides file-based sources (YAML, JSON, TOML) gated by feature flags,
//! the [`builtin`] fallback, and the [`parse_config_str`] helper for
//! format-specific deserialization.

pub mod builtin;
pub mod file_source;

use std::path::{Path, PathBuf};

use crate::config::model::Config;
use crate::config::ConfigSource;
use crate::error::DocviewsError;

/// File names probed, in order, when no config path is given. A name
/// whose format was not compiled in is skipped.
pub const CANDIDATES: &[&str] = &[
    "docviews.yaml",
    "docviews.yml",
    "docviews.json",
    "docviews.toml",
];

/// Whether this build has a backend for the `ext` config format.
#[must_use]
pub fn format_enabled(ext: &str) -> bool {
    match ext {
        "yaml" | "yml" => cfg!(feature = "yaml"),
        "json" => cfg!(feature = "json"),
        "toml" => cfg!(feature = "toml"),
        _ => false,
    }
}

/// Parse a config string based on file extension.
pub fn parse_config_str(
    ext: &str,
    content: &str,
    path_display: &str,
) -> Result<Config, DocviewsError> {
    match ext {
        #[cfg(feature = "yaml")]
        "yaml" | "yml" => serde_yml::from_str(content).map_err(|e| DocviewsError::ConfigParse {
            path: path_display.to_string(),
            source: Box::new(e),
        }),

        #[cfg(feature = "json")]
        "json" => serde_json::from_str(content).map_err(|e| DocviewsError::ConfigParse {
            path: path_display.to_string(),
            source: Box::new(e),
        }),

        #[cfg(feature = "toml")]
        "toml" => toml::from_str(content).map_err(|e| DocviewsError::ConfigParse {
            path: path_display.to_string(),
            source: Box::new(e),
        }),

        other => Err(DocviewsError::UnsupportedFormat(other.to_string())),
    }
}

/// Build a file source for `path`, chosen by extension.
pub fn create_file_source(path: &Path) -> Result<Box<dyn ConfigSource>, DocviewsError> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    match ext {
        #[cfg(feature = "yaml")]
        "yaml" | "yml" => Ok(Box::new(file_source::FileSource::yaml(path.to_path_buf()))),

        #[cfg(feature = "json")]
        "json" => Ok(Box::new(file_source::FileSource::json(path.to_path_buf()))),

        #[cfg(feature = "toml")]
        "toml" => Ok(Box::new(file_source::FileSource::toml(path.to_path_buf()))),

        other => Err(DocviewsError::UnsupportedFormat(other.to_string())),
    }
}

/// Find the first candidate config file in `dir` that this build can read.
pub async fn detect_file(dir: &Path) -> Option<PathBuf> {
    for name in CANDIDATES {
        let path = dir.join(name);
        if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
            continue;
        }
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if !format_enabled(ext) {
            tracing::warn!(
                path = %path.display(),
                format = ext,
                "ignoring config file, support for this format is not compiled in"
            );
            continue;
        }
        tracing::info!(path = %path.display(), "auto-detected config file");
        return Some(path);
    }
    None
}

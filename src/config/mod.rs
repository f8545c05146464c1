//! Configuration loading and validation.
//!
//! Defines the [`ConfigSource`] trait for pluggable config sources and the
//! [`ConfigResolver`] for primary/fallback source resolution. When no file
//! is found the resolver falls back to the built-in catalog. Submodules
//! provide the data model, connection-string parsing, validation logic,
//! and concrete source implementations.

pub mod connection;
pub mod model;
pub mod sources;
pub mod validation;

use std::path::Path;

use async_trait::async_trait;

use crate::error::DocviewsError;
use model::Config;
use sources::builtin::BuiltinSource;

// async_trait is required here because ConfigSource is used as Box<dyn ConfigSource>
// and native async fn in traits does not support dyn dispatch.
#[async_trait]
pub trait ConfigSource: Send + Sync {
    fn name(&self) -> &'static str;
    async fn load(&self) -> Result<Config, DocviewsError>;
}

pub struct ConfigResolver {
    primary: Box<dyn ConfigSource>,
    fallback: Option<Box<dyn ConfigSource>>,
}

impl ConfigResolver {
    #[must_use]
    pub fn new(primary: Box<dyn ConfigSource>, fallback: Option<Box<dyn ConfigSource>>) -> Self {
        Self { primary, fallback }
    }

    /// Pick sources for an explicit path, or auto-detect a file in `dir`.
    ///
    /// An explicit path has no fallback. An auto-detected file falls back
    /// to the built-in catalog, and so does the absence of any file.
    pub async fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self, DocviewsError> {
        if let Some(path) = explicit {
            return Ok(Self::new(sources::create_file_source(path)?, None));
        }
        match sources::detect_file(dir).await {
            Some(path) => Ok(Self::new(
                sources::create_file_source(&path)?,
                Some(Box::new(BuiltinSource)),
            )),
            None => {
                tracing::info!("no config file found, using built-in views");
                Ok(Self::new(Box::new(BuiltinSource), None))
            }
        }
    }

    /// Load from the primary source, or the fallback if the primary is
    /// unavailable.
    ///
    /// Parse and validation failures are never masked: a file that exists
    /// but is invalid is reported rather than silently replaced.
    pub async fn load_with_fallback(&self) -> Result<(Config, &'static str), DocviewsError> {
        match self.primary.load().await {
            Ok(config) => Ok((config, self.primary.name())),
            Err(
                primary_err @ (DocviewsError::ConfigFileNotFound { .. } | DocviewsError::Io(_)),
            ) => {
                if let Some(ref fallback) = self.fallback {
                    tracing::warn!(
                        primary = self.primary.name(),
                        fallback = fallback.name(),
                        error = %primary_err,
                        "primary config source failed, using fallback"
                    );
                    Ok((fallback.load().await?, fallback.name()))
                } else {
                    Err(primary_err)
                }
            }
            Err(primary_err) => Err(primary_err),
        }
    }

    #[must_use]
    pub fn primary_name(&self) -> &str {
        self.primary.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Failing {
        invalid: bool,
    }

    #[async_trait]
    impl ConfigSource for Failing {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn load(&self) -> Result<Config, DocviewsError> {
            if self.invalid {
                Err(DocviewsError::ConfigValidation { errors: vec![] })
            } else {
                Err(DocviewsError::ConfigFileNotFound {
                    path: "docviews.yaml".into(),
                })
            }
        }
    }

    #[tokio::test]
    async fn falls_back_when_primary_fails() {
        let resolver = ConfigResolver::new(
            Box::new(Failing { invalid: false }),
            Some(Box::new(BuiltinSource)),
        );
        let (config, source) = resolver.load_with_fallback().await.unwrap();
        assert_eq!(source, "builtin");
        assert_eq!(config, Config::builtin());
    }

    #[tokio::test]
    async fn validation_errors_are_not_masked() {
        let resolver = ConfigResolver::new(
            Box::new(Failing { invalid: true }),
            Some(Box::new(BuiltinSource)),
        );
        let err = resolver.load_with_fallback().await.unwrap_err();
        assert!(matches!(err, DocviewsError::ConfigValidation { .. }));
    }

    #[tokio::test]
    async fn discover_without_file_uses_builtin() {
        let dir = std::env::temp_dir().join(format!("docviews-empty-{}", std::process::id()));
        tokio::fs::create_dir_all(&dir).await.unwrap();
        let resolver = ConfigResolver::discover(None, &dir).await.unwrap();
        assert_eq!(resolver.primary_name(), "builtin");
        let _ = tokio::fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn discover_explicit_unsupported_extension_fails() {
        let err = ConfigResolver::discover(Some(Path::new("views.xml")), Path::new("."))
            .await
            .err()
            .unwrap();
        assert!(matches!(err, DocviewsError::UnsupportedFormat(ref ext) if ext == "xml"));
    }

    #[tokio::test]
    async fn no_fallback_returns_primary_error() {
        let resolver = ConfigResolver::new(
            Box::new(Failing { invalid: false }),
            None,
        );
        assert!(resolver.load_with_fallback().await.is_err());
        assert_eq!(resolver.primary_name(), "failing");
    }
}

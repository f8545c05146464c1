//! `docviews validate`: check a config file and show what it registers.
//!
//! Loads the file through the same [`ConfigSource`](crate::config::ConfigSource)
//! used by the other commands, with no built-in fallback, then prints each
//! view's database and view path. Problems are listed all at once.

use serde_json::{json, Value};

use crate::catalog::Catalog;
use crate::cli::{ValidateArgs, ValidateFormat};
use crate::config::model::Config;
use crate::config::sources::create_file_source;
use crate::config::validation::format_validation_report;
use crate::error::{DocviewsError, ValidationError};

pub async fn execute(args: &ValidateArgs) -> Result<(), DocviewsError> {
    let path = args.config.display().to_string();
    let loaded = create_file_source(&args.config)?
        .load()
        .await
        .and_then(|config| config.catalog().map(|catalog| (config, catalog)));

    match loaded {
        Ok((config, catalog)) => {
            match args.format {
                ValidateFormat::Text => {
                    println!("\u{2713} {}", format_validation_report(&path, &catalog));
                }
                ValidateFormat::Json => println!("{}", valid_summary(&config, &catalog)?),
            }
            Ok(())
        }
        Err(DocviewsError::ConfigValidation { errors }) => {
            match args.format {
                ValidateFormat::Text => {
                    eprintln!("\u{2717} {path} has {} errors\n", errors.len());
                    for error in &errors {
                        eprintln!("{error}");
                    }
                }
                ValidateFormat::Json => println!("{}", invalid_summary(&errors)),
            }
            Err(DocviewsError::ConfigValidation { errors })
        }
        Err(e) => Err(e),
    }
}

fn valid_summary(config: &Config, catalog: &Catalog) -> Result<Value, DocviewsError> {
    let server = config.connection()?.server;
    let views: Vec<Value> = catalog
        .views()
        .iter()
        .map(|v| {
            json!({
                "name": v.name,
                "database": v.database,
                "path": v.view_path(),
                "map": v.kind.to_string(),
            })
        })
        .collect();
    Ok(json!({
        "valid": true,
        "server": server.as_str(),
        "language": config.language,
        "views": views,
    }))
}

fn invalid_summary(errors: &[ValidationError]) -> Value {
    let errors: Vec<Value> = errors
        .iter()
        .map(|e| {
            json!({
                "view": e.view,
                "field": e.field,
                "message": e.message,
                "suggestion": e.suggestion,
            })
        })
        .collect();
    json!({ "valid": false, "errors": errors })
}

//! `docviews init`: generate a starter configuration file.
//!
//! Writes the built-in `switch`, `flow` and `tags` catalog in YAML, JSON,
//! or TOML so it can be extended with further views.

use std::path::PathBuf;

use crate::cli::{ConfigFormat, InitArgs};
use crate::config::sources::format_enabled;
use crate::error::DocviewsError;

pub fn execute(args: &InitArgs) -> Result<(), DocviewsError> {
    let ext = args.format.extension();
    if !format_enabled(ext) {
        return Err(DocviewsError::UnsupportedFormat(ext.to_string()));
    }

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("docviews.{}", args.format.extension())));

    if output.exists() {
        return Err(DocviewsError::FileExists { path: output });
    }

    std::fs::write(&output, template(&args.format))?;
    println!("Created {}", output.display());
    Ok(())
}

#[must_use]
pub const fn template(format: &ConfigFormat) -> &'static str {
    match format {
        ConfigFormat::Yaml => YAML_TEMPLATE,
        ConfigFormat::Json => JSON_TEMPLATE,
        ConfigFormat::Toml => TOML_TEMPLATE,
    }
}

const YAML_TEMPLATE: &str = r#"# docviews config
#
# kind is one of: identity, identity:<id field>, tags, tags:<tags field>
# database defaults to the design group name.

# connection: "driver=couchdb;server=localhost;uid=root;pwd=admin"
# language: docviews

views:
  - name: switch
    design: switches
    kind: identity
  - name: flow
    design: flows
    kind: identity
  - name: tags
    design: tags
    kind: tags
"#;

const JSON_TEMPLATE: &str = r#"{
  "views": [
    { "name": "switch", "design": "switches", "kind": "identity" },
    { "name": "flow", "design": "flows", "kind": "identity" },
    { "name": "tags", "design": "tags", "kind": "tags" }
  ]
}
"#;

const TOML_TEMPLATE: &str = r#"# docviews config
#
# kind is one of: identity, identity:<id field>, tags, tags:<tags field>
# database defaults to the design group name.

# connection = "driver=couchdb;server=localhost;uid=root;pwd=admin"
# language = "docviews"

[[views]]
name = "switch"
design = "switches"
kind = "identity"

[[views]]
name = "flow"
design = "flows"
kind = "identity"

[[views]]
name = "tags"
design = "tags"
kind = "tags"
"#;

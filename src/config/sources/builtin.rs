//! Config source for the built-in `switch`, `flow` and `tags` catalog.

use async_trait::async_trait;

use crate::config::model::Config;
use crate::config::ConfigSource;
use crate::error::DocviewsError;

pub struct BuiltinSource;

#[async_trait]
impl ConfigSource for BuiltinSource {
    fn name(&self) -> &'static str {
        "builtin"
    }

    async fn load(&self) -> Result<Config, DocviewsError> {
        Ok(Config::builtin())
    }
}

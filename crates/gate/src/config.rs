//! Gate configuration loaded from TOML.

use crate::{Error, Result};
use policy::Response;
use serde::Deserialize;
use std::path::Path;

/// Gate configuration.
///
/// ```toml
/// deny_message = "You cannot do that."
/// deny_status = 403
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GateConfig {
    /// Message for denials produced from a `false` or undecided outcome.
    #[serde(default)]
    pub deny_message: Option<String>,

    /// Status for denials produced from a `false` or undecided outcome.
    #[serde(default)]
    pub deny_status: Option<u16>,
}

impl GateConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML string.
    pub fn parse(toml: &str) -> Result<Self> {
        toml::from_str(toml).map_err(|e| Error::Config(e.to_string()))
    }

    /// The response a non-response outcome coerces to when it does not allow.
    pub fn denial(&self) -> Response {
        let mut response = Response::deny();
        if let Some(message) = &self.deny_message {
            response = response.with_message(message.as_str());
        }
        if let Some(status) = self.deny_status {
            response = response.with_status(status);
        }
        response
    }
}

//! Allow/deny result values.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The outcome of an authorization check.
///
/// Carries the decision plus optional message, application code and
/// HTTP-style status. Setters consume and return the value, so a response is
/// built fluently and never mutated once handed out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    allowed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    code: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    status: Option<u16>,
}

impl Response {
    fn new(allowed: bool) -> Self {
        Self {
            allowed,
            message: None,
            code: None,
            status: None,
        }
    }

    /// An allowing response.
    pub fn allow() -> Self {
        Self::new(true)
    }

    /// A denying response.
    pub fn deny() -> Self {
        Self::new(false)
    }

    /// A denying response with the given status.
    pub fn deny_with_status(status: u16) -> Self {
        Self::deny().with_status(status)
    }

    /// A denying response that hides the resource (status 404).
    pub fn deny_as_not_found() -> Self {
        Self::deny_with_status(404)
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_code(mut self, code: impl Into<Value>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn allowed(&self) -> bool {
        self.allowed
    }

    pub fn denied(&self) -> bool {
        !self.allowed
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn code(&self) -> Option<&Value> {
        self.code.as_ref()
    }

    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// Return the response if allowed, otherwise the denial error carrying it.
    pub fn authorize(self) -> Result<Self> {
        if self.allowed {
            Ok(self)
        } else {
            Err(Error::Denied { response: self })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn allow_authorizes_to_itself() {
        let response = Response::allow().with_message("welcome");
        let authorized = response.clone().authorize().unwrap();
        assert_eq!(authorized, response);
        assert!(authorized.allowed());
        assert!(!authorized.denied());
    }

    #[test]
    fn deny_raises_with_status() {
        let err = Response::deny()
            .with_code("E_OWNER")
            .with_status(404)
            .authorize()
            .unwrap_err();

        assert_eq!(err.status(), Some(404));
        assert_eq!(err.response().and_then(Response::code), Some(&json!("E_OWNER")));
    }

    #[test]
    fn deny_as_not_found_sets_404() {
        let response = Response::deny_as_not_found();
        assert!(response.denied());
        assert_eq!(response.status(), Some(404));
        assert_eq!(response.message(), None);
    }

    #[test]
    fn serializes_without_unset_fields() {
        let value = serde_json::to_value(Response::deny_with_status(403)).unwrap();
        assert_eq!(value, json!({ "allowed": false, "status": 403 }));

        let back: Response = serde_json::from_value(value).unwrap();
        assert_eq!(back, Response::deny_with_status(403));
    }
}

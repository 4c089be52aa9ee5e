//! Query parameters whose server support can be verified.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Name of a request query parameter checked against the OpenAPI v3 schema.
///
/// Only the associated constants are recognized. Any other name can be
/// constructed (it may arrive from configuration or a flag) but is never
/// reported as supported.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VerifiableQueryParam(Cow<'static, str>);

impl VerifiableQueryParam {
    /// Server-side field validation (`strict`, `warn`, `ignore`).
    pub const FIELD_VALIDATION: Self = Self(Cow::Borrowed("fieldValidation"));

    /// Server-side dry run.
    pub const DRY_RUN: Self = Self(Cow::Borrowed("dryRun"));

    /// Every parameter the verifier knows how to check.
    pub const RECOGNIZED: &'static [Self] = &[Self::FIELD_VALIDATION, Self::DRY_RUN];

    /// Create a parameter from an arbitrary name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::RECOGNIZED
            .iter()
            .find(|p| p.as_str() == name)
            .cloned()
            .unwrap_or(Self(Cow::Owned(name)))
    }

    /// Get the parameter name as it appears in the query string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if this parameter belongs to the recognized set.
    pub fn is_recognized(&self) -> bool {
        Self::RECOGNIZED.contains(self)
    }
}

impl Default for VerifiableQueryParam {
    fn default() -> Self {
        Self::FIELD_VALIDATION
    }
}

impl fmt::Display for VerifiableQueryParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for VerifiableQueryParam {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for VerifiableQueryParam {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl AsRef<str> for VerifiableQueryParam {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

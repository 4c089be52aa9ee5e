//! Error types for query parameter verification
//!
//! Every failure collapses to "not supported" for callers. The variants exist so
//! the cause survives for logging, and so `ParamUnsupported` (a normal, expected
//! answer) can be told apart from an infrastructure problem.

use crate::query_param::VerifiableQueryParam;
use std::path::PathBuf;
use thiserror::Error;

/// Errors returned by the verifier, the CRD finder and the schema root
#[derive(Debug, Error)]
pub enum VerifierError {
    /// The schema does not declare the parameter for this resource
    #[error("{gvk} doesn't support {param}")]
    ParamUnsupported {
        /// Display form of the group/version/kind, e.g. `batch/v1, Kind=Job`
        gvk: String,
        /// The parameter that was checked
        param: VerifiableQueryParam,
    },

    /// The schema root has no document for the group version
    #[error("group version {0} not found in OpenAPI V3 root")]
    GroupVersionNotFound(String),

    /// The group version document has no PATCH operation for the kind
    #[error("path not found for GVK ({0}) in OpenAPI V3 document")]
    PathNotFound(String),

    /// A group version document could not be decoded
    #[error("invalid OpenAPI V3 document at {path}: {source}")]
    InvalidDocument {
        /// Group version path key, e.g. `apis/apps/v1`
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// The schema source failed to list or return documents
    #[error("schema source failed for {path}: {source}")]
    SchemaSource {
        path: String,
        #[source]
        source: anyhow::Error,
    },

    /// The CRD retrieval function failed
    #[error("failed to retrieve custom resource definitions: {0}")]
    CrdRetrieval(#[source] anyhow::Error),
}

impl VerifierError {
    /// Create a `ParamUnsupported` error for a GVK.
    pub fn param_unsupported(
        gvk: &kube::core::GroupVersionKind,
        param: &VerifiableQueryParam,
    ) -> Self {
        Self::ParamUnsupported {
            gvk: crate::gvk::display_gvk(gvk),
            param: param.clone(),
        }
    }

    /// True when the schema answered "no" rather than failing to answer.
    pub fn is_param_unsupported(&self) -> bool {
        matches!(self, Self::ParamUnsupported { .. })
    }
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    ParsingFailed { path: PathBuf, message: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Result type alias for verification operations
pub type Result<T> = std::result::Result<T, VerifierError>;

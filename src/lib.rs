//! # OpenAPI Param Verifier
//!
//! Decides whether a Kubernetes API server accepts a query parameter, such as
//! `fieldValidation`, for a given resource type, by reading the server's
//! OpenAPI v3 documents. Clients use it to avoid sending parameters that a
//! server or resource would reject or silently ignore.
//!
//! ## Features
//!
//! - **Built-in resources**: maps a group/version/kind onto the server's REST
//!   paths and inspects the PATCH operation's declared parameters
//! - **Custom resources**: recognizes CRDs through a memoizing finder and checks
//!   them against the shared custom resource shape
//! - **Offline schemas**: reads documents saved from `/openapi/v3`
//!
//! ## Example
//!
//! ```rust,no_run
//! use openapi_param_verifier::{
//!     FileSchemaSource, MemoizedCrdFinder, QueryParamVerifier, QueryParamVerifierV3,
//!     SchemaRoot, VerifiableQueryParam,
//! };
//! use kube::core::GroupVersionKind;
//! use std::sync::Arc;
//!
//! let verifier = QueryParamVerifierV3::new(
//!     Arc::new(MemoizedCrdFinder::new(|| Ok(vec![]))),
//!     Arc::new(SchemaRoot::new(FileSchemaSource::new("./openapi"))),
//!     VerifiableQueryParam::FIELD_VALIDATION,
//! );
//!
//! let job = GroupVersionKind::gvk("batch", "v1", "Job");
//! if verifier.has_support(&job).is_ok() {
//!     println!("fieldValidation can be sent for Jobs");
//! }
//! ```

pub mod cli;
pub mod config;
pub mod crd;
pub mod error;
pub mod gvk;
pub mod handlers;
pub mod openapi;
pub mod paths;
pub mod query_param;
pub mod verifier;

// Re-export commonly used types and functions
pub use crd::{CrdFinder, MemoizedCrdFinder};
pub use error::{Result, VerifierError};
pub use gvk::GroupKind;
pub use openapi::{FileSchemaSource, SchemaRoot, SchemaSource};
pub use query_param::VerifiableQueryParam;
pub use verifier::{FallbackQueryParamVerifier, QueryParamVerifier, QueryParamVerifierV3};

/// The current version of the CLI tool
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! Query parameter verification against the OpenAPI v3 schema.
//!
//! A client asks, per resource, whether it may send a query parameter such as
//! `fieldValidation`. The answer comes from the PATCH operation the schema
//! declares for the resource: if that operation lists the parameter as a query
//! parameter, the server accepts it.
//!
//! `Ok(())` means supported. Any error means "do not send it"; the error value
//! only carries the reason for logging.

use crate::crd::CrdFinder;
use crate::error::{Result, VerifierError};
use crate::gvk::{GroupKind, display_gvk, group_version, is_list_kind};
use crate::openapi::{OpenApiDocument, Operation, PathItem, SchemaRoot};
use crate::paths::{custom_resource_gvk, custom_resource_item_path, resource_item_paths};
use crate::query_param::VerifiableQueryParam;
use kube::core::GroupVersionKind;
use std::sync::Arc;

/// Decides whether a resource accepts a query parameter.
pub trait QueryParamVerifier: Send + Sync {
    /// `Ok(())` if `gvk` supports the verifier's parameter.
    fn has_support(&self, gvk: &GroupVersionKind) -> Result<()>;
}

/// Verifier backed by the OpenAPI v3 root.
pub struct QueryParamVerifierV3 {
    finder: Arc<dyn CrdFinder>,
    root: Arc<SchemaRoot>,
    query_param: VerifiableQueryParam,
}

impl QueryParamVerifierV3 {
    pub fn new(
        finder: Arc<dyn CrdFinder>,
        root: Arc<SchemaRoot>,
        query_param: VerifiableQueryParam,
    ) -> Self {
        Self {
            finder,
            root,
            query_param,
        }
    }

    /// Boolean form of [`QueryParamVerifier::has_support`], logging the reason on `false`.
    pub fn is_supported(&self, gvk: &GroupVersionKind) -> bool {
        match self.has_support(gvk) {
            Ok(()) => true,
            Err(e) => {
                log::debug!("{} unsupported for {}: {}", self.query_param, display_gvk(gvk), e);
                false
            }
        }
    }

    fn unsupported(&self, gvk: &GroupVersionKind) -> VerifierError {
        VerifierError::param_unsupported(gvk, &self.query_param)
    }

    /// Check a built-in (or otherwise schema-described) resource.
    fn builtin_support(&self, gvk: &GroupVersionKind) -> Result<()> {
        let doc = self.root.gv_spec(&group_version(gvk))?;
        supports_query_param(&doc, gvk, &self.query_param)
    }

    /// Check a custom resource against the shared custom resource shape.
    ///
    /// Only the fixed item path of that shape is consulted, never the CRD's kind.
    fn custom_resource_support(&self, gvk: &GroupVersionKind) -> Result<()> {
        let proxy = custom_resource_gvk();
        let doc = self.root.gv_spec(&group_version(&proxy))?;
        let path = custom_resource_item_path();
        let (item, op) = doc
            .paths
            .get(&path)
            .and_then(|item| item.patch.as_ref().map(|op| (item, op)))
            .ok_or_else(|| VerifierError::PathNotFound(path.clone()))?;

        if doc.declares_query_param(item, op, self.query_param.as_str()) {
            log::trace!("{} follows PATCH {}", display_gvk(gvk), path);
            Ok(())
        } else {
            Err(self.unsupported(gvk))
        }
    }
}

impl QueryParamVerifier for QueryParamVerifierV3 {
    fn has_support(&self, gvk: &GroupVersionKind) -> Result<()> {
        if !self.query_param.is_recognized() {
            return Err(self.unsupported(gvk));
        }
        if is_list_kind(gvk) {
            return Err(self.unsupported(gvk));
        }

        match self.builtin_support(gvk) {
            Err(VerifierError::GroupVersionNotFound(_)) | Err(VerifierError::PathNotFound(_)) => {}
            other => return other,
        }

        // Not in the schema under its own name; only a CRD can still qualify.
        if !self.finder.has_crd(&GroupKind::from(gvk))? {
            log::debug!("{} is neither in the schema nor a known CRD", display_gvk(gvk));
            return Err(self.unsupported(gvk));
        }
        self.custom_resource_support(gvk)
    }
}

/// Tries `primary`, and `secondary` when `primary` could not give an answer.
///
/// A `ParamUnsupported` answer from `primary` is final.
pub struct FallbackQueryParamVerifier {
    primary: Box<dyn QueryParamVerifier>,
    secondary: Box<dyn QueryParamVerifier>,
}

impl FallbackQueryParamVerifier {
    pub fn new(
        primary: impl QueryParamVerifier + 'static,
        secondary: impl QueryParamVerifier + 'static,
    ) -> Self {
        Self {
            primary: Box::new(primary),
            secondary: Box::new(secondary),
        }
    }
}

impl QueryParamVerifier for FallbackQueryParamVerifier {
    fn has_support(&self, gvk: &GroupVersionKind) -> Result<()> {
        match self.primary.has_support(gvk) {
            Err(e) if !e.is_param_unsupported() => {
                log::info!("Falling back to secondary query param verifier: {}", e);
                self.secondary.has_support(gvk)
            }
            result => result,
        }
    }
}

/// Check a group version document for `param` on the PATCH operation of `gvk`.
pub fn supports_query_param(
    doc: &OpenApiDocument,
    gvk: &GroupVersionKind,
    param: &VerifiableQueryParam,
) -> Result<()> {
    let (path, item, op) = find_patch_operation(doc, gvk)
        .ok_or_else(|| VerifierError::PathNotFound(display_gvk(gvk)))?;

    if doc.declares_query_param(item, op, param.as_str()) {
        log::trace!("{} declares {} on PATCH {}", display_gvk(gvk), param, path);
        Ok(())
    } else {
        Err(VerifierError::param_unsupported(gvk, param))
    }
}

/// Locate the PATCH operation acting on `gvk`.
///
/// Guessed item paths are tried first. The plural guess is a heuristic, so when
/// it misses, every path is scanned for a PATCH whose GVK extension names `gvk`.
fn find_patch_operation<'a>(
    doc: &'a OpenApiDocument,
    gvk: &GroupVersionKind,
) -> Option<(&'a str, &'a PathItem, &'a Operation)> {
    let patch_for = |(path, item): (&'a String, &'a PathItem)| {
        item.patch
            .as_ref()
            .filter(|op| op.acts_on(gvk))
            .map(|op| (path.as_str(), item, op))
    };

    resource_item_paths(gvk)
        .iter()
        .filter_map(|candidate| doc.paths.get_key_value(candidate))
        .find_map(patch_for)
        .or_else(|| doc.paths.iter().find_map(patch_for))
}

//! The subset of an OpenAPI v3 document the verifier reads.
//!
//! Unknown fields are ignored. Only paths, operations, their parameters and the
//! shared `components.parameters` table are modeled.

use kube::core::GroupVersionKind;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Vendor extension naming the GVK an operation acts on.
pub const GVK_EXTENSION: &str = "x-kubernetes-group-version-kind";

/// Prefix of a local reference into `components.parameters`.
const PARAMETER_REF_PREFIX: &str = "#/components/parameters/";

/// One group version document, e.g. the one served at `/openapi/v3/apis/batch/v1`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OpenApiDocument {
    #[serde(default)]
    pub paths: BTreeMap<String, PathItem>,
    #[serde(default)]
    pub components: Components,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Components {
    #[serde(default)]
    pub parameters: BTreeMap<String, Parameter>,
}

/// Operations available on one path.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathItem {
    pub get: Option<Operation>,
    pub put: Option<Operation>,
    pub post: Option<Operation>,
    pub patch: Option<Operation>,
    pub delete: Option<Operation>,
    /// Parameters shared by every operation on the path
    #[serde(default)]
    pub parameters: Vec<ParameterOrRef>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Operation {
    #[serde(rename = "operationId")]
    pub operation_id: Option<String>,
    #[serde(default)]
    pub parameters: Vec<ParameterOrRef>,
    /// Kept raw: some servers emit an object, older ones a list of objects
    #[serde(rename = "x-kubernetes-group-version-kind")]
    pub group_version_kind: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "in")]
    pub location: String,
    pub description: Option<String>,
}

/// A parameter declared inline or by reference.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ParameterOrRef {
    Ref {
        #[serde(rename = "$ref")]
        reference: String,
    },
    Inline(Parameter),
}

#[derive(Debug, Deserialize)]
struct GvkExtension {
    #[serde(default)]
    group: String,
    version: String,
    kind: String,
}

impl OpenApiDocument {
    /// Resolve a parameter, following `#/components/parameters/...` references.
    ///
    /// Returns `None` for references that point elsewhere or at a missing entry.
    pub fn resolve_parameter<'a>(&'a self, param: &'a ParameterOrRef) -> Option<&'a Parameter> {
        match param {
            ParameterOrRef::Inline(p) => Some(p),
            ParameterOrRef::Ref { reference } => {
                let name = reference.strip_prefix(PARAMETER_REF_PREFIX)?;
                self.components.parameters.get(name)
            }
        }
    }

    /// Check whether an operation declares `name` as a query parameter.
    ///
    /// Path level parameters apply to every operation on the path, so they are
    /// included.
    pub fn declares_query_param(&self, item: &PathItem, op: &Operation, name: &str) -> bool {
        op.parameters
            .iter()
            .chain(item.parameters.iter())
            .filter_map(|p| {
                let resolved = self.resolve_parameter(p);
                if resolved.is_none() {
                    log::debug!("Skipping unresolvable parameter reference: {:?}", p);
                }
                resolved
            })
            .any(|p| p.name == name && p.location == "query")
    }
}

impl Operation {
    /// Check if the operation's GVK extension names `gvk`.
    pub fn acts_on(&self, gvk: &GroupVersionKind) -> bool {
        let Some(value) = &self.group_version_kind else {
            return false;
        };
        let matches = |v: &serde_json::Value| {
            serde_json::from_value::<GvkExtension>(v.clone())
                .map(|ext| {
                    ext.group == gvk.group && ext.version == gvk.version && ext.kind == gvk.kind
                })
                .unwrap_or(false)
        };
        match value {
            serde_json::Value::Array(items) => items.iter().any(matches),
            other => matches(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc() -> OpenApiDocument {
        serde_json::from_value(json!({
            "paths": {
                "/apis/batch/v1/namespaces/{namespace}/jobs/{name}": {
                    "parameters": [
                        {"name": "pretty", "in": "query"},
                        {"$ref": "#/components/parameters/name-job"}
                    ],
                    "patch": {
                        "operationId": "patchBatchV1NamespacedJob",
                        "parameters": [
                            {"$ref": "#/components/parameters/fieldValidation-x"},
                            {"name": "dryRun", "in": "query"},
                            {"$ref": "#/definitions/elsewhere"}
                        ],
                        "x-kubernetes-group-version-kind": {
                            "group": "batch", "version": "v1", "kind": "Job"
                        }
                    }
                }
            },
            "components": {
                "parameters": {
                    "fieldValidation-x": {"name": "fieldValidation", "in": "query"},
                    "name-job": {"name": "name", "in": "path"}
                }
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_parses_minimal_document() {
        let doc = doc();
        let item = &doc.paths["/apis/batch/v1/namespaces/{namespace}/jobs/{name}"];
        let patch = item.patch.as_ref().unwrap();
        assert_eq!(patch.operation_id.as_deref(), Some("patchBatchV1NamespacedJob"));
        assert_eq!(patch.parameters.len(), 3);
        assert!(item.get.is_none());
    }

    #[test]
    fn test_declares_query_param() {
        let doc = doc();
        let item = &doc.paths["/apis/batch/v1/namespaces/{namespace}/jobs/{name}"];
        let patch = item.patch.as_ref().unwrap();
        assert!(doc.declares_query_param(item, patch, "fieldValidation"));
        assert!(doc.declares_query_param(item, patch, "dryRun"));
        // path level
        assert!(doc.declares_query_param(item, patch, "pretty"));
        // declared, but not as a query parameter
        assert!(!doc.declares_query_param(item, patch, "name"));
        assert!(!doc.declares_query_param(item, patch, "force"));
    }

    #[test]
    fn test_acts_on_object_and_list_forms() {
        let job = GroupVersionKind::gvk("batch", "v1", "Job");
        let op: Operation = serde_json::from_value(json!({
            "x-kubernetes-group-version-kind": {"group": "batch", "version": "v1", "kind": "Job"}
        }))
        .unwrap();
        assert!(op.acts_on(&job));
        assert!(!op.acts_on(&GroupVersionKind::gvk("batch", "v1", "CronJob")));

        let listed: Operation = serde_json::from_value(json!({
            "x-kubernetes-group-version-kind": [
                {"group": "", "version": "v1", "kind": "Namespace"}
            ]
        }))
        .unwrap();
        assert!(listed.acts_on(&GroupVersionKind::gvk("", "v1", "Namespace")));
    }

    #[test]
    fn test_acts_on_tolerates_malformed_extension() {
        let op: Operation = serde_json::from_value(json!({
            "x-kubernetes-group-version-kind": "batch/v1 Job"
        }))
        .unwrap();
        assert!(!op.acts_on(&GroupVersionKind::gvk("batch", "v1", "Job")));
        assert!(!Operation::default().acts_on(&GroupVersionKind::gvk("batch", "v1", "Job")));
    }
}

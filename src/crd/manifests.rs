//! Custom resource discovery from CustomResourceDefinition manifests.
//!
//! Accepts the output of `kubectl get crd -o yaml` (a `List`), plain multi-document
//! YAML, or JSON. Documents that are not `apiextensions.k8s.io/v1`
//! CustomResourceDefinitions are skipped.

use crate::gvk::GroupKind;
use anyhow::Context;
use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::CustomResourceDefinition;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

const CRD_API_VERSION: &str = "apiextensions.k8s.io/v1";
const CRD_KIND: &str = "CustomResourceDefinition";

impl From<&CustomResourceDefinition> for GroupKind {
    fn from(crd: &CustomResourceDefinition) -> Self {
        GroupKind::new(crd.spec.group.clone(), crd.spec.names.kind.clone())
    }
}

/// Extract custom resource group kinds from manifest text.
pub fn group_kinds_from_manifests(content: &str) -> anyhow::Result<Vec<GroupKind>> {
    let mut group_kinds = Vec::new();
    for (index, document) in serde_yaml::Deserializer::from_str(content).enumerate() {
        let value = serde_yaml::Value::deserialize(document)
            .with_context(|| format!("parsing manifest document {}", index))?;
        collect_group_kinds(value, &mut group_kinds)?;
    }
    Ok(group_kinds)
}

/// Build a CRD getter that reads manifests from files on every call.
///
/// Pair it with [`super::MemoizedCrdFinder`] so the files are read once.
pub fn manifest_getter(
    files: Vec<PathBuf>,
) -> impl Fn() -> anyhow::Result<Vec<GroupKind>> + Send + Sync + 'static {
    move || {
        let mut group_kinds = Vec::new();
        for file in &files {
            let content = fs::read_to_string(file)
                .with_context(|| format!("reading CRD manifests from {}", file.display()))?;
            let found = group_kinds_from_manifests(&content)
                .with_context(|| format!("parsing CRD manifests from {}", file.display()))?;
            log::debug!("Found {} CRDs in {}", found.len(), file.display());
            group_kinds.extend(found);
        }
        Ok(group_kinds)
    }
}

fn collect_group_kinds(value: serde_yaml::Value, out: &mut Vec<GroupKind>) -> anyhow::Result<()> {
    if value.is_null() {
        return Ok(());
    }

    let kind = value.get("kind").and_then(|k| k.as_str()).unwrap_or_default();
    let api_version = value
        .get("apiVersion")
        .and_then(|v| v.as_str())
        .unwrap_or_default();

    if kind == "List" || kind == "CustomResourceDefinitionList" {
        if let Some(serde_yaml::Value::Sequence(items)) = value.get("items") {
            for item in items.clone() {
                collect_group_kinds(item, out)?;
            }
        }
        return Ok(());
    }

    if kind != CRD_KIND || api_version != CRD_API_VERSION {
        log::trace!("Skipping {} {} manifest", api_version, kind);
        return Ok(());
    }

    let crd: CustomResourceDefinition =
        serde_yaml::from_value(value).context("decoding CustomResourceDefinition")?;
    out.push(GroupKind::from(&crd));
    Ok(())
}

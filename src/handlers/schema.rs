use super::check::resolve_schema_dir;
use crate::config::types::Config;
use crate::gvk::gvk_from_api_version;
use crate::openapi::{FileSchemaSource, SchemaRoot};
use crate::paths::{
    custom_resource_item_path, group_version_path, guess_resource, resource_item_paths,
};
use anyhow::Context;
use kube::core::GroupVersion;
use serde_json::json;
use std::path::PathBuf;

/// Show the keys the verifier would look up for a resource.
pub fn handle_resource(api_version: &str, kind: &str, json: bool) -> anyhow::Result<String> {
    let gvk = gvk_from_api_version(api_version, kind)
        .with_context(|| format!("invalid resource '{}' '{}'", api_version, kind))?;

    let gv_path = group_version_path(&GroupVersion::gv(&gvk.group, &gvk.version));
    let (plural, singular) = guess_resource(&gvk.kind);
    let [namespaced, cluster] = resource_item_paths(&gvk);
    let custom_resource = custom_resource_item_path();

    if json {
        let value = json!({
            "groupVersionPath": gv_path,
            "plural": plural,
            "singular": singular,
            "itemPaths": [namespaced, cluster],
            "customResourcePath": custom_resource,
        });
        return Ok(serde_json::to_string_pretty(&value)?);
    }

    Ok(format!(
        "document:   {}\nplural:     {}\nsingular:   {}\nnamespaced: {}\ncluster:    {}\nas CRD:     {}",
        gv_path, plural, singular, namespaced, cluster, custom_resource
    ))
}

/// List the group versions found in a schema directory.
pub fn handle_group_versions(
    schema_dir: Option<PathBuf>,
    config: &Config,
    json: bool,
) -> anyhow::Result<String> {
    let dir = resolve_schema_dir(schema_dir, config)?;
    let root = SchemaRoot::new(FileSchemaSource::new(dir));
    let api_versions: Vec<String> = root
        .group_versions()?
        .iter()
        .map(|gv| gv.api_version())
        .collect();

    if json {
        return Ok(serde_json::to_string_pretty(&api_versions)?);
    }
    Ok(api_versions.join("\n"))
}

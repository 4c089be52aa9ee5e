use crate::config::types::Config;
use crate::crd::{MemoizedCrdFinder, manifest_getter};
use crate::error::ConfigError;
use crate::gvk::{display_gvk, gvk_from_api_version};
use crate::openapi::{FileSchemaSource, SchemaRoot};
use crate::query_param::VerifiableQueryParam;
use crate::verifier::{QueryParamVerifier, QueryParamVerifierV3};
use anyhow::Context;
use std::path::PathBuf;
use std::sync::Arc;

/// Inputs of the `check` command after flags and config are merged.
#[derive(Debug, Clone)]
pub struct CheckOptions {
    pub api_version: String,
    pub kind: String,
    pub schema_dir: Option<PathBuf>,
    pub crds: Vec<PathBuf>,
    pub param: Option<String>,
    pub json: bool,
}

/// Outcome of a check, as printed.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckReport {
    pub api_version: String,
    pub kind: String,
    pub query_param: String,
    pub supported: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Run the `check` command. Returns the report and the text to print.
pub fn handle_check(options: CheckOptions, config: &Config) -> anyhow::Result<(CheckReport, String)> {
    let gvk = gvk_from_api_version(&options.api_version, &options.kind).with_context(|| {
        format!(
            "invalid resource '{}' '{}'",
            options.api_version, options.kind
        )
    })?;

    let schema_dir = resolve_schema_dir(options.schema_dir, config)?;

    let query_param = options
        .param
        .map(VerifiableQueryParam::from)
        .unwrap_or_else(|| config.verifier.query_param.clone());

    // Flags replace the configured manifest list rather than extending it.
    let crd_files = if options.crds.is_empty() {
        config.crds.manifests.clone()
    } else {
        options.crds
    };

    let verifier = QueryParamVerifierV3::new(
        Arc::new(MemoizedCrdFinder::new(manifest_getter(crd_files))),
        Arc::new(SchemaRoot::new(FileSchemaSource::new(schema_dir))),
        query_param.clone(),
    );

    let result = verifier.has_support(&gvk);
    if let Err(e) = &result {
        if !e.is_param_unsupported() {
            log::warn!("Could not confirm support for {}: {}", display_gvk(&gvk), e);
        }
    }

    let report = CheckReport {
        api_version: options.api_version,
        kind: options.kind,
        query_param: query_param.to_string(),
        supported: result.is_ok(),
        reason: result.err().map(|e| e.to_string()),
    };

    let output = if options.json {
        serde_json::to_string_pretty(&report)?
    } else if report.supported {
        format!("supported: {} accepts {}", display_gvk(&gvk), report.query_param)
    } else {
        format!(
            "unsupported: {}",
            report.reason.as_deref().unwrap_or("unknown reason")
        )
    };
    Ok((report, output))
}

pub(crate) fn resolve_schema_dir(
    flag: Option<PathBuf>,
    config: &Config,
) -> Result<PathBuf, ConfigError> {
    flag.or_else(|| config.schema.dir.clone()).ok_or_else(|| {
        ConfigError::Invalid(
            "no schema directory given; pass --schema-dir or set [schema] dir".to_string(),
        )
    })
}

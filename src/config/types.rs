use crate::query_param::VerifiableQueryParam;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub schema: SchemaConfig,
    #[serde(default)]
    pub crds: CrdConfig,
    #[serde(default)]
    pub verifier: VerifierConfig,
}

impl Config {
    /// Make relative `[schema] dir` and `[crds] manifests` entries relative to `base`,
    /// the directory holding the config file.
    pub fn resolve_paths(&mut self, base: &Path) {
        let rebase = |path: &mut PathBuf| {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        };
        if let Some(dir) = self.schema.dir.as_mut() {
            rebase(dir);
        }
        self.crds.manifests.iter_mut().for_each(rebase);
    }
}

/// Where saved OpenAPI v3 documents live
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaConfig {
    /// Directory of `<path>_openapi.json` documents
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

/// Custom resource sources
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CrdConfig {
    /// CustomResourceDefinition manifest files (YAML or JSON)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub manifests: Vec<PathBuf>,
}

/// Verifier settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerifierConfig {
    /// Query parameter to check, `fieldValidation` unless set
    #[serde(default)]
    pub query_param: VerifiableQueryParam,
}

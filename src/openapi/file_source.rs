//! Directory-backed schema source.
//!
//! Reads documents saved from `/openapi/v3/<path>` into a directory, one file per
//! group version. A document for `apis/batch/v1` is stored as
//! `apis__batch__v1_openapi.json`, the layout `kubectl`'s test fixtures use.

use super::root::SchemaSource;
use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};

const FILE_SUFFIX: &str = "_openapi.json";
const SEPARATOR: &str = "__";

/// Schema source over a directory of saved OpenAPI v3 documents.
#[derive(Debug, Clone)]
pub struct FileSchemaSource {
    dir: PathBuf,
}

impl FileSchemaSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File name used for a root key.
    pub fn file_name(path: &str) -> String {
        format!(
            "{}{}",
            path.trim_start_matches('/').replace('/', SEPARATOR),
            FILE_SUFFIX
        )
    }

    /// Root key for a file name, if it follows the naming scheme.
    pub fn path_for_file(file_name: &str) -> Option<String> {
        file_name
            .strip_suffix(FILE_SUFFIX)
            .filter(|stem| !stem.is_empty())
            .map(|stem| stem.replace(SEPARATOR, "/"))
    }
}

impl SchemaSource for FileSchemaSource {
    fn paths(&self) -> anyhow::Result<Vec<String>> {
        let entries = fs::read_dir(&self.dir)
            .with_context(|| format!("reading schema directory {}", self.dir.display()))?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            if let Some(path) = entry.file_name().to_str().and_then(Self::path_for_file) {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths)
    }

    fn schema(&self, path: &str) -> anyhow::Result<Vec<u8>> {
        let file = self.dir.join(Self::file_name(path));
        fs::read(&file).with_context(|| format!("reading schema file {}", file.display()))
    }
}

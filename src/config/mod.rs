pub mod types;

use crate::error::ConfigError;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = ".param-verify.toml";

/// Get the global config file path (~/.param-verify.toml)
pub fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(CONFIG_FILE_NAME))
}

/// Get the local config file path (dir/.param-verify.toml)
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(CONFIG_FILE_NAME)
}

/// Load configuration from file or use defaults.
///
/// An explicit path must exist and parse. Otherwise the local config in the
/// current directory is tried, then the global one; unreadable implicit files
/// are skipped with a warning.
pub fn load_config(explicit: Option<&Path>) -> Result<types::Config, ConfigError> {
    if let Some(path) = explicit {
        return read_config(path);
    }

    let candidates = std::env::current_dir()
        .ok()
        .map(|cwd| local_config_path(&cwd))
        .into_iter()
        .chain(global_config_path());

    for path in candidates {
        if !path.exists() {
            continue;
        }
        match read_config(&path) {
            Ok(config) => {
                log::debug!("Loaded configuration from {}", path.display());
                return Ok(config);
            }
            Err(e) => log::warn!("Ignoring configuration: {}", e),
        }
    }

    Ok(types::Config::default())
}

/// Read and parse one config file.
pub fn read_config(path: &Path) -> Result<types::Config, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
        path: path.to_path_buf(),
        source,
    })?;
    let mut config: types::Config =
        toml::from_str(&content).map_err(|e| ConfigError::ParsingFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    if let Some(base) = path.parent() {
        config.resolve_paths(base);
    }

    if !config.verifier.query_param.is_recognized() {
        log::warn!(
            "{}: query parameter '{}' is not verifiable and will always be reported unsupported",
            path.display(),
            config.verifier.query_param
        );
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query_param::VerifiableQueryParam;
    use tempfile::TempDir;

    #[test]
    fn test_read_full_config() {
        let dir = TempDir::new().unwrap();
        let path = local_config_path(dir.path());
        fs::write(
            &path,
            r#"
[schema]
dir = "/var/cache/openapi"

[crds]
manifests = ["crds.yaml", "more.yaml"]

[verifier]
query_param = "dryRun"
"#,
        )
        .unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.schema.dir, Some(PathBuf::from("/var/cache/openapi")));
        assert_eq!(
            config.crds.manifests,
            vec![dir.path().join("crds.yaml"), dir.path().join("more.yaml")]
        );
        assert_eq!(config.verifier.query_param, VerifiableQueryParam::DRY_RUN);
    }

    #[test]
    fn test_relative_paths_follow_config_file() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("cluster");
        fs::create_dir(&nested).unwrap();
        let path = nested.join("verify.toml");
        fs::write(
            &path,
            "[schema]\ndir = \"openapi\"\n\n[crds]\nmanifests = [\"crds/example.yaml\", \"/etc/crds.yaml\"]\n",
        )
        .unwrap();

        let config = read_config(&path).unwrap();
        assert_eq!(config.schema.dir, Some(nested.join("openapi")));
        assert_eq!(
            config.crds.manifests,
            vec![nested.join("crds/example.yaml"), PathBuf::from("/etc/crds.yaml")]
        );
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.toml");
        fs::write(&path, "").unwrap();

        let config = read_config(&path).unwrap();
        assert!(config.schema.dir.is_none());
        assert!(config.crds.manifests.is_empty());
        assert_eq!(
            config.verifier.query_param,
            VerifiableQueryParam::FIELD_VALIDATION
        );
    }

    #[test]
    fn test_explicit_config_errors() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.toml");
        assert!(matches!(
            load_config(Some(&missing)),
            Err(ConfigError::ReadFailed { .. })
        ));

        let broken = dir.path().join("broken.toml");
        fs::write(&broken, "[schema\ndir = 1").unwrap();
        assert!(matches!(
            load_config(Some(&broken)),
            Err(ConfigError::ParsingFailed { .. })
        ));
    }
}

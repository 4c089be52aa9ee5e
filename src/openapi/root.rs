//! Read-only access to the OpenAPI v3 root of an API server.
//!
//! The root (`/openapi/v3`) lists one document per group version. Fetching those
//! documents is the job of a [`SchemaSource`]; the root only resolves group
//! versions to keys, decodes documents and keeps the decoded form around.

use super::document::OpenApiDocument;
use crate::error::{Result, VerifierError};
use crate::paths::{group_version_path, parse_group_version_path};
use dashmap::DashMap;
use kube::core::GroupVersion;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Root keys without their leading `/`, mapped to the key as the source lists it.
type Listing = BTreeMap<String, String>;

/// Supplies raw group version documents.
///
/// Implementations are expected to have already fetched (or be able to read)
/// the documents; the verifier never talks to the network.
pub trait SchemaSource: Send + Sync {
    /// Keys of all documents in the root, e.g. `api/v1`, `apis/apps/v1`.
    fn paths(&self) -> anyhow::Result<Vec<String>>;

    /// Raw JSON of the document stored under `path`.
    fn schema(&self, path: &str) -> anyhow::Result<Vec<u8>>;
}

/// Decoded view over a [`SchemaSource`].
///
/// Shared between verifiers behind an `Arc`. The key listing is read once and
/// documents are decoded on first use; neither changes afterwards. A failed
/// listing is retried on the next call.
pub struct SchemaRoot {
    source: Box<dyn SchemaSource>,
    listing: Mutex<Option<Arc<Listing>>>,
    documents: DashMap<String, Arc<OpenApiDocument>>,
}

impl SchemaRoot {
    pub fn new(source: impl SchemaSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            listing: Mutex::new(None),
            documents: DashMap::new(),
        }
    }

    /// Group versions that have a document in the root.
    pub fn group_versions(&self) -> Result<Vec<GroupVersion>> {
        let listing = self.listing()?;
        Ok(listing
            .keys()
            .filter_map(|p| parse_group_version_path(p))
            .collect())
    }

    /// Decoded document for a group version.
    ///
    /// Returns [`VerifierError::GroupVersionNotFound`] when the root has no entry
    /// for it.
    pub fn gv_spec(&self, gv: &GroupVersion) -> Result<Arc<OpenApiDocument>> {
        let path = group_version_path(gv);
        if let Some(doc) = self.documents.get(&path) {
            return Ok(Arc::clone(doc.value()));
        }

        let bytes = self.gv_bytes(gv, &path)?;
        let doc: OpenApiDocument =
            serde_json::from_slice(&bytes).map_err(|source| VerifierError::InvalidDocument {
                path: path.clone(),
                source,
            })?;
        log::debug!("Decoded OpenAPI V3 document {} ({} paths)", path, doc.paths.len());

        let doc = Arc::new(doc);
        self.documents.insert(path, Arc::clone(&doc));
        Ok(doc)
    }

    /// Document for a group version as an untyped JSON value.
    pub fn gv_spec_as_value(&self, gv: &GroupVersion) -> Result<serde_json::Value> {
        let path = group_version_path(gv);
        let bytes = self.gv_bytes(gv, &path)?;
        serde_json::from_slice(&bytes).map_err(|source| VerifierError::InvalidDocument { path, source })
    }

    fn listing(&self) -> Result<Arc<Listing>> {
        let mut cached = self.listing.lock();
        if let Some(listing) = cached.as_ref() {
            return Ok(Arc::clone(listing));
        }

        let paths = self
            .source
            .paths()
            .map_err(|source| VerifierError::SchemaSource {
                path: "/openapi/v3".to_string(),
                source,
            })?;
        let listing: Arc<Listing> = Arc::new(
            paths
                .into_iter()
                .map(|p| (p.trim_start_matches('/').to_string(), p))
                .collect(),
        );
        log::debug!("OpenAPI V3 root lists {} documents", listing.len());
        *cached = Some(Arc::clone(&listing));
        Ok(listing)
    }

    fn gv_bytes(&self, gv: &GroupVersion, path: &str) -> Result<Vec<u8>> {
        let listing = self.listing()?;
        let Some(listed) = listing.get(path) else {
            return Err(VerifierError::GroupVersionNotFound(gv.api_version()));
        };
        self.source
            .schema(listed)
            .map_err(|source| VerifierError::SchemaSource {
                path: path.to_string(),
                source,
            })
    }
}

impl std::fmt::Debug for SchemaRoot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaRoot")
            .field("decoded", &self.documents.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// In-memory source that counts listings and document reads.
    struct MapSource {
        docs: BTreeMap<String, String>,
        listings: Arc<Mutex<usize>>,
        reads: Arc<Mutex<usize>>,
    }

    impl SchemaSource for MapSource {
        fn paths(&self) -> anyhow::Result<Vec<String>> {
            *self.listings.lock() += 1;
            Ok(self.docs.keys().cloned().collect())
        }

        fn schema(&self, path: &str) -> anyhow::Result<Vec<u8>> {
            *self.reads.lock() += 1;
            self.docs
                .get(path)
                .map(|d| d.as_bytes().to_vec())
                .ok_or_else(|| anyhow::anyhow!("no document {}", path))
        }
    }

    fn root_with(docs: &[(&str, &str)]) -> (SchemaRoot, Arc<Mutex<usize>>) {
        let reads = Arc::new(Mutex::new(0));
        let source = MapSource {
            docs: docs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            listings: Arc::new(Mutex::new(0)),
            reads: Arc::clone(&reads),
        };
        (SchemaRoot::new(source), reads)
    }

    #[test]
    fn test_group_versions_skips_non_gv_keys() {
        let (root, _) = root_with(&[
            ("api/v1", "{}"),
            ("apis/apps/v1", "{}"),
            ("version", "{}"),
            ("openid/v1/jwks", "{}"),
        ]);
        let gvs = root.group_versions().unwrap();
        assert_eq!(
            gvs,
            vec![GroupVersion::gv("", "v1"), GroupVersion::gv("apps", "v1")]
        );
    }

    #[test]
    fn test_gv_spec_not_found() {
        let (root, _) = root_with(&[("api/v1", "{}")]);
        let err = root.gv_spec(&GroupVersion::gv("bad", "v1")).unwrap_err();
        assert!(matches!(err, VerifierError::GroupVersionNotFound(ref gv) if gv == "bad/v1"));
    }

    #[test]
    fn test_gv_spec_is_decoded_once() {
        let (root, reads) = root_with(&[("apis/batch/v1", r#"{"paths": {}}"#)]);
        let gv = GroupVersion::gv("batch", "v1");
        let first = root.gv_spec(&gv).unwrap();
        let second = root.gv_spec(&gv).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(*reads.lock(), 1);
    }

    #[test]
    fn test_gv_spec_invalid_document() {
        let (root, _) = root_with(&[("api/v1", "not json")]);
        let err = root.gv_spec(&GroupVersion::gv("", "v1")).unwrap_err();
        assert!(matches!(err, VerifierError::InvalidDocument { .. }));
        assert!(!err.is_param_unsupported());
    }

    #[test]
    fn test_gv_spec_as_value() {
        let (root, _) = root_with(&[("api/v1", r#"{"openapi": "3.0.0"}"#)]);
        let value = root.gv_spec_as_value(&GroupVersion::gv("", "v1")).unwrap();
        assert_eq!(value["openapi"], "3.0.0");
    }

    #[test]
    fn test_leading_slash_keys_are_served_as_listed() {
        let (root, reads) = root_with(&[
            ("/api/v1", r#"{"paths": {}}"#),
            ("/apis/batch/v1", r#"{"paths": {}}"#),
        ]);
        assert!(root.gv_spec(&GroupVersion::gv("", "v1")).is_ok());
        assert!(root.gv_spec(&GroupVersion::gv("batch", "v1")).is_ok());
        assert_eq!(*reads.lock(), 2);
        assert_eq!(
            root.group_versions().unwrap(),
            vec![GroupVersion::gv("", "v1"), GroupVersion::gv("batch", "v1")]
        );
    }

    #[test]
    fn test_listing_is_read_once() {
        let listings = Arc::new(Mutex::new(0));
        let root = SchemaRoot::new(MapSource {
            docs: [("api/v1".to_string(), r#"{"paths": {}}"#.to_string())].into(),
            listings: Arc::clone(&listings),
            reads: Arc::new(Mutex::new(0)),
        });
        for _ in 0..3 {
            assert!(root.gv_spec(&GroupVersion::gv("bad", "v1")).is_err());
        }
        root.gv_spec(&GroupVersion::gv("", "v1")).unwrap();
        root.group_versions().unwrap();
        assert_eq!(*listings.lock(), 1);
    }

    struct FlakySource {
        listings: Mutex<usize>,
    }

    impl SchemaSource for FlakySource {
        fn paths(&self) -> anyhow::Result<Vec<String>> {
            let mut listings = self.listings.lock();
            *listings += 1;
            if *listings == 1 {
                anyhow::bail!("connection refused");
            }
            Ok(vec!["api/v1".to_string()])
        }

        fn schema(&self, _path: &str) -> anyhow::Result<Vec<u8>> {
            Ok(br#"{"paths": {}}"#.to_vec())
        }
    }

    #[test]
    fn test_failed_listing_is_retried() {
        let root = SchemaRoot::new(FlakySource {
            listings: Mutex::new(0),
        });
        let gv = GroupVersion::gv("", "v1");
        assert!(matches!(
            root.gv_spec(&gv).unwrap_err(),
            VerifierError::SchemaSource { .. }
        ));
        assert!(root.gv_spec(&gv).is_ok());
    }
}

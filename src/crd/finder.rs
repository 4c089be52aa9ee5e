//! Memoizing CRD finder.

use crate::error::{Result, VerifierError};
use crate::gvk::GroupKind;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;

/// Retrieval function supplied by the embedding application, usually "list the
/// CustomResourceDefinitions the client can see".
pub type CrdGetter = Box<dyn Fn() -> anyhow::Result<Vec<GroupKind>> + Send + Sync>;

/// Source of the group kinds that are currently custom resources.
pub trait CrdFinder: Send + Sync {
    /// The full set of known custom resource group kinds.
    fn find_crds(&self) -> Result<Arc<HashSet<GroupKind>>>;

    /// Check if a group kind is a custom resource. Versions play no part.
    fn has_crd(&self, group_kind: &GroupKind) -> Result<bool> {
        Ok(self.find_crds()?.contains(group_kind))
    }
}

/// [`CrdFinder`] that calls its getter once and keeps the first successful result.
///
/// The lock is held across the first retrieval, so concurrent callers wait for
/// that retrieval instead of starting their own. A failed retrieval leaves the
/// cache empty and the next caller tries again.
pub struct MemoizedCrdFinder {
    getter: CrdGetter,
    cache: Mutex<Option<Arc<HashSet<GroupKind>>>>,
}

impl MemoizedCrdFinder {
    pub fn new<F>(getter: F) -> Self
    where
        F: Fn() -> anyhow::Result<Vec<GroupKind>> + Send + Sync + 'static,
    {
        Self {
            getter: Box::new(getter),
            cache: Mutex::new(None),
        }
    }

    /// Finder over a fixed list, for callers that already know their CRDs.
    pub fn from_static(crds: Vec<GroupKind>) -> Self {
        Self::new(move || Ok(crds.clone()))
    }

    /// Check if a successful retrieval has been cached.
    pub fn is_populated(&self) -> bool {
        self.cache.lock().is_some()
    }
}

impl CrdFinder for MemoizedCrdFinder {
    fn find_crds(&self) -> Result<Arc<HashSet<GroupKind>>> {
        let mut cache = self.cache.lock();
        if let Some(crds) = cache.as_ref() {
            return Ok(Arc::clone(crds));
        }

        let crds: HashSet<GroupKind> = (self.getter)()
            .map_err(VerifierError::CrdRetrieval)?
            .into_iter()
            .collect();
        log::debug!("Cached {} custom resource group kinds", crds.len());

        let crds = Arc::new(crds);
        *cache = Some(Arc::clone(&crds));
        Ok(crds)
    }
}

impl std::fmt::Debug for MemoizedCrdFinder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoizedCrdFinder")
            .field("cache", &*self.cache.lock())
            .finish_non_exhaustive()
    }
}

//! Group/version/kind helpers.
//!
//! `GroupVersionKind` and `GroupVersion` come from `kube::core`. This module adds
//! the version-agnostic `GroupKind` used to identify custom resources, plus the
//! display form the API server uses in its own messages.

use kube::core::{GroupVersion, GroupVersionKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of the synthetic collection returned for heterogeneous lists.
pub const LIST_KIND: &str = "List";

/// A group and kind without a version.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupKind {
    pub group: String,
    pub kind: String,
}

impl GroupKind {
    /// Create a new group kind.
    pub fn new(group: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            kind: kind.into(),
        }
    }
}

impl From<&GroupVersionKind> for GroupKind {
    fn from(gvk: &GroupVersionKind) -> Self {
        Self::new(gvk.group.clone(), gvk.kind.clone())
    }
}

impl fmt::Display for GroupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.group.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{}.{}", self.kind, self.group)
        }
    }
}

/// The group version part of a GVK.
pub fn group_version(gvk: &GroupVersionKind) -> GroupVersion {
    GroupVersion::gv(&gvk.group, &gvk.version)
}

/// True for the `List` pseudo-kind, whatever its group or version.
pub fn is_list_kind(gvk: &GroupVersionKind) -> bool {
    gvk.kind == LIST_KIND
}

/// Format a GVK the way the API server does, e.g. `batch/v1, Kind=Job`.
pub fn display_gvk(gvk: &GroupVersionKind) -> String {
    format!("{}, Kind={}", gvk.api_version(), gvk.kind)
}

/// Build a GVK from an `apiVersion` string (`apps/v1`, or `v1` for the core group).
pub fn gvk_from_api_version(api_version: &str, kind: &str) -> Option<GroupVersionKind> {
    let (group, version) = match api_version.split_once('/') {
        Some((group, version)) => (group, version),
        None => ("", api_version),
    };
    if version.is_empty() || version.contains('/') || kind.is_empty() {
        return None;
    }
    if api_version.contains('/') && group.is_empty() {
        return None;
    }
    Some(GroupVersionKind::gvk(group, version, kind))
}

//! Custom resource lookup.
//!
//! Custom resources do not share the built-in routing table, so the verifier has
//! to know which group kinds are CRDs. This module provides:
//! - `CrdFinder` and its memoizing implementation
//! - CRD discovery from CustomResourceDefinition manifests

pub mod finder;
pub mod manifests;

pub use finder::{CrdFinder, CrdGetter, MemoizedCrdFinder};
pub use manifests::{group_kinds_from_manifests, manifest_getter};

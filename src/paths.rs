//! GVK to OpenAPI path mapping.
//!
//! Mirrors the API server's REST routing:
//! - core group (`""`) resources live under `api/<version>`
//! - named groups live under `apis/<group>/<version>`
//! - the resource segment is the lower-cased kind run through the server's
//!   plural guess, which is a heuristic and not English pluralization
//!
//! The functions here do no I/O.

use kube::core::{GroupVersion, GroupVersionKind};

/// Suffixes the server leaves unpluralized.
const UNPLURALIZED_SUFFIXES: &[&str] = &["endpoints"];

/// Kind whose endpoint carries the same write parameters as every custom
/// resource endpoint. Custom resources are checked against it.
pub const CUSTOM_RESOURCE_PROXY_KIND: &str = "Namespace";
pub const CUSTOM_RESOURCE_PROXY_VERSION: &str = "v1";

/// Key of a group version document in the OpenAPI v3 root, e.g. `apis/batch/v1`.
pub fn group_version_path(gv: &GroupVersion) -> String {
    if gv.group.is_empty() {
        format!("api/{}", gv.version)
    } else {
        format!("apis/{}/{}", gv.group, gv.version)
    }
}

/// Parse a root key back into a group version.
///
/// Keys that are not group version documents (`version`, `openid/v1/jwks`, ...)
/// return `None`.
pub fn parse_group_version_path(path: &str) -> Option<GroupVersion> {
    let path = path.trim_start_matches('/');
    let parts: Vec<&str> = path.split('/').collect();
    match parts.as_slice() {
        ["api", version] if !version.is_empty() => Some(GroupVersion::gv("", version)),
        ["apis", group, version] if !group.is_empty() && !version.is_empty() => {
            Some(GroupVersion::gv(group, version))
        }
        _ => None,
    }
}

/// Guess the `(plural, singular)` resource names for a kind.
///
/// Same rule the server applies when no REST mapping is registered:
/// lower-case the kind, keep `endpoints` as is, `s` gets `es`, a trailing `y`
/// becomes `ies`, anything else gets `s`. `Gateway` therefore guesses
/// `gatewaies`, exactly as the server would.
pub fn guess_resource(kind: &str) -> (String, String) {
    if kind.is_empty() {
        return (String::new(), String::new());
    }
    let singular = kind.to_lowercase();

    if UNPLURALIZED_SUFFIXES
        .iter()
        .any(|suffix| singular.ends_with(suffix))
    {
        return (singular.clone(), singular);
    }

    let plural = if singular.ends_with('s') {
        format!("{}es", singular)
    } else if let Some(stem) = singular.strip_suffix('y') {
        format!("{}ies", stem)
    } else {
        format!("{}s", singular)
    };
    (plural, singular)
}

/// Candidate item paths for a built-in kind inside its group version document.
///
/// The namespaced form comes first; cluster-scoped kinds only match the second.
pub fn resource_item_paths(gvk: &GroupVersionKind) -> [String; 2] {
    let prefix = group_version_path(&GroupVersion::gv(&gvk.group, &gvk.version));
    let (plural, _) = guess_resource(&gvk.kind);
    [
        format!("/{}/namespaces/{{namespace}}/{}/{{name}}", prefix, plural),
        format!("/{}/{}/{{name}}", prefix, plural),
    ]
}

/// The GVK whose schema entry stands in for every custom resource.
pub fn custom_resource_gvk() -> GroupVersionKind {
    GroupVersionKind::gvk("", CUSTOM_RESOURCE_PROXY_VERSION, CUSTOM_RESOURCE_PROXY_KIND)
}

/// Item path of the generic custom resource shape, independent of the CRD's kind.
pub fn custom_resource_item_path() -> String {
    resource_item_paths(&custom_resource_gvk())[1].clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_version_path() {
        assert_eq!(group_version_path(&GroupVersion::gv("", "v1")), "api/v1");
        assert_eq!(
            group_version_path(&GroupVersion::gv("batch", "v1")),
            "apis/batch/v1"
        );
        assert_eq!(
            group_version_path(&GroupVersion::gv("networking.k8s.io", "v1")),
            "apis/networking.k8s.io/v1"
        );
    }

    #[test]
    fn test_parse_group_version_path() {
        assert_eq!(
            parse_group_version_path("api/v1"),
            Some(GroupVersion::gv("", "v1"))
        );
        assert_eq!(
            parse_group_version_path("/apis/apps/v1"),
            Some(GroupVersion::gv("apps", "v1"))
        );
        assert_eq!(parse_group_version_path("version"), None);
        assert_eq!(parse_group_version_path("openid/v1/jwks"), None);
        assert_eq!(parse_group_version_path("apis/apps"), None);
        assert_eq!(parse_group_version_path("api/"), None);
    }

    #[test]
    fn test_guess_resource_builtin_kinds() {
        let cases = [
            ("Pod", "pods"),
            ("Namespace", "namespaces"),
            ("Job", "jobs"),
            ("CronJob", "cronjobs"),
            ("Deployment", "deployments"),
            ("StatefulSet", "statefulsets"),
            ("Ingress", "ingresses"),
            ("Status", "statuses"),
            ("NetworkPolicy", "networkpolicies"),
            ("PodSecurityPolicy", "podsecuritypolicies"),
            ("Endpoints", "endpoints"),
            ("ConfigMap", "configmaps"),
            ("HorizontalPodAutoscaler", "horizontalpodautoscalers"),
        ];
        for (kind, plural) in cases {
            assert_eq!(guess_resource(kind).0, plural, "kind {}", kind);
        }
    }

    #[test]
    fn test_guess_resource_keeps_server_quirks() {
        // Not English, but what the server guesses.
        assert_eq!(guess_resource("Gateway").0, "gatewaies");
        assert_eq!(guess_resource("Endpoints").1, "endpoints");
        assert_eq!(guess_resource(""), (String::new(), String::new()));
    }

    #[test]
    fn test_resource_item_paths() {
        let job = GroupVersionKind::gvk("batch", "v1", "Job");
        assert_eq!(
            resource_item_paths(&job),
            [
                "/apis/batch/v1/namespaces/{namespace}/jobs/{name}".to_string(),
                "/apis/batch/v1/jobs/{name}".to_string(),
            ]
        );

        let ns = GroupVersionKind::gvk("", "v1", "Namespace");
        assert_eq!(resource_item_paths(&ns)[1], "/api/v1/namespaces/{name}");
    }

    #[test]
    fn test_custom_resource_shape_ignores_kind() {
        assert_eq!(custom_resource_item_path(), "/api/v1/namespaces/{name}");
        assert_eq!(custom_resource_gvk().kind, "Namespace");
    }
}

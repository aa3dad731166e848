//! Tenant resolution from the request host header.
//!
//! A tenant is a photographer account served under a subdomain of the
//! configured base domain (`anna.example.com` → tenant `anna`). The
//! resolver is a pure function of (host header, base domain); nothing
//! is persisted.
//!
//! Deployment assumption: the `Host` header is trusted as delivered.
//! The edge proxy in front of this service must set it — there is no
//! in-process trusted-proxy allow-list.

use std::net::Ipv4Addr;

/// Routing decision for one inbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteAction {
    /// No tenant in the host — the request passes through unmodified.
    Passthrough,
    /// Tenant host at path `/` — rewrite internally to the public
    /// tenant gallery listing for this label.
    TenantHome { subdomain: String },
    /// Any other path under a tenant host — same path with the tenant
    /// label injected as a `subdomain` query parameter.
    TenantPath {
        subdomain: String,
        path_and_query: String,
    },
}

/// Derives the tenant label from the inbound host header.
#[derive(Debug, Clone)]
pub struct TenantResolver {
    base_domain: String,
}

impl TenantResolver {
    /// `base_domain` is the apex domain the SaaS is served from
    /// (e.g. `focal.gallery`). Ports and case are normalized away.
    pub fn new(base_domain: impl Into<String>) -> Self {
        Self {
            base_domain: strip_port(&base_domain.into().to_ascii_lowercase()).to_owned(),
        }
    }

    /// Classify one request.
    ///
    /// Hosts that are the bare base domain, `www.<base>`, `localhost`,
    /// an IPv4 literal, or anything that does not decompose into
    /// `<label>.<base>` all pass through — a host we cannot cleanly
    /// attribute to a tenant is never an error. Hosts under
    /// `.localhost` resolve against a base domain of `localhost` so
    /// development mirrors production.
    pub fn resolve(&self, host: &str, path: &str, query: Option<&str>) -> RouteAction {
        let host = strip_port(host).to_ascii_lowercase();

        if host.parse::<Ipv4Addr>().is_ok() {
            return RouteAction::Passthrough;
        }

        let base = if host == "localhost" || host.ends_with(".localhost") {
            "localhost"
        } else {
            self.base_domain.as_str()
        };

        if host == base {
            return RouteAction::Passthrough;
        }

        let Some(label) = host.strip_suffix(base).and_then(|h| h.strip_suffix('.')) else {
            return RouteAction::Passthrough;
        };

        // `www` is textually an extra label but never a tenant.
        if label.is_empty() || label == "www" {
            return RouteAction::Passthrough;
        }

        if path == "/" {
            return RouteAction::TenantHome {
                subdomain: label.to_owned(),
            };
        }

        RouteAction::TenantPath {
            subdomain: label.to_owned(),
            path_and_query: inject_subdomain(path, query, label),
        }
    }
}

fn strip_port(host: &str) -> &str {
    host.split(':').next().unwrap_or(host)
}

/// Append `subdomain=<label>` to the query string, idempotently: a
/// request that already carries the parameter (an already-rewritten
/// request re-entering resolution) is left untouched.
fn inject_subdomain(path: &str, query: Option<&str>, label: &str) -> String {
    match query {
        None | Some("") => format!("{path}?subdomain={label}"),
        Some(q) => {
            let already_tagged = q
                .split('&')
                .any(|pair| pair.split('=').next() == Some("subdomain"));
            if already_tagged {
                format!("{path}?{q}")
            } else {
                format!("{path}?{q}&subdomain={label}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> TenantResolver {
        TenantResolver::new("focal.gallery")
    }

    #[test]
    fn apex_domain_passes_through() {
        assert_eq!(
            resolver().resolve("focal.gallery", "/pricing", None),
            RouteAction::Passthrough
        );
    }

    #[test]
    fn www_is_not_a_tenant() {
        assert_eq!(
            resolver().resolve("www.focal.gallery", "/", None),
            RouteAction::Passthrough
        );
    }

    #[test]
    fn ipv4_literal_passes_through() {
        assert_eq!(
            resolver().resolve("127.0.0.1:3000", "/", None),
            RouteAction::Passthrough
        );
    }

    #[test]
    fn bare_localhost_passes_through() {
        assert_eq!(
            resolver().resolve("localhost:3000", "/", None),
            RouteAction::Passthrough
        );
    }

    #[test]
    fn unrelated_host_passes_through() {
        assert_eq!(
            resolver().resolve("evil.example.net", "/", None),
            RouteAction::Passthrough
        );
    }

    #[test]
    fn tenant_root_resolves_to_home() {
        assert_eq!(
            resolver().resolve("anna.focal.gallery", "/", None),
            RouteAction::TenantHome {
                subdomain: "anna".into()
            }
        );
    }

    #[test]
    fn port_is_stripped_before_comparison() {
        assert_eq!(
            resolver().resolve("anna.focal.gallery:8080", "/", None),
            RouteAction::TenantHome {
                subdomain: "anna".into()
            }
        );
    }

    #[test]
    fn tenant_path_gets_subdomain_parameter() {
        assert_eq!(
            resolver().resolve("anna.focal.gallery", "/g/my-gallery", None),
            RouteAction::TenantPath {
                subdomain: "anna".into(),
                path_and_query: "/g/my-gallery?subdomain=anna".into()
            }
        );
    }

    #[test]
    fn existing_query_is_preserved() {
        assert_eq!(
            resolver().resolve("anna.focal.gallery", "/g/my-gallery", Some("foo=1")),
            RouteAction::TenantPath {
                subdomain: "anna".into(),
                path_and_query: "/g/my-gallery?foo=1&subdomain=anna".into()
            }
        );
    }

    #[test]
    fn rewrite_is_idempotent() {
        // Resolving an already-rewritten request must not duplicate
        // the parameter.
        let action =
            resolver().resolve("anna.focal.gallery", "/g/my-gallery", Some("foo=1"));
        let RouteAction::TenantPath { path_and_query, .. } = action else {
            panic!("expected TenantPath");
        };
        let (path, query) = path_and_query.split_once('?').unwrap();

        assert_eq!(
            resolver().resolve("anna.focal.gallery", path, Some(query)),
            RouteAction::TenantPath {
                subdomain: "anna".into(),
                path_and_query: "/g/my-gallery?foo=1&subdomain=anna".into()
            }
        );
    }

    #[test]
    fn localhost_subdomains_resolve_in_development() {
        assert_eq!(
            resolver().resolve("anna.localhost:3000", "/", None),
            RouteAction::TenantHome {
                subdomain: "anna".into()
            }
        );
    }

    #[test]
    fn host_case_is_normalized() {
        assert_eq!(
            resolver().resolve("Anna.Focal.Gallery", "/", None),
            RouteAction::TenantHome {
                subdomain: "anna".into()
            }
        );
    }
}

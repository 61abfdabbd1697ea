//! ZooKeeper address resolution
//!
//! Turns a `host[:port]` URI plus a namespace into a fully qualified
//! connection endpoint. Bare service names are expanded to the in-cluster
//! DNS form; IPv4 literals are used verbatim.

use std::sync::LazyLock;

use regex::Regex;

/// Well-known ZooKeeper client port, used when the URI carries no port.
const DEFAULT_CLIENT_PORT: &str = "2181";

/// Matches dotted-quad IPv4 literals.
static IPV4_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([1-9][0-9]*\.[0-9]+\.[0-9]+\.[0-9]+)").expect("IPv4 pattern is valid")
});

/// Resolve a `host[:port]` URI into a single connection endpoint.
///
/// A bare service name expands to
/// `<service>.<namespace>.svc.cluster.local:<port>`; an IPv4 literal is
/// used as-is with the port appended. Exactly one endpoint is produced per
/// call; quorum lists are not supported.
///
/// Parsing is intentionally permissive: malformed input (an empty host, a
/// stray port segment) degrades to a best-effort endpoint string that fails
/// at connection time rather than here. Callers are responsible for
/// supplying sane URIs.
pub fn resolve(uri: &str, namespace: &str) -> String {
    let parts: Vec<&str> = uri.split(':').collect();
    let host = parts.first().copied().unwrap_or_default();
    let port = parts.get(1).copied().unwrap_or(DEFAULT_CLIENT_PORT);

    if IPV4_RE.is_match(host) {
        format!("{host}:{port}")
    } else {
        format!("{host}.{namespace}.svc.cluster.local:{port}")
    }
}

//! Group membership extraction from requests.
//!
//! The tree stores restriction lists as group names; who belongs to which
//! group is the host's business. [`AccessProvider`] is the seam: it turns an
//! incoming request's headers into a [`GroupSet`] the tree can authorize
//! against.

use axum::http::HeaderMap;
use waymark_tree::GroupSet;

/// Resolves an incoming request to the requester's group memberships.
pub trait AccessProvider: Send + Sync {
    /// Group memberships of the principal behind `headers`.
    fn groups(&self, headers: &HeaderMap) -> GroupSet;
}

/// Provider for sites without user accounts: nobody is in any group, so
/// restricted pages deny everyone.
#[derive(Debug, Default)]
pub struct NoGroups;

impl AccessProvider for NoGroups {
    fn groups(&self, _headers: &HeaderMap) -> GroupSet {
        GroupSet::empty()
    }
}

/// Provider reading a comma-separated group list from a request header.
///
/// Intended for deployments behind a trusted authenticating proxy that
/// injects the header; do not expose this directly to clients.
#[derive(Debug)]
pub struct HeaderGroups {
    header: String,
}

impl HeaderGroups {
    /// Read groups from the named header.
    #[must_use]
    pub fn new(header: &str) -> Self {
        Self {
            header: header.to_owned(),
        }
    }
}

impl Default for HeaderGroups {
    fn default() -> Self {
        Self::new("x-waymark-groups")
    }
}

impl AccessProvider for HeaderGroups {
    fn groups(&self, headers: &HeaderMap) -> GroupSet {
        headers
            .get(&self.header)
            .and_then(|value| value.to_str().ok())
            .map(|value| {
                GroupSet::new(
                    value
                        .split(',')
                        .map(str::trim)
                        .filter(|group| !group.is_empty()),
                )
            })
            .unwrap_or_default()
    }
}

//! Access restriction primitives.
//!
//! Group membership lookup is delegated to the host's user store through
//! [`Principal`]; the tree only carries group-name lists and the inheritance
//! rule (a page inherits its nearest base ancestor's restriction).

use std::collections::HashSet;

/// A requesting principal whose group memberships the host can answer for.
pub trait Principal {
    /// Whether the principal belongs to the named group.
    fn in_group(&self, group: &str) -> bool;
}

/// Principal backed by a plain set of group names.
#[derive(Debug, Default, Clone)]
pub struct GroupSet {
    groups: HashSet<String>,
}

impl GroupSet {
    /// Principal with the given group memberships.
    #[must_use]
    pub fn new<I, S>(groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            groups: groups.into_iter().map(Into::into).collect(),
        }
    }

    /// Principal with no group memberships.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }
}

impl Principal for GroupSet {
    fn in_group(&self, group: &str) -> bool {
        self.groups.contains(group)
    }
}

/// An empty restriction list admits everyone; otherwise membership in any
/// one listed group is sufficient.
pub(crate) fn is_authorized(exclusive_to: &[String], principal: &dyn Principal) -> bool {
    exclusive_to.is_empty() || exclusive_to.iter().any(|g| principal.in_group(g))
}

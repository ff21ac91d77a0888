//! # Permissions
//!
//! Capability strings with wildcard containment, and sets of them.
//! Permissions are opaque to this crate: any string is accepted, no
//! parsing errors are possible.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Well-known capability strings used across the platform.
///
/// Handlers reference these constants instead of repeating string
/// literals; the set is open-ended and services may define their own.
pub mod capability {
    /// Semantic-layer permissions.
    pub const SEMANTIC_SEARCH: &str = "semantic:search";
    pub const SEMANTIC_CREATE: &str = "semantic:create";
    pub const SEMANTIC_UPDATE: &str = "semantic:update";
    pub const SEMANTIC_DELETE: &str = "semantic:delete";
    pub const SEMANTIC_READ: &str = "semantic:read";

    /// Warehouse permissions.
    pub const WAREHOUSE_QUERY: &str = "warehouse:query";
    pub const WAREHOUSE_READ: &str = "warehouse:read";
    pub const WAREHOUSE_WRITE: &str = "warehouse:write";
    pub const WAREHOUSE_MANAGE: &str = "warehouse:manage";

    /// Support permissions.
    pub const SUPPORT_READ: &str = "support:read";
    pub const SUPPORT_WRITE: &str = "support:write";
    pub const SUPPORT_MANAGE: &str = "support:manage";

    /// Workflow permissions.
    pub const WORKFLOW_EXECUTE: &str = "workflow:execute";
    pub const WORKFLOW_READ: &str = "workflow:read";
    pub const WORKFLOW_MANAGE: &str = "workflow:manage";

    /// Compliance permissions.
    pub const COMPLIANCE_READ: &str = "compliance:read";
    pub const COMPLIANCE_MANAGE: &str = "compliance:manage";

    /// Agent permissions.
    pub const AGENT_READ: &str = "agent:read";
    pub const AGENT_EXECUTE: &str = "agent:execute";
    pub const AGENT_MANAGE: &str = "agent:manage";

    /// Data source permissions.
    pub const DATASOURCE_READ: &str = "datasource:read";
    pub const DATASOURCE_WRITE: &str = "datasource:write";
    pub const DATASOURCE_MANAGE: &str = "datasource:manage";

    /// Catalog permissions.
    pub const CATALOG_READ: &str = "catalog:read";
    pub const CATALOG_WRITE: &str = "catalog:write";
    pub const CATALOG_MANAGE: &str = "catalog:manage";

    /// Administrative permissions.
    pub const ADMIN: &str = "admin:*";
    pub const USER_MANAGE: &str = "user:manage";
    pub const SYSTEM_MANAGE: &str = "system:manage";
}

/// A fine-grained capability of the form `"<domain>:<action>"`.
///
/// Immutable value type. Equality is exact-string; containment
/// additionally honors the wildcard suffix rule, see [`Permission::matches`].
///
/// # Example
///
/// ```
/// use govern_rbac::Permission;
///
/// let held = Permission::new("warehouse:*");
/// assert!(held.matches(&Permission::new("warehouse:query")));
/// assert!(!held.matches(&Permission::new("catalog:read")));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(String);

impl Permission {
    /// The universal admin wildcard. Satisfies every permission check.
    pub const ADMIN: &'static str = capability::ADMIN;

    /// Create a permission from any string.
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// The admin wildcard permission (`"admin:*"`).
    pub fn admin() -> Self {
        Self(Self::ADMIN.to_string())
    }

    /// The raw capability string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the universal admin wildcard.
    pub fn is_admin(&self) -> bool {
        self.0 == Self::ADMIN
    }

    /// Whether this is a domain wildcard (`"<domain>:*"`).
    pub fn is_wildcard(&self) -> bool {
        self.0.ends_with(":*")
    }

    /// Check whether this (held) permission satisfies `required`.
    ///
    /// Rules, in order:
    /// 1. the admin wildcard satisfies everything;
    /// 2. exact string equality;
    /// 3. a held `"<domain>:*"` satisfies any `required` starting with
    ///    `"<domain>:"`.
    ///
    /// Rule 3 is a string-prefix test, not a segment test: `"a:*"`
    /// matches `"a:b:c"`. An empty permission matches only itself.
    ///
    /// # Example
    ///
    /// ```
    /// use govern_rbac::Permission;
    ///
    /// assert!(Permission::admin().matches(&Permission::new("anything:at-all")));
    /// assert!(Permission::new("semantic:*").matches(&Permission::new("semantic:search")));
    /// assert!(!Permission::new("semantic:*").matches(&Permission::new("semantics:search")));
    /// ```
    pub fn matches(&self, required: &Permission) -> bool {
        if self.is_admin() {
            return true;
        }
        if self.0 == required.0 {
            return true;
        }
        // "domain:*" -> keep "domain:" and prefix-test the requirement.
        if let Some(prefix) = self.0.strip_suffix('*') {
            if prefix.ends_with(':') {
                return required.0.starts_with(prefix);
            }
        }
        false
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Permission {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Permission {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A set of permissions held by a principal or role.
///
/// Membership checks short-circuit to `true` when the set holds the
/// admin wildcard.
///
/// # Example
///
/// ```
/// use govern_rbac::{Permission, PermissionSet};
///
/// let mut set = PermissionSet::new();
/// set.add(Permission::new("catalog:read"));
/// assert!(set.has(&Permission::new("catalog:read")));
/// assert!(!set.has(&Permission::new("catalog:write")));
///
/// set.add(Permission::admin());
/// assert!(set.has(&Permission::new("catalog:write")));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionSet {
    permissions: HashSet<Permission>,
}

impl PermissionSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from raw capability strings.
    pub fn from_strs(perms: &[&str]) -> Self {
        perms.iter().map(|p| Permission::new(*p)).collect()
    }

    /// Add a permission to the set.
    pub fn add(&mut self, permission: Permission) {
        self.permissions.insert(permission);
    }

    /// Remove a permission from the set.
    ///
    /// Returns `true` if the permission was present.
    pub fn remove(&mut self, permission: &Permission) -> bool {
        self.permissions.remove(permission)
    }

    /// Exact membership check, short-circuiting on the admin wildcard.
    pub fn has(&self, permission: &Permission) -> bool {
        if self.permissions.contains(&Permission::admin()) {
            return true;
        }
        self.permissions.contains(permission)
    }

    /// Whether the set contains any of the given permissions.
    pub fn has_any<'a>(&self, permissions: impl IntoIterator<Item = &'a Permission>) -> bool {
        permissions.into_iter().any(|p| self.has(p))
    }

    /// Whether the set contains all of the given permissions.
    pub fn has_all<'a>(&self, permissions: impl IntoIterator<Item = &'a Permission>) -> bool {
        permissions.into_iter().all(|p| self.has(p))
    }

    /// Wildcard-aware containment: whether any held permission
    /// [`matches`](Permission::matches) the required one.
    pub fn grants(&self, required: &Permission) -> bool {
        self.permissions.iter().any(|p| p.matches(required))
    }

    /// All permissions in the set.
    pub fn list(&self) -> Vec<Permission> {
        self.permissions.iter().cloned().collect()
    }

    /// Number of permissions in the set.
    pub fn len(&self) -> usize {
        self.permissions.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.permissions.is_empty()
    }
}

impl FromIterator<Permission> for PermissionSet {
    fn from_iter<T: IntoIterator<Item = Permission>>(iter: T) -> Self {
        Self {
            permissions: iter.into_iter().collect(),
        }
    }
}

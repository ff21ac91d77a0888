//! # Role registry
//!
//! Built-in platform roles and the immutable registry that resolves role
//! names to permission lists. The registry is constructed once at process
//! start and injected wherever role resolution happens; there is no
//! global mutable state, so tests can build alternate registries freely.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::permission::{capability, Permission};

/// A named role carrying an ordered list of permissions.
///
/// # Example
///
/// ```
/// use govern_rbac::{Permission, Role};
///
/// let auditor = Role::new("auditor", ["compliance:read", "catalog:read"]);
/// assert!(auditor.grants(&Permission::new("compliance:read")));
/// assert!(!auditor.grants(&Permission::new("compliance:manage")));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Role name, unique within a registry.
    pub name: String,
    /// Permissions granted by this role.
    pub permissions: Vec<Permission>,
}

impl Role {
    /// Create a role from a name and capability strings.
    pub fn new<S, I, P>(name: S, permissions: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = P>,
        P: Into<Permission>,
    {
        Self {
            name: name.into(),
            permissions: permissions.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether any permission of this role satisfies `required`,
    /// honoring the wildcard rule.
    pub fn grants(&self, required: &Permission) -> bool {
        self.permissions.iter().any(|p| p.matches(required))
    }
}

/// Immutable mapping from role name to [`Role`].
///
/// Safe for unsynchronized concurrent reads; never mutated after
/// construction.
#[derive(Debug, Clone)]
pub struct RoleRegistry {
    roles: HashMap<String, Role>,
}

impl RoleRegistry {
    /// The role a principal degrades to when no role record exists.
    pub const DEFAULT_ROLE: &'static str = "analyst";

    /// Build a registry from an explicit set of roles.
    pub fn new(roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            roles: roles
                .into_iter()
                .map(|role| (role.name.clone(), role))
                .collect(),
        }
    }

    /// The built-in platform roles: `admin`, `analyst`, `support`,
    /// `developer`.
    pub fn builtin() -> Self {
        Self::new([
            Role::new("admin", [capability::ADMIN]),
            Role::new(
                "analyst",
                [
                    capability::SEMANTIC_SEARCH,
                    capability::WAREHOUSE_QUERY,
                    capability::SUPPORT_READ,
                    capability::COMPLIANCE_READ,
                ],
            ),
            Role::new(
                "support",
                [
                    capability::SEMANTIC_SEARCH,
                    capability::SUPPORT_READ,
                    capability::SUPPORT_WRITE,
                ],
            ),
            Role::new(
                "developer",
                [
                    capability::SEMANTIC_SEARCH,
                    capability::SEMANTIC_CREATE,
                    capability::WAREHOUSE_QUERY,
                    capability::WORKFLOW_EXECUTE,
                ],
            ),
        ])
    }

    /// Look up a role by name. Case-sensitive.
    pub fn get(&self, name: &str) -> Option<&Role> {
        self.roles.get(name)
    }

    /// Whether the registry defines a role with this name.
    pub fn contains(&self, name: &str) -> bool {
        self.roles.contains_key(name)
    }

    /// Names of all registered roles.
    pub fn names(&self) -> Vec<&str> {
        self.roles.keys().map(String::as_str).collect()
    }
}

impl Default for RoleRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_roles_present() {
        let registry = RoleRegistry::builtin();
        for name in ["admin", "analyst", "support", "developer"] {
            assert!(registry.contains(name), "{name}");
        }
        assert!(!registry.contains("Analyst"));
    }

    #[test]
    fn admin_role_grants_everything() {
        let registry = RoleRegistry::builtin();
        let admin = registry.get("admin").unwrap();
        assert!(admin.grants(&Permission::new("warehouse:query")));
        assert!(admin.grants(&Permission::new("user:manage")));
    }

    #[test]
    fn support_role_grants() {
        let registry = RoleRegistry::builtin();
        let support = registry.get("support").unwrap();
        assert!(support.grants(&Permission::new(capability::SUPPORT_WRITE)));
        assert!(!support.grants(&Permission::new(capability::COMPLIANCE_MANAGE)));
    }

    #[test]
    fn analyst_role_is_read_mostly() {
        let registry = RoleRegistry::builtin();
        let analyst = registry.get("analyst").unwrap();
        assert!(analyst.grants(&Permission::new(capability::WAREHOUSE_QUERY)));
        assert!(analyst.grants(&Permission::new(capability::COMPLIANCE_READ)));
        assert!(!analyst.grants(&Permission::new(capability::SEMANTIC_CREATE)));
    }

    #[test]
    fn custom_registry_with_wildcard_role() {
        let registry = RoleRegistry::new([Role::new("warehouse-ops", ["warehouse:*"])]);
        let ops = registry.get("warehouse-ops").unwrap();
        assert!(ops.grants(&Permission::new("warehouse:manage")));
        assert!(!ops.grants(&Permission::new("catalog:read")));
        assert!(registry.get("admin").is_none());
    }

    #[test]
    fn default_role_name() {
        assert_eq!(RoleRegistry::DEFAULT_ROLE, "analyst");
    }
}

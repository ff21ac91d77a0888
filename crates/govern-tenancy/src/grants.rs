//! Resource-level permission grants.
//!
//! A grant gives a single principal a single permission on a single
//! resource, independent of their role. Scoped permission checks consult
//! grants after the organization and workspace admin bypasses.

use chrono::{DateTime, Utc};
use govern_rbac::Permission;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An explicit per-resource permission grant.
///
/// # Example
///
/// ```
/// use govern_rbac::Permission;
/// use govern_tenancy::ResourceGrant;
///
/// let grant = ResourceGrant::new("dataset", "ds-42", "user-1", Permission::new("warehouse:*"));
/// assert!(grant.covers("dataset", "ds-42", "user-1", &Permission::new("warehouse:query")));
/// assert!(!grant.covers("dataset", "ds-42", "user-1", &Permission::new("catalog:read")));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceGrant {
    /// Unique grant id.
    pub id: Uuid,
    /// Resource type, e.g. "dataset", "agent", "workflow".
    pub resource_type: String,
    /// Resource identifier.
    pub resource_id: String,
    /// Principal the grant applies to.
    pub user_id: String,
    /// Permission granted on the resource.
    pub permission: Permission,
    /// Who created the grant, if recorded.
    pub granted_by: Option<String>,
    /// When the grant was created.
    pub granted_at: DateTime<Utc>,
}

impl ResourceGrant {
    /// Create a grant with a fresh id and the current time.
    pub fn new(
        resource_type: impl Into<String>,
        resource_id: impl Into<String>,
        user_id: impl Into<String>,
        permission: Permission,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            resource_type: resource_type.into(),
            resource_id: resource_id.into(),
            user_id: user_id.into(),
            permission,
            granted_by: None,
            granted_at: Utc::now(),
        }
    }

    /// Record who created the grant.
    pub fn with_granter(mut self, granter: impl Into<String>) -> Self {
        self.granted_by = Some(granter.into());
        self
    }

    /// Whether this grant satisfies a check for `required` on the given
    /// resource by the given principal. The granted permission covers
    /// the requirement under the same wildcard rule as role permissions.
    pub fn covers(
        &self,
        resource_type: &str,
        resource_id: &str,
        user_id: &str,
        required: &Permission,
    ) -> bool {
        self.resource_type == resource_type
            && self.resource_id == resource_id
            && self.user_id == user_id
            && self.permission.matches(required)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grant_covers_exact_permission() {
        let g = ResourceGrant::new("agent", "agent-7", "user-1", Permission::new("agent:execute"));
        assert!(g.covers("agent", "agent-7", "user-1", &Permission::new("agent:execute")));
        assert!(!g.covers("agent", "agent-7", "user-2", &Permission::new("agent:execute")));
        assert!(!g.covers("agent", "agent-8", "user-1", &Permission::new("agent:execute")));
        assert!(!g.covers("agent", "agent-7", "user-1", &Permission::new("agent:manage")));
    }

    #[test]
    fn grant_covers_via_wildcard() {
        let g = ResourceGrant::new("dataset", "ds-1", "user-1", Permission::new("warehouse:*"));
        assert!(g.covers("dataset", "ds-1", "user-1", &Permission::new("warehouse:read")));
    }
}

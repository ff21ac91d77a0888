//! Membership records linking principals to organizations and workspaces.
//!
//! Principal identifiers are opaque strings resolved by the session or
//! API-key middleware upstream; this crate never interprets them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::roles::{OrganizationRole, WorkspaceRole};

/// A principal's membership in an organization.
///
/// # Example
///
/// ```
/// use uuid::Uuid;
/// use govern_tenancy::{OrganizationMembership, OrganizationRole};
///
/// let m = OrganizationMembership::new(Uuid::now_v7(), "user-1", OrganizationRole::Editor)
///     .with_inviter("user-0");
/// assert_eq!(m.invited_by.as_deref(), Some("user-0"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizationMembership {
    /// Unique membership id.
    pub id: Uuid,
    /// Organization this membership belongs to.
    pub organization_id: Uuid,
    /// Principal identifier.
    pub user_id: String,
    /// Role within the organization.
    pub role: OrganizationRole,
    /// When the principal joined.
    pub joined_at: DateTime<Utc>,
    /// Who invited the principal, if anyone.
    pub invited_by: Option<String>,
    /// Inactive memberships are ignored by authorization checks.
    pub is_active: bool,
}

impl OrganizationMembership {
    /// Create an active membership with a fresh id and the current time.
    pub fn new(organization_id: Uuid, user_id: impl Into<String>, role: OrganizationRole) -> Self {
        Self {
            id: Uuid::now_v7(),
            organization_id,
            user_id: user_id.into(),
            role,
            joined_at: Utc::now(),
            invited_by: None,
            is_active: true,
        }
    }

    /// Record who invited this principal.
    pub fn with_inviter(mut self, inviter: impl Into<String>) -> Self {
        self.invited_by = Some(inviter.into());
        self
    }
}

/// A principal's membership in a workspace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceMembership {
    /// Unique membership id.
    pub id: Uuid,
    /// Workspace this membership belongs to.
    pub workspace_id: Uuid,
    /// Principal identifier.
    pub user_id: String,
    /// Role within the workspace.
    pub role: WorkspaceRole,
    /// When the principal was added.
    pub added_at: DateTime<Utc>,
    /// Who added the principal, if anyone.
    pub added_by: Option<String>,
}

impl WorkspaceMembership {
    /// Create a membership with a fresh id and the current time.
    pub fn new(workspace_id: Uuid, user_id: impl Into<String>, role: WorkspaceRole) -> Self {
        Self {
            id: Uuid::now_v7(),
            workspace_id,
            user_id: user_id.into(),
            role,
            added_at: Utc::now(),
            added_by: None,
        }
    }

    /// Record who added this principal.
    pub fn with_adder(mut self, adder: impl Into<String>) -> Self {
        self.added_by = Some(adder.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn organization_membership_defaults() {
        let org = Uuid::now_v7();
        let m = OrganizationMembership::new(org, "user-1", OrganizationRole::Viewer);
        assert_eq!(m.organization_id, org);
        assert_eq!(m.user_id, "user-1");
        assert!(m.is_active);
        assert!(m.invited_by.is_none());
    }

    #[test]
    fn workspace_membership_with_adder() {
        let ws = Uuid::now_v7();
        let m = WorkspaceMembership::new(ws, "user-2", WorkspaceRole::Admin).with_adder("user-1");
        assert_eq!(m.workspace_id, ws);
        assert_eq!(m.added_by.as_deref(), Some("user-1"));
        assert!(m.role.can_manage());
    }

    #[test]
    fn membership_serializes_role_as_snake_case() {
        let m = OrganizationMembership::new(Uuid::now_v7(), "u", OrganizationRole::Owner);
        let json = serde_json::to_value(&m).unwrap();
        assert_eq!(json["role"], "owner");
    }
}

//! Organization and workspace role hierarchies.
//!
//! Roles are ordered enums: each role carries every capability of the
//! roles below it. Scoped authorization checks only care about the
//! admin thresholds, but the full ladders are kept for membership
//! management.

use serde::{Deserialize, Serialize};

/// A member's role within an organization.
///
/// Hierarchy: `Guest < Viewer < Editor < Admin < Owner`. Owner and Admin
/// members bypass organization-scoped permission checks entirely.
///
/// # Example
///
/// ```
/// use govern_tenancy::OrganizationRole;
///
/// assert!(OrganizationRole::Owner.is_admin());
/// assert!(OrganizationRole::Admin.is_admin());
/// assert!(!OrganizationRole::Editor.is_admin());
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum OrganizationRole {
    /// Limited visibility, invited for specific resources.
    Guest = 0,
    /// Read-only access to organization resources.
    Viewer = 1,
    /// Can create and edit content.
    Editor = 2,
    /// Can manage workspaces and members.
    Admin = 3,
    /// Full organization control, including settings and billing.
    Owner = 4,
}

impl OrganizationRole {
    /// Whether this role bypasses organization-scoped permission checks.
    ///
    /// True for `Admin` and `Owner`.
    pub fn is_admin(&self) -> bool {
        *self >= OrganizationRole::Admin
    }

    /// Whether this role can create and edit content.
    pub fn can_edit(&self) -> bool {
        *self >= OrganizationRole::Editor
    }

    /// Whether this role can invite, remove, and re-role members.
    pub fn can_manage_members(&self) -> bool {
        *self >= OrganizationRole::Admin
    }

    /// Whether this role can change organization settings.
    ///
    /// Owner only.
    pub fn can_manage_settings(&self) -> bool {
        *self >= OrganizationRole::Owner
    }

    /// Parse a role from its string form. Case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "guest" => Some(Self::Guest),
            "viewer" => Some(Self::Viewer),
            "editor" => Some(Self::Editor),
            "admin" => Some(Self::Admin),
            "owner" => Some(Self::Owner),
            _ => None,
        }
    }

    /// The lowercase string form stored in membership records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Guest => "guest",
            Self::Viewer => "viewer",
            Self::Editor => "editor",
            Self::Admin => "admin",
            Self::Owner => "owner",
        }
    }
}

impl Default for OrganizationRole {
    fn default() -> Self {
        Self::Viewer
    }
}

/// A member's role within a workspace.
///
/// Hierarchy: `Viewer < Editor < Admin < Owner`. Admin and Owner members
/// bypass workspace-scoped permission checks.
///
/// # Example
///
/// ```
/// use govern_tenancy::WorkspaceRole;
///
/// assert!(WorkspaceRole::Admin.can_manage());
/// assert!(!WorkspaceRole::Editor.can_manage());
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum WorkspaceRole {
    /// Read-only access.
    Viewer = 1,
    /// Can create and edit content.
    Editor = 2,
    /// Can manage workspace settings and members.
    Admin = 3,
    /// Full workspace control, including deletion.
    Owner = 4,
}

impl WorkspaceRole {
    /// Whether this role can create and edit content.
    pub fn can_edit(&self) -> bool {
        *self >= WorkspaceRole::Editor
    }

    /// Whether this role bypasses workspace-scoped permission checks.
    ///
    /// True for `Admin` and `Owner`.
    pub fn can_manage(&self) -> bool {
        *self >= WorkspaceRole::Admin
    }

    /// Whether this role can delete the workspace. Owner only.
    pub fn can_delete(&self) -> bool {
        *self >= WorkspaceRole::Owner
    }

    /// Parse a role from its string form. Case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "viewer" => Some(Self::Viewer),
            "editor" => Some(Self::Editor),
            "admin" => Some(Self::Admin),
            "owner" => Some(Self::Owner),
            _ => None,
        }
    }

    /// The lowercase string form stored in membership records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Viewer => "viewer",
            Self::Editor => "editor",
            Self::Admin => "admin",
            Self::Owner => "owner",
        }
    }
}

impl Default for WorkspaceRole {
    fn default() -> Self {
        Self::Viewer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn organization_role_order() {
        assert!(OrganizationRole::Owner > OrganizationRole::Admin);
        assert!(OrganizationRole::Admin > OrganizationRole::Editor);
        assert!(OrganizationRole::Editor > OrganizationRole::Viewer);
        assert!(OrganizationRole::Viewer > OrganizationRole::Guest);
    }

    #[test]
    fn organization_admin_threshold() {
        assert!(OrganizationRole::Owner.is_admin());
        assert!(OrganizationRole::Admin.is_admin());
        assert!(!OrganizationRole::Editor.is_admin());
        assert!(!OrganizationRole::Guest.is_admin());
    }

    #[test]
    fn organization_settings_are_owner_only() {
        assert!(OrganizationRole::Owner.can_manage_settings());
        assert!(!OrganizationRole::Admin.can_manage_settings());
    }

    #[test]
    fn organization_role_parse() {
        assert_eq!(OrganizationRole::parse("owner"), Some(OrganizationRole::Owner));
        assert_eq!(OrganizationRole::parse("ADMIN"), Some(OrganizationRole::Admin));
        assert_eq!(OrganizationRole::parse("nope"), None);
        assert_eq!(OrganizationRole::Admin.as_str(), "admin");
    }

    #[test]
    fn workspace_manage_threshold() {
        assert!(WorkspaceRole::Owner.can_manage());
        assert!(WorkspaceRole::Admin.can_manage());
        assert!(!WorkspaceRole::Editor.can_manage());
        assert!(WorkspaceRole::Editor.can_edit());
        assert!(!WorkspaceRole::Viewer.can_edit());
    }

    #[test]
    fn workspace_role_parse() {
        assert_eq!(WorkspaceRole::parse("Admin"), Some(WorkspaceRole::Admin));
        assert_eq!(WorkspaceRole::parse(""), None);
        assert_eq!(WorkspaceRole::Owner.as_str(), "owner");
    }
}

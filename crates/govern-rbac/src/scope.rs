//! # Permission scopes
//!
//! A scope narrows a permission check to an organization, workspace, or
//! individual resource. Scoped checks are evaluated outward-in by the
//! authorization service; an empty scope means "global check only".

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The target of a scoped permission check.
///
/// The caller decides which fields are set; unset fields are simply not
/// consulted. Malformed combinations are not validated here — an unknown
/// resource type just never produces a grant.
///
/// # Example
///
/// ```
/// use uuid::Uuid;
/// use govern_rbac::PermissionScope;
///
/// let scope = PermissionScope::organization(Uuid::now_v7());
/// assert!(!scope.is_global());
/// assert!(scope.workspace_id.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionScope {
    /// Organization the check is scoped to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<Uuid>,

    /// Workspace the check is scoped to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_id: Option<Uuid>,

    /// Resource type for resource-level grants (e.g. "dataset", "agent").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,

    /// Resource identifier for resource-level grants.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
}

impl PermissionScope {
    /// An empty scope: the check falls through to the global role check.
    pub fn global() -> Self {
        Self::default()
    }

    /// Scope a check to an organization.
    pub fn organization(organization_id: Uuid) -> Self {
        Self {
            organization_id: Some(organization_id),
            ..Self::default()
        }
    }

    /// Scope a check to a workspace.
    pub fn workspace(workspace_id: Uuid) -> Self {
        Self {
            workspace_id: Some(workspace_id),
            ..Self::default()
        }
    }

    /// Scope a check to a single resource.
    pub fn resource(resource_type: impl Into<String>, resource_id: impl Into<String>) -> Self {
        Self {
            resource_type: Some(resource_type.into()),
            resource_id: Some(resource_id.into()),
            ..Self::default()
        }
    }

    /// Attach an organization to an existing scope.
    pub fn with_organization(mut self, organization_id: Uuid) -> Self {
        self.organization_id = Some(organization_id);
        self
    }

    /// Attach a workspace to an existing scope.
    pub fn with_workspace(mut self, workspace_id: Uuid) -> Self {
        self.workspace_id = Some(workspace_id);
        self
    }

    /// Whether no scope fields are set.
    pub fn is_global(&self) -> bool {
        self.organization_id.is_none()
            && self.workspace_id.is_none()
            && self.resource_type.is_none()
            && self.resource_id.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_scope_is_empty() {
        assert!(PermissionScope::global().is_global());
        assert!(PermissionScope::default().is_global());
    }

    #[test]
    fn constructors_set_single_fields() {
        let org = Uuid::now_v7();
        let scope = PermissionScope::organization(org);
        assert_eq!(scope.organization_id, Some(org));
        assert!(scope.resource_type.is_none());

        let scope = PermissionScope::resource("dataset", "ds-42");
        assert_eq!(scope.resource_type.as_deref(), Some("dataset"));
        assert_eq!(scope.resource_id.as_deref(), Some("ds-42"));
        assert!(!scope.is_global());
    }

    #[test]
    fn empty_fields_are_not_serialized() {
        let json = serde_json::to_string(&PermissionScope::global()).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn scope_roundtrips_through_json() {
        let scope = PermissionScope::resource("workflow", "wf-1").with_workspace(Uuid::now_v7());
        let json = serde_json::to_string(&scope).unwrap();
        let back: PermissionScope = serde_json::from_str(&json).unwrap();
        assert_eq!(back, scope);
    }
}

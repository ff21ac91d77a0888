//! Role-based access control service.
//!
//! Resolves a principal's effective role and answers permission checks,
//! optionally narrowed to an organization, workspace, or resource scope.
//!
//! Role resolution never fails: a missing role record degrades to the
//! registry default, and a failing store read is logged and treated as
//! missing data. Only the mutation paths surface errors.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use govern_rbac::{Permission, PermissionScope, RoleRegistry};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AuthzError, AuthzResult};
use crate::store::AuthzStore;

/// An administrator-defined role persisted alongside the built-ins.
///
/// Custom-role permissions are additive: they can grant capabilities on
/// top of a principal's built-in role but never revoke them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomRole {
    /// Unique role id.
    pub id: Uuid,
    /// Organization the role belongs to, if org-scoped.
    pub organization_id: Option<Uuid>,
    /// Workspace the role belongs to, if workspace-scoped.
    pub workspace_id: Option<Uuid>,
    /// Role name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Capability strings, compared case-sensitively with the same
    /// wildcard rule as built-in role permissions.
    pub permissions: Vec<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl CustomRole {
    /// Create a custom role with a fresh id and the current time.
    pub fn new<S, I, P>(name: S, permissions: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        Self {
            id: Uuid::now_v7(),
            organization_id: None,
            workspace_id: None,
            name: name.into(),
            description: None,
            permissions: permissions.into_iter().map(Into::into).collect(),
            created_at: Utc::now(),
        }
    }

    /// Scope the role to an organization.
    pub fn for_organization(mut self, organization_id: Uuid) -> Self {
        self.organization_id = Some(organization_id);
        self
    }

    /// Scope the role to a workspace.
    pub fn for_workspace(mut self, workspace_id: Uuid) -> Self {
        self.workspace_id = Some(workspace_id);
        self
    }

    /// Attach a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Whether any permission of this role satisfies `required`.
    pub fn grants(&self, required: &Permission) -> bool {
        self.permissions
            .iter()
            .any(|p| Permission::new(p.as_str()).matches(required))
    }
}

/// Stateless permission-check service.
///
/// Holds a shared store handle and the immutable role registry; safe to
/// clone cheaply and use from concurrent requests.
#[derive(Clone)]
pub struct RbacService {
    store: Arc<dyn AuthzStore>,
    registry: Arc<RoleRegistry>,
}

impl RbacService {
    /// Create a service over a store and a role registry.
    pub fn new(store: Arc<dyn AuthzStore>, registry: Arc<RoleRegistry>) -> Self {
        Self { store, registry }
    }

    /// The registry this service resolves built-in roles against.
    pub fn registry(&self) -> &RoleRegistry {
        &self.registry
    }

    /// Resolve the principal's role name.
    ///
    /// Resolution order: explicit role assignment, role embedded on the
    /// access credential, then the registry default (`"analyst"`).
    /// Absence of data is not an error; store failures are logged and
    /// treated as absent.
    pub async fn user_role(&self, user_id: &str) -> String {
        match self.store.user_role(user_id).await {
            Ok(Some(role)) => return role,
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(error = %e, user_id, "role assignment lookup failed");
            }
        }
        match self.store.api_key_role(user_id).await {
            Ok(Some(role)) => return role,
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(error = %e, user_id, "api key role lookup failed");
            }
        }
        RoleRegistry::DEFAULT_ROLE.to_string()
    }

    /// Whether the principal holds `required`, via their built-in role
    /// or any assigned custom role.
    ///
    /// Degrades to `false` on store failure; never errors.
    pub async fn has_permission(&self, user_id: &str, required: &Permission) -> bool {
        let role_name = self.user_role(user_id).await;
        if let Some(role) = self.registry.get(&role_name) {
            if role.grants(required) {
                return true;
            }
        }
        self.custom_roles(user_id)
            .await
            .iter()
            .any(|role| role.grants(required))
    }

    /// Scoped permission check.
    ///
    /// Evaluated in order, first `true` wins:
    /// 1. owner/admin member of `scope.organization_id`;
    /// 2. admin member of `scope.workspace_id`;
    /// 3. explicit resource-level grant for the scoped resource;
    /// 4. the unscoped [`has_permission`](Self::has_permission) check.
    pub async fn has_permission_with_scope(
        &self,
        user_id: &str,
        required: &Permission,
        scope: &PermissionScope,
    ) -> bool {
        if let Some(organization_id) = scope.organization_id {
            match self.store.organization_role(organization_id, user_id).await {
                Ok(Some(role)) if role.is_admin() => return true,
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(error = %e, user_id, %organization_id, "organization role lookup failed");
                }
            }
        }

        if let Some(workspace_id) = scope.workspace_id {
            match self.store.workspace_role(workspace_id, user_id).await {
                Ok(Some(role)) if role.can_manage() => return true,
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(error = %e, user_id, %workspace_id, "workspace role lookup failed");
                }
            }
        }

        if let (Some(resource_type), Some(resource_id)) =
            (scope.resource_type.as_deref(), scope.resource_id.as_deref())
        {
            match self
                .store
                .resource_grant_exists(resource_type, resource_id, user_id, required)
                .await
            {
                Ok(true) => return true,
                Ok(false) => {}
                Err(e) => {
                    tracing::warn!(error = %e, user_id, resource_type, resource_id, "resource grant lookup failed");
                }
            }
        }

        self.has_permission(user_id, required).await
    }

    /// All custom roles assigned to the principal.
    ///
    /// Empty when none exist or when the store read fails.
    pub async fn custom_roles(&self, user_id: &str) -> Vec<CustomRole> {
        match self.store.custom_roles_for_user(user_id).await {
            Ok(roles) => roles,
            Err(e) => {
                tracing::warn!(error = %e, user_id, "custom role lookup failed");
                Vec::new()
            }
        }
    }

    /// Persist a custom role. Surfaces store failures.
    pub async fn create_custom_role(&self, role: CustomRole) -> AuthzResult<CustomRole> {
        if role.name.trim().is_empty() {
            return Err(AuthzError::Validation("role name must not be empty".into()));
        }
        if self.registry.contains(&role.name) {
            return Err(AuthzError::Validation(format!(
                "role name {:?} shadows a built-in role",
                role.name
            )));
        }
        self.store.insert_custom_role(&role).await?;
        Ok(role)
    }

    /// Delete a custom role.
    ///
    /// Fails with a conflict while role assignments still reference it.
    pub async fn delete_custom_role(&self, role_id: Uuid) -> AuthzResult<()> {
        if self.store.delete_custom_role(role_id).await? {
            Ok(())
        } else {
            Err(AuthzError::NotFound(format!("custom role {role_id}")))
        }
    }

    /// Assign a custom role to a principal. Surfaces store failures.
    pub async fn assign_role(&self, user_id: &str, role_id: Uuid) -> AuthzResult<()> {
        if user_id.is_empty() {
            return Err(AuthzError::Validation("user id must not be empty".into()));
        }
        self.store.assign_custom_role(user_id, role_id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_role_grants_with_wildcard() {
        let role = CustomRole::new("pipeline-ops", ["workflow:*", "datasource:read"]);
        assert!(role.grants(&Permission::new("workflow:execute")));
        assert!(role.grants(&Permission::new("datasource:read")));
        assert!(!role.grants(&Permission::new("datasource:write")));
    }

    #[test]
    fn custom_role_permissions_are_case_sensitive() {
        let role = CustomRole::new("ops", ["Workflow:Execute"]);
        assert!(!role.grants(&Permission::new("workflow:execute")));
        assert!(role.grants(&Permission::new("Workflow:Execute")));
    }

    #[test]
    fn custom_role_builder() {
        let org = Uuid::now_v7();
        let role = CustomRole::new("auditor", ["compliance:read"])
            .for_organization(org)
            .with_description("read-only compliance access");
        assert_eq!(role.organization_id, Some(org));
        assert_eq!(role.description.as_deref(), Some("read-only compliance access"));
        assert!(role.workspace_id.is_none());
    }
}

//! In-memory store implementation.
//!
//! Suitable for single-process deployments and tests. Production
//! deployments implement [`AuthzStore`] over the relational store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use govern_rbac::Permission;
use govern_tenancy::{OrganizationRole, ResourceGrant, WorkspaceRole};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::column_security::ColumnSecurityPolicy;
use crate::error::StoreError;
use crate::rbac::CustomRole;
use crate::row_security::RowSecurityPolicy;
use crate::store::AuthzStore;

#[derive(Default)]
struct Inner {
    user_roles: HashMap<String, String>,
    api_key_roles: HashMap<String, String>,
    custom_roles: HashMap<Uuid, CustomRole>,
    role_assignments: Vec<(String, Uuid)>,
    organization_members: HashMap<(Uuid, String), OrganizationRole>,
    workspace_members: HashMap<(Uuid, String), WorkspaceRole>,
    resource_grants: Vec<ResourceGrant>,
    row_policies: Vec<RowSecurityPolicy>,
    column_policies: Vec<ColumnSecurityPolicy>,
}

/// [`AuthzStore`] backed by in-process maps.
///
/// # Example
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use govern_authz::{MemoryStore, RbacService};
/// use govern_rbac::RoleRegistry;
///
/// # async fn setup() {
/// let store = Arc::new(MemoryStore::new());
/// store.set_user_role("user-1", "support").await;
/// let rbac = RbacService::new(store, Arc::new(RoleRegistry::builtin()));
/// # }
/// ```
#[derive(Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an explicit role assignment.
    pub async fn set_user_role(&self, user_id: impl Into<String>, role: impl Into<String>) {
        self.inner
            .write()
            .await
            .user_roles
            .insert(user_id.into(), role.into());
    }

    /// Seed a role carried on an API key credential.
    pub async fn set_api_key_role(&self, user_id: impl Into<String>, role: impl Into<String>) {
        self.inner
            .write()
            .await
            .api_key_roles
            .insert(user_id.into(), role.into());
    }

    /// Seed an organization membership role.
    pub async fn add_organization_member(
        &self,
        organization_id: Uuid,
        user_id: impl Into<String>,
        role: OrganizationRole,
    ) {
        self.inner
            .write()
            .await
            .organization_members
            .insert((organization_id, user_id.into()), role);
    }

    /// Seed a workspace membership role.
    pub async fn add_workspace_member(
        &self,
        workspace_id: Uuid,
        user_id: impl Into<String>,
        role: WorkspaceRole,
    ) {
        self.inner
            .write()
            .await
            .workspace_members
            .insert((workspace_id, user_id.into()), role);
    }

    /// Seed a resource-level grant.
    pub async fn add_resource_grant(&self, grant: ResourceGrant) {
        self.inner.write().await.resource_grants.push(grant);
    }
}

#[async_trait]
impl AuthzStore for MemoryStore {
    async fn user_role(&self, user_id: &str) -> Result<Option<String>, StoreError> {
        Ok(self.inner.read().await.user_roles.get(user_id).cloned())
    }

    async fn api_key_role(&self, user_id: &str) -> Result<Option<String>, StoreError> {
        Ok(self.inner.read().await.api_key_roles.get(user_id).cloned())
    }

    async fn custom_roles_for_user(&self, user_id: &str) -> Result<Vec<CustomRole>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .role_assignments
            .iter()
            .filter(|(user, _)| user == user_id)
            .filter_map(|(_, role_id)| inner.custom_roles.get(role_id).cloned())
            .collect())
    }

    async fn organization_role(
        &self,
        organization_id: Uuid,
        user_id: &str,
    ) -> Result<Option<OrganizationRole>, StoreError> {
        Ok(self
            .inner
            .read()
            .await
            .organization_members
            .get(&(organization_id, user_id.to_string()))
            .copied())
    }

    async fn workspace_role(
        &self,
        workspace_id: Uuid,
        user_id: &str,
    ) -> Result<Option<WorkspaceRole>, StoreError> {
        Ok(self
            .inner
            .read()
            .await
            .workspace_members
            .get(&(workspace_id, user_id.to_string()))
            .copied())
    }

    async fn resource_grant_exists(
        &self,
        resource_type: &str,
        resource_id: &str,
        user_id: &str,
        required: &Permission,
    ) -> Result<bool, StoreError> {
        Ok(self
            .inner
            .read()
            .await
            .resource_grants
            .iter()
            .any(|grant| grant.covers(resource_type, resource_id, user_id, required)))
    }

    async fn row_policies(
        &self,
        connector_id: Option<Uuid>,
        schema_name: &str,
        table_name: &str,
    ) -> Result<Vec<RowSecurityPolicy>, StoreError> {
        Ok(self
            .inner
            .read()
            .await
            .row_policies
            .iter()
            .filter(|p| {
                p.enabled
                    && p.connector_id == connector_id
                    && p.schema_name == schema_name
                    && p.table_name == table_name
            })
            .cloned()
            .collect())
    }

    async fn column_policy(
        &self,
        connector_id: Option<Uuid>,
        schema_name: &str,
        table_name: &str,
        column_name: &str,
    ) -> Result<Option<ColumnSecurityPolicy>, StoreError> {
        Ok(self
            .inner
            .read()
            .await
            .column_policies
            .iter()
            .find(|p| {
                p.enabled
                    && p.connector_id == connector_id
                    && p.schema_name == schema_name
                    && p.table_name == table_name
                    && p.column_name == column_name
            })
            .cloned())
    }

    async fn insert_custom_role(&self, role: &CustomRole) -> Result<(), StoreError> {
        self.inner
            .write()
            .await
            .custom_roles
            .insert(role.id, role.clone());
        Ok(())
    }

    async fn delete_custom_role(&self, role_id: Uuid) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().await;
        if inner.role_assignments.iter().any(|(_, id)| *id == role_id) {
            return Err(StoreError::Conflict(format!(
                "custom role {role_id} is still assigned"
            )));
        }
        Ok(inner.custom_roles.remove(&role_id).is_some())
    }

    async fn assign_custom_role(&self, user_id: &str, role_id: Uuid) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        if !inner.custom_roles.contains_key(&role_id) {
            return Err(StoreError::Query(format!("custom role {role_id} not found")));
        }
        let assignment = (user_id.to_string(), role_id);
        if !inner.role_assignments.contains(&assignment) {
            inner.role_assignments.push(assignment);
        }
        Ok(())
    }

    async fn insert_row_policy(&self, policy: &RowSecurityPolicy) -> Result<(), StoreError> {
        self.inner.write().await.row_policies.push(policy.clone());
        Ok(())
    }

    async fn delete_row_policy(&self, policy_id: Uuid) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().await;
        let before = inner.row_policies.len();
        inner.row_policies.retain(|p| p.id != policy_id);
        Ok(inner.row_policies.len() < before)
    }

    async fn insert_column_policy(&self, policy: &ColumnSecurityPolicy) -> Result<(), StoreError> {
        self.inner
            .write()
            .await
            .column_policies
            .push(policy.clone());
        Ok(())
    }

    async fn delete_column_policy(&self, policy_id: Uuid) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().await;
        let before = inner.column_policies.len();
        inner.column_policies.retain(|p| p.id != policy_id);
        Ok(inner.column_policies.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn role_lookup_roundtrip() {
        let store = MemoryStore::new();
        store.set_user_role("user-1", "support").await;
        assert_eq!(store.user_role("user-1").await.unwrap().as_deref(), Some("support"));
        assert_eq!(store.user_role("user-2").await.unwrap(), None);
    }

    #[tokio::test]
    async fn row_policy_lookup_excludes_disabled_and_other_tables() {
        let store = MemoryStore::new();
        let active = RowSecurityPolicy::new("public", "orders", "own", "1=1", ["*"]);
        let disabled = RowSecurityPolicy::new("public", "orders", "off", "1=1", ["*"]).disabled();
        let elsewhere = RowSecurityPolicy::new("public", "users", "own", "1=1", ["*"]);
        for p in [&active, &disabled, &elsewhere] {
            store.insert_row_policy(p).await.unwrap();
        }

        let found = store.row_policies(None, "public", "orders").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, active.id);
    }

    #[tokio::test]
    async fn row_policy_lookup_matches_connector_exactly() {
        let store = MemoryStore::new();
        let connector = Uuid::now_v7();
        let scoped =
            RowSecurityPolicy::new("public", "orders", "own", "1=1", ["*"]).for_connector(connector);
        store.insert_row_policy(&scoped).await.unwrap();

        assert!(store.row_policies(None, "public", "orders").await.unwrap().is_empty());
        assert_eq!(
            store
                .row_policies(Some(connector), "public", "orders")
                .await
                .unwrap()
                .len(),
            1
        );
    }

    #[tokio::test]
    async fn custom_role_delete_conflicts_while_assigned() {
        let store = MemoryStore::new();
        let role = CustomRole::new("ops", ["workflow:*"]);
        store.insert_custom_role(&role).await.unwrap();
        store.assign_custom_role("user-1", role.id).await.unwrap();

        let err = store.delete_custom_role(role.id).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn grant_lookup_uses_permission_matching() {
        let store = MemoryStore::new();
        store
            .add_resource_grant(ResourceGrant::new(
                "dataset",
                "ds-1",
                "user-1",
                Permission::new("warehouse:*"),
            ))
            .await;

        assert!(store
            .resource_grant_exists("dataset", "ds-1", "user-1", &Permission::new("warehouse:query"))
            .await
            .unwrap());
        assert!(!store
            .resource_grant_exists("dataset", "ds-1", "user-1", &Permission::new("catalog:read"))
            .await
            .unwrap());
    }
}

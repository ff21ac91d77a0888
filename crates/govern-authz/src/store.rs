//! The persistence collaborator consumed by the authorization services.
//!
//! The services never talk to a database directly; they read role
//! assignments, memberships, grants, and security policies through this
//! trait. Implementations own their connection-pool concurrency; every
//! method here is a single independent read or write with no transaction
//! discipline on top.

use async_trait::async_trait;
use govern_rbac::Permission;
use govern_tenancy::{OrganizationRole, WorkspaceRole};
use uuid::Uuid;

use crate::column_security::ColumnSecurityPolicy;
use crate::error::StoreError;
use crate::rbac::CustomRole;
use crate::row_security::RowSecurityPolicy;

/// Read and write contracts over the persisted authorization data.
///
/// Absence of data is `Ok(None)` / an empty `Vec`, never an error: the
/// services treat "no record" as a documented default (fail-open).
#[async_trait]
pub trait AuthzStore: Send + Sync {
    /// Explicit per-user role assignment, if one exists.
    async fn user_role(&self, user_id: &str) -> Result<Option<String>, StoreError>;

    /// Role embedded on the principal's access credential (API key),
    /// consulted when no explicit role assignment exists.
    async fn api_key_role(&self, user_id: &str) -> Result<Option<String>, StoreError>;

    /// All custom roles assigned to the principal. Empty when none.
    async fn custom_roles_for_user(&self, user_id: &str) -> Result<Vec<CustomRole>, StoreError>;

    /// The principal's active membership role in an organization.
    async fn organization_role(
        &self,
        organization_id: Uuid,
        user_id: &str,
    ) -> Result<Option<OrganizationRole>, StoreError>;

    /// The principal's membership role in a workspace.
    async fn workspace_role(
        &self,
        workspace_id: Uuid,
        user_id: &str,
    ) -> Result<Option<WorkspaceRole>, StoreError>;

    /// Whether an explicit resource-level grant covers the required
    /// permission for this principal.
    async fn resource_grant_exists(
        &self,
        resource_type: &str,
        resource_id: &str,
        user_id: &str,
        required: &Permission,
    ) -> Result<bool, StoreError>;

    /// Enabled row-security policies for a table, keyed by connector,
    /// schema, and table name. Disabled policies are never returned.
    async fn row_policies(
        &self,
        connector_id: Option<Uuid>,
        schema_name: &str,
        table_name: &str,
    ) -> Result<Vec<RowSecurityPolicy>, StoreError>;

    /// The enabled column-security policy for a column, first match.
    async fn column_policy(
        &self,
        connector_id: Option<Uuid>,
        schema_name: &str,
        table_name: &str,
        column_name: &str,
    ) -> Result<Option<ColumnSecurityPolicy>, StoreError>;

    /// Persist a custom role.
    async fn insert_custom_role(&self, role: &CustomRole) -> Result<(), StoreError>;

    /// Delete a custom role.
    ///
    /// Returns `false` when no such role exists. Fails with
    /// [`StoreError::Conflict`] while role assignments still reference it.
    async fn delete_custom_role(&self, role_id: Uuid) -> Result<bool, StoreError>;

    /// Assign a custom role to a principal.
    async fn assign_custom_role(&self, user_id: &str, role_id: Uuid) -> Result<(), StoreError>;

    /// Persist a row-security policy.
    async fn insert_row_policy(&self, policy: &RowSecurityPolicy) -> Result<(), StoreError>;

    /// Delete a row-security policy. Returns `false` when absent.
    async fn delete_row_policy(&self, policy_id: Uuid) -> Result<bool, StoreError>;

    /// Persist a column-security policy.
    async fn insert_column_policy(&self, policy: &ColumnSecurityPolicy) -> Result<(), StoreError>;

    /// Delete a column-security policy. Returns `false` when absent.
    async fn delete_column_policy(&self, policy_id: Uuid) -> Result<bool, StoreError>;
}

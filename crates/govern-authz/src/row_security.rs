//! Row-level security.
//!
//! Policies attach filter predicates to tables; the service rewrites a
//! base query by AND-ing in the predicates that apply to the caller's
//! role. No policy configured means no restriction: fetch failures and
//! empty lookups both return the base query untouched (fail-open by
//! design — absence of policy is "no restriction", not "deny").

use std::sync::Arc;

use chrono::{DateTime, Utc};
use govern_rbac::Permission;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::{AuthzError, AuthzResult};
use crate::rbac::RbacService;
use crate::store::AuthzStore;

/// A row-level security policy for one table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowSecurityPolicy {
    /// Unique policy id.
    pub id: Uuid,
    /// Connector the table belongs to; `None` for the default warehouse.
    pub connector_id: Option<Uuid>,
    /// Schema name.
    pub schema_name: String,
    /// Table name.
    pub table_name: String,
    /// Administrator-facing policy name.
    pub policy_name: String,
    /// Raw SQL predicate with `{user_id}`, `{user_role}`, and
    /// `{tenant_id}` placeholders. Administrator-authored.
    pub filter_expression: String,
    /// Roles the policy applies to; `"*"` applies to every role.
    pub user_roles: Vec<String>,
    /// Free-form metadata.
    #[serde(default)]
    pub metadata: Map<String, Value>,
    /// Disabled policies are excluded from filter resolution entirely.
    pub enabled: bool,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

impl RowSecurityPolicy {
    /// Create an enabled policy with a fresh id and current timestamps.
    pub fn new(
        schema_name: impl Into<String>,
        table_name: impl Into<String>,
        policy_name: impl Into<String>,
        filter_expression: impl Into<String>,
        user_roles: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            connector_id: None,
            schema_name: schema_name.into(),
            table_name: table_name.into(),
            policy_name: policy_name.into(),
            filter_expression: filter_expression.into(),
            user_roles: user_roles.into_iter().map(Into::into).collect(),
            metadata: Map::new(),
            enabled: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Attach a connector id.
    pub fn for_connector(mut self, connector_id: Uuid) -> Self {
        self.connector_id = Some(connector_id);
        self
    }

    /// Soft-disable the policy without deleting it.
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Whether this policy applies to the given role.
    pub fn applies_to_role(&self, role: &str) -> bool {
        self.user_roles.iter().any(|r| r == role || r == "*")
    }
}

/// Rewrites warehouse queries according to row-security policies.
pub struct RowSecurityService {
    store: Arc<dyn AuthzStore>,
    rbac: RbacService,
}

impl RowSecurityService {
    /// Create a service over a store and the RBAC service used for the
    /// admin bypass.
    pub fn new(store: Arc<dyn AuthzStore>, rbac: RbacService) -> Self {
        Self { store, rbac }
    }

    /// Apply row-level filtering to a query.
    ///
    /// Every enabled policy for the table whose `user_roles` include the
    /// caller's role (or `"*"`) contributes its filter expression;
    /// contributions are AND-joined and appended to the query. When some
    /// policy does *not* apply to the caller's role, a holder of
    /// `admin:*` bypasses row security wholesale and receives the query
    /// unchanged — the bypass is global, not per-policy.
    ///
    /// A policy-fetch failure or an empty policy list returns the base
    /// query verbatim.
    #[allow(clippy::too_many_arguments)]
    pub async fn apply_row_filter(
        &self,
        user_id: &str,
        user_role: &str,
        connector_id: Option<Uuid>,
        schema_name: &str,
        table_name: &str,
        base_query: &str,
    ) -> String {
        let policies = match self
            .store
            .row_policies(connector_id, schema_name, table_name)
            .await
        {
            Ok(policies) => policies,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    schema_name,
                    table_name,
                    "row policy lookup failed, returning query unfiltered"
                );
                return base_query.to_string();
            }
        };
        if policies.is_empty() {
            return base_query.to_string();
        }

        let mut filters = Vec::new();
        for policy in &policies {
            let applies = policy.applies_to_role(user_role);

            if !applies && self.rbac.has_permission(user_id, &Permission::admin()).await {
                // Admins see all rows.
                return base_query.to_string();
            }

            if applies {
                filters.push(substitute_placeholders(
                    &policy.filter_expression,
                    user_id,
                    user_role,
                ));
            }
        }

        if filters.is_empty() {
            return base_query.to_string();
        }

        let combined = filters.join(" AND ");
        if base_query.to_uppercase().contains("WHERE") {
            format!("{base_query} AND ({combined})")
        } else {
            format!("{base_query} WHERE {combined}")
        }
    }

    /// Persist a row-security policy. Surfaces store failures.
    pub async fn create_policy(&self, policy: RowSecurityPolicy) -> AuthzResult<RowSecurityPolicy> {
        if policy.schema_name.is_empty() || policy.table_name.is_empty() {
            return Err(AuthzError::Validation(
                "schema and table names must not be empty".into(),
            ));
        }
        if policy.policy_name.trim().is_empty() {
            return Err(AuthzError::Validation("policy name must not be empty".into()));
        }
        if policy.filter_expression.trim().is_empty() {
            return Err(AuthzError::Validation(
                "filter expression must not be empty".into(),
            ));
        }
        self.store.insert_row_policy(&policy).await?;
        Ok(policy)
    }

    /// Delete a row-security policy. Surfaces store failures.
    pub async fn delete_policy(&self, policy_id: Uuid) -> AuthzResult<()> {
        if self.store.delete_row_policy(policy_id).await? {
            Ok(())
        } else {
            Err(AuthzError::NotFound(format!("row policy {policy_id}")))
        }
    }
}

/// Substitute filter placeholders with single-quoted values.
///
/// Deliberate string interpolation rather than parameter binding:
/// policies are administrator-authored, and binding would change which
/// placeholders the expression language supports. `{tenant_id}` is left
/// in place until tenant resolution is wired through the query context.
fn substitute_placeholders(filter: &str, user_id: &str, user_role: &str) -> String {
    filter
        .replace("{user_id}", &format!("'{user_id}'"))
        .replace("{user_role}", &format!("'{user_role}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_applies_by_role_or_star() {
        let policy = RowSecurityPolicy::new("public", "orders", "own-rows", "owner_id = {user_id}", ["analyst"]);
        assert!(policy.applies_to_role("analyst"));
        assert!(!policy.applies_to_role("support"));

        let any = RowSecurityPolicy::new("public", "orders", "all", "1=1", ["*"]);
        assert!(any.applies_to_role("support"));
    }

    #[test]
    fn placeholder_substitution_quotes_values() {
        let out = substitute_placeholders(
            "owner_id = {user_id} AND role = {user_role}",
            "user-1",
            "analyst",
        );
        assert_eq!(out, "owner_id = 'user-1' AND role = 'analyst'");
    }

    #[test]
    fn tenant_placeholder_is_left_alone() {
        let out = substitute_placeholders("tenant_id = {tenant_id}", "user-1", "analyst");
        assert_eq!(out, "tenant_id = {tenant_id}");
    }

    #[test]
    fn new_policy_is_enabled_with_timestamps() {
        let policy = RowSecurityPolicy::new("public", "t", "p", "1=1", ["*"]);
        assert!(policy.enabled);
        assert_eq!(policy.created_at, policy.updated_at);
        assert!(!policy.disabled().enabled);
    }
}

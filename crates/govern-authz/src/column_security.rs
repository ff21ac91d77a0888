//! Column-level security.
//!
//! A column policy decides whether a caller may see a column's value
//! and, if not, how the value is rewritten: hidden, masked by rule, or
//! redacted. No policy configured means the column is visible
//! (fail-open, same philosophy as row security).

use std::sync::Arc;

use chrono::{DateTime, Utc};
use govern_rbac::Permission;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::{AuthzError, AuthzResult};
use crate::masking::{self, MaskingRule};
use crate::rbac::RbacService;
use crate::store::AuthzStore;

/// What happens to a column value the caller may not see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyType {
    /// Rewrite the value through the policy's masking rule.
    Mask,
    /// Drop the value entirely (serialized as null).
    Hide,
    /// Replace the value with the literal `"[REDACTED]"`.
    Redact,
    /// Unknown stored type: permissive default, value passes through.
    #[serde(other)]
    Other,
}

/// A column-level security policy.
///
/// One policy per (connector, schema, table, column) is expected; lookup
/// returns the first match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnSecurityPolicy {
    /// Unique policy id.
    pub id: Uuid,
    /// Connector the table belongs to; `None` for the default warehouse.
    pub connector_id: Option<Uuid>,
    /// Schema name.
    pub schema_name: String,
    /// Table name.
    pub table_name: String,
    /// Column name.
    pub column_name: String,
    /// How denied values are rewritten.
    pub policy_type: PolicyType,
    /// Masking rule for [`PolicyType::Mask`]; missing rule masks fully.
    pub masking_rule: Option<MaskingRule>,
    /// Roles allowed to see the column; `"*"` allows every role.
    pub user_roles: Vec<String>,
    /// Free-form metadata.
    #[serde(default)]
    pub metadata: Map<String, Value>,
    /// Disabled policies are excluded from masking resolution entirely.
    pub enabled: bool,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

impl ColumnSecurityPolicy {
    /// Create an enabled policy with a fresh id and current timestamps.
    pub fn new(
        schema_name: impl Into<String>,
        table_name: impl Into<String>,
        column_name: impl Into<String>,
        policy_type: PolicyType,
        user_roles: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            connector_id: None,
            schema_name: schema_name.into(),
            table_name: table_name.into(),
            column_name: column_name.into(),
            policy_type,
            masking_rule: None,
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

    /// Attach a masking rule.
    pub fn with_masking_rule(mut self, rule: MaskingRule) -> Self {
        self.masking_rule = Some(rule);
        self
    }

    /// Soft-disable the policy without deleting it.
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Whether the given role may see the column under this policy.
    pub fn allows_role(&self, role: &str) -> bool {
        self.user_roles.iter().any(|r| r == role || r == "*")
    }
}

/// Decides column visibility and rewrites denied values.
pub struct ColumnSecurityService {
    store: Arc<dyn AuthzStore>,
    rbac: RbacService,
}

impl ColumnSecurityService {
    /// Create a service over a store and the RBAC service used for the
    /// admin bypass.
    pub fn new(store: Arc<dyn AuthzStore>, rbac: RbacService) -> Self {
        Self { store, rbac }
    }

    /// Whether the caller may see the column's raw value.
    ///
    /// Granted when no policy is configured (or the lookup fails), when
    /// the caller's role is listed (or the policy lists `"*"`), or when
    /// the caller holds `admin:*`.
    pub async fn check_access(
        &self,
        user_id: &str,
        user_role: &str,
        connector_id: Option<Uuid>,
        schema_name: &str,
        table_name: &str,
        column_name: &str,
    ) -> bool {
        let policy = match self
            .fetch_policy(connector_id, schema_name, table_name, column_name)
            .await
        {
            Some(policy) => policy,
            None => return true,
        };
        if policy.allows_role(user_role) {
            return true;
        }
        self.rbac.has_permission(user_id, &Permission::admin()).await
    }

    /// Apply column masking to a value.
    ///
    /// Callers with access receive the value unchanged. Denied values
    /// branch on the policy type: hide → null, mask → masking rule,
    /// redact → `"[REDACTED]"`, unknown → unchanged.
    #[allow(clippy::too_many_arguments)]
    pub async fn apply_masking(
        &self,
        user_id: &str,
        user_role: &str,
        connector_id: Option<Uuid>,
        schema_name: &str,
        table_name: &str,
        column_name: &str,
        value: Value,
    ) -> Value {
        let policy = match self
            .fetch_policy(connector_id, schema_name, table_name, column_name)
            .await
        {
            Some(policy) => policy,
            None => return value,
        };
        if policy.allows_role(user_role) {
            return value;
        }
        if self.rbac.has_permission(user_id, &Permission::admin()).await {
            return value;
        }

        match policy.policy_type {
            PolicyType::Hide => Value::Null,
            PolicyType::Mask => masking::apply_rule(&value, policy.masking_rule.as_ref()),
            PolicyType::Redact => Value::String("[REDACTED]".to_string()),
            PolicyType::Other => value,
        }
    }

    /// Persist a column-security policy. Surfaces store failures.
    pub async fn create_policy(
        &self,
        policy: ColumnSecurityPolicy,
    ) -> AuthzResult<ColumnSecurityPolicy> {
        if policy.schema_name.is_empty()
            || policy.table_name.is_empty()
            || policy.column_name.is_empty()
        {
            return Err(AuthzError::Validation(
                "schema, table, and column names must not be empty".into(),
            ));
        }
        self.store.insert_column_policy(&policy).await?;
        Ok(policy)
    }

    /// Delete a column-security policy. Surfaces store failures.
    pub async fn delete_policy(&self, policy_id: Uuid) -> AuthzResult<()> {
        if self.store.delete_column_policy(policy_id).await? {
            Ok(())
        } else {
            Err(AuthzError::NotFound(format!("column policy {policy_id}")))
        }
    }

    /// Fetch the column's policy, treating lookup failures as absent.
    async fn fetch_policy(
        &self,
        connector_id: Option<Uuid>,
        schema_name: &str,
        table_name: &str,
        column_name: &str,
    ) -> Option<ColumnSecurityPolicy> {
        match self
            .store
            .column_policy(connector_id, schema_name, table_name, column_name)
            .await
        {
            Ok(policy) => policy,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    schema_name,
                    table_name,
                    column_name,
                    "column policy lookup failed, treating column as unrestricted"
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_allows_listed_role_or_star() {
        let policy = ColumnSecurityPolicy::new("public", "users", "email", PolicyType::Mask, ["admin", "support"]);
        assert!(policy.allows_role("support"));
        assert!(!policy.allows_role("analyst"));

        let open = ColumnSecurityPolicy::new("public", "users", "name", PolicyType::Hide, ["*"]);
        assert!(open.allows_role("analyst"));
    }

    #[test]
    fn policy_type_strings_are_preserved() {
        assert_eq!(serde_json::to_string(&PolicyType::Mask).unwrap(), "\"mask\"");
        assert_eq!(serde_json::to_string(&PolicyType::Hide).unwrap(), "\"hide\"");
        assert_eq!(serde_json::to_string(&PolicyType::Redact).unwrap(), "\"redact\"");
        // Unknown stored types fall through permissively.
        assert_eq!(
            serde_json::from_str::<PolicyType>("\"tokenize\"").unwrap(),
            PolicyType::Other
        );
    }

    #[test]
    fn policy_builder() {
        let connector = Uuid::now_v7();
        let policy = ColumnSecurityPolicy::new("public", "users", "ssn", PolicyType::Mask, ["admin"])
            .for_connector(connector)
            .with_masking_rule(MaskingRule::Ssn);
        assert_eq!(policy.connector_id, Some(connector));
        assert_eq!(policy.masking_rule, Some(MaskingRule::Ssn));
        assert!(policy.enabled);
    }
}

//! # Govern Authorization Services
//!
//! The authorization core of the Govern platform: role-based permission
//! checks plus row- and column-level security for warehouse data.
//!
//! ## Overview
//!
//! Three stateless, request-scoped services share a persistence
//! collaborator ([`AuthzStore`]) and the immutable role registry from
//! `govern-rbac`:
//!
//! - [`RbacService`] — resolves a principal's effective role and answers
//!   "does this principal hold permission P [within scope S]?"
//! - [`RowSecurityService`] — rewrites warehouse queries by AND-ing in
//!   policy-defined filter predicates, with a global admin bypass.
//! - [`ColumnSecurityService`] — decides column visibility and rewrites
//!   denied values (hide / mask / redact).
//!
//! Handlers call [`RbacService::has_permission`] (or the scoped variant)
//! as a guard before executing a domain operation; data-returning
//! operations additionally pass rows and columns through the security
//! services before serialization. HTTP status mapping (401/403) stays in
//! the handler layer; [`AuthzError::status_code`] helps with the
//! mutation paths.
//!
//! ## Failure philosophy
//!
//! Absence of data is never an error: no role record means the default
//! role, no policy means no restriction. Hot-path reads additionally
//! swallow store failures (logged via `tracing`) so authorization checks
//! stay resilient to transient read errors; only policy and role
//! mutations surface errors.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use govern_authz::{MemoryStore, RbacService, RowSecurityService};
//! use govern_rbac::{capability, Permission, RoleRegistry};
//!
//! # async fn example() {
//! let store = Arc::new(MemoryStore::new());
//! let registry = Arc::new(RoleRegistry::builtin());
//! let rbac = RbacService::new(store.clone(), registry);
//!
//! // Guard a handler.
//! let allowed = rbac
//!     .has_permission("user-1", &Permission::new(capability::WAREHOUSE_QUERY))
//!     .await;
//!
//! // Rewrite a query under row security.
//! let rows = RowSecurityService::new(store.clone(), rbac.clone());
//! let query = rows
//!     .apply_row_filter(
//!         "user-1",
//!         "analyst",
//!         None,
//!         "public",
//!         "orders",
//!         "SELECT * FROM public.orders",
//!     )
//!     .await;
//! # let _ = (allowed, query);
//! # }
//! ```

pub mod column_security;
pub mod error;
pub mod masking;
pub mod rbac;
pub mod row_security;
pub mod store;

#[cfg(feature = "memory")]
mod memory;

// Re-export main types for convenience
pub use column_security::{ColumnSecurityPolicy, ColumnSecurityService, PolicyType};
pub use error::{AuthzError, AuthzResult, StoreError};
pub use masking::MaskingRule;
pub use rbac::{CustomRole, RbacService};
pub use row_security::{RowSecurityPolicy, RowSecurityService};
pub use store::AuthzStore;

#[cfg(feature = "memory")]
pub use memory::MemoryStore;

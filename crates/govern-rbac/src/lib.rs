//! # Govern RBAC (Role-Based Access Control)
//!
//! This crate provides the capability model shared by all Govern platform
//! services: permission strings, wildcard matching, permission sets, and
//! the built-in role registry.
//!
//! ## Permission model
//!
//! A permission is an opaque capability string of the form
//! `"<domain>:<action>"`:
//!
//! ```text
//! "warehouse:query"    - run warehouse queries
//! "compliance:manage"  - manage compliance policies
//! "semantic:*"         - every semantic-layer action (domain wildcard)
//! "admin:*"            - the universal admin wildcard
//! ```
//!
//! Matching is exact-string equality plus a single-level wildcard rule:
//! a permission ending in `:*` grants every permission sharing its
//! `domain:` prefix, and `admin:*` grants everything. The wildcard test
//! is a plain string-prefix test, not a segment-count test, so `"a:*"`
//! also covers `"a:b:c"` — call sites depend on this.
//!
//! ## Roles
//!
//! Built-in roles (`admin`, `analyst`, `support`, `developer`) live in an
//! immutable [`RoleRegistry`] constructed once at startup and passed by
//! reference, so tests can substitute alternate registries. Custom roles
//! are persisted entities owned by the `govern-authz` crate; their
//! permissions are additive to the built-in role permissions.
//!
//! ## Usage
//!
//! ```rust
//! use govern_rbac::{capability, Permission, PermissionSet, RoleRegistry};
//!
//! let required = Permission::new(capability::WAREHOUSE_QUERY);
//!
//! // Wildcard containment
//! assert!(Permission::new("warehouse:*").matches(&required));
//! assert!(Permission::admin().matches(&required));
//!
//! // Set semantics
//! let held = PermissionSet::from_strs(&["warehouse:query", "support:read"]);
//! assert!(held.has(&required));
//!
//! // Built-in role lookup
//! let registry = RoleRegistry::builtin();
//! let analyst = registry.get("analyst").unwrap();
//! assert!(analyst.grants(&required));
//! ```

pub mod permission;
pub mod registry;
pub mod scope;

// Re-export main types for convenience
pub use permission::{capability, Permission, PermissionSet};
pub use registry::{Role, RoleRegistry};
pub use scope::PermissionScope;

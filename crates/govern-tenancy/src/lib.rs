//! # Govern Tenancy
//!
//! Multi-tenant membership model for the Govern platform: organizations
//! at the top, workspaces inside them, and per-resource permission
//! grants at the bottom.
//!
//! ## Scope hierarchy
//!
//! ```text
//! Organization            (owner/admin bypass scoped checks)
//!   └── Workspace         (admin bypasses scoped checks)
//!         └── Resource    (explicit per-resource grants)
//! ```
//!
//! The `govern-authz` crate walks this hierarchy outward-in when it
//! evaluates a scoped permission check. This crate only defines the
//! entities and role hierarchies; it performs no I/O.
//!
//! ## Usage
//!
//! ```rust
//! use uuid::Uuid;
//! use govern_tenancy::{OrganizationMembership, OrganizationRole};
//!
//! let membership = OrganizationMembership::new(
//!     Uuid::now_v7(),
//!     "user-1",
//!     OrganizationRole::Admin,
//! );
//! assert!(membership.role.is_admin());
//! assert!(membership.is_active);
//! ```

pub mod grants;
pub mod membership;
pub mod roles;
pub mod workspace;

// Re-export main types for convenience
pub use grants::ResourceGrant;
pub use membership::{OrganizationMembership, WorkspaceMembership};
pub use roles::{OrganizationRole, WorkspaceRole};
pub use workspace::Workspace;

//! Workspace entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A workspace inside an organization.
///
/// Workspaces group datasets, workflows, and policies; workspace-scoped
/// permission checks resolve against [`WorkspaceMembership`] records.
///
/// [`WorkspaceMembership`]: crate::membership::WorkspaceMembership
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workspace {
    /// Unique workspace id.
    pub id: Uuid,
    /// Owning organization.
    pub organization_id: Uuid,
    /// Display name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl Workspace {
    /// Create a workspace with a fresh id and the current time.
    pub fn new(organization_id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            organization_id,
            name: name.into(),
            description: None,
            created_at: Utc::now(),
        }
    }

    /// Attach a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workspace_creation() {
        let org = Uuid::now_v7();
        let ws = Workspace::new(org, "quality").with_description("Data quality checks");
        assert_eq!(ws.organization_id, org);
        assert_eq!(ws.name, "quality");
        assert_eq!(ws.description.as_deref(), Some("Data quality checks"));
    }
}

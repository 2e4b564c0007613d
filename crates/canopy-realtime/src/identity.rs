//! Connection identity.
//!
//! The identity handed to `connect` is retained by the connection manager
//! and reused verbatim for every scheduled retry, so a reconnect never goes
//! out with a placeholder user.

use canopy_core::{OrganizationId, UserId};

/// Who the connection is established for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Identity {
    /// The authenticated user.
    pub user_id: UserId,
    /// The tenant organization, when the user acts inside one.
    pub organization_id: Option<OrganizationId>,
}

impl Identity {
    /// Identity for a user outside any organization.
    #[must_use]
    pub fn new(user_id: impl Into<UserId>) -> Self {
        Self {
            user_id: user_id.into(),
            organization_id: None,
        }
    }

    /// Attach a tenant organization.
    #[must_use]
    pub fn with_organization(mut self, organization_id: impl Into<OrganizationId>) -> Self {
        self.organization_id = Some(organization_id.into());
        self
    }

    /// Build the connection URL from a base endpoint.
    ///
    /// Appends `userId` (always) and `organizationId` (when present) as
    /// query parameters. IDs are expected to be URL-safe tokens.
    #[must_use]
    pub fn connect_url(&self, endpoint: &str) -> String {
        let sep = if endpoint.contains('?') { '&' } else { '?' };
        match &self.organization_id {
            Some(org) => format!(
                "{endpoint}{sep}userId={user}&organizationId={org}",
                user = self.user_id
            ),
            None => format!("{endpoint}{sep}userId={user}", user = self.user_id),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

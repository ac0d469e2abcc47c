use serde::Deserialize;
use uuid::Uuid;

/// The authenticated user as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
}

/// The token material issued alongside a successful grant.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
}

/// Result of a successful sign-in or sign-up at the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthGrant {
    pub user: AuthUser,
    pub session: AuthSession,
}

/// In-memory session context: owner identity plus the access token.
///
/// Constructed once on successful sign-in, cleared on sign-out, absent
/// otherwise. Its presence is the sole gate deciding whether
/// portfolio-mutating operations are reachable. Nothing here is ever
/// written to durable storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    pub user_id: Uuid,
    pub email: String,
    pub access_token: String,
}

impl SessionContext {
    pub fn from_grant(grant: AuthGrant) -> Self {
        Self {
            user_id: grant.user.id,
            email: grant.user.email,
            access_token: grant.session.access_token,
        }
    }
}

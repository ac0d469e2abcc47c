use crate::errors::CoreError;
use crate::models::session::SessionContext;
use crate::providers::traits::IdentityProvider;

/// Sign-in/sign-up/sign-out flows over the external identity
/// capability. Produces and retires [`SessionContext`] values; holds no
/// state of its own.
pub struct AuthService;

impl AuthService {
    pub fn new() -> Self {
        Self
    }

    pub async fn sign_in(
        &self,
        provider: &dyn IdentityProvider,
        email: &str,
        password: &str,
    ) -> Result<SessionContext, CoreError> {
        let grant = provider.sign_in_with_password(email, password).await?;
        tracing::info!(user = %grant.user.id, "signed in");
        Ok(SessionContext::from_grant(grant))
    }

    pub async fn sign_up(
        &self,
        provider: &dyn IdentityProvider,
        email: &str,
        password: &str,
    ) -> Result<SessionContext, CoreError> {
        let grant = provider.sign_up(email, password).await?;
        tracing::info!(user = %grant.user.id, "signed up");
        Ok(SessionContext::from_grant(grant))
    }

    /// Retire a session. Remote revocation is best-effort: a transport
    /// failure is logged and the session is dropped regardless, so the
    /// local sign-out always succeeds.
    pub async fn sign_out(&self, provider: &dyn IdentityProvider, session: SessionContext) {
        if let Err(error) = provider.sign_out(&session.access_token).await {
            tracing::warn!(%error, "remote sign-out failed; local session cleared anyway");
        } else {
            tracing::info!(user = %session.user_id, "signed out");
        }
    }
}

impl Default for AuthService {
    fn default() -> Self {
        Self::new()
    }
}

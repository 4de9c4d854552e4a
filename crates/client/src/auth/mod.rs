//! Two-step sign-in for console staff.
//!
//! ```text
//! Anonymous --login--> Authenticating --ok--> OtpPending --verify--> Authenticated
//!     ^                      |                                            |
//!     +------- failure ------+                                            |
//!     +------------------------------- logout ---------------------------+
//! ```
//!
//! The first step needs an authorization record for the email and a
//! password accepted by the configured [`CredentialVerifier`]. The second step
//! accepts any well-formed six digit code.

pub mod sender;
pub mod session;
pub mod verifier;

use std::sync::Arc;

use harsia_core::otp;
use harsia_db::models::admin_user::AdminUser;
use harsia_db::store::{AuthorizationStore, StoreError};
use tokio::sync::RwLock;

pub use sender::{CodeSender, SimulatedCodeSender};
pub use session::{FileSessionStore, MemorySessionStore, Session, SessionStore};
pub use verifier::{AllowListVerifier, CredentialVerifier};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AuthError {
    #[error("User not authorized for admin access")]
    NotAuthorized,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Invalid OTP code")]
    InvalidCode,

    #[error("No verification code is pending for this email")]
    InvalidState,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Could not send verification code: {0}")]
    Delivery(String),
}

/// Where a gate is in the sign-in flow.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthState {
    Anonymous,
    Authenticating { email: String },
    OtpPending { user: AdminUser },
    Authenticated(Session),
}

impl AuthState {
    pub fn name(&self) -> &'static str {
        match self {
            AuthState::Anonymous => "anonymous",
            AuthState::Authenticating { .. } => "authenticating",
            AuthState::OtpPending { .. } => "otp_pending",
            AuthState::Authenticated(_) => "authenticated",
        }
    }
}

/// Sign-in state machine for one staff member's session.
pub struct AuthGate {
    store: Arc<dyn AuthorizationStore>,
    verifier: Arc<dyn CredentialVerifier>,
    sender: Arc<dyn CodeSender>,
    sessions: Arc<dyn SessionStore>,
    state: RwLock<AuthState>,
}

impl AuthGate {
    pub fn new(
        store: Arc<dyn AuthorizationStore>,
        verifier: Arc<dyn CredentialVerifier>,
        sender: Arc<dyn CodeSender>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            store,
            verifier,
            sender,
            sessions,
            state: RwLock::new(AuthState::Anonymous),
        }
    }

    pub async fn state(&self) -> AuthState {
        self.state.read().await.clone()
    }

    /// The current session, if signed in.
    pub async fn session(&self) -> Option<Session> {
        match &*self.state.read().await {
            AuthState::Authenticated(session) => Some(session.clone()),
            _ => None,
        }
    }

    async fn set_state(&self, next: AuthState) {
        let mut state = self.state.write().await;
        tracing::debug!(from = state.name(), to = next.name(), "Auth state change");
        *state = next;
    }

    /// First step: check the authorization record and the password, then
    /// dispatch a one-time code.
    ///
    /// Every failure returns the gate to `Anonymous`.
    pub async fn login(&self, email: &str, password: &str) -> Result<(), AuthError> {
        self.set_state(AuthState::Authenticating {
            email: email.to_string(),
        })
        .await;

        match self.check_credentials(email, password).await {
            Ok(user) => {
                self.set_state(AuthState::OtpPending { user }).await;
            }
            Err(err) => {
                tracing::warn!(email, error = %err, "Login rejected");
                self.set_state(AuthState::Anonymous).await;
                return Err(err);
            }
        }

        if let Err(err) = self.send_code(email).await {
            self.set_state(AuthState::Anonymous).await;
            return Err(err);
        }
        tracing::info!(email, "Password accepted; awaiting verification code");
        Ok(())
    }

    async fn check_credentials(&self, email: &str, password: &str) -> Result<AdminUser, AuthError> {
        let user = self
            .store
            .find_admin_user_by_email(email)
            .await?
            .ok_or(AuthError::NotAuthorized)?;
        if !self.verifier.verify(email, password).await {
            return Err(AuthError::InvalidCredentials);
        }
        Ok(user)
    }

    /// Dispatch a one-time code to `email`.
    pub async fn send_code(&self, email: &str) -> Result<(), AuthError> {
        self.sender.send_code(email).await.inspect_err(|err| {
            tracing::warn!(email, error = %err, "Code dispatch failed");
        })
    }

    /// Second step: accept a well-formed code for the pending email and
    /// establish the session.
    ///
    /// A malformed code leaves the gate waiting for another attempt.
    pub async fn verify_code(&self, email: &str, code: &str) -> Result<Session, AuthError> {
        let user = match &*self.state.read().await {
            AuthState::OtpPending { user } if user.email == email => user.clone(),
            _ => return Err(AuthError::InvalidState),
        };
        if !otp::is_valid_code(code) {
            tracing::warn!(email, "Malformed verification code");
            return Err(AuthError::InvalidCode);
        }

        let session = Session::from(&user);
        if let Err(err) = self.sessions.save(&session).await {
            tracing::warn!(email, error = %err, "Session could not be persisted");
        }
        self.set_state(AuthState::Authenticated(session.clone())).await;
        tracing::info!(email, user_id = session.user_id, "Signed in");
        Ok(session)
    }

    /// Drop the session and return to `Anonymous`.
    pub async fn logout(&self) {
        if let Err(err) = self.sessions.clear().await {
            tracing::warn!(error = %err, "Persisted session could not be cleared");
        }
        self.set_state(AuthState::Anonymous).await;
    }

    /// Re-enter `Authenticated` from a persisted session, if there is one.
    pub async fn restore(&self) -> Option<Session> {
        match self.sessions.load().await {
            Ok(Some(session)) => {
                self.set_state(AuthState::Authenticated(session.clone())).await;
                Some(session)
            }
            Ok(None) => None,
            Err(err) => {
                tracing::warn!(error = %err, "Persisted session ignored");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use assert_matches::assert_matches;
    use harsia_db::models::admin_user::CreateAdminUser;
    use harsia_db::store::MemoryRecordStore;

    use super::verifier::hash_password;
    use super::*;

    const EMAIL: &str = "inspector@harsia.gr";
    const PASSWORD: &str = "runway-27-left";

    async fn gate_with(sessions: Arc<dyn SessionStore>) -> AuthGate {
        let store = MemoryRecordStore::new();
        store
            .seed_admin_user(CreateAdminUser {
                email: EMAIL.into(),
                name: "Inspector".into(),
                role: None,
            })
            .await
            .unwrap();
        store
            .seed_admin_user(CreateAdminUser {
                email: "listed-elsewhere@harsia.gr".into(),
                name: "Other".into(),
                role: None,
            })
            .await
            .unwrap();
        let verifier = AllowListVerifier::from_entries([(
            EMAIL.to_string(),
            hash_password(PASSWORD).unwrap(),
        )])
        .unwrap();
        AuthGate::new(
            Arc::new(store),
            Arc::new(verifier),
            Arc::new(SimulatedCodeSender::new(Duration::ZERO)),
            sessions,
        )
    }

    async fn gate() -> AuthGate {
        gate_with(Arc::new(MemorySessionStore::default())).await
    }

    #[tokio::test]
    async fn unknown_email_is_not_authorized() {
        let gate = gate().await;
        assert_matches!(
            gate.login("nobody@harsia.gr", PASSWORD).await,
            Err(AuthError::NotAuthorized)
        );
        assert_eq!(gate.state().await, AuthState::Anonymous);
    }

    #[tokio::test]
    async fn authorized_user_without_allow_list_entry_is_rejected() {
        let gate = gate().await;
        assert_matches!(
            gate.login("listed-elsewhere@harsia.gr", PASSWORD).await,
            Err(AuthError::InvalidCredentials)
        );
    }

    #[tokio::test]
    async fn wrong_password_returns_to_anonymous() {
        let gate = gate().await;
        assert_matches!(
            gate.login(EMAIL, "nope").await,
            Err(AuthError::InvalidCredentials)
        );
        assert_eq!(gate.state().await, AuthState::Anonymous);
    }

    #[tokio::test]
    async fn full_flow_establishes_session() {
        let gate = gate().await;
        gate.login(EMAIL, PASSWORD).await.unwrap();
        assert_eq!(gate.state().await.name(), "otp_pending");

        let session = gate.verify_code(EMAIL, "123456").await.unwrap();
        assert_eq!(session.email, EMAIL);
        assert_eq!(session.role, "admin");
        assert_eq!(gate.session().await, Some(session));

        gate.logout().await;
        assert_eq!(gate.state().await, AuthState::Anonymous);
        assert_eq!(gate.session().await, None);
    }

    #[tokio::test]
    async fn malformed_code_keeps_otp_pending() {
        let gate = gate().await;
        gate.login(EMAIL, PASSWORD).await.unwrap();
        assert_matches!(
            gate.verify_code(EMAIL, "12345a").await,
            Err(AuthError::InvalidCode)
        );
        assert_eq!(gate.state().await.name(), "otp_pending");
        assert!(gate.verify_code(EMAIL, "000000").await.is_ok());
    }

    #[tokio::test]
    async fn verify_without_pending_login_is_invalid_state() {
        let gate = gate().await;
        assert_matches!(
            gate.verify_code(EMAIL, "123456").await,
            Err(AuthError::InvalidState)
        );
        gate.login(EMAIL, PASSWORD).await.unwrap();
        assert_matches!(
            gate.verify_code("someone-else@harsia.gr", "123456").await,
            Err(AuthError::InvalidState)
        );
    }

    #[tokio::test]
    async fn persisted_session_is_restored() {
        let sessions: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::default());
        let first = gate_with(sessions.clone()).await;
        first.login(EMAIL, PASSWORD).await.unwrap();
        let session = first.verify_code(EMAIL, "654321").await.unwrap();

        let second = gate_with(sessions).await;
        assert_eq!(second.restore().await, Some(session));
        assert_eq!(second.state().await.name(), "authenticated");
    }
}

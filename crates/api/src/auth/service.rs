//! Sign-in service shared by all HTTP requests.
//!
//! Each email gets its own [`AuthGate`], so one staff member's pending code
//! never interferes with another's. A verified gate issues one access token;
//! only the most recently issued token for an email is accepted, and logging
//! out drops the gate together with its token.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use harsia_client::auth::{CodeSender, CredentialVerifier, MemorySessionStore};
use harsia_client::{AuthError, AuthGate, Session};
use harsia_db::models::admin_user::AdminUser;
use harsia_db::store::{AuthorizationStore, RecordStore, StoreError};
use tokio::sync::RwLock;

use super::jwt::{generate_access_token, Claims, JwtConfig};

/// Exposes the authorization half of a full record store.
struct StoreAuthorization(Arc<dyn RecordStore>);

#[async_trait]
impl AuthorizationStore for StoreAuthorization {
    async fn find_admin_user_by_email(
        &self,
        email: &str,
    ) -> Result<Option<AdminUser>, StoreError> {
        self.0.find_admin_user_by_email(email).await
    }
}

struct Entry {
    gate: Arc<AuthGate>,
    /// `jti` of the token issued when the gate was verified.
    token_id: Option<String>,
}

/// Result of a successful second step.
#[derive(Debug, Clone)]
pub struct SignedIn {
    pub session: Session,
    pub access_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
}

pub struct AuthService {
    authorization: Arc<dyn AuthorizationStore>,
    verifier: Arc<dyn CredentialVerifier>,
    sender: Arc<dyn CodeSender>,
    jwt: JwtConfig,
    entries: RwLock<HashMap<String, Entry>>,
}

impl AuthService {
    pub fn new(
        store: Arc<dyn RecordStore>,
        verifier: Arc<dyn CredentialVerifier>,
        sender: Arc<dyn CodeSender>,
        jwt: JwtConfig,
    ) -> Self {
        Self {
            authorization: Arc::new(StoreAuthorization(store)),
            verifier,
            sender,
            jwt,
            entries: RwLock::new(HashMap::new()),
        }
    }

    fn new_gate(&self) -> Arc<AuthGate> {
        Arc::new(AuthGate::new(
            self.authorization.clone(),
            self.verifier.clone(),
            self.sender.clone(),
            Arc::new(MemorySessionStore::default()),
        ))
    }

    /// Start (or restart) sign-in for `email`.
    ///
    /// The password is checked on a fresh gate. Only an accepted attempt
    /// replaces what the email had before, including a live session; a
    /// rejected one leaves it untouched.
    pub async fn login(&self, email: &str, password: &str) -> Result<(), AuthError> {
        let gate = self.new_gate();
        gate.login(email, password).await?;

        let replaced = self.entries.write().await.insert(
            email.to_string(),
            Entry {
                gate,
                token_id: None,
            },
        );
        if let Some(previous) = replaced {
            previous.gate.logout().await;
        }
        Ok(())
    }

    /// Accept the one-time code and issue an access token.
    pub async fn verify(&self, email: &str, code: &str) -> Result<SignedIn, AuthError> {
        let gate = self
            .entries
            .read()
            .await
            .get(email)
            .map(|entry| entry.gate.clone())
            .ok_or(AuthError::InvalidState)?;

        let session = gate.verify_code(email, code).await?;
        let claims = Claims::new(session.user_id, &session.email, &session.role, &self.jwt);
        let access_token = generate_access_token(&claims, &self.jwt)
            .map_err(|e| AuthError::Delivery(format!("Token generation failed: {e}")))?;

        let mut entries = self.entries.write().await;
        match entries.get_mut(email) {
            Some(entry) if Arc::ptr_eq(&entry.gate, &gate) => {
                entry.token_id = Some(claims.jti.clone());
            }
            // A newer login replaced this gate while the code was checked.
            _ => return Err(AuthError::InvalidState),
        }

        Ok(SignedIn {
            session,
            access_token,
            expires_in: self.jwt.access_token_expiry_mins * 60,
        })
    }

    /// The session behind `claims`, if their token is still the live one.
    pub async fn session_for(&self, claims: &Claims) -> Option<Session> {
        let gate = {
            let entries = self.entries.read().await;
            let entry = entries.get(&claims.email)?;
            if entry.token_id.as_deref() != Some(claims.jti.as_str()) {
                return None;
            }
            entry.gate.clone()
        };
        gate.session()
            .await
            .filter(|session| session.user_id == claims.sub)
    }

    /// End the session for `email`. Any token issued for it stops working.
    pub async fn logout(&self, email: &str) {
        let removed = self.entries.write().await.remove(email);
        if let Some(entry) = removed {
            entry.gate.logout().await;
            tracing::info!(email, "Signed out");
        }
    }
}

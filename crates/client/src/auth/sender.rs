//! One-time code dispatch.

use std::time::Duration;

use async_trait::async_trait;
use harsia_core::otp::DEFAULT_SEND_DELAY_MS;

use super::AuthError;

/// Delivers a one-time code to the given address.
#[async_trait]
pub trait CodeSender: Send + Sync {
    async fn send_code(&self, email: &str) -> Result<(), AuthError>;
}

/// Pretends to send a code: waits for the configured delay and succeeds.
/// Nothing leaves the process.
#[derive(Debug, Clone)]
pub struct SimulatedCodeSender {
    delay: Duration,
}

impl SimulatedCodeSender {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for SimulatedCodeSender {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_SEND_DELAY_MS))
    }
}

#[async_trait]
impl CodeSender for SimulatedCodeSender {
    async fn send_code(&self, email: &str) -> Result<(), AuthError> {
        tokio::time::sleep(self.delay).await;
        tracing::info!(email, "Verification code dispatched (simulated)");
        Ok(())
    }
}

//! User alert port interface

use async_trait::async_trait;
use thiserror::Error;

/// Alert errors
#[derive(Debug, Clone, Error)]
pub enum AlertError {
    #[error("Failed to show alert: {0}")]
    SendFailed(String),
}

/// Port for blocking user notifications
#[async_trait]
pub trait Alerter: Send + Sync {
    /// Show a message to the user.
    /// Completes once the alert has been delivered.
    async fn alert(&self, message: &str) -> Result<(), AlertError>;
}

/// Blanket implementation for boxed alerter types
#[async_trait]
impl Alerter for Box<dyn Alerter> {
    async fn alert(&self, message: &str) -> Result<(), AlertError> {
        self.as_ref().alert(message).await
    }
}

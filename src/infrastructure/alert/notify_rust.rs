//! Desktop notification alert adapter using notify-rust
//!
//! Works on Windows, macOS, and Linux.

use async_trait::async_trait;

use crate::application::ports::{AlertError, Alerter};

const ALERT_ICON: &str = "dialog-error";

/// Shows alerts as desktop notifications
pub struct NotifyRustAlerter {
    /// Application name for notifications
    app_name: String,
}

impl NotifyRustAlerter {
    pub fn new() -> Self {
        Self {
            app_name: "camrec".to_string(),
        }
    }

    /// Create with custom app name
    pub fn with_app_name(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
        }
    }
}

impl Default for NotifyRustAlerter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Alerter for NotifyRustAlerter {
    async fn alert(&self, message: &str) -> Result<(), AlertError> {
        let message = message.to_owned();
        let app_name = self.app_name.clone();

        // notify-rust operations can block, so run in spawn_blocking
        tokio::task::spawn_blocking(move || {
            notify_rust::Notification::new()
                .appname(&app_name)
                .summary("Camera unavailable")
                .body(&message)
                .icon(ALERT_ICON)
                .show()
                .map_err(|e| AlertError::SendFailed(e.to_string()))?;

            Ok(())
        })
        .await
        .map_err(|e| AlertError::SendFailed(format!("Task join error: {}", e)))?
    }
}

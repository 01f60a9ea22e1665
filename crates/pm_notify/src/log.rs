use async_trait::async_trait;
use pm_core::{Notifier, Result};

use crate::smtp::preview;

/// Logs the email instead of sending it. Used for dry runs.
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, subject: &str, body: &str) -> Result<()> {
        tracing::info!("📭 Dry run, email not sent");
        tracing::info!("Subject: {}", subject);
        tracing::info!("Body preview: {}...", preview(body));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_log_notifier_never_fails() {
        let body = "word ".repeat(100);
        assert!(LogNotifier.notify("Subject", &body).await.is_ok());
        assert!(LogNotifier.notify("", "").await.is_ok());
    }
}

//! Shared mocks for OTP service tests

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::services::otp::traits::EmailServiceTrait;

/// Mock email service recording every delivery attempt
#[derive(Clone, Default)]
pub struct MockEmailService {
    /// (email, code) pairs handed to the mailer
    pub sent: Arc<Mutex<Vec<(String, String)>>>,
    /// When true, every send fails
    pub fail: bool,
}

impl MockEmailService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            fail: true,
        }
    }

    pub async fn sent_count(&self) -> usize {
        self.sent.lock().await.len()
    }
}

#[async_trait]
impl EmailServiceTrait for MockEmailService {
    async fn send_otp_email(&self, email: &str, code: &str) -> Result<String, String> {
        self.sent
            .lock()
            .await
            .push((email.to_string(), code.to_string()));

        if self.fail {
            Err("simulated provider outage".to_string())
        } else {
            Ok(format!("mock-{}", self.sent.lock().await.len()))
        }
    }
}

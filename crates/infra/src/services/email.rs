use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::DeliveryError;
use crate::config::ProviderConfig;

#[async_trait::async_trait]
pub trait IEmailProvider: Send + Sync {
    /// Returns the provider message id on success
    async fn send(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<String, DeliveryError>;
}

#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    to: &'a str,
    subject: &'a str,
    body: &'a str,
}

#[derive(Debug, Deserialize)]
struct SendEmailResponse {
    message_id: String,
}

/// Talks to the configured transactional email gateway over HTTP
pub struct HttpEmailProvider {
    client: reqwest::Client,
    url: String,
    api_key: String,
}

impl HttpEmailProvider {
    pub fn new(config: &ProviderConfig, timeout_secs: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_default();
        Self {
            client,
            url: config.url.clone(),
            api_key: config.api_key.clone(),
        }
    }
}

#[async_trait::async_trait]
impl IEmailProvider for HttpEmailProvider {
    async fn send(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<String, DeliveryError> {
        let res = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&SendEmailRequest { to, subject, body })
            .send()
            .await
            .map_err(|e| {
                let code = if e.is_timeout() { "timeout" } else { "network" };
                DeliveryError::new(code, e.to_string())
            })?;

        let status = res.status();
        if !status.is_success() {
            warn!(
                "Email provider returned status: {} for recipient: {}",
                status, to
            );
            return Err(DeliveryError::new(
                &format!("http_{}", status.as_u16()),
                format!("email provider rejected request with status {}", status),
            ));
        }

        res.json::<SendEmailResponse>()
            .await
            .map(|body| body.message_id)
            .map_err(|e| DeliveryError::new("bad_response", e.to_string()))
    }
}

/// Records sent mails instead of delivering them, with optional
/// injected failures for dispatcher tests
pub struct InMemoryEmailProvider {
    pub sent: Mutex<Vec<(String, String, String)>>,
    fail_times: AtomicUsize,
}

impl InMemoryEmailProvider {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(vec![]),
            fail_times: AtomicUsize::new(0),
        }
    }

    /// The next `times` sends will fail with a provider error
    pub fn fail_times(&self, times: usize) {
        self.fail_times.store(times, Ordering::SeqCst);
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

impl Default for InMemoryEmailProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IEmailProvider for InMemoryEmailProvider {
    async fn send(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<String, DeliveryError> {
        let remaining = self.fail_times.load(Ordering::SeqCst);
        if remaining > 0 {
            self.fail_times.store(remaining - 1, Ordering::SeqCst);
            return Err(DeliveryError::new("http_502", "injected email failure"));
        }
        let mut sent = self.sent.lock().unwrap();
        sent.push((to.to_string(), subject.to_string(), body.to_string()));
        Ok(format!("email-{}", sent.len()))
    }
}

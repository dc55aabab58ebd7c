mod email;
mod sms;

use std::fmt;

pub use email::{HttpEmailProvider, IEmailProvider, InMemoryEmailProvider};
pub use sms::{HttpSmsProvider, ISmsProvider, InMemorySmsProvider};

/// Error reported by a delivery provider. Every failure is retryable
/// from the dispatcher's point of view, the attempt budget decides
/// when to give up.
#[derive(Debug, Clone)]
pub struct DeliveryError {
    /// Short machine readable code, e.g. "timeout" or "http_502"
    pub code: String,
    pub message: String,
}

impl DeliveryError {
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for DeliveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

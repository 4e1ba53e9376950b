//! Payment processor configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Payment processor configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Signing secret for verifying processor webhook callbacks
    pub webhook_secret: String,
}

impl PaymentConfig {
    /// Validate payment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.webhook_secret.is_empty() {
            return Err(ValidationError::MissingRequired("PAYMENT_WEBHOOK_SECRET"));
        }
        if !self.webhook_secret.starts_with("whsec_") {
            return Err(ValidationError::InvalidWebhookSecret);
        }
        Ok(())
    }
}

//! Alert SMS delivery via an HTTP SMS gateway.
//!
//! [`SmsDelivery`] POSTs a JSON message to a gateway endpoint. One attempt per
//! call, no retry: a failure is reported to the dispatcher as-is.

use std::time::Duration;

use serde::Serialize;

/// HTTP request timeout for a single send.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for SMS gateway failures.
#[derive(Debug, thiserror::Error)]
pub enum SmsError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The gateway returned a non-2xx status code.
    #[error("SMS gateway returned HTTP {0}")]
    HttpStatus(u16),
}

// ---------------------------------------------------------------------------
// SmsGatewayConfig
// ---------------------------------------------------------------------------

/// Configuration for the SMS gateway client.
#[derive(Debug, Clone)]
pub struct SmsGatewayConfig {
    /// Endpoint that accepts `POST {to, message, sender_id}`.
    pub gateway_url: String,
    /// Optional bearer token.
    pub api_token: Option<String>,
    /// Optional sender name shown on the handset.
    pub sender_id: Option<String>,
}

impl SmsGatewayConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `SMS_GATEWAY_URL` is not set.
    ///
    /// | Variable            | Required | Default |
    /// |---------------------|----------|---------|
    /// | `SMS_GATEWAY_URL`   | yes      | —       |
    /// | `SMS_GATEWAY_TOKEN` | no       | —       |
    /// | `SMS_SENDER_ID`     | no       | —       |
    pub fn from_env() -> Option<Self> {
        let gateway_url = std::env::var("SMS_GATEWAY_URL").ok()?;
        Some(Self {
            gateway_url,
            api_token: std::env::var("SMS_GATEWAY_TOKEN").ok(),
            sender_id: std::env::var("SMS_SENDER_ID").ok(),
        })
    }
}

// ---------------------------------------------------------------------------
// SmsDelivery
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct SmsPayload<'a> {
    to: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    sender_id: Option<&'a str>,
}

/// Sends review alert SMS messages through the gateway.
pub struct SmsDelivery {
    client: reqwest::Client,
    config: SmsGatewayConfig,
}

impl SmsDelivery {
    /// Create a client with a pre-configured HTTP timeout.
    pub fn new(config: SmsGatewayConfig) -> Result<Self, SmsError> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, config })
    }

    /// Send one SMS.
    pub async fn deliver(&self, to: &str, message: &str) -> Result<(), SmsError> {
        let payload = SmsPayload {
            to,
            message,
            sender_id: self.config.sender_id.as_deref(),
        };

        let mut request = self.client.post(&self.config.gateway_url).json(&payload);
        if let Some(token) = &self.config.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            tracing::warn!(to, status, "SMS gateway rejected message");
            return Err(SmsError::HttpStatus(status));
        }

        tracing::info!(to, "Alert SMS sent");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SmsGatewayConfig {
        SmsGatewayConfig {
            gateway_url: "http://127.0.0.1:9/sms".to_string(),
            api_token: None,
            sender_id: Some("REVIEWS".to_string()),
        }
    }

    #[test]
    fn from_env_returns_none_without_gateway_url() {
        std::env::remove_var("SMS_GATEWAY_URL");
        assert!(SmsGatewayConfig::from_env().is_none());
    }

    #[test]
    fn new_does_not_panic() {
        assert!(SmsDelivery::new(config()).is_ok());
    }

    #[test]
    fn payload_omits_missing_sender() {
        let payload = SmsPayload {
            to: "+819012345678",
            message: "hi",
            sender_id: None,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"to": "+819012345678", "message": "hi"})
        );
    }

    #[test]
    fn sms_error_display_http_status() {
        let err = SmsError::HttpStatus(502);
        assert_eq!(err.to_string(), "SMS gateway returned HTTP 502");
    }

    #[test]
    fn sms_error_display_request() {
        // Build a reqwest error from an invalid URL.
        let req_err = reqwest::Client::new().get("://bad").build().unwrap_err();
        let err = SmsError::Request(req_err);
        assert!(err.to_string().contains("HTTP request failed"));
    }
}

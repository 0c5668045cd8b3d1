use std::net::IpAddr;
use std::time::Duration;

use async_trait::async_trait;
use burrow_core::{CaptchaError, CaptchaVerifier};
use serde::Deserialize;
use tracing::debug;

const SITEVERIFY_URL: &str = "https://api.hcaptcha.com/siteverify";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Deserialize)]
struct SiteVerifyResponse {
    success: bool,
    #[serde(rename = "error-codes", default)]
    error_codes: Vec<String>,
}

/// Verifies hCaptcha responses against the hCaptcha siteverify endpoint.
#[derive(Debug, Clone)]
pub struct HCaptchaVerifier {
    client: reqwest::Client,
    secret_key: String,
    endpoint: String,
}

impl HCaptchaVerifier {
    pub fn new(secret_key: impl Into<String>) -> Result<Self, CaptchaError> {
        Self::with_endpoint(secret_key, SITEVERIFY_URL)
    }

    /// Points the verifier at a different siteverify endpoint.
    pub fn with_endpoint(
        secret_key: impl Into<String>,
        endpoint: impl Into<String>,
    ) -> Result<Self, CaptchaError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| CaptchaError::Unavailable(e.to_string()))?;

        Ok(Self {
            client,
            secret_key: secret_key.into(),
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl CaptchaVerifier for HCaptchaVerifier {
    async fn verify(
        &self,
        response: &str,
        remote_ip: Option<IpAddr>,
    ) -> Result<bool, CaptchaError> {
        if response.is_empty() {
            return Ok(false);
        }

        let remote_ip = remote_ip.map(|ip| ip.to_string());
        let mut form = vec![
            ("secret", self.secret_key.as_str()),
            ("response", response),
        ];
        if let Some(ip) = remote_ip.as_deref() {
            form.push(("remoteip", ip));
        }

        let verdict: SiteVerifyResponse = self
            .client
            .post(&self.endpoint)
            .form(&form)
            .send()
            .await
            .and_then(|reply| reply.error_for_status())
            .map_err(|e| CaptchaError::Unavailable(e.to_string()))?
            .json()
            .await
            .map_err(|e| CaptchaError::InvalidResponse(e.to_string()))?;

        if !verdict.success {
            debug!(error_codes = ?verdict.error_codes, "captcha rejected");
        }
        Ok(verdict.success)
    }
}

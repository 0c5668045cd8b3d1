use crate::error::CaptchaError;
use async_trait::async_trait;
use std::net::IpAddr;

/// An external human-verification check run before a link is created.
#[async_trait]
pub trait CaptchaVerifier: Send + Sync + 'static {
    /// Returns `Ok(true)` when the client's challenge response is accepted.
    async fn verify(&self, response: &str, remote_ip: Option<IpAddr>)
        -> Result<bool, CaptchaError>;
}

/// A verifier that accepts every request, used when CAPTCHA is disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCaptcha;

#[async_trait]
impl CaptchaVerifier for NoCaptcha {
    async fn verify(
        &self,
        _response: &str,
        _remote_ip: Option<IpAddr>,
    ) -> Result<bool, CaptchaError> {
        Ok(true)
    }
}

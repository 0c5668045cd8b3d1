use std::sync::Arc;

use axum::http::{header, HeaderMap};
use burrow_core::{CaptchaVerifier, LinkId, Shortener};

#[derive(Clone)]
pub struct AppState {
    shortener: Arc<dyn Shortener>,
    captcha: Arc<dyn CaptchaVerifier>,
    public_base_url: Option<String>,
    captcha_site_key: Option<String>,
}

impl AppState {
    pub fn new(shortener: Arc<dyn Shortener>, captcha: Arc<dyn CaptchaVerifier>) -> Self {
        Self {
            shortener,
            captcha,
            public_base_url: None,
            captcha_site_key: None,
        }
    }

    /// Fixes the origin used in short URLs instead of deriving it from the
    /// request's `Host` header.
    pub fn with_public_base_url(mut self, base_url: Option<String>) -> Self {
        self.public_base_url = base_url;
        self
    }

    /// Site key rendered into the index page's hCaptcha widget.
    pub fn with_captcha_site_key(mut self, site_key: Option<String>) -> Self {
        self.captcha_site_key = site_key;
        self
    }

    pub fn shortener(&self) -> &dyn Shortener {
        self.shortener.as_ref()
    }

    pub fn captcha(&self) -> &dyn CaptchaVerifier {
        self.captcha.as_ref()
    }

    pub fn captcha_site_key(&self) -> Option<&str> {
        self.captcha_site_key.as_deref()
    }

    /// The public redirect URL for `id`.
    pub fn short_url(&self, id: &LinkId, headers: &HeaderMap) -> String {
        match &self.public_base_url {
            Some(base_url) => id.to_url(base_url),
            None => {
                let host = headers
                    .get(header::HOST)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("localhost");
                id.to_url(&format!("https://{host}"))
            }
        }
    }
}

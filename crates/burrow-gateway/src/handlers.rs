mod health;
mod links;
mod pages;

pub use health::health_handler;
pub use links::{create_link_handler, delete_link_handler, get_link_handler, inspect_link_handler};
pub use pages::{index_handler, new_link_form_handler, redirect_handler, result_handler};

use std::net::IpAddr;

use axum::http::HeaderMap;
use burrow_core::{LinkId, ShortenerError};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Ids that could never have been generated are reported as missing.
fn parse_id(raw: String) -> Result<LinkId> {
    LinkId::parse(raw).map_err(|_| AppError::Shortener(ShortenerError::NotFound))
}

/// First address in `X-Forwarded-For`, if any.
fn client_ip(headers: &HeaderMap) -> Option<IpAddr> {
    headers
        .get("x-forwarded-for")?
        .to_str()
        .ok()?
        .split(',')
        .next()?
        .trim()
        .parse()
        .ok()
}

/// Runs the CAPTCHA gate that must pass before a link is created.
async fn ensure_human(state: &AppState, response: Option<&str>, headers: &HeaderMap) -> Result<()> {
    let passed = state
        .captcha()
        .verify(response.unwrap_or_default(), client_ip(headers))
        .await?;

    if passed {
        Ok(())
    } else {
        Err(AppError::CaptchaRejected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn client_ip_takes_first_forwarded_address() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.7, 10.0.0.1"),
        );

        assert_eq!(client_ip(&headers), Some("203.0.113.7".parse().unwrap()));
    }

    #[test]
    fn client_ip_ignores_garbage() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("unknown"));

        assert_eq!(client_ip(&headers), None);
        assert_eq!(client_ip(&HeaderMap::new()), None);
    }

    #[test]
    fn malformed_id_is_not_found() {
        let err = parse_id("../etc".to_string()).unwrap_err();
        assert!(matches!(err, AppError::Shortener(ShortenerError::NotFound)));
    }
}

use burrow_core::{LinkId, LinkRecord};
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct CreateLinkRequest {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub captcha_response: Option<String>,
}

/// Form body posted by the index page.
#[derive(Deserialize)]
pub struct NewLinkForm {
    #[serde(default)]
    pub url: String,
    #[serde(rename = "h-captcha-response", default)]
    pub captcha_response: Option<String>,
}

#[derive(Serialize)]
pub struct CreateLinkResponse {
    pub id: LinkId,
    pub short_url: String,
    pub admin_password: String,
}

#[derive(Serialize)]
pub struct GetLinkResponse {
    pub id: LinkId,
    pub url: String,
}

#[derive(Deserialize)]
pub struct AdminRequest {
    pub admin_password: String,
}

#[derive(Serialize)]
pub struct LinkDetailsResponse {
    pub id: LinkId,
    pub url: String,
    pub short_url: String,
    pub needs_captcha: bool,
    pub needs_password: bool,
    pub created_at: Option<String>,
}

impl LinkDetailsResponse {
    pub fn new(record: LinkRecord, short_url: String) -> Self {
        Self {
            id: record.id,
            url: record.target_url,
            short_url,
            needs_captcha: record.needs_captcha,
            needs_password: record.needs_password,
            created_at: record.created_at.map(|ts| ts.to_string()),
        }
    }
}

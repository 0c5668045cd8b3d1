use crate::error::CoreError;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

const MAX_LENGTH: usize = 64;

/// The primary key of a stored link.
///
/// Generated ids are uppercase base32, but any ASCII alphanumeric string of
/// 1-64 characters is accepted on lookup. Comparison is case-sensitive.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinkId(String);

impl LinkId {
    /// Parses an id received from a caller.
    pub fn parse(id: impl Into<String>) -> Result<Self, CoreError> {
        let id = id.into();
        Self::validate(&id)?;
        Ok(Self(id))
    }

    /// Wraps an id without validation.
    ///
    /// Use this only for ids produced by a trusted generator.
    pub fn new_unchecked(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Builds the public redirect URL for this id.
    pub fn to_url(&self, base_url: &str) -> String {
        format!("{}/u/{}", base_url.trim_end_matches('/'), self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn validate(id: &str) -> Result<(), CoreError> {
        if id.is_empty() || id.len() > MAX_LENGTH {
            return Err(CoreError::InvalidLinkId(format!(
                "length must be between 1 and {}, got {}",
                MAX_LENGTH,
                id.len()
            )));
        }

        if !id.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(CoreError::InvalidLinkId(format!(
                "must contain only ASCII letters and digits: '{}'",
                id
            )));
        }

        Ok(())
    }
}

impl Display for LinkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The secret that authorizes deletion and the admin view of a link.
///
/// `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct AdminPassword(String);

impl AdminPassword {
    pub fn new(password: impl Into<String>) -> Self {
        Self(password.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Debug for AdminPassword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AdminPassword(<redacted>)")
    }
}

/// A link about to be inserted.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub id: LinkId,
    pub target_url: String,
    pub admin_password: AdminPassword,
    pub needs_captcha: bool,
    pub needs_password: bool,
}

/// A stored link as returned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkRecord {
    pub id: LinkId,
    pub target_url: String,
    pub needs_captcha: bool,
    pub needs_password: bool,
    /// Set by the store at insert time. Rows written before the column
    /// existed may not carry one.
    pub created_at: Option<Timestamp>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_ids() {
        assert!(LinkId::parse("A").is_ok());
        assert!(LinkId::parse("ABCD").is_ok());
        assert!(LinkId::parse("abc123XYZ").is_ok());
        assert!(LinkId::parse("Z".repeat(64)).is_ok());
    }

    #[test]
    fn empty_or_too_long() {
        assert!(LinkId::parse("").is_err());
        assert!(LinkId::parse("A".repeat(65)).is_err());
    }

    #[test]
    fn invalid_characters() {
        assert!(LinkId::parse("AB CD").is_err());
        assert!(LinkId::parse("AB/CD").is_err());
        assert!(LinkId::parse("AB-CD").is_err());
        assert!(LinkId::parse("ABCD=").is_err());
    }

    #[test]
    fn to_url_appends_redirect_path() {
        let id = LinkId::parse("ABCD").unwrap();
        assert_eq!(id.to_url("https://burrow.example"), "https://burrow.example/u/ABCD");
        assert_eq!(id.to_url("https://burrow.example/"), "https://burrow.example/u/ABCD");
    }

    #[test]
    fn admin_password_debug_is_redacted() {
        let password = AdminPassword::new("super-secret");
        assert!(!format!("{:?}", password).contains("super-secret"));
        assert_eq!(password.as_str(), "super-secret");
    }
}

use crate::link::{AdminPassword, LinkId, LinkRecord};
use async_trait::async_trait;

type Result<T> = std::result::Result<T, crate::error::ShortenerError>;

/// Parameters for creating a shortened URL.
#[derive(Debug, Clone)]
pub struct ShortenParams {
    /// The URL the new link redirects to.
    pub target_url: String,
}

/// The outcome of a successful create.
///
/// This is the only time the admin password leaves the service.
#[derive(Debug, Clone)]
pub struct CreatedLink {
    pub id: LinkId,
    pub admin_password: AdminPassword,
}

#[async_trait]
pub trait Shortener: Send + Sync + 'static {
    /// Creates a link with a freshly allocated id.
    async fn shorten(&self, params: ShortenParams) -> Result<CreatedLink>;

    /// Resolves an id to its stored link, or `NotFound`.
    async fn resolve(&self, id: &LinkId) -> Result<LinkRecord>;

    /// Returns the stored link when the admin password matches, or `NotFound`.
    async fn inspect(&self, id: &LinkId, admin_password: &AdminPassword) -> Result<LinkRecord>;

    /// Deletes a link. A wrong password and an unknown id are both `NotFound`.
    async fn delete(&self, id: &LinkId, admin_password: &AdminPassword) -> Result<()>;
}

use crate::error::StorageError;
use crate::link::{AdminPassword, LinkId, LinkRecord, NewLink};
use async_trait::async_trait;

/// Result type for link store operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// A read-only view of a link store.
#[async_trait]
pub trait ReadLinkStore: Send + Sync + 'static {
    /// Retrieves the link for a given id.
    /// Returns `None` if the id does not exist.
    async fn get(&self, id: &LinkId) -> Result<Option<LinkRecord>>;

    /// Retrieves the link only if `admin_password` matches the stored one.
    ///
    /// An unknown id and a wrong password both yield `None`.
    async fn get_with_password(
        &self,
        id: &LinkId,
        admin_password: &AdminPassword,
    ) -> Result<Option<LinkRecord>>;
}

#[async_trait]
pub trait LinkStore: ReadLinkStore {
    /// Inserts a new link in a single atomic step.
    /// Returns `Err(Conflict)` if the id is already taken.
    async fn insert(&self, link: &NewLink) -> Result<()>;

    /// Deletes the link matching both `id` and `admin_password`.
    /// Returns `true` if a row was removed.
    async fn delete(&self, id: &LinkId, admin_password: &AdminPassword) -> Result<bool>;
}

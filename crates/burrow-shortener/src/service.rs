use crate::id_length::IdLength;
use crate::settings::ShortenerSettings;
use async_trait::async_trait;
use burrow_core::{
    AdminPassword, CreatedLink, LinkId, LinkRecord, LinkStore, NewLink, ShortenParams, Shortener,
    ShortenerError, StorageError,
};
use burrow_generator::Generator;
use std::sync::Arc;
use tracing::{debug, error, info, trace};

/// A concrete implementation of the `Shortener` trait.
///
/// This service wraps a `LinkStore` and a `Generator` to handle:
/// - URL validation
/// - Random id allocation with collision retry
/// - Admin password issuance and checks
///
/// Uniqueness is enforced by the store alone. When an insert collides the
/// service draws a new id of the same length; after
/// `collisions_before_growth` collisions the shared id length grows by one
/// for every later create.
#[derive(Debug, Clone)]
pub struct ShortenerService<S, G> {
    store: Arc<S>,
    generator: Arc<G>,
    id_length: Arc<IdLength>,
    settings: ShortenerSettings,
}

impl<S: LinkStore, G: Generator> ShortenerService<S, G> {
    /// Creates a new `ShortenerService` with default settings.
    pub fn new(store: S, generator: G) -> Self {
        Self::with_settings(store, generator, ShortenerSettings::default())
    }

    pub fn with_settings(store: S, generator: G, settings: ShortenerSettings) -> Self {
        Self {
            store: Arc::new(store),
            generator: Arc::new(generator),
            id_length: Arc::new(IdLength::new(
                settings.initial_id_length,
                settings.max_id_length,
            )),
            settings,
        }
    }

    /// The length the next generated id will have.
    pub fn id_length(&self) -> usize {
        self.id_length.current()
    }

    fn validate_url(&self, url: &str) -> Result<(), ShortenerError> {
        if url.is_empty() {
            return Err(ShortenerError::InvalidInput(
                "URL cannot be empty".to_string(),
            ));
        }

        if url.len() > self.settings.max_url_length {
            return Err(ShortenerError::InvalidInput(format!(
                "URL must be at most {} bytes, got {}",
                self.settings.max_url_length,
                url.len()
            )));
        }

        // Stored targets become a Location header on redirect.
        if url.chars().any(char::is_control) {
            return Err(ShortenerError::InvalidInput(
                "URL cannot contain control characters".to_string(),
            ));
        }

        Ok(())
    }

    /// Inserts `target_url` under a fresh id, retrying on collisions.
    async fn allocate(
        &self,
        target_url: &str,
        admin_password: &AdminPassword,
    ) -> Result<LinkId, ShortenerError> {
        let mut length = self.id_length.current();
        let mut collisions_at_length = 0;

        for attempt in 1..=self.settings.max_attempts {
            let link = NewLink {
                id: LinkId::new_unchecked(self.generator.generate(length)),
                target_url: target_url.to_owned(),
                admin_password: admin_password.clone(),
                needs_captcha: false,
                needs_password: false,
            };

            match self.store.insert(&link).await {
                Ok(()) => return Ok(link.id),
                Err(StorageError::Conflict(_)) => {
                    collisions_at_length += 1;
                    debug!(id = %link.id, attempt, length, "link id collision");

                    if collisions_at_length >= self.settings.collisions_before_growth {
                        let grown = self.id_length.grow_from(length);
                        if grown > length {
                            info!(from = length, to = grown, "growing link id length");
                        }
                        length = grown;
                        collisions_at_length = 0;
                    }
                }
                Err(err) => {
                    error!(error = %err, attempt, "failed to insert link");
                    return Err(err.into());
                }
            }
        }

        error!(
            attempts = self.settings.max_attempts,
            length, "gave up allocating a link id"
        );
        Err(ShortenerError::StoreUnavailable(format!(
            "no free link id after {} attempts",
            self.settings.max_attempts
        )))
    }
}

#[async_trait]
impl<S: LinkStore, G: Generator> Shortener for ShortenerService<S, G> {
    async fn shorten(&self, params: ShortenParams) -> Result<CreatedLink, ShortenerError> {
        self.validate_url(&params.target_url)?;

        let admin_password =
            AdminPassword::new(self.generator.generate(self.settings.admin_password_length));
        let id = self.allocate(&params.target_url, &admin_password).await?;

        debug!(id = %id, "created link");
        Ok(CreatedLink { id, admin_password })
    }

    async fn resolve(&self, id: &LinkId) -> Result<LinkRecord, ShortenerError> {
        trace!(id = %id, "resolving link");

        self.store
            .get(id)
            .await
            .map_err(|err| {
                error!(id = %id, error = %err, "failed to resolve link");
                ShortenerError::from(err)
            })?
            .ok_or(ShortenerError::NotFound)
    }

    async fn inspect(
        &self,
        id: &LinkId,
        admin_password: &AdminPassword,
    ) -> Result<LinkRecord, ShortenerError> {
        self.store
            .get_with_password(id, admin_password)
            .await
            .map_err(|err| {
                error!(id = %id, error = %err, "failed to load link details");
                ShortenerError::from(err)
            })?
            .ok_or(ShortenerError::NotFound)
    }

    async fn delete(
        &self,
        id: &LinkId,
        admin_password: &AdminPassword,
    ) -> Result<(), ShortenerError> {
        let deleted = self
            .store
            .delete(id, admin_password)
            .await
            .map_err(|err| {
                error!(id = %id, error = %err, "failed to delete link");
                ShortenerError::from(err)
            })?;

        if deleted {
            info!(id = %id, "deleted link");
            Ok(())
        } else {
            Err(ShortenerError::NotFound)
        }
    }
}

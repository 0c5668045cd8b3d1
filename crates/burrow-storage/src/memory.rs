use async_trait::async_trait;
use burrow_core::repository::{LinkStore, ReadLinkStore, Result};
use burrow_core::{AdminPassword, LinkId, LinkRecord, NewLink, StorageError};
use dashmap::mapref::entry::Entry as MapEntry;
use dashmap::DashMap;
use jiff::Timestamp;
use std::sync::Arc;

/// In-memory storage entry for a link.
#[derive(Debug, Clone)]
struct Entry {
    target_url: String,
    admin_password: AdminPassword,
    needs_captcha: bool,
    needs_password: bool,
    created_at: Timestamp,
}

impl Entry {
    fn to_record(&self, id: &str) -> LinkRecord {
        LinkRecord {
            id: LinkId::new_unchecked(id),
            target_url: self.target_url.clone(),
            needs_captcha: self.needs_captcha,
            needs_password: self.needs_password,
            created_at: Some(self.created_at),
        }
    }
}

/// In-memory implementation of the link store using DashMap.
///
/// Clones share the same map. Inserts go through the entry API so the
/// check for an existing id and the write happen under one shard lock.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLinkStore {
    links: Arc<DashMap<String, Entry>>,
}

impl InMemoryLinkStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored links.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

#[async_trait]
impl ReadLinkStore for InMemoryLinkStore {
    async fn get(&self, id: &LinkId) -> Result<Option<LinkRecord>> {
        Ok(self
            .links
            .get(id.as_str())
            .map(|entry| entry.to_record(id.as_str())))
    }

    async fn get_with_password(
        &self,
        id: &LinkId,
        admin_password: &AdminPassword,
    ) -> Result<Option<LinkRecord>> {
        Ok(self
            .links
            .get(id.as_str())
            .filter(|entry| entry.admin_password == *admin_password)
            .map(|entry| entry.to_record(id.as_str())))
    }
}

#[async_trait]
impl LinkStore for InMemoryLinkStore {
    async fn insert(&self, link: &NewLink) -> Result<()> {
        match self.links.entry(link.id.as_str().to_owned()) {
            MapEntry::Occupied(_) => Err(StorageError::Conflict(link.id.to_string())),
            MapEntry::Vacant(slot) => {
                slot.insert(Entry {
                    target_url: link.target_url.clone(),
                    admin_password: link.admin_password.clone(),
                    needs_captcha: link.needs_captcha,
                    needs_password: link.needs_password,
                    created_at: Timestamp::now(),
                });
                Ok(())
            }
        }
    }

    async fn delete(&self, id: &LinkId, admin_password: &AdminPassword) -> Result<bool> {
        Ok(self
            .links
            .remove_if(id.as_str(), |_, entry| entry.admin_password == *admin_password)
            .is_some())
    }
}

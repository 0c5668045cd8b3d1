pub mod error;
pub mod memory;
pub mod postgres;

pub use burrow_core::repository::{LinkStore, ReadLinkStore, Result};
pub use burrow_core::StorageError;
pub use memory::InMemoryLinkStore;
pub use postgres::PostgresLinkStore;

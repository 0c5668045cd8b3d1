//! Link shortener service implementation.
//!
//! This crate provides [`ShortenerService`], which validates input,
//! allocates random link ids with collision retry, and delegates
//! persistence to a [`burrow_core::LinkStore`].

pub mod id_length;
pub mod service;
pub mod settings;

pub use burrow_core::ShortenerError;
pub use id_length::IdLength;
pub use service::ShortenerService;
pub use settings::ShortenerSettings;

//! Core types and traits for the Burrow URL shortener.
//!
//! This crate provides the link model, the store contracts, and the
//! shortener and CAPTCHA seams shared by the storage, shortener and
//! gateway crates.

pub mod captcha;
pub mod error;
pub mod link;
pub mod repository;
pub mod shortener;

pub use captcha::{CaptchaVerifier, NoCaptcha};
pub use error::{CaptchaError, CoreError, ShortenerError, StorageError};
pub use link::{AdminPassword, LinkId, LinkRecord, NewLink};
pub use repository::{LinkStore, ReadLinkStore};
pub use shortener::{CreatedLink, ShortenParams, Shortener};

//! HTTP surface for the Burrow URL shortener.
//!
//! Routes create, resolve, inspect and delete requests to a
//! [`burrow_core::Shortener`], gating creation behind a
//! [`burrow_core::CaptchaVerifier`].

pub mod app;
pub mod captcha;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod model;
pub mod state;

pub use app::App;
pub use captcha::HCaptchaVerifier;
pub use state::AppState;

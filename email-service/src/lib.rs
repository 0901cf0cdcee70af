//! Email Service - a local email inbox backed by SQLite
//!
//! The store ([`EmailStore`]) validates input and maps storage results onto
//! [`StoreError`]; the [`web`] module exposes it over HTTP. Nothing here is
//! global: build a [`Database`], wrap it in an [`EmailStore`] and hand that to
//! the router.

pub mod config;
pub mod db;
pub mod error;
pub mod seed;
pub mod store;
pub mod types;
pub mod web;

pub use config::ServiceConfig;
pub use db::Database;
pub use error::{StoreError, StoreResult};
pub use store::EmailStore;
pub use types::{Email, EmailFilter, MessageResponse, NewEmail, ResetResponse};
